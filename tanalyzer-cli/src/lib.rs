//! Argument parsing and command execution for the `tanalyzer` binary.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::io::Write;
use std::path::PathBuf;
use tanalyzer_sync::{ReadinessGate, Session, StoreReader, SyncConfig};
use tanalyzer_types::{CommunicationField, EntityKind};
use tanalyzer_views::{OutputWindow, ViewSet};

#[derive(Parser, Debug)]
#[command(name = "tanalyzer")]
#[command(about = "Browse, customize and analyse environments and communications")]
pub struct Cli {
    /// Backend servlet URL
    #[arg(long)]
    pub servlet_url: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// When the views are initialized after a load
    #[arg(long, value_enum)]
    pub gate: Option<GateArg>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the names of one kind
    List { kind: EntityKind },

    /// Print one entity as JSON
    Show { kind: EntityKind, name: String },

    /// Save an entity from a JSON file
    Save {
        kind: EntityKind,
        file: PathBuf,
        /// File name on the backend; defaults to the entity's `name`
        #[arg(long)]
        name: Option<String>,
    },

    /// Create a new entity from an existing base
    Customize {
        kind: EntityKind,
        base: String,
        /// Name for the new entity; a random one is proposed otherwise
        #[arg(long)]
        name: Option<String>,
        /// Selections as `field=item`; repeat for several items
        #[arg(long = "pick", value_name = "FIELD=ITEM")]
        picks: Vec<String>,
    },

    /// Analyse moving a communication to another environment
    Analyse {
        old_environment: String,
        old_communication: String,
        new_environment: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GateArg {
    AllKinds,
    SharedBulkFlag,
}

impl From<GateArg> for ReadinessGate {
    fn from(arg: GateArg) -> Self {
        match arg {
            GateArg::AllKinds => ReadinessGate::AllKinds,
            GateArg::SharedBulkFlag => ReadinessGate::SharedBulkFlag,
        }
    }
}

impl Cli {
    /// Builds the session configuration: file first, then flags.
    pub fn sync_config(&self) -> Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                SyncConfig::from_json(&text)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => SyncConfig::default(),
        };

        if let Some(url) = &self.servlet_url {
            config.servlet_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(gate) = self.gate {
            config.readiness_gate = gate.into();
        }
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Runs one command against a started session.
pub async fn run(
    command: &Command,
    session: &Session,
    views: &ViewSet,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::List { kind } => {
            for item in session.store().names(*kind).iter() {
                writeln!(out, "{}\t{}", item.id, item.item_name)?;
            }
        }
        Command::Show { kind, name } => {
            let entity = session
                .store()
                .content(*kind, name)
                .ok_or_else(|| anyhow!("No {kind} named {name}"))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&entity)?)?;
        }
        Command::Save { kind, file, name } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let content: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let name = match name {
                Some(name) => name.clone(),
                None => content
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .ok_or_else(|| anyhow!("{} has no name; pass --name", file.display()))?,
            };
            let result = session.loader().save(*kind, &name, content).await;
            print_output(out, &owner_output(views, *kind))?;
            result.with_context(|| format!("Saving {kind}/{name} failed"))?;
        }
        Command::Customize {
            kind,
            base,
            name,
            picks,
        } => {
            let result = customize(session, views, *kind, base, name.as_deref(), picks).await;
            print_output(out, &owner_output(views, *kind))?;
            result?;
        }
        Command::Analyse {
            old_environment,
            old_communication,
            new_environment,
        } => {
            let analysis = &views.analysis;
            analysis.select_old_environment(old_environment)?;
            analysis.select_old_communication(old_communication)?;
            analysis.select_new_environment(new_environment)?;
            let result = analysis.submit(session.loader()).await;
            print_output(out, &analysis.snapshot().output)?;
            result.context("Analysis failed")?;
        }
    }
    Ok(())
}

async fn customize(
    session: &Session,
    views: &ViewSet,
    kind: EntityKind,
    base: &str,
    name: Option<&str>,
    picks: &[String],
) -> Result<()> {
    let picks = parse_picks(picks)?;
    match kind {
        EntityKind::Environments => {
            let editor = &views.environments;
            editor.select_base(base)?;
            if let Some(name) = name {
                editor.set_name(name);
            }
            for (field, items) in &picks {
                if field != "supportedCommunications" {
                    bail!("Environments have no field {field}");
                }
                editor.select_communications(items)?;
            }
            editor.submit(session.loader()).await?;
        }
        EntityKind::Communications => {
            let editor = &views.communications;
            editor.select_base(base)?;
            if let Some(name) = name {
                editor.set_name(name);
            }
            for (key, items) in &picks {
                let field = CommunicationField::ALL
                    .into_iter()
                    .find(|f| f.key() == key)
                    .ok_or_else(|| anyhow!("Communications have no field {key}"))?;
                editor.select(field, items)?;
            }
            editor.submit(session.loader()).await?;
        }
    }
    Ok(())
}

/// Groups `field=item` arguments by field, keeping first-seen order.
pub fn parse_picks(picks: &[String]) -> Result<Vec<(String, Vec<&str>)>> {
    let mut grouped: Vec<(String, Vec<&str>)> = Vec::new();
    for pick in picks {
        let (field, item) = pick
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected FIELD=ITEM, got {pick}"))?;
        match grouped.iter_mut().find(|(f, _)| f == field) {
            Some((_, items)) => items.push(item),
            None => grouped.push((field.to_string(), vec![item])),
        }
    }
    Ok(grouped)
}

fn owner_output(views: &ViewSet, kind: EntityKind) -> OutputWindow {
    match kind {
        EntityKind::Environments => views.environments.snapshot().output,
        EntityKind::Communications => views.communications.snapshot().output,
    }
}

fn print_output(out: &mut dyn Write, output: &OutputWindow) -> Result<()> {
    for line in output.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
