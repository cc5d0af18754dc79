//! Names for entities customized from a base.

use rand::Rng;

const SUFFIX_LEN: usize = 10;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Marker placed between the base name and the random suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTag {
    Environment,
    Communication,
}

impl NameTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            NameTag::Environment => "_ENV_",
            NameTag::Communication => "_COMM_",
        }
    }
}

/// Generates `<base><tag><10 lowercase alphanumerics>`.
///
/// Uniqueness is probabilistic only (36^10 suffixes). The result is not
/// checked against existing names, so a collision would overwrite the
/// backend file of the same name on save.
pub fn synthesize_name(base: &str, tag: NameTag) -> String {
    synthesize_name_with(&mut rand::thread_rng(), base, tag)
}

/// As [`synthesize_name`] with a caller-supplied generator.
pub fn synthesize_name_with<R: Rng + ?Sized>(rng: &mut R, base: &str, tag: NameTag) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..SUFFIX_CHARSET.len());
            SUFFIX_CHARSET[idx] as char
        })
        .collect();
    format!("{base}{}{suffix}", tag.as_str())
}
