use serde::Deserialize;
use serde::Serialize;

/// whether a project takes plain a-vs-b outcomes or the graded
/// five-point scale. fixed at engine construction; a verdict of the
/// other kind is rejected, since mixing the two would skew replay.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Binary,
    Graded,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Binary => write!(f, "binary"),
            Self::Graded => write!(f, "graded"),
        }
    }
}
