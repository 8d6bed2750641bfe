use serde::Deserialize;

use super::types::{BatchRequest, PairRequest};

/// A pair as supplied by the caller, before indices are settled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PairSpec {
    pub file1: String,
    pub file2: String,
    #[serde(default)]
    pub index: Option<usize>,
}

impl PairSpec {
    pub fn new(file1: impl Into<String>, file2: impl Into<String>) -> Self {
        Self {
            file1: file1.into(),
            file2: file2.into(),
            index: None,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Build the multi-diff payload.
///
/// Pairs without an explicit index get their position in the input. Explicit
/// indices are kept as-is; duplicates are the caller's problem.
pub fn build_batch<I>(pairs: I) -> BatchRequest
where
    I: IntoIterator<Item = PairSpec>,
{
    let file_pairs = pairs
        .into_iter()
        .enumerate()
        .map(|(pos, spec)| PairRequest {
            index: spec.index.unwrap_or(pos),
            file1: spec.file1,
            file2: spec.file2,
        })
        .collect();
    BatchRequest { file_pairs }
}
