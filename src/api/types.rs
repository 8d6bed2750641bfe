use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One comparison unit as sent to the diff server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRequest {
    pub index: usize,
    pub file1: String,
    pub file2: String,
}

/// Body of `POST /api/multi-diff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub file_pairs: Vec<PairRequest>,
}

/// Server verdict for a pair it could compare.
///
/// The content fields may be filled in later by the reconciler; everything
/// else is exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    pub index: usize,
    pub file1: String,
    pub file2: String,
    pub identical: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file1_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file2_content: Option<String>,
    /// Fields we don't interpret, kept so structured output stays verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PairResult {
    pub fn has_both_contents(&self) -> bool {
        self.file1_content.is_some() && self.file2_content.is_some()
    }

    /// Paths whose content is still missing, tagged with the side they belong to.
    pub fn missing_sides(&self) -> Vec<(Side, &str)> {
        let mut sides = Vec::new();
        if self.file1_content.is_none() {
            sides.push((Side::Left, self.file1.as_str()));
        }
        if self.file2_content.is_none() {
            sides.push((Side::Right, self.file2.as_str()));
        }
        sides
    }

    pub fn content_mut(&mut self, side: Side) -> &mut Option<String> {
        match side {
            Side::Left => &mut self.file1_content,
            Side::Right => &mut self.file2_content,
        }
    }
}

/// Server-reported failure for a single pair (e.g. a missing file).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PairError {
    pub index: usize,
    pub error: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Vec<PairResult>,
    #[serde(default)]
    pub errors: Vec<PairError>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "file1",
            Side::Right => "file2",
        }
    }
}
