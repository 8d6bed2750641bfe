//! Where the list of pairs comes from: flags, a JSON file, or defaults.

use std::path::Path;

use serde_json::Value;

use crate::api::PairSpec;
use crate::error::PairsFileError;

/// Built-in sample set used when nothing else is configured.
pub fn sample_pairs() -> Vec<PairSpec> {
    vec![
        PairSpec::new("sample1.txt", "sample2.txt").with_index(0),
        PairSpec::new("sample1.txt", "lorem/ipsum.txt").with_index(1),
        PairSpec::new("sample2.txt", "sample2.txt").with_index(2),
    ]
}

/// Turn repeated `--pair FILE1 FILE2` values into specs.
pub fn from_flag_values(values: &[String]) -> Vec<PairSpec> {
    values
        .chunks_exact(2)
        .map(|pair| PairSpec::new(pair[0].as_str(), pair[1].as_str()))
        .collect()
}

/// Load pairs from a JSON array of `{file1, file2, index?}` objects.
///
/// Entries without string `file1`/`file2` are skipped.
pub fn load_pairs_file(path: &Path) -> Result<Vec<PairSpec>, PairsFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| PairsFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&contents).map_err(|source| PairsFileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Array(entries) = value else {
        return Err(PairsFileError::NotAList {
            path: path.to_path_buf(),
        });
    };

    let mut pairs = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let (Some(file1), Some(file2)) = (
            entry.get("file1").and_then(Value::as_str),
            entry.get("file2").and_then(Value::as_str),
        ) else {
            tracing::warn!("{}: skipping entry {i}, needs file1 and file2", path.display());
            continue;
        };
        let mut spec = PairSpec::new(file1, file2);
        if let Some(index) = entry.get("index").and_then(Value::as_u64) {
            spec = spec.with_index(index as usize);
        }
        pairs.push(spec);
    }
    Ok(pairs)
}

/// Flag pairs first, then file pairs; if both are empty, the configured
/// defaults, then the sample set.
pub fn resolve_pairs(
    flag_pairs: Vec<PairSpec>,
    file_pairs: Vec<PairSpec>,
    configured: &[PairSpec],
) -> Vec<PairSpec> {
    let mut pairs = flag_pairs;
    pairs.extend(file_pairs);
    if !pairs.is_empty() {
        return pairs;
    }
    if !configured.is_empty() {
        tracing::info!("No file pairs specified. Using configured pairs.");
        return configured.to_vec();
    }
    tracing::info!("No file pairs specified. Using default examples.");
    sample_pairs()
}
