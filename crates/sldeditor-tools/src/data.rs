use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Descriptor of a persisted style document associated with a selection.
///
/// Tools only read these; loading and saving the document is handled
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleData {
    pub name: String,
    pub source: PathBuf,
}

impl StyleData {
    pub fn from_file(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}
