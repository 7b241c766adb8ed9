use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};

/// A file read during one analysis run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    /// Raw local specifiers in the order they appear in `content`
    pub imports: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    /// Resolved imports per processed file. An entry may point at a path that does not
    /// exist when the specifier could not be resolved.
    pub imports: BTreeMap<PathBuf, Vec<PathBuf>>,
    pub content: BTreeMap<PathBuf, String>,
}
