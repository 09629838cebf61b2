//! Loading of the resolved type graph and the crate map from disk.
//!
//! Both documents are JSON when the file has a `.json` extension and YAML
//! otherwise. Enum-valued nodes use the single-key map form in either format
//! (`{simple: int32}`, `{reference: {type-key: ...}}`).

use crate::codegen::rust_gen::CrateMap;
use fidl_types::FidlFileGraph;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

pub fn load_file_graph(path: &Path) -> Result<FidlFileGraph, GraphError> {
    let graph: FidlFileGraph = load_document(path)?;
    debug!(
        path = %path.display(),
        files = graph.files.len(),
        types = graph.resolved_types.len(),
        constants = graph.resolved_constants.len(),
        "loaded file graph"
    );
    Ok(graph)
}

pub fn load_crate_map(path: &Path) -> Result<CrateMap, GraphError> {
    let crate_map: CrateMap = load_document(path)?;
    debug!(path = %path.display(), entries = crate_map.len(), "loaded crate map");
    Ok(crate_map)
}

/// Parse a graph from text already in memory.
pub fn parse_file_graph(
    contents: &str,
    format: DocumentFormat,
) -> Result<FidlFileGraph, GraphError> {
    parse_document(contents, format, Path::new("<memory>"))
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, GraphError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&contents, DocumentFormat::for_path(path), path)
}

fn parse_document<T: DeserializeOwned>(
    contents: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<T, GraphError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yml::from_str(contents).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| GraphError::Parse {
        path: path.to_path_buf(),
        message,
    })
}
