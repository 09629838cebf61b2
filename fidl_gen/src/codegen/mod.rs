pub mod ir;
pub mod rust_gen;

use crate::error::{Diagnostic, GenError};
use fidl_types::FidlFileGraph;
use ir::{FileIr, file_ir_to_json};
use rust_gen::context::relative_path;
use rust_gen::{Context, CrateMap, FileTranslation, translate_file};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/* Extension of every generated IR file */
pub const IR_EXTENSION: &str = "json";

/// Options shared by every file of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Root that schema file paths are made relative to.
    pub src_root: PathBuf,
    /// Schema files to translate. Empty means every file in the graph.
    pub files: Vec<String>,
}

/// Translate the requested files, in sorted path order.
///
/// Failures never stop the run: a file whose name table cannot be built, or
/// that is not in the graph at all, yields a translation holding only that
/// diagnostic.
pub fn translate_files(
    graph: &FidlFileGraph,
    crate_map: &CrateMap,
    options: &GenOptions,
) -> Vec<FileTranslation> {
    let requested: BTreeSet<&str> = if options.files.is_empty() {
        graph.files.keys().map(String::as_str).collect()
    } else {
        options.files.iter().map(String::as_str).collect()
    };

    let mut translations = Vec::with_capacity(requested.len());
    for file_name in requested {
        let Some(file) = graph.file(file_name) else {
            translations.push(failed(
                file_name,
                GenError::UnknownSourceFile {
                    file: file_name.to_string(),
                },
            ));
            continue;
        };

        match Context::new(graph, file, crate_map, &options.src_root) {
            Ok(ctx) => {
                debug!(file = %file_name, names = ctx.names().len(), "translating");
                translations.push(translate_file(&ctx));
            }
            Err(error) => {
                let relative = relative_path(&options.src_root, file_name);
                translations.push(failed(&relative, error));
            }
        }
    }
    translations
}

/* A file that produced no IR at all */
fn failed(file: &str, error: GenError) -> FileTranslation {
    FileTranslation {
        ir: FileIr::new(file),
        diagnostics: vec![Diagnostic::new(file, "<file>", error)],
    }
}

/// Path of the IR file written for `file`: `<output_dir>/<file stem>.json`.
pub fn ir_output_path(output_dir: &Path, file: &str) -> PathBuf {
    let stem = Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.replace('/', "_"));
    output_dir.join(stem).with_extension(IR_EXTENSION)
}

/// Write one file's IR as pretty JSON and return the path written.
pub fn write_file_ir(output_dir: &Path, file_ir: &FileIr) -> std::io::Result<PathBuf> {
    let path = ir_output_path(output_dir, &file_ir.file);
    let json = file_ir_to_json(file_ir)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "wrote declaration IR");
    Ok(path)
}
