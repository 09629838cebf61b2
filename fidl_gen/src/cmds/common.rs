/* Common utilities shared between codegen and layout commands */

use anyhow::Context as _;
use fidl_gen::Diagnostic;
use fidl_gen::codegen::rust_gen::CrateMap;
use fidl_gen::loader::{load_crate_map, load_file_graph};
use fidl_types::FidlFileGraph;
use std::path::Path;

/* Load the resolved graph and the crate map */
pub fn load_inputs(
  graph_path: &Path,
  crate_map_path: &Path,
  verbose: bool,
) -> anyhow::Result<(FidlFileGraph, CrateMap)> {
  if verbose {
    println!("[~] Loading file graph from {}...", graph_path.display());
  }
  let graph = load_file_graph(graph_path).context("loading file graph")?;

  if verbose {
    println!("[~] Loading crate map from {}...", crate_map_path.display());
  }
  let crate_map = load_crate_map(crate_map_path).context("loading crate map")?;

  if verbose {
    println!(
      "[~] Loaded {} file(s), {} type(s), {} constant(s), {} crate map entr{}",
      graph.files.len(),
      graph.resolved_types.len(),
      graph.resolved_constants.len(),
      crate_map.len(),
      if crate_map.len() == 1 { "y" } else { "ies" }
    );
    for file in graph.files.keys() {
      println!("    - {}", file);
    }
    println!();
  }

  Ok((graph, crate_map))
}

/* Print every diagnostic and fail if there were any */
pub fn report_diagnostics<'a, I>(diagnostics: I) -> anyhow::Result<()>
where
  I: IntoIterator<Item = &'a Diagnostic>,
{
  let diagnostics: Vec<&Diagnostic> = diagnostics.into_iter().collect();
  if diagnostics.is_empty() {
    return Ok(());
  }

  eprintln!("\n[!] Translation failed for {} declaration(s):", diagnostics.len());
  for diagnostic in &diagnostics {
    eprintln!("  - {}", diagnostic);
  }
  anyhow::bail!("{} declaration(s) could not be translated", diagnostics.len())
}
