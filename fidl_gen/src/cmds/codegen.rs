/* Codegen command - translate schema files into declaration IR */

use super::common::{load_inputs, report_diagnostics};
use fidl_gen::codegen::{GenOptions, translate_files, write_file_ir};
use std::path::PathBuf;

/* Execute the codegen command */
pub fn run(
  graph_path: PathBuf,
  crate_map_path: PathBuf,
  src_root: PathBuf,
  output_dir: PathBuf,
  files: Vec<String>,
  verbose: bool,
) -> anyhow::Result<()> {
  if verbose {
    println!("FIDL Generator - Rust Declaration IR");
    println!("====================================\n");
    println!("[~] Configuration:");
    println!("  Source root: {}", src_root.display());
    println!("  Output directory: {}", output_dir.display());
    if files.is_empty() {
      println!("  Input files: all");
    } else {
      println!("  Input files: {}", files.len());
      for file in &files {
        println!("    - {}", file);
      }
    }
    println!();
  }

  let (graph, crate_map) = load_inputs(&graph_path, &crate_map_path, verbose)?;

  let options = GenOptions { src_root, files };
  let translations = translate_files(&graph, &crate_map, &options);

  /* Create output directory */
  std::fs::create_dir_all(&output_dir)?;

  for translation in &translations {
    let written = write_file_ir(&output_dir, &translation.ir)?;
    if verbose {
      println!(
        "[~] {} -> {} ({} declaration(s), {} failure(s))",
        translation.ir.file,
        written.display(),
        translation.ir.declaration_count(),
        translation.diagnostics.len()
      );
    }
  }

  report_diagnostics(translations.iter().flat_map(|t| &t.diagnostics))?;

  if verbose {
    println!("\n[✓] Generated IR for {} file(s) in {}", translations.len(), output_dir.display());
  }
  Ok(())
}
