/* Layout command - print the wire layout of one struct */

use super::common::load_inputs;
use anyhow::{Context as _, bail};
use fidl_gen::codegen::rust_gen::{Context, format_type_to_rust, rust_name, struct_layout};
use fidl_types::UserDefinedType;
use std::path::PathBuf;

/* Execute the layout command */
pub fn run(
  graph_path: PathBuf,
  crate_map_path: PathBuf,
  src_root: PathBuf,
  type_key: String,
  verbose: bool,
) -> anyhow::Result<()> {
  let (graph, crate_map) = load_inputs(&graph_path, &crate_map_path, verbose)?;

  let Some(resolved) = graph.resolved_type(&type_key) else {
    bail!("type key '{}' is not in the file graph", type_key);
  };
  let UserDefinedType::Struct(fidl_struct) = resolved else {
    bail!("type key '{}' is a {}, not a struct", type_key, resolved.kind_name());
  };

  /* The struct is translated from the point of view of the file declaring it */
  let Some(file) = graph
    .files
    .values()
    .find(|file| file.declared_objects.structs.contains(&type_key))
  else {
    bail!("no file in the graph declares '{}'", type_key);
  };

  let ctx = Context::new(&graph, file, &crate_map, &src_root)
    .with_context(|| format!("building name table for {}", file.file_name))?;
  let name = rust_name(&fidl_struct.decl_data, &ctx)?;
  let layout = struct_layout(fidl_struct.fields.iter().map(|f| &f.field_type), &ctx)?;

  println!("struct {} ({} bytes)", name, layout.size);
  println!("  {:>6}  {:>6}  {:<20}  {}", "offset", "size", "field", "type");
  for (field, placement) in fidl_struct.fields.iter().zip(&layout.fields) {
    let size = match (placement.size, placement.bit) {
      (Some(size), _) => size.to_string(),
      (None, Some(bit)) => format!("bit {}", bit),
      (None, None) => "-".to_string(),
    };
    println!(
      "  {:>6}  {:>6}  {:<20}  {}",
      placement.offset,
      size,
      field.decl_data.short_name,
      format_type_to_rust(&field.field_type, &ctx)?
    );
  }

  Ok(())
}
