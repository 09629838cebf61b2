pub mod context;
pub mod keywords;
pub mod literals;
pub mod names;
pub mod qualify;
pub mod size;
pub mod translate;
pub mod types;

/* Re-export main public functions */
pub use context::{Context, CrateMap};
pub use keywords::escape_keyword;
pub use literals::{builtin_constant, floatify, format_constant_value, format_literal};
pub use names::NameTable;
pub use qualify::rust_name;
pub use size::{StructLayout, align_to, needs_boxing, struct_layout, wire_alignment, wire_size};
pub use translate::{FileTranslation, translate_file};
pub use types::{RustType, format_type_to_rust};
