pub mod codegen;
pub mod error;
pub mod loader;

pub use error::{Diagnostic, GenError};
