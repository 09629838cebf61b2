use thiserror::Error;

/// A recoverable failure while translating a single declaration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("fixed-size array of length {length} exceeds the supported maximum of 32")]
    UnsupportedArrayLength { length: i32 },
    #[error("unresolved dependency: {file} depends on {dependency} but it is not in the crate map")]
    UnresolvedDependency { file: String, dependency: String },
    #[error("type key '{key}' does not resolve to a user-defined type")]
    UnknownUserDefinedType { key: String },
    #[error("constant key '{key}' does not resolve to a declared constant")]
    UnknownConstant { key: String },
    #[error("enum '{key}' has no value at index {index}")]
    UnknownEnumValue { key: String, index: usize },
    #[error("declaration source file '{file}' is not part of the file graph")]
    UnknownSourceFile { file: String },
    #[error("simple type bool does not have a size in bytes")]
    BoolHasNoSize,
    #[error("generated name `{name}` is a reserved Rust keyword")]
    ReservedKeywordCollision { name: String },
    #[error("generated name `{name}` is produced by more than one declaration")]
    NameCollision { name: String },
}

/// A [`GenError`] tagged with the schema file and declaration it came from.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{file}: {declaration}: {error}")]
pub struct Diagnostic {
    /// Schema file path, relative to the source root when possible.
    pub file: String,
    pub declaration: String,
    #[source]
    pub error: GenError,
}

impl Diagnostic {
    pub fn new(file: impl Into<String>, declaration: impl Into<String>, error: GenError) -> Self {
        Self {
            file: file.into(),
            declaration: declaration.into(),
            error,
        }
    }
}
