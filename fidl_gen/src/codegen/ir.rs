//! Declaration IR handed to the source emitter.
//!
//! One [`FileIr`] describes everything generated for a single schema file:
//! identifiers already escaped and qualified, Rust type expressions, wire
//! sizes and field offsets, and literal expressions for constants and field
//! defaults. The emitter renders text from it without consulting the graph.
//!
//! # Example
//! ```
//! use fidl_gen::codegen::ir::*;
//!
//! let file = FileIr {
//!     version: IR_SCHEMA_VERSION,
//!     file: "echo/echo.fidl".into(),
//!     constants: vec![ConstIr {
//!         name: "MAX".into(),
//!         rust_type: "u32".into(),
//!         value: "8".into(),
//!     }],
//!     ..FileIr::default()
//! };
//!
//! let json = serde_json::to_value(&file).unwrap();
//! assert_eq!(json["constants"][0]["value"], "8");
//! ```

use serde_derive::Serialize;

/// Schema version written into every serialized [`FileIr`].
pub const IR_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileIr {
    /// IR schema version (mirrors `IR_SCHEMA_VERSION`).
    pub version: u32,
    /// Schema file path relative to the source root.
    pub file: String,
    pub constants: Vec<ConstIr>,
    pub enums: Vec<EnumIr>,
    pub structs: Vec<StructIr>,
    pub unions: Vec<UnionIr>,
    pub interfaces: Vec<InterfaceIr>,
}

impl FileIr {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            version: IR_SCHEMA_VERSION,
            file: file.into(),
            ..Self::default()
        }
    }

    pub fn declaration_count(&self) -> usize {
        self.constants.len()
            + self.enums.len()
            + self.structs.len()
            + self.unions.len()
            + self
                .interfaces
                .iter()
                .map(|i| 1 + i.constants.len() + i.enums.len())
                .sum::<usize>()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstIr {
    pub name: String,
    pub rust_type: String,
    /// Rust expression for the value.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumIr {
    pub name: String,
    pub values: Vec<EnumValueIr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValueIr {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructIr {
    pub name: String,
    /// Encoded size in bytes, header included.
    pub size: u32,
    pub fields: Vec<FieldIr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIr {
    pub name: String,
    pub rust_type: String,
    /// Byte offset from the start of the encoded struct.
    pub offset: u32,
    /// Inline size in bytes. Absent for bools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Bit index within the byte at `offset`. Only set for bools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit: Option<u8>,
    /// Rust expression for the field's default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionIr {
    pub name: String,
    pub size: u32,
    pub fields: Vec<UnionFieldIr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnionFieldIr {
    pub name: String,
    pub rust_type: String,
    pub tag: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceIr {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Protocol version advertised by proxies and stubs.
    pub version: u32,
    /// Constants and enums declared inside the interface body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constants: Vec<ConstIr>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub enums: Vec<EnumIr>,
    pub methods: Vec<MethodIr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodIr {
    pub name: String,
    pub ordinal: u32,
    /// Request message, named `<method>_Request`.
    pub request: StructIr,
    /// Response message, named `<method>_Response`. Absent for one-way methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<StructIr>,
}

/// Serialize a file's IR into pretty JSON.
pub fn file_ir_to_json(file_ir: &FileIr) -> serde_json::Result<String> {
    serde_json::to_string_pretty(file_ir)
}
