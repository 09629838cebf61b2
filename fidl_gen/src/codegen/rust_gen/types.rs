/* Translation of FIDL type nodes into Rust type expressions */

use super::context::Context;
use super::qualify::rust_name;
use super::size::needs_boxing;
use crate::error::GenError;
use fidl_types::{ArrayType, HandleKind, SimpleType, Type, UserDefinedType};
use serde::{Serialize, Serializer};
use std::fmt;

/* Rust can't be generic over array length, so length-checked arrays stop here */
pub const MAX_FIXED_ARRAY_LENGTH: i32 = 32;

/// A Rust type expression.
///
/// Optionality and boxing are flags rather than text so wrapping a type in
/// `Option` twice is impossible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustType {
    base: String,
    optional: bool,
    boxed: bool,
}

impl RustType {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            optional: false,
            boxed: false,
        }
    }

    /// `Option<T>`.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// `Option<Box<T>>`.
    pub fn optional_boxed(mut self) -> Self {
        self.optional = true;
        self.boxed = true;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_boxed(&self) -> bool {
        self.boxed
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.optional, self.boxed) {
            (true, true) => write!(f, "Option<Box<{}>>", self.base),
            (true, false) => write!(f, "Option<{}>", self.base),
            (false, true) => write!(f, "Box<{}>", self.base),
            (false, false) => f.write_str(&self.base),
        }
    }
}

impl Serialize for RustType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Translate a FIDL type node into the Rust type used for it in generated code.
pub fn format_type_to_rust(ty: &Type, ctx: &Context<'_>) -> Result<RustType, GenError> {
    let translated = match ty {
        Type::Simple(simple) => RustType::new(simple_type_to_rust(*simple)),
        Type::Array(array_type) => RustType::new(array_to_rust(array_type, ctx)?),
        Type::Map(map_type) => RustType::new(format!(
            "::std::collections::HashMap<{}, {}>",
            format_type_to_rust(&map_type.key_type, ctx)?,
            format_type_to_rust(&map_type.value_type, ctx)?
        )),
        Type::String(_) => RustType::new("String"),
        Type::Handle(handle) => RustType::new(handle_kind_to_rust(handle.kind)),
        Type::Reference(reference) => {
            let resolved = ctx.resolve_type(&reference.type_key)?;
            let rust = RustType::new(user_defined_type_to_rust(
                resolved,
                ctx,
                reference.is_interface_request,
            )?);
            if !reference.nullable {
                return Ok(rust);
            }
            return Ok(if needs_boxing(resolved) {
                rust.optional_boxed()
            } else {
                rust.optional()
            });
        }
    };

    if ty.is_nullable() {
        Ok(translated.optional())
    } else {
        Ok(translated)
    }
}

fn array_to_rust(array_type: &ArrayType, ctx: &Context<'_>) -> Result<String, GenError> {
    let element = format_type_to_rust(&array_type.element_type, ctx)?;
    match array_type.fixed_length {
        length if length < 0 => Ok(format!("Vec<{}>", element)),
        length if length <= MAX_FIXED_ARRAY_LENGTH => Ok(format!("[{}; {}]", element, length)),
        length => Err(GenError::UnsupportedArrayLength { length }),
    }
}

/// Rust type for a resolved user-defined type.
///
/// Interfaces become channel endpoints: a server end for interface requests,
/// a client pointer otherwise.
pub fn user_defined_type_to_rust(
    user_type: &UserDefinedType,
    ctx: &Context<'_>,
    interface_request: bool,
) -> Result<String, GenError> {
    match user_type {
        UserDefinedType::Struct(s) => rust_name(&s.decl_data, ctx),
        UserDefinedType::Enum(e) => rust_name(&e.decl_data, ctx),
        UserDefinedType::Union(u) => rust_name(&u.decl_data, ctx),
        UserDefinedType::Interface(interface) => {
            let name = rust_name(&interface.decl_data, ctx)?;
            if interface_request {
                Ok(format!("::fidl::ServerEnd<{}::Marker>", name))
            } else {
                Ok(format!(
                    "::fidl::InterfacePtr<::fidl::ClientEnd<{}::Marker>>",
                    name
                ))
            }
        }
    }
}

pub fn simple_type_to_rust(simple: SimpleType) -> &'static str {
    match simple {
        SimpleType::Bool => "bool",
        SimpleType::Int8 => "i8",
        SimpleType::Int16 => "i16",
        SimpleType::Int32 => "i32",
        SimpleType::Int64 => "i64",
        SimpleType::Uint8 => "u8",
        SimpleType::Uint16 => "u16",
        SimpleType::Uint32 => "u32",
        SimpleType::Uint64 => "u64",
        SimpleType::Float => "f32",
        SimpleType::Double => "f64",
    }
}

pub fn handle_kind_to_rust(kind: HandleKind) -> &'static str {
    match kind {
        HandleKind::Channel => "::magenta::Channel",
        HandleKind::Vmo => "::magenta::Vmo",
        HandleKind::Process => "::magenta::Process",
        HandleKind::Thread => "::magenta::Thread",
        HandleKind::Event => "::magenta::Event",
        HandleKind::Port => "::magenta::Port",
        HandleKind::Job => "::magenta::Job",
        HandleKind::Socket => "::magenta::Socket",
        HandleKind::EventPair => "::magenta::EventPair",
        HandleKind::Unspecified => "::magenta::Handle",
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
