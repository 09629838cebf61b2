/* Per-file translation of declarations into the emitter IR */

use super::context::Context;
use super::keywords::escape_keyword;
use super::literals::format_constant_value;
use super::qualify::rust_name;
use super::size::{UNION_SIZE, struct_layout};
use super::types::format_type_to_rust;
use crate::codegen::ir::{
    ConstIr, EnumIr, EnumValueIr, FieldIr, FileIr, InterfaceIr, MethodIr, StructIr, UnionFieldIr,
    UnionIr,
};
use crate::error::{Diagnostic, GenError};
use fidl_types::{DeclarationData, FidlMethod, StructField, UserDefinedType};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// The IR of one file together with every declaration that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTranslation {
    pub ir: FileIr,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileTranslation {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/* Constants and enums nested in one interface, waiting for its IR */
#[derive(Default)]
struct InterfaceMembers {
    constants: Vec<ConstIr>,
    enums: Vec<EnumIr>,
}

/// Translate every declaration of the context's file.
///
/// Declarations are independent: one that fails is recorded as a
/// [`Diagnostic`] and left out of the IR, and the rest still translate.
/// Constants and enums nested in an interface are listed under that
/// interface; those nested in a struct stay at file level.
pub fn translate_file(ctx: &Context<'_>) -> FileTranslation {
    let file = ctx.current_relative_path();
    let declared = &ctx.file.declared_objects;
    let mut out = FileTranslation {
        ir: FileIr::new(file.clone()),
        diagnostics: Vec::new(),
    };
    let mut members: IndexMap<String, InterfaceMembers> = IndexMap::new();

    let constant_keys = declared
        .top_level_constants
        .iter()
        .chain(&declared.embedded_constants);
    for key in constant_keys {
        if let Some(ir) = record(&mut out.diagnostics, &file, key, || constant_ir(key, ctx)) {
            let container = ctx
                .resolve_constant(key)
                .ok()
                .and_then(|constant| interface_container(&constant.decl_data, ctx));
            match container {
                Some(interface) => members.entry(interface).or_default().constants.push(ir),
                None => out.ir.constants.push(ir),
            }
        }
    }

    let enum_keys = declared.top_level_enums.iter().chain(&declared.embedded_enums);
    for key in enum_keys {
        if let Some(ir) = record(&mut out.diagnostics, &file, key, || enum_ir(key, ctx)) {
            let container = ctx
                .resolve_type(key)
                .ok()
                .and_then(|ty| interface_container(ty.decl_data(), ctx));
            match container {
                Some(interface) => members.entry(interface).or_default().enums.push(ir),
                None => out.ir.enums.push(ir),
            }
        }
    }

    for key in &declared.structs {
        if let Some(ir) = record(&mut out.diagnostics, &file, key, || top_level_struct_ir(key, ctx)) {
            out.ir.structs.push(ir);
        }
    }

    for key in &declared.unions {
        if let Some(ir) = record(&mut out.diagnostics, &file, key, || union_ir(key, ctx)) {
            out.ir.unions.push(ir);
        }
    }

    for key in &declared.interfaces {
        let nested = members.shift_remove(key).unwrap_or_default();
        if let Some(mut ir) = record(&mut out.diagnostics, &file, key, || interface_ir(key, ctx)) {
            ir.constants = nested.constants;
            ir.enums = nested.enums;
            out.ir.interfaces.push(ir);
        }
    }

    /* Interfaces this file does not declare keep their members at file level */
    for (_, nested) in members {
        out.ir.constants.extend(nested.constants);
        out.ir.enums.extend(nested.enums);
    }

    debug!(
        file = %file,
        declarations = out.ir.declaration_count(),
        failures = out.diagnostics.len(),
        "translated file"
    );
    out
}

/* Key of the interface a declaration is nested in, if its container is one */
fn interface_container(decl: &DeclarationData, ctx: &Context<'_>) -> Option<String> {
    let container = decl.container_type_key.as_ref()?;
    match ctx.resolve_type(container) {
        Ok(UserDefinedType::Interface(_)) => Some(container.clone()),
        _ => None,
    }
}

/* Run one declaration's translation, turning a failure into a diagnostic */
fn record<T>(
    diagnostics: &mut Vec<Diagnostic>,
    file: &str,
    key: &str,
    translate: impl FnOnce() -> Result<T, (String, GenError)>,
) -> Option<T> {
    match translate() {
        Ok(ir) => Some(ir),
        Err((declaration, error)) => {
            let declaration = if declaration.is_empty() {
                key.to_string()
            } else {
                declaration
            };
            let diagnostic = Diagnostic::new(file, declaration, error);
            warn!("{}", diagnostic);
            diagnostics.push(diagnostic);
            None
        }
    }
}

/* Errors carry the short name of the declaration they belong to; an empty
 * name means the key itself did not resolve */
type DeclResult<T> = Result<T, (String, GenError)>;

fn unresolved(error: GenError) -> (String, GenError) {
    (String::new(), error)
}

fn constant_ir(key: &str, ctx: &Context<'_>) -> DeclResult<ConstIr> {
    let constant = ctx.resolve_constant(key).map_err(unresolved)?;
    let short_name = &constant.decl_data.short_name;
    let in_decl = |error| (short_name.clone(), error);

    Ok(ConstIr {
        name: rust_name(&constant.decl_data, ctx).map_err(in_decl)?,
        rust_type: format_type_to_rust(&constant.constant_type, ctx)
            .map_err(in_decl)?
            .to_string(),
        value: format_constant_value(&constant.value, &constant.constant_type, ctx)
            .map_err(in_decl)?,
    })
}

fn enum_ir(key: &str, ctx: &Context<'_>) -> DeclResult<EnumIr> {
    let UserDefinedType::Enum(fidl_enum) = ctx.resolve_type(key).map_err(unresolved)? else {
        return Err(unresolved(GenError::UnknownUserDefinedType {
            key: key.to_string(),
        }));
    };
    let name = rust_name(&fidl_enum.decl_data, ctx)
        .map_err(|error| (fidl_enum.decl_data.short_name.clone(), error))?;

    Ok(EnumIr {
        name,
        values: fidl_enum
            .values
            .iter()
            .map(|value| EnumValueIr {
                name: escape_keyword(&value.decl_data.short_name),
                value: value.int_value,
            })
            .collect(),
    })
}

fn top_level_struct_ir(key: &str, ctx: &Context<'_>) -> DeclResult<StructIr> {
    let UserDefinedType::Struct(fidl_struct) = ctx.resolve_type(key).map_err(unresolved)? else {
        return Err(unresolved(GenError::UnknownUserDefinedType {
            key: key.to_string(),
        }));
    };
    let in_decl = |error| (fidl_struct.decl_data.short_name.clone(), error);
    let name = rust_name(&fidl_struct.decl_data, ctx).map_err(in_decl)?;
    struct_ir(name, &fidl_struct.fields, ctx).map_err(in_decl)
}

/// IR for a struct body: the named struct's fields with their encoded offsets.
pub fn struct_ir(
    name: String,
    fields: &[StructField],
    ctx: &Context<'_>,
) -> Result<StructIr, GenError> {
    let layout = struct_layout(fields.iter().map(|field| &field.field_type), ctx)?;

    let mut field_irs = Vec::with_capacity(fields.len());
    for (field, placement) in fields.iter().zip(&layout.fields) {
        let default = field
            .default_value
            .as_ref()
            .map(|value| format_constant_value(value, &field.field_type, ctx))
            .transpose()?;
        field_irs.push(FieldIr {
            name: escape_keyword(&field.decl_data.short_name),
            rust_type: format_type_to_rust(&field.field_type, ctx)?.to_string(),
            offset: placement.offset,
            size: placement.size,
            bit: placement.bit,
            default,
        });
    }

    Ok(StructIr {
        name,
        size: layout.size,
        fields: field_irs,
    })
}

fn union_ir(key: &str, ctx: &Context<'_>) -> DeclResult<UnionIr> {
    let UserDefinedType::Union(fidl_union) = ctx.resolve_type(key).map_err(unresolved)? else {
        return Err(unresolved(GenError::UnknownUserDefinedType {
            key: key.to_string(),
        }));
    };
    let in_decl = |error| (fidl_union.decl_data.short_name.clone(), error);
    let name = rust_name(&fidl_union.decl_data, ctx).map_err(in_decl)?;

    let mut fields = Vec::with_capacity(fidl_union.fields.len());
    for field in &fidl_union.fields {
        fields.push(UnionFieldIr {
            name: escape_keyword(&field.decl_data.short_name),
            rust_type: format_type_to_rust(&field.field_type, ctx)
                .map_err(in_decl)?
                .to_string(),
            tag: field.tag,
        });
    }

    Ok(UnionIr {
        name,
        size: UNION_SIZE,
        fields,
    })
}

fn interface_ir(key: &str, ctx: &Context<'_>) -> DeclResult<InterfaceIr> {
    let UserDefinedType::Interface(interface) = ctx.resolve_type(key).map_err(unresolved)? else {
        return Err(unresolved(GenError::UnknownUserDefinedType {
            key: key.to_string(),
        }));
    };
    let in_decl = |error| (interface.decl_data.short_name.clone(), error);
    let name = rust_name(&interface.decl_data, ctx).map_err(in_decl)?;

    let mut methods = Vec::with_capacity(interface.methods.len());
    for method in &interface.methods {
        let method_ir = method_ir(method, ctx).map_err(|error| {
            (
                format!(
                    "{}.{}",
                    interface.decl_data.short_name, method.decl_data.short_name
                ),
                error,
            )
        })?;
        methods.push(method_ir);
    }

    Ok(InterfaceIr {
        name,
        service_name: interface.service_name.clone(),
        version: interface.version,
        constants: Vec::new(),
        enums: Vec::new(),
        methods,
    })
}

fn method_ir(method: &FidlMethod, ctx: &Context<'_>) -> Result<MethodIr, GenError> {
    let method_name = &method.decl_data.short_name;
    let names = ctx.names();

    let request_name = names
        .request_name(method_name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}_Request", method_name));
    let request = struct_ir(request_name, &method.parameters.fields, ctx)?;

    let response = match &method.response_parameters {
        Some(parameters) => {
            let response_name = names
                .response_name(method_name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{}_Response", method_name));
            Some(struct_ir(response_name, &parameters.fields, ctx)?)
        }
        None => None,
    };

    Ok(MethodIr {
        name: escape_keyword(method_name),
        ordinal: method.ordinal,
        request,
        response,
    })
}
