/* Resolution of declaration names to (possibly module-qualified) Rust paths */

use super::context::Context;
use super::keywords::escape_keyword;
use crate::error::GenError;
use fidl_types::DeclarationData;
use tracing::debug;

/// Rust path for a declaration, as seen from the current file.
///
/// Declarations from the current file resolve to a bare name. Declarations
/// from other files are prefixed with the module the crate map assigns to
/// their source file; a file missing from the map is an
/// [`GenError::UnresolvedDependency`].
pub fn rust_name(decl: &DeclarationData, ctx: &Context<'_>) -> Result<String, GenError> {
    /* Might not have a full identifier; use the short name instead */
    let Some(full_identifier) = decl.full_identifier.as_deref() else {
        return Ok(escape_keyword(&ctx.names().resolve(&decl.short_name)));
    };

    let source_file = decl
        .source_file
        .as_deref()
        .unwrap_or(ctx.file.file_name.as_str());

    if ctx.is_current_file(source_file) {
        let name = ctx
            .names()
            .resolve_identifier(ctx.file.module_namespace.as_deref(), full_identifier);
        return Ok(escape_keyword(&name));
    }

    let dependency = ctx
        .graph
        .file(source_file)
        .ok_or_else(|| GenError::UnknownSourceFile {
            file: source_file.to_string(),
        })?;
    let names = ctx.names_for(dependency)?;
    let name = escape_keyword(
        &names.resolve_identifier(dependency.module_namespace.as_deref(), full_identifier),
    );

    let relative = ctx.relative_path(source_file);
    let Some(module) = ctx.crate_map.module_for(&relative) else {
        return Err(GenError::UnresolvedDependency {
            file: ctx.current_relative_path(),
            dependency: relative,
        });
    };

    debug!(name = %name, module = %module, "qualified cross-file reference");
    if module.is_empty() {
        Ok(format!("::{}", name))
    } else {
        Ok(format!("::{}::{}", module, name))
    }
}
