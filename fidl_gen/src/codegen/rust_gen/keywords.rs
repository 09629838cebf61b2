/* Reserved identifier handling for generated Rust names */

use crate::error::GenError;

/* Identifiers a generated name must never be */
const RESERVED_IDENTIFIERS: &[&str] = &[
    "as", "box", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn",
    "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe",
    "use", "where", "while", "async", "await", "dyn",
    /* Reserved for future use */
    "abstract", "alignof", "become", "do", "final", "macro", "offsetof", "override", "priv",
    "proc", "pure", "sizeof", "typeof", "unsized", "virtual", "yield", "try", "gen",
    /* Not keywords, but shadowing them in generated code would be very unpleasant */
    "Ok", "Err", "Vec", "Option", "Some", "None", "Box",
];

const ESCAPE_SUFFIX: char = '_';

pub fn is_reserved(name: &str) -> bool {
    RESERVED_IDENTIFIERS.contains(&name)
}

/* Escape a name so it can never collide with a reserved identifier.
 *
 * Reserved words gain a trailing underscore. Names that already look like an
 * escaped reserved word (`type_`, `type__`) gain one as well, which keeps the
 * mapping injective. */
pub fn escape_keyword(name: &str) -> String {
    let stem = name.trim_end_matches(ESCAPE_SUFFIX);
    if !stem.is_empty() && is_reserved(stem) {
        format!("{}{}", name, ESCAPE_SUFFIX)
    } else {
        name.to_string()
    }
}

/* Check a synthesized name that bypasses escaping */
pub fn assert_not_reserved(name: &str) -> Result<&str, GenError> {
    if is_reserved(name) {
        return Err(GenError::ReservedKeywordCollision {
            name: name.to_string(),
        });
    }
    Ok(name)
}
