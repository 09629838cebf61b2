/* Rust expressions for constant values */

use super::context::Context;
use super::keywords::escape_keyword;
use super::qualify::rust_name;
use crate::error::GenError;
use fidl_types::{BuiltinConstant, ConstantValue, LiteralValue, Type, UserDefinedType};

/// Rust spelling of a literal.
///
/// Floats use the shortest representation that round-trips, which may lack a
/// decimal point; pass the result through [`floatify`] when the target type
/// is floating point.
pub fn format_literal(literal: &LiteralValue) -> String {
    match literal {
        LiteralValue::Bool(value) => value.to_string(),
        LiteralValue::Float(value) => value.to_string(),
        LiteralValue::Double(value) => value.to_string(),
        LiteralValue::Int8(value) => value.to_string(),
        LiteralValue::Int16(value) => value.to_string(),
        LiteralValue::Int32(value) => value.to_string(),
        LiteralValue::Int64(value) => value.to_string(),
        LiteralValue::Uint8(value) => value.to_string(),
        LiteralValue::Uint16(value) => value.to_string(),
        LiteralValue::Uint32(value) => value.to_string(),
        LiteralValue::Uint64(value) => value.to_string(),
        LiteralValue::String(value) => format!("\"{}\"", value.escape_default()),
    }
}

/// Append `.0` to text that is made up only of `-` and digits, so it parses as
/// a float literal.
pub fn floatify(text: &str) -> String {
    let integral = !text.is_empty() && text.chars().all(|c| c == '-' || c.is_ascii_digit());
    if integral {
        format!("{}.0", text)
    } else {
        text.to_string()
    }
}

pub fn builtin_constant(builtin: BuiltinConstant) -> &'static str {
    match builtin {
        BuiltinConstant::FloatInfinity => "::std::f32::INFINITY",
        BuiltinConstant::FloatNegativeInfinity => "::std::f32::NEG_INFINITY",
        BuiltinConstant::FloatNan => "::std::f32::NAN",
        BuiltinConstant::DoubleInfinity => "::std::f64::INFINITY",
        BuiltinConstant::DoubleNegativeInfinity => "::std::f64::NEG_INFINITY",
        BuiltinConstant::DoubleNan => "::std::f64::NAN",
    }
}

/// Rust expression for a constant value assigned to a slot of type `ty`.
pub fn format_constant_value(
    value: &ConstantValue,
    ty: &Type,
    ctx: &Context<'_>,
) -> Result<String, GenError> {
    match value {
        ConstantValue::Literal(literal) => {
            let text = format_literal(literal);
            match ty {
                Type::Simple(simple) if simple.is_floating_point() => Ok(floatify(&text)),
                _ => Ok(text),
            }
        }
        ConstantValue::Builtin(builtin) => Ok(builtin_constant(*builtin).to_string()),
        ConstantValue::ConstantReference { constant_key } => {
            let constant = ctx.resolve_constant(constant_key)?;
            rust_name(&constant.decl_data, ctx)
        }
        ConstantValue::EnumValueReference {
            enum_type_key,
            enum_value_index,
        } => {
            let UserDefinedType::Enum(fidl_enum) = ctx.resolve_type(enum_type_key)? else {
                return Err(GenError::UnknownUserDefinedType {
                    key: enum_type_key.clone(),
                });
            };
            let value = fidl_enum.values.get(*enum_value_index).ok_or_else(|| {
                GenError::UnknownEnumValue {
                    key: enum_type_key.clone(),
                    index: *enum_value_index,
                }
            })?;
            Ok(format!(
                "{}::{}",
                rust_name(&fidl_enum.decl_data, ctx)?,
                escape_keyword(&value.decl_data.short_name)
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floatify_suffixes_integral_text() {
        assert_eq!(floatify("5"), "5.0");
        assert_eq!(floatify("-3"), "-3.0");
        assert_eq!(floatify("0"), "0.0");
    }

    #[test]
    fn floatify_leaves_floats_alone() {
        assert_eq!(floatify("5.5"), "5.5");
        assert_eq!(floatify("1e+21"), "1e+21");
        assert_eq!(floatify("inf"), "inf");
        assert_eq!(floatify(""), "");
    }

    #[test]
    fn literals_use_rust_spelling() {
        assert_eq!(format_literal(&LiteralValue::Bool(true)), "true");
        assert_eq!(format_literal(&LiteralValue::Int8(-128)), "-128");
        assert_eq!(format_literal(&LiteralValue::Uint64(u64::MAX)), "18446744073709551615");
        assert_eq!(format_literal(&LiteralValue::Double(0.1)), "0.1");
        assert_eq!(format_literal(&LiteralValue::Float(2.0)), "2");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(format_literal(&LiteralValue::String("hi".into())), "\"hi\"");
        assert_eq!(
            format_literal(&LiteralValue::String("say \"x\"\n".into())),
            "\"say \\\"x\\\"\\n\""
        );
    }

    #[test]
    fn builtins_map_to_std_constants() {
        assert_eq!(
            builtin_constant(BuiltinConstant::DoubleNegativeInfinity),
            "::std::f64::NEG_INFINITY"
        );
        assert_eq!(builtin_constant(BuiltinConstant::FloatNan), "::std::f32::NAN");
        assert_eq!(builtin_constant(BuiltinConstant::FloatInfinity), "::std::f32::INFINITY");
    }
}
