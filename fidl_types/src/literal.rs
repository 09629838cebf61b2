use crate::types::{DeclarationData, Type};
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralValue {
    Bool(bool),
    Float(f32),
    Double(f64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    String(String),
}

/// Special floating point values that have no literal spelling.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinConstant {
    DoubleInfinity,
    DoubleNegativeInfinity,
    DoubleNan,
    FloatInfinity,
    FloatNegativeInfinity,
    FloatNan,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum ConstantValue {
    Literal(LiteralValue),
    Builtin(BuiltinConstant),
    /// Refers to another declared constant by its graph key.
    #[serde(rename_all = "kebab-case")]
    ConstantReference { constant_key: String },
    /// Refers to the `enum_value_index`-th value of an enum.
    #[serde(rename_all = "kebab-case")]
    EnumValueReference {
        enum_type_key: String,
        enum_value_index: usize,
    },
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeclaredConstant {
    pub decl_data: DeclarationData,
    pub constant_type: Type,
    pub value: ConstantValue,
}
