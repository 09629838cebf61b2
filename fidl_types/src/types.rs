use crate::literal::ConstantValue;
use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SimpleType {
    Bool,
    Double,
    Float,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl SimpleType {
    pub fn is_floating_point(self) -> bool {
        matches!(self, SimpleType::Float | SimpleType::Double)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HandleKind {
    Unspecified,
    Channel,
    Vmo,
    Process,
    Thread,
    Event,
    Port,
    Job,
    Socket,
    EventPair,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ArrayType {
    pub element_type: Box<Type>,
    /// Negative for dynamically sized arrays.
    #[serde(default = "ArrayType::dynamic_length")]
    pub fixed_length: i32,
    #[serde(default)]
    pub nullable: bool,
}

impl ArrayType {
    fn dynamic_length() -> i32 {
        -1
    }

    pub fn is_dynamic(&self) -> bool {
        self.fixed_length < 0
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MapType {
    pub key_type: Box<Type>,
    pub value_type: Box<Type>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct StringType {
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct HandleType {
    pub kind: HandleKind,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeReference {
    /// Key into `FidlFileGraph::resolved_types`.
    pub type_key: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_interface_request: bool,
}

/// A type node as it appears on a field, parameter or constant.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum Type {
    Simple(SimpleType),
    Array(ArrayType),
    Map(MapType),
    String(StringType),
    Handle(HandleType),
    Reference(TypeReference),
}

impl Type {
    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Simple(SimpleType::Bool))
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Type::Simple(_) => false,
            Type::Array(array) => array.nullable,
            Type::Map(map) => map.nullable,
            Type::String(string) => string.nullable,
            Type::Handle(handle) => handle.nullable,
            Type::Reference(reference) => reference.nullable,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeclarationData {
    pub short_name: String,
    /// Dotted identifier including the module namespace, e.g. `echo.Echo.Mode`.
    #[serde(default)]
    pub full_identifier: Option<String>,
    /// Path of the schema file that declared this entity.
    #[serde(default)]
    pub source_file: Option<String>,
    /// Set when the declaration is nested inside a struct or interface.
    #[serde(default)]
    pub container_type_key: Option<String>,
}

impl DeclarationData {
    pub fn new(short_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            full_identifier: None,
            source_file: None,
            container_type_key: None,
        }
    }

    pub fn declared_in(
        short_name: impl Into<String>,
        full_identifier: impl Into<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self {
            short_name: short_name.into(),
            full_identifier: Some(full_identifier.into()),
            source_file: Some(source_file.into()),
            container_type_key: None,
        }
    }

    pub fn nested_in(mut self, container_type_key: impl Into<String>) -> Self {
        self.container_type_key = Some(container_type_key.into());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct StructField {
    pub decl_data: DeclarationData,
    pub field_type: Type,
    #[serde(default)]
    pub default_value: Option<ConstantValue>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlStruct {
    pub decl_data: DeclarationData,
    #[serde(default)]
    pub fields: Vec<StructField>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct EnumValue {
    pub decl_data: DeclarationData,
    pub int_value: i32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlEnum {
    pub decl_data: DeclarationData,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct UnionField {
    pub decl_data: DeclarationData,
    pub field_type: Type,
    pub tag: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlUnion {
    pub decl_data: DeclarationData,
    #[serde(default)]
    pub fields: Vec<UnionField>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlMethod {
    pub decl_data: DeclarationData,
    pub ordinal: u32,
    pub parameters: FidlStruct,
    /// `None` for one-way messages.
    #[serde(default)]
    pub response_parameters: Option<FidlStruct>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlInterface {
    pub decl_data: DeclarationData,
    #[serde(default)]
    pub service_name: Option<String>,
    /// Protocol version advertised by generated proxies and stubs.
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub methods: Vec<FidlMethod>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum UserDefinedType {
    Struct(FidlStruct),
    Enum(FidlEnum),
    Union(FidlUnion),
    Interface(FidlInterface),
}

impl UserDefinedType {
    pub fn decl_data(&self) -> &DeclarationData {
        match self {
            UserDefinedType::Struct(s) => &s.decl_data,
            UserDefinedType::Enum(e) => &e.decl_data,
            UserDefinedType::Union(u) => &u.decl_data,
            UserDefinedType::Interface(i) => &i.decl_data,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            UserDefinedType::Struct(_) => "struct",
            UserDefinedType::Enum(_) => "enum",
            UserDefinedType::Union(_) => "union",
            UserDefinedType::Interface(_) => "interface",
        }
    }
}
