use crate::literal::DeclaredConstant;
use crate::types::UserDefinedType;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Keys of everything one schema file declares, grouped by kind.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct DeclaredObjects {
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub structs: Vec<String>,
    #[serde(default)]
    pub unions: Vec<String>,
    #[serde(default)]
    pub top_level_enums: Vec<String>,
    #[serde(default)]
    pub embedded_enums: Vec<String>,
    #[serde(default)]
    pub top_level_constants: Vec<String>,
    #[serde(default)]
    pub embedded_constants: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct FidlFile {
    pub file_name: String,
    /// Dotted module namespace, e.g. `echo.svc`.
    #[serde(default)]
    pub module_namespace: Option<String>,
    #[serde(default)]
    pub declared_objects: DeclaredObjects,
}

impl FidlFile {
    pub fn new(file_name: impl Into<String>, module_namespace: Option<&str>) -> Self {
        Self {
            file_name: file_name.into(),
            module_namespace: module_namespace.map(str::to_string),
            declared_objects: DeclaredObjects::default(),
        }
    }
}

/// The front-end's fully linked view of every schema file in a build.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct FidlFileGraph {
    #[serde(default)]
    pub files: BTreeMap<String, FidlFile>,
    #[serde(default, with = "serde_yml::with::singleton_map_recursive")]
    pub resolved_types: BTreeMap<String, UserDefinedType>,
    #[serde(default, with = "serde_yml::with::singleton_map_recursive")]
    pub resolved_constants: BTreeMap<String, DeclaredConstant>,
}

impl FidlFileGraph {
    pub fn file(&self, file_name: &str) -> Option<&FidlFile> {
        self.files.get(file_name)
    }

    pub fn resolved_type(&self, type_key: &str) -> Option<&UserDefinedType> {
        self.resolved_types.get(type_key)
    }

    pub fn resolved_constant(&self, constant_key: &str) -> Option<&DeclaredConstant> {
        self.resolved_constants.get(constant_key)
    }
}
