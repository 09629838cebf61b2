/* Per-file table of FIDL names to generated Rust names */

use super::keywords::assert_not_reserved;
use crate::error::GenError;
use fidl_types::{DeclarationData, FidlFile, FidlFileGraph};
use indexmap::{IndexMap, IndexSet};
use tracing::trace;

const SCOPE_SEPARATOR: char = '.';
const REQUEST_SUFFIX: &str = "_Request";
const RESPONSE_SUFFIX: &str = "_Response";

/// Maps the names declared in one schema file to the identifiers used in
/// generated code.
///
/// Top-level declarations map to themselves. Interface methods reserve their
/// request/response wrapper names under `<method>-request` and
/// `<method>-response`. Nested declarations live in their container's scope,
/// keyed by the dotted path (`Parent.Child`), and resolve to the container's
/// name concatenated with their own.
///
/// Every key and every generated name is unique within a table; a second
/// claim on either fails with [`GenError::NameCollision`].
///
/// Keyword escaping is not applied here; callers escape names when they are
/// consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: IndexMap<String, String>,
    taken: IndexSet<String>,
}

impl NameTable {
    pub fn collect(graph: &FidlFileGraph, file: &FidlFile) -> Result<Self, GenError> {
        let mut table = Self::default();
        let declared = &file.declared_objects;

        for key in &declared.top_level_constants {
            let constant = graph
                .resolved_constant(key)
                .ok_or_else(|| GenError::UnknownConstant { key: key.clone() })?;
            table.insert_top_level(&constant.decl_data.short_name)?;
        }

        let type_groups = [
            &declared.top_level_enums,
            &declared.unions,
            &declared.structs,
        ];
        for keys in type_groups {
            for key in keys {
                let decl = type_decl(graph, key)?;
                table.insert_top_level(&decl.short_name)?;
            }
        }

        for key in &declared.interfaces {
            let Some(fidl_types::UserDefinedType::Interface(interface)) = graph.resolved_type(key)
            else {
                return Err(GenError::UnknownUserDefinedType { key: key.clone() });
            };
            table.insert_top_level(&interface.decl_data.short_name)?;
            for method in &interface.methods {
                let method_name = &method.decl_data.short_name;
                table.reserve(
                    request_key(method_name),
                    format!("{}{}", method_name, REQUEST_SUFFIX),
                )?;
                table.reserve(
                    response_key(method_name),
                    format!("{}{}", method_name, RESPONSE_SUFFIX),
                )?;
            }
        }

        for key in &declared.embedded_enums {
            let decl = type_decl(graph, key)?;
            table.insert_nested(graph, decl)?;
        }
        for key in &declared.embedded_constants {
            let constant = graph
                .resolved_constant(key)
                .ok_or_else(|| GenError::UnknownConstant { key: key.clone() })?;
            table.insert_nested(graph, &constant.decl_data)?;
        }

        trace!(file = %file.file_name, names = table.len(), "collected name table");
        Ok(table)
    }

    fn insert_top_level(&mut self, short_name: &str) -> Result<(), GenError> {
        self.claim(short_name.to_string(), short_name.to_string())
    }

    fn reserve(&mut self, key: String, name: String) -> Result<(), GenError> {
        assert_not_reserved(&name)?;
        self.claim(key, name)
    }

    fn claim(&mut self, key: String, name: String) -> Result<(), GenError> {
        if self.names.contains_key(&key) || self.taken.contains(&name) {
            return Err(GenError::NameCollision { name });
        }
        self.taken.insert(name.clone());
        self.names.insert(key, name);
        Ok(())
    }

    fn insert_nested(
        &mut self,
        graph: &FidlFileGraph,
        decl: &DeclarationData,
    ) -> Result<(), GenError> {
        let path = scope_path(graph, decl)?;
        let resolved = self.resolve_path(&path);
        self.claim(path.join("."), resolved)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// Resolves a single name, falling back to the name itself when it was not
    /// declared in this file.
    pub fn resolve(&self, name: &str) -> String {
        self.get(name).unwrap_or(name).to_string()
    }

    /// Resolves a scoped name such as `["Parent", "Child"]`.
    ///
    /// The leading segment goes through the table and the remaining segments
    /// are appended unchanged, so nesting at any depth concatenates onto the
    /// outermost container's generated name.
    pub fn resolve_path<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let Some((first, rest)) = segments.split_first() else {
            return String::new();
        };
        let dotted = segments
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(".");
        if let Some(scoped) = self.get(&dotted) {
            return scoped.to_string();
        }
        let mut name = self.resolve(first.as_ref());
        for segment in rest {
            name.push_str(segment.as_ref());
        }
        name
    }

    /// Resolves a dotted identifier relative to this file's namespace.
    pub fn resolve_identifier(&self, namespace: Option<&str>, identifier: &str) -> String {
        let local = match namespace {
            Some(ns) if !ns.is_empty() => identifier
                .strip_prefix(ns)
                .and_then(|rest| rest.strip_prefix(SCOPE_SEPARATOR))
                .unwrap_or(identifier),
            _ => identifier,
        };
        let segments: Vec<&str> = local.split(SCOPE_SEPARATOR).collect();
        self.resolve_path(&segments)
    }

    pub fn request_name(&self, method_name: &str) -> Option<&str> {
        self.get(&request_key(method_name))
    }

    pub fn response_name(&self, method_name: &str) -> Option<&str> {
        self.get(&response_key(method_name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

pub fn request_key(method_name: &str) -> String {
    format!("{}-request", method_name)
}

pub fn response_key(method_name: &str) -> String {
    format!("{}-response", method_name)
}

fn type_decl<'g>(graph: &'g FidlFileGraph, key: &str) -> Result<&'g DeclarationData, GenError> {
    graph
        .resolved_type(key)
        .map(|t| t.decl_data())
        .ok_or_else(|| GenError::UnknownUserDefinedType {
            key: key.to_string(),
        })
}

/* Short names from the outermost container down to `decl` */
fn scope_path(graph: &FidlFileGraph, decl: &DeclarationData) -> Result<Vec<String>, GenError> {
    let mut path = vec![decl.short_name.clone()];
    let mut container = decl.container_type_key.as_deref();
    while let Some(key) = container {
        let parent = type_decl(graph, key)?;
        path.push(parent.short_name.clone());
        container = parent.container_type_key.as_deref();
    }
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fidl_types::{
        DeclaredConstant, ConstantValue, FidlEnum, FidlInterface, FidlMethod, FidlStruct,
        LiteralValue, SimpleType, Type, UserDefinedType,
    };
    use std::collections::HashSet;

    const FILE: &str = "/src/echo.fidl";

    fn decl(name: &str) -> DeclarationData {
        DeclarationData::declared_in(name, format!("echo.{}", name), FILE)
    }

    fn empty_struct(name: &str) -> FidlStruct {
        FidlStruct {
            decl_data: DeclarationData::new(name),
            fields: vec![],
        }
    }

    fn graph() -> (FidlFileGraph, FidlFile) {
        let mut graph = FidlFileGraph::default();
        let mut file = FidlFile::new(FILE, Some("echo"));

        graph.resolved_types.insert(
            "t:Config".into(),
            UserDefinedType::Struct(FidlStruct {
                decl_data: decl("Config"),
                fields: vec![],
            }),
        );
        graph.resolved_types.insert(
            "t:Mode".into(),
            UserDefinedType::Enum(FidlEnum {
                decl_data: DeclarationData::declared_in("Mode", "echo.Config.Mode", FILE)
                    .nested_in("t:Config"),
                values: vec![],
            }),
        );
        graph.resolved_types.insert(
            "t:Echo".into(),
            UserDefinedType::Interface(FidlInterface {
                decl_data: decl("Echo"),
                service_name: Some("echo::Echo".into()),
                version: 1,
                methods: vec![FidlMethod {
                    decl_data: DeclarationData::new("EchoString"),
                    ordinal: 0,
                    parameters: empty_struct("EchoString-request"),
                    response_parameters: Some(empty_struct("EchoString-response")),
                }],
            }),
        );
        graph.resolved_constants.insert(
            "c:MAX".into(),
            DeclaredConstant {
                decl_data: decl("MAX"),
                constant_type: Type::Simple(SimpleType::Uint32),
                value: ConstantValue::Literal(LiteralValue::Uint32(8)),
            },
        );

        file.declared_objects.structs.push("t:Config".into());
        file.declared_objects.embedded_enums.push("t:Mode".into());
        file.declared_objects.interfaces.push("t:Echo".into());
        file.declared_objects.top_level_constants.push("c:MAX".into());
        (graph, file)
    }

    #[test]
    fn collects_top_level_names() {
        let (graph, file) = graph();
        let table = NameTable::collect(&graph, &file).unwrap();
        assert_eq!(table.get("Config"), Some("Config"));
        assert_eq!(table.get("Echo"), Some("Echo"));
        assert_eq!(table.get("MAX"), Some("MAX"));
    }

    #[test]
    fn reserves_method_wrappers() {
        let (graph, file) = graph();
        let table = NameTable::collect(&graph, &file).unwrap();
        assert_eq!(table.request_name("EchoString"), Some("EchoString_Request"));
        assert_eq!(table.response_name("EchoString"), Some("EchoString_Response"));
        assert_eq!(table.get("EchoString-request"), Some("EchoString_Request"));
    }

    #[test]
    fn nested_declarations_concatenate_onto_parent() {
        let (graph, file) = graph();
        let table = NameTable::collect(&graph, &file).unwrap();
        assert_eq!(table.get("Config.Mode"), Some("ConfigMode"));
        assert_eq!(table.resolve_identifier(Some("echo"), "echo.Config.Mode"), "ConfigMode");
        assert_eq!(table.resolve_path(&["Config", "Mode", "Fast"]), "ConfigModeFast");
    }

    #[test]
    fn namespace_prefix_is_stripped_once() {
        let table = NameTable::default();
        assert_eq!(table.resolve_identifier(Some("echo"), "echo.Config"), "Config");
        assert_eq!(table.resolve_identifier(Some("echo.svc"), "echo.svc.Config"), "Config");
        assert_eq!(table.resolve_identifier(None, "Config"), "Config");
        assert_eq!(table.resolve_identifier(Some("echo"), "echoes.Config"), "echoesConfig");
    }

    #[test]
    fn distinct_names_stay_distinct() {
        let (graph, file) = graph();
        let table = NameTable::collect(&graph, &file).unwrap();
        let values: HashSet<&str> = table.iter().map(|(_, v)| v).collect();
        assert_eq!(values.len(), table.len());
    }

    fn interface(key: &str, name: &str, methods: &[&str]) -> (String, UserDefinedType) {
        let methods = methods
            .iter()
            .map(|method| FidlMethod {
                decl_data: DeclarationData::new(*method),
                ordinal: 0,
                parameters: empty_struct(&request_key(method)),
                response_parameters: None,
            })
            .collect();
        (
            key.to_string(),
            UserDefinedType::Interface(FidlInterface {
                decl_data: decl(name),
                service_name: None,
                version: 0,
                methods,
            }),
        )
    }

    #[test]
    fn shared_method_names_collide() {
        let (mut graph, mut file) = graph();
        for (key, ty) in [
            interface("t:A", "A", &["Get"]),
            interface("t:B", "B", &["Get"]),
        ] {
            graph.resolved_types.insert(key.clone(), ty);
            file.declared_objects.interfaces.push(key);
        }
        assert_eq!(
            NameTable::collect(&graph, &file),
            Err(GenError::NameCollision {
                name: "Get_Request".into()
            })
        );
    }

    #[test]
    fn declared_struct_collides_with_request_wrapper() {
        let (mut graph, mut file) = graph();
        graph.resolved_types.insert(
            "t:Get_Request".into(),
            UserDefinedType::Struct(FidlStruct {
                decl_data: decl("Get_Request"),
                fields: vec![],
            }),
        );
        file.declared_objects.structs.push("t:Get_Request".into());
        let (key, ty) = interface("t:A", "A", &["Get"]);
        graph.resolved_types.insert(key.clone(), ty);
        file.declared_objects.interfaces.push(key);

        assert_eq!(
            NameTable::collect(&graph, &file),
            Err(GenError::NameCollision {
                name: "Get_Request".into()
            })
        );
    }

    #[test]
    fn nested_name_collides_with_top_level() {
        let (mut graph, mut file) = graph();
        graph.resolved_types.insert(
            "t:ConfigMode".into(),
            UserDefinedType::Enum(FidlEnum {
                decl_data: decl("ConfigMode"),
                values: vec![],
            }),
        );
        file.declared_objects.top_level_enums.push("t:ConfigMode".into());

        assert_eq!(
            NameTable::collect(&graph, &file),
            Err(GenError::NameCollision {
                name: "ConfigMode".into()
            })
        );
    }

    #[test]
    fn dangling_keys_are_reported() {
        let (graph, mut file) = graph();
        file.declared_objects.unions.push("t:Missing".into());
        assert_eq!(
            NameTable::collect(&graph, &file),
            Err(GenError::UnknownUserDefinedType {
                key: "t:Missing".into()
            })
        );
    }
}
