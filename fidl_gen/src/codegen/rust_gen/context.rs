/* Translation context for a single schema file */

use super::names::NameTable;
use crate::error::GenError;
use fidl_types::{DeclaredConstant, FidlFile, FidlFileGraph, UserDefinedType};
use serde_derive::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::rc::Rc;

/// Maps schema files to the Rust module path their generated code lives in.
///
/// Keys are `//` followed by the file path relative to the source root. An
/// empty value means the file is generated into the current crate root.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct CrateMap {
    entries: BTreeMap<String, String>,
}

impl CrateMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, relative_path: &str, module: impl Into<String>) {
        self.entries.insert(Self::key(relative_path), module.into());
    }

    pub fn module_for(&self, relative_path: &str) -> Option<&str> {
        self.entries.get(&Self::key(relative_path)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key(relative_path: &str) -> String {
        if relative_path.starts_with("//") {
            relative_path.to_string()
        } else {
            format!("//{}", relative_path)
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CrateMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = CrateMap::new();
        for (path, module) in iter {
            let path: String = path.into();
            map.insert(&path, module);
        }
        map
    }
}

/// `file_name` relative to `src_root`, using `/` separators.
///
/// A file outside the root is returned unchanged.
pub fn relative_path(src_root: &Path, file_name: &str) -> String {
    match Path::new(file_name).strip_prefix(src_root) {
        Ok(relative) => relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => file_name.to_string(),
    }
}

/// Everything the translator needs while working on one schema file.
///
/// The graph and crate map are shared read-only across files; the name table
/// belongs to this file alone. Name tables of dependency files are built on
/// first use and kept for the life of the context.
pub struct Context<'a> {
    pub graph: &'a FidlFileGraph,
    pub file: &'a FidlFile,
    pub crate_map: &'a CrateMap,
    pub src_root: &'a Path,
    names: Rc<NameTable>,
    dependency_names: RefCell<HashMap<String, Rc<NameTable>>>,
}

impl<'a> Context<'a> {
    pub fn new(
        graph: &'a FidlFileGraph,
        file: &'a FidlFile,
        crate_map: &'a CrateMap,
        src_root: &'a Path,
    ) -> Result<Self, GenError> {
        let names = Rc::new(NameTable::collect(graph, file)?);
        Ok(Self {
            graph,
            file,
            crate_map,
            src_root,
            names,
            dependency_names: RefCell::new(HashMap::new()),
        })
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Name table of `file`, which may be the current file or a dependency.
    pub fn names_for(&self, file: &FidlFile) -> Result<Rc<NameTable>, GenError> {
        if file.file_name == self.file.file_name {
            return Ok(Rc::clone(&self.names));
        }
        if let Some(names) = self.dependency_names.borrow().get(&file.file_name) {
            return Ok(Rc::clone(names));
        }
        let names = Rc::new(NameTable::collect(self.graph, file)?);
        self.dependency_names
            .borrow_mut()
            .insert(file.file_name.clone(), Rc::clone(&names));
        Ok(names)
    }

    pub fn is_current_file(&self, file_name: &str) -> bool {
        file_name == self.file.file_name
    }

    pub fn relative_path(&self, file_name: &str) -> String {
        relative_path(self.src_root, file_name)
    }

    pub fn current_relative_path(&self) -> String {
        self.relative_path(&self.file.file_name)
    }

    pub fn resolve_type(&self, type_key: &str) -> Result<&'a UserDefinedType, GenError> {
        self.graph
            .resolved_type(type_key)
            .ok_or_else(|| GenError::UnknownUserDefinedType {
                key: type_key.to_string(),
            })
    }

    pub fn resolve_constant(&self, constant_key: &str) -> Result<&'a DeclaredConstant, GenError> {
        self.graph
            .resolved_constant(constant_key)
            .ok_or_else(|| GenError::UnknownConstant {
                key: constant_key.to_string(),
            })
    }
}
