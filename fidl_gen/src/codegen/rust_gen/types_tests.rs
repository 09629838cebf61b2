use super::*;
use crate::codegen::rust_gen::context::CrateMap;
use crate::codegen::rust_gen::size::{needs_boxing, wire_size};
use fidl_types::{
    DeclarationData, FidlEnum, FidlFile, FidlFileGraph, FidlInterface, FidlStruct, FidlUnion,
    HandleType, MapType, StringType, TypeReference,
};
use std::path::Path;

const ROOT: &str = "/src";
const FILE_A: &str = "/src/a/a.fidl";
const FILE_B: &str = "/src/b/b.fidl";

fn decl(name: &str, namespace: &str, file: &str) -> DeclarationData {
    DeclarationData::declared_in(name, format!("{}.{}", namespace, name), file)
}

fn graph() -> FidlFileGraph {
    let mut graph = FidlFileGraph::default();
    let mut a = FidlFile::new(FILE_A, Some("a"));
    let mut b = FidlFile::new(FILE_B, Some("b"));

    let types = [
        (
            "a:Point",
            UserDefinedType::Struct(FidlStruct {
                decl_data: decl("Point", "a", FILE_A),
                fields: vec![],
            }),
        ),
        (
            "a:Color",
            UserDefinedType::Enum(FidlEnum {
                decl_data: decl("Color", "a", FILE_A),
                values: vec![],
            }),
        ),
        (
            "a:Shape",
            UserDefinedType::Union(FidlUnion {
                decl_data: decl("Shape", "a", FILE_A),
                fields: vec![],
            }),
        ),
        (
            "a:Echo",
            UserDefinedType::Interface(FidlInterface {
                decl_data: decl("Echo", "a", FILE_A),
                service_name: None,
                version: 0,
                methods: vec![],
            }),
        ),
        (
            "a:type",
            UserDefinedType::Struct(FidlStruct {
                decl_data: decl("type", "a", FILE_A),
                fields: vec![],
            }),
        ),
        (
            "b:Remote",
            UserDefinedType::Struct(FidlStruct {
                decl_data: decl("Remote", "b", FILE_B),
                fields: vec![],
            }),
        ),
    ];
    for (key, ty) in types {
        graph.resolved_types.insert(key.to_string(), ty);
    }

    a.declared_objects.structs = vec!["a:Point".into(), "a:type".into()];
    a.declared_objects.top_level_enums = vec!["a:Color".into()];
    a.declared_objects.unions = vec!["a:Shape".into()];
    a.declared_objects.interfaces = vec!["a:Echo".into()];
    b.declared_objects.structs = vec!["b:Remote".into()];
    graph.files.insert(FILE_A.into(), a);
    graph.files.insert(FILE_B.into(), b);
    graph
}

fn crate_map() -> CrateMap {
    [("b/b.fidl", "pkg_b")].into_iter().collect()
}

fn translate(ty: &Type) -> Result<String, GenError> {
    let graph = graph();
    let map = crate_map();
    let file = graph.file(FILE_A).unwrap();
    let ctx = Context::new(&graph, file, &map, Path::new(ROOT))?;
    format_type_to_rust(ty, &ctx).map(|t| t.to_string())
}

fn reference(key: &str, nullable: bool) -> Type {
    Type::Reference(TypeReference {
        type_key: key.into(),
        nullable,
        is_interface_request: false,
    })
}

fn array(element: Type, fixed_length: i32) -> Type {
    Type::Array(ArrayType {
        element_type: Box::new(element),
        fixed_length,
        nullable: false,
    })
}

#[test]
fn simple_types_map_to_primitives() {
    assert_eq!(translate(&Type::Simple(SimpleType::Int32)).unwrap(), "i32");
    assert_eq!(translate(&Type::Simple(SimpleType::Uint64)).unwrap(), "u64");
    assert_eq!(translate(&Type::Simple(SimpleType::Double)).unwrap(), "f64");
    assert_eq!(translate(&Type::Simple(SimpleType::Bool)).unwrap(), "bool");
}

#[test]
fn array_length_boundary() {
    let byte = Type::Simple(SimpleType::Uint8);
    assert_eq!(translate(&array(byte.clone(), 32)).unwrap(), "[u8; 32]");
    assert_eq!(translate(&array(byte.clone(), 0)).unwrap(), "[u8; 0]");
    assert_eq!(translate(&array(byte.clone(), -1)).unwrap(), "Vec<u8>");
    assert_eq!(translate(&array(byte.clone(), -7)).unwrap(), "Vec<u8>");
    assert_eq!(
        translate(&array(byte, 33)),
        Err(GenError::UnsupportedArrayLength { length: 33 })
    );
}

#[test]
fn nested_array_failure_propagates() {
    let inner = array(Type::Simple(SimpleType::Int8), 64);
    assert_eq!(
        translate(&array(inner, -1)),
        Err(GenError::UnsupportedArrayLength { length: 64 })
    );
}

#[test]
fn nullable_containers_wrap_once() {
    let ty = Type::Array(ArrayType {
        element_type: Box::new(Type::String(StringType { nullable: true })),
        fixed_length: -1,
        nullable: true,
    });
    assert_eq!(translate(&ty).unwrap(), "Option<Vec<Option<String>>>");

    let map = Type::Map(MapType {
        key_type: Box::new(Type::String(StringType::default())),
        value_type: Box::new(Type::Simple(SimpleType::Int16)),
        nullable: true,
    });
    assert_eq!(
        translate(&map).unwrap(),
        "Option<::std::collections::HashMap<String, i16>>"
    );
}

#[test]
fn optional_wrapping_is_idempotent() {
    let once = RustType::new("Point").optional_boxed();
    let twice = once.clone().optional_boxed().optional();
    assert_eq!(once.to_string(), "Option<Box<Point>>");
    assert_eq!(twice.to_string(), "Option<Box<Point>>");
    assert!(twice.is_optional() && twice.is_boxed());
    assert_eq!(RustType::new("i32").optional().optional().to_string(), "Option<i32>");
}

#[test]
fn handle_kinds_use_wrapper_table() {
    let channel = Type::Handle(HandleType {
        kind: HandleKind::Channel,
        nullable: false,
    });
    let generic = Type::Handle(HandleType {
        kind: HandleKind::Unspecified,
        nullable: true,
    });
    assert_eq!(translate(&channel).unwrap(), "::magenta::Channel");
    assert_eq!(translate(&generic).unwrap(), "Option<::magenta::Handle>");
}

#[test]
fn nullable_aggregates_are_boxed() {
    assert_eq!(translate(&reference("a:Point", true)).unwrap(), "Option<Box<Point>>");
    assert_eq!(translate(&reference("a:Shape", true)).unwrap(), "Option<Box<Shape>>");
    assert_eq!(translate(&reference("a:Color", true)).unwrap(), "Option<Color>");
    assert_eq!(translate(&reference("a:Point", false)).unwrap(), "Point");
}

#[test]
fn interfaces_become_endpoints() {
    let request = Type::Reference(TypeReference {
        type_key: "a:Echo".into(),
        nullable: false,
        is_interface_request: true,
    });
    assert_eq!(translate(&request).unwrap(), "::fidl::ServerEnd<Echo::Marker>");
    assert_eq!(
        translate(&reference("a:Echo", true)).unwrap(),
        "Option<::fidl::InterfacePtr<::fidl::ClientEnd<Echo::Marker>>>"
    );
}

#[test]
fn keyword_named_types_are_escaped() {
    assert_eq!(translate(&reference("a:type", false)).unwrap(), "type_");
}

#[test]
fn cross_file_references_are_module_qualified() {
    assert_eq!(translate(&reference("b:Remote", false)).unwrap(), "::pkg_b::Remote");
    assert_eq!(
        translate(&reference("b:Remote", true)).unwrap(),
        "Option<Box<::pkg_b::Remote>>"
    );
}

#[test]
fn cross_file_reference_without_map_entry_fails() {
    let graph = graph();
    let map = CrateMap::new();
    let ctx = Context::new(&graph, graph.file(FILE_A).unwrap(), &map, Path::new(ROOT)).unwrap();
    assert_eq!(
        format_type_to_rust(&reference("b:Remote", false), &ctx),
        Err(GenError::UnresolvedDependency {
            file: "a/a.fidl".into(),
            dependency: "b/b.fidl".into(),
        })
    );
}

#[test]
fn empty_module_entry_means_crate_root() {
    let graph = graph();
    let map: CrateMap = [("b/b.fidl", "")].into_iter().collect();
    let ctx = Context::new(&graph, graph.file(FILE_A).unwrap(), &map, Path::new(ROOT)).unwrap();
    assert_eq!(
        format_type_to_rust(&reference("b:Remote", false), &ctx).unwrap().to_string(),
        "::Remote"
    );
}

#[test]
fn dangling_reference_is_reported() {
    assert_eq!(
        translate(&reference("a:Gone", false)),
        Err(GenError::UnknownUserDefinedType { key: "a:Gone".into() })
    );
}

#[test]
fn simple_field_scenario() {
    let graph = graph();
    let map = crate_map();
    let ctx = Context::new(&graph, graph.file(FILE_A).unwrap(), &map, Path::new(ROOT)).unwrap();
    let ty = Type::Simple(SimpleType::Int32);
    assert_eq!(format_type_to_rust(&ty, &ctx).unwrap().to_string(), "i32");
    assert_eq!(wire_size(&ty, &ctx), Ok(4));
}

#[test]
fn reference_sizes_depend_only_on_kind() {
    let graph = graph();
    let map = crate_map();
    let ctx = Context::new(&graph, graph.file(FILE_A).unwrap(), &map, Path::new(ROOT)).unwrap();
    assert_eq!(wire_size(&reference("a:Color", false), &ctx), Ok(4));
    assert_eq!(wire_size(&reference("a:Point", true), &ctx), Ok(8));
    assert_eq!(wire_size(&reference("a:Shape", false), &ctx), Ok(16));
    assert_eq!(wire_size(&reference("a:Echo", false), &ctx), Ok(8));
    let request = Type::Reference(TypeReference {
        type_key: "a:Echo".into(),
        nullable: false,
        is_interface_request: true,
    });
    assert_eq!(wire_size(&request, &ctx), Ok(4));
}

#[test]
fn boxing_is_conservative() {
    let graph = graph();
    for ty in graph.resolved_types.values() {
        let expected = matches!(ty, UserDefinedType::Struct(_) | UserDefinedType::Union(_));
        assert_eq!(needs_boxing(ty), expected, "{}", ty.kind_name());
    }
}
