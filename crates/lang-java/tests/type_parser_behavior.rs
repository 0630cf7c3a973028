use rosetta_api::{BoundKind, KnownTypes, OBJECT_TYPE, TypeError, TypeRef};
use rosetta_java::{TypeCache, TypeParser, compile};

fn universe() -> KnownTypes {
    KnownTypes::new([
        "java.lang.String",
        "java.lang.Comparable",
        "java.io.Serializable",
        "java.util.List",
        "java.util.Map",
    ])
}

const EXPRESSIONS: &[&str] = &[
    "java.lang.String",
    "T",
    "?",
    "int[][]",
    "java.util.List<java.lang.String>",
    "java.util.Map<K, java.util.List<? extends V>>",
    "java.util.List<? super T>[]",
    "T extends java.lang.Comparable<T> & java.io.Serializable",
    "? extends java.lang.Comparable<? super T>",
    "java.util.List<>",
];

#[test]
fn compile_then_parse_is_identity() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    for expr in EXPRESSIONS {
        let ty = parser.parse(expr).unwrap();
        let compiled = compile(&ty);
        assert_eq!(
            parser.parse(&compiled).unwrap(),
            ty,
            "round trip of {:?} through {:?}",
            expr,
            compiled
        );
    }
}

#[test]
fn parsing_is_idempotent_with_and_without_cache() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    let mut cache = TypeCache::new();
    for expr in EXPRESSIONS {
        let direct = parser.parse(expr).unwrap();
        assert_eq!(parser.parse(expr).unwrap(), direct);
        assert_eq!(*cache.parse(&parser, expr).unwrap(), direct);
        assert_eq!(*cache.parse(&parser, expr).unwrap(), direct);
    }
    assert_eq!(cache.len(), EXPRESSIONS.len());
}

#[test]
fn primitive_array() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    let ty = parser.parse("int[][]").unwrap();
    assert_eq!(ty.array_depth(), 2);
    assert_eq!(ty.base(), "int");
    assert!(ty.is_primitive());
    assert!(!ty.is_generic());
}

#[test]
fn resolvability_decides_genericity() {
    let universe = universe();
    let parser = TypeParser::new(&universe);

    let free = parser.parse("T").unwrap();
    assert!(free.is_generic());
    assert_eq!(free.bounds().as_ref(), &[TypeRef::object()]);

    let string = parser.parse("java.lang.String").unwrap();
    assert!(!string.is_generic());
    assert_eq!(string.bounds().as_ref(), std::slice::from_ref(&string));

    let object = parser.parse(OBJECT_TYPE).unwrap();
    assert!(!object.is_generic());
}

#[test]
fn intersection_bound() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    let ty = parser
        .parse("T extends java.lang.Comparable<T> & java.io.Serializable")
        .unwrap();
    let bounded = ty.as_bounded().expect("bounded type");
    assert_eq!(bounded.base(), "T");
    assert_eq!(bounded.bound_kind(), BoundKind::Extends);
    assert_eq!(bounded.bounds().len(), 2);

    let first = bounded.bounds()[0].as_simple().unwrap();
    assert_eq!(first.base(), "java.lang.Comparable");
    assert_eq!(first.sub_types().unwrap()[0].base(), "T");
    assert_eq!(bounded.bounds()[1].base(), "java.io.Serializable");
}

#[test]
fn bare_wildcard() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    let ty = parser.parse("?").unwrap();
    assert!(ty.is_wildcard());
    assert!(ty.is_generic());
    assert_eq!(ty.bounds().as_ref(), &[TypeRef::object()]);
}

#[test]
fn errors_are_classified() {
    let universe = universe();
    let parser = TypeParser::new(&universe);
    assert!(matches!(
        parser.parse("java.util.Map<K, V"),
        Err(TypeError::MalformedTypeExpression { .. })
    ));
    assert!(matches!(
        parser.parse("T super"),
        Err(TypeError::UnsupportedBoundCombination { .. })
    ));
}
