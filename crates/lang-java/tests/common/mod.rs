use rosetta_java::{DiscoverySettings, JavaLanguage, SnapshotSource, SuperPolicy};

#[allow(dead_code)]
pub const DOCUMENT_ID: &str = "rosetta";

const FIXTURE: &str = r#"{
  "known_types": [
    "java.lang.String",
    "java.lang.Comparable",
    "java.lang.Iterable",
    "java.util.List",
    "java.util.Map"
  ],
  "classes": [
    {
      "name": "com.example.Base",
      "package": "com.example",
      "scope": "public",
      "modifiers": { "abstract": true },
      "type_parameters": [{ "name": "T" }],
      "interfaces": ["java.lang.Iterable<T>"],
      "methods": [
        { "name": "size", "scope": "public", "modifiers": { "abstract": true }, "returns": "int" }
      ]
    },
    {
      "name": "com.example.Repository",
      "package": "com.example",
      "scope": "public",
      "type_parameters": [
        { "name": "T", "bounds": ["java.lang.Comparable<T>"] }
      ],
      "superclass": "com.example.Base<T>",
      "fields": [
        { "name": "items", "type": "java.util.List<T>", "scope": "private", "modifiers": { "final": true } },
        { "name": "names", "type": "java.util.List<java.lang.String>", "scope": "protected" },
        { "name": "count", "type": "int", "modifiers": { "volatile": true } },
        { "name": "index", "type": "java.util.Map<java.lang.String, java.util.List<T>>[]" }
      ],
      "constructors": [
        { "name": "<init>", "scope": "public", "parameters": [{ "name": "capacity", "type": "int" }] },
        { "name": "<init>", "scope": "public" }
      ],
      "methods": [
        {
          "name": "find",
          "scope": "public",
          "parameters": [{ "name": "names", "type": "java.util.List<java.lang.String>" }],
          "returns": "java.util.List<? extends T>"
        },
        {
          "name": "add",
          "scope": "public",
          "parameters": [{ "name": "items", "type": "java.util.List<T>" }]
        },
        {
          "name": "add",
          "scope": "public",
          "parameters": [{ "name": "item", "type": "T" }],
          "returns": "boolean"
        },
        {
          "name": "toArray",
          "scope": "public",
          "type_parameters": [{ "name": "E" }],
          "parameters": [{ "name": "target", "type": "E[]" }],
          "returns": "E[]"
        },
        {
          "name": "sort",
          "scope": "public",
          "modifiers": { "static": true },
          "parameters": [{ "name": "comparator", "type": "java.util.List<? super T>" }]
        }
      ]
    },
    {
      "name": "com.example.Repository.Entry",
      "package": "com.example",
      "enclosing": "com.example.Repository",
      "scope": "public",
      "modifiers": { "static": true },
      "fields": [{ "name": "key", "type": "java.lang.String", "scope": "public" }]
    }
  ]
}"#;

#[allow(dead_code)]
pub fn fixture_source() -> SnapshotSource {
    SnapshotSource::from_json(FIXTURE).expect("fixture snapshot is valid")
}

/// Discovers `Repository.Entry`, which pulls in `Repository` and, with `Expose`, `Base`.
#[allow(dead_code)]
pub fn discover_fixture(source: &SnapshotSource, super_policy: SuperPolicy) -> JavaLanguage {
    let settings = DiscoverySettings {
        super_policy,
        ..DiscoverySettings::default()
    };
    let mut language = JavaLanguage::new();
    language
        .discover(&settings, source, "com.example.Repository.Entry")
        .expect("fixture discovery succeeds");
    language
}
