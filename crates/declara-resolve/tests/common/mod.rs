use declara_schema::{Parameter, PrimitiveType, Schema, SchemaBuilder, SchemaDescriptor, TypeBuilder, TypeRef};
use declara_syntax::{Document, Statement};

/// Install a test logger so `RUST_LOG=trace` shows resolver activity.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn parse(text: &str) -> Document {
    declara_syntax::parse("test.dcl", text).expect("test document should parse")
}

/// Root type exposing `n1` and `n2` both as properties and as configuring
/// functions over the same nested type.
///
/// ```text
/// TopLevel
///   n1, n2: Nested          n1 {}, n2 {}: Nested
///   version: String (mut)   plugins {}: Plugins
///   count: Int              describe(): String
/// Nested
///   x: Int (mut)            child {}: Nested
///   label: String (mut)     tag(value: String)
///   child: Nested
/// Plugins
///   id(id: String): PluginDefinition
///   kotlin(module: String): PluginDefinition
/// PluginDefinition
///   version: String (mut)   version(version: String): PluginDefinition
///   apply: Boolean (mut)    apply(apply: Boolean): PluginDefinition
/// ```
pub fn schema() -> Schema {
    SchemaBuilder::new("TopLevel")
        .with_type(
            TypeBuilder::new("TopLevel")
                .property("n1", TypeRef::named("Nested"))
                .property("n2", TypeRef::named("Nested"))
                .mutable_property("version", PrimitiveType::String)
                .property("count", PrimitiveType::Int)
                .configuring("n1", "Nested")
                .configuring("n2", "Nested")
                .configuring("plugins", "Plugins")
                .plain("describe", vec![], PrimitiveType::String),
        )
        .with_type(
            TypeBuilder::new("Nested")
                .mutable_property("x", PrimitiveType::Int)
                .mutable_property("label", PrimitiveType::String)
                .property("child", TypeRef::named("Nested"))
                .configuring("child", "Nested")
                .plain(
                    "tag",
                    vec![Parameter::new("value", PrimitiveType::String)],
                    PrimitiveType::Unit,
                ),
        )
        .with_type(
            TypeBuilder::new("Plugins")
                .plain(
                    "id",
                    vec![Parameter::new("id", PrimitiveType::String)],
                    TypeRef::named("PluginDefinition"),
                )
                .plain(
                    "kotlin",
                    vec![Parameter::new("module", PrimitiveType::String)],
                    TypeRef::named("PluginDefinition"),
                ),
        )
        .with_type(
            TypeBuilder::new("PluginDefinition")
                .mutable_property("version", PrimitiveType::String)
                .mutable_property("apply", PrimitiveType::Boolean)
                .plain(
                    "version",
                    vec![Parameter::new("version", PrimitiveType::String)],
                    TypeRef::named("PluginDefinition"),
                )
                .plain(
                    "apply",
                    vec![Parameter::new("apply", PrimitiveType::Boolean)],
                    TypeRef::named("PluginDefinition"),
                ),
        )
        .build()
        .expect("test schema should be valid")
}

/// The `n1`/`n2` schema, loaded through a descriptor.
pub fn descriptor_schema() -> Schema {
    r#"
        root = "TopLevel"

        [[types]]
        name = "TopLevel"
        properties = [
            { name = "n1", type = "Nested" },
            { name = "n2", type = "Nested" },
        ]
        functions = [
            { name = "n1", configures = "Nested" },
            { name = "n2", configures = "Nested" },
        ]

        [[types]]
        name = "Nested"
        properties = [{ name = "x", type = "Int", mutable = true }]
    "#
    .parse::<SchemaDescriptor>()
    .and_then(SchemaDescriptor::build)
    .expect("test descriptor should be valid")
}

/// Number of assignment and call statements in `statements`.
pub fn count_statements(statements: &[Statement]) -> (usize, usize) {
    let assignments = statements.iter().filter(|s| s.as_assignment().is_some()).count();
    let calls = statements.iter().filter(|s| s.as_call().is_some()).count();
    (assignments, calls)
}
