//! Schema element types.
//!
//! These describe what a document may reference: named receiver types with
//! their properties and functions, and the primitive value types literals can
//! take.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;

/// The unique name of a schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Value types built into the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// 64-bit signed integer literals.
    Int,
    /// Double-quoted string literals.
    String,
    /// `true` / `false`.
    Boolean,
    /// The result of a function that produces nothing.
    Unit,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Int => "Int",
            PrimitiveType::String => "String",
            PrimitiveType::Boolean => "Boolean",
            PrimitiveType::Unit => "Unit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Int" => Some(PrimitiveType::Int),
            "String" => Some(PrimitiveType::String),
            "Boolean" => Some(PrimitiveType::Boolean),
            "Unit" => Some(PrimitiveType::Unit),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to a type from a property, parameter or function result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Named(TypeName),
}

impl TypeRef {
    /// Parse a type name, treating the primitive names (`Int`, `String`,
    /// `Boolean`, `Unit`) as primitives and anything else as a named type.
    pub fn parse(name: &str) -> Self {
        match PrimitiveType::from_name(name) {
            Some(primitive) => TypeRef::Primitive(primitive),
            None => TypeRef::Named(TypeName::new(name)),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(TypeName::new(name))
    }

    /// The receiver type name, if values of this type can be configured.
    pub fn as_named(&self) -> Option<&TypeName> {
        match self {
            TypeRef::Named(name) => Some(name),
            TypeRef::Primitive(_) => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(primitive) => write!(f, "{}", primitive),
            TypeRef::Named(name) => write!(f, "{}", name),
        }
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(primitive: PrimitiveType) -> Self {
        TypeRef::Primitive(primitive)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::parse(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    pub mutable: bool,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>, mutable: bool) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            mutable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// What a call to a function means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionSemantics {
    /// A plain invocation producing a value. Calls take no trailing block.
    Plain { returns: TypeRef },
    /// The call takes a trailing block that configures a receiver of the
    /// given type.
    Configuring { receiver: TypeName },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<Parameter>,
    pub semantics: FunctionSemantics,
}

impl Function {
    pub fn plain(name: impl Into<String>, params: Vec<Parameter>, returns: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            params,
            semantics: FunctionSemantics::Plain {
                returns: returns.into(),
            },
        }
    }

    pub fn configuring(name: impl Into<String>, params: Vec<Parameter>, receiver: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            params,
            semantics: FunctionSemantics::Configuring {
                receiver: receiver.into(),
            },
        }
    }

    /// Whether calls take a trailing block.
    pub fn has_block_semantics(&self) -> bool {
        matches!(self.semantics, FunctionSemantics::Configuring { .. })
    }

    /// The nested receiver type a trailing block is resolved against.
    pub fn configured_type(&self) -> Option<&TypeName> {
        match &self.semantics {
            FunctionSemantics::Configuring { receiver } => Some(receiver),
            FunctionSemantics::Plain { .. } => None,
        }
    }

    pub fn return_type(&self) -> TypeRef {
        match &self.semantics {
            FunctionSemantics::Plain { returns } => returns.clone(),
            FunctionSemantics::Configuring { .. } => TypeRef::Primitive(PrimitiveType::Unit),
        }
    }
}

/// A receiver type: its properties and functions, each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaType {
    pub(crate) name: TypeName,
    pub(crate) properties: IndexMap<String, Property>,
    pub(crate) functions: IndexMap<String, Function>,
}

impl SchemaType {
    /// A receiver type with the given members, unvalidated.
    ///
    /// A member whose name repeats replaces the earlier one, and referenced
    /// types are not checked. Use [`SchemaBuilder`](crate::SchemaBuilder)
    /// for a validated schema.
    pub fn new(
        name: impl Into<TypeName>,
        properties: impl IntoIterator<Item = Property>,
        functions: impl IntoIterator<Item = Function>,
    ) -> Self {
        Self {
            name: name.into(),
            properties: properties
                .into_iter()
                .map(|property| (property.name.clone(), property))
                .collect(),
            functions: functions
                .into_iter()
                .map(|function| (function.name.clone(), function))
                .collect(),
        }
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ref_parse_primitives() {
        assert_eq!(TypeRef::parse("Int"), TypeRef::Primitive(PrimitiveType::Int));
        assert_eq!(TypeRef::parse("Boolean"), TypeRef::Primitive(PrimitiveType::Boolean));
        assert_eq!(TypeRef::parse("Nested"), TypeRef::named("Nested"));
    }

    #[test]
    fn configuring_function_returns_unit() {
        let function = Function::configuring("n1", vec![], "Nested");
        assert!(function.has_block_semantics());
        assert_eq!(function.configured_type(), Some(&TypeName::new("Nested")));
        assert_eq!(function.return_type(), PrimitiveType::Unit.into());
    }

    #[test]
    fn schema_type_keeps_member_order() {
        let ty = SchemaType::new(
            "Nested",
            vec![
                Property::new("x", PrimitiveType::Int, true),
                Property::new("label", PrimitiveType::String, true),
            ],
            vec![Function::configuring("child", vec![], "Nested")],
        );
        let names: Vec<_> = ty.properties().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "label"]);
        assert_eq!(ty.name().as_str(), "Nested");
        assert!(ty.function("child").unwrap().has_block_semantics());
        assert!(ty.property("child").is_none());
    }

    #[test]
    fn plain_function_has_no_receiver() {
        let function = Function::plain("id", vec![Parameter::new("id", PrimitiveType::String)], "Plugin");
        assert!(!function.has_block_semantics());
        assert_eq!(function.configured_type(), None);
        assert_eq!(function.return_type(), TypeRef::named("Plugin"));
    }
}
