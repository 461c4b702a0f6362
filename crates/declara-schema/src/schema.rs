use fxhash::FxHashMap;

use crate::types::{Function, Property, SchemaType, TypeName};

/// Read-only lookup over a schema.
///
/// This is the only view of a schema the resolver depends on. Lookups are by
/// exact name; there is no fuzzy matching and no overload resolution.
/// Implementations must be free of side effects so one schema can serve
/// concurrent resolutions from several threads.
pub trait SchemaModel: Send + Sync {
    /// The type a document's top level is resolved against.
    fn root_type(&self) -> &SchemaType;

    fn schema_type(&self, name: &str) -> Option<&SchemaType>;

    fn property_of(&self, type_name: &str, name: &str) -> Option<&Property> {
        self.schema_type(type_name)?.property(name)
    }

    fn function_of(&self, type_name: &str, name: &str) -> Option<&Function> {
        self.schema_type(type_name)?.function(name)
    }
}

/// A schema stored as an index from type name to declared members.
///
/// Types refer to each other by name only, so cyclic type graphs (a type
/// reachable from itself) need no special handling. A `Schema` is only ever
/// produced by [`SchemaBuilder`](crate::SchemaBuilder), which guarantees every
/// referenced receiver type is present in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub(crate) root: TypeName,
    pub(crate) types: FxHashMap<TypeName, SchemaType>,
}

impl Schema {
    pub fn root_name(&self) -> &TypeName {
        &self.root
    }

    /// All declared types, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &SchemaType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl SchemaModel for Schema {
    fn root_type(&self) -> &SchemaType {
        // The builder refuses to produce a schema whose root is undeclared.
        &self.types[&self.root]
    }

    fn schema_type(&self, name: &str) -> Option<&SchemaType> {
        self.types.get(name)
    }
}
