//! Schema construction.
//!
//! The builder is the component that turns type declarations, from wherever
//! they come from, into a validated [`Schema`]. Validation happens once, in
//! [`SchemaBuilder::build`]; after that the schema is immutable.

use fxhash::FxHashMap;
use indexmap::IndexMap;

use crate::error::SchemaError;
use crate::schema::Schema;
use crate::types::{Function, Parameter, Property, SchemaType, TypeName, TypeRef};

/// Declarations of a single type, collected before validation.
#[derive(Debug, Clone)]
pub struct TypeBuilder {
    name: TypeName,
    properties: Vec<Property>,
    functions: Vec<Function>,
}

impl TypeBuilder {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            functions: Vec::new(),
        }
    }

    /// A read-only property.
    pub fn property(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.properties.push(Property::new(name, ty, false));
        self
    }

    pub fn mutable_property(mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        self.properties.push(Property::new(name, ty, true));
        self
    }

    /// A function whose calls take a trailing block configuring `receiver`.
    pub fn configuring(mut self, name: impl Into<String>, receiver: impl Into<TypeName>) -> Self {
        self.functions.push(Function::configuring(name, Vec::new(), receiver));
        self
    }

    /// A plain function invoked without a block.
    pub fn plain(mut self, name: impl Into<String>, params: Vec<Parameter>, returns: impl Into<TypeRef>) -> Self {
        self.functions.push(Function::plain(name, params, returns));
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn add_property(&mut self, property: Property) {
        self.properties.push(property);
    }

    pub fn add_function(&mut self, function: Function) {
        self.functions.push(function);
    }

    pub fn name(&self) -> &TypeName {
        &self.name
    }
}

/// Collects type declarations and validates them into a [`Schema`].
///
/// # Example
///
/// ```
/// use declara_schema::{PrimitiveType, SchemaBuilder, SchemaModel, TypeBuilder};
///
/// let schema = SchemaBuilder::new("TopLevel")
///     .with_type(TypeBuilder::new("TopLevel").configuring("n1", "Nested"))
///     .with_type(TypeBuilder::new("Nested").mutable_property("x", PrimitiveType::Int))
///     .build()
///     .unwrap();
///
/// assert!(schema.function_of("TopLevel", "n1").unwrap().has_block_semantics());
/// ```
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    root: TypeName,
    types: Vec<TypeBuilder>,
}

impl SchemaBuilder {
    pub fn new(root: impl Into<TypeName>) -> Self {
        Self {
            root: root.into(),
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeBuilder) -> Self {
        self.types.push(ty);
        self
    }

    pub fn add_type(&mut self, ty: TypeBuilder) {
        self.types.push(ty);
    }

    /// Validate the collected declarations and produce the schema.
    ///
    /// Fails with the first problem found, checking in order: duplicate type
    /// names, duplicate members, an undeclared root, and type references that
    /// do not name a primitive or a declared type.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut types: FxHashMap<TypeName, SchemaType> = FxHashMap::default();

        for declared in self.types {
            if types.contains_key(&declared.name) {
                return Err(SchemaError::DuplicateType {
                    name: declared.name.to_string(),
                });
            }

            let mut properties = IndexMap::new();
            for property in declared.properties {
                if properties.contains_key(&property.name) {
                    return Err(SchemaError::DuplicateMember {
                        type_name: declared.name.to_string(),
                        member: property.name,
                        kind: "property",
                    });
                }
                properties.insert(property.name.clone(), property);
            }

            let mut functions = IndexMap::new();
            for function in declared.functions {
                if functions.contains_key(&function.name) {
                    return Err(SchemaError::DuplicateMember {
                        type_name: declared.name.to_string(),
                        member: function.name,
                        kind: "function",
                    });
                }
                functions.insert(function.name.clone(), function);
            }

            types.insert(
                declared.name.clone(),
                SchemaType {
                    name: declared.name,
                    properties,
                    functions,
                },
            );
        }

        if !types.contains_key(&self.root) {
            return Err(SchemaError::UnknownRoot {
                name: self.root.to_string(),
            });
        }

        for ty in types.values() {
            validate_references(ty, &types)?;
        }

        log::debug!(
            "built schema with {} types rooted at `{}`",
            types.len(),
            self.root
        );

        Ok(Schema {
            root: self.root,
            types,
        })
    }
}

fn validate_references(ty: &SchemaType, types: &FxHashMap<TypeName, SchemaType>) -> Result<(), SchemaError> {
    let check = |member: &str, referenced: &TypeRef| match referenced {
        TypeRef::Named(name) if !types.contains_key(name) => Err(SchemaError::UnknownType {
            type_name: ty.name.to_string(),
            member: member.to_string(),
            referenced: name.to_string(),
        }),
        _ => Ok(()),
    };

    for property in ty.properties.values() {
        check(property.name.as_str(), &property.ty)?;
    }

    for function in ty.functions.values() {
        for param in &function.params {
            check(format!("{}({})", function.name, param.name).as_str(), &param.ty)?;
        }
        match function.configured_type() {
            Some(receiver) => {
                if TypeRef::parse(receiver.as_str()).as_named().is_none() {
                    return Err(SchemaError::InvalidReceiver {
                        type_name: ty.name.to_string(),
                        function: function.name.clone(),
                        receiver: receiver.to_string(),
                    });
                }
                check(function.name.as_str(), &TypeRef::Named(receiver.clone()))?;
            }
            None => check(function.name.as_str(), &function.return_type())?,
        }
    }

    Ok(())
}
