//! Declarative schema descriptors.
//!
//! A descriptor is a TOML document listing the root receiver type and every
//! participating type with its properties and functions:
//!
//! ```toml
//! root = "TopLevel"
//!
//! [[types]]
//! name = "TopLevel"
//! properties = [{ name = "n1", type = "Nested" }]
//! functions = [{ name = "n1", configures = "Nested" }]
//!
//! [[types]]
//! name = "Nested"
//! properties = [{ name = "x", type = "Int", mutable = true }]
//! ```
//!
//! A function entry either `configures` a receiver type (its calls take a
//! trailing block) or `returns` a value type, defaulting to `Unit`. When both
//! are given, `configures` wins.

use std::{fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::builder::{SchemaBuilder, TypeBuilder};
use crate::error::SchemaError;
use crate::schema::{Schema, SchemaModel};
use crate::types::{Function, FunctionSemantics, Parameter, Property, SchemaType, TypeRef};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Name of the top-level receiver type
    pub root: String,

    /// Every type taking part in the schema, including the root
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,

    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,

    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,

    /// A primitive (`Int`, `String`, `Boolean`, `Unit`) or a declared type name
    #[serde(rename = "type")]
    pub ty: String,

    /// Whether documents may assign the property
    #[serde(default)]
    pub mutable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub name: String,

    #[serde(default)]
    pub params: Vec<ParameterDescriptor>,

    /// Receiver type configured by the call's trailing block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configures: Option<String>,

    /// Result type of a plain call
    #[serde(default = "default_return_type")]
    pub returns: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

fn default_return_type() -> String {
    "Unit".to_string()
}

impl SchemaDescriptor {
    /// Read a descriptor from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        log::debug!("loading schema descriptor from {}", path.display());
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    pub fn to_toml_string(&self) -> Result<String, SchemaError> {
        toml::to_string(self).map_err(|e| SchemaError::Descriptor(e.to_string()))
    }

    pub fn into_builder(self) -> SchemaBuilder {
        let mut builder = SchemaBuilder::new(self.root.as_str());
        for ty in self.types {
            let mut type_builder = TypeBuilder::new(ty.name.as_str());
            for property in ty.properties {
                type_builder.add_property(Property::new(property.name, TypeRef::parse(&property.ty), property.mutable));
            }
            for function in ty.functions {
                let params = function
                    .params
                    .into_iter()
                    .map(|param| Parameter::new(param.name, TypeRef::parse(&param.ty)))
                    .collect();
                let function = match function.configures {
                    Some(receiver) => Function::configuring(function.name, params, receiver.as_str()),
                    None => Function::plain(function.name, params, TypeRef::parse(&function.returns)),
                };
                type_builder.add_function(function);
            }
            builder.add_type(type_builder);
        }
        builder
    }

    pub fn build(self) -> Result<Schema, SchemaError> {
        self.into_builder().build()
    }
}

impl FromStr for SchemaDescriptor {
    type Err = SchemaError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(text)?)
    }
}

/// Describes an existing schema, types sorted by name for stable output.
impl From<&Schema> for SchemaDescriptor {
    fn from(schema: &Schema) -> Self {
        let mut types: Vec<&SchemaType> = schema.types().collect();
        types.sort_by(|a, b| a.name().cmp(b.name()));
        SchemaDescriptor {
            root: schema.root_type().name().to_string(),
            types: types.into_iter().map(describe_type).collect(),
        }
    }
}

fn describe_type(ty: &SchemaType) -> TypeDescriptor {
    TypeDescriptor {
        name: ty.name().to_string(),
        properties: ty
            .properties()
            .map(|property| PropertyDescriptor {
                name: property.name.clone(),
                ty: property.ty.to_string(),
                mutable: property.mutable,
            })
            .collect(),
        functions: ty
            .functions()
            .map(|function| FunctionDescriptor {
                name: function.name.clone(),
                params: function
                    .params
                    .iter()
                    .map(|param| ParameterDescriptor {
                        name: param.name.clone(),
                        ty: param.ty.to_string(),
                    })
                    .collect(),
                configures: function.configured_type().map(|receiver| receiver.to_string()),
                returns: match &function.semantics {
                    FunctionSemantics::Plain { returns } => returns.to_string(),
                    FunctionSemantics::Configuring { .. } => default_return_type(),
                },
            })
            .collect(),
    }
}

/// Load and build a schema from a TOML descriptor file.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    SchemaDescriptor::load(path)?.build()
}
