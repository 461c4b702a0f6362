//! Schema model for the declara resolver.
//!
//! A schema is the closed set of types, properties and functions a document
//! may reference. Starting from a root receiver type, each type declares:
//! - properties, with a value type and a mutability flag
//! - functions, with an ordered parameter list and either plain or
//!   block-configuring semantics
//!
//! The resolver only sees schemas through the [`SchemaModel`] trait. How a
//! schema is populated is a separate concern: [`SchemaBuilder`] validates
//! declarations into a [`Schema`], and [`SchemaDescriptor`] is one concrete
//! source of declarations, read from TOML.

mod builder;
mod descriptor;
mod error;
mod schema;
mod types;

pub use builder::{SchemaBuilder, TypeBuilder};
pub use descriptor::{
    load_schema, FunctionDescriptor, ParameterDescriptor, PropertyDescriptor, SchemaDescriptor,
    TypeDescriptor,
};
pub use error::SchemaError;
pub use schema::{Schema, SchemaModel};
pub use types::{
    Function, FunctionSemantics, Parameter, PrimitiveType, Property, SchemaType, TypeName, TypeRef,
};
