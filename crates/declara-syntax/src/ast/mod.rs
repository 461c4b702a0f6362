pub mod common;
pub mod expr;
pub mod stmt;

pub use common::{Ident, Literal, LiteralNode};
pub use expr::{Expr, FunctionCall, PropertyAccess};
pub use stmt::{Assignment, Block, Document, Statement};
