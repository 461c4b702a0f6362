//! Resolution results.
//!
//! A [`ResolutionResult`] mirrors the block structure of the document it was
//! produced from: configuring calls carry the result of their trailing block
//! as a nested result. Every resolved entity borrows the schema elements it
//! was bound to and keeps the [`Origin`] of the statement it came from.

use declara_schema::{Function, PrimitiveType, Property, SchemaType, TypeRef};
use declara_source::Origin;
use declara_syntax::Literal;

use crate::error::ResolutionError;

/// Everything accepted and resolved at one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult<'s> {
    /// The receiver type this scope was resolved against.
    pub scope: &'s SchemaType,
    /// Assignments in document order.
    pub assignments: Vec<ResolvedAssignment<'s>>,
    /// Calls in document order.
    pub calls: Vec<ResolvedFunctionCall<'s>>,
    /// Errors of statements left out at this scope under
    /// [`ErrorPolicy::SkipStatement`](crate::ErrorPolicy::SkipStatement).
    pub skipped: Vec<ResolutionError>,
}

impl<'s> ResolutionResult<'s> {
    pub fn new(scope: &'s SchemaType) -> Self {
        Self {
            scope,
            assignments: Vec::new(),
            calls: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Number of resolved statements at this scope. Skipped statements are
    /// not counted.
    pub fn len(&self) -> usize {
        self.assignments.len() + self.calls.len()
    }

    /// Whether no statement was resolved at this scope. A scope whose every
    /// statement was skipped is empty; its errors stay in `skipped`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls at this scope to the function named `name`.
    pub fn calls_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ResolvedFunctionCall<'s>> + 'a {
        self.calls.iter().filter(move |call| call.function.name == name)
    }

    /// Every assignment in this result and in all nested results, depth
    /// first, with the assignments of a scope before those of its calls.
    pub fn all_assignments(&self) -> Vec<&ResolvedAssignment<'s>> {
        let mut assignments = Vec::new();
        self.collect_assignments(&mut assignments);
        assignments
    }

    fn collect_assignments<'a>(&'a self, out: &mut Vec<&'a ResolvedAssignment<'s>>) {
        out.extend(self.assignments.iter());
        for nested in self.nested_results() {
            nested.collect_assignments(out);
        }
    }

    /// Every call in this result and in all nested results, depth first.
    pub fn all_calls(&self) -> Vec<&ResolvedFunctionCall<'s>> {
        let mut calls = Vec::new();
        self.collect_calls(&mut calls);
        calls
    }

    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a ResolvedFunctionCall<'s>>) {
        for call in &self.calls {
            out.push(call);
            if let Some(nested) = &call.nested {
                nested.collect_calls(out);
            }
        }
    }

    /// Every skipped error in this result and in all nested results.
    pub fn all_skipped(&self) -> Vec<&ResolutionError> {
        let mut skipped: Vec<&ResolutionError> = self.skipped.iter().collect();
        for nested in self.nested_results() {
            skipped.extend(nested.all_skipped());
        }
        skipped
    }

    fn nested_results(&self) -> impl Iterator<Item = &ResolutionResult<'s>> {
        self.calls.iter().filter_map(|call| call.nested.as_ref())
    }

    /// Origins of the statements resolved at this scope, in document order.
    pub fn statement_origins(&self) -> Vec<&Origin> {
        let mut origins: Vec<&Origin> = self
            .assignments
            .iter()
            .map(|assignment| &assignment.origin)
            .chain(self.calls.iter().map(|call| &call.origin))
            .collect();
        origins.sort_by_key(|origin| origin.offset());
        origins
    }

    /// The source text of the accepted statements at this scope, one per
    /// line, in document order.
    pub fn accepted_source(&self) -> String {
        self.statement_origins()
            .iter()
            .map(|origin| origin.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An assignment bound to the property it sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment<'s> {
    /// Receiver steps walked through to reach the assigned property, left to
    /// right.
    pub receiver: Vec<ReceiverStep<'s>>,
    pub property: &'s Property,
    pub value: ResolvedExpr<'s>,
    pub origin: Origin,
}

impl<'s> ResolvedAssignment<'s> {
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn text(&self) -> &str {
        self.origin.text()
    }

    /// The assigned chain, e.g. `n1.x` or `id("a").version`.
    pub fn target(&self) -> String {
        self.receiver
            .iter()
            .map(ReceiverStep::render)
            .chain(std::iter::once(self.property.name.clone()))
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// A call bound to its function, with the nested result of its trailing
/// block when the function configures a receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFunctionCall<'s> {
    /// Receiver steps walked through to reach the function's receiver.
    pub receiver: Vec<ReceiverStep<'s>>,
    pub function: &'s Function,
    pub arguments: Vec<ResolvedExpr<'s>>,
    pub nested: Option<ResolutionResult<'s>>,
    pub origin: Origin,
}

impl<'s> ResolvedFunctionCall<'s> {
    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn text(&self) -> &str {
        self.origin.text()
    }
}

/// One step of a resolved receiver chain.
///
/// Steps are flattened left to right: a call step's own receiver is the
/// steps before it, so its `receiver` is left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiverStep<'s> {
    /// A property whose value is walked into.
    Property(&'s Property),
    /// A plain call whose result is walked into.
    Call(ResolvedFunctionCall<'s>),
}

impl<'s> ReceiverStep<'s> {
    /// The property or function name of the step.
    pub fn name(&self) -> &str {
        match self {
            ReceiverStep::Property(property) => &property.name,
            ReceiverStep::Call(call) => call.name(),
        }
    }

    /// The schema type the step leads into.
    pub fn ty(&self) -> TypeRef {
        match self {
            ReceiverStep::Property(property) => property.ty.clone(),
            ReceiverStep::Call(call) => call.function.return_type(),
        }
    }

    /// How the step reads within a chain: `n1` or `id("a")`.
    fn render(&self) -> String {
        match self {
            ReceiverStep::Property(property) => property.name.clone(),
            ReceiverStep::Call(call) => {
                let arguments: Vec<_> = call.arguments.iter().map(ResolvedExpr::text).collect();
                format!("{}({})", call.name(), arguments.join(", "))
            }
        }
    }
}

/// A resolved value: the right-hand side of an assignment or a call argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedExpr<'s> {
    Literal {
        value: Literal,
        origin: Origin,
    },
    PropertyRead {
        receiver: Vec<ReceiverStep<'s>>,
        property: &'s Property,
        origin: Origin,
    },
    Call(Box<ResolvedFunctionCall<'s>>),
}

impl<'s> ResolvedExpr<'s> {
    pub fn origin(&self) -> &Origin {
        match self {
            ResolvedExpr::Literal { origin, .. } | ResolvedExpr::PropertyRead { origin, .. } => origin,
            ResolvedExpr::Call(call) => &call.origin,
        }
    }

    pub fn text(&self) -> &str {
        self.origin().text()
    }

    /// The type of the value.
    pub fn ty(&self) -> TypeRef {
        match self {
            ResolvedExpr::Literal { value, .. } => TypeRef::Primitive(literal_type(value)),
            ResolvedExpr::PropertyRead { property, .. } => property.ty.clone(),
            ResolvedExpr::Call(call) => call.function.return_type(),
        }
    }
}

fn literal_type(literal: &Literal) -> PrimitiveType {
    match literal {
        Literal::Int(_) => PrimitiveType::Int,
        Literal::String(_) => PrimitiveType::String,
        Literal::Bool(_) => PrimitiveType::Boolean,
    }
}
