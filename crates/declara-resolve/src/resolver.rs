//! The resolver: binds statements to schema elements, scope by scope.

use declara_schema::{Function, FunctionSemantics, Property, SchemaModel, SchemaType, TypeName, TypeRef};
use declara_syntax::{Assignment, Block, Expr, FunctionCall, Ident, PropertyAccess, Statement};

use crate::error::{ReferenceKind, ResolutionError};
use crate::filter::{AcceptAll, ResolutionContext, StatementFilter};
use crate::options::{ErrorPolicy, ResolverOptions};
use crate::result::{ReceiverStep, ResolutionResult, ResolvedAssignment, ResolvedExpr, ResolvedFunctionCall};

type ResolveResult<T> = Result<T, ResolutionError>;

/// Resolves document blocks against a schema.
///
/// A resolver holds no state besides its schema reference and options, so
/// one instance can resolve any number of documents, and instances over the
/// same schema can run on several threads at once.
#[derive(Debug)]
pub struct Resolver<'s, S: SchemaModel + ?Sized> {
    schema: &'s S,
    options: ResolverOptions,
}

impl<'s, S: SchemaModel + ?Sized> Clone for Resolver<'s, S> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            options: self.options.clone(),
        }
    }
}

/// A statement bound to the schema.
enum Resolved<'s> {
    Assignment(ResolvedAssignment<'s>),
    Call(ResolvedFunctionCall<'s>),
}

impl<'s, S: SchemaModel + ?Sized> Resolver<'s, S> {
    pub fn new(schema: &'s S) -> Self {
        Self {
            schema,
            options: ResolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve `block` against the schema's root type, accepting every
    /// statement.
    pub fn resolve(&self, block: &Block) -> ResolveResult<ResolutionResult<'s>> {
        self.resolve_filtered(block, &AcceptAll)
    }

    /// Resolve `block` against the schema's root type, consulting `filter`
    /// for every statement reached.
    pub fn resolve_filtered(
        &self,
        block: &Block,
        filter: &dyn StatementFilter,
    ) -> ResolveResult<ResolutionResult<'s>> {
        self.resolve_in(block, self.schema.root_type(), filter)
    }

    /// Resolve `block` against an arbitrary receiver type of the schema.
    pub fn resolve_in(
        &self,
        block: &Block,
        scope: &'s SchemaType,
        filter: &dyn StatementFilter,
    ) -> ResolveResult<ResolutionResult<'s>> {
        log::debug!(
            "resolving {} statements against `{}` ({:?})",
            block.len(),
            scope.name(),
            self.options.error_policy
        );
        let mut path = Vec::new();
        let result = self.resolve_block(block, scope, &mut path, filter)?;
        log::debug!(
            "resolved {} top-level statements, {} skipped",
            result.len(),
            result.all_skipped().len()
        );
        Ok(result)
    }

    fn resolve_block<'b>(
        &self,
        block: &'b Block,
        scope: &'s SchemaType,
        path: &mut Vec<&'b str>,
        filter: &dyn StatementFilter,
    ) -> ResolveResult<ResolutionResult<'s>> {
        let mut result = ResolutionResult::new(scope);

        for statement in &block.statements {
            let context = ResolutionContext::new(scope, path.as_slice());
            if !filter.accepts(statement, &context) {
                log::trace!(
                    "filtered out {} `{}` at depth {}",
                    statement.kind_name(),
                    statement.origin().text(),
                    path.len()
                );
                continue;
            }

            match self.resolve_statement(statement, scope, path, filter) {
                Ok(Resolved::Assignment(assignment)) => result.assignments.push(assignment),
                Ok(Resolved::Call(call)) => result.calls.push(call),
                Err(error) => match self.options.error_policy {
                    ErrorPolicy::Abort => return Err(error),
                    ErrorPolicy::SkipStatement => {
                        log::debug!("skipping `{}`: {}", statement.origin().text(), error);
                        result.skipped.push(error);
                    }
                },
            }
        }

        Ok(result)
    }

    fn resolve_statement<'b>(
        &self,
        statement: &'b Statement,
        scope: &'s SchemaType,
        path: &mut Vec<&'b str>,
        filter: &dyn StatementFilter,
    ) -> ResolveResult<Resolved<'s>> {
        log::trace!("resolving {} `{}`", statement.kind_name(), statement.origin().text());
        match statement {
            Statement::Assignment(assignment) => self.resolve_assignment(assignment, scope).map(Resolved::Assignment),
            Statement::Call(call) => self.resolve_call(call, scope, path, filter).map(Resolved::Call),
            Statement::Expression(expr) => Err(ResolutionError::UnsupportedStatement {
                kind: statement.kind_name(),
                scope: scope.name().to_string(),
                span: expr.origin().span(),
            }),
        }
    }

    fn resolve_assignment(
        &self,
        assignment: &Assignment,
        scope: &'s SchemaType,
    ) -> ResolveResult<ResolvedAssignment<'s>> {
        let (receiver, property) = self.resolve_access(&assignment.lhs, scope)?;

        if !property.mutable {
            return Err(ResolutionError::SchemaMismatch {
                message: format!("`{}` is read-only and cannot be assigned", assignment.lhs),
                span: assignment.lhs.origin.span(),
            });
        }

        let value = self.resolve_expr(&assignment.rhs, scope)?;
        let found = value.ty();
        if found != property.ty {
            return Err(ResolutionError::SchemaMismatch {
                message: format!(
                    "`{}` expects a value of type `{}`, found `{}`",
                    assignment.lhs, property.ty, found
                ),
                span: assignment.rhs.origin().span(),
            });
        }

        Ok(ResolvedAssignment {
            receiver,
            property,
            value,
            origin: assignment.origin.clone(),
        })
    }

    fn resolve_call<'b>(
        &self,
        call: &'b FunctionCall,
        scope: &'s SchemaType,
        path: &mut Vec<&'b str>,
        filter: &dyn StatementFilter,
    ) -> ResolveResult<ResolvedFunctionCall<'s>> {
        let (receiver, _, function) = self.resolve_callee(call, scope)?;
        let arguments = self.resolve_arguments(call, function, scope)?;

        let nested = match (&function.semantics, &call.block) {
            (FunctionSemantics::Configuring { receiver: configured }, Some(block)) => {
                let nested_scope = self.receiver_type(configured, &call.name)?;
                path.push(call.name());
                let nested = self.resolve_block(block, nested_scope, path, filter);
                path.pop();
                Some(nested?)
            }
            (FunctionSemantics::Configuring { receiver: configured }, None) => {
                return Err(ResolutionError::SchemaMismatch {
                    message: format!(
                        "`{}` configures `{}` and must be called with a trailing block",
                        function.name, configured
                    ),
                    span: call.origin.span(),
                });
            }
            (FunctionSemantics::Plain { .. }, Some(block)) => {
                return Err(ResolutionError::SchemaMismatch {
                    message: format!("`{}` does not take a trailing block", function.name),
                    span: block.origin.span(),
                });
            }
            (FunctionSemantics::Plain { .. }, None) => None,
        };

        Ok(ResolvedFunctionCall {
            receiver,
            function,
            arguments,
            nested,
            origin: call.origin.clone(),
        })
    }

    /// A call in value position: only plain functions without a block.
    /// Also returns the type the function was found on.
    fn resolve_value_call(
        &self,
        call: &FunctionCall,
        scope: &'s SchemaType,
    ) -> ResolveResult<(ResolvedFunctionCall<'s>, &'s SchemaType)> {
        let (receiver, owner, function) = self.resolve_callee(call, scope)?;

        if let Some(configured) = function.configured_type() {
            return Err(ResolutionError::SchemaMismatch {
                message: format!(
                    "`{}` configures `{}` and cannot be used as a value",
                    function.name, configured
                ),
                span: call.origin.span(),
            });
        }
        if let Some(block) = &call.block {
            return Err(ResolutionError::SchemaMismatch {
                message: format!("`{}` does not take a trailing block", function.name),
                span: block.origin.span(),
            });
        }

        let arguments = self.resolve_arguments(call, function, scope)?;
        let resolved = ResolvedFunctionCall {
            receiver,
            function,
            arguments,
            nested: None,
            origin: call.origin.clone(),
        };
        Ok((resolved, owner))
    }

    /// Resolve the receiver of `call`, then its function on the type reached.
    fn resolve_callee(
        &self,
        call: &FunctionCall,
        scope: &'s SchemaType,
    ) -> ResolveResult<(Vec<ReceiverStep<'s>>, &'s SchemaType, &'s Function)> {
        let (receiver, owner) = self.resolve_receiver(call.receiver.as_ref(), scope)?;
        let function = self.lookup_function(owner, &call.name)?;
        Ok((receiver, owner, function))
    }

    fn resolve_arguments(
        &self,
        call: &FunctionCall,
        function: &'s Function,
        scope: &'s SchemaType,
    ) -> ResolveResult<Vec<ResolvedExpr<'s>>> {
        if call.args.len() != function.params.len() {
            return Err(ResolutionError::SchemaMismatch {
                message: format!(
                    "`{}` expects {} argument(s), found {}",
                    function.name,
                    function.params.len(),
                    call.args.len()
                ),
                span: call.origin.span(),
            });
        }

        call.args
            .iter()
            .zip(&function.params)
            .map(|(arg, param)| {
                let value = self.resolve_expr(arg, scope)?;
                let found = value.ty();
                if found != param.ty {
                    return Err(ResolutionError::SchemaMismatch {
                        message: format!(
                            "argument `{}` of `{}` expects `{}`, found `{}`",
                            param.name, function.name, param.ty, found
                        ),
                        span: arg.origin().span(),
                    });
                }
                Ok(value)
            })
            .collect()
    }

    fn resolve_expr(&self, expr: &Expr, scope: &'s SchemaType) -> ResolveResult<ResolvedExpr<'s>> {
        match expr {
            Expr::Literal(literal) => Ok(ResolvedExpr::Literal {
                value: literal.value.clone(),
                origin: literal.origin.clone(),
            }),
            Expr::Access(access) => {
                let (receiver, property) = self.resolve_access(access, scope)?;
                Ok(ResolvedExpr::PropertyRead {
                    receiver,
                    property,
                    origin: access.origin.clone(),
                })
            }
            Expr::Call(call) => {
                let (call, _) = self.resolve_value_call(call, scope)?;
                Ok(ResolvedExpr::Call(Box::new(call)))
            }
        }
    }

    /// Resolve a property access chain left to right.
    ///
    /// Returns the receiver steps walked through and the property named by
    /// the last segment.
    fn resolve_access(
        &self,
        access: &PropertyAccess,
        scope: &'s SchemaType,
    ) -> ResolveResult<(Vec<ReceiverStep<'s>>, &'s Property)> {
        let (receiver, owner) = self.resolve_receiver(access.receiver.as_deref(), scope)?;
        let property = self.lookup_property(owner, &access.name)?;
        Ok((receiver, property))
    }

    /// Resolve the receiver a member is looked up on.
    ///
    /// Without a receiver that is the current scope. Otherwise the receiver
    /// expression is walked left to right: every property read and every call
    /// along it must produce a receiver type, which is the scope of the next
    /// step. Returns the steps walked and the type reached.
    fn resolve_receiver(
        &self,
        receiver: Option<&Expr>,
        scope: &'s SchemaType,
    ) -> ResolveResult<(Vec<ReceiverStep<'s>>, &'s SchemaType)> {
        match receiver {
            None => Ok((Vec::new(), scope)),
            Some(Expr::Access(access)) => {
                let (mut steps, owner) = self.resolve_receiver(access.receiver.as_deref(), scope)?;
                let property = self.lookup_property(owner, &access.name)?;
                let next = self.walk_into(&property.ty, &access.name, owner)?;
                steps.push(ReceiverStep::Property(property));
                Ok((steps, next))
            }
            Some(Expr::Call(call)) => {
                let (mut resolved, owner) = self.resolve_value_call(call, scope)?;
                let next = self.walk_into(&resolved.function.return_type(), &call.name, owner)?;
                let mut steps = std::mem::take(&mut resolved.receiver);
                steps.push(ReceiverStep::Call(resolved));
                Ok((steps, next))
            }
            Some(Expr::Literal(literal)) => Err(ResolutionError::UnresolvedReference {
                name: literal.origin.text().to_string(),
                kind: ReferenceKind::Receiver,
                scope: scope.name().to_string(),
                span: literal.origin.span(),
            }),
        }
    }

    /// The receiver type that values of `ty`, produced by `segment` on
    /// `owner`, are walked into.
    fn walk_into(&self, ty: &TypeRef, segment: &Ident, owner: &'s SchemaType) -> ResolveResult<&'s SchemaType> {
        ty.as_named()
            .and_then(|name| self.schema.schema_type(name.as_str()))
            .ok_or_else(|| ResolutionError::UnresolvedReference {
                name: segment.name.clone(),
                kind: ReferenceKind::Receiver,
                scope: owner.name().to_string(),
                span: segment.origin.span(),
            })
    }

    fn lookup_property(&self, owner: &'s SchemaType, segment: &Ident) -> ResolveResult<&'s Property> {
        self.schema
            .property_of(owner.name().as_str(), segment.as_str())
            .ok_or_else(|| ResolutionError::UnresolvedReference {
                name: segment.name.clone(),
                kind: ReferenceKind::Property,
                scope: owner.name().to_string(),
                span: segment.origin.span(),
            })
    }

    fn lookup_function(&self, owner: &'s SchemaType, name: &Ident) -> ResolveResult<&'s Function> {
        self.schema
            .function_of(owner.name().as_str(), name.as_str())
            .ok_or_else(|| ResolutionError::UnresolvedReference {
                name: name.name.clone(),
                kind: ReferenceKind::Function,
                scope: owner.name().to_string(),
                span: name.origin.span(),
            })
    }

    /// The scope a configuring call's block resolves against.
    fn receiver_type(&self, name: &TypeName, call: &Ident) -> ResolveResult<&'s SchemaType> {
        self.schema
            .schema_type(name.as_str())
            .ok_or_else(|| ResolutionError::UnresolvedReference {
                name: name.to_string(),
                kind: ReferenceKind::Receiver,
                scope: call.name.clone(),
                span: call.origin.span(),
            })
    }
}

/// Resolve `block` against the root type of `schema` with the default
/// options, consulting `filter` for every statement reached.
///
/// # Example
///
/// ```
/// use declara_resolve::{resolve, RejectCalls};
/// use declara_schema::{PrimitiveType, SchemaBuilder, TypeBuilder};
///
/// let schema = SchemaBuilder::new("TopLevel")
///     .with_type(TypeBuilder::new("TopLevel").configuring("n1", "Nested").configuring("n2", "Nested"))
///     .with_type(TypeBuilder::new("Nested").mutable_property("x", PrimitiveType::Int))
///     .build()
///     .unwrap();
/// let document = declara_syntax::parse("build.dcl", "n1 { x = 4 }\nn2 { x = 5 }").unwrap();
///
/// let result = resolve(&schema, &document.block, &RejectCalls::named("n2")).unwrap();
/// assert_eq!(result.calls.len(), 1);
/// assert_eq!(result.all_assignments()[0].value.text(), "4");
/// ```
pub fn resolve<'s, S: SchemaModel + ?Sized>(
    schema: &'s S,
    block: &Block,
    filter: &dyn StatementFilter,
) -> ResolveResult<ResolutionResult<'s>> {
    Resolver::new(schema).resolve_filtered(block, filter)
}
