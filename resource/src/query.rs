//! Queries and predicates.

use strata_core::{Backend, NativeView, QueryType};

/// Query created by an external collaborator.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Copy(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct Query<B: Backend> {
    raw: B::QueryView,
    ty: QueryType,
}

impl<B> Query<B>
where
    B: Backend,
{
    /// Wrap native query of type `ty`.
    pub fn new(raw: B::QueryView, ty: QueryType) -> Self {
        Query { raw, ty }
    }

    /// Native query.
    pub fn raw(&self) -> B::QueryView {
        self.raw
    }

    /// Type of the query.
    pub fn query_type(&self) -> QueryType {
        self.ty
    }

    /// Check if the query was created as a predicate
    /// and can gate rendering.
    pub fn is_predicate(&self) -> bool {
        self.ty == QueryType::AnySamplesPassed && !self.raw.is_null()
    }
}
