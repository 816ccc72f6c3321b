use {crate::resources::ResourceKind, failure::Fail};

/// Resource of one kind was used where another kind is required.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Fail)]
#[fail(display = "Expected {} resource, found {}", expected, found)]
pub struct TypeMismatch {
    /// Kind required by the call.
    pub expected: ResourceKind,

    /// Kind of the resource passed.
    pub found: ResourceKind,
}

/// Error of building a [`ResourceArray`](struct.ResourceArray.html).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Fail)]
pub enum AggregateError {
    /// No resources were given.
    #[fail(display = "Can't aggregate zero resources")]
    Empty,

    /// Resource refers to no native view.
    #[fail(display = "Resource {} has null view", index)]
    NullView {
        /// Position of the resource in the input.
        index: usize,
    },

    /// Resource kind differs from the kind of the first resource.
    #[fail(
        display = "Resource {} is {} while the array holds {}",
        index, found, expected
    )]
    IncompatibleKind {
        /// Position of the resource in the input.
        index: usize,
        /// Kind of the first resource.
        expected: ResourceKind,
        /// Kind of this resource.
        found: ResourceKind,
    },

    /// Resources of this kind are never bound as arrays.
    #[fail(display = "{} resources can't be aggregated", _0)]
    NotAggregatable(ResourceKind),
}

/// Error of building a [`RenderTarget`](target/struct.RenderTarget.html).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Fail)]
pub enum RenderTargetError {
    /// Neither color nor depth-stencil views were given.
    #[fail(display = "Render target has no attachments")]
    NoAttachments,

    /// More color views than can be bound at once.
    #[fail(display = "{} color attachments exceed the limit of {}", count, limit)]
    TooManyColorAttachments {
        /// Number of views given.
        count: usize,
        /// Binding limit.
        limit: usize,
    },

    /// Color view refers to nothing.
    #[fail(display = "Color attachment {} has null view", index)]
    NullView {
        /// Position of the view.
        index: usize,
    },

    /// Depth-stencil view refers to nothing.
    #[fail(display = "Depth-stencil attachment has null view")]
    NullDepthStencil,
}
