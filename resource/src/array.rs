use {
    crate::{
        error::{AggregateError, TypeMismatch},
        resources::{Resource, ResourceKind},
    },
    smallvec::SmallVec,
    strata_core::{Backend, NativeView},
};

/// Ordered views of homogeneous resources.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewArray<V> {
    views: SmallVec<[V; 8]>,
}

impl<V> ViewArray<V>
where
    V: NativeView,
{
    /// Views in input order.
    pub fn views(&self) -> &[V] {
        &self.views
    }

    /// Number of views. Never zero.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Always false. Arrays are never empty.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Aggregate of resources of one kind, bound to consecutive slots with a single call.
///
/// Built once and never modified.
/// The aggregate holds views, not the resources: destroying any of them
/// invalidates the aggregate without it noticing.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = "", feature_allow_slow_enum = "true")
)]
pub enum ResourceArray<B: Backend> {
    /// Vertex buffers.
    VertexBuffers(ViewArray<B::VertexBufferView>),
    /// Constant buffers.
    ConstantBuffers(ViewArray<B::ConstantBufferView>),
    /// Storage buffers.
    StorageBuffers(ViewArray<B::StorageBufferView>),
    /// Stream output targets.
    StreamOutputBuffers(ViewArray<B::StreamOutputView>),
    /// Textures.
    Textures(ViewArray<B::TextureView>),
    /// Samplers.
    Samplers(ViewArray<B::SamplerView>),
}

fn collect<B, V>(
    resources: &[Resource<B>],
    view: impl Fn(&Resource<B>) -> Result<V, TypeMismatch>,
) -> Result<ViewArray<V>, AggregateError>
where
    B: Backend,
{
    let views = resources
        .iter()
        .enumerate()
        .map(|(index, resource)| {
            view(resource).map_err(|mismatch| AggregateError::IncompatibleKind {
                index,
                expected: mismatch.expected,
                found: mismatch.found,
            })
        })
        .collect::<Result<_, _>>()?;
    Ok(ViewArray { views })
}

macro_rules! array_downcast {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $kind:ident, $view:ident) => {
        $(#[$meta])*
        pub fn $name(&self) -> Result<&[B::$view], TypeMismatch> {
            match self {
                ResourceArray::$variant(array) => Ok(array.views()),
                _ => Err(TypeMismatch {
                    expected: ResourceKind::$kind,
                    found: self.kind(),
                }),
            }
        }
    };
}

impl<B> ResourceArray<B>
where
    B: Backend,
{
    /// Aggregate `resources`, keeping their order.
    ///
    /// All resources must be non-null and of the same kind as the first one.
    pub fn new(resources: &[Resource<B>]) -> Result<Self, AggregateError> {
        let first = resources.first().ok_or(AggregateError::Empty)?;

        if let Some(index) = resources.iter().position(Resource::is_null) {
            return Err(AggregateError::NullView { index });
        }

        let array = match first.kind() {
            ResourceKind::VertexBuffer => {
                ResourceArray::VertexBuffers(collect(resources, Resource::as_vertex_buffer)?)
            }
            ResourceKind::ConstantBuffer => {
                ResourceArray::ConstantBuffers(collect(resources, Resource::as_constant_buffer)?)
            }
            ResourceKind::StorageBuffer => {
                ResourceArray::StorageBuffers(collect(resources, Resource::as_storage_buffer)?)
            }
            ResourceKind::StreamOutputBuffer => ResourceArray::StreamOutputBuffers(collect(
                resources,
                Resource::as_stream_output_buffer,
            )?),
            ResourceKind::Texture => {
                ResourceArray::Textures(collect(resources, Resource::as_texture)?)
            }
            ResourceKind::Sampler => {
                ResourceArray::Samplers(collect(resources, Resource::as_sampler)?)
            }
            kind @ ResourceKind::IndexBuffer => {
                return Err(AggregateError::NotAggregatable(kind));
            }
        };

        log::trace!("Aggregated {} {} views", resources.len(), first.kind());
        Ok(array)
    }

    /// Kind of the aggregated resources.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceArray::VertexBuffers(_) => ResourceKind::VertexBuffer,
            ResourceArray::ConstantBuffers(_) => ResourceKind::ConstantBuffer,
            ResourceArray::StorageBuffers(_) => ResourceKind::StorageBuffer,
            ResourceArray::StreamOutputBuffers(_) => ResourceKind::StreamOutputBuffer,
            ResourceArray::Textures(_) => ResourceKind::Texture,
            ResourceArray::Samplers(_) => ResourceKind::Sampler,
        }
    }

    /// Number of aggregated resources.
    pub fn len(&self) -> usize {
        match self {
            ResourceArray::VertexBuffers(array) => array.len(),
            ResourceArray::ConstantBuffers(array) => array.len(),
            ResourceArray::StorageBuffers(array) => array.len(),
            ResourceArray::StreamOutputBuffers(array) => array.len(),
            ResourceArray::Textures(array) => array.len(),
            ResourceArray::Samplers(array) => array.len(),
        }
    }

    /// Always false. Arrays are never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resource at `index`.
    pub fn get(&self, index: usize) -> Option<Resource<B>> {
        match self {
            ResourceArray::VertexBuffers(array) => {
                array.views.get(index).cloned().map(Resource::VertexBuffer)
            }
            ResourceArray::ConstantBuffers(array) => {
                array.views.get(index).cloned().map(Resource::ConstantBuffer)
            }
            ResourceArray::StorageBuffers(array) => {
                array.views.get(index).cloned().map(Resource::StorageBuffer)
            }
            ResourceArray::StreamOutputBuffers(array) => array
                .views
                .get(index)
                .cloned()
                .map(Resource::StreamOutputBuffer),
            ResourceArray::Textures(array) => {
                array.views.get(index).cloned().map(Resource::Texture)
            }
            ResourceArray::Samplers(array) => {
                array.views.get(index).cloned().map(Resource::Sampler)
            }
        }
    }

    /// Iterate over aggregated resources in input order.
    pub fn iter(&self) -> impl Iterator<Item = Resource<B>> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }

    array_downcast!(
        /// Get vertex buffer views.
        as_vertex_buffers, VertexBuffers, VertexBuffer, VertexBufferView
    );
    array_downcast!(
        /// Get constant buffer views.
        as_constant_buffers, ConstantBuffers, ConstantBuffer, ConstantBufferView
    );
    array_downcast!(
        /// Get storage buffer views.
        as_storage_buffers, StorageBuffers, StorageBuffer, StorageBufferView
    );
    array_downcast!(
        /// Get stream output views.
        as_stream_output_buffers, StreamOutputBuffers, StreamOutputBuffer, StreamOutputView
    );
    array_downcast!(
        /// Get texture views.
        as_textures, Textures, Texture, TextureView
    );
    array_downcast!(
        /// Get sampler views.
        as_samplers, Samplers, Sampler, SamplerView
    );
}
