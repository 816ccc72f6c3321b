use {
    crate::error::TypeMismatch,
    strata_core::{Backend, NativeView},
};

/// Kind of a bindable resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    /// Vertex buffer.
    VertexBuffer,
    /// Index buffer.
    IndexBuffer,
    /// Constant buffer.
    ConstantBuffer,
    /// Read-write structured buffer.
    StorageBuffer,
    /// Stream output target.
    StreamOutputBuffer,
    /// Texture read by shaders.
    Texture,
    /// Sampler.
    Sampler,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(match self {
            ResourceKind::VertexBuffer => "vertex buffer",
            ResourceKind::IndexBuffer => "index buffer",
            ResourceKind::ConstantBuffer => "constant buffer",
            ResourceKind::StorageBuffer => "storage buffer",
            ResourceKind::StreamOutputBuffer => "stream output buffer",
            ResourceKind::Texture => "texture",
            ResourceKind::Sampler => "sampler",
        })
    }
}

/// Resource handle tagged with its kind.
///
/// Carries the view the backend binds it through.
/// Doesn't own the resource.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = "", feature_allow_slow_enum = "true")
)]
pub enum Resource<B: Backend> {
    /// Vertex buffer.
    VertexBuffer(B::VertexBufferView),
    /// Index buffer.
    IndexBuffer(B::IndexBufferView),
    /// Constant buffer.
    ConstantBuffer(B::ConstantBufferView),
    /// Read-write structured buffer.
    StorageBuffer(B::StorageBufferView),
    /// Stream output target.
    StreamOutputBuffer(B::StreamOutputView),
    /// Texture read by shaders.
    Texture(B::TextureView),
    /// Sampler.
    Sampler(B::SamplerView),
}

macro_rules! downcast {
    ($(#[$meta:meta])* $name:ident, $variant:ident, $view:ident) => {
        $(#[$meta])*
        pub fn $name(&self) -> Result<B::$view, TypeMismatch> {
            match *self {
                Resource::$variant(view) => Ok(view),
                _ => Err(TypeMismatch {
                    expected: ResourceKind::$variant,
                    found: self.kind(),
                }),
            }
        }
    };
}

impl<B> Resource<B>
where
    B: Backend,
{
    /// Kind of the resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::VertexBuffer(_) => ResourceKind::VertexBuffer,
            Resource::IndexBuffer(_) => ResourceKind::IndexBuffer,
            Resource::ConstantBuffer(_) => ResourceKind::ConstantBuffer,
            Resource::StorageBuffer(_) => ResourceKind::StorageBuffer,
            Resource::StreamOutputBuffer(_) => ResourceKind::StreamOutputBuffer,
            Resource::Texture(_) => ResourceKind::Texture,
            Resource::Sampler(_) => ResourceKind::Sampler,
        }
    }

    /// Check if the view refers to nothing.
    pub fn is_null(&self) -> bool {
        match self {
            Resource::VertexBuffer(view) => view.is_null(),
            Resource::IndexBuffer(view) => view.is_null(),
            Resource::ConstantBuffer(view) => view.is_null(),
            Resource::StorageBuffer(view) => view.is_null(),
            Resource::StreamOutputBuffer(view) => view.is_null(),
            Resource::Texture(view) => view.is_null(),
            Resource::Sampler(view) => view.is_null(),
        }
    }

    downcast!(
        /// Get vertex buffer view.
        as_vertex_buffer, VertexBuffer, VertexBufferView
    );
    downcast!(
        /// Get index buffer view.
        as_index_buffer, IndexBuffer, IndexBufferView
    );
    downcast!(
        /// Get constant buffer view.
        as_constant_buffer, ConstantBuffer, ConstantBufferView
    );
    downcast!(
        /// Get storage buffer view.
        as_storage_buffer, StorageBuffer, StorageBufferView
    );
    downcast!(
        /// Get stream output view.
        as_stream_output_buffer, StreamOutputBuffer, StreamOutputView
    );
    downcast!(
        /// Get texture view.
        as_texture, Texture, TextureView
    );
    downcast!(
        /// Get sampler view.
        as_sampler, Sampler, SamplerView
    );
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        strata_core::{
            handle::{BufferPtr, CpuDescriptorHandle, ShaderResourceViewPtr},
            Dx11, Dx12,
        },
    };

    #[test]
    fn checked_downcast() {
        let texture = Resource::<Dx11>::Texture(ShaderResourceViewPtr::from_raw(1));
        assert_eq!(texture.as_texture(), Ok(ShaderResourceViewPtr::from_raw(1)));
        assert_eq!(
            texture.as_constant_buffer(),
            Err(TypeMismatch {
                expected: ResourceKind::ConstantBuffer,
                found: ResourceKind::Texture,
            })
        );
    }

    #[test]
    fn equality_compares_kind_and_view() {
        let texture = Resource::<Dx11>::Texture(ShaderResourceViewPtr::from_raw(1));
        assert_eq!(texture, Resource::Texture(ShaderResourceViewPtr::from_raw(1)));
        assert_ne!(texture, Resource::Texture(ShaderResourceViewPtr::from_raw(2)));
        let view = CpuDescriptorHandle { ptr: 0x40 };
        assert_ne!(
            Resource::<Dx12>::ConstantBuffer(view),
            Resource::Texture(view)
        );
    }

    #[test]
    fn null_views() {
        assert!(Resource::<Dx11>::ConstantBuffer(BufferPtr::NULL).is_null());
        assert!(!Resource::<Dx11>::ConstantBuffer(BufferPtr::from_raw(3)).is_null());
    }
}
