//! Types shared across strata.

/// Maximum number of viewports and scissor rectangles bound at once.
/// Matches `D3D12_VIEWPORT_AND_SCISSORRECT_OBJECT_COUNT_PER_PIPELINE`.
pub const MAX_VIEWPORTS: usize = 16;

/// Maximum number of simultaneously bound render targets.
pub const MAX_RENDER_TARGETS: usize = 8;

/// RGBA color with floating point components.
pub type ColorRgba = [f32; 4];

/// Viewport with depth range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
    /// Minimum depth.
    pub min_depth: f32,
    /// Maximum depth.
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport with full depth range `0.0 .. 1.0`.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Viewport {
            x,
            y,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// Scissor rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct Scissor {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Scissor {
    /// Create scissor rectangle.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Scissor {
            x,
            y,
            width,
            height,
        }
    }
}

/// Size of a surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent2d {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

bitflags::bitflags! {
    /// Buffers to clear.
    #[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
    pub struct ClearFlags: u32 {
        /// Color buffers.
        const COLOR = 0x1;
        /// Depth buffer.
        const DEPTH = 0x2;
        /// Stencil buffer.
        const STENCIL = 0x4;
        /// Depth and stencil buffers.
        const DEPTH_STENCIL = Self::DEPTH.bits | Self::STENCIL.bits;
        /// All buffers.
        const ALL = Self::COLOR.bits | Self::DEPTH.bits | Self::STENCIL.bits;
    }
}

bitflags::bitflags! {
    /// Flags of a native depth-stencil clear call.
    pub struct DepthStencilClearFlags: u32 {
        /// `D3D*_CLEAR_DEPTH`
        const DEPTH = 0x1;
        /// `D3D*_CLEAR_STENCIL`
        const STENCIL = 0x2;
    }
}

impl DepthStencilClearFlags {
    /// Depth-stencil part of the clear flags.
    pub fn from_clear_flags(flags: ClearFlags) -> Self {
        let mut result = DepthStencilClearFlags::empty();
        if flags.contains(ClearFlags::DEPTH) {
            result |= DepthStencilClearFlags::DEPTH;
        }
        if flags.contains(ClearFlags::STENCIL) {
            result |= DepthStencilClearFlags::STENCIL;
        }
        result
    }
}

bitflags::bitflags! {
    /// Set of shader stages.
    #[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
    pub struct ShaderStageFlags: u32 {
        /// Vertex shader.
        const VERTEX = 0x1;
        /// Hull (tessellation control) shader.
        const HULL = 0x2;
        /// Domain (tessellation evaluation) shader.
        const DOMAIN = 0x4;
        /// Geometry shader.
        const GEOMETRY = 0x8;
        /// Pixel shader.
        const PIXEL = 0x10;
        /// Compute shader.
        const COMPUTE = 0x20;
        /// All stages of the graphics pipeline.
        const GRAPHICS = Self::VERTEX.bits
            | Self::HULL.bits
            | Self::DOMAIN.bits
            | Self::GEOMETRY.bits
            | Self::PIXEL.bits;
        /// All stages.
        const ALL = Self::GRAPHICS.bits | Self::COMPUTE.bits;
    }
}

/// Single shader stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Hull shader.
    Hull,
    /// Domain shader.
    Domain,
    /// Geometry shader.
    Geometry,
    /// Pixel shader.
    Pixel,
    /// Compute shader.
    Compute,
}

impl ShaderStage {
    /// Number of shader stages.
    pub const COUNT: usize = 6;

    /// All stages in pipeline order.
    pub const ALL: [ShaderStage; ShaderStage::COUNT] = [
        ShaderStage::Vertex,
        ShaderStage::Hull,
        ShaderStage::Domain,
        ShaderStage::Geometry,
        ShaderStage::Pixel,
        ShaderStage::Compute,
    ];

    /// Position of the stage in pipeline order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Flag for this stage.
    pub fn flag(self) -> ShaderStageFlags {
        match self {
            ShaderStage::Vertex => ShaderStageFlags::VERTEX,
            ShaderStage::Hull => ShaderStageFlags::HULL,
            ShaderStage::Domain => ShaderStageFlags::DOMAIN,
            ShaderStage::Geometry => ShaderStageFlags::GEOMETRY,
            ShaderStage::Pixel => ShaderStageFlags::PIXEL,
            ShaderStage::Compute => ShaderStageFlags::COMPUTE,
        }
    }
}

impl ShaderStageFlags {
    /// Iterate over stages in the set, in pipeline order.
    pub fn stages(self) -> impl Iterator<Item = ShaderStage> {
        ShaderStage::ALL
            .iter()
            .cloned()
            .filter(move |stage| self.contains(stage.flag()))
    }
}

/// Primitive topology of the input assembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveTopology {
    /// Point list.
    PointList,
    /// Line list.
    LineList,
    /// Line strip.
    LineStrip,
    /// Triangle list.
    TriangleList,
    /// Triangle strip.
    TriangleStrip,
    /// Line list with adjacency.
    LineListAdjacency,
    /// Triangle list with adjacency.
    TriangleListAdjacency,
    /// Patch list with the given number of control points (1..=32).
    PatchList(u8),
}

/// Usage state of a GPU resource tracked by the explicit model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceState {
    /// Presentable by the swap chain. Same bits as the common state.
    Present,
    /// Bound as render target.
    RenderTarget,
    /// Source of a multisample resolve.
    ResolveSource,
    /// Destination of a multisample resolve.
    ResolveDest,
    /// Read by shaders.
    ShaderResource,
    /// Depth-stencil writes.
    DepthWrite,
    /// Copy source.
    CopySource,
    /// Copy destination.
    CopyDest,
}

/// Format of index buffer elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum IndexFormat {
    /// 16 bit indices.
    U16,
    /// 32 bit indices.
    U32,
}

/// Raw `DXGI_FORMAT` value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct DxgiFormat(pub u32);

impl DxgiFormat {
    /// `DXGI_FORMAT_UNKNOWN`
    pub const UNKNOWN: Self = DxgiFormat(0);
    /// `DXGI_FORMAT_R8G8B8A8_UNORM`
    pub const R8G8B8A8_UNORM: Self = DxgiFormat(28);
    /// `DXGI_FORMAT_B8G8R8A8_UNORM`
    pub const B8G8R8A8_UNORM: Self = DxgiFormat(87);
    /// `DXGI_FORMAT_D24_UNORM_S8_UINT`
    pub const D24_UNORM_S8_UINT: Self = DxgiFormat(45);
}

/// Kind of a GPU query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum QueryType {
    /// Number of samples that passed depth and stencil tests.
    SamplesPassed,
    /// Non-zero if any sample passed depth and stencil tests.
    AnySamplesPassed,
    /// Number of primitives written by stream output.
    StreamOutPrimitivesWritten,
    /// GPU timestamp.
    Timestamp,
}

/// Mode of predicated rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderConditionMode {
    /// Wait for the query result, render if it is non-zero.
    Wait,
    /// Don't wait, render if the result is not yet available.
    NoWait,
    /// Wait for the query result, render if it is zero.
    WaitInverted,
    /// Don't wait, inverted condition.
    NoWaitInverted,
}

impl RenderConditionMode {
    /// Check if the mode renders on zero result.
    pub fn is_inverted(self) -> bool {
        match self {
            RenderConditionMode::WaitInverted | RenderConditionMode::NoWaitInverted => true,
            _ => false,
        }
    }
}
