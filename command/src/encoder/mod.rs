//! Parameters of recorded commands.

mod clear;

pub use self::clear::*;

/// Parameters of a non-indexed draw.
///
/// Every simplified draw call fills the omitted ones from `Default`:
/// one instance, zero offsets.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawCommand {
    /// Number of vertices to draw.
    pub vertex_count: u32,

    /// Number of instances to draw.
    pub instance_count: u32,

    /// First vertex index.
    pub first_vertex: u32,

    /// First instance index.
    pub first_instance: u32,
}

impl Default for DrawCommand {
    fn default() -> Self {
        DrawCommand {
            vertex_count: 0,
            instance_count: 1,
            first_vertex: 0,
            first_instance: 0,
        }
    }
}

impl DrawCommand {
    /// Check if the command draws a single instance from the start.
    pub fn is_single_instance(&self) -> bool {
        self.instance_count == 1 && self.first_instance == 0
    }
}

/// Parameters of an indexed draw.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawIndexedCommand {
    /// Number of indices to draw.
    pub index_count: u32,

    /// Number of instances to draw.
    pub instance_count: u32,

    /// First index.
    pub first_index: u32,

    /// Vertex offset that is added to index before indexing the vertex buffer.
    pub vertex_offset: i32,

    /// First instance index.
    pub first_instance: u32,
}

impl Default for DrawIndexedCommand {
    fn default() -> Self {
        DrawIndexedCommand {
            index_count: 0,
            instance_count: 1,
            first_index: 0,
            vertex_offset: 0,
            first_instance: 0,
        }
    }
}

impl DrawIndexedCommand {
    /// Check if the command draws a single instance from the start.
    pub fn is_single_instance(&self) -> bool {
        self.instance_count == 1 && self.first_instance == 0
    }
}

/// Parameters of a dispatch.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DispatchCommand {
    /// Number of thread groups to dispatch in the X dimension.
    pub x: u32,

    /// Number of thread groups to dispatch in the Y dimension.
    pub y: u32,

    /// Number of thread groups to dispatch in the Z dimension.
    pub z: u32,
}
