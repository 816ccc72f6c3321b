//! Command buffers cycled over frames in flight.

use {
    crate::{
        buffer::{CommandBuffer, State},
        error::CommandError,
        raw::RawCommandBuffer,
    },
    strata_core::{
        handle::{CommandAllocatorPtr, PipelineStatePtr},
        Backend, NativeError,
    },
};

/// Maximum number of frames the device may work on at once.
pub const MAX_FRAMES_IN_FLIGHT: usize = 3;

/// Command pool configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandPoolConfig {
    /// Number of command buffers, one per frame in flight.
    pub frames_in_flight: usize,
}

impl Default for CommandPoolConfig {
    fn default() -> Self {
        CommandPoolConfig {
            frames_in_flight: 2,
        }
    }
}

/// Pool owning one command buffer per frame in flight.
///
/// Only one command buffer may record with a given allocator at a time.
/// Pool must be [disposed](#method.dispose) instead of dropped.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = "R: std::fmt::Debug"))]
pub struct CommandPool<B: Backend, R> {
    buffers: Vec<CommandBuffer<B, R>>,
    relevant: relevant::Relevant,
}

impl<B, R> CommandPool<B, R>
where
    B: Backend,
    R: RawCommandBuffer<B>,
{
    /// Create pool, calling `create` for every frame index.
    pub fn new<F>(config: CommandPoolConfig, mut create: F) -> Result<Self, CommandError>
    where
        F: FnMut(usize) -> Result<R, NativeError>,
    {
        if config.frames_in_flight == 0 || config.frames_in_flight > MAX_FRAMES_IN_FLIGHT {
            return Err(CommandError::invalid_argument(format!(
                "Frames in flight must be in 1..={}, got {}",
                MAX_FRAMES_IN_FLIGHT, config.frames_in_flight
            )));
        }

        let mut buffers = Vec::with_capacity(config.frames_in_flight);
        for index in 0..config.frames_in_flight {
            match create(index) {
                Ok(raw) => buffers.push(CommandBuffer::new(raw)),
                Err(error) => {
                    log::error!("Failed to create command buffer {}: {}", index, error);
                    for buffer in buffers {
                        buffer.dispose();
                    }
                    return Err(error.into());
                }
            }
        }

        log::debug!(
            "Created {} command pool for {} frames",
            B::KIND,
            config.frames_in_flight
        );
        Ok(CommandPool {
            buffers,
            relevant: relevant::Relevant,
        })
    }

    /// Number of command buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Check if pool has no buffers. Never true for pool created with `new`.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Get command buffer of frame `index`.
    pub fn buffer(&self, index: usize) -> Option<&CommandBuffer<B, R>> {
        self.buffers.get(index)
    }

    /// Get mutable command buffer of frame `index`.
    pub fn buffer_mut(&mut self, index: usize) -> Option<&mut CommandBuffer<B, R>> {
        self.buffers.get_mut(index)
    }

    /// Iterate over command buffers.
    pub fn buffers(&self) -> impl Iterator<Item = &CommandBuffer<B, R>> {
        self.buffers.iter()
    }

    /// Start recording command buffer of frame `index` with `allocator`.
    pub fn begin(
        &mut self,
        index: usize,
        allocator: CommandAllocatorPtr,
        initial: Option<PipelineStatePtr>,
    ) -> Result<&mut CommandBuffer<B, R>, CommandError> {
        let count = self.buffers.len();
        if index >= count {
            return Err(CommandError::invalid_argument(format!(
                "Frame index {} is out of {} command buffers",
                index, count
            )));
        }

        strata_core::strata_slow_assert!(
            self.buffers.iter().enumerate().all(|(other, buffer)| {
                other == index
                    || buffer.state() != State::Recording
                    || buffer.allocator() != Some(allocator)
            }),
            "Allocator {:?} is already used by recording command buffer",
            allocator
        );

        let buffer = &mut self.buffers[index];
        buffer.reset_command_list(allocator, initial)?;
        Ok(buffer)
    }

    /// Dispose of pool and its command buffers, releasing translators.
    pub fn dispose(self) -> Vec<R> {
        self.relevant.dispose();
        self.buffers
            .into_iter()
            .map(CommandBuffer::dispose)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::impls::dx11::Dx11Context,
        strata_core::{
            trace::{Dx11Call, Trace, TraceContext},
            Dx11,
        },
    };

    fn create_pool(
        frames_in_flight: usize,
    ) -> Result<CommandPool<Dx11, Dx11Context<TraceContext>>, CommandError> {
        let trace = Trace::<Dx11Call>::new();
        CommandPool::new(CommandPoolConfig { frames_in_flight }, |_| {
            Ok(Dx11Context::new(TraceContext::new(&trace)))
        })
    }

    #[test]
    fn frame_count_is_validated() {
        for &frames in &[0, MAX_FRAMES_IN_FLIGHT + 1] {
            match create_pool(frames) {
                Err(CommandError::InvalidArgument(_)) => {}
                other => panic!("Unexpected result {:?}", other.map(|pool| pool.len())),
            }
        }

        let pool = create_pool(MAX_FRAMES_IN_FLIGHT).unwrap();
        assert_eq!(pool.len(), MAX_FRAMES_IN_FLIGHT);
        assert_eq!(pool.dispose().len(), MAX_FRAMES_IN_FLIGHT);
    }

    #[test]
    fn begin_starts_recording() {
        let mut pool = create_pool(2).unwrap();
        let allocator = CommandAllocatorPtr::from_raw(1);

        let buffer = pool.begin(1, allocator, None).unwrap();
        assert_eq!(buffer.state(), State::Recording);
        assert_eq!(buffer.allocator(), Some(allocator));
        assert_eq!(pool.buffer(0).unwrap().state(), State::Initial);

        match pool.begin(2, CommandAllocatorPtr::from_raw(2), None) {
            Err(CommandError::InvalidArgument(_)) => {}
            other => panic!("Unexpected result {:?}", other.map(|buffer| buffer.state())),
        }

        pool.buffer_mut(1).unwrap().finish().unwrap();
        pool.dispose();
    }

    #[test]
    #[cfg(not(feature = "no-slow-safety-checks"))]
    #[should_panic]
    fn shared_allocator_is_caught() {
        let mut pool = create_pool(2).unwrap();
        let allocator = CommandAllocatorPtr::from_raw(1);
        pool.begin(0, allocator, None).unwrap();
        let _ = pool.begin(1, allocator, None);
    }
}
