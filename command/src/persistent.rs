//! Rasterizer state that outlives command buffer resets.

use {
    crate::{error::CommandError, raw::RawCommandBuffer},
    smallvec::SmallVec,
    strata_core::{Backend, Extent2d, Scissor, Viewport, MAX_VIEWPORTS},
};

/// Viewports and scissors last set by the client.
///
/// Explicit command lists forget both on reset while immediate contexts keep them.
/// Command buffers re-apply this state after reset so both models behave the same.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistentState {
    viewports: SmallVec<[Viewport; 4]>,
    scissors: SmallVec<[Scissor; 4]>,
}

fn check_count(kind: &str, count: usize) -> Result<(), CommandError> {
    if count > MAX_VIEWPORTS {
        return Err(CommandError::invalid_argument(format!(
            "{} {}s exceed the limit of {}",
            count, kind, MAX_VIEWPORTS
        )));
    }
    Ok(())
}

impl PersistentState {
    /// Create state with no viewports or scissors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with single viewport and scissor covering `extent`.
    pub fn from_extent(extent: Extent2d) -> Self {
        let mut state = Self::new();
        state.viewports.push(Viewport::new(
            0.0,
            0.0,
            extent.width as f32,
            extent.height as f32,
        ));
        state
            .scissors
            .push(Scissor::new(0, 0, extent.width as i32, extent.height as i32));
        state
    }

    /// Current viewports.
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    /// Current scissors.
    pub fn scissors(&self) -> &[Scissor] {
        &self.scissors
    }

    /// Replace all viewports.
    /// State is unchanged if there are more than `MAX_VIEWPORTS` of them.
    pub fn set_viewports(&mut self, viewports: &[Viewport]) -> Result<(), CommandError> {
        check_count("viewport", viewports.len())?;
        self.viewports = viewports.iter().cloned().collect();
        Ok(())
    }

    /// Replace all scissors.
    /// State is unchanged if there are more than `MAX_VIEWPORTS` of them.
    pub fn set_scissors(&mut self, scissors: &[Scissor]) -> Result<(), CommandError> {
        check_count("scissor", scissors.len())?;
        self.scissors = scissors.iter().cloned().collect();
        Ok(())
    }

    /// Push viewports to the native rasterizer stage.
    pub fn submit_viewports<B, R>(&self, raw: &mut R)
    where
        B: Backend,
        R: RawCommandBuffer<B> + ?Sized,
    {
        log::trace!("Submit {} viewports", self.viewports.len());
        raw.set_viewports(&self.viewports);
    }

    /// Push scissors to the native rasterizer stage.
    pub fn submit_scissors<B, R>(&self, raw: &mut R)
    where
        B: Backend,
        R: RawCommandBuffer<B> + ?Sized,
    {
        log::trace!("Submit {} scissors", self.scissors.len());
        raw.set_scissors(&self.scissors);
    }

    /// Push non-empty sequences after the native object forgot them.
    pub fn resubmit<B, R>(&self, raw: &mut R)
    where
        B: Backend,
        R: RawCommandBuffer<B> + ?Sized,
    {
        if !self.viewports.is_empty() {
            self.submit_viewports(raw);
        }
        if !self.scissors.is_empty() {
            self.submit_scissors(raw);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_sequence_is_replaced() {
        let mut state = PersistentState::from_extent(Extent2d {
            width: 640,
            height: 480,
        });
        assert_eq!(state.viewports(), &[Viewport::new(0.0, 0.0, 640.0, 480.0)]);
        assert_eq!(state.scissors(), &[Scissor::new(0, 0, 640, 480)]);

        let viewports = [
            Viewport::new(0.0, 0.0, 320.0, 480.0),
            Viewport::new(320.0, 0.0, 320.0, 480.0),
        ];
        state.set_viewports(&viewports).unwrap();
        assert_eq!(state.viewports(), &viewports);
        assert_eq!(state.scissors().len(), 1);
    }

    #[test]
    fn too_many_viewports_leave_state_unchanged() {
        let mut state = PersistentState::new();
        state.set_scissors(&[Scissor::new(0, 0, 8, 8)]).unwrap();

        let scissors = vec![Scissor::new(0, 0, 1, 1); MAX_VIEWPORTS + 1];
        match state.set_scissors(&scissors) {
            Err(CommandError::InvalidArgument(_)) => {}
            other => panic!("Unexpected result {:?}", other),
        }
        assert_eq!(state.scissors(), &[Scissor::new(0, 0, 8, 8)]);

        let viewports = vec![Viewport::new(0.0, 0.0, 1.0, 1.0); MAX_VIEWPORTS];
        state.set_viewports(&viewports).unwrap();
        assert_eq!(state.viewports().len(), MAX_VIEWPORTS);
    }
}
