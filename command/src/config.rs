//! Backend specific tuning of command buffer behavior.

/// Options that only make sense for one native model.
/// Options of other models are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct ApiDependentState {
    /// Options of the explicit command-list model.
    pub direct3d12: Direct3D12State,
}

/// Options of the explicit command-list model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct Direct3D12State {
    /// Don't re-apply viewports and scissors after a reset.
    /// Clients setting this must set them again after every reset themselves.
    pub disable_auto_state_submission: bool,
}
