/// Lifecycle state of a command buffer.
///
/// ```text
/// Initial --reset--> Recording --finish--> Executable --mark_submitted--> Pending
///    ^                                                                       |
///    +-------------------------------sync_gpu--------------------------------+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    /// State in which all buffers start.
    /// Waiting for the GPU also moves buffer to this state.
    Initial,

    /// Buffer accepts commands.
    Recording,

    /// Recording is finished and buffer can be submitted.
    Executable,

    /// Buffer is submitted and may be read by the device at the moment.
    /// Must not be reset until the device is done with it.
    Pending,

    /// A native call failed while recording or closing.
    /// Only reset can bring buffer back.
    Invalid,
}

impl State {
    /// Check if buffer can be reset in this state.
    pub fn is_resettable(self) -> bool {
        match self {
            State::Initial | State::Executable | State::Invalid => true,
            State::Recording | State::Pending => false,
        }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(match self {
            State::Initial => "initial",
            State::Recording => "recording",
            State::Executable => "executable",
            State::Pending => "pending",
            State::Invalid => "invalid",
        })
    }
}
