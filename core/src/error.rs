use failure::Fail;

/// `HRESULT` code returned by a failed native call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct HResult(pub i32);

impl HResult {
    /// `E_FAIL`
    pub const FAIL: Self = HResult(0x8000_4005_u32 as i32);

    /// `E_INVALIDARG`
    pub const INVALID_ARG: Self = HResult(0x8007_0057_u32 as i32);

    /// `E_OUTOFMEMORY`
    pub const OUT_OF_MEMORY: Self = HResult(0x8007_000E_u32 as i32);

    /// `DXGI_ERROR_DEVICE_REMOVED`
    pub const DEVICE_REMOVED: Self = HResult(0x887A_0005_u32 as i32);

    /// Check if code signals failure.
    pub fn is_failure(&self) -> bool {
        self.0 < 0
    }
}

impl std::fmt::Display for HResult {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(fmt, "0x{:08X}", self.0 as u32)
    }
}

/// Failure reported by the native layer.
///
/// The state of the native object that produced it is unknown afterwards,
/// so callers must abort recording instead of recovering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Fail)]
#[fail(display = "Native call `{}` failed with {}", call, code)]
pub struct NativeError {
    /// Name of the native call.
    pub call: &'static str,

    /// Code the call returned.
    pub code: HResult,
}

impl NativeError {
    /// Create error for a native call.
    pub fn new(call: &'static str, code: HResult) -> Self {
        NativeError { call, code }
    }

    /// Check the native result code and convert it into a `Result`.
    pub fn check(call: &'static str, code: HResult) -> Result<(), Self> {
        if code.is_failure() {
            log::error!("Native call `{}` failed with {}", call, code);
            Err(NativeError { call, code })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_pass_check() {
        assert_eq!(NativeError::check("Reset", HResult(0)), Ok(()));
        // S_FALSE is still a success code.
        assert_eq!(NativeError::check("GetData", HResult(1)), Ok(()));
    }

    #[test]
    fn failure_codes_are_reported() {
        let error = NativeError::check("Reset", HResult::INVALID_ARG).unwrap_err();
        assert_eq!(error.call, "Reset");
        assert_eq!(
            error.to_string(),
            "Native call `Reset` failed with 0x80070057"
        );
    }
}
