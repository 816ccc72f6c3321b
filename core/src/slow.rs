//! Macros that do run-time safety checks. These can be disabled, but this increases
//! the risk of recording commands the native layer will treat as undefined behavior.

/// `assert!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(not(feature = "no-slow-safety-checks"))]
macro_rules! strata_slow_assert {
    ($($tt:tt)*) => { assert!($($tt)*) };
}

/// `assert!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(feature = "no-slow-safety-checks")]
macro_rules! strata_slow_assert {
    ($($tt:tt)*) => {};
}

/// `assert_eq!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(not(feature = "no-slow-safety-checks"))]
macro_rules! strata_slow_assert_eq {
    ($($tt:tt)*) => { assert_eq!($($tt)*) };
}

/// `assert_eq!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(feature = "no-slow-safety-checks")]
macro_rules! strata_slow_assert_eq {
    ($($tt:tt)*) => {};
}

/// `assert_ne!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(not(feature = "no-slow-safety-checks"))]
macro_rules! strata_slow_assert_ne {
    ($($tt:tt)*) => { assert_ne!($($tt)*) };
}

/// `assert_ne!` that is exists only if `"no-slow-safety-checks"` feature is not enabled.
#[macro_export]
#[cfg(feature = "no-slow-safety-checks")]
macro_rules! strata_slow_assert_ne {
    ($($tt:tt)*) => {};
}
