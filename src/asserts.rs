//! Assertion macros used throughout the crate.
//!
//! Simple assertions are always active and guard cheap contract checks. Moderate assertions
//! guard the more expensive internal consistency checks and are only active when the
//! `debug-checks` feature is enabled.

/// Asserts a cheap condition; always active.
#[macro_export]
macro_rules! warrant_assert_simple {
    ($($arg:tt)*) => {
        assert!($($arg)*);
    };
}

/// Asserts equality of two cheap expressions; always active.
#[macro_export]
macro_rules! warrant_assert_eq_simple {
    ($($arg:tt)*) => {
        assert_eq!($($arg)*);
    };
}

/// Asserts a condition which is too expensive for release builds; only active when the
/// `debug-checks` feature is enabled.
#[macro_export]
macro_rules! warrant_assert_moderate {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-checks") {
            assert!($($arg)*);
        }
    };
}
