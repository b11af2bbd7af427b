//! Assertions for checks that walk whole lists or chains.
//!
//! Cheap contract checks use plain `assert!`. `sassert!` compiles to
//! nothing unless the `slow_assert` feature is enabled.

/// Assertion for slow checks, which might require more work or are in critical paths.
#[cfg(feature = "slow_assert")]
#[macro_export]
macro_rules! sassert {
    ($a:expr$(,$($t:tt)*)?) => {
        assert!($a $(,$($t)*)?)
    };
}

/// Assertion for slow checks, which might require more work or are in critical paths.
#[cfg(not(feature = "slow_assert"))]
#[macro_export]
macro_rules! sassert {
    ($a:expr$(,$($t:tt)*)?) => {};
}
