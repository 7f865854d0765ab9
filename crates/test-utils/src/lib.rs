//! Shared test utilities for the OGC API client workspace.
//!
//! This crate provides common testing infrastructure including:
//! - JSON documents of a small synthetic OGC API service
//! - Tile matrix set generators for pyramid analysis
//! - A tolerance assertion for projected points
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, quad_pyramid};
//! ```

pub mod fixtures;
pub mod generators;

pub use generators::*;

/// Assert that a projected point lies within `tolerance` of `expected` on
/// both axes. Either side may be any expression yielding `(f64, f64)`.
///
/// ```ignore
/// use test_utils::assert_point_near;
///
/// assert_point_near!(translator.origin(), (-180.0, 90.0), 1e-9);
/// ```
#[macro_export]
macro_rules! assert_point_near {
    ($actual:expr, $expected:expr, $tolerance:expr) => {{
        let (ax, ay): (f64, f64) = $actual;
        let (ex, ey): (f64, f64) = $expected;
        let tolerance: f64 = $tolerance;
        if (ax - ex).abs() > tolerance || (ay - ey).abs() > tolerance {
            panic!(
                "point ({}, {}) is not within {} of ({}, {})",
                ax, ay, tolerance, ex, ey
            );
        }
    }};
}
