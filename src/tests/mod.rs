//! Crate-level test suites
//!
//! Unit tests live at the bottom of each module; these files cover the
//! pipeline end to end, the transformation contracts, and property-based
//! checks.

mod pipeline_tests;
mod simplification_tests;
