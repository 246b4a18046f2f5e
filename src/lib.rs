// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Scroll-triggered progressive reveal engine.
//!
//! Watches elements enter and leave the viewport and drives per-element and
//! per-group entrance animations (fades, slides, scale, staggered timeline
//! reveals), exactly once or repeatedly, while staying safe against route
//! changes, unmounted elements and overlapping animations on one element.
//!
//! # Key entry points
//!
//! - [`engine::RevealEngine`] - the page-session engine: target and group
//!   registration, per-frame [`tick`](engine::RevealEngine::tick) and
//!   [`render`](engine::RevealEngine::render)
//! - [`machine::RevealMachine`] - the per-target `hidden -> revealing ->
//!   revealed` state machine
//! - [`group::GroupChoreographer`] - index-derived order, side alternation
//!   and stagger for list and timeline members
//! - [`driver`] - declarative (class toggling) and imperative (property
//!   interpolation) animation backends
//! - [`reset::ResetChannel`] - the process-wide reset broadcast used on
//!   navigation
//! - [`options::RevealOptions`] - TOML presets and JSON schema
//!
//! # Architecture
//!
//! The engine is headless and single-threaded. Intersection detection sits
//! behind the [`viewport::Viewport`] trait: [`viewport::ScrollViewport`]
//! simulates a scrolling document for tests and the `reveal-sim` binary,
//! and the `web` feature provides an `IntersectionObserver`-backed
//! implementation. Time is passed explicitly to every entry point.

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod group;
pub mod machine;
pub mod navigation;
pub mod observer;
pub mod options;
pub mod reset;
pub mod scenario;
pub mod util;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
