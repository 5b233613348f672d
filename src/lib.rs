#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Unit scale factors, default component values and report thresholds.
pub mod constants;
/// Shared scalar and phasor aliases.
pub mod math;
/// Frequency ranges, sweep builders and post-processing helpers.
pub mod sweep;
/// Cartridge and load models.
pub mod circuits;
/// Transfer function evaluation over a frequency sweep.
pub mod response;
/// Peak statistics, damping and interpretation of a computed response.
pub mod diagnostics;
/// Chart rendering backends.
pub mod chart;
/// Console report, CSV export and the render orchestrator.
pub mod report;
/// Parsing of user-supplied parameter tokens.
pub mod input;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
