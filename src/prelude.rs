//! Convenience re-exports for loading analyses.

pub use crate::chart::{ChartRenderer, ChartStyle, PlottersChart};
pub use crate::circuits::{CartridgeLoad, CircuitParameters, Component, ParallelRc, SeriesRl};
pub use crate::constants::*;
pub use crate::diagnostics::{Damping, LoadingAnalysis, PeakAssessment, PeakStatistics};
pub use crate::errors::LoadingError;
pub use crate::input::Invocation;
pub use crate::math::{CScalar, Scalar};
pub use crate::report::{
    export_sweep_csv, write_report, write_sweep_csv, RenderOptions, RenderedReport,
    ReportRenderer,
};
pub use crate::response::{frequency_response, FrequencyResponse};
pub use crate::sweep::{angular_freq_logspace, logspace_hz, mag_db, phase_deg, FrequencyRange};
