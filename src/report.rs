//! Console report, CSV export and the render orchestrator.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::chart::{ChartRenderer, ChartStyle, PlottersChart};
use crate::circuits::CircuitParameters;
use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE};
use crate::diagnostics::{LoadingAnalysis, PeakAssessment};
use crate::errors::Result;
use crate::response::FrequencyResponse;

const RULE: &str = "============================================================";

/// Where and how the chart is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Axis scale and phase visibility.
    pub style: ChartStyle,
    /// Directory receiving the image; created when missing.
    pub output_dir: PathBuf,
    /// Image file name inside `output_dir`.
    pub output_file: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            style: ChartStyle::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_owned(),
        }
    }
}

impl RenderOptions {
    /// Full path of the image.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }
}

/// Outcome of a successful [`ReportRenderer::render`] call.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// The analysis that was charted and printed.
    pub analysis: LoadingAnalysis,
    /// Path of the written image.
    pub chart_path: PathBuf,
}

/// Runs both sweeps, writes the chart and prints the diagnostic report.
#[derive(Debug, Clone)]
pub struct ReportRenderer<C = PlottersChart> {
    chart: C,
    options: RenderOptions,
}

impl ReportRenderer<PlottersChart> {
    /// Renderer drawing bitmap charts with `options`.
    #[must_use]
    pub fn with_options(options: RenderOptions) -> Self {
        Self::new(PlottersChart::default(), options)
    }
}

impl<C: ChartRenderer> ReportRenderer<C> {
    /// Renderer using a specific chart backend.
    #[must_use]
    pub const fn new(chart: C, options: RenderOptions) -> Self {
        Self { chart, options }
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Analyses `parameters`, writes the chart, then prints the saved-path line
    /// and the report to `out`.
    ///
    /// Directory creation, image and console write failures are returned as-is.
    pub fn render<W: Write>(
        &self,
        parameters: &CircuitParameters,
        out: &mut W,
    ) -> Result<RenderedReport> {
        let analysis = LoadingAnalysis::run(parameters);

        fs::create_dir_all(&self.options.output_dir)?;
        let chart_path = self.options.output_path();
        self.chart
            .render(&analysis, &self.options.style, &chart_path)?;
        info!("chart written to {}", chart_path.display());

        writeln!(out, "\n✓ Plot saved to: {}", chart_path.display())?;
        write_report(out, &analysis)?;
        Ok(RenderedReport {
            analysis,
            chart_path,
        })
    }
}

/// Writes the human-readable loading report.
pub fn write_report<W: Write>(out: &mut W, analysis: &LoadingAnalysis) -> io::Result<()> {
    let p = analysis.parameters();
    let peak = analysis.audible_peak();

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "CARTRIDGE LOADING ANALYSIS")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "\nCartridge Parameters:")?;
    writeln!(out, "  Inductance:      {:?} mH", p.inductance_mh())?;
    writeln!(out, "  DC Resistance:   {:?} Ω", p.dc_resistance_ohms())?;
    writeln!(out, "\nLoad Parameters:")?;
    writeln!(out, "  Load Resistance: {:?} kΩ", p.load_resistance_kohms())?;
    writeln!(out, "  Total Capacitance: {:?} pF", p.capacitance_pf())?;
    writeln!(out, "\nCalculated Results:")?;
    writeln!(
        out,
        "  Ideal LC Resonance:  {:.1} Hz",
        analysis.ideal_resonance_hz()
    )?;
    writeln!(out, "  Actual Peak Freq:    {:.1} Hz", peak.frequency_hz)?;
    writeln!(out, "  Peak Magnitude:      {:.2} dB", peak.magnitude_db)?;
    writeln!(out, "  Q Factor:            {:.3}", analysis.quality_factor())?;
    writeln!(out, "  Damping:             {}", analysis.damping())?;

    let assessment = analysis.assessment();
    writeln!(out, "\nInterpretation:")?;
    match assessment {
        PeakAssessment::SignificantBoost => writeln!(
            out,
            "  ⚠ Significant treble boost of {:.1}dB at {:.0}Hz",
            peak.magnitude_db, peak.frequency_hz
        )?,
        PeakAssessment::ModerateLift => writeln!(
            out,
            "  ℹ Moderate treble lift of {:.1}dB at {:.0}Hz",
            peak.magnitude_db, peak.frequency_hz
        )?,
        PeakAssessment::WellDamped => writeln!(
            out,
            "  ✓ Well-damped response with minimal peak ({:.1}dB)",
            peak.magnitude_db
        )?,
    }
    writeln!(out, "    {}", assessment.advice())?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Writes a sweep as CSV rows of frequency, magnitude and phase.
pub fn write_sweep_csv<W: Write>(mut w: W, response: &FrequencyResponse) -> io::Result<()> {
    writeln!(w, "frequency_hz,magnitude_db,phase_deg")?;
    for (f, m, p) in response.samples() {
        writeln!(w, "{f:.16e},{m:.16e},{p:.16e}")?;
    }
    Ok(())
}

/// Creates `path` (and its parent directory) and writes `response` into it as CSV.
pub fn export_sweep_csv(path: &Path, response: &FrequencyResponse) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = io::BufWriter::new(fs::File::create(path)?);
    write_sweep_csv(file, response)?;
    info!("sweep written to {}", path.display());
    Ok(())
}
