//! Chart rendering backends.
//!
//! The numeric core never touches a graphics library. A [`ChartRenderer`]
//! receives a finished [`LoadingAnalysis`] and turns it into an image file;
//! [`PlottersChart`] is the bitmap implementation used by the binary.

use std::ops::Range;
use std::path::Path;

use plotters::chart::DualCoordChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::constants::CHART_SIZE_PX;
use crate::diagnostics::{LoadingAnalysis, PeakStatistics};
use crate::errors::{LoadingError, Result};
use crate::math::Scalar;
use crate::response::FrequencyResponse;
use crate::sweep::FrequencyRange;

const MAGNITUDE_COLOR: RGBColor = BLUE;
const PHASE_COLOR: RGBColor = RGBColor(0, 128, 0);
const IDEAL_LC_COLOR: RGBColor = RGBColor(255, 165, 0);
const FONT: &str = "sans-serif";
/// (segment, gap) in pixels for reference lines.
const DASH: (u32, u32) = (12, 8);
const DOT: (u32, u32) = (2, 6);

/// Presentation switches shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    /// Logarithmic (true) or linear frequency axis.
    pub log_scale: bool,
    /// Draw phase traces on a right-hand axis.
    pub show_phase: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            log_scale: true,
            show_phase: true,
        }
    }
}

/// Something that can turn an analysis into an image at `path`.
pub trait ChartRenderer {
    /// Draws both panels and writes the image. The parent directory must exist.
    fn render(&self, analysis: &LoadingAnalysis, style: &ChartStyle, path: &Path) -> Result<()>;
}

/// Two stacked panels drawn with `plotters` into a PNG bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlottersChart {
    size: (u32, u32),
}

impl PlottersChart {
    /// Creates a renderer producing images of `size` pixels.
    #[must_use]
    pub const fn new(size: (u32, u32)) -> Self {
        Self { size }
    }
}

impl Default for PlottersChart {
    fn default() -> Self {
        Self::new(CHART_SIZE_PX)
    }
}

impl ChartRenderer for PlottersChart {
    fn render(&self, analysis: &LoadingAnalysis, style: &ChartStyle, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        let areas = root.split_evenly((2, 1));
        for (area, panel) in areas.iter().zip(panels(analysis, style).iter()) {
            draw_panel(area, panel, style)?;
        }
        root.present().map_err(render_error)?;
        Ok(())
    }
}

fn render_error(err: impl std::fmt::Display) -> LoadingError {
    LoadingError::Render(err.to_string())
}

/// Everything one panel needs, resolved ahead of drawing.
#[derive(Debug, Clone)]
struct Panel<'a> {
    title: String,
    range: FrequencyRange,
    response: &'a FrequencyResponse,
    peak: PeakStatistics,
    magnitude_label: String,
    phase_label: String,
    ideal_lc: Option<(Scalar, String)>,
    magnitude_bounds: Range<Scalar>,
    phase_bounds: Range<Scalar>,
}

impl<'a> Panel<'a> {
    fn new(
        title: String,
        range: FrequencyRange,
        response: &'a FrequencyResponse,
        peak: PeakStatistics,
    ) -> Self {
        Self {
            title,
            range,
            response,
            peak,
            magnitude_label: String::new(),
            phase_label: String::new(),
            ideal_lc: None,
            magnitude_bounds: axis_bounds(response.magnitude_db(), &[-3.0, 0.0, 3.0], 0.5),
            phase_bounds: axis_bounds(response.phase_deg(), &[-90.0, 0.0], 5.0),
        }
    }
}

fn panels<'a>(analysis: &'a LoadingAnalysis, style: &ChartStyle) -> [Panel<'a>; 2] {
    let scale = if style.log_scale {
        "Logarithmic"
    } else {
        "Linear"
    };
    let f_res = analysis.ideal_resonance_hz();

    let peak = *analysis.audible_peak();
    let mut audible = Panel::new(
        format!("Frequency Response - Audible Range (20 Hz - 20 kHz)\n{scale} frequency scale"),
        FrequencyRange::AUDIBLE,
        analysis.audible(),
        peak,
    );
    audible.magnitude_label = format!(
        "Magnitude (Peak: {:.0}Hz @ {:.2}dB, Q={:.2})",
        peak.frequency_hz,
        peak.magnitude_db,
        analysis.quality_factor()
    );
    audible.phase_label = format!("Phase (@ peak: {:.1}°)", peak.phase_deg);

    let peak = *analysis.extended_peak();
    let mut extended = Panel::new(
        "Frequency Response - Extended Range (20 Hz - 50 kHz)".to_owned(),
        FrequencyRange::EXTENDED,
        analysis.extended(),
        peak,
    );
    extended.magnitude_label = format!(
        "Magnitude (Peak: {:.0}Hz @ {:.2}dB, Ideal LC: {f_res:.0}Hz)",
        peak.frequency_hz, peak.magnitude_db
    );
    extended.phase_label = format!(
        "Phase (@ peak: {:.1}°, @ ideal LC: {:.1}°)",
        peak.phase_deg,
        analysis.phase_at_ideal_deg()
    );
    extended.ideal_lc = Some((f_res, format!("Ideal LC: {f_res:.0}Hz")));

    [audible, extended]
}

/// Span covering every finite value and every reference level, padded by 5%
/// (at least `min_pad`).
fn axis_bounds(values: &[Scalar], references: &[Scalar], min_pad: Scalar) -> Range<Scalar> {
    let (lo, hi) = values
        .iter()
        .chain(references)
        .filter(|v| v.is_finite())
        .fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((hi - lo) * 0.05).max(min_pad);
    (lo - pad)..(hi + pad)
}

/// Tick label for a frequency: `20`, `500`, `1k`, `2.5k`, `20k`.
fn format_hz(hz: Scalar) -> String {
    if hz.abs() >= 1000.0 {
        let k = hz / 1000.0;
        if (k - k.round()).abs() < 1.0e-9 {
            format!("{k:.0}k")
        } else {
            format!("{k:.1}k")
        }
    } else {
        format!("{hz:.0}")
    }
}

fn draw_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    panel: &Panel<'_>,
    style: &ChartStyle,
) -> Result<()> {
    let x = panel.range.low_hz()..panel.range.high_hz();
    // Captions are single-line; stack one title strip per line instead.
    let mut area = area.clone();
    for line in panel.title.lines() {
        area = area.titled(line, (FONT, 30)).map_err(render_error)?;
    }

    let mut builder = ChartBuilder::on(&area);
    builder
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .right_y_label_area_size(if style.show_phase { 90 } else { 0 });

    if style.log_scale {
        let chart = builder
            .build_cartesian_2d(x.clone().log_scale(), panel.magnitude_bounds.clone())
            .map_err(render_error)?
            .set_secondary_coord(x.log_scale(), panel.phase_bounds.clone());
        draw_traces(chart, panel, style)
    } else {
        let chart = builder
            .build_cartesian_2d(x.clone(), panel.magnitude_bounds.clone())
            .map_err(render_error)?
            .set_secondary_coord(x, panel.phase_bounds.clone());
        draw_traces(chart, panel, style)
    }
}

type PanelChart<'a, 'b, X> = DualCoordChartContext<
    'a,
    BitMapBackend<'b>,
    Cartesian2d<X, RangedCoordf64>,
    Cartesian2d<X, RangedCoordf64>,
>;

fn draw_traces<'a, 'b: 'a, X>(
    mut chart: PanelChart<'a, 'b, X>,
    panel: &Panel<'_>,
    style: &ChartStyle,
) -> Result<()>
where
    X: Ranged<ValueType = Scalar> + ValueFormatter<Scalar>,
{
    let (lo, hi) = (panel.range.low_hz(), panel.range.high_hz());
    let response = panel.response;
    let peak = panel.peak;

    chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc("Magnitude (dBV)")
        .x_label_formatter(&|hz| format_hz(*hz))
        .y_label_formatter(&|db| format!("{db:.1}"))
        .label_style((FONT, 18))
        .axis_desc_style((FONT, 22))
        .light_line_style(&BLACK.mix(0.05))
        .bold_line_style(&BLACK.mix(0.15))
        .draw()
        .map_err(render_error)?;

    for (level, alpha, dash) in [(0.0, 0.3, DASH), (3.0, 0.2, DOT), (-3.0, 0.2, DOT)] {
        chart
            .draw_series(DashedLineSeries::new(
                [(lo, level), (hi, level)],
                dash.0,
                dash.1,
                MAGNITUDE_COLOR.mix(alpha).stroke_width(1),
            ))
            .map_err(render_error)?;
    }

    chart
        .draw_series(LineSeries::new(
            response
                .frequencies_hz()
                .iter()
                .copied()
                .zip(response.magnitude_db().iter().copied())
                .filter(|(_, db)| db.is_finite()),
            MAGNITUDE_COLOR.stroke_width(3),
        ))
        .map_err(render_error)?
        .label(panel.magnitude_label.as_str())
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 24, y)], MAGNITUDE_COLOR.stroke_width(3))
        });
    chart
        .draw_series(std::iter::once(Circle::new(
            (peak.frequency_hz, peak.magnitude_db),
            8,
            MAGNITUDE_COLOR.filled(),
        )))
        .map_err(render_error)?;

    if let Some((f_res, label)) = &panel.ideal_lc {
        if (lo..=hi).contains(f_res) {
            let Range { start, end } = panel.magnitude_bounds;
            chart
                .draw_series(LineSeries::new(
                    [(*f_res, start), (*f_res, end)],
                    IDEAL_LC_COLOR.mix(0.6).stroke_width(4),
                ))
                .map_err(render_error)?
                .label(label.as_str())
                .legend(|(x, y)| {
                    PathElement::new(vec![(x, y), (x + 24, y)], IDEAL_LC_COLOR.stroke_width(4))
                });
        }
    }

    if style.show_phase {
        chart
            .configure_secondary_axes()
            .y_desc("Phase (degrees)")
            .label_style((FONT, 18))
            .draw()
            .map_err(render_error)?;

        for (level, alpha, dash) in [(0.0, 0.2, DASH), (-90.0, 0.3, DOT)] {
            chart
                .draw_secondary_series(DashedLineSeries::new(
                    [(lo, level), (hi, level)],
                    dash.0,
                    dash.1,
                    PHASE_COLOR.mix(alpha).stroke_width(1),
                ))
                .map_err(render_error)?;
        }

        chart
            .draw_secondary_series(LineSeries::new(
                response
                    .frequencies_hz()
                    .iter()
                    .copied()
                    .zip(response.phase_deg().iter().copied())
                    .filter(|(_, deg)| deg.is_finite()),
                PHASE_COLOR.mix(0.7).stroke_width(2),
            ))
            .map_err(render_error)?
            .label(panel.phase_label.as_str())
            .legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], PHASE_COLOR.stroke_width(2))
            });
        chart
            .draw_secondary_series(std::iter::once(Circle::new(
                (peak.frequency_hz, peak.phase_deg),
                8,
                PHASE_COLOR.filled(),
            )))
            .map_err(render_error)?;

        if let Some((f_res, _)) = &panel.ideal_lc {
            if (lo..=hi).contains(f_res) {
                let Range { start, end } = panel.phase_bounds;
                chart
                    .draw_secondary_series(LineSeries::new(
                        [(*f_res, start), (*f_res, end)],
                        IDEAL_LC_COLOR.mix(0.3).stroke_width(2),
                    ))
                    .map_err(render_error)?;
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .label_font((FONT, 18))
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(render_error)?;
    Ok(())
}
