//! Unit scale factors, configuration defaults and fixed report policy.
//!
//! User-facing quantities are entered in the units printed on cartridge and
//! preamp data sheets (mH, Ω, kΩ, pF). Everything downstream of
//! [`CircuitParameters`](crate::circuits::CircuitParameters) works in base SI
//! units; the factors below perform that conversion.

use std::f64::consts::PI;

/// Millihenries to henries.
pub const MILLI: f64 = 1.0e-3;
/// Kilohms to ohms.
pub const KILO: f64 = 1.0e3;
/// Picofarads to farads.
pub const PICO: f64 = 1.0e-12;

/// Default cartridge inductance in millihenries.
pub const DEFAULT_INDUCTANCE_MH: f64 = 500.0;
/// Default cartridge DC resistance in ohms.
pub const DEFAULT_DC_RESISTANCE_OHMS: f64 = 600.0;
/// Default preamp load resistance in kilohms.
pub const DEFAULT_LOAD_RESISTANCE_KOHMS: f64 = 47.0;
/// Default total (cable + preamp) capacitance in picofarads.
pub const DEFAULT_CAPACITANCE_PF: f64 = 200.0;

/// Lower bound of both standard sweeps (Hz).
pub const SWEEP_LOW_HZ: f64 = 20.0;
/// Upper bound of the audible sweep (Hz).
pub const AUDIBLE_HIGH_HZ: f64 = 20_000.0;
/// Sample count of the audible sweep.
pub const AUDIBLE_SAMPLES: usize = 2000;
/// Upper bound of the extended (ultrasonic) sweep (Hz).
pub const EXTENDED_HIGH_HZ: f64 = 50_000.0;
/// Sample count of the extended sweep.
pub const EXTENDED_SAMPLES: usize = 3000;

/// Quality factor above which the circuit is reported as under-damped.
pub const UNDER_DAMPED_Q: f64 = 1.0;
/// Peak magnitude (dB) above which a significant treble boost is reported.
pub const SIGNIFICANT_BOOST_DB: f64 = 3.0;
/// Peak magnitude (dB) above which a moderate treble lift is reported.
pub const MODERATE_LIFT_DB: f64 = 1.0;

/// Default directory for the rendered chart.
pub const DEFAULT_OUTPUT_DIR: &str = ".";
/// Default file name for the rendered chart.
pub const DEFAULT_OUTPUT_FILE: &str = "cartridge_loading_response.png";
/// Chart size in pixels: a 14 x 10 inch figure at 150 DPI.
pub const CHART_SIZE_PX: (u32, u32) = (2100, 1500);

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: f64) -> f64 {
    2.0 * PI * hz
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn angular_frequency_of_one_hertz_is_two_pi() {
        assert_relative_eq!(angular_frequency(1.0), 2.0 * PI, max_relative = 1.0e-15);
    }

    #[test]
    fn chart_matches_figure_at_150_dpi() {
        assert_eq!(CHART_SIZE_PX, (14 * 150, 10 * 150));
    }
}
