//! Frequency ranges, sweep builders and post-processing helpers.

use crate::constants::{
    angular_frequency, AUDIBLE_HIGH_HZ, AUDIBLE_SAMPLES, EXTENDED_HIGH_HZ, EXTENDED_SAMPLES,
    SWEEP_LOW_HZ,
};
use crate::errors::{LoadingError, Result};
use crate::math::{phase_degrees, ratio_db, CScalar, Scalar};

/// Bounds and density of a logarithmic frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    low_hz: Scalar,
    high_hz: Scalar,
    samples: usize,
}

impl FrequencyRange {
    /// Audible band: 20 Hz to 20 kHz, 2000 samples.
    pub const AUDIBLE: Self = Self {
        low_hz: SWEEP_LOW_HZ,
        high_hz: AUDIBLE_HIGH_HZ,
        samples: AUDIBLE_SAMPLES,
    };

    /// Extended band reaching into the ultrasonic: 20 Hz to 50 kHz, 3000 samples.
    pub const EXTENDED: Self = Self {
        low_hz: SWEEP_LOW_HZ,
        high_hz: EXTENDED_HIGH_HZ,
        samples: EXTENDED_SAMPLES,
    };

    /// Creates a range after checking `0 < low < high` and `samples >= 2`.
    pub fn new(low_hz: Scalar, high_hz: Scalar, samples: usize) -> Result<Self> {
        if !(low_hz.is_finite() && low_hz > 0.0) {
            return Err(LoadingError::invalid(
                "low frequency",
                format!("{low_hz} Hz must be positive and finite"),
            ));
        }
        if !(high_hz.is_finite() && high_hz > low_hz) {
            return Err(LoadingError::invalid(
                "high frequency",
                format!("{high_hz} Hz must be finite and above {low_hz} Hz"),
            ));
        }
        if samples < 2 {
            return Err(LoadingError::invalid(
                "sample count",
                format!("{samples} is below the minimum of 2"),
            ));
        }
        Ok(Self {
            low_hz,
            high_hz,
            samples,
        })
    }

    /// Lower bound in hertz.
    #[must_use]
    pub const fn low_hz(&self) -> Scalar {
        self.low_hz
    }

    /// Upper bound in hertz.
    #[must_use]
    pub const fn high_hz(&self) -> Scalar {
        self.high_hz
    }

    /// Number of samples in the sweep.
    #[must_use]
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Geometrically spaced sample frequencies covering the range.
    #[must_use]
    pub fn frequencies(&self) -> Vec<Scalar> {
        logspace_hz(self.low_hz, self.high_hz, self.samples)
    }
}

/// Generates `n` logarithmically spaced samples between `start_hz` and `stop_hz`.
///
/// Consecutive samples share a constant ratio. The first and last samples are
/// exactly `start_hz` and `stop_hz`. Requires both bounds to be positive.
#[must_use]
pub fn logspace_hz(start_hz: Scalar, stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    debug_assert!(start_hz > 0.0 && stop_hz > 0.0);
    match n {
        0 => Vec::new(),
        1 => vec![start_hz],
        _ => {
            let log_start = start_hz.log10();
            let log_stop = stop_hz.log10();
            let step = (log_stop - log_start) / (n as Scalar - 1.0);
            let mut out: Vec<Scalar> = (0..n)
                .map(|i| 10f64.powf(log_start + step * i as Scalar))
                .collect();
            out[0] = start_hz;
            out[n - 1] = stop_hz;
            out
        }
    }
}

/// Angular frequency sweep with logarithmic spacing between f_start and f_stop (Hz).
#[must_use]
pub fn angular_freq_logspace(f_start_hz: Scalar, f_stop_hz: Scalar, n: usize) -> Vec<Scalar> {
    logspace_hz(f_start_hz, f_stop_hz, n)
        .into_iter()
        .map(angular_frequency)
        .collect()
}

/// Applies `f` to each angular frequency and collects results.
#[must_use]
pub fn sweep_map<I, F, T>(omegas: I, f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    omegas.into_iter().map(f).collect()
}

/// Magnitude in dB (20*log10(|x|)) of a complex sequence.
#[must_use]
pub fn mag_db<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| ratio_db(*v)).collect()
}

/// Phase in degrees of a complex sequence.
#[must_use]
pub fn phase_deg<'a>(values: impl IntoIterator<Item = &'a CScalar>) -> Vec<Scalar> {
    values.into_iter().map(|v| phase_degrees(*v)).collect()
}
