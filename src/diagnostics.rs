//! Peak statistics, damping and interpretation of a computed response.
//!
//! Everything here is pure: the same [`CircuitParameters`] always yields the
//! same [`LoadingAnalysis`], and no chart or console code is involved.

use std::fmt;

use log::debug;

use crate::circuits::CircuitParameters;
use crate::constants::{MODERATE_LIFT_DB, SIGNIFICANT_BOOST_DB, UNDER_DAMPED_Q};
use crate::math::Scalar;
use crate::response::{frequency_response, FrequencyResponse};
use crate::sweep::FrequencyRange;

/// Location and height of the global magnitude maximum of a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakStatistics {
    /// Sample index of the maximum (first one on ties).
    pub index: usize,
    /// Frequency of the maximum in hertz.
    pub frequency_hz: Scalar,
    /// Magnitude at the maximum in dB.
    pub magnitude_db: Scalar,
    /// Phase at the maximum in degrees.
    pub phase_deg: Scalar,
}

impl PeakStatistics {
    /// Locates the largest magnitude sample of `response`.
    ///
    /// NaN samples never beat a number; an all-NaN sweep reports index 0.
    #[must_use]
    pub fn of(response: &FrequencyResponse) -> Self {
        let magnitudes = response.magnitude_db();
        let mut index = 0;
        for (i, &m) in magnitudes.iter().enumerate() {
            let best = magnitudes[index];
            if m > best || (best.is_nan() && !m.is_nan()) {
                index = i;
            }
        }
        Self {
            index,
            frequency_hz: response.frequencies_hz()[index],
            magnitude_db: response.magnitude_db()[index],
            phase_deg: response.phase_deg()[index],
        }
    }
}

/// Coarse damping class derived from the quality factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    /// `Q > 1`: a resonant peak is visible.
    UnderDamped,
    /// `Q <= 1`: little or no peak.
    CriticalOrOverDamped,
}

impl Damping {
    /// Classifies a quality factor.
    #[must_use]
    pub fn from_q(q: Scalar) -> Self {
        if q > UNDER_DAMPED_Q {
            Self::UnderDamped
        } else {
            Self::CriticalOrOverDamped
        }
    }
}

impl fmt::Display for Damping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnderDamped => f.write_str("Under-damped (resonant peak visible)"),
            Self::CriticalOrOverDamped => f.write_str("Critically/Over-damped (minimal peak)"),
        }
    }
}

/// How audible the resonant peak is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakAssessment {
    /// Peak above 3 dB: likely bright or harsh.
    SignificantBoost,
    /// Peak above 1 dB: typical, rarely a problem.
    ModerateLift,
    /// Anything else.
    WellDamped,
}

impl PeakAssessment {
    /// Classifies a peak magnitude. Thresholds are strict and checked from the top.
    #[must_use]
    pub fn classify(peak_db: Scalar) -> Self {
        if peak_db > SIGNIFICANT_BOOST_DB {
            Self::SignificantBoost
        } else if peak_db > MODERATE_LIFT_DB {
            Self::ModerateLift
        } else {
            Self::WellDamped
        }
    }

    /// One-line advice printed under the headline.
    #[must_use]
    pub const fn advice(&self) -> &'static str {
        match self {
            Self::SignificantBoost => {
                "This may sound bright or harsh. Consider reducing capacitance."
            }
            Self::ModerateLift => "This is typical and usually not problematic.",
            Self::WellDamped => "Good loading for this cartridge.",
        }
    }
}

/// Both standard sweeps of one parameter set with their derived statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadingAnalysis {
    parameters: CircuitParameters,
    audible: FrequencyResponse,
    extended: FrequencyResponse,
    audible_peak: PeakStatistics,
    extended_peak: PeakStatistics,
    phase_at_ideal_deg: Scalar,
}

impl LoadingAnalysis {
    /// Sweeps the audible and extended ranges and derives their peaks.
    #[must_use]
    pub fn run(parameters: &CircuitParameters) -> Self {
        let audible = frequency_response(parameters, &FrequencyRange::AUDIBLE);
        let extended = frequency_response(parameters, &FrequencyRange::EXTENDED);
        let audible_peak = PeakStatistics::of(&audible);
        let extended_peak = PeakStatistics::of(&extended);
        let phase_at_ideal_deg =
            extended.phase_deg()[extended.nearest_index(extended.ideal_resonance_hz())];
        debug!(
            "audible peak {:.1} Hz @ {:.2} dB, extended peak {:.1} Hz @ {:.2} dB",
            audible_peak.frequency_hz,
            audible_peak.magnitude_db,
            extended_peak.frequency_hz,
            extended_peak.magnitude_db
        );
        Self {
            parameters: *parameters,
            audible,
            extended,
            audible_peak,
            extended_peak,
            phase_at_ideal_deg,
        }
    }

    /// The analysed component values.
    #[must_use]
    pub const fn parameters(&self) -> &CircuitParameters {
        &self.parameters
    }

    /// Response over 20 Hz - 20 kHz.
    #[must_use]
    pub const fn audible(&self) -> &FrequencyResponse {
        &self.audible
    }

    /// Response over 20 Hz - 50 kHz.
    #[must_use]
    pub const fn extended(&self) -> &FrequencyResponse {
        &self.extended
    }

    /// Peak of the audible sweep; this is the one reported and classified.
    #[must_use]
    pub const fn audible_peak(&self) -> &PeakStatistics {
        &self.audible_peak
    }

    /// Peak of the extended sweep.
    #[must_use]
    pub const fn extended_peak(&self) -> &PeakStatistics {
        &self.extended_peak
    }

    /// Phase of the extended sweep at the sample nearest the ideal LC resonance.
    #[must_use]
    pub const fn phase_at_ideal_deg(&self) -> Scalar {
        self.phase_at_ideal_deg
    }

    /// Undamped LC resonance in hertz.
    #[must_use]
    pub const fn ideal_resonance_hz(&self) -> Scalar {
        self.audible.ideal_resonance_hz()
    }

    /// Approximate quality factor.
    #[must_use]
    pub const fn quality_factor(&self) -> Scalar {
        self.audible.quality_factor()
    }

    /// Damping class from the quality factor.
    #[must_use]
    pub fn damping(&self) -> Damping {
        Damping::from_q(self.quality_factor())
    }

    /// Interpretation tier from the audible peak magnitude.
    #[must_use]
    pub fn assessment(&self) -> PeakAssessment {
        PeakAssessment::classify(self.audible_peak.magnitude_db)
    }
}
