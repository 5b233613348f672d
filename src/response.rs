//! Transfer function evaluation over a frequency sweep.

use log::debug;

use crate::circuits::CircuitParameters;
use crate::constants::angular_frequency;
use crate::math::Scalar;
use crate::sweep::{mag_db, phase_deg, sweep_map, FrequencyRange};

/// Sampled magnitude and phase of the loaded cartridge, plus the sweep-independent
/// resonance figures of the circuit.
///
/// All three sample vectors have the length requested by the [`FrequencyRange`],
/// and the frequencies are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    frequencies_hz: Vec<Scalar>,
    magnitude_db: Vec<Scalar>,
    phase_deg: Vec<Scalar>,
    ideal_resonance_hz: Scalar,
    quality_factor: Scalar,
}

impl FrequencyResponse {
    /// Sample frequencies in hertz, ascending and log-spaced.
    #[must_use]
    pub fn frequencies_hz(&self) -> &[Scalar] {
        &self.frequencies_hz
    }

    /// Voltage ratio in dB at each sample.
    #[must_use]
    pub fn magnitude_db(&self) -> &[Scalar] {
        &self.magnitude_db
    }

    /// Phase of the voltage ratio in degrees at each sample.
    #[must_use]
    pub fn phase_deg(&self) -> &[Scalar] {
        &self.phase_deg
    }

    /// Undamped LC resonance in hertz.
    #[must_use]
    pub const fn ideal_resonance_hz(&self) -> Scalar {
        self.ideal_resonance_hz
    }

    /// Approximate quality factor of the network.
    #[must_use]
    pub const fn quality_factor(&self) -> Scalar {
        self.quality_factor
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    /// True if the sweep holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// Index of the sample closest to `hz` (first one on ties).
    #[must_use]
    pub fn nearest_index(&self, hz: Scalar) -> usize {
        let mut best = 0;
        let mut best_distance = Scalar::INFINITY;
        for (i, f) in self.frequencies_hz.iter().enumerate() {
            let distance = (f - hz).abs();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }

    /// Iterates `(frequency_hz, magnitude_db, phase_deg)` triples.
    pub fn samples(&self) -> impl Iterator<Item = (Scalar, Scalar, Scalar)> + '_ {
        self.frequencies_hz
            .iter()
            .zip(&self.magnitude_db)
            .zip(&self.phase_deg)
            .map(|((&f, &m), &p)| (f, m, p))
    }
}

/// Evaluates `H(jω) = Z_load / (Z_cart + Z_load)` across `range`.
///
/// Pure and deterministic. Degenerate numeric results are returned as computed.
#[must_use]
pub fn frequency_response(params: &CircuitParameters, range: &FrequencyRange) -> FrequencyResponse {
    let circuit = params.circuit();
    let frequencies_hz = range.frequencies();
    let ratios = sweep_map(frequencies_hz.iter().copied().map(angular_frequency), |w| {
        circuit.transfer(w)
    });

    let response = FrequencyResponse {
        magnitude_db: mag_db(&ratios),
        phase_deg: phase_deg(&ratios),
        frequencies_hz,
        ideal_resonance_hz: circuit.ideal_resonance_hz(),
        quality_factor: circuit.quality_factor(),
    };
    debug!(
        "swept {} points over {}..{} Hz (f_res = {:.1} Hz, Q = {:.3})",
        response.len(),
        range.low_hz(),
        range.high_hz(),
        response.ideal_resonance_hz,
        response.quality_factor
    );
    response
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    fn default_audible() -> FrequencyResponse {
        frequency_response(&CircuitParameters::default(), &FrequencyRange::AUDIBLE)
    }

    #[test]
    fn all_series_share_the_sample_count() {
        let r = default_audible();
        assert_eq!(r.len(), 2000);
        assert_eq!(r.magnitude_db().len(), 2000);
        assert_eq!(r.phase_deg().len(), 2000);
        assert!(r.frequencies_hz().windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn spacing_is_geometric() {
        let r = default_audible();
        let f = r.frequencies_hz();
        let ratio = f[1] / f[0];
        for w in f.windows(2) {
            assert_relative_eq!(w[1] / w[0], ratio, max_relative = 1.0e-9);
        }
    }

    #[test]
    fn low_end_is_flat_and_in_phase() {
        let r = default_audible();
        assert!(r.magnitude_db()[0].abs() < 0.2);
        assert!(r.phase_deg()[0].abs() < 0.5);
    }

    #[test]
    fn resonance_figures_match_closed_form() {
        let r = default_audible();
        let (l, c) = (0.5_f64, 200.0e-12_f64);
        assert_relative_eq!(r.ideal_resonance_hz(), 1.0 / (2.0 * PI * (l * c).sqrt()));
        assert_relative_eq!(r.quality_factor(), (l / c).sqrt() / 47_600.0);
        assert_relative_eq!(r.ideal_resonance_hz(), 15_915.494, max_relative = 1.0e-6);
        // √(0.5 H / 200 pF) = 50 kΩ against 47.6 kΩ of total resistance.
        assert_relative_eq!(r.quality_factor(), 1.050_420, max_relative = 1.0e-6);
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let a = default_audible();
        let b = default_audible();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(a.frequencies_hz()), bits(b.frequencies_hz()));
        assert_eq!(bits(a.magnitude_db()), bits(b.magnitude_db()));
        assert_eq!(bits(a.phase_deg()), bits(b.phase_deg()));
    }

    #[test]
    fn nearest_index_picks_closest_sample() {
        let range = FrequencyRange::new(10.0, 1000.0, 3).unwrap();
        let r = frequency_response(&CircuitParameters::default(), &range);
        assert_eq!(r.nearest_index(0.0), 0);
        assert_eq!(r.nearest_index(90.0), 1);
        assert_eq!(r.nearest_index(5000.0), 2);
    }

    #[test]
    fn samples_iterate_in_lockstep() {
        let range = FrequencyRange::new(20.0, 20_000.0, 2).unwrap();
        let r = frequency_response(&CircuitParameters::default(), &range);
        let rows: Vec<_> = r.samples().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, 20.0);
        assert_eq!(rows[1].0, 20_000.0);
        assert_eq!(rows[1].1, r.magnitude_db()[1]);
        assert_eq!(rows[1].2, r.phase_deg()[1]);
    }

    #[test]
    fn results_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FrequencyResponse>();
        assert_send_sync::<CircuitParameters>();
        assert_send_sync::<FrequencyRange>();
    }
}
