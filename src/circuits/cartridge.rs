//! The cartridge-into-preamp loading network.
//!
//! ```text
//!   V_cart ── R_cart ── L_cart ──┬─────────┬── V_out
//!                                │         │
//!                              R_load    C_total
//!                                │         │
//!   ─────────────────────────────┴─────────┴──
//! ```

use std::f64::consts::PI;

use crate::constants::{
    DEFAULT_CAPACITANCE_PF, DEFAULT_DC_RESISTANCE_OHMS, DEFAULT_INDUCTANCE_MH,
    DEFAULT_LOAD_RESISTANCE_KOHMS, KILO, MILLI, PICO,
};
use crate::errors::{LoadingError, Result};
use crate::math::{CScalar, Scalar};

use super::component::{divider_ratio, Component, ParallelRc, SeriesRl};

/// Component values as entered by the user, in data-sheet units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParameters {
    inductance_mh: Scalar,
    dc_resistance_ohms: Scalar,
    load_resistance_kohms: Scalar,
    capacitance_pf: Scalar,
}

impl CircuitParameters {
    /// Validates and stores the four component values.
    ///
    /// Inductance, load resistance and capacitance must be positive; the
    /// cartridge DC resistance may be zero. All values must be finite.
    pub fn new(
        inductance_mh: Scalar,
        dc_resistance_ohms: Scalar,
        load_resistance_kohms: Scalar,
        capacitance_pf: Scalar,
    ) -> Result<Self> {
        positive("cartridge inductance", inductance_mh, "mH")?;
        if !(dc_resistance_ohms.is_finite() && dc_resistance_ohms >= 0.0) {
            return Err(LoadingError::invalid(
                "cartridge DC resistance",
                format!("{dc_resistance_ohms} Ω must be zero or positive and finite"),
            ));
        }
        positive("load resistance", load_resistance_kohms, "kΩ")?;
        positive("total capacitance", capacitance_pf, "pF")?;
        Ok(Self {
            inductance_mh,
            dc_resistance_ohms,
            load_resistance_kohms,
            capacitance_pf,
        })
    }

    /// Cartridge inductance in millihenries.
    #[must_use]
    pub const fn inductance_mh(&self) -> Scalar {
        self.inductance_mh
    }

    /// Cartridge DC resistance in ohms.
    #[must_use]
    pub const fn dc_resistance_ohms(&self) -> Scalar {
        self.dc_resistance_ohms
    }

    /// Preamp load resistance in kilohms.
    #[must_use]
    pub const fn load_resistance_kohms(&self) -> Scalar {
        self.load_resistance_kohms
    }

    /// Cable plus preamp capacitance in picofarads.
    #[must_use]
    pub const fn capacitance_pf(&self) -> Scalar {
        self.capacitance_pf
    }

    /// Builds the SI-valued network described by these parameters.
    #[must_use]
    pub fn circuit(&self) -> CartridgeLoad {
        CartridgeLoad::new(
            SeriesRl::new(self.dc_resistance_ohms, self.inductance_mh * MILLI),
            ParallelRc::new(self.load_resistance_kohms * KILO, self.capacitance_pf * PICO),
        )
    }
}

impl Default for CircuitParameters {
    /// A typical moving-magnet cartridge into a 47 kΩ / 200 pF phono stage.
    fn default() -> Self {
        Self {
            inductance_mh: DEFAULT_INDUCTANCE_MH,
            dc_resistance_ohms: DEFAULT_DC_RESISTANCE_OHMS,
            load_resistance_kohms: DEFAULT_LOAD_RESISTANCE_KOHMS,
            capacitance_pf: DEFAULT_CAPACITANCE_PF,
        }
    }
}

fn positive(name: &'static str, value: Scalar, unit: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LoadingError::invalid(
            name,
            format!("{value} {unit} must be positive and finite"),
        ))
    }
}

/// Series R-L source driving a parallel R-C load, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartridgeLoad {
    cartridge: SeriesRl,
    load: ParallelRc,
}

impl CartridgeLoad {
    /// Joins a cartridge branch to a load branch.
    #[must_use]
    pub const fn new(cartridge: SeriesRl, load: ParallelRc) -> Self {
        Self { cartridge, load }
    }

    /// The cartridge (source) branch.
    #[must_use]
    pub const fn cartridge(&self) -> &SeriesRl {
        &self.cartridge
    }

    /// The preamp (load) branch.
    #[must_use]
    pub const fn load(&self) -> &ParallelRc {
        &self.load
    }

    /// Complex voltage ratio `Z_load / (Z_cart + Z_load)` at `omega` rad/s.
    #[must_use]
    pub fn transfer(&self, omega: Scalar) -> CScalar {
        divider_ratio(self.cartridge.impedance(omega), self.load.impedance(omega))
    }

    /// Undamped LC resonance `1 / (2π √(LC))` in hertz.
    #[must_use]
    pub fn ideal_resonance_hz(&self) -> Scalar {
        1.0 / (2.0 * PI * (self.cartridge.inductance() * self.load.capacitance()).sqrt())
    }

    /// Characteristic impedance `√(L/C)` in ohms.
    #[must_use]
    pub fn characteristic_impedance(&self) -> Scalar {
        (self.cartridge.inductance() / self.load.capacitance()).sqrt()
    }

    /// Approximate quality factor `√(L/C) / (R_cart + R_load)`.
    ///
    /// This is not the exact Q of a series-R, parallel-RC network. The report
    /// thresholds are calibrated against this approximation, so it is kept.
    #[must_use]
    pub fn quality_factor(&self) -> Scalar {
        self.characteristic_impedance() / (self.cartridge.resistance() + self.load.resistance())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn defaults_are_typical_moving_magnet_values() {
        let p = CircuitParameters::default();
        assert_eq!(p.inductance_mh(), 500.0);
        assert_eq!(p.dc_resistance_ohms(), 600.0);
        assert_eq!(p.load_resistance_kohms(), 47.0);
        assert_eq!(p.capacitance_pf(), 200.0);
    }

    #[test]
    fn circuit_is_built_in_si_units() {
        let circuit = CircuitParameters::default().circuit();
        assert_relative_eq!(circuit.cartridge().inductance(), 0.5);
        assert_relative_eq!(circuit.cartridge().resistance(), 600.0);
        assert_relative_eq!(circuit.load().resistance(), 47_000.0);
        assert_relative_eq!(circuit.load().capacitance(), 200.0e-12, max_relative = 1.0e-12);
    }

    #[test]
    fn zero_dc_resistance_is_allowed() {
        assert!(CircuitParameters::new(500.0, 0.0, 47.0, 200.0).is_ok());
    }

    #[test]
    fn non_physical_values_are_rejected() {
        assert!(CircuitParameters::new(0.0, 600.0, 47.0, 200.0).is_err());
        assert!(CircuitParameters::new(500.0, -1.0, 47.0, 200.0).is_err());
        assert!(CircuitParameters::new(500.0, 600.0, 0.0, 200.0).is_err());
        assert!(CircuitParameters::new(500.0, 600.0, 47.0, -200.0).is_err());
        assert!(CircuitParameters::new(f64::NAN, 600.0, 47.0, 200.0).is_err());
        assert!(CircuitParameters::new(500.0, 600.0, f64::INFINITY, 200.0).is_err());
    }

    #[test]
    fn rejection_names_the_offending_quantity() {
        let err = CircuitParameters::new(500.0, 600.0, 47.0, 0.0).unwrap_err();
        match err {
            LoadingError::InvalidParameter { name, .. } => assert_eq!(name, "total capacitance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resonance_and_q_follow_closed_form() {
        let circuit = CircuitParameters::default().circuit();
        let l: f64 = 0.5;
        let c: f64 = 200.0e-12;
        assert_relative_eq!(
            circuit.ideal_resonance_hz(),
            1.0 / (2.0 * PI * (l * c).sqrt()),
            max_relative = 1.0e-12
        );
        assert_relative_eq!(
            circuit.quality_factor(),
            (l / c).sqrt() / (600.0 + 47_000.0),
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn transfer_is_near_unity_at_dc() {
        let h = CircuitParameters::default().circuit().transfer(0.0);
        assert_relative_eq!(h.re, 47_000.0 / 47_600.0, max_relative = 1.0e-12);
        assert_relative_eq!(h.im, 0.0);
    }
}
