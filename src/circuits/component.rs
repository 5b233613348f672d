use crate::math::{CScalar, Scalar};

/// Trait implemented by every two-terminal element that can provide a frequency-domain impedance.
pub trait Component {
    /// Returns the element's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> CScalar;
}

/// Resistor and inductor in series: the electrical model of a moving-magnet
/// cartridge's coil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRl {
    resistance: Scalar,
    inductance: Scalar,
}

impl SeriesRl {
    /// Creates the branch from a resistance in ohms and an inductance in henries.
    #[must_use]
    pub const fn new(resistance_ohms: Scalar, inductance_h: Scalar) -> Self {
        Self {
            resistance: resistance_ohms,
            inductance: inductance_h,
        }
    }

    /// Series resistance in ohms.
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Inductance in henries.
    #[must_use]
    pub const fn inductance(&self) -> Scalar {
        self.inductance
    }
}

impl Component for SeriesRl {
    fn impedance(&self, omega: Scalar) -> CScalar {
        CScalar::new(self.resistance, omega * self.inductance)
    }
}

/// Resistor and capacitor in parallel: the preamp input resistance shunted by
/// input plus cable capacitance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelRc {
    resistance: Scalar,
    capacitance: Scalar,
}

impl ParallelRc {
    /// Creates the branch from a resistance in ohms and a capacitance in farads.
    #[must_use]
    pub const fn new(resistance_ohms: Scalar, capacitance_f: Scalar) -> Self {
        Self {
            resistance: resistance_ohms,
            capacitance: capacitance_f,
        }
    }

    /// Shunt resistance in ohms.
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Capacitance in farads.
    #[must_use]
    pub const fn capacitance(&self) -> Scalar {
        self.capacitance
    }
}

impl Component for ParallelRc {
    // R / (1 + jωRC), finite at ω = 0.
    fn impedance(&self, omega: Scalar) -> CScalar {
        CScalar::new(self.resistance, 0.0)
            / CScalar::new(1.0, omega * self.resistance * self.capacitance)
    }
}

/// Output/input voltage ratio of a divider with `source` in series and `load` to ground.
#[inline]
#[must_use]
pub fn divider_ratio(source: CScalar, load: CScalar) -> CScalar {
    load / (source + load)
}
