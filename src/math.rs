//! Shared numerical aliases anchored on `num_complex`.

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Primary complex scalar type used for impedances and transfer ratios.
pub type CScalar = num_complex::Complex<Scalar>;

/// Magnitude of a voltage ratio in decibels, `20 log10(|h|)`.
///
/// A zero ratio yields negative infinity; nothing is clamped.
#[inline]
#[must_use]
pub fn ratio_db(h: CScalar) -> Scalar {
    20.0 * h.norm().log10()
}

/// Principal phase angle of `h` in degrees, in (-180, 180].
#[inline]
#[must_use]
pub fn phase_degrees(h: CScalar) -> Scalar {
    h.im.atan2(h.re).to_degrees()
}
