//! Parsing of user-supplied parameter tokens.
//!
//! Command-line and interactive entry accept slightly different spellings for
//! the two switches; both forms are kept here so the binary stays thin.

use crate::circuits::CircuitParameters;
use crate::errors::{LoadingError, Result};

/// Everything an entry point collects before rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Invocation {
    /// Component values.
    pub parameters: CircuitParameters,
    /// Logarithmic (true) or linear frequency axis.
    pub log_scale: bool,
    /// Draw phase traces on a secondary axis.
    pub show_phase: bool,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            parameters: CircuitParameters::default(),
            log_scale: true,
            show_phase: true,
        }
    }
}

impl Invocation {
    /// Builds an invocation from positional arguments
    /// `L_cart R_cart R_load C_total [scale] [phase]`.
    ///
    /// Tokens past the sixth are ignored.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let parameters = CircuitParameters::new(
            required("L_cart", token(args, 0))?,
            required("R_cart", token(args, 1))?,
            required("R_load", token(args, 2))?,
            required("C_total", token(args, 3))?,
        )?;
        Ok(Self {
            parameters,
            log_scale: token(args, 4).map_or(true, scale_from_arg),
            show_phase: token(args, 5).map_or(true, phase_from_arg),
        })
    }
}

fn token<S: AsRef<str>>(args: &[S], i: usize) -> Option<&str> {
    args.get(i).map(AsRef::as_ref)
}

fn required(name: &'static str, token: Option<&str>) -> Result<f64> {
    match token {
        Some(t) => parse_value(name, t),
        None => Err(LoadingError::invalid(name, "missing argument")),
    }
}

/// Parses one numeric token, naming `name` in the error.
pub fn parse_value(name: &'static str, token: &str) -> Result<f64> {
    let trimmed = token.trim();
    trimmed.parse::<f64>().map_err(|_| {
        LoadingError::invalid(name, format!("could not convert '{trimmed}' to a number"))
    })
}

/// Parses a prompted numeric answer; an empty answer selects `default`.
pub fn parse_or_default(name: &'static str, answer: &str, default: f64) -> Result<f64> {
    if answer.trim().is_empty() {
        Ok(default)
    } else {
        parse_value(name, answer)
    }
}

/// Command-line scale switch: `log`, `logarithmic`, `true`, `1` select a log axis.
#[must_use]
pub fn scale_from_arg(token: &str) -> bool {
    matches!(
        token.trim().to_lowercase().as_str(),
        "log" | "logarithmic" | "true" | "1"
    )
}

/// Command-line phase switch: `phase`, `true`, `1`, `yes` show the phase trace.
#[must_use]
pub fn phase_from_arg(token: &str) -> bool {
    matches!(
        token.trim().to_lowercase().as_str(),
        "phase" | "true" | "1" | "yes"
    )
}

/// Prompted scale answer: empty, `log` or `logarithmic` select a log axis.
#[must_use]
pub fn scale_from_answer(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "log" | "logarithmic"
    )
}

/// Prompted phase answer: empty, `yes`, `y`, `true`, `1` show the phase trace.
#[must_use]
pub fn phase_from_answer(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "" | "yes" | "y" | "true" | "1"
    )
}
