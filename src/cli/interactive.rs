//! Prompted entry of circuit values when no positional arguments are given.

use std::io::{BufRead, Write};

use cartridge_loading::circuits::CircuitParameters;
use cartridge_loading::constants::{
    DEFAULT_CAPACITANCE_PF, DEFAULT_DC_RESISTANCE_OHMS, DEFAULT_INDUCTANCE_MH,
    DEFAULT_LOAD_RESISTANCE_KOHMS,
};
use cartridge_loading::errors::{LoadingError, Result};
use cartridge_loading::input::{parse_or_default, phase_from_answer, scale_from_answer, Invocation};

const BANNER_WIDTH: usize = 60;

/// Asks for each value in turn. An empty answer keeps the bracketed default;
/// end of input aborts with [`LoadingError::Cancelled`].
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Invocation> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "CARTRIDGE LOADING CALCULATOR")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "\nEnter cartridge and loading parameters:")?;
    writeln!(out, "(Press Enter for defaults shown in brackets)\n")?;

    let l_cart = parse_or_default(
        "L_cart",
        &ask(input, out, &format!("Cartridge Inductance [{DEFAULT_INDUCTANCE_MH}] mH: "))?,
        DEFAULT_INDUCTANCE_MH,
    )?;
    let r_cart = parse_or_default(
        "R_cart",
        &ask(input, out, &format!("Cartridge DC Resistance [{DEFAULT_DC_RESISTANCE_OHMS}] Ω: "))?,
        DEFAULT_DC_RESISTANCE_OHMS,
    )?;
    let r_load = parse_or_default(
        "R_load",
        &ask(input, out, &format!("Preamp Load Resistance [{DEFAULT_LOAD_RESISTANCE_KOHMS}] kΩ: "))?,
        DEFAULT_LOAD_RESISTANCE_KOHMS,
    )?;
    let c_total = parse_or_default(
        "C_total",
        &ask(
            input,
            out,
            &format!("Total Capacitance (cable + preamp) [{DEFAULT_CAPACITANCE_PF}] pF: "),
        )?,
        DEFAULT_CAPACITANCE_PF,
    )?;
    let parameters = CircuitParameters::new(l_cart, r_cart, r_load, c_total)?;

    let scale = ask(input, out, "Frequency scale (log/linear) [log]: ")?;
    let phase = ask(input, out, "Show phase response? (yes/no) [yes]: ")?;

    Ok(Invocation {
        parameters,
        log_scale: scale_from_answer(&scale),
        show_phase: phase_from_answer(&phase),
    })
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(LoadingError::Cancelled);
    }
    Ok(line.trim().to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use approx::assert_relative_eq;

    use super::*;

    fn run(answers: &str) -> (Result<Invocation>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = prompt(&mut input, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn empty_answers_take_defaults() {
        let (result, transcript) = run("\n\n\n\n\n\n");
        assert_eq!(result.unwrap(), Invocation::default());
        let banner = format!("\n{rule}\nCARTRIDGE LOADING CALCULATOR\n{rule}\n", rule = "=".repeat(60));
        assert!(transcript.starts_with(&banner));
        assert!(transcript.contains("Enter cartridge and loading parameters:"));
        assert!(transcript.contains("(Press Enter for defaults shown in brackets)"));
        assert!(transcript.contains("Cartridge Inductance [500] mH: "));
        assert!(transcript.contains("Total Capacitance (cable + preamp) [200] pF: "));
        assert!(transcript.contains("Show phase response? (yes/no) [yes]: "));
    }

    #[test]
    fn typed_answers_override_defaults() {
        let (result, _) = run("1000\n1000\n100\n100\nlinear\nno\n");
        let inv = result.unwrap();
        assert_relative_eq!(inv.parameters.inductance_mh(), 1000.0);
        assert_relative_eq!(inv.parameters.load_resistance_kohms(), 100.0);
        assert!(!inv.log_scale);
        assert!(!inv.show_phase);
    }

    #[test]
    fn bad_number_stops_before_later_prompts() {
        let (result, transcript) = run("abc\n");
        assert!(matches!(
            result,
            Err(LoadingError::InvalidParameter { name: "L_cart", .. })
        ));
        assert!(!transcript.contains("Cartridge DC Resistance"));
    }

    #[test]
    fn end_of_input_cancels() {
        let (result, _) = run("500\n600\n");
        assert!(matches!(result, Err(LoadingError::Cancelled)));
    }

    #[test]
    fn zero_capacitance_is_rejected() {
        let (result, _) = run("\n\n\n0\n\n\n");
        assert!(matches!(
            result,
            Err(LoadingError::InvalidParameter { name: "total capacitance", .. })
        ));
    }
}
