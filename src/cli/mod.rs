use std::io;
use std::path::PathBuf;
use std::process::{self, ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;

use cartridge_loading::chart::ChartStyle;
use cartridge_loading::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE};
use cartridge_loading::errors::LoadingError;
use cartridge_loading::input::Invocation;
use cartridge_loading::report::{export_sweep_csv, RenderOptions, ReportRenderer};

mod interactive;

const CANCELLED: &str = "\n\n✗ Cancelled by user";

/// Phono cartridge loading calculator
#[derive(Parser, Debug)]
#[command(name = "cartridge-loading")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Cartridge inductance in mH (omit all values for interactive mode)
    #[arg(value_name = "L_CART")]
    l_cart: Option<String>,

    /// Cartridge DC resistance in Ω
    #[arg(value_name = "R_CART")]
    r_cart: Option<String>,

    /// Preamp load resistance in kΩ
    #[arg(value_name = "R_LOAD")]
    r_load: Option<String>,

    /// Total capacitance (cable + preamp) in pF
    #[arg(value_name = "C_TOTAL")]
    c_total: Option<String>,

    /// 'log' or 'linear' frequency axis (default: log)
    #[arg(value_name = "SCALE")]
    scale: Option<String>,

    /// 'yes' or 'no' to show phase traces (default: yes)
    #[arg(value_name = "PHASE")]
    phase: Option<String>,

    /// Directory for the chart image
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// File name of the chart image
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output_file: String,

    /// Also write the extended sweep to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    /// Positional values in order, stopping at the first one not given.
    fn positionals(&self) -> Vec<&str> {
        [
            &self.l_cart,
            &self.r_cart,
            &self.r_load,
            &self.c_total,
            &self.scale,
            &self.phase,
        ]
        .into_iter()
        .map_while(|v| v.as_deref())
        .collect()
    }

    fn render_options(&self, invocation: &Invocation) -> RenderOptions {
        RenderOptions {
            style: ChartStyle {
                log_scale: invocation.log_scale,
                show_phase: invocation.show_phase,
            },
            output_dir: self.output_dir.clone(),
            output_file: self.output_file.clone(),
        }
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: &Cli) -> ExitCode {
    let invocation = if cli.l_cart.is_none() {
        cancel_on_interrupt();
        let stdin = io::stdin();
        match interactive::prompt(&mut stdin.lock(), &mut io::stdout()) {
            Ok(invocation) => invocation,
            Err(LoadingError::Cancelled) => {
                eprintln!("{CANCELLED}");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("\n✗ Error: Invalid input - {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        match Invocation::from_args(&cli.positionals()) {
            Ok(invocation) => invocation,
            Err(err) => {
                warn!("{err}");
                print_usage();
                return ExitCode::FAILURE;
            }
        }
    };

    println!("\nGenerating cartridge loading plot...");
    match run(cli, &invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("\n✗ Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Ctrl-C at a prompt ends the program the same way as end of input.
fn cancel_on_interrupt() {
    let installed = ctrlc::set_handler(|| {
        eprintln!("{CANCELLED}");
        process::exit(1);
    });
    if let Err(err) = installed {
        warn!("could not install interrupt handler: {err}");
    }
}

fn run(cli: &Cli, invocation: &Invocation) -> Result<()> {
    let renderer = ReportRenderer::with_options(cli.render_options(invocation));
    let rendered = renderer
        .render(&invocation.parameters, &mut io::stdout().lock())
        .context("failed to produce the loading report")?;

    if let Some(path) = &cli.csv {
        export_sweep_csv(path, rendered.analysis.extended())
            .with_context(|| format!("failed to write sweep data to {}", path.display()))?;
        println!("✓ Sweep data saved to: {}", path.display());
    }
    Ok(())
}

fn print_usage() {
    eprintln!("\nUsage: cartridge-loading L_cart R_cart R_load C_total [scale] [phase]");
    eprintln!("\nArguments:");
    eprintln!("  L_cart   : Cartridge inductance in mH");
    eprintln!("  R_cart   : Cartridge DC resistance in Ω");
    eprintln!("  R_load   : Preamp load resistance in kΩ");
    eprintln!("  C_total  : Total capacitance (cable + preamp) in pF");
    eprintln!("  scale    : 'log' or 'linear' (optional, default: log)");
    eprintln!("  phase    : 'yes' or 'no' to show phase plots (optional, default: yes)");
    eprintln!("\nExample:");
    eprintln!("  cartridge-loading 500 600 47 200 log yes");
}
