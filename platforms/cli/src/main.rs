use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tm_translator::machine::{Simulation, StepResult, TuringMachine};
use tm_translator::{format, translate};

const DEFAULT_OUTPUT: &str = "one_taped_translation.tm";
const DEBUG_STEP_BUDGET: usize = 100_000;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The two-taped machine's `.tm` file
    input: String,

    /// Where to write the translated one-taped machine
    output: Option<String>,

    /// Run the translated machine on `--debug-input` and report accept/reject
    #[clap(short = 'd', long)]
    debug: bool,

    /// Also run the original two-taped machine and compare verdicts (implies --debug)
    #[clap(long)]
    compare: bool,

    /// The input word to use for `--debug`/`--compare`, one letter per token
    #[clap(long = "debug-input")]
    debug_input: Vec<String>,

    /// Raise log verbosity (-v, -vv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input_path = Path::new(&cli.input);
    let two_tape = match format::load_tm(input_path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error reading {}: {e}", input_path.display());
            return ExitCode::FAILURE;
        }
    };

    let one_tape = match translate::translate(&two_tape) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("error translating {}: {e}", input_path.display());
            return ExitCode::FAILURE;
        }
    };

    let output_path: PathBuf = cli
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let rendered = format::write_tm(&one_tape);
    if let Err(e) = format::save_tm(&output_path, &one_tape) {
        eprintln!("error writing {}: {e}", output_path.display());
        return ExitCode::FAILURE;
    }
    print!("{rendered}");

    if cli.debug || cli.compare {
        run_debug(&one_tape, &cli.debug_input, &two_tape, cli.compare);
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Runs the translated one-taped machine on `input`, and with `--compare`
/// runs the original two-taped machine on the same input, reporting both
/// verdicts side by side.
fn run_debug(one_tape: &TuringMachine, input: &[String], two_tape: &TuringMachine, compare: bool) {
    let one_result = run_to_verdict(one_tape, input);
    println!("\none-taped machine on {input:?}: {one_result}");

    if compare {
        let two_result = run_to_verdict(two_tape, input);
        println!("two-taped machine on {input:?}: {two_result}");
        if one_result != two_result {
            println!("mismatch: translated machine disagrees with the original");
        }
    }
}

fn run_to_verdict(machine: &TuringMachine, input: &[String]) -> &'static str {
    let mut sim = Simulation::new(machine, input);
    match sim.run(DEBUG_STEP_BUDGET) {
        StepResult::Accepted => "accepted",
        StepResult::Halted => "rejected (halted)",
        StepResult::Continue => "did not halt within the step budget",
    }
}
