use clap::Parser;
use colored::Colorize;

use genera::dimacs::{clauses_from_dimacs_file, render_model};
use genera::solver::config::Config;
use genera::solver::trace::{LoggingTrace, NoopTrace, Trace};
use genera::solver::verdict::Verdict;
use genera::solver::Solver;

/// A CDCL SAT solver core: decides satisfiability of a DIMACS CNF file and
/// prints a model, a resolution proof, or a timeout verdict.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a `.cnf` or `.cnf.gz` file in DIMACS format
    #[arg(index = 1)]
    file: String,

    /// Write the satisfying model here instead of printing it
    #[arg(short, long)]
    out: Option<String>,

    /// Write the resolution proof here on UNSAT
    #[arg(short, long)]
    proof: Option<String>,

    #[arg(long, default_value_t = false)]
    enable_restart: bool,

    #[arg(long, default_value_t = 5)]
    restart_threshold: u32,

    #[arg(long, default_value_t = false)]
    enable_subsumption: bool,

    #[arg(long, default_value_t = 1_000_000)]
    max_iterations: u32,

    #[arg(long, default_value_t = 10_000)]
    max_proof_steps: u32,

    /// Emit decision/conflict/restart trace lines via `log`
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    let cnf = match clauses_from_dimacs_file(&args.file) {
        Ok(cnf) => cnf,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            std::process::exit(1);
        }
    };

    let config = Config {
        enable_restart: args.enable_restart,
        restart_threshold: args.restart_threshold,
        enable_subsumption: args.enable_subsumption,
        max_iterations: args.max_iterations,
        max_proof_steps: args.max_proof_steps,
        ..Config::default()
    };

    let cnf_for_check = cnf.clone();

    let trace: Box<dyn Trace> = if args.verbose { Box::new(LoggingTrace) } else { Box::new(NoopTrace) };
    let mut solver = Solver::new(cnf, config);
    let (verdict, stats) = solver.solve(trace.as_ref());

    println!("{}", BANNER.cyan());
    println!("{}", stats.to_table());

    match verdict {
        Verdict::Sat { model } => {
            println!("{}", "SATISFIABLE".green().bold());
            if cnf_for_check.check_named_model(&model) {
                println!("model verified against the input formula");
            } else {
                println!("{}", "WRONG MODEL (this is a solver bug)".red().bold());
            }
            let rendered = render_model(&model, &cnf_for_check.symbols);
            if let Some(path) = args.out {
                if let Err(err) = std::fs::write(&path, &rendered) {
                    eprintln!("{} failed to write {path}: {err}", "error:".red().bold());
                }
            } else {
                println!("{rendered}");
            }
        }
        Verdict::Unsat { proof, truncated } => {
            println!("{}", "UNSATISFIABLE".red().bold());
            if truncated {
                println!("{}", "(proof truncated: step cap exceeded)".yellow());
            }
            if let Some(path) = args.proof {
                if let Err(err) = std::fs::write(&path, &proof) {
                    eprintln!("{} failed to write {path}: {err}", "error:".red().bold());
                }
                println!("proof written to {path}");
            } else {
                println!("{proof}");
            }
        }
        Verdict::Timeout => {
            println!("{}", "TIMEOUT".yellow().bold());
            std::process::exit(2);
        }
    }
}

const BANNER: &str = r#"
    __ _  ___ _ __   ___ _ __ __ _
   / _` |/ _ \ '_ \ / _ \ '__/ _` |
  | (_| |  __/ | | |  __/ | | (_| |
   \__, |\___|_| |_|\___|_|  \__,_|
   |___/
"#;
