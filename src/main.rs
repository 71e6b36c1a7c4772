use clap::{App, Arg};
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use watchsat::formula::dimacs::{parse, DimacsParseError};
use watchsat::formula::Formula;
use watchsat::{SolveResult, Solver};

fn main() {
    env_logger::init();

    let matches = App::new("watchsat")
        .about("DPLL satisfiability solver for DIMACS CNF files")
        .arg(
            Arg::with_name("INPUT")
                .help("input file (in DIMACS CNF)")
                .required(true)
                .index(1),
        )
        .get_matches();

    let path = matches.value_of("INPUT").unwrap();
    let filename = Path::new(path)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());

    let formula = match parse_from_file(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}: {}", path, e);
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    let result = Solver::new(formula).solve();
    let elapsed = start.elapsed().as_secs_f64();

    // SAT and UNSAT both exit 0; only i/o and parse failures are errors
    match result {
        SolveResult::Sat(model) => println!(
            "{{\"Instance\": \"{}\", \"Time\": {:.2}, \"Result\": SAT, \"Solution\": {}}}",
            filename, elapsed, model
        ),
        SolveResult::Unsat => println!(
            "{{\"Instance\": \"{}\", \"Time\": {:.2}, \"Result\": UNSAT}}",
            filename, elapsed
        ),
    }
}

fn parse_from_file(path: &str) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}
