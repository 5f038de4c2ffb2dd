use clap::{App, Arg, ErrorKind};
use dpllsat::formula::dimacs::{parse_file, DimacsParseError};
use dpllsat::report::write_result;
use dpllsat::*;
use std::io::{self, Write};
use std::process;

const EXIT_IO: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_FORMAT: i32 = 5;

fn main() {
    env_logger::init();

    let matches = App::new("dpllsat")
        .about("Decides satisfiability of a DIMACS CNF formula with DPLL")
        .arg(
            Arg::with_name("ifile")
                .short("i")
                .long("ifile")
                .value_name("FILE")
                .help("input file (in CNF)")
                .takes_value(true)
                .required(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .help("print the satisfying assignment"),
        )
        .get_matches_safe();

    let matches = match matches {
        Ok(matches) => matches,
        Err(e) if e.kind == ErrorKind::HelpDisplayed || e.kind == ErrorKind::VersionDisplayed => {
            println!("{}", e.message);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", e.message);
            process::exit(EXIT_USAGE);
        }
    };

    // `ifile` is required, so clap has already rejected a missing path
    let path = matches.value_of("ifile").unwrap_or_default();
    let verbose = matches.is_present("verbose");

    let f = match parse_file(path) {
        Ok(f) => f,
        Err(e @ DimacsParseError::NonStandardEncoding { .. }) => {
            println!("{}", e);
            process::exit(EXIT_FORMAT);
        }
        Err(DimacsParseError::Io(e)) => {
            eprintln!("{}: {}", path, e);
            process::exit(EXIT_IO);
        }
        Err(e) => {
            eprintln!("parse error: {}", e);
            process::exit(EXIT_FORMAT);
        }
    };

    let mut solver = Solver::new(f);
    let result = solver.solve();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_result(&mut out, &result, verbose).and_then(|_| out.flush()) {
        eprintln!("failed to write result: {}", e);
        process::exit(EXIT_IO);
    }
}
