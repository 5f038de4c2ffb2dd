//! Rendering of a solver outcome.
//!
//! Prints `UNSAT`, or `SAT` followed (in verbose mode) by the true literals and then the
//! false literals, each line sorted ascending.

use crate::formula::Literal;
use crate::SatResult;
use std::io::{self, Write};

pub fn write_result<W: Write>(out: &mut W, result: &SatResult, verbose: bool) -> io::Result<()> {
    match result {
        SatResult::Unsatisfiable => writeln!(out, "UNSAT"),
        SatResult::Satisfiable(model) => {
            writeln!(out, "SAT")?;
            if verbose {
                writeln!(out, "{}", join(&model.positives()))?;
                writeln!(out, "{}", join(&model.negatives()))?;
            }
            Ok(())
        }
    }
}

fn join(literals: &[Literal]) -> String {
    literals.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" ")
}
