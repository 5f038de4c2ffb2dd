mod branch;
mod simplify;

use crate::formula::{Formula, Literal};
use crate::SatResult;
use branch::Branch;
use log::{debug, trace};
use simplify::BcpResult;

/// Counters collected over one call to [`Solver::solve`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SolverStats {
    /// Search nodes visited, including the root.
    pub nodes: usize,
    pub decisions: usize,
    pub propagations: usize,
    pub pure_literals: usize,
    pub conflicts: usize,
}

/// A DPLL solver: recursive branching on the smallest open variable, with unit propagation and
/// pure-literal elimination run to a joint fixpoint at every node.
pub struct Solver {
    formula: Formula,
    stats: SolverStats,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        Self {
            formula,
            stats: SolverStats::default(),
        }
    }

    pub fn solve(&mut self) -> SatResult {
        self.stats = SolverStats::default();
        let result = self.search(Branch::new(self.formula.clone()));

        if let SatResult::Satisfiable(model) = &result {
            debug_assert!(model.satisfies(&self.formula), "model {:?} does not satisfy formula", model);
        }
        debug!("search finished (satisfiable: {}): {:?}", result.is_satisfiable(), self.stats);
        result
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    fn search(&mut self, mut branch: Branch) -> SatResult {
        self.stats.nodes += 1;

        if let BcpResult::Conflict(conflict) = branch.simplify(&mut self.stats) {
            trace!("{} at depth {}", conflict, branch.depth);
            self.stats.conflicts += 1;
            return SatResult::Unsatisfiable;
        }

        if branch.is_complete() {
            return if branch.model.satisfies(&branch.formula) {
                SatResult::Satisfiable(branch.model)
            } else {
                SatResult::Unsatisfiable
            };
        }

        let variable = match branch.open.first() {
            Some(variable) => variable,
            None => return SatResult::Unsatisfiable,
        };
        self.stats.decisions += 1;

        let result = self.try_decision(&branch, Literal::Positive(variable));
        if result.is_satisfiable() {
            return result;
        }
        self.try_decision(&branch, Literal::Negative(variable))
    }

    fn try_decision(&mut self, branch: &Branch, literal: Literal) -> SatResult {
        match branch.decide(literal) {
            Ok(child) => self.search(child),
            Err(conflict) => {
                trace!("{} at depth {}", conflict, branch.depth + 1);
                self.stats.conflicts += 1;
                SatResult::Unsatisfiable
            }
        }
    }
}
