//! The two DPLL simplification rules, unit propagation and pure-literal elimination, applied
//! to a single branch.

use super::branch::{Branch, Conflict};
use super::SolverStats;
use crate::formula::Literal;
use log::trace;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum BcpResult {
    Conflict(Conflict),
    NoConflict,
}

impl Branch {
    /// Runs unit propagation and pure-literal elimination, alternating until neither rule
    /// applies or a conflict is found.
    pub(crate) fn simplify(&mut self, stats: &mut SolverStats) -> BcpResult {
        if self.formula.has_empty_clause() {
            return BcpResult::Conflict(Conflict::EmptyClause);
        }
        loop {
            if let BcpResult::Conflict(conflict) = self.propagate_units(stats) {
                return BcpResult::Conflict(conflict);
            }
            if self.eliminate_pure_literals(stats) == 0 {
                return BcpResult::NoConflict;
            }
        }
    }

    /// Asserts the literal of every unit clause over an open variable, repeating until no such
    /// clause is left.
    pub(crate) fn propagate_units(&mut self, stats: &mut SolverStats) -> BcpResult {
        loop {
            let units: Vec<Literal> = self
                .formula
                .clauses()
                .filter_map(|clause| clause.unit())
                .filter(|literal| self.open.contains(literal.variable()))
                .collect();
            if units.is_empty() {
                return BcpResult::NoConflict;
            }

            for literal in units {
                trace!("implied {} at depth {}", literal, self.depth);
                if let Err(conflict) = self.assign(literal) {
                    return BcpResult::Conflict(conflict);
                }
                stats.propagations += 1;
            }

            if self.formula.has_empty_clause() {
                return BcpResult::Conflict(Conflict::EmptyClause);
            }
        }
    }

    /// Asserts every literal whose variable occurs with only one polarity in the remaining
    /// clauses. Returns how many were found.
    pub(crate) fn eliminate_pure_literals(&mut self, stats: &mut SolverStats) -> usize {
        // (occurs positively, occurs negatively), indexed by variable
        let mut polarity = vec![(false, false); self.formula.num_variables() + 1];
        for literal in self.formula.clauses().flat_map(|clause| clause.literals()) {
            let seen = &mut polarity[literal.idx()];
            if literal.is_positive() {
                seen.0 = true;
            } else {
                seen.1 = true;
            }
        }

        let pure: Vec<Literal> = self
            .open
            .iter()
            .filter_map(|v| match polarity[v.0] {
                (true, false) => Some(Literal::Positive(v)),
                (false, true) => Some(Literal::Negative(v)),
                _ => None,
            })
            .collect();

        for literal in &pure {
            trace!("pure {} at depth {}", literal, self.depth);
            // A pure literal's negation appears nowhere, so this can't conflict
            let _ = self.assign(*literal);
        }
        stats.pure_literals += pure.len();
        pure.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{formula_from, formula_3sat_strategy, n, p, Clause, Formula, Variable};
    use proptest::prelude::*;

    fn clauses(f: &Formula) -> Vec<Clause> {
        f.clauses().cloned().collect()
    }

    #[test]
    fn propagate_chain_to_fixpoint() {
        let mut branch = Branch::new(formula_from(&[&[1], &[-1, 2], &[-2, 3], &[-3, 4, 5]]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.propagate_units(&mut stats), BcpResult::NoConflict);

        assert_eq!(branch.model.literals().cloned().collect::<Vec<_>>(), vec![p(1), p(2), p(3)]);
        assert_eq!(clauses(&branch.formula), vec![Clause::new(vec![p(4), p(5)])]);
        assert_eq!(branch.open.iter().collect::<Vec<_>>(), vec![Variable(4), Variable(5)]);
        assert_eq!(stats.propagations, 3);
    }

    #[test]
    fn propagate_contradictory_units() {
        let mut branch = Branch::new(formula_from(&[&[1], &[-1]]));
        let mut stats = SolverStats::default();
        assert_eq!(
            branch.propagate_units(&mut stats),
            BcpResult::Conflict(Conflict::Contradiction(n(1)))
        );
    }

    #[test]
    fn propagate_to_empty_clause() {
        let mut branch = Branch::new(formula_from(&[&[1], &[-1, 2], &[-1, -2, 3], &[-2, -3]]));
        let mut stats = SolverStats::default();
        assert!(matches!(branch.propagate_units(&mut stats), BcpResult::Conflict(_)));
    }

    #[test]
    fn propagate_duplicate_units() {
        let mut branch = Branch::new(formula_from(&[&[2], &[2], &[1, -2]]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.propagate_units(&mut stats), BcpResult::NoConflict);
        assert_eq!(branch.model.literals().cloned().collect::<Vec<_>>(), vec![p(2), p(1)]);
        assert!(branch.formula.clauses().next().is_none());
    }

    #[test]
    fn eliminate_pure() {
        let mut branch = Branch::new(formula_from(&[&[1, 2], &[1, -2], &[-3, 2]]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.eliminate_pure_literals(&mut stats), 2);

        assert!(branch.model.contains(p(1)));
        assert!(branch.model.contains(n(3)));
        assert!(branch.formula.clauses().next().is_none());
        assert_eq!(branch.open.iter().collect::<Vec<_>>(), vec![Variable(2)]);
        assert_eq!(stats.pure_literals, 2);
    }

    #[test]
    fn eliminate_ignores_absent_variables() {
        let mut branch = Branch::new(Formula::new(3, vec![Clause::new(vec![p(1), n(1)])]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.eliminate_pure_literals(&mut stats), 0);
        assert_eq!(branch.open.len(), 3);
    }

    #[test]
    fn simplify_alternates_rules() {
        // 3 is forced, which leaves 1 pure; once its clauses are gone 2 is pure as well
        let mut branch = Branch::new(formula_from(&[&[1, -2], &[1, 2, -3], &[3], &[-2, -3, 4], &[-4, -2]]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.simplify(&mut stats), BcpResult::NoConflict);
        assert!(branch.formula.clauses().next().is_none());
        assert_eq!(branch.open.iter().collect::<Vec<_>>(), vec![Variable(4)]);
        assert_eq!(branch.model.literals().cloned().collect::<Vec<_>>(), vec![p(3), p(1), n(2)]);
        assert!(branch.model.satisfies(&formula_from(&[&[1, -2], &[1, 2, -3], &[3], &[-2, -3, 4], &[-4, -2]])));
    }

    #[test]
    fn simplify_input_empty_clause() {
        let mut branch = Branch::new(formula_from(&[&[1], &[]]));
        let mut stats = SolverStats::default();
        assert_eq!(branch.simplify(&mut stats), BcpResult::Conflict(Conflict::EmptyClause));
    }

    #[test]
    fn pure_literal_elimination_is_idempotent_without_pure_literals() {
        let mut branch = Branch::new(formula_from(&[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]]));
        let before = branch.clone();
        let mut stats = SolverStats::default();
        assert_eq!(branch.eliminate_pure_literals(&mut stats), 0);
        assert_eq!(branch.formula, before.formula);
        assert_eq!(branch.model, before.model);
        assert_eq!(branch.open, before.open);
    }

    proptest! {
        #[test]
        fn proptest_propagation_fixpoint(f in formula_3sat_strategy()) {
            let mut branch = Branch::new(f);
            let mut stats = SolverStats::default();
            if branch.propagate_units(&mut stats) == BcpResult::NoConflict {
                for clause in branch.formula.clauses() {
                    if let Some(literal) = clause.unit() {
                        prop_assert!(!branch.open.contains(literal.variable()));
                    }
                }
            }
        }

        #[test]
        fn proptest_pure_elimination_idempotent(f in formula_3sat_strategy()) {
            let mut branch = Branch::new(f);
            let mut stats = SolverStats::default();
            while branch.eliminate_pure_literals(&mut stats) > 0 {}

            let before = branch.clone();
            prop_assert_eq!(branch.eliminate_pure_literals(&mut stats), 0);
            prop_assert_eq!(&branch.formula, &before.formula);
            prop_assert_eq!(&branch.model, &before.model);
            prop_assert_eq!(&branch.open, &before.open);
        }

        #[test]
        fn proptest_simplify_keeps_model_consistent(f in formula_3sat_strategy()) {
            let mut branch = Branch::new(f.clone());
            let mut stats = SolverStats::default();
            if branch.simplify(&mut stats) == BcpResult::NoConflict {
                // every remaining clause only mentions open variables
                for literal in branch.formula.clauses().flat_map(|c| c.literals()) {
                    prop_assert!(branch.open.contains(literal.variable()));
                }
                prop_assert_eq!(branch.model.len() + branch.open.len(), f.num_variables());
            }
        }
    }
}
