pub mod dimacs;

use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

/// A propositional variable, numbered from 1 as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Converts a nonzero DIMACS integer into a literal. Returns `None` for 0.
    pub fn from_dimacs(value: i64) -> Option<Self> {
        if value > 0 {
            Some(Literal::Positive(Variable(value as usize)))
        } else if value < 0 {
            Some(Literal::Negative(Variable(value.unsigned_abs() as usize)))
        } else {
            None
        }
    }

    pub fn to_dimacs(&self) -> i64 {
        match self {
            Literal::Positive(Variable(x)) => *x as i64,
            Literal::Negative(Variable(x)) => -(*x as i64),
        }
    }

    pub fn variable(&self) -> Variable {
        match self {
            Literal::Positive(v) => *v,
            Literal::Negative(v) => *v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }

    pub fn idx(&self) -> usize {
        self.variable().0
    }

    pub fn negated(&self) -> Self {
        match self {
            Literal::Positive(v) => Literal::Negative(*v),
            Literal::Negative(v) => Literal::Positive(*v),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_dimacs())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.literals.contains(&literal)
    }

    /// The single literal of a unit clause.
    pub fn unit(&self) -> Option<Literal> {
        match self.literals.as_slice() {
            [literal] => Some(*literal),
            _ => None,
        }
    }

    fn remove(&mut self, literal: Literal) {
        self.literals.retain(|l| *l != literal);
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.literals.len() > 1 {
            f.write_str("(")?;
        }
        let mut first_literal = true;
        for literal in &self.literals {
            if first_literal {
                first_literal = false;
            } else {
                f.write_str(" | ")?;
            }
            match literal {
                Literal::Positive(Variable(x)) => write!(f, "{}", x)?,
                Literal::Negative(Variable(x)) => write!(f, "!{}", x)?,
            }
        }
        if self.literals.is_empty() {
            f.write_str("false")?;
        }
        if self.literals.len() > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A CNF formula over the variables `1..=num_variables`.
#[derive(Clone, PartialEq, Eq)]
pub struct Formula {
    num_variables: usize,
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(num_variables: usize, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let clauses: Vec<Clause> = conjuncts.into_iter().collect();
        debug_assert!(clauses
            .iter()
            .flat_map(|clause| clause.literals())
            .all(|literal| literal.idx() >= 1 && literal.idx() <= num_variables));
        Self { num_variables, clauses }
    }

    pub fn num_variables(&self) -> usize {
        self.num_variables
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|clause| clause.is_empty())
    }

    /// Simplifies the formula under the assumption that `literal` is true: every clause
    /// containing it is dropped and its negation is stripped from the rest.
    pub(crate) fn reduce(&mut self, literal: Literal) {
        self.clauses.retain(|clause| !clause.contains(literal));
        let negated = literal.negated();
        for clause in &mut self.clauses {
            clause.remove(negated);
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        write!(f, "[{} vars] {}", self.num_variables, self)
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Builds a formula from DIMACS-style integer clauses, taking the largest magnitude as the
/// variable count.
#[cfg(test)]
pub(crate) fn formula_from(clauses: &[&[i64]]) -> Formula {
    let num_variables = clauses
        .iter()
        .flat_map(|clause| clause.iter())
        .map(|l| l.unsigned_abs() as usize)
        .max()
        .unwrap_or(0);
    Formula::new(
        num_variables,
        clauses
            .iter()
            .map(|clause| Clause::new(clause.iter().map(|l| Literal::from_dimacs(*l).unwrap()))),
    )
}

#[cfg(test)]
pub(crate) fn formula_3sat_strategy() -> impl proptest::strategy::Strategy<Value = Formula> {
    use proptest::prelude::*;

    (1usize..=8).prop_flat_map(|num_variables| {
        let literal = (1..=num_variables, any::<bool>()).prop_map(|(x, positive)| {
            if positive {
                p(x)
            } else {
                n(x)
            }
        });
        let clause = proptest::collection::vec(literal, 1..=3).prop_map(|literals| Clause::new(literals));
        proptest::collection::vec(clause, 0..24).prop_map(move |clauses| Formula::new(num_variables, clauses))
    })
}
