use crate::formula::{Formula, Literal, Variable};
use std::collections::BTreeSet;

/// A (partial) truth assignment, kept as the sequence of literals asserted so far.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    literals: Vec<Literal>,
    // Indexed by variable; slot 0 is unused
    values: Vec<Option<bool>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Assertion {
    Added,
    Duplicate,
    /// The negation of the literal is already asserted.
    Contradiction,
}

impl Model {
    pub fn new(num_variables: usize) -> Self {
        Self {
            literals: vec![],
            values: vec![None; num_variables + 1],
        }
    }

    pub fn assert(&mut self, literal: Literal) -> Assertion {
        match self.value(literal.variable()) {
            Some(value) if value == literal.is_positive() => Assertion::Duplicate,
            Some(_) => Assertion::Contradiction,
            None => {
                if literal.idx() >= self.values.len() {
                    self.values.resize(literal.idx() + 1, None);
                }
                self.values[literal.idx()] = Some(literal.is_positive());
                self.literals.push(literal);
                Assertion::Added
            }
        }
    }

    pub fn value(&self, variable: Variable) -> Option<bool> {
        self.values.get(variable.0).copied().flatten()
    }

    pub fn contains(&self, literal: Literal) -> bool {
        self.value(literal.variable()) == Some(literal.is_positive())
    }

    /// Literals in the order they were asserted.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True iff every variable in `1..=num_variables` has a value.
    pub fn is_complete(&self, num_variables: usize) -> bool {
        (1..=num_variables).all(|x| self.value(Variable(x)).is_some())
    }

    /// True iff every clause of `formula` has at least one literal in this model.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|literal| self.contains(*literal)))
    }

    /// The true literals, ascending.
    pub fn positives(&self) -> Vec<Literal> {
        let mut positives: Vec<Literal> = self.literals.iter().filter(|l| l.is_positive()).copied().collect();
        positives.sort_by_key(|l| l.to_dimacs());
        positives
    }

    /// The false literals, ascending by signed value.
    pub fn negatives(&self) -> Vec<Literal> {
        let mut negatives: Vec<Literal> = self.literals.iter().filter(|l| !l.is_positive()).copied().collect();
        negatives.sort_by_key(|l| l.to_dimacs());
        negatives
    }
}

/// Variables that have no value yet on the current branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenVariables {
    variables: BTreeSet<Variable>,
}

impl OpenVariables {
    pub fn all(num_variables: usize) -> Self {
        Self {
            variables: (1..=num_variables).map(Variable).collect(),
        }
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.variables.contains(&variable)
    }

    pub fn close(&mut self, variable: Variable) -> bool {
        self.variables.remove(&variable)
    }

    /// The smallest open variable, used as the branching choice.
    pub fn first(&self) -> Option<Variable> {
        self.variables.iter().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        self.variables.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
