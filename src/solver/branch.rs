use crate::formula::{Formula, Literal};
use crate::model::{Assertion, Model, OpenVariables};
use log::trace;
use std::fmt::{self, Display, Formatter};

/// Why a branch can't be extended to a model.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Conflict {
    /// Both polarities of the literal's variable were asserted.
    Contradiction(Literal),
    /// Every literal of some clause was falsified.
    EmptyClause,
}

impl Display for Conflict {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Conflict::Contradiction(literal) => write!(f, "contradiction on {}", literal),
            Conflict::EmptyClause => f.write_str("empty clause"),
        }
    }
}

/// The state owned by one node of the search. Sibling branches each get their own clone, so
/// nothing done while exploring one of them is visible to the other.
#[derive(Clone, Debug)]
pub(crate) struct Branch {
    pub(crate) formula: Formula,
    pub(crate) model: Model,
    pub(crate) open: OpenVariables,
    pub(crate) depth: usize,
}

impl Branch {
    pub(crate) fn new(formula: Formula) -> Self {
        let num_variables = formula.num_variables();
        Self {
            formula,
            model: Model::new(num_variables),
            open: OpenVariables::all(num_variables),
            depth: 0,
        }
    }

    /// Makes `literal` true: records it in the model, drops the clauses it satisfies, strips
    /// its negation from the others and closes its variable.
    pub(crate) fn assign(&mut self, literal: Literal) -> Result<(), Conflict> {
        match self.model.assert(literal) {
            Assertion::Contradiction => return Err(Conflict::Contradiction(literal)),
            Assertion::Duplicate => return Ok(()),
            Assertion::Added => {}
        }
        self.formula.reduce(literal);
        self.open.close(literal.variable());
        Ok(())
    }

    /// A child of this node with `literal` decided.
    pub(crate) fn decide(&self, literal: Literal) -> Result<Branch, Conflict> {
        trace!("decision {} at depth {}", literal, self.depth + 1);
        let mut child = self.clone();
        child.depth += 1;
        child.assign(literal)?;
        Ok(child)
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.model.is_complete(self.formula.num_variables())
    }
}
