mod assignment;
pub mod formula;
mod heuristic;
mod propagate;
mod solver;

#[cfg(test)]
mod brute_force;

use std::fmt::{self, Display, Formatter};

pub use formula::{Clause, ClauseIdx, Formula, Literal, Variable};
pub use solver::Solver;

/// Outcome of a solve: a satisfying total assignment, or a report that no
/// assignment satisfies the formula. UNSAT is a result, not an error.
#[derive(PartialEq, Clone, Debug)]
pub enum SolveResult {
    Sat(Model),
    Unsat,
}

/// A total assignment of a formula's variables. Variables the search
/// never needed to assign default to `true`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Model {
    values: Vec<bool>,
}

impl Model {
    pub(crate) fn new(values: Vec<bool>) -> Self {
        Self { values }
    }

    pub fn num_vars(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn value(&self, variable: Variable) -> bool {
        self.values[variable.index()]
    }

    /// `(variable, value)` pairs in ascending variable order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (Variable(i as u32 + 1), v))
    }

    /// True iff every clause of `formula` has at least one literal made
    /// true by this model.
    pub fn satisfies(&self, formula: &Formula) -> bool {
        formula
            .clauses()
            .all(|clause| clause.literals().any(|l| self.value(l.variable()) == l.is_positive()))
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str("{")?;
        for (i, (variable, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", variable, value)?;
        }
        f.write_str("}")
    }
}
