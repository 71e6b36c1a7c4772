pub mod dimacs;

use std::collections::HashSet;
use std::fmt::{self, Display, Formatter};

/// A propositional variable, numbered `1..=num_vars` as in DIMACS.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub u32);

impl Variable {
    /// Slot for this variable in 0-based per-variable tables.
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variable or its negation, encoded DIMACS-style as a non-zero signed
/// integer: `3` is x3, `-3` is ¬x3. Negation is an involution.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Literal(i32);

impl Literal {
    pub fn new(variable: Variable, positive: bool) -> Self {
        let code = variable.0 as i32;
        Literal(if positive { code } else { -code })
    }

    /// `None` for the DIMACS clause terminator `0`.
    pub fn from_dimacs(code: i32) -> Option<Self> {
        if code == 0 {
            None
        } else {
            Some(Literal(code))
        }
    }

    pub fn variable(self) -> Variable {
        Variable(self.0.abs() as u32)
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn negated(self) -> Self {
        Literal(-self.0)
    }

    /// Slot for this literal in per-literal tables (watch lists): the
    /// positive literal of a variable sits at the even slot, the negative
    /// one right after it.
    pub fn index(self) -> usize {
        self.variable().index() * 2 + if self.is_positive() { 0 } else { 1 }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of a clause within its owning [`Formula`]. The occurrence index
/// and the watch lists store these rather than clause copies.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClauseIdx(pub(crate) usize);

/// A disjunction of literals. Duplicate literals are dropped at
/// construction, preserving first-occurrence order. During search the
/// literals at positions 0 and 1 are the two watched literals.
#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        let mut literals = vec![];
        let mut seen = HashSet::new();
        for literal in disjuncts {
            if seen.insert(literal) {
                literals.push(literal);
            }
        }
        Self { literals }
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

    /// True if the clause contains both a literal and its negation.
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|l| self.literals.contains(&l.negated()))
    }

    pub fn watched_a(&self) -> Option<Literal> {
        self.literals.get(0).copied()
    }

    pub fn watched_b(&self) -> Option<Literal> {
        self.literals.get(1).copied()
    }

    pub(crate) fn get(&self, position: usize) -> Literal {
        self.literals[position]
    }

    /// Swap the literal at `position` into watch slot `slot` (0 or 1).
    pub(crate) fn rewatch(&mut self, slot: usize, position: usize) {
        debug_assert!(slot < 2);
        self.literals.swap(slot, position);
    }
}

/// A CNF formula: clauses over variables `1..=num_vars`, plus an
/// occurrence index mapping each variable to the clauses mentioning it in
/// either polarity. The formula owns its clauses; the index holds
/// [`ClauseIdx`] references only.
///
/// Ingest normalizes: duplicate literals within a clause are dropped (by
/// [`Clause::new`]) and tautological clauses are discarded entirely.
#[derive(Clone, Debug)]
pub struct Formula {
    num_vars: u32,
    clauses: Vec<Clause>,
    occurrences: Vec<Vec<ClauseIdx>>,
    has_empty_clause: bool,
}

impl Formula {
    pub fn new(num_vars: u32, conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        let mut formula = Self {
            num_vars,
            clauses: vec![],
            occurrences: vec![vec![]; num_vars as usize],
            has_empty_clause: false,
        };
        for clause in conjuncts {
            formula.add_clause(clause);
        }
        formula
    }

    fn add_clause(&mut self, clause: Clause) {
        if clause.is_tautology() {
            return;
        }
        assert!(
            clause.literals().all(|l| l.variable().0 <= self.num_vars),
            "literal out of range for formula over {} variables",
            self.num_vars
        );
        if clause.is_empty() {
            self.has_empty_clause = true;
        }
        let idx = ClauseIdx(self.clauses.len());
        for literal in clause.literals() {
            self.occurrences[literal.variable().index()].push(idx);
        }
        self.clauses.push(clause);
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> {
        (1..=self.num_vars).map(Variable)
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    pub fn clause(&self, idx: ClauseIdx) -> &Clause {
        &self.clauses[idx.0]
    }

    pub(crate) fn clause_mut(&mut self, idx: ClauseIdx) -> &mut Clause {
        &mut self.clauses[idx.0]
    }

    /// Whether an empty clause was supplied at ingest. Such a formula is
    /// trivially unsatisfiable.
    pub fn has_empty_clause(&self) -> bool {
        self.has_empty_clause
    }

    /// Clauses containing `variable` in either polarity.
    pub fn occurrences(&self, variable: Variable) -> &[ClauseIdx] {
        &self.occurrences[variable.index()]
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in clause.literals() {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                write!(f, "{}", literal)?;
            }
            if clause.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn p(x: u32) -> Literal {
    Literal::new(Variable(x), true)
}

#[cfg(test)]
pub(crate) fn n(x: u32) -> Literal {
    Literal::new(Variable(x), false)
}
