use crate::formula::{Literal, Variable};
use log::trace;

/// Truth value of a variable or literal under the current partial
/// assignment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Value {
    True,
    False,
    Unassigned,
}

/// How an assignment reached the trail.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Source {
    Decision,
    Propagation,
}

#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    variable: Variable,
    level: u32,
    #[allow(unused)] // recorded for trace output only
    source: Source,
}

/// The partial assignment together with its undo history and phase
/// memory. Assignments are appended in order; `backtrack_to` pops
/// everything above a decision level, saving each popped variable's value
/// so the next decision on it retries the same polarity first.
#[derive(Debug)]
pub(crate) struct Trail {
    values: Vec<Value>,
    phase: Vec<Option<bool>>,
    entries: Vec<TrailEntry>,
    decision_level: u32,
}

impl Trail {
    pub(crate) fn new(num_vars: u32) -> Self {
        let n = num_vars as usize;
        Self {
            values: vec![Value::Unassigned; n],
            phase: vec![None; n],
            entries: vec![],
            decision_level: 0,
        }
    }

    pub(crate) fn decision_level(&self) -> u32 {
        self.decision_level
    }

    pub(crate) fn new_decision_level(&mut self) {
        self.decision_level += 1;
    }

    pub(crate) fn variable_value(&self, variable: Variable) -> Value {
        self.values[variable.index()]
    }

    pub(crate) fn is_assigned(&self, variable: Variable) -> bool {
        self.variable_value(variable) != Value::Unassigned
    }

    /// Value of a literal: the variable's value, flipped for negative
    /// polarity.
    pub(crate) fn value(&self, literal: Literal) -> Value {
        match self.values[literal.variable().index()] {
            Value::Unassigned => Value::Unassigned,
            value => {
                if (value == Value::True) == literal.is_positive() {
                    Value::True
                } else {
                    Value::False
                }
            }
        }
    }

    /// The polarity `variable` last held before being undone, if any.
    pub(crate) fn saved_phase(&self, variable: Variable) -> Option<bool> {
        self.phase[variable.index()]
    }

    /// Make `literal` true at the current decision level.
    pub(crate) fn assign(&mut self, literal: Literal, source: Source) {
        let variable = literal.variable();
        let idx = variable.index();
        assert_eq!(self.values[idx], Value::Unassigned, "variable {} assigned twice", variable);

        trace!(
            "{} {} at level {}",
            match source {
                Source::Decision => "decide",
                Source::Propagation => "imply",
            },
            literal,
            self.decision_level
        );

        self.values[idx] = if literal.is_positive() { Value::True } else { Value::False };
        self.entries.push(TrailEntry {
            variable,
            level: self.decision_level,
            source,
        });
    }

    /// Undo every assignment made above `level`, saving phases. The
    /// propagation queue must already be empty (the propagator drains it
    /// before returning, on conflict included).
    pub(crate) fn backtrack_to(&mut self, level: u32) {
        trace!("backtrack to level {} from {}", level, self.decision_level);
        while let Some(&entry) = self.entries.last() {
            if entry.level <= level {
                break;
            }
            self.entries.pop();
            let idx = entry.variable.index();
            self.phase[idx] = Some(self.values[idx] == Value::True);
            self.values[idx] = Value::Unassigned;
        }
        self.decision_level = level;
    }
}
