use crate::assignment::{Source, Trail, Value};
use crate::formula::{ClauseIdx, Formula, Literal};
use crate::heuristic::{Branching, MaxOccurrence};
use crate::propagate::{PropagationResult, Propagator};
use crate::{Model, SolveResult};
use log::trace;

/// Chronological-backtracking DPLL over a formula with watched-literal
/// unit propagation. The solver exclusively owns the formula, trail, and
/// propagator for the duration of the solve; two runs on the same input
/// produce the same result, model included.
pub struct Solver {
    formula: Formula,
    trail: Trail,
    propagator: Propagator,
    branching: MaxOccurrence,
}

impl Solver {
    pub fn new(formula: Formula) -> Self {
        let trail = Trail::new(formula.num_vars());
        let propagator = Propagator::new(&formula);
        Self {
            formula,
            trail,
            propagator,
            branching: MaxOccurrence,
        }
    }

    pub fn solve(&mut self) -> SolveResult {
        if self.formula.has_empty_clause() {
            return SolveResult::Unsat;
        }
        if let PropagationResult::Conflict(idx) = self.initial_propagation() {
            trace!("conflict in clause {} at level 0", idx.0);
            return SolveResult::Unsat;
        }
        if self.search() {
            SolveResult::Sat(self.model())
        } else {
            SolveResult::Unsat
        }
    }

    /// Force every size-one clause at level 0 and propagate to fixpoint.
    /// A contradiction here decides the whole formula.
    fn initial_propagation(&mut self) -> PropagationResult {
        for i in 0..self.formula.num_clauses() {
            let idx = ClauseIdx(i);
            let clause = self.formula.clause(idx);
            if clause.len() == 1 {
                let literal = clause.get(0);
                if !self.propagator.enqueue(&mut self.trail, literal, Source::Propagation) {
                    return PropagationResult::Conflict(idx);
                }
            }
        }
        self.propagator.propagate(&mut self.formula, &mut self.trail)
    }

    /// One recursive step: decide, propagate, recurse; on conflict undo
    /// the decision and its consequences and flip the polarity. Both
    /// polarities failing reports the conflict to the caller.
    fn search(&mut self) -> bool {
        let variable = match self.branching.choose_variable(&self.formula, &self.trail) {
            Some(v) => v,
            None => return true, // total assignment with no conflict
        };
        let first = self.branching.choose_polarity(variable, &self.trail);
        let level = self.trail.decision_level();

        for &positive in &[first, !first] {
            self.trail.new_decision_level();
            let decision = Literal::new(variable, positive);
            let fresh = self.propagator.enqueue(&mut self.trail, decision, Source::Decision);
            assert!(fresh, "decision variable {} was already assigned", variable);

            if self.propagator.propagate(&mut self.formula, &mut self.trail) == PropagationResult::Ok
                && self.search()
            {
                return true;
            }
            // undo the decision and its propagations; the phase of each
            // popped variable is saved for later decisions
            self.trail.backtrack_to(level);
        }
        false
    }

    /// Total model from the trail. Variables the search never touched
    /// default to true.
    fn model(&self) -> Model {
        let values = self
            .formula
            .variables()
            .map(|v| match self.trail.variable_value(v) {
                Value::True => true,
                Value::False => false,
                Value::Unassigned => true,
            })
            .collect();
        Model::new(values)
    }
}
