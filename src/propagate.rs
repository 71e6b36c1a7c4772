use crate::assignment::{Source, Trail, Value};
use crate::formula::{ClauseIdx, Formula, Literal};
use log::trace;
use std::collections::VecDeque;

/// Terminal states of unit propagation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum PropagationResult {
    Ok,
    Conflict(ClauseIdx),
}

/// Watch lists plus the propagation queue.
///
/// Each clause of size ≥ 2 watches the literals at its positions 0 and 1;
/// the list for a literal holds the indices of clauses watching it.
/// Size-one clauses are never watched: the driver consumes them during
/// initial propagation and level-0 assignments are never undone.
///
/// Watch moves are not logged for undo. A watch only ever moves onto a
/// literal that is non-false at the time, and a literal that is non-false
/// under some assignment stays non-false under any weaker one, so every
/// watch remains valid across backtracking.
#[derive(Debug)]
pub(crate) struct Propagator {
    lists: Vec<Vec<ClauseIdx>>,
    queue: VecDeque<Literal>,
}

impl Propagator {
    pub(crate) fn new(formula: &Formula) -> Self {
        let mut lists = vec![vec![]; formula.num_vars() as usize * 2];
        for (i, clause) in formula.clauses().enumerate() {
            if clause.len() >= 2 {
                lists[clause.get(0).index()].push(ClauseIdx(i));
                lists[clause.get(1).index()].push(ClauseIdx(i));
            }
        }
        Self {
            lists,
            queue: VecDeque::new(),
        }
    }

    /// Make `literal` true and queue it for propagation. Returns `false`
    /// if the literal is already false (the enqueue is contradictory);
    /// an already-true literal is a no-op.
    pub(crate) fn enqueue(&mut self, trail: &mut Trail, literal: Literal, source: Source) -> bool {
        match trail.value(literal) {
            Value::True => true,
            Value::False => false,
            Value::Unassigned => {
                trail.assign(literal, source);
                self.queue.push_back(literal);
                true
            }
        }
    }

    /// Saturating unit propagation: drain the queue in FIFO order,
    /// restoring the watch invariant for every clause that watched a
    /// literal made false. Stops at the first conflicting clause, with
    /// the queue cleared; otherwise runs to fixpoint.
    pub(crate) fn propagate(&mut self, formula: &mut Formula, trail: &mut Trail) -> PropagationResult {
        while let Some(assigned) = self.queue.pop_front() {
            let false_lit = assigned.negated();
            let watchers = std::mem::take(&mut self.lists[false_lit.index()]);
            let mut kept = Vec::with_capacity(watchers.len());

            for (i, &idx) in watchers.iter().enumerate() {
                let clause = formula.clause_mut(idx);

                // normalize: the newly false watch goes to slot 1
                if clause.get(0) == false_lit {
                    clause.rewatch(0, 1);
                }
                debug_assert_eq!(clause.get(1), false_lit);

                let other = clause.get(0);
                if trail.value(other) == Value::True {
                    // satisfied through the other watch; nothing to do
                    kept.push(idx);
                    continue;
                }

                // first non-false literal beyond the watches replaces this one
                if let Some(position) = (2..clause.len()).find(|&c| trail.value(clause.get(c)) != Value::False) {
                    let replacement = clause.get(position);
                    clause.rewatch(1, position);
                    self.lists[replacement.index()].push(idx);
                    continue;
                }

                // no replacement: the clause is unit on `other`, or conflicting
                kept.push(idx);
                match trail.value(other) {
                    Value::Unassigned => {
                        trace!("clause {} forces {}", idx.0, other);
                        trail.assign(other, Source::Propagation);
                        self.queue.push_back(other);
                    }
                    Value::False => {
                        trace!("clause {} conflicting", idx.0);
                        // untouched tail keeps watching the false literal
                        kept.extend_from_slice(&watchers[i + 1..]);
                        self.lists[false_lit.index()] = kept;
                        self.queue.clear();
                        return PropagationResult::Conflict(idx);
                    }
                    Value::True => unreachable!("satisfied clause handled above"),
                }
            }

            self.lists[false_lit.index()] = kept;
        }
        PropagationResult::Ok
    }
}
