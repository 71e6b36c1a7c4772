use crate::assignment::{Trail, Value};
use crate::formula::{Clause, Formula, Variable};

/// The branching seam: the driver only ever asks for a variable to split
/// on and the polarity to try first, so other heuristics (VSIDS,
/// Jeroslow–Wang) can be dropped in without touching the search.
pub(crate) trait Branching {
    /// Some unassigned variable, or `None` when every variable is
    /// assigned.
    fn choose_variable(&self, formula: &Formula, trail: &Trail) -> Option<Variable>;

    /// The polarity to try first for `variable`.
    fn choose_polarity(&self, variable: Variable, trail: &Trail) -> bool;
}

/// Maximum-occurrence (DLIS-like) branching: pick the unassigned variable
/// appearing, in either polarity, in the most clauses not yet satisfied.
/// Ties go to the smallest variable id so runs are deterministic.
/// Polarity is the saved phase if the variable has one, else `true`.
#[derive(Debug, Default)]
pub(crate) struct MaxOccurrence;

impl Branching for MaxOccurrence {
    fn choose_variable(&self, formula: &Formula, trail: &Trail) -> Option<Variable> {
        let mut best: Option<(Variable, usize)> = None;
        for variable in formula.variables() {
            if trail.is_assigned(variable) {
                continue;
            }
            let count = formula
                .occurrences(variable)
                .iter()
                .filter(|&&idx| !clause_satisfied(formula.clause(idx), trail))
                .count();
            match best {
                // ascending iteration: ties keep the earlier (smaller) variable
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((variable, count)),
            }
        }
        best.map(|(variable, _)| variable)
    }

    fn choose_polarity(&self, variable: Variable, trail: &Trail) -> bool {
        trail.saved_phase(variable).unwrap_or(true)
    }
}

fn clause_satisfied(clause: &Clause, trail: &Trail) -> bool {
    clause.literals().any(|&l| trail.value(l) == Value::True)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Source;
    use crate::formula::{n, p, Clause};

    fn formula() -> Formula {
        // variable 2 occurs in three clauses, 1 and 3 in two each
        Formula::new(
            3,
            vec![
                Clause::new(vec![p(1), p(2)]),
                Clause::new(vec![n(2), p(3)]),
                Clause::new(vec![n(1), p(2), n(3)]),
            ],
        )
    }

    #[test]
    fn picks_most_frequent_variable() {
        let f = formula();
        let trail = Trail::new(3);
        assert_eq!(MaxOccurrence.choose_variable(&f, &trail), Some(Variable(2)));
    }

    #[test]
    fn skips_assigned_variables() {
        let f = formula();
        let mut trail = Trail::new(3);
        trail.new_decision_level();
        trail.assign(p(2), Source::Decision);
        let chosen = MaxOccurrence.choose_variable(&f, &trail).unwrap();
        assert_ne!(chosen, Variable(2));
    }

    #[test]
    fn satisfied_clauses_do_not_count() {
        let f = formula();
        let mut trail = Trail::new(3);
        trail.new_decision_level();
        // satisfies clauses 1 and 3, leaving variable 1 with no live
        // occurrence while variable 3 keeps one in clause 2
        trail.assign(p(2), Source::Decision);
        assert_eq!(MaxOccurrence.choose_variable(&f, &trail), Some(Variable(3)));
    }

    #[test]
    fn ties_break_to_smallest_id() {
        let f = Formula::new(2, vec![Clause::new(vec![p(1), p(2)])]);
        let trail = Trail::new(2);
        assert_eq!(MaxOccurrence.choose_variable(&f, &trail), Some(Variable(1)));
    }

    #[test]
    fn none_when_all_assigned() {
        let f = Formula::new(1, vec![Clause::new(vec![p(1)])]);
        let mut trail = Trail::new(1);
        trail.assign(p(1), Source::Propagation);
        assert_eq!(MaxOccurrence.choose_variable(&f, &trail), None);
    }

    #[test]
    fn polarity_defaults_true_then_follows_saved_phase() {
        let mut trail = Trail::new(1);
        assert!(MaxOccurrence.choose_polarity(Variable(1), &trail));

        trail.new_decision_level();
        trail.assign(n(1), Source::Decision);
        trail.backtrack_to(0);
        assert!(!MaxOccurrence.choose_polarity(Variable(1), &trail));
    }
}
