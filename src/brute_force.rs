use crate::formula::Formula;

// Exhaustive satisfiability check, used as the oracle for the proptest
// suite. Bit i of the candidate assignment is the value of variable i+1.
pub(crate) fn satisfiable(f: &Formula) -> bool {
    let num_vars = f.num_vars();
    assert!(num_vars <= 20); // just for safety

    'search: for assignment in 0..(1u32 << num_vars) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                let value = assignment & (1 << literal.variable().index()) != 0;
                if value == literal.is_positive() {
                    // this clause is satisfied, on to the next one
                    continue 'clauses;
                }
            }
            // no literal satisfied this clause, so this assignment is bogus
            continue 'search;
        }
        // every clause was satisfied
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Clause};

    #[test]
    fn empty_formula_is_satisfiable() {
        assert!(satisfiable(&Formula::new(3, vec![])));
    }

    #[test]
    fn empty_clause_is_unsatisfiable() {
        assert!(!satisfiable(&Formula::new(2, vec![Clause::new(vec![])])));
    }

    #[test]
    fn contradictory_units_are_unsatisfiable() {
        let f = Formula::new(1, vec![Clause::new(vec![p(1)]), Clause::new(vec![n(1)])]);
        assert!(!satisfiable(&f));
    }

    #[test]
    fn simple_satisfiable_formula() {
        let f = Formula::new(
            2,
            vec![Clause::new(vec![p(1), p(2)]), Clause::new(vec![n(1)])],
        );
        assert!(satisfiable(&f));
    }

    #[test]
    fn all_polarity_combinations_are_unsatisfiable() {
        let f = Formula::new(
            2,
            vec![
                Clause::new(vec![p(1), p(2)]),
                Clause::new(vec![n(1), p(2)]),
                Clause::new(vec![p(1), n(2)]),
                Clause::new(vec![n(1), n(2)]),
            ],
        );
        assert!(!satisfiable(&f));
    }
}
