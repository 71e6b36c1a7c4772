use crate::formula::{Clause, Formula, Literal};
use std::fmt::{self, Display, Formatter};
use std::io::{BufRead, BufReader, Read};

/// Parse the standard DIMACS CNF format: an optional run of `c` comment
/// lines, a problem line `p cnf <num_vars> <num_clauses>`, then clauses as
/// runs of non-zero literals terminated by `0` (clauses may span lines).
///
/// Literals outside `[-num_vars, num_vars]` are rejected here so the
/// solver can assume well-formed input. An explicit empty clause (a bare
/// `0`) is kept; the formula it produces is trivially unsatisfiable.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut header: Option<(u32, usize)> = None;
    let mut clauses = vec![];
    let mut current = vec![];

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split_whitespace().peekable();

        match tokens.peek() {
            Some(&"c") | None => continue,
            Some(&"p") => {
                let _ = tokens.next();

                if tokens.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf' in problem line".into()));
                }

                let num_vars = tokens
                    .next()
                    .and_then(|t| t.parse::<u32>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_vars".into()))?;

                let num_clauses = tokens
                    .next()
                    .and_then(|t| t.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_vars, num_clauses));
            }
            Some(_) => {
                let (num_vars, num_clauses) = header
                    .ok_or_else(|| DimacsParseError::Format("clause before problem line".into()))?;

                for token in tokens {
                    let code = token.parse::<i32>().map_err(|_| {
                        DimacsParseError::Format(format!("invalid literal '{}'", token))
                    })?;
                    match Literal::from_dimacs(code) {
                        Some(literal) => {
                            if literal.variable().0 > num_vars {
                                return Err(DimacsParseError::Format(format!(
                                    "literal {} out of range (formula has {} variables)",
                                    code, num_vars
                                )));
                            }
                            current.push(literal);
                        }
                        // 0 terminates the clause
                        None => clauses.push(Clause::new(current.drain(..))),
                    }
                }

                if clauses.len() >= num_clauses {
                    break;
                }
            }
        }
    }

    let (num_vars, _) = header.ok_or_else(|| DimacsParseError::Format("missing problem line".into()))?;

    if !current.is_empty() {
        return Err(DimacsParseError::Format("unterminated final clause".into()));
    }

    Ok(Formula::new(num_vars, clauses))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {}", e),
            Self::Format(msg) => write!(f, "format error: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p, Variable};
    use crate::{SolveResult, Solver};

    #[test]
    fn parse_cnf_basic() {
        let cnf = "c  simple_v3_c2.cnf
c
p cnf 3 2
1 -3 0
2 3 -1 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.num_vars(), 3);
        assert_eq!(f.num_clauses(), 2);

        assert_eq!(
            f.clauses().nth(0).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p(1), n(3)]
        );
        assert_eq!(
            f.clauses().nth(1).unwrap().literals().cloned().collect::<Vec<_>>(),
            vec![p(2), p(3), n(1)]
        );
    }

    #[test]
    fn parse_clause_spanning_lines() {
        let cnf = "p cnf 4 1
1 2
3 4 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.num_clauses(), 1);
        assert_eq!(f.clauses().next().unwrap().len(), 4);
    }

    #[test]
    fn parse_empty_clause_gives_unsat_formula() {
        let cnf = "p cnf 2 2
1 2 0
0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert!(f.has_empty_clause());
        assert_eq!(Solver::new(f).solve(), SolveResult::Unsat);
    }

    #[test]
    fn reject_literal_out_of_range() {
        let cnf = "p cnf 2 1
1 5 0";
        match parse(cnf.as_bytes()) {
            Err(DimacsParseError::Format(msg)) => assert!(msg.contains("out of range")),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn reject_clause_before_problem_line() {
        assert!(parse("1 2 0\np cnf 2 1".as_bytes()).is_err());
    }

    #[test]
    fn reject_unterminated_clause() {
        let cnf = "p cnf 2 2
1 2 0
-1 -2";
        assert!(parse(cnf.as_bytes()).is_err());
    }

    #[test]
    fn reject_non_integer_token() {
        assert!(parse("p cnf 2 1\n1 x 0".as_bytes()).is_err());
    }

    #[test]
    fn solve_cnf_quinn() {
        let cnf = "c  quinn.cnf
c
p cnf 16 18
  1    2  0
 -2   -4  0
  3    4  0
 -4   -5  0
  5   -6  0
  6   -7  0
  6    7  0
  7  -16  0
  8   -9  0
 -8  -14  0
  9   10  0
  9  -10  0
-10  -11  0
 10   12  0
 11   12  0
 13   14  0
 14  -15  0
 15   16  0
";

        let f = parse(cnf.as_bytes()).expect("failed to parse");

        match Solver::new(f.clone()).solve() {
            SolveResult::Sat(model) => {
                assert!(model.satisfies(&f));
                // every variable is present in the model
                assert_eq!(model.iter().count(), 16);
                assert_eq!(model.iter().next().unwrap().0, Variable(1));
            }
            SolveResult::Unsat => panic!("quinn.cnf is satisfiable"),
        }
    }
}
