use crate::formula::{Clause, Formula, Literal};
use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DimacsParseError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed header: {0}")]
    Header(String),
    #[error("missing 'p' line before clauses")]
    MissingHeader,
    #[error("invalid literal '{0}'")]
    Literal(String),
    #[error("Non-standard CNF encoding!")]
    NonStandardEncoding { declared: usize, observed: usize },
}

#[derive(Debug, Clone, Copy)]
struct Header {
    num_variables: usize,
    num_clauses: usize,
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut header = None;
    let mut clauses = vec![];
    let mut clause = vec![];
    let mut max_variable = 0;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            // SATLIB benchmarks end with a "%" line followed by junk
            Some(&"%") => break,
            Some(&"p") => {
                let _ = line.next();
                header = Some(parse_header(line)?);
            }
            Some(_) => {
                if header.is_none() {
                    return Err(DimacsParseError::MissingHeader);
                }

                // Clauses may span lines, so `clause` carries over until the next 0
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => {
                            max_variable = max_variable.max(l.idx());
                            clause.push(l);
                        }
                        None => clauses.push(Clause::new(clause.drain(..))),
                    }
                }
            }
        }
    }

    let header = header.ok_or(DimacsParseError::MissingHeader)?;
    if !clause.is_empty() {
        clauses.push(Clause::new(clause));
    }

    if max_variable != header.num_variables {
        return Err(DimacsParseError::NonStandardEncoding {
            declared: header.num_variables,
            observed: max_variable,
        });
    }

    debug!(
        "parsed {} variables, {} clauses ({} declared)",
        header.num_variables,
        clauses.len(),
        header.num_clauses
    );

    Ok(Formula::new(header.num_variables, clauses))
}

fn parse_header<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<Header, DimacsParseError> {
    if tokens.next() != Some("cnf") {
        return Err(DimacsParseError::Header("missing 'cnf'".into()));
    }

    let num_variables = tokens
        .next()
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::Header("invalid num_variables".into()))?;

    let num_clauses = tokens
        .next()
        .and_then(|c| c.parse::<usize>().ok())
        .ok_or_else(|| DimacsParseError::Header("invalid num_clauses".into()))?;

    Ok(Header {
        num_variables,
        num_clauses,
    })
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::Literal(s.to_string()))?;
    Ok(Literal::from_dimacs(l))
}
