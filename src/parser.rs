//! Text grammar for [`Polynomial`].
//!
//! ```text
//! polynomial := term (('+' | '-') term)*
//! term       := [coefficient ['*']] ['x' ['^' exponent]]
//! ```
//! Whitespace is removed and the input is lowercased before parsing. All error positions are
//! offsets into that normalized string.

use snafu::prelude::*;

use crate::{
    CoefficientSyntaxSnafu, ExponentSyntaxSnafu, Polynomial, SyntaxSnafu, Term, UnicoolError,
};

pub(crate) fn parse(text: &str) -> Result<Polynomial, UnicoolError> {
    Parser::new(text).parse()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn new(text: &str) -> Self {
        let chars = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        Self { chars, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn slice(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn parse(mut self) -> Result<Polynomial, UnicoolError> {
        ensure!(!self.chars.is_empty(), CoefficientSyntaxSnafu { position: 0usize });

        let mut poly = Polynomial::new();
        let mut term = self.term()?;

        loop {
            log::trace!("term {:?} ending at {}", term, self.pos);
            poly = poly.add_term(term.exponent, term.coefficient);

            match self.peek() {
                None => return Ok(poly),
                Some('+' | '-') => term = self.term()?,
                Some(_) => return SyntaxSnafu { position: self.pos }.fail(),
            }
        }
    }

    fn term(&mut self) -> Result<Term, UnicoolError> {
        let mut coefficient = 1.0;
        if self.peek().is_some_and(|c| c != 'x') {
            coefficient = self.coefficient()?;

            if self.peek() == Some('*') {
                self.pos += 1;
                // A '*' must be followed by the variable.
                if self.peek() != Some('x') {
                    return SyntaxSnafu { position: self.pos }.fail();
                }
            }
        }

        let mut exponent = 0;
        if self.peek() == Some('x') {
            self.pos += 1;
            exponent = self.exponent()?;
        }

        Ok(Term::new(exponent, coefficient))
    }

    /// Scans from the term start up to the next `+`, `-`, `*` or `x`.
    ///
    /// The first character (usually a sign) is always taken. `e`/`e+`/`e-` are accepted as
    /// part of a scientific-notation literal. A bare sign in front of `x` means ±1.
    fn coefficient(&mut self) -> Result<f64, UnicoolError> {
        let start = self.pos;
        self.pos += 1;

        while let Some(c) = self.peek() {
            match c {
                '+' | '-' | '*' | 'x' => break,
                '0'..='9' | '.' => self.pos += 1,
                'e' => {
                    self.pos += 1;
                    if matches!(self.peek(), Some('+' | '-')) {
                        self.pos += 1;
                    }
                }
                _ => return CoefficientSyntaxSnafu { position: start }.fail(),
            }
        }

        let text = self.slice(start);
        let before_x = self.peek() == Some('x');
        match text.as_str() {
            "+" if before_x => Ok(1.0),
            "-" if before_x => Ok(-1.0),
            _ => text
                .parse::<f64>()
                .ok()
                .context(CoefficientSyntaxSnafu { position: start }),
        }
    }

    /// Exponent after `x`: 1 unless followed by `^digits`.
    fn exponent(&mut self) -> Result<u32, UnicoolError> {
        if self.peek() != Some('^') {
            return Ok(1);
        }
        self.pos += 1;

        let start = self.pos;
        // Like the coefficient, the first character is always taken, so "^+4" is accepted.
        self.pos = (self.pos + 1).min(self.chars.len());

        while let Some(c) = self.peek() {
            match c {
                '+' | '-' => break,
                '0'..='9' => self.pos += 1,
                _ => return ExponentSyntaxSnafu { position: start }.fail(),
            }
        }

        self.slice(start)
            .parse::<u32>()
            .ok()
            .context(ExponentSyntaxSnafu { position: start })
    }
}
