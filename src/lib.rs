//! Sparse univariate polynomials over `f64`.
//!
//! - [`Polynomial`]: canonical exponent -> coefficient map with exact term cancellation
//! - A text grammar (`"2.5x^3 - x + 1"`) with offset-exact syntax errors
//! - [`VandermondeMatrix`] with a closed-form O(N²) inverse
//! - [`PolynomialRegression`]: the unique interpolating polynomial through N points

mod parser;
mod polynomial;
mod regression;
mod term;
mod vandermonde;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_utils;

pub use polynomial::*;
pub use regression::PolynomialRegression;
pub use term::Term;
pub use vandermonde::VandermondeMatrix;

use snafu::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum UnicoolError {
    /// An operator (`+` or `-`) was required between terms.
    #[snafu(display("Syntax error at {}.", position))]
    Syntax { position: usize },

    #[snafu(display("Coefficient syntax error at {}.", position))]
    CoefficientSyntax { position: usize },

    #[snafu(display("Exponent syntax error at {}.", position))]
    ExponentSyntax { position: usize },

    #[snafu(display("Division by the zero polynomial"))]
    DivisionByZero,

    #[snafu(display("Exponent overflow: x^{} * x^{} does not fit in u32", lhs, rhs))]
    ExponentOverflow { lhs: u32, rhs: u32 },
}

impl UnicoolError {
    /// Offset into the normalized (whitespace-free, lowercase) input for syntax errors.
    pub fn position(&self) -> Option<usize> {
        match self {
            UnicoolError::Syntax { position }
            | UnicoolError::CoefficientSyntax { position }
            | UnicoolError::ExponentSyntax { position } => Some(*position),
            UnicoolError::DivisionByZero | UnicoolError::ExponentOverflow { .. } => None,
        }
    }

    pub fn is_syntax_error(&self) -> bool {
        self.position().is_some()
    }
}
