use smallvec::SmallVec;
use snafu::prelude::*;

use crate::{
    DivisionByZeroSnafu, ExponentOverflowSnafu, PolynomialRegression, Term, UnicoolError, parser,
};

/// A univariate polynomial `Σ cᵢ·x^eᵢ` in canonical form.
///
/// Terms are kept sorted by ascending exponent, exponents are unique, and no term has a zero
/// coefficient. Any operation that produces an exact `0.0` at some exponent removes that term,
/// so two polynomials are equal iff their term lists are equal.
#[derive(Clone, Default, PartialEq)]
pub struct Polynomial {
    pub(crate) terms: SmallVec<[Term; 8]>,
}

impl Polynomial {
    pub fn new() -> Self {
        Self {
            terms: SmallVec::new(),
        }
    }

    pub fn zero() -> Self {
        Self::new()
    }

    /// Polynomial with the single term `coefficient * x^exponent` (empty if the coefficient is 0).
    pub fn from_term(exponent: u32, coefficient: f64) -> Self {
        Self::new().add_term(exponent, coefficient)
    }

    /// Build from `(exponent, coefficient)` pairs, merged in the given order.
    ///
    /// Repeated exponents are summed, and terms that cancel to zero are dropped:
    /// ```rust
    /// use unicool::Polynomial;
    ///
    /// let p = Polynomial::from_terms([(1, 1.0), (3, -1.0), (6, 9.0), (2, 7.0)]);
    /// assert_eq!(p.to_string(), "9*x^6-x^3+7*x^2+x");
    ///
    /// let q = Polynomial::from_terms([(2, 4.0), (2, -4.0)]);
    /// assert!(q.is_zero());
    /// ```
    pub fn from_terms(terms: impl IntoIterator<Item = (u32, f64)>) -> Self {
        let mut poly = Self::new();
        for (exponent, coefficient) in terms {
            poly.merge_term(exponent, coefficient);
        }
        poly
    }

    /// Parse the text grammar, eg. `"2.5x^3 - x + 1"` or `"2.5*x^3-x+1"`.
    ///
    /// Whitespace is ignored and the input is case-insensitive. Error positions are offsets
    /// into the input after whitespace removal.
    pub fn parse(text: &str) -> Result<Self, UnicoolError> {
        parser::parse(text)
    }

    /// Fit the unique polynomial of degree < M through M interleaved `x, y` samples.
    ///
    /// See [`PolynomialRegression::fit`] for the preconditions on the x-values.
    pub fn from_data_points(data: &[f64]) -> Self {
        PolynomialRegression::new().fit(data)
    }

    /// Same as [`Polynomial::from_data_points`] but with `(x, y)` tuples.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        PolynomialRegression::new().fit_points(points)
    }

    /// Chainable form of term insertion, following the same cancellation rule as `+`.
    pub fn add_term(mut self, exponent: u32, coefficient: f64) -> Self {
        self.merge_term(exponent, coefficient);
        self
    }

    /// Terms in ascending exponent order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = Term> + '_ {
        self.terms.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Coefficient of `x^exponent`, `0.0` if there is no such term.
    pub fn coefficient(&self, exponent: u32) -> f64 {
        match self.terms.binary_search_by_key(&exponent, |t| t.exponent) {
            Ok(i) => self.terms[i].coefficient,
            Err(_) => 0.0,
        }
    }

    /// The term with the highest exponent, if any.
    pub fn leading_term(&self) -> Option<Term> {
        self.terms.last().copied()
    }

    /// Highest exponent with a non-zero coefficient.
    ///
    /// Returns 0 for the zero polynomial, which cannot be told apart from a non-zero constant.
    /// Use [`Polynomial::degree`] when that distinction matters.
    pub fn highest_exponent(&self) -> u32 {
        self.degree().unwrap_or(0)
    }

    /// Highest exponent, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.leading_term().map(|t| t.exponent)
    }

    /// Evaluate at `x` by summing every term.
    pub fn get_y(&self, x: f64) -> f64 {
        let mut result = 0.0;
        for term in &self.terms {
            result += term.eval(x);
        }
        result
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.get_y(x)
    }

    pub fn derive(&self) -> Self {
        let mut result = Self::new();
        for term in self.terms.iter().filter_map(Term::derive) {
            result.merge_term(term.exponent, term.coefficient);
        }
        result
    }

    /// Long division: returns `(quotient, remainder)` with `self == quotient * divisor + remainder`.
    ///
    /// The remainder is zero or has a smaller highest exponent than the divisor.
    pub fn div_rem(&self, divisor: &Polynomial) -> Result<(Self, Self), UnicoolError> {
        let lead = divisor.leading_term().context(DivisionByZeroSnafu)?;

        let mut quotient = Self::new();
        let mut remainder = self.clone();

        while let Some(top) = remainder.leading_term() {
            if top.exponent < lead.exponent {
                break;
            }
            let step = Self::from_term(
                top.exponent - lead.exponent,
                top.coefficient / lead.coefficient,
            );
            quotient = quotient.merge(step.terms());
            remainder = &remainder - &(divisor * &step);

            // Rounding can leave a residue at the eliminated exponent.
            remainder.remove_term(top.exponent);
        }

        Ok((quotient, remainder))
    }

    /// Product that fails instead of wrapping when an exponent sum exceeds `u32::MAX`.
    pub fn checked_mul(&self, rhs: &Polynomial) -> Result<Self, UnicoolError> {
        let mut result = Self::new();
        for b in &rhs.terms {
            for a in &self.terms {
                let exponent = b.exponent.checked_add(a.exponent).context(
                    ExponentOverflowSnafu {
                        lhs: a.exponent,
                        rhs: b.exponent,
                    },
                )?;
                result.merge_term(exponent, b.coefficient * a.coefficient);
            }
        }
        Ok(result)
    }

    /// Insert or accumulate a single term, removing it if the sum is exactly zero.
    fn merge_term(&mut self, exponent: u32, coefficient: f64) {
        if coefficient == 0.0 {
            return;
        }
        match self.terms.binary_search_by_key(&exponent, |t| t.exponent) {
            Ok(i) => {
                let sum = self.terms[i].coefficient + coefficient;
                if sum == 0.0 {
                    self.terms.remove(i);
                } else {
                    self.terms[i].coefficient = sum;
                }
            }
            Err(i) => self.terms.insert(i, Term::new(exponent, coefficient)),
        }
    }

    fn remove_term(&mut self, exponent: u32) {
        if let Ok(i) = self.terms.binary_search_by_key(&exponent, |t| t.exponent) {
            self.terms.remove(i);
        }
    }

    /// Merge ascending, zero-free terms into this polynomial.
    fn merge(mut self, other: impl Iterator<Item = Term>) -> Self {
        let mut merged = SmallVec::with_capacity(self.terms.len());

        let mut a_iter = self.terms.into_iter().peekable();
        let mut b_iter = other.peekable();

        // Both inputs are sorted. Keep them sorted while merging.
        while let (Some(a), Some(b)) = (a_iter.peek(), b_iter.peek()) {
            if a.exponent < b.exponent {
                merged.extend(a_iter.next());
            } else if a.exponent > b.exponent {
                merged.extend(b_iter.next());
            } else {
                let sum = a.coefficient + b.coefficient;
                if sum != 0.0 {
                    merged.push(Term::new(a.exponent, sum));
                }
                a_iter.next();
                b_iter.next();
            }
        }
        merged.extend(a_iter);
        merged.extend(b_iter);
        self.terms = merged;
        self
    }

    fn sum(&self, rhs: &Polynomial) -> Self {
        self.clone().merge(rhs.terms())
    }

    fn difference(&self, rhs: &Polynomial) -> Self {
        self.clone().merge(rhs.terms().map(|t| Term::new(t.exponent, -t.coefficient)))
    }

    /// Convolution of both term lists. Exponent sums wrap on `u32` overflow.
    fn product(&self, rhs: &Polynomial) -> Self {
        let mut result = Self::new();
        for b in &rhs.terms {
            for a in &self.terms {
                result.merge_term(
                    b.exponent.wrapping_add(a.exponent),
                    b.coefficient * a.coefficient,
                );
            }
        }
        result
    }
}

macro_rules! impl_binop {
    ($Trait:ident, $method:ident, $inner:ident) => {
        impl std::ops::$Trait<&Polynomial> for &Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Self::Output {
                self.$inner(rhs)
            }
        }

        impl std::ops::$Trait<&Polynomial> for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: &Polynomial) -> Self::Output {
                (&self).$inner(rhs)
            }
        }

        impl std::ops::$Trait for Polynomial {
            type Output = Polynomial;

            fn $method(self, rhs: Polynomial) -> Self::Output {
                (&self).$inner(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, sum);
impl_binop!(Sub, sub, difference);
impl_binop!(Mul, mul, product);

impl std::ops::Div<&Polynomial> for &Polynomial {
    type Output = Result<(Polynomial, Polynomial), UnicoolError>;

    fn div(self, rhs: &Polynomial) -> Self::Output {
        self.div_rem(rhs)
    }
}

impl std::ops::Div for Polynomial {
    type Output = Result<(Polynomial, Polynomial), UnicoolError>;

    fn div(self, rhs: Polynomial) -> Self::Output {
        self.div_rem(&rhs)
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;

    fn neg(mut self) -> Self::Output {
        for term in self.terms.iter_mut() {
            term.coefficient = -term.coefficient;
        }
        self
    }
}

impl std::ops::Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl num_traits::Zero for Polynomial {
    fn zero() -> Self {
        Polynomial::new()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl num_traits::One for Polynomial {
    fn one() -> Self {
        Polynomial::from_term(0, 1.0)
    }
}

impl FromIterator<(u32, f64)> for Polynomial {
    fn from_iter<I: IntoIterator<Item = (u32, f64)>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl Extend<(u32, f64)> for Polynomial {
    fn extend<I: IntoIterator<Item = (u32, f64)>>(&mut self, iter: I) {
        for (exponent, coefficient) in iter {
            self.merge_term(exponent, coefficient);
        }
    }
}

impl std::str::FromStr for Polynomial {
    type Err = UnicoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

/// Canonical rendering, highest exponent first: `9*x^6-x^3+7*x^2+x`, or `0` when empty.
impl core::fmt::Display for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().rev().enumerate() {
            if i != 0 && !(term.coefficient < 0.0) {
                write!(f, "+")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().rev().enumerate() {
            if i != 0 {
                write!(f, " + ")?;
            }
            write!(f, "{:?}", term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for Polynomial {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.terms.len() != other.terms.len() {
            return false;
        }
        std::iter::zip(&self.terms, &other.terms).all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}
