use fmtastic::Superscript;

/// A single `coefficient * x^exponent` pair of a [`crate::Polynomial`].
#[derive(Clone, Copy, PartialEq)]
pub struct Term {
    /// Power of `x`. For example, in 3.5 * x^2 the exponent is 2.
    pub exponent: u32,

    /// Scalar factor. For example, in 3.5 * x^2 the coefficient is 3.5.
    pub coefficient: f64,
}

impl Term {
    pub fn new(exponent: u32, coefficient: f64) -> Self {
        Self {
            exponent,
            coefficient,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.coefficient * pow(x, self.exponent)
    }

    /// Derivative of this term, or `None` for a constant.
    pub fn derive(&self) -> Option<Term> {
        if self.exponent == 0 {
            return None;
        }
        Some(Term::new(
            self.exponent - 1,
            self.coefficient * f64::from(self.exponent),
        ))
    }

    /// Writes the unsigned part of the canonical rendering: `|c|*x^e`, `x`, `1`, ...
    pub(crate) fn fmt_magnitude(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let magnitude = self.coefficient.abs();
        if magnitude != 1.0 {
            write!(f, "{}", magnitude)?;
            if self.exponent != 0 {
                write!(f, "*")?;
            }
        } else if self.exponent == 0 {
            write!(f, "1")?;
        }

        match self.exponent {
            0 => Ok(()),
            1 => write!(f, "x"),
            e => write!(f, "x^{}", e),
        }
    }
}

/// `x^exponent`, falling back to `powf` when the exponent exceeds `i32`.
pub(crate) fn pow(x: f64, exponent: u32) -> f64 {
    match i32::try_from(exponent) {
        Ok(e) => x.powi(e),
        Err(_) => x.powf(f64::from(exponent)),
    }
}

impl core::fmt::Display for Term {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.coefficient < 0.0 {
            write!(f, "-")?;
        }
        self.fmt_magnitude(f)
    }
}

impl core::fmt::Debug for Term {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.exponent {
            0 => write!(f, "{}", self.coefficient),
            1 => write!(f, "{}x", self.coefficient),
            e => write!(f, "{}x{}", self.coefficient, Superscript(e)),
        }
    }
}

impl From<(u32, f64)> for Term {
    fn from((exponent, coefficient): (u32, f64)) -> Self {
        Self::new(exponent, coefficient)
    }
}

// Implement approximate equality for testing purposes
#[cfg(test)]
impl approx::AbsDiffEq for Term {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.exponent == other.exponent && (self.coefficient - other.coefficient).abs() <= epsilon
    }
}
