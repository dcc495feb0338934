use nalgebra::DVector;
use smallvec::SmallVec;

use crate::{Polynomial, VandermondeMatrix};

/// Exact polynomial interpolation through M samples via the closed-form Vandermonde inverse.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolynomialRegression;

impl PolynomialRegression {
    pub fn new() -> Self {
        Self
    }

    /// Fit the unique polynomial of degree ≤ M-1 through M interleaved samples
    /// `[x₀, y₀, x₁, y₁, …]`.
    ///
    /// The x-values must be pairwise distinct. This is not checked: coincident x-values make the
    /// Vandermonde matrix singular and the coefficients come out infinite or NaN. Call
    /// [`VandermondeMatrix::is_invertible`] beforehand when the input is untrusted.
    ///
    /// An odd trailing value has no partner and is ignored.
    ///
    /// ```rust
    /// use unicool::PolynomialRegression;
    ///
    /// let data = [-2.0, -39.0, 0.0, 3.0, 1.0, 6.0, 3.0, 36.0];
    /// let poly = PolynomialRegression::new().fit(&data);
    /// assert_eq!(poly.to_string(), "2*x^3-4*x^2+5*x+3");
    /// ```
    pub fn fit(&self, data: &[f64]) -> Polynomial {
        if data.len() % 2 != 0 {
            log::warn!(
                "Odd number of regression values ({}), ignoring the last one",
                data.len()
            );
        }

        let (xs, ys): (SmallVec<[f64; 16]>, SmallVec<[f64; 16]>) = data
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .unzip();
        self.fit_xy(&xs, &ys)
    }

    /// Same as [`PolynomialRegression::fit`] with `(x, y)` tuples.
    pub fn fit_points(&self, points: &[(f64, f64)]) -> Polynomial {
        let (xs, ys): (SmallVec<[f64; 16]>, SmallVec<[f64; 16]>) = points.iter().copied().unzip();
        self.fit_xy(&xs, &ys)
    }

    fn fit_xy(&self, xs: &[f64], ys: &[f64]) -> Polynomial {
        log::debug!("Fitting degree {} polynomial", xs.len().saturating_sub(1));

        let vm = VandermondeMatrix::new(xs.iter().copied());
        if !vm.is_invertible() {
            log::warn!("Regression x-values are not distinct, result will not be finite");
        }

        let coeffs = vm.solve(&DVector::from_column_slice(ys));
        let mut poly = Polynomial::new();
        for (i, &c) in coeffs.iter().enumerate() {
            poly = poly.add_term(i as u32, c);
        }
        poly
    }
}
