use nalgebra::{DMatrix, DVector};
use smallvec::SmallVec;

/// Square Vandermonde matrix over the nodes `x₀ … x_{N-1}`, row `i` being `[1, xᵢ, xᵢ², …]`.
///
/// The inverse is computed in closed form as `U⁻¹ · L⁻¹` from the triangular factors of the
/// matrix, without general elimination. Nodes must be pairwise distinct for the matrix to be
/// invertible. This is not checked on construction; see [`VandermondeMatrix::is_invertible`].
#[derive(Debug, Clone, PartialEq)]
pub struct VandermondeMatrix {
    nodes: SmallVec<[f64; 16]>,
}

impl VandermondeMatrix {
    pub fn new(nodes: impl IntoIterator<Item = f64>) -> Self {
        let nodes: SmallVec<[f64; 16]> = nodes.into_iter().collect();
        log::debug!("Vandermonde matrix over {} nodes", nodes.len());
        Self { nodes }
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Dimension N of the N×N matrix.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Dense form. Each row is built by repeated multiplication, not by `powi`.
    pub fn to_matrix(&self) -> DMatrix<f64> {
        let n = self.len();
        let mut m = DMatrix::zeros(n, n);
        for (i, &x) in self.nodes.iter().enumerate() {
            m[(i, 0)] = 1.0;
            for j in 1..n {
                m[(i, j)] = m[(i, j - 1)] * x;
            }
        }
        m
    }

    /// `∏_{i<j} (x_j - x_i)`
    pub fn determinant(&self) -> f64 {
        let mut d = 1.0;
        for (i, &xi) in self.nodes.iter().enumerate() {
            for &xj in &self.nodes[i + 1..] {
                d *= xj - xi;
            }
        }
        d
    }

    /// True iff the determinant is non-zero, ie. no two nodes coincide.
    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Closed-form inverse of the lower triangular factor.
    ///
    /// `L⁻¹[i, j] = 1 / ∏_{k ≤ i, k ≠ j} (x_j - x_k)` for `j ≤ i`, and `L⁻¹[0, 0] = 1`.
    pub fn lower_inverse(&self) -> DMatrix<f64> {
        let n = self.len();
        let x = &self.nodes;
        let mut m = DMatrix::zeros(n, n);
        if n == 0 {
            return m;
        }
        m[(0, 0)] = 1.0;

        for i in 1..n {
            for j in 0..=i {
                let mut prod = 1.0;
                for k in 0..=i {
                    if k != j {
                        prod *= x[j] - x[k];
                    }
                }
                m[(i, j)] = 1.0 / prod;
            }
        }
        m
    }

    /// Inverse of the unit upper triangular factor, via the recurrence
    /// `U⁻¹[i, j] = U⁻¹[i-1, j-1] - U⁻¹[i, j-1]·x_{j-1}`.
    ///
    /// Column `j` holds the power-basis coefficients of `∏_{k<j} (x - x_k)`.
    pub fn upper_inverse(&self) -> DMatrix<f64> {
        let n = self.len();
        let x = &self.nodes;
        let mut m = DMatrix::zeros(n, n);
        if n == 0 {
            return m;
        }

        // Seed the diagonal and the first row.
        m[(0, 0)] = 1.0;
        for j in 1..n {
            m[(j, j)] = 1.0;
            m[(0, j)] = -m[(0, j - 1)] * x[j - 1];
        }

        for i in 1..n {
            for j in i + 1..n {
                m[(i, j)] = m[(i - 1, j - 1)] - m[(i, j - 1)] * x[j - 1];
            }
        }
        m
    }

    /// `V⁻¹ = U⁻¹ · L⁻¹`, in O(N²) storage and without pivoting.
    ///
    /// Coincident nodes give infinite or NaN entries rather than an error.
    pub fn inverse(&self) -> DMatrix<f64> {
        let upper = self.upper_inverse();
        let lower = self.lower_inverse();
        triangular_product(&upper, &lower)
    }

    /// `V⁻¹ · y`: the power-basis coefficients of the interpolant through `(xᵢ, yᵢ)`.
    ///
    /// # Panics
    /// Panics if `y.len() != self.len()`.
    pub fn solve(&self, y: &DVector<f64>) -> DVector<f64> {
        assert_eq!(y.len(), self.len(), "Sample count mismatch with number of nodes");

        let inverse = self.inverse();
        DVector::from_fn(self.len(), |i, _| {
            let mut sum = 0.0;
            for (k, &yk) in y.iter().enumerate() {
                sum += inverse[(i, k)] * yk;
            }
            sum
        })
    }
}

/// Product of an upper triangular matrix with a lower triangular one, summed in ascending
/// index order. Only the `k ≥ max(i, j)` band can be non-zero.
fn triangular_product(upper: &DMatrix<f64>, lower: &DMatrix<f64>) -> DMatrix<f64> {
    let n = upper.nrows();
    DMatrix::from_fn(n, n, |i, j| {
        let mut sum = 0.0;
        for k in i.max(j)..n {
            sum += upper[(i, k)] * lower[(k, j)];
        }
        sum
    })
}

impl From<&VandermondeMatrix> for DMatrix<f64> {
    fn from(vm: &VandermondeMatrix) -> Self {
        vm.to_matrix()
    }
}

impl From<Vec<f64>> for VandermondeMatrix {
    fn from(nodes: Vec<f64>) -> Self {
        Self::new(nodes)
    }
}

impl From<&[f64]> for VandermondeMatrix {
    fn from(nodes: &[f64]) -> Self {
        Self::new(nodes.iter().copied())
    }
}
