use log::warn;
use nalgebra::{DMatrix, DVector, stack};

/// condition number above which a system is reported as poorly conditioned
pub const CONDITION_THRESHOLD: f64 = 1e10;

/// A matrix is strictly diagonally dominant by rows when |a_ii| > sum_{j != i} |a_ij| for
/// every row. Returns the first row that breaks the condition.
pub fn first_non_dominant_row(A: &DMatrix<f64>) -> Option<usize> {
    (0..A.nrows()).find(|&i| {
        let diagonal = A[(i, i)].abs();
        let off_diagonal: f64 = A
            .row(i)
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, a_ij)| a_ij.abs())
            .sum();
        diagonal <= off_diagonal
    })
}

pub fn is_diagonally_dominant(A: &DMatrix<f64>) -> bool {
    first_non_dominant_row(A).is_none()
}

/// ||A x - b||_inf
pub fn residual_inf_norm(A: &DMatrix<f64>, x: &DVector<f64>, b: &DVector<f64>) -> f64 {
    (A * x - b).amax()
}

/// ||x - y||_inf, the error measure of the iterative methods
pub fn inf_norm_distance(x: &DVector<f64>, y: &DVector<f64>) -> f64 {
    (x - y).amax()
}

/// The Rouché–Capelli theorem: A x = b has a solution if and only if rank(A) = rank([A b]).
pub fn Rouche_Capelli_theorem(A: &DMatrix<f64>, b: &DVector<f64>) -> bool {
    let Ab: DMatrix<f64> = stack![A, b];
    let eps = 1e-12;
    let rank_A = A.rank(eps);
    let rank_Ab = Ab.rank(eps);

    let result = rank_A == rank_Ab;
    if !result {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
    }
    result
}

/// ratio of the largest singular value to the smallest one, infinite for a singular matrix
pub fn condition_number(A: &DMatrix<f64>) -> f64 {
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    if min_sigma == 0.0 {
        return f64::INFINITY;
    }
    max_sigma / min_sigma
}

/// A system is poorly conditioned when its solution is sensitive to small perturbations of
/// the data, measured by the condition number of the coefficient matrix.
pub fn poorly_conditioned(A: &DMatrix<f64>, threshold: f64) -> bool {
    let condition_number = condition_number(A);
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2e}",
            condition_number
        );
    }
    poorly_conditioned
}

/// Explains a failed elimination: inconsistent system or infinitely many solutions.
pub fn singular_system_diagnostics(A: &DMatrix<f64>, b: &DVector<f64>) -> &'static str {
    if Rouche_Capelli_theorem(A, b) {
        "the system has infinitely many solutions"
    } else {
        "the system is inconsistent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// famous example of ill-conditioned matrix
    fn hilbert_matrix(n: usize) -> DMatrix<f64> {
        DMatrix::from_fn(n, n, |i, j| 1.0 / (i as f64 + j as f64 + 1.0))
    }

    #[test]
    fn test_diagonal_dominance() {
        let A = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 3.0, 5.0, 1.0, 1.0, 1.0, 3.0]);
        assert!(is_diagonally_dominant(&A));
        // equality is not strict dominance
        let B = DMatrix::from_row_slice(2, 2, &[2.0, 2.0, 1.0, 3.0]);
        assert_eq!(first_non_dominant_row(&B), Some(0));
        let C = DMatrix::from_row_slice(2, 2, &[3.0, -1.0, 4.0, -2.0]);
        assert_eq!(first_non_dominant_row(&C), Some(1));
    }

    #[test]
    fn test_residual_inf_norm() {
        let A = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 3.0]);
        let b = DVector::from_vec(vec![2.0, 3.0]);
        assert_eq!(residual_inf_norm(&A, &DVector::from_vec(vec![1.0, 1.0]), &b), 0.0);
        assert_eq!(
            residual_inf_norm(&A, &DVector::from_vec(vec![0.0, 1.5]), &b),
            2.0
        );
        assert_eq!(
            inf_norm_distance(&DVector::from_vec(vec![1.0, -3.0]), &DVector::zeros(2)),
            3.0
        );
    }

    #[test]
    fn test_Rouche_Capelli_theorem() {
        // example https://en.wikipedia.org/wiki/Rouché–Capelli_theorem
        let A = DMatrix::from_vec(3, 3, vec![1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 2.0, 1.0, 2.0]);
        let b = DVector::from_vec(vec![3.0, 1.0, 5.0]);
        assert!(!Rouche_Capelli_theorem(&A, &b));
        assert_eq!(
            singular_system_diagnostics(&A, &b),
            "the system is inconsistent"
        );
        let b = DVector::from_vec(vec![1.0, 1.0, 2.0]);
        assert_eq!(
            singular_system_diagnostics(&A, &b),
            "the system has infinitely many solutions"
        );
    }

    #[test]
    fn test_poorly_conditioned_hilbert() {
        let A = hilbert_matrix(6);
        assert!(poorly_conditioned(&A, 1e5));
        assert!(!poorly_conditioned(&DMatrix::identity(4, 4), 1e5));
        assert_relative_eq!(condition_number(&DMatrix::identity(3, 3)), 1.0, epsilon = 1e-12);
    }
}
