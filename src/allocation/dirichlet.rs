//! Uniform sampling over the probability simplex.

use rand::Rng;
use rand::distributions::Open01;

/// Symmetric Dirichlet distribution with unit concentration.
///
/// Samples are uniform over the simplex: `dim` non-negative proportions that
/// sum to one. They are drawn as normalized unit exponentials.
///
/// # Example
///
/// ```
/// use hours_planner::allocation::SymmetricDirichlet;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let proportions = SymmetricDirichlet::new(3).sample(&mut rng);
///
/// assert_eq!(proportions.len(), 3);
/// assert!((proportions.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricDirichlet {
    dim: usize,
}

impl SymmetricDirichlet {
    /// Creates the distribution over `dim` components.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    /// Number of components.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Draws one proportion vector.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        if self.dim == 0 {
            return Vec::new();
        }

        let draws: Vec<f64> = (0..self.dim)
            .map(|_| -rng.sample::<f64, _>(Open01).ln())
            .collect();
        let total: f64 = draws.iter().sum();

        if total > 0.0 && total.is_finite() {
            draws.into_iter().map(|x| x / total).collect()
        } else {
            vec![1.0 / self.dim as f64; self.dim]
        }
    }
}
