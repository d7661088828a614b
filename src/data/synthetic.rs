// ============================================================
// Layer 4: Synthetic Inputs
// ============================================================
// Builds random stand-ins for the three model inputs so the
// forward pass can be exercised without real embeddings:
//
//   terms    : [num_terms,  term_dim]     uniform [0, 1)
//   proteins : [batch_size, protein_dim]  uniform [0, 1)
//   labels   : [batch_size, num_terms]    all zeros (optional)
//
// A seeded StdRng makes every run reproducible.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::matrix::Matrix;

/// Shapes of the synthetic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub num_terms:   usize,
    pub term_dim:    usize,
    pub batch_size:  usize,
    pub protein_dim: usize,
    pub with_labels: bool,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            num_terms:   10_000,
            term_dim:    200,
            batch_size:  4,
            protein_dim: 1280,
            with_labels: true,
        }
    }
}

/// Everything one forward call needs.
#[derive(Debug, Clone)]
pub struct PredictorInputs {
    pub terms:    Matrix,
    pub proteins: Matrix,
    pub labels:   Option<Matrix>,
}

pub fn generate(spec: &SyntheticSpec, seed: u64) -> PredictorInputs {
    let mut rng = StdRng::seed_from_u64(seed);

    let terms    = uniform(&mut rng, spec.num_terms, spec.term_dim);
    let proteins = uniform(&mut rng, spec.batch_size, spec.protein_dim);
    let labels   = spec.with_labels.then(|| Matrix::zeros(spec.batch_size, spec.num_terms));

    PredictorInputs { terms, proteins, labels }
}

fn uniform(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.gen::<f32>())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small(with_labels: bool) -> SyntheticSpec {
        SyntheticSpec { num_terms: 12, term_dim: 5, batch_size: 3, protein_dim: 7, with_labels }
    }

    #[test]
    fn test_shapes() {
        let inputs = generate(&small(true), 1);
        assert_eq!(inputs.terms.shape(),    [12, 5]);
        assert_eq!(inputs.proteins.shape(), [3, 7]);
        assert_eq!(inputs.labels.as_ref().unwrap().shape(), [3, 12]);
    }

    #[test]
    fn test_labels_are_zero_and_optional() {
        let inputs = generate(&small(true), 1);
        assert!(inputs.labels.unwrap().data().iter().all(|&v| v == 0.0));
        assert!(generate(&small(false), 1).labels.is_none());
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = generate(&small(false), 42);
        let b = generate(&small(false), 42);
        let c = generate(&small(false), 43);
        assert_eq!(a.proteins, b.proteins);
        assert_ne!(a.proteins, c.proteins);
    }

    #[test]
    fn test_values_in_unit_interval() {
        let inputs = generate(&small(false), 9);
        assert!(inputs.terms.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    }
}
