// ============================================================
// Layer 3: Term Annotation Scores
// ============================================================
// A predicted annotation is one (protein, GO term) pair with
// the model's logit for it. The logit is a pre-sigmoid score;
// sigmoid(logit) is the predicted annotation probability.
//
// The model itself only returns a logits matrix
// [batch_size, num_terms]. Ranking the best terms for a single
// protein is plain Rust and lives here so it can be tested
// without a tensor backend.

use serde::{Deserialize, Serialize};

/// One ranked term prediction for a single protein.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermScore {
    /// Row index of the term in the term embedding table
    pub term: usize,

    /// Raw model output (pre-sigmoid)
    pub logit: f32,

    /// sigmoid(logit), in (0, 1)
    pub probability: f32,
}

impl TermScore {
    pub fn new(term: usize, logit: f32) -> Self {
        Self { term, logit, probability: sigmoid(logit) }
    }
}

/// Logistic function, split by sign so large |x| never overflows exp().
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Return the `k` highest-logit terms of one protein's logits row.
///
/// Ties are broken by the lower term index so the ranking is stable.
/// NaN logits sort last.
pub fn rank_terms(logits: &[f32], k: usize) -> Vec<TermScore> {
    let mut order: Vec<usize> = (0..logits.len()).collect();
    order.sort_by(|&a, &b| {
        logits[b]
            .partial_cmp(&logits[a])
            .unwrap_or_else(|| logits[a].is_nan().cmp(&logits[b].is_nan()))
            .then(a.cmp(&b))
    });

    order
        .into_iter()
        .take(k)
        .map(|term| TermScore::new(term, logits[term]))
        .collect()
}
