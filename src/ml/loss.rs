use burn::prelude::*;

/// Mean binary cross-entropy computed straight from logits.
///
/// Uses the stable form `max(x, 0) - x * y + ln(1 + e^(-|x|))`, which equals
/// `-(y ln σ(x) + (1 - y) ln(1 - σ(x)))` without ever evaluating σ(x) itself.
/// Targets may be hard 0/1 labels or soft probabilities. Both inputs are
/// flattened to [-1, num_terms] first; shapes must otherwise already agree.
pub fn bce_with_logits<B: Backend>(
    logits:    Tensor<B, 2>,
    targets:   Tensor<B, 2>,
    num_terms: usize,
) -> Tensor<B, 1> {
    let flatten = |t: Tensor<B, 2>| {
        let rows = t.shape().num_elements() / num_terms;
        t.reshape([rows, num_terms])
    };
    let x = flatten(logits);
    let y = flatten(targets);

    let loss = x.clone().clamp_min(0.0) - x.clone() * y + x.abs().neg().exp().log1p();
    loss.mean()
}
