// ============================================================
// Layer 5: Batch-wise Multi-Head Self-Attention
// ============================================================
// The whole batch of projected proteins is treated as ONE
// sequence of length batch_size:
//
//   [batch, latent] → [1, batch, latent] → attention → [batch, latent]
//
// so every protein attends to every protein in the batch,
// itself included. There is no mask. Changing the batch
// composition changes each protein's output; reordering the
// batch only reorders the outputs (permutation equivariance).
//
// Per head h (head_dim = latent / num_heads):
//   weights_h = softmax(Q_h K_hᵀ / sqrt(head_dim))
//   out_h     = weights_h V_h
// then the heads are concatenated and projected by W_o.
//
// Reference: Vaswani et al. (2017) Attention Is All You Need

use anyhow::{ensure, Result};
use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::softmax,
};

use crate::domain::mode::Mode;
use crate::ml::dropout::dropout;

#[derive(Config, Debug)]
pub struct BatchSelfAttentionConfig {
    pub d_model:   usize,
    pub num_heads: usize,
    /// Dropout on the attention weights, active in Train mode only
    #[config(default = 0.0)]
    pub dropout:   f64,
}

impl BatchSelfAttentionConfig {
    /// Fails when d_model cannot be split evenly across the heads.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<BatchSelfAttention<B>> {
        ensure!(self.num_heads > 0, "num_heads must be at least 1");
        ensure!(
            self.d_model % self.num_heads == 0,
            "latent dimension {} must be divisible by num_heads {}",
            self.d_model,
            self.num_heads,
        );

        let projection = || LinearConfig::new(self.d_model, self.d_model).init(device);
        Ok(BatchSelfAttention {
            query:     projection(),
            key:       projection(),
            value:     projection(),
            output:    projection(),
            num_heads: self.num_heads,
            dropout:   self.dropout,
        })
    }
}

#[derive(Module, Debug)]
pub struct BatchSelfAttention<B: Backend> {
    pub query:     Linear<B>,
    pub key:       Linear<B>,
    pub value:     Linear<B>,
    pub output:    Linear<B>,
    pub num_heads: usize,
    pub dropout:   f64,
}

impl<B: Backend> BatchSelfAttention<B> {
    /// x: [batch, d_model] → [batch, d_model], batch rows mixed together.
    pub fn forward(&self, x: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        let [batch_size, d_model] = x.dims();
        let sequence = x.unsqueeze::<3>(); // [1, batch, d_model]

        self.forward_qkv(sequence.clone(), sequence.clone(), sequence, mode)
            .reshape([batch_size, d_model])
    }

    /// Full attention over explicit query / key / value inputs, each
    /// [groups, seq_len, d_model]. Self-attention passes the same tensor three times.
    pub fn forward_qkv(
        &self,
        query: Tensor<B, 3>,
        key:   Tensor<B, 3>,
        value: Tensor<B, 3>,
        mode:  Mode,
    ) -> Tensor<B, 3> {
        let mixed = multi_head_attention(
            self.query.forward(query),
            self.key.forward(key),
            self.value.forward(value),
            self.num_heads,
            self.dropout,
            mode,
        );
        self.output.forward(mixed)
    }
}

/// Scaled dot-product attention split across `num_heads` heads.
///
/// Inputs are already projected, shaped [groups, seq_len, d_model]; the output
/// has the same shape with the heads concatenated back along the last axis.
pub fn multi_head_attention<B: Backend>(
    query:          Tensor<B, 3>,
    key:            Tensor<B, 3>,
    value:          Tensor<B, 3>,
    num_heads:      usize,
    weight_dropout: f64,
    mode:           Mode,
) -> Tensor<B, 3> {
    let [groups, seq_len, d_model] = query.dims();
    let head_dim = d_model / num_heads;

    // [groups, seq, d_model] -> [groups, heads, seq, head_dim]
    let split = |t: Tensor<B, 3>| {
        let [g, s, _] = t.dims();
        t.reshape([g, s, num_heads, head_dim]).swap_dims(1, 2)
    };
    let q = split(query);
    let k = split(key);
    let v = split(value);

    let scores  = q.matmul(k.swap_dims(2, 3)).div_scalar((head_dim as f64).sqrt());
    let weights = softmax(scores, 3);
    let weights = dropout(weights, weight_dropout, mode.is_training());

    weights
        .matmul(v)
        .swap_dims(1, 2)
        .reshape([groups, seq_len, d_model])
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, tensor::Distribution};

    type TestBackend = NdArray;

    fn rows(t: Tensor<TestBackend, 2>) -> Vec<Vec<f32>> {
        let [_, cols] = t.dims();
        t.into_data()
            .to_vec::<f32>()
            .unwrap()
            .chunks(cols)
            .map(|c| c.to_vec())
            .collect()
    }

    #[test]
    fn test_indivisible_heads_rejected() {
        let device = Default::default();
        let result = BatchSelfAttentionConfig::new(10, 3).init::<TestBackend>(&device);
        assert!(result.is_err());
        let result = BatchSelfAttentionConfig::new(12, 0).init::<TestBackend>(&device);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_shape_matches_input() {
        let device = Default::default();
        let attn = BatchSelfAttentionConfig::new(16, 4).init::<TestBackend>(&device).unwrap();
        let x = Tensor::<TestBackend, 2>::random([5, 16], Distribution::Default, &device);
        assert_eq!(attn.forward(x, Mode::Eval).dims(), [5, 16]);
    }

    #[test]
    fn test_rows_attend_across_batch() {
        // The first row's output must change when another row changes
        let device = Default::default();
        let attn = BatchSelfAttentionConfig::new(8, 2).init::<TestBackend>(&device).unwrap();
        let x = Tensor::<TestBackend, 2>::random([3, 8], Distribution::Default, &device);
        let changed = x.clone().slice_assign(
            [2..3, 0..8],
            Tensor::<TestBackend, 2>::ones([1, 8], &device).mul_scalar(5.0),
        );

        let before = rows(attn.forward(x, Mode::Eval));
        let after  = rows(attn.forward(changed, Mode::Eval));
        let diff: f32 = before[0].iter().zip(&after[0]).map(|(a, b)| (a - b).abs()).sum();
        assert!(diff > 1e-6);
    }

    #[test]
    fn test_uniform_values_pass_through() {
        // When every position carries the same value vector the attention
        // weights cannot matter: each output equals that vector.
        let device = Default::default();
        let q = Tensor::<TestBackend, 3>::random([1, 4, 6], Distribution::Default, &device);
        let k = Tensor::<TestBackend, 3>::random([1, 4, 6], Distribution::Default, &device);
        let v = Tensor::<TestBackend, 1>::from_floats([1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &device)
            .reshape([1, 1, 6])
            .repeat_dim(1, 4);

        let out = multi_head_attention(q, k, v, 3, 0.0, Mode::Eval)
            .into_data()
            .to_vec::<f32>()
            .unwrap();
        for (i, value) in out.iter().enumerate() {
            assert!((value - (i % 6 + 1) as f32).abs() < 1e-4);
        }
    }
}
