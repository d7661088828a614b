// ============================================================
// Layer 5: Probability Head
// ============================================================
// Turns the per-protein similarity vector [batch, num_terms]
// into final logits [batch, num_terms]:
//
//   Linear(num_terms → width) → ReLU → Dropout → Linear(width → num_terms)
//
// NOTE: the head dropout runs in Eval mode too unless
// `gated` is set. This does not match the protein projector,
// whose dropout follows the mode. Both behaviours are kept;
// `gated` defaults to false.

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::domain::mode::Mode;
use crate::ml::dropout::dropout;

#[derive(Config, Debug)]
pub struct ProbabilityHeadConfig {
    pub num_terms: usize,
    #[config(default = 1280)]
    pub width:     usize,
    #[config(default = 0.2)]
    pub dropout:   f64,
    /// When true the dropout only runs in Train mode
    #[config(default = false)]
    pub gated:     bool,
}

impl ProbabilityHeadConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ProbabilityHead<B> {
        ProbabilityHead {
            hidden:  LinearConfig::new(self.num_terms, self.width).init(device),
            output:  LinearConfig::new(self.width, self.num_terms).init(device),
            dropout: self.dropout,
            gated:   self.gated,
        }
    }
}

#[derive(Module, Debug)]
pub struct ProbabilityHead<B: Backend> {
    pub hidden:  Linear<B>,
    pub output:  Linear<B>,
    pub dropout: f64,
    pub gated:   bool,
}

impl<B: Backend> ProbabilityHead<B> {
    /// scores: [batch, num_terms] → logits: [batch, num_terms]
    pub fn forward(&self, scores: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        let active = !self.gated || mode.is_training();
        let x = relu(self.hidden.forward(scores));
        let x = dropout(x, self.dropout, active);
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, tensor::Distribution};

    type TestBackend = NdArray;

    fn run_twice(head: &ProbabilityHead<TestBackend>, mode: Mode) -> (Vec<f32>, Vec<f32>) {
        let device = Default::default();
        let scores = Tensor::<TestBackend, 2>::random([4, 32], Distribution::Default, &device);
        let a = head.forward(scores.clone(), mode).into_data().to_vec::<f32>().unwrap();
        let b = head.forward(scores, mode).into_data().to_vec::<f32>().unwrap();
        (a, b)
    }

    #[test]
    fn test_head_shape() {
        let device = Default::default();
        let head = ProbabilityHeadConfig::new(32).with_width(64).init::<TestBackend>(&device);
        let scores = Tensor::<TestBackend, 2>::random([3, 32], Distribution::Default, &device);
        assert_eq!(head.forward(scores, Mode::Eval).dims(), [3, 32]);
    }

    #[test]
    fn test_ungated_dropout_runs_in_eval() {
        let device = Default::default();
        let head = ProbabilityHeadConfig::new(32).with_width(64).init::<TestBackend>(&device);
        let (a, b) = run_twice(&head, Mode::Eval);
        assert_ne!(a, b);
    }

    #[test]
    fn test_gated_dropout_is_off_in_eval() {
        let device = Default::default();
        let head = ProbabilityHeadConfig::new(32)
            .with_width(64)
            .with_gated(true)
            .init::<TestBackend>(&device);
        let (a, b) = run_twice(&head, Mode::Eval);
        assert_eq!(a, b);
    }
}
