// ============================================================
// Layer 5: Projectors into the shared latent space
// ============================================================
// Proteins and GO terms start in different embedding spaces
// (protein_dim vs term_dim). Both are projected into the same
// latent_dim space so a dot product can compare them.
//
//   ProteinProjector: Linear → BatchNorm → ReLU → Dropout → Linear
//   TermProjector:    Linear

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::domain::mode::Mode;
use crate::ml::batch_norm::{BatchNorm1d, BatchNorm1dConfig};
use crate::ml::dropout::dropout;

#[derive(Config, Debug)]
pub struct ProteinProjectorConfig {
    pub protein_dim: usize,
    pub latent_dim:  usize,
    #[config(default = 1024)]
    pub hidden:      usize,
    #[config(default = 0.2)]
    pub dropout:     f64,
    #[config(default = 0.1)]
    pub momentum:    f64,
    #[config(default = 1e-5)]
    pub epsilon:     f64,
}

impl ProteinProjectorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ProteinProjector<B> {
        ProteinProjector {
            input:   LinearConfig::new(self.protein_dim, self.hidden).init(device),
            norm:    BatchNorm1dConfig::new(self.hidden)
                .with_momentum(self.momentum)
                .with_epsilon(self.epsilon)
                .init(device),
            output:  LinearConfig::new(self.hidden, self.latent_dim).init(device),
            dropout: self.dropout,
        }
    }
}

#[derive(Module, Debug)]
pub struct ProteinProjector<B: Backend> {
    pub input:   Linear<B>,
    pub norm:    BatchNorm1d<B>,
    pub output:  Linear<B>,
    pub dropout: f64,
}

impl<B: Backend> ProteinProjector<B> {
    /// embeddings: [batch, protein_dim] → [batch, latent_dim]
    pub fn forward(&self, embeddings: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        let x = self.input.forward(embeddings);
        let x = relu(self.norm.forward(x, mode));
        let x = dropout(x, self.dropout, mode.is_training());
        self.output.forward(x)
    }
}

/// Single affine map from term space into the latent space.
#[derive(Module, Debug)]
pub struct TermProjector<B: Backend> {
    pub linear: Linear<B>,
}

impl<B: Backend> TermProjector<B> {
    pub fn new(term_dim: usize, latent_dim: usize, device: &B::Device) -> Self {
        Self { linear: LinearConfig::new(term_dim, latent_dim).init(device) }
    }

    /// terms: [num_terms, term_dim] → [num_terms, latent_dim]
    pub fn forward(&self, terms: Tensor<B, 2>) -> Tensor<B, 2> {
        self.linear.forward(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, tensor::Distribution};

    type TestBackend = NdArray;

    #[test]
    fn test_protein_projector_shape() {
        let device = Default::default();
        let projector = ProteinProjectorConfig::new(32, 12)
            .with_hidden(20)
            .init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 2>::random([6, 32], Distribution::Default, &device);

        assert_eq!(projector.forward(x.clone(), Mode::Train).dims(), [6, 12]);
        assert_eq!(projector.forward(x, Mode::Eval).dims(), [6, 12]);
    }

    #[test]
    fn test_protein_projector_eval_is_deterministic() {
        let device = Default::default();
        let projector = ProteinProjectorConfig::new(16, 8)
            .with_hidden(24)
            .init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 2>::random([4, 16], Distribution::Default, &device);

        let a = projector.forward(x.clone(), Mode::Eval).into_data().to_vec::<f32>().unwrap();
        let b = projector.forward(x, Mode::Eval).into_data().to_vec::<f32>().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_term_projector_shape() {
        let device = Default::default();
        let projector = TermProjector::<TestBackend>::new(10, 6, &device);
        let terms = Tensor::<TestBackend, 2>::random([50, 10], Distribution::Default, &device);
        assert_eq!(projector.forward(terms).dims(), [50, 6]);
    }
}
