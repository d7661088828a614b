use anyhow::{Context, Result};
use burn::{module::Param, prelude::*};

use crate::domain::mode::Mode;
use crate::ml::{
    attention::{BatchSelfAttention, BatchSelfAttentionConfig},
    head::{ProbabilityHead, ProbabilityHeadConfig},
    loss::bce_with_logits,
    projector::{ProteinProjector, ProteinProjectorConfig, TermProjector},
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally: do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct AnnotationPredictorConfig {
    #[config(default = 1280)]
    pub protein_dim:               usize,
    #[config(default = 768)]
    pub latent_dim:                usize,
    #[config(default = 1024)]
    pub projector_hidden:          usize,
    #[config(default = 0.2)]
    pub projector_dropout:         f64,
    #[config(default = 8)]
    pub num_heads:                 usize,
    #[config(default = 0.0)]
    pub attention_dropout:         f64,
    #[config(default = 1280)]
    pub head_width:                usize,
    #[config(default = 0.2)]
    pub head_dropout:              f64,
    /// false: head dropout also runs in Eval mode
    #[config(default = false)]
    pub gate_head_dropout:         bool,
    #[config(default = 0.1)]
    pub batch_norm_momentum:       f64,
    #[config(default = 1e-5)]
    pub batch_norm_epsilon:        f64,
    /// false: the term table is a constant and receives no gradient
    #[config(default = false)]
    pub trainable_term_embeddings: bool,
}

impl AnnotationPredictorConfig {
    /// Build a predictor around a fixed term embedding table [num_terms, term_dim].
    ///
    /// num_terms and term_dim are read from the table and fixed from here on.
    pub fn init<B: Backend>(
        &self,
        term_embeddings: Tensor<B, 2>,
        device:          &B::Device,
    ) -> Result<AnnotationPredictor<B>> {
        let [num_terms, term_dim] = term_embeddings.dims();

        let attention = BatchSelfAttentionConfig::new(self.latent_dim, self.num_heads)
            .with_dropout(self.attention_dropout)
            .init(device)
            .context("Cannot build the self-attention block")?;

        let protein_projector = ProteinProjectorConfig::new(self.protein_dim, self.latent_dim)
            .with_hidden(self.projector_hidden)
            .with_dropout(self.projector_dropout)
            .with_momentum(self.batch_norm_momentum)
            .with_epsilon(self.batch_norm_epsilon)
            .init(device);

        let head = ProbabilityHeadConfig::new(num_terms)
            .with_width(self.head_width)
            .with_dropout(self.head_dropout)
            .with_gated(self.gate_head_dropout)
            .init(device);

        let term_embeddings = Param::from_tensor(term_embeddings)
            .set_require_grad(self.trainable_term_embeddings);

        tracing::debug!(
            "Predictor built: {num_terms} terms x {term_dim}, protein_dim={}, latent_dim={}, heads={}",
            self.protein_dim, self.latent_dim, self.num_heads,
        );

        Ok(AnnotationPredictor {
            term_embeddings,
            protein_projector,
            attention,
            term_projector: TermProjector::new(term_dim, self.latent_dim, device),
            head,
            num_terms,
            trainable_terms: self.trainable_term_embeddings,
        })
    }
}

#[derive(Module, Debug)]
pub struct AnnotationPredictor<B: Backend> {
    pub term_embeddings:   Param<Tensor<B, 2>>,
    pub protein_projector: ProteinProjector<B>,
    pub attention:         BatchSelfAttention<B>,
    pub term_projector:    TermProjector<B>,
    pub head:              ProbabilityHead<B>,
    pub num_terms:         usize,
    pub trainable_terms:   bool,
}

pub struct PredictorOutput<B: Backend> {
    /// Mean BCE-with-logits, only when labels were given
    pub loss:   Option<Tensor<B, 1>>,
    /// [batch, num_terms]
    pub logits: Tensor<B, 2>,
}

impl<B: Backend> AnnotationPredictor<B> {
    /// embeddings: [batch, protein_dim] → logits: [batch, num_terms]
    pub fn forward_logits(&self, embeddings: Tensor<B, 2>, mode: Mode) -> Tensor<B, 2> {
        let proteins = self.protein_projector.forward(embeddings, mode); // [batch, latent]
        let proteins = self.attention.forward(proteins, mode);           // [batch, latent]
        let terms    = self.term_projector.forward(self.term_embeddings.val()); // [terms, latent]

        let scores = similarity(proteins, terms); // [batch, terms]
        self.head.forward(scores, mode)
    }

    /// Logits plus, when `labels` [batch, num_terms] is given, the mean BCE loss.
    pub fn forward(
        &self,
        embeddings: Tensor<B, 2>,
        labels:     Option<Tensor<B, 2>>,
        mode:       Mode,
    ) -> PredictorOutput<B> {
        let logits = self.forward_logits(embeddings, mode);
        let loss = labels.map(|labels| bce_with_logits(logits.clone(), labels, self.num_terms));
        PredictorOutput { loss, logits }
    }

    pub fn num_terms(&self) -> usize {
        self.num_terms
    }

    pub fn term_dim(&self) -> usize {
        self.term_embeddings.val().dims()[1]
    }

    /// Values in the term table when it is frozen, otherwise 0.
    ///
    /// `num_params()` counts the table either way.
    pub fn frozen_params(&self) -> usize {
        if self.trainable_terms {
            0
        } else {
            self.num_terms * self.term_dim()
        }
    }

    pub fn trainable_params(&self) -> usize {
        self.num_params() - self.frozen_params()
    }
}

/// Unnormalised dot-product similarity: [batch, latent] x [terms, latent]ᵀ → [batch, terms].
pub fn similarity<B: Backend>(proteins: Tensor<B, 2>, terms: Tensor<B, 2>) -> Tensor<B, 2> {
    proteins.matmul(terms.transpose())
}
