// ============================================================
// Layer 2: SmokeUseCase
// ============================================================
// Runs the predictor once end to end on synthetic inputs:
//
//   Step 1: Load predictor config     (Layer 6 - infra)
//   Step 2: Generate synthetic inputs (Layer 4 - data)
//   Step 3: Forward pass + loss       (Layer 5 - ml)
//   Step 4: Rank top-k terms          (Layer 3 - domain)
//
// Defaults reproduce the reference scenario: 10000 GO terms
// with 200-dim embeddings, 4 proteins with 1280-dim embeddings,
// all-zero labels.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::synthetic::{generate, SyntheticSpec};
use crate::domain::{
    annotation::{rank_terms, TermScore},
    mode::Mode,
};
use crate::infra::config_store::ConfigStore;
use crate::ml::runner::{run_forward, BackendKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeConfig {
    pub inputs:      SyntheticSpec,
    pub seed:        u64,
    pub mode:        Mode,
    pub backend:     BackendKind,
    pub top_k:       usize,
    /// Optional predictor config JSON; defaults are used when None
    pub config_path: Option<String>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            inputs:      SyntheticSpec::default(),
            seed:        42,
            mode:        Mode::Train,
            backend:     BackendKind::Cpu,
            top_k:       5,
            config_path: None,
        }
    }
}

/// Result of one smoke run.
#[derive(Debug, Clone)]
pub struct SmokeReport {
    pub structure:     String,
    /// Trainable parameters; the frozen term table is counted separately
    pub num_params:    usize,
    pub frozen_params: usize,
    pub loss:          Option<f32>,
    pub logits_shape:  [usize; 2],
    /// One ranked list per protein in the batch
    pub top_terms:     Vec<Vec<TermScore>>,
}

pub struct SmokeUseCase {
    config: SmokeConfig,
}

impl SmokeUseCase {
    pub fn new(config: SmokeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SmokeReport> {
        let cfg = &self.config;

        // ── Step 1: Predictor config ──────────────────────────────────────────
        let mut predictor_cfg = ConfigStore::load_or_default(cfg.config_path.as_deref())?;
        ensure!(
            cfg.inputs.batch_size > 0 && cfg.inputs.num_terms > 0,
            "batch size and number of terms must both be at least 1"
        );
        // The protein batch width always follows the predictor config
        let mut spec = cfg.inputs.clone();
        if cfg.config_path.is_some() {
            spec.protein_dim = predictor_cfg.protein_dim;
        } else {
            predictor_cfg.protein_dim = spec.protein_dim;
        }

        // ── Step 2: Synthetic inputs ──────────────────────────────────────────
        tracing::info!(
            "Generating {} terms x {} and {} proteins x {} (seed {})",
            spec.num_terms, spec.term_dim, spec.batch_size, spec.protein_dim, cfg.seed,
        );
        if cfg.mode.is_training() && spec.batch_size == 1 {
            tracing::warn!("Batch size 1 in train mode: batch norm variance is zero");
        }
        let inputs = generate(&spec, cfg.seed);

        // ── Step 3: Forward pass ──────────────────────────────────────────────
        let report = run_forward(&predictor_cfg, &inputs, cfg.mode, cfg.backend)?;

        // ── Step 4: Rank terms per protein ────────────────────────────────────
        let top_terms = (0..report.logits.rows())
            .map(|r| rank_terms(report.logits.row(r), cfg.top_k))
            .collect();

        Ok(SmokeReport {
            structure:     report.structure,
            num_params:    report.num_params,
            frozen_params: report.frozen_params,
            loss:          report.loss,
            logits_shape:  report.logits.shape(),
            top_terms,
        })
    }
}
