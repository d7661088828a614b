// ============================================================
// Layer 2: DescribeUseCase
// ============================================================
// Builds the predictor for a config and a term-table shape and
// reports its structure and parameter count, without running
// a forward pass.

use anyhow::Result;

use crate::infra::config_store::ConfigStore;
use crate::ml::runner::{describe, BackendKind, ModelSummary};

#[derive(Debug, Clone)]
pub struct DescribeConfig {
    pub num_terms:   usize,
    pub term_dim:    usize,
    pub backend:     BackendKind,
    pub config_path: Option<String>,
}

pub struct DescribeUseCase {
    config: DescribeConfig,
}

impl DescribeUseCase {
    pub fn new(config: DescribeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ModelSummary> {
        let cfg = &self.config;
        let predictor_cfg = ConfigStore::load_or_default(cfg.config_path.as_deref())?;

        tracing::info!(
            "Describing predictor for {} terms x {}",
            cfg.num_terms, cfg.term_dim,
        );
        describe(&predictor_cfg, cfg.num_terms, cfg.term_dim, cfg.backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_default_architecture() {
        let summary = DescribeUseCase::new(DescribeConfig {
            num_terms:   50,
            term_dim:    8,
            backend:     BackendKind::Cpu,
            config_path: None,
        })
        .execute()
        .unwrap();

        assert_eq!(summary.num_terms, 50);
        // Protein projector alone: 1280*1024 + 1024 weights and biases
        assert!(summary.num_params > 1280 * 1024);
        assert!(summary.structure.contains("attention"));
    }
}
