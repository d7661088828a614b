// ============================================================
// Layer 6: Config Store
// ============================================================
// Saves and loads the predictor configuration as JSON so a
// run can be repeated with exactly the same architecture.
//
// Example file:
//   {
//     "protein_dim": 1280,
//     "latent_dim": 768,
//     "num_heads": 8,
//     ...
//   }
//
// Missing fields fall back to their defaults, so a file may
// list only the values it changes. The file is read through
// ConfigFile, a serde mirror with #[serde(default)], because
// the derived Config deserializer requires every field.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::ml::model::AnnotationPredictorConfig;

/// On-disk shape of AnnotationPredictorConfig where every field is optional.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct ConfigFile {
    protein_dim:               usize,
    latent_dim:                usize,
    projector_hidden:          usize,
    projector_dropout:         f64,
    num_heads:                 usize,
    attention_dropout:         f64,
    head_width:                usize,
    head_dropout:              f64,
    gate_head_dropout:         bool,
    batch_norm_momentum:       f64,
    batch_norm_epsilon:        f64,
    trainable_term_embeddings: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let d = AnnotationPredictorConfig::new();
        Self {
            protein_dim:               d.protein_dim,
            latent_dim:                d.latent_dim,
            projector_hidden:          d.projector_hidden,
            projector_dropout:         d.projector_dropout,
            num_heads:                 d.num_heads,
            attention_dropout:         d.attention_dropout,
            head_width:                d.head_width,
            head_dropout:              d.head_dropout,
            gate_head_dropout:         d.gate_head_dropout,
            batch_norm_momentum:       d.batch_norm_momentum,
            batch_norm_epsilon:        d.batch_norm_epsilon,
            trainable_term_embeddings: d.trainable_term_embeddings,
        }
    }
}

impl From<ConfigFile> for AnnotationPredictorConfig {
    fn from(f: ConfigFile) -> Self {
        AnnotationPredictorConfig::new()
            .with_protein_dim(f.protein_dim)
            .with_latent_dim(f.latent_dim)
            .with_projector_hidden(f.projector_hidden)
            .with_projector_dropout(f.projector_dropout)
            .with_num_heads(f.num_heads)
            .with_attention_dropout(f.attention_dropout)
            .with_head_width(f.head_width)
            .with_head_dropout(f.head_dropout)
            .with_gate_head_dropout(f.gate_head_dropout)
            .with_batch_norm_momentum(f.batch_norm_momentum)
            .with_batch_norm_epsilon(f.batch_norm_epsilon)
            .with_trainable_term_embeddings(f.trainable_term_embeddings)
    }
}

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, cfg: &AnnotationPredictorConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write config to '{}'", self.path.display()))?;

        tracing::debug!("Saved predictor config to '{}'", self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<AnnotationPredictorConfig> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read config from '{}'", self.path.display()))?;

        let file: ConfigFile = serde_json::from_str(&json)
            .with_context(|| format!("Invalid predictor config in '{}'", self.path.display()))?;
        Ok(file.into())
    }

    /// Load the file if a path was given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<AnnotationPredictorConfig> {
        match path {
            Some(p) => {
                tracing::info!("Loading predictor config from '{p}'");
                Self::new(p).load()
            }
            None => Ok(AnnotationPredictorConfig::new()),
        }
    }
}
