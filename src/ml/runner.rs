// ============================================================
// Layer 5: Runner
// ============================================================
// Picks a Burn backend, moves plain Matrix inputs onto its
// device, builds the predictor and runs one forward call.
//
//   Cpu → burn::backend::NdArray
//   Gpu → burn::backend::Wgpu
//
// Results come back as plain Rust values so the application
// layer never touches a tensor.

use anyhow::{anyhow, Result};
use burn::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::{
    synthetic::PredictorInputs,
    tensors::{matrix_from_tensor, tensor_from_matrix},
};
use crate::domain::{matrix::Matrix, mode::Mode};
use crate::ml::model::{AnnotationPredictor, AnnotationPredictorConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Cpu,
    Gpu,
}

/// What one forward call produced.
#[derive(Debug, Clone)]
pub struct ForwardReport {
    pub loss:          Option<f32>,
    /// [batch, num_terms]
    pub logits:        Matrix,
    pub structure:     String,
    /// Trainable parameters only
    pub num_params:    usize,
    /// Frozen term table values, 0 when the table is trainable
    pub frozen_params: usize,
}

/// Architecture summary without running a forward pass.
#[derive(Debug, Clone)]
pub struct ModelSummary {
    pub structure:     String,
    /// Trainable parameters only
    pub num_params:    usize,
    pub frozen_params: usize,
    pub num_terms:     usize,
    pub term_dim:      usize,
}

pub fn run_forward(
    config:  &AnnotationPredictorConfig,
    inputs:  &PredictorInputs,
    mode:    Mode,
    backend: BackendKind,
) -> Result<ForwardReport> {
    match backend {
        BackendKind::Cpu => forward_on::<burn::backend::NdArray>(config, inputs, mode, &Default::default()),
        BackendKind::Gpu => {
            let device = burn::backend::wgpu::WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            forward_on::<burn::backend::Wgpu>(config, inputs, mode, &device)
        }
    }
}

pub fn describe(
    config:    &AnnotationPredictorConfig,
    num_terms: usize,
    term_dim:  usize,
    backend:   BackendKind,
) -> Result<ModelSummary> {
    match backend {
        BackendKind::Cpu => describe_on::<burn::backend::NdArray>(config, num_terms, term_dim, &Default::default()),
        BackendKind::Gpu => describe_on::<burn::backend::Wgpu>(
            config, num_terms, term_dim, &burn::backend::wgpu::WgpuDevice::default(),
        ),
    }
}

fn forward_on<B: Backend>(
    config: &AnnotationPredictorConfig,
    inputs: &PredictorInputs,
    mode:   Mode,
    device: &B::Device,
) -> Result<ForwardReport> {
    let terms = tensor_from_matrix::<B>(&inputs.terms, device);
    let model: AnnotationPredictor<B> = config.init(terms, device)?;

    let proteins = tensor_from_matrix::<B>(&inputs.proteins, device);
    let labels   = inputs.labels.as_ref().map(|m| tensor_from_matrix::<B>(m, device));

    tracing::info!(
        "Forward pass ({mode}): proteins {:?}, labels {}",
        inputs.proteins.shape(),
        if labels.is_some() { "given" } else { "none" },
    );
    let output = model.forward(proteins, labels, mode);

    let loss = match output.loss {
        Some(loss) => Some(
            loss.into_data()
                .to_vec::<f32>()
                .map_err(|e| anyhow!("Cannot read loss value: {e:?}"))?
                .first()
                .copied()
                .ok_or_else(|| anyhow!("Loss tensor is empty"))?,
        ),
        None => None,
    };
    let logits = matrix_from_tensor(output.logits)?;
    tracing::debug!("Logits shape {:?}, loss {:?}", logits.shape(), loss);

    Ok(ForwardReport {
        loss,
        logits,
        structure:     model.to_string(),
        num_params:    model.trainable_params(),
        frozen_params: model.frozen_params(),
    })
}

fn describe_on<B: Backend>(
    config:    &AnnotationPredictorConfig,
    num_terms: usize,
    term_dim:  usize,
    device:    &B::Device,
) -> Result<ModelSummary> {
    // Values are irrelevant here, only the table shape matters
    let terms = Tensor::<B, 2>::zeros([num_terms, term_dim], device);
    let model: AnnotationPredictor<B> = config.init(terms, device)?;

    Ok(ModelSummary {
        structure:     model.to_string(),
        num_params:    model.trainable_params(),
        frozen_params: model.frozen_params(),
        num_terms:     model.num_terms(),
        term_dim:      model.term_dim(),
    })
}
