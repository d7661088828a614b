// ============================================================
// Layer 5: ML / Model Layer (Burn)
// ============================================================
// This layer contains the Burn model code. Layers above it
// work with plain Matrix values and never build tensors.
//
// What's in this layer:
//
//   model.rs     : AnnotationPredictor: the full forward pass
//                   protein projector → batch self-attention
//                   → term projector → dot-product similarity
//                   → probability head → optional BCE loss
//
//   projector.rs : protein and GO-term projectors
//   attention.rs : multi-head self-attention across the batch
//   head.rs      : two-layer probability head
//   batch_norm.rs: batch normalisation with explicit mode
//   dropout.rs   : mode-gated inverted dropout
//   loss.rs      : numerically stable BCE with logits
//
//   runner.rs    : picks a backend, runs the model on
//                   Matrix inputs, returns plain results
//
// Reference: Burn Book §3 (Building Blocks)
//            Vaswani et al. (2017) Attention Is All You Need

/// Full predictor and its configuration
pub mod model;

pub mod projector;

pub mod attention;

pub mod head;

pub mod batch_norm;

pub mod dropout;

pub mod loss;

/// Backend selection and forward-pass entry points
pub mod runner;
