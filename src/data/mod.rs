// ============================================================
// Layer 4: Data Assembly
// ============================================================
// Gets model inputs from plain Rust values onto a device.
//
//   SyntheticSpec
//       │
//       ▼
//   generate()            → PredictorInputs (three Matrix values)
//       │
//       ▼
//   tensor_from_matrix()  → Tensor<B, 2> on the chosen device
//
// There is no file loading here: real protein and GO-term
// embeddings are produced upstream and handed over as matrices.
//
// Reference: Burn Book §4 (Tensors from data)

/// Seeded random term table, protein batch and zero labels
pub mod synthetic;

/// Matrix ⇄ Burn tensor conversion
pub mod tensors;
