// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust structs and enums that describe the problem:
// matrices of embeddings, the train/eval mode, and ranked
// term predictions.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and functions
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

// Row-major matrix used for every model input
pub mod matrix;

// Train / eval execution mode
pub mod mode;

// Ranked per-protein term predictions
pub mod annotation;
