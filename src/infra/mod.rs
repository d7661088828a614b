// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in a business layer:
//
//   config_store.rs: Reads and writes AnnotationPredictorConfig
//                     as JSON so an architecture can be saved,
//                     edited by hand, and reused across runs.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Predictor config persistence
pub mod config_store;
