// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// This layer orchestrates the other layers to accomplish
// one goal (a smoke run, or describing the architecture).
//
// Rules for this layer:
//   - No tensor code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// Synthetic end-to-end forward pass
pub mod smoke_use_case;

// Architecture summary
pub mod describe_use_case;
