// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (tile extraction or training delegation).
//
// Rules for this layer:
//   - No tensor math or image decoding here (Layer 5 seams)
//   - No UI or printing here (that's Layer 1)
//   - No direct settings-file access (that's Layer 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training delegation workflow
pub mod train_use_case;

// The tile extraction delegation workflow
pub mod extract_use_case;
