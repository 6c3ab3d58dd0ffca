// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence concerns that sit below the use cases:
//
//   project_store.rs — settings.json persistence
//                      Creates, loads, and saves the per-project
//                      configuration (root, annotation path, and
//                      registered dataset sources) as JSON.
//
//   registry.rs      — dataset source registration
//                      Add/remove/resolve of named sources, each
//                      mutation written through the ProjectStore
//                      so disk and memory never drift.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling)

/// Project settings persistence
pub mod project_store;

/// Dataset source add/remove/resolve with write-through persistence
pub mod registry;
