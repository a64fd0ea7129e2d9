// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns used by more than one layer:
//
//   artifact_store.rs — reading (and writing) the serialized
//                       pipeline artifact; every read failure is
//                       a startup failure
//
//   config_store.rs   — reading the optional JSON config file
//                       whose keys override the serve defaults

/// Pipeline artifact loading and saving
pub mod artifact_store;

/// Optional JSON configuration file
pub mod config_store;
