// ============================================================================
// observable-map - Core Module
// Event records and shared type definitions
// ============================================================================

pub mod event;
pub mod types;
