// ============================================================================
// observable-map - Primitives Module
// The broadcast channel that carries change events
// ============================================================================

pub mod subject;

pub use subject::{EventStream, Subject, Subscription};
