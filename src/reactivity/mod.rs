// ============================================================================
// observable-map - Reactivity Module
// Change detection policy
// ============================================================================

pub mod equality;
