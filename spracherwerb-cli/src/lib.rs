// All normalization functionality is in spracherwerb-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod config_locator;
pub mod report;

// Re-export core types for convenience
pub use spracherwerb_core::*;

// Re-export CLI utilities
pub use config_locator::ConfigLocator;
pub use report::NormalizationReport;
