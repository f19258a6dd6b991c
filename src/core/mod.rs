//! Core pricing logic

pub mod config;
pub mod golden_section;
pub mod log;
pub mod optimizer;
pub mod product;
pub mod report;

// Re-export main types for cleaner imports
pub use optimizer::{Method, OptimizationResult, OptimizeError, Optimizer, optimize};
pub use product::{Product, ProductParameters};
pub use report::{PricingRecord, PricingReport};
