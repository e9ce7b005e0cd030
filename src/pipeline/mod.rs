//! Estimation pipeline driving decode, registry and solve per message

pub mod estimator;

pub use estimator::{EstimationPipeline, PipelineState};
