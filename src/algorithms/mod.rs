//! Position solving algorithms

pub mod centroid;

pub use centroid::CentroidSolver;
