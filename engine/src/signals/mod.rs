pub mod crossover;

pub use crossover::{CrossoverDetector, CrossoverParams, CrossoverSnapshot, TrendBias};
