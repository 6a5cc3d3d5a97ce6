use serde::{Serialize, Deserialize};

/// Read-only copy of an engine's state, for reports.
///
/// `weights` keeps the full `(num_hidden + 1) x (num_visible + 1)` layout,
/// bias row and column included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    pub num_visible: usize,
    pub num_hidden: usize,
    pub learning_rate: f64,
    /// Seed of the random stream that produced these weights.
    pub seed: u64,
    pub visible_bias: Vec<f64>,
    pub hidden_bias: Vec<f64>,
    pub weights: Vec<Vec<f64>>,
}
