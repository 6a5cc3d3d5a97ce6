use serde::{Serialize, Deserialize};

use crate::data::TrainingSet;
use crate::error::{RbmError, Result};

/// Hyperparameters and training data for one driver run.
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes. The defaults train a 6x3 machine on two three-bit clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Visible layer width; follows the training data when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_visible: Option<usize>,
    pub num_hidden: usize,
    pub learning_rate: f64,
    pub epochs: usize,
    /// Seed for the engine's random stream; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Pause after every training milestone.
    pub interactive: bool,
    pub training_set: Vec<Vec<u8>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            num_visible: None,
            num_hidden: 3,
            learning_rate: 0.1,
            epochs: 1,
            seed: None,
            interactive: false,
            training_set: vec![
                vec![1, 1, 1, 0, 0, 0],
                vec![1, 0, 1, 0, 0, 0],
                vec![1, 1, 1, 0, 0, 0],
                vec![0, 0, 0, 1, 1, 1],
                vec![0, 0, 0, 1, 0, 1],
                vec![0, 0, 0, 1, 1, 1],
            ],
        }
    }
}

impl RunConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file; missing fields keep their defaults.
    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// The configured visible width, or the width of the first training
    /// vector when none is configured.
    pub fn visible_units(&self) -> usize {
        self.num_visible
            .or_else(|| self.training_set.first().map(Vec::len))
            .unwrap_or(0)
    }

    /// Checks the hyperparameters and returns the validated training set.
    ///
    /// An explicit `num_visible` that disagrees with the training vectors is
    /// reported as `RbmError::VectorLength`.
    pub fn validate(&self) -> Result<TrainingSet> {
        let num_visible = self.visible_units();
        if num_visible == 0 {
            return Err(RbmError::EmptyLayer { layer: "visible" });
        }
        if self.num_hidden == 0 {
            return Err(RbmError::EmptyLayer { layer: "hidden" });
        }
        if !self.learning_rate.is_finite() {
            return Err(RbmError::InvalidLearningRate(self.learning_rate));
        }
        TrainingSet::new(self.training_set.clone(), num_visible)
    }
}
