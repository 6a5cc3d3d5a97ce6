pub mod error;
pub mod math;
pub mod activation;
pub mod sampling;
pub mod rbm;
pub mod data;
pub mod train;
pub mod config;
pub mod report;
pub mod driver;

// Convenience re-exports
pub use error::{RbmError, Result};
pub use math::matrix::Matrix;
pub use sampling::stream::RandomStream;
pub use rbm::machine::Rbm;
pub use rbm::activations::Activations;
pub use data::training_set::TrainingSet;
pub use config::RunConfig;
pub use train::{train_loop, TrainConfig, TrainMode, EpochStats, StepObserver, StepDecision};
