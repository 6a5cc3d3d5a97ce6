pub mod correlation;
pub mod epoch_stats;
pub mod train_config;
pub mod observer;
pub mod loop_fn;

pub use correlation::CorrelationStats;
pub use epoch_stats::EpochStats;
pub use train_config::{TrainConfig, TrainMode};
pub use observer::{Milestone, NoopObserver, Step, StepDecision, StepObserver, StepView};
pub use loop_fn::train_loop;
