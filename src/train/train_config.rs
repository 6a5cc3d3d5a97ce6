use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Whether the step observer is consulted during training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrainMode {
    /// Pause at every milestone of every observation.
    Interactive,
    /// Never consult the observer.
    #[default]
    RunToCompletion,
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — total number of full passes over the training data
/// - `mode`        — starting mode; an interactive run can switch itself to
///                   `RunToCompletion` through its observer
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch.  If the receiver is dropped the loop
///                   terminates early.
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates after the current epoch.
#[derive(Debug)]
pub struct TrainConfig {
    pub epochs: usize,
    pub mode: TrainMode,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Run-to-completion config with no progress channel and no stop flag.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            mode: TrainMode::RunToCompletion,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn interactive(epochs: usize) -> Self {
        TrainConfig {
            mode: TrainMode::Interactive,
            ..TrainConfig::new(epochs)
        }
    }
}
