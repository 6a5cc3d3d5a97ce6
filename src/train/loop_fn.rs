use std::sync::atomic::Ordering;
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::data::TrainingSet;
use crate::error::{RbmError, Result};
use crate::rbm::activations::Activations;
use crate::rbm::machine::Rbm;
use crate::train::correlation::CorrelationStats;
use crate::train::epoch_stats::EpochStats;
use crate::train::observer::{Milestone, Step, StepDecision, StepObserver, StepView};
use crate::train::train_config::{TrainConfig, TrainMode};

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `rbm` with single-step contrastive divergence and returns the
/// statistics of the **last completed epoch** (`None` if no epoch finished).
///
/// Every epoch starts from fresh positive and negative accumulators. The
/// weights are updated after each observation, from the accumulators as they
/// stand at that point of the epoch.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`, **or**
/// - the observer answers `StepDecision::Stop` (interactive mode only).
///
/// # Errors
/// Fails if the training vectors are not `rbm.num_visible()` wide, or if the
/// accumulators cannot be allocated.
pub fn train_loop(
    rbm: &mut Rbm,
    data: &TrainingSet,
    config: &TrainConfig,
    observer: &mut dyn StepObserver,
) -> Result<Option<EpochStats>> {
    if data.width() != rbm.num_visible() {
        return Err(RbmError::WidthMismatch {
            expected: rbm.num_visible(),
            found: data.width(),
        });
    }

    let num_visible = rbm.num_visible();
    let num_hidden = rbm.num_hidden();
    let total = data.len();
    let mut mode = config.mode;
    let mut last_stats = None;

    info!(
        epochs = config.epochs,
        observations = total,
        ?mode,
        "starting contrastive divergence"
    );

    let mut positive_hidden = Activations::inactive(num_hidden);
    let mut negative_visible = Activations::inactive(num_visible);
    let mut negative_hidden = Activations::inactive(num_hidden);

    'epochs: for epoch in 0..config.epochs {
        if stop_requested(config) {
            break;
        }

        let t_start = Instant::now();
        let mut positive = CorrelationStats::new(num_hidden, num_visible)?;
        let mut negative = CorrelationStats::new(num_hidden, num_visible)?;
        let mut mismatched_units = 0usize;

        for (observation, x) in data.iter().enumerate() {
            let mut pause = |milestone: Milestone, view: StepView<'_>| {
                checkpoint(&mut mode, &mut *observer, Step { epoch, observation, milestone, view })
            };

            // ── Positive phase ───────────────────────────────────────────
            let visible = Activations::with_bias(x);
            if pause(Milestone::Visible, StepView::Activations(&visible)) {
                break 'epochs;
            }

            rbm.sample_hidden(&visible, &mut positive_hidden);
            if pause(Milestone::PositiveHidden, StepView::Activations(&positive_hidden)) {
                break 'epochs;
            }

            positive.accumulate(&positive_hidden, &visible, total);
            if pause(Milestone::PositiveStats, StepView::Stats(&positive)) {
                break 'epochs;
            }

            // ── Negative (reconstruction) phase ──────────────────────────
            rbm.sample_visible(&positive_hidden, &mut negative_visible);
            if pause(Milestone::NegativeVisible, StepView::Activations(&negative_visible)) {
                break 'epochs;
            }

            rbm.sample_hidden(&negative_visible, &mut negative_hidden);
            if pause(Milestone::NegativeHidden, StepView::Activations(&negative_hidden)) {
                break 'epochs;
            }

            negative.accumulate(&negative_hidden, &negative_visible, total);
            if pause(Milestone::NegativeStats, StepView::Stats(&negative)) {
                break 'epochs;
            }

            // ── Update ───────────────────────────────────────────────────
            rbm.apply_update(&positive, &negative);
            if pause(Milestone::Weights, StepView::Weights(rbm.weights())) {
                break 'epochs;
            }

            mismatched_units += visible.units().iter()
                .zip(negative_visible.units())
                .filter(|(a, b)| a != b)
                .count();
        }

        let units_seen = total * num_visible;
        let reconstruction_error = if units_seen == 0 {
            0.0
        } else {
            mismatched_units as f64 / units_seen as f64
        };

        let stats = EpochStats {
            epoch: epoch + 1,
            total_epochs: config.epochs,
            reconstruction_error,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!(
            epoch = stats.epoch,
            total_epochs = stats.total_epochs,
            reconstruction_error = stats.reconstruction_error,
            elapsed_ms = stats.elapsed_ms,
            "epoch complete"
        );
        last_stats = Some(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    info!(
        epochs_completed = last_stats.as_ref().map_or(0, |s| s.epoch),
        "contrastive divergence finished"
    );

    Ok(last_stats)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Hands `step` to the observer when running interactively.
/// Returns `true` if training should end now.
fn checkpoint(mode: &mut TrainMode, observer: &mut dyn StepObserver, step: Step<'_>) -> bool {
    if *mode != TrainMode::Interactive {
        return false;
    }

    trace!(
        epoch = step.epoch,
        observation = step.observation,
        milestone = ?step.milestone,
        "checkpoint"
    );

    match observer.on_step(&step) {
        StepDecision::Continue => false,
        StepDecision::RunToEnd => {
            info!("interactive stepping ended, running to completion");
            *mode = TrainMode::RunToCompletion;
            false
        }
        StepDecision::Stop => {
            info!(
                epoch = step.epoch,
                observation = step.observation,
                "training stopped by observer"
            );
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::observer::NoopObserver;

    fn tiny_set() -> TrainingSet {
        TrainingSet::new(vec![vec![1, 0], vec![0, 1], vec![1, 1]], 2).unwrap()
    }

    #[test]
    fn observer_sees_seven_milestones_per_observation_in_order() {
        let mut rbm = Rbm::with_seed(2, 2, 0.1, 4).unwrap();
        let mut seen = Vec::new();
        let mut record = |step: &Step<'_>| {
            seen.push((step.epoch, step.observation, step.milestone));
            StepDecision::Continue
        };

        train_loop(&mut rbm, &tiny_set(), &TrainConfig::interactive(2), &mut record).unwrap();

        assert_eq!(seen.len(), 2 * 3 * 7);
        for (k, chunk) in seen.chunks(7).enumerate() {
            let milestones: Vec<_> = chunk.iter().map(|s| s.2).collect();
            assert_eq!(milestones, Milestone::ALL);
            assert!(chunk.iter().all(|s| s.0 == k / 3 && s.1 == k % 3));
        }
    }

    #[test]
    fn observer_is_silent_when_running_to_completion() {
        let mut rbm = Rbm::with_seed(2, 2, 0.1, 4).unwrap();
        let mut calls = 0;
        let mut count = |_: &Step<'_>| {
            calls += 1;
            StepDecision::Continue
        };

        let stats = train_loop(&mut rbm, &tiny_set(), &TrainConfig::new(3), &mut count).unwrap();
        assert_eq!(calls, 0);
        assert_eq!(stats.map(|s| s.epoch), Some(3));
    }

    #[test]
    fn run_to_end_silences_the_observer() {
        let mut rbm = Rbm::with_seed(2, 2, 0.1, 4).unwrap();
        let mut calls = 0;
        let mut skip_after_two = |_: &Step<'_>| {
            calls += 1;
            if calls == 2 {
                StepDecision::RunToEnd
            } else {
                StepDecision::Continue
            }
        };

        let config = TrainConfig::interactive(4);
        let stats = train_loop(&mut rbm, &tiny_set(), &config, &mut skip_after_two).unwrap();
        assert_eq!(calls, 2);
        assert_eq!(stats.map(|s| s.epoch), Some(4));
    }

    #[test]
    fn stop_decision_ends_training_without_finishing_the_epoch() {
        let mut rbm = Rbm::with_seed(2, 2, 0.1, 4).unwrap();
        let mut stop_at_weights = |step: &Step<'_>| {
            if step.milestone == Milestone::Weights {
                StepDecision::Stop
            } else {
                StepDecision::Continue
            }
        };

        let config = TrainConfig::interactive(5);
        let stats = train_loop(&mut rbm, &tiny_set(), &config, &mut stop_at_weights).unwrap();
        assert!(stats.is_none());
    }

    #[test]
    fn empty_training_set_completes_epochs_without_updates() {
        let mut rbm = Rbm::with_seed(2, 2, 0.1, 4).unwrap();
        let before = rbm.weights().clone();
        let empty = TrainingSet::new(vec![], 2).unwrap();

        let stats = train_loop(&mut rbm, &empty, &TrainConfig::new(2), &mut NoopObserver)
            .unwrap()
            .unwrap();
        assert_eq!(stats.epoch, 2);
        assert_eq!(stats.reconstruction_error, 0.0);
        assert_eq!(rbm.weights(), &before);
    }

    #[test]
    fn mismatched_width_is_reported_without_training() {
        let mut rbm = Rbm::with_seed(3, 2, 0.1, 4).unwrap();
        let before = rbm.weights().clone();

        let err = train_loop(&mut rbm, &tiny_set(), &TrainConfig::new(1), &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, RbmError::WidthMismatch { expected: 3, found: 2 }));
        assert_eq!(rbm.weights(), &before);
    }
}
