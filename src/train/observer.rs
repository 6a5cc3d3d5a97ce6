use crate::math::matrix::Matrix;
use crate::rbm::activations::Activations;
use crate::train::correlation::CorrelationStats;

/// The seven checkpoints inside the processing of one observation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    /// `a = [1] ++ x` has been built.
    Visible,
    /// `b_pos` sampled from `a`.
    PositiveHidden,
    /// `positiveStats` updated.
    PositiveStats,
    /// `a_neg` sampled from `b_pos`.
    NegativeVisible,
    /// `b_neg` sampled from `a_neg`.
    NegativeHidden,
    /// `negativeStats` updated.
    NegativeStats,
    /// Weight matrix updated.
    Weights,
}

impl Milestone {
    pub const ALL: [Milestone; 7] = [
        Milestone::Visible,
        Milestone::PositiveHidden,
        Milestone::PositiveStats,
        Milestone::NegativeVisible,
        Milestone::NegativeHidden,
        Milestone::NegativeStats,
        Milestone::Weights,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Milestone::Visible => "a",
            Milestone::PositiveHidden => "b",
            Milestone::PositiveStats => "1p",
            Milestone::NegativeVisible => "a'",
            Milestone::NegativeHidden => "b'",
            Milestone::NegativeStats => "2p",
            Milestone::Weights => "w",
        }
    }
}

/// The value a milestone just produced.
#[derive(Debug, Clone, Copy)]
pub enum StepView<'a> {
    Activations(&'a Activations),
    Stats(&'a CorrelationStats),
    Weights(&'a Matrix),
}

#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    /// 0-based epoch.
    pub epoch: usize,
    /// 0-based index into the training set.
    pub observation: usize,
    pub milestone: Milestone,
    pub view: StepView<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDecision {
    Continue,
    /// Stop consulting the observer for the rest of the run.
    RunToEnd,
    /// End training now; updates already applied are kept.
    Stop,
}

/// Advisory hook called at each milestone while training interactively.
/// It sees the values but cannot change them.
pub trait StepObserver {
    fn on_step(&mut self, step: &Step<'_>) -> StepDecision;
}

impl<F> StepObserver for F
where
    F: FnMut(&Step<'_>) -> StepDecision,
{
    fn on_step(&mut self, step: &Step<'_>) -> StepDecision {
        self(step)
    }
}

/// Observer that always continues.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _step: &Step<'_>) -> StepDecision {
        StepDecision::Continue
    }
}
