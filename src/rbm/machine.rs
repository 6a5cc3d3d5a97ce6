use tracing::info;

use crate::activation::sigmoid::sigmoid;
use crate::data::TrainingSet;
use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::rbm::activations::Activations;
use crate::rbm::snapshot::WeightSnapshot;
use crate::sampling::bernoulli::binomial;
use crate::sampling::stream::RandomStream;
use crate::train::correlation::CorrelationStats;
use crate::train::epoch_stats::EpochStats;
use crate::train::loop_fn::train_loop;
use crate::train::observer::NoopObserver;
use crate::train::train_config::TrainConfig;

/// Restricted Boltzmann Machine with binary units.
///
/// The weight matrix has `num_hidden + 1` rows and `num_visible + 1` columns.
/// Row 0 and column 0 belong to the bias units:
///
/// - `weights[(h, v)]`, `h, v >= 1` — connection between hidden `h` and visible `v`
/// - `weights[(h, 0)]`, `h >= 1`    — bias of hidden unit `h`
/// - `weights[(0, v)]`, `v >= 1`    — bias of visible unit `v`
/// - `weights[(0, 0)]`              — allocated and initialised, never used
#[derive(Debug)]
pub struct Rbm {
    num_visible: usize,
    num_hidden: usize,
    learning_rate: f64,
    weights: Matrix,
    stream: RandomStream,
}

impl Rbm {
    /// Builds an engine whose weights are drawn from N(0, 1) out of `stream`.
    ///
    /// Layer sizes and learning rate are taken as given; the only failure is
    /// running out of memory for the weight matrix.
    pub fn new(
        num_visible: usize,
        num_hidden: usize,
        learning_rate: f64,
        mut stream: RandomStream,
    ) -> Result<Rbm> {
        let weights = Matrix::try_standard_normal(num_hidden + 1, num_visible + 1, &mut stream)?;

        info!(
            num_visible,
            num_hidden,
            learning_rate,
            seed = stream.seed(),
            "initialised restricted boltzmann machine"
        );

        Ok(Rbm {
            num_visible,
            num_hidden,
            learning_rate,
            weights,
            stream,
        })
    }

    pub fn with_seed(
        num_visible: usize,
        num_hidden: usize,
        learning_rate: f64,
        seed: u64,
    ) -> Result<Rbm> {
        Rbm::new(num_visible, num_hidden, learning_rate, RandomStream::with_seed(seed))
    }

    pub fn from_entropy(num_visible: usize, num_hidden: usize, learning_rate: f64) -> Result<Rbm> {
        Rbm::new(num_visible, num_hidden, learning_rate, RandomStream::from_entropy())
    }

    pub fn num_visible(&self) -> usize {
        self.num_visible
    }

    pub fn num_hidden(&self) -> usize {
        self.num_hidden
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Seed of the engine's random stream; replaying it reproduces the run.
    pub fn seed(&self) -> u64 {
        self.stream.seed()
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Runs CD-1 for `epochs` passes over `data` without pausing.
    ///
    /// # Errors
    /// `RbmError::WidthMismatch` if the training vectors are not
    /// `num_visible` wide.
    pub fn train(&mut self, data: &TrainingSet, epochs: usize) -> Result<Option<EpochStats>> {
        train_loop(self, data, &TrainConfig::new(epochs), &mut NoopObserver)
    }

    // -----------------------------------------------------------------------
    // Propagation
    // -----------------------------------------------------------------------

    /// P(hidden_j = 1 | visible): row `j` of W against the full visible vector.
    fn propagate_from_visible(&self, visible: &Activations, j: usize) -> f64 {
        let sum: f64 = self.weights.row(j).iter()
            .zip(visible.as_slice())
            .map(|(w, &a)| w * a as f64)
            .sum();
        sigmoid(sum)
    }

    /// P(visible_i = 1 | hidden): column `i` of W against the full hidden vector.
    fn propagate_from_hidden(&self, hidden: &Activations, i: usize) -> f64 {
        let sum: f64 = self.weights.column(i)
            .zip(hidden.as_slice())
            .map(|(w, &b)| w * b as f64)
            .sum();
        sigmoid(sum)
    }

    /// Firing probabilities of every hidden unit; the bias entry is reported as 1.
    pub fn hidden_probabilities(&self, visible: &Activations) -> Vec<f64> {
        debug_assert_eq!(visible.len(), self.num_visible + 1);
        std::iter::once(1.0)
            .chain((1..=self.num_hidden).map(|j| self.propagate_from_visible(visible, j)))
            .collect()
    }

    /// Firing probabilities of every visible unit; the bias entry is reported as 1.
    pub fn visible_probabilities(&self, hidden: &Activations) -> Vec<f64> {
        debug_assert_eq!(hidden.len(), self.num_hidden + 1);
        std::iter::once(1.0)
            .chain((1..=self.num_visible).map(|i| self.propagate_from_hidden(hidden, i)))
            .collect()
    }

    /// Samples a binary hidden vector from `visible` into `out`.
    pub fn sample_hidden(&mut self, visible: &Activations, out: &mut Activations) {
        debug_assert_eq!(visible.len(), self.num_visible + 1);
        debug_assert_eq!(out.len(), self.num_hidden + 1);
        out.reset_bias();
        for j in 1..=self.num_hidden {
            let p = self.propagate_from_visible(visible, j);
            out.set(j, binomial(p, &mut self.stream));
        }
    }

    /// Samples a binary visible vector from `hidden` into `out`.
    pub fn sample_visible(&mut self, hidden: &Activations, out: &mut Activations) {
        debug_assert_eq!(hidden.len(), self.num_hidden + 1);
        debug_assert_eq!(out.len(), self.num_visible + 1);
        out.reset_bias();
        for i in 1..=self.num_visible {
            let p = self.propagate_from_hidden(hidden, i);
            out.set(i, binomial(p, &mut self.stream));
        }
    }

    /// One up-down pass: samples hidden units from `observation`, then a
    /// visible reconstruction from them. The bias unit is stripped.
    pub fn reconstruct(&mut self, observation: &[u8]) -> Vec<u8> {
        let visible = Activations::with_bias(observation);
        let mut hidden = Activations::inactive(self.num_hidden);
        let mut rebuilt = Activations::inactive(self.num_visible);
        self.sample_hidden(&visible, &mut hidden);
        self.sample_visible(&hidden, &mut rebuilt);
        rebuilt.units().to_vec()
    }

    // -----------------------------------------------------------------------
    // Learning
    // -----------------------------------------------------------------------

    /// W += learning_rate * (positive - negative), over every cell.
    pub(crate) fn apply_update(
        &mut self,
        positive: &CorrelationStats,
        negative: &CorrelationStats,
    ) {
        let lr = self.learning_rate;
        let step = (positive.matrix() - negative.matrix()).map(|d| lr * d);
        self.weights += &step;
    }

    // -----------------------------------------------------------------------
    // Bias views
    // -----------------------------------------------------------------------

    /// `weights[(0, 1..=num_visible)]`
    pub fn visible_bias(&self) -> Vec<f64> {
        self.weights.row(0)[1..].to_vec()
    }

    /// `weights[(1..=num_hidden, 0)]`
    pub fn hidden_bias(&self) -> Vec<f64> {
        self.weights.column(0).skip(1).collect()
    }

    pub fn snapshot(&self) -> WeightSnapshot {
        WeightSnapshot {
            num_visible: self.num_visible,
            num_hidden: self.num_hidden,
            learning_rate: self.learning_rate,
            seed: self.seed(),
            visible_bias: self.visible_bias(),
            hidden_bias: self.hidden_bias(),
            weights: self.weights.to_rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_matrix_has_bias_row_and_column() {
        let rbm = Rbm::with_seed(6, 3, 0.1, 1).unwrap();
        assert_eq!(rbm.weights().shape(), (4, 7));
        assert!(rbm.weights().as_slice().iter().all(|w| w.is_finite()));
    }

    #[test]
    fn zero_sized_layers_are_not_rejected() {
        let rbm = Rbm::with_seed(0, 0, 0.1, 1).unwrap();
        assert_eq!(rbm.weights().shape(), (1, 1));
        assert!(rbm.visible_bias().is_empty());
        assert!(rbm.hidden_bias().is_empty());
    }

    #[test]
    fn bias_views_read_row_zero_and_column_zero() {
        let rbm = Rbm::with_seed(5, 4, 0.1, 17).unwrap();
        let w = rbm.weights();

        let vb = rbm.visible_bias();
        assert_eq!(vb.len(), 5);
        for v in 1..=5 {
            assert_eq!(vb[v - 1], w[(0, v)]);
        }

        let hb = rbm.hidden_bias();
        assert_eq!(hb.len(), 4);
        for h in 1..=4 {
            assert_eq!(hb[h - 1], w[(h, 0)]);
        }
    }

    #[test]
    fn sampled_vectors_keep_bias_on() {
        let mut rbm = Rbm::with_seed(6, 3, 0.1, 5).unwrap();
        let visible = Activations::with_bias(&[1, 0, 1, 0, 0, 1]);
        let mut hidden = Activations::inactive(3);
        let mut rebuilt = Activations::inactive(6);

        for _ in 0..200 {
            rbm.sample_hidden(&visible, &mut hidden);
            rbm.sample_visible(&hidden, &mut rebuilt);
            assert_eq!(hidden[0], 1);
            assert_eq!(rebuilt[0], 1);
            assert!(hidden.units().iter().chain(rebuilt.units()).all(|&x| x <= 1));
        }
    }

    #[test]
    fn hidden_probability_is_sigmoid_of_row_dot_product() {
        let rbm = Rbm::with_seed(3, 2, 0.1, 8).unwrap();
        let visible = Activations::with_bias(&[1, 0, 1]);
        let w = rbm.weights();

        let probs = rbm.hidden_probabilities(&visible);
        assert_eq!(probs.len(), 3);
        assert_eq!(probs[0], 1.0);
        for j in 1..=2 {
            let expected = sigmoid(w[(j, 0)] + w[(j, 1)] + w[(j, 3)]);
            assert!((probs[j] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn visible_probability_is_sigmoid_of_column_dot_product() {
        let rbm = Rbm::with_seed(3, 2, 0.1, 8).unwrap();
        let hidden = Activations::with_bias(&[0, 1]);
        let w = rbm.weights();

        let probs = rbm.visible_probabilities(&hidden);
        assert_eq!(probs.len(), 4);
        assert_eq!(probs[0], 1.0);
        for i in 1..=3 {
            let expected = sigmoid(w[(0, i)] + w[(2, i)]);
            assert!((probs[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn reconstruction_is_binary_and_visible_sized() {
        let mut rbm = Rbm::with_seed(6, 3, 0.1, 21).unwrap();
        let rebuilt = rbm.reconstruct(&[1, 1, 1, 0, 0, 0]);
        assert_eq!(rebuilt.len(), 6);
        assert!(rebuilt.iter().all(|&x| x <= 1));
    }

    #[test]
    fn snapshot_mirrors_engine_state() {
        let rbm = Rbm::with_seed(2, 2, 0.25, 99).unwrap();
        let snap = rbm.snapshot();
        assert_eq!(snap.seed, 99);
        assert_eq!(snap.learning_rate, 0.25);
        assert_eq!(snap.weights, rbm.weights().to_rows());
        assert_eq!(snap.visible_bias, rbm.visible_bias());
        assert_eq!(snap.hidden_bias, rbm.hidden_bias());
    }
}
