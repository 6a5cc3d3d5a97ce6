use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::rbm::activations::Activations;

/// Agreement-frequency accumulator shaped like the weight matrix.
///
/// Cell `(h, v)` grows by `1 / P` every time hidden unit `h` and visible unit
/// `v` hold the same value, whether both are on or both are off. `P` is the
/// number of observations in the epoch, so after a full pass each cell lies
/// in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationStats {
    freq: Matrix,
}

impl CorrelationStats {
    /// Zeroed accumulator for a `num_hidden x num_visible` machine.
    pub fn new(num_hidden: usize, num_visible: usize) -> Result<CorrelationStats> {
        Ok(CorrelationStats {
            freq: Matrix::try_zeros(num_hidden + 1, num_visible + 1)?,
        })
    }

    pub fn accumulate(&mut self, hidden: &Activations, visible: &Activations, total: usize) {
        let inc = 1.0 / total as f64;
        for (h, &b) in hidden.as_slice().iter().enumerate() {
            for (v, &a) in visible.as_slice().iter().enumerate() {
                if b == a {
                    self.freq[(h, v)] += inc;
                }
            }
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.freq
    }

    pub fn get(&self, h: usize, v: usize) -> f64 {
        self.freq[(h, v)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_agreement_not_product() {
        let mut stats = CorrelationStats::new(2, 3).unwrap();
        let hidden = Activations::with_bias(&[0, 1]);
        let visible = Activations::with_bias(&[0, 1, 0]);
        stats.accumulate(&hidden, &visible, 4);

        // hidden = [1, 0, 1], visible = [1, 0, 1, 0]
        let expected = [
            [0.25, 0.0, 0.25, 0.0],
            [0.0, 0.25, 0.0, 0.25],
            [0.25, 0.0, 0.25, 0.0],
        ];
        for (h, row) in expected.iter().enumerate() {
            assert_eq!(stats.matrix().row(h), row);
        }
    }

    #[test]
    fn both_off_counts_as_agreement() {
        let mut stats = CorrelationStats::new(1, 1).unwrap();
        stats.accumulate(&Activations::inactive(1), &Activations::inactive(1), 1);
        assert_eq!(stats.get(1, 1), 1.0);
        assert_eq!(stats.get(0, 0), 1.0);
        assert_eq!(stats.get(0, 1), 0.0);
        assert_eq!(stats.get(1, 0), 0.0);
    }

    #[test]
    fn full_pass_stays_within_unit_interval() {
        let mut stats = CorrelationStats::new(2, 2).unwrap();
        let patterns = [[0, 0], [1, 1], [1, 0], [0, 1]];
        for p in &patterns {
            let units = Activations::with_bias(p);
            stats.accumulate(&units, &units, patterns.len());
        }
        assert!(stats.matrix().as_slice().iter().all(|&x| (0.0..=1.0).contains(&x)));
        assert_eq!(stats.get(0, 0), 1.0);
        assert_eq!(stats.get(1, 1), 1.0);
        assert_eq!(stats.get(1, 2), 0.5);
    }
}
