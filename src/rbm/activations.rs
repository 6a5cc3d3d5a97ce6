use std::ops::Index;

/// Binary activation vector for one layer, bias unit included.
///
/// Index 0 is the always-on bias unit and is never sampled; the remaining
/// entries are 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activations {
    units: Vec<u8>,
}

impl Activations {
    /// All non-bias units inactive; `units` excludes the bias.
    pub fn inactive(units: usize) -> Activations {
        let mut v = vec![0; units + 1];
        v[0] = 1;
        Activations { units: v }
    }

    /// Prepends the bias unit to an observation.
    pub fn with_bias(observation: &[u8]) -> Activations {
        let mut units = Vec::with_capacity(observation.len() + 1);
        units.push(1);
        units.extend_from_slice(observation);
        Activations { units }
    }

    /// Length including the bias unit.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.units
    }

    /// The non-bias units.
    pub fn units(&self) -> &[u8] {
        &self.units[1..]
    }

    pub(crate) fn set(&mut self, i: usize, value: u8) {
        debug_assert!(i > 0, "the bias unit is fixed");
        self.units[i] = value;
    }

    pub(crate) fn reset_bias(&mut self) {
        self.units[0] = 1;
    }
}

impl Index<usize> for Activations {
    type Output = u8;

    fn index(&self, i: usize) -> &u8 {
        &self.units[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_is_prepended() {
        let a = Activations::with_bias(&[0, 1, 1]);
        assert_eq!(a.as_slice(), &[1, 0, 1, 1]);
        assert_eq!(a.units(), &[0, 1, 1]);
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn inactive_keeps_bias_on() {
        let a = Activations::inactive(3);
        assert_eq!(a.as_slice(), &[1, 0, 0, 0]);
    }

    #[test]
    fn empty_layer_is_just_the_bias() {
        let a = Activations::inactive(0);
        assert_eq!(a.len(), 1);
        assert!(a.units().is_empty());
    }
}
