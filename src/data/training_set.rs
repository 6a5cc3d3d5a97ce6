use crate::error::{RbmError, Result};

/// Ordered, immutable set of binary observations of a fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSet {
    width: usize,
    rows: Vec<Vec<u8>>,
}

impl TrainingSet {
    /// Checks that every row is `width` long and holds only 0 and 1.
    pub fn new(rows: Vec<Vec<u8>>, width: usize) -> Result<TrainingSet> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(RbmError::VectorLength {
                    index,
                    expected: width,
                    found: row.len(),
                });
            }
            if let Some(position) = row.iter().position(|&x| x > 1) {
                return Err(RbmError::NonBinary {
                    index,
                    position,
                    value: row[position],
                });
            }
        }
        Ok(TrainingSet { width, rows })
    }

    /// Length of every observation, bias excluded.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_binary_rows_of_matching_width() {
        let set = TrainingSet::new(vec![vec![1, 0, 1], vec![0, 0, 0]], 3).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.width(), 3);
        assert_eq!(set.iter().nth(1), Some(&[0u8, 0, 0][..]));
    }

    #[test]
    fn rejects_short_row() {
        let err = TrainingSet::new(vec![vec![1, 0, 1], vec![1, 0]], 3).unwrap_err();
        assert!(matches!(err, RbmError::VectorLength { index: 1, expected: 3, found: 2 }));
    }

    #[test]
    fn rejects_non_binary_value() {
        let err = TrainingSet::new(vec![vec![0, 2, 1]], 3).unwrap_err();
        assert!(matches!(err, RbmError::NonBinary { index: 0, position: 1, value: 2 }));
    }

    #[test]
    fn empty_set_keeps_its_declared_width() {
        let set = TrainingSet::new(vec![], 4).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.width(), 4);
    }
}
