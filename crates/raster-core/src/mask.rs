//! Boolean cell masks.

/// A boolean grid marking cells where a named condition holds
/// (permanent water, flooded).
///
/// A mask is only meaningful against a grid of the same shape; consumers
/// must check `matches_shape` (or align the mask first) before applying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    data: Vec<bool>,
    width: usize,
    height: usize,
}

impl Mask {
    /// Create a mask from raw boolean cells.
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`; masks are always derived
    /// from an existing grid, so a mismatch is a programming error.
    pub fn new(data: Vec<bool>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height, "mask shape mismatch");
        Self {
            data,
            width,
            height,
        }
    }

    /// Mask width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at a cell; out-of-range reads are `false`.
    pub fn get(&self, col: usize, row: usize) -> bool {
        if col >= self.width || row >= self.height {
            return false;
        }
        self.data[row * self.width + col]
    }

    /// Iterate over cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.data.iter().copied()
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// True if no cell is set.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Check this mask against a reference grid shape.
    pub fn matches_shape(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    /// True if no cell is set in both masks.
    pub fn is_disjoint(&self, other: &Mask) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| !(a && b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_get() {
        let mask = Mask::new(vec![true, false, false, true], 2, 2);
        assert_eq!(mask.count(), 2);
        assert!(mask.get(0, 0));
        assert!(mask.get(1, 1));
        assert!(!mask.get(1, 0));
        assert!(!mask.get(5, 5));
    }

    #[test]
    fn test_disjoint() {
        let a = Mask::new(vec![true, false, false, false], 2, 2);
        let b = Mask::new(vec![false, true, false, false], 2, 2);
        let c = Mask::new(vec![true, true, false, false], 2, 2);
        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    #[should_panic(expected = "mask shape mismatch")]
    fn test_shape_panic() {
        Mask::new(vec![true; 3], 2, 2);
    }
}
