use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset recording which cells carry a marker
///
/// Cells are addressed by their row-major index (`y * width + x`), so the
/// whole entity layer lives in one contiguous buffer of one bit per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occupancy {
    bits: BitVec,
}

impl Occupancy {
    /// Create an occupancy layer with every cell vacant
    pub fn new(cell_count: usize) -> Self {
        Self {
            bits: bitvec![0; cell_count],
        }
    }

    /// Number of cells tracked
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the layer tracks no cells at all
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Mark or clear a cell; indices past the end are ignored
    pub fn set(&mut self, index: usize, occupied: bool) {
        if let Some(mut bit) = self.bits.get_mut(index) {
            *bit = occupied;
        }
    }

    /// Test whether a cell carries a marker
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Count occupied cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Row-major indices of all occupied cells
    pub fn iter_occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Occupancy({} of {} cells: {:?})",
            self.count(),
            self.len(),
            self.iter_occupied().collect::<Vec<_>>()
        )
    }
}
