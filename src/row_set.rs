//! Row identity sets built on top of roaring bitmaps.

use roaring::RoaringBitmap;

use crate::row::RowId;

/// Borrowed iterator that yields [`RowId`] values in ascending order.
pub type RowIdIter<'a> = Box<dyn Iterator<Item = RowId> + Send + 'a>;

/// Set of row identities supporting basic set algebra.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BitmapRowSet {
    bitmap: RoaringBitmap,
}

impl BitmapRowSet {
    /// Creates an empty row set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row identifier, returning false when it was already present.
    pub fn insert(&mut self, row: RowId) -> bool {
        self.bitmap.insert(row)
    }

    /// Returns true when the set contains the provided row identifier.
    #[must_use]
    pub fn contains(&self, row: RowId) -> bool {
        self.bitmap.contains(row)
    }

    /// Returns the number of rows tracked by the set.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from(self.bitmap.len()).unwrap_or(usize::MAX)
    }

    /// Returns true when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitmap.is_empty()
    }

    /// Returns an iterator over row identifiers.
    #[must_use]
    pub fn iter(&self) -> RowIdIter<'_> {
        Box::new(self.bitmap.iter())
    }

    /// Returns true when the two sets share no identity.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.bitmap.is_disjoint(&other.bitmap)
    }

    /// Returns the intersection between this set and `other`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let bitmap = &self.bitmap & &other.bitmap;
        Self { bitmap }
    }

    /// Returns the union between this set and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let bitmap = &self.bitmap | &other.bitmap;
        Self { bitmap }
    }

    /// Returns the relative complement (`self \ other`).
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let bitmap = &self.bitmap - &other.bitmap;
        Self { bitmap }
    }
}

impl FromIterator<RowId> for BitmapRowSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            bitmap: iter.into_iter().collect(),
        }
    }
}
