//! Section sizes along one axis of the grid.
//!
//! A section is one row or one column. Every section starts at a default size;
//! individual sections can be resized or hidden. Offsets are derived on demand
//! from the default size plus the few overrides, so a list of a million rows
//! costs no more memory than a list of ten.

use std::collections::{BTreeMap, BTreeSet};

/// Size lookup for the sections of one axis.
pub trait SectionIndex {
    /// Pixel size of section `index`; 0 for indices outside the list.
    fn size_of(&self, index: i32) -> f32;
}

impl<F: Fn(i32) -> f32> SectionIndex for F {
    fn size_of(&self, index: i32) -> f32 {
        self(index)
    }
}

/// Sizes and offsets of the rows or columns of one grid axis
#[derive(Debug, Clone)]
pub struct SectionList {
    count: i32,
    default_size: f32,
    /// Explicit sizes that differ from `default_size`
    sizes: BTreeMap<i32, f32>,
    /// Hidden sections report size 0
    hidden: BTreeSet<i32>,
}

impl SectionList {
    pub fn new(count: u32, default_size: f32) -> Self {
        Self {
            count: i32::try_from(count).unwrap_or(i32::MAX),
            default_size: default_size.max(0.0),
            sizes: BTreeMap::new(),
            hidden: BTreeSet::new(),
        }
    }

    /// Number of sections
    pub fn count(&self) -> i32 {
        self.count
    }

    /// Change the number of sections, dropping overrides past the new end.
    pub fn set_count(&mut self, count: u32) {
        self.count = i32::try_from(count).unwrap_or(i32::MAX);
        let end = self.count;
        self.sizes.retain(|&index, _| index < end);
        self.hidden.retain(|&index| index < end);
    }

    pub fn set_default_size(&mut self, size: f32) {
        self.default_size = size.max(0.0);
    }

    fn contains(&self, index: i32) -> bool {
        index >= 0 && index < self.count
    }

    /// Size of section `index` before hiding is applied
    fn base_size(&self, index: i32) -> f32 {
        self.sizes.get(&index).copied().unwrap_or(self.default_size)
    }

    /// Set the size of one section. Out-of-range indices are ignored.
    pub fn resize(&mut self, index: i32, size: f32) {
        if !self.contains(index) {
            return;
        }
        self.sizes.insert(index, size.max(0.0));
    }

    /// Hide or show a section. Hidden sections keep their size for when they
    /// are shown again.
    pub fn set_hidden(&mut self, index: i32, hidden: bool) {
        if !self.contains(index) {
            return;
        }
        if hidden {
            self.hidden.insert(index);
        } else {
            self.hidden.remove(&index);
        }
    }

    pub fn is_hidden(&self, index: i32) -> bool {
        self.hidden.contains(&index)
    }

    /// Forget every resize and hidden flag.
    pub fn reset(&mut self) {
        self.sizes.clear();
        self.hidden.clear();
    }

    /// Pixel offset of the leading edge of section `index`.
    ///
    /// Indices past the end clamp to the total size.
    #[allow(clippy::cast_precision_loss)]
    pub fn offset_of(&self, index: i32) -> f32 {
        let end = index.clamp(0, self.count);
        let mut offset = self.default_size * end as f32;
        for (_, size) in self.sizes.range(..end) {
            offset += size - self.default_size;
        }
        for &hidden in self.hidden.range(..end) {
            offset -= self.base_size(hidden);
        }
        offset
    }

    /// Pixel offset of the trailing edge of section `index`.
    pub fn extent_of(&self, index: i32) -> f32 {
        self.offset_of(index) + self.size_of(index)
    }

    /// Sum of all section sizes
    pub fn total_size(&self) -> f32 {
        self.offset_of(self.count)
    }

    /// Section containing pixel `offset` (binary search).
    ///
    /// Zero-sized sections never contain an offset.
    pub fn index_of(&self, offset: f32) -> Option<i32> {
        if self.count == 0 || offset < 0.0 || offset >= self.total_size() {
            return None;
        }
        let (mut lo, mut hi) = (0, self.count - 1);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.offset_of(mid + 1) > offset {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        Some(lo)
    }
}

impl SectionIndex for SectionList {
    fn size_of(&self, index: i32) -> f32 {
        if !self.contains(index) || self.hidden.contains(&index) {
            return 0.0;
        }
        self.base_size(index)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sections() {
        let list = SectionList::new(10, 20.0);
        assert_eq!(list.count(), 10);
        assert_eq!(list.size_of(0), 20.0);
        assert_eq!(list.offset_of(3), 60.0);
        assert_eq!(list.extent_of(3), 80.0);
        assert_eq!(list.total_size(), 200.0);
    }

    #[test]
    fn test_out_of_range_sizes_are_zero() {
        let list = SectionList::new(3, 20.0);
        assert_eq!(list.size_of(-1), 0.0);
        assert_eq!(list.size_of(3), 0.0);
        assert_eq!(list.offset_of(-5), 0.0);
        assert_eq!(list.offset_of(100), 60.0);
    }

    #[test]
    fn test_resized_sections_shift_offsets() {
        let mut list = SectionList::new(5, 20.0);
        list.resize(1, 50.0);
        list.resize(3, 5.0);
        assert_eq!(list.size_of(1), 50.0);
        assert_eq!(list.offset_of(1), 20.0);
        assert_eq!(list.offset_of(2), 70.0);
        assert_eq!(list.offset_of(4), 95.0);
        assert_eq!(list.total_size(), 115.0);

        // Out-of-range resize is ignored
        list.resize(9, 1000.0);
        assert_eq!(list.total_size(), 115.0);
    }

    #[test]
    fn test_hidden_sections() {
        let mut list = SectionList::new(4, 10.0);
        list.resize(2, 30.0);
        list.set_hidden(2, true);
        assert!(list.is_hidden(2));
        assert_eq!(list.size_of(2), 0.0);
        assert_eq!(list.offset_of(3), 20.0);
        assert_eq!(list.total_size(), 30.0);

        list.set_hidden(2, false);
        assert_eq!(list.size_of(2), 30.0);
        assert_eq!(list.total_size(), 60.0);
    }

    #[test]
    fn test_index_of() {
        let mut list = SectionList::new(5, 20.0);
        list.resize(1, 40.0);
        assert_eq!(list.index_of(0.0), Some(0));
        assert_eq!(list.index_of(19.9), Some(0));
        assert_eq!(list.index_of(20.0), Some(1));
        assert_eq!(list.index_of(59.0), Some(1));
        assert_eq!(list.index_of(60.0), Some(2));
        assert_eq!(list.index_of(119.0), Some(4));
        assert_eq!(list.index_of(120.0), None);
        assert_eq!(list.index_of(-1.0), None);
    }

    #[test]
    fn test_index_of_skips_hidden() {
        let mut list = SectionList::new(3, 20.0);
        list.set_hidden(1, true);
        assert_eq!(list.index_of(20.0), Some(2));
    }

    #[test]
    fn test_set_count_drops_overrides() {
        let mut list = SectionList::new(10, 20.0);
        list.resize(8, 100.0);
        list.set_count(5);
        list.set_count(10);
        assert_eq!(list.size_of(8), 20.0);
    }

    #[test]
    fn test_reset() {
        let mut list = SectionList::new(3, 20.0);
        list.resize(0, 5.0);
        list.set_hidden(1, true);
        list.reset();
        assert_eq!(list.total_size(), 60.0);
    }

    #[test]
    fn test_closure_section_index() {
        let sizes = |index: i32| -> f32 { if index % 2 == 0 { 10.0 } else { 30.0 } };
        assert_eq!(sizes.size_of(0), 10.0);
        assert_eq!(sizes.size_of(1), 30.0);
    }
}
