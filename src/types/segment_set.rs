use crate::types::time_range::{RangeField, TimeRange};
use serde::{Deserialize, Serialize};

/// A segment that passed validation, as the engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSegment {
    pub start: f64,
    pub end: f64,
    pub label: String,
    /// Position of the range in the user's list, for display numbering.
    pub source_index: usize,
}

impl ValidSegment {
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time < self.end
    }

    pub fn same_bounds(&self, other: &ValidSegment) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// The user's segments in insertion order.
///
/// Insertion order is display order and is never changed by edits. Playback
/// logic works on [`SegmentSet::valid_sorted_view`] instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentSet {
    ranges: Vec<TimeRange>,
}

impl SegmentSet {
    pub fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    pub fn from_ranges(ranges: Vec<TimeRange>) -> Self {
        let mut set = Self { ranges };
        for range in &mut set.ranges {
            range.reparse();
        }
        set
    }

    /// Appends an empty range and returns its index.
    pub fn add(&mut self) -> usize {
        self.ranges.push(TimeRange::new());
        self.ranges.len() - 1
    }

    /// Sets one text field of the range at `index`. Returns false if there is
    /// no such range.
    pub fn update(&mut self, index: usize, field: RangeField, text: &str) -> bool {
        match self.ranges.get_mut(index) {
            Some(range) => {
                range.set(field, text);
                true
            }
            None => {
                log::warn!("segment update ignored, no segment at index {}", index);
                false
            }
        }
    }

    /// Deletes a range on explicit user request.
    pub fn remove(&mut self, index: usize) -> Option<TimeRange> {
        if index < self.ranges.len() {
            Some(self.ranges.remove(index))
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&TimeRange> {
        self.ranges.get(index)
    }

    pub fn ranges(&self) -> &[TimeRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Valid ranges sorted by start time. Ties keep insertion order.
    /// Recomputed on every call so it can never be stale.
    pub fn valid_sorted_view(&self) -> Vec<ValidSegment> {
        let mut view: Vec<ValidSegment> = self
            .ranges
            .iter()
            .enumerate()
            .filter_map(|(source_index, range)| {
                range.bounds().map(|(start, end)| ValidSegment {
                    start,
                    end,
                    label: range.label.clone(),
                    source_index,
                })
            })
            .collect();
        view.sort_by(|a, b| a.start.total_cmp(&b.start));
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(pairs: &[(&str, &str)]) -> SegmentSet {
        SegmentSet::from_ranges(
            pairs
                .iter()
                .map(|(start, end)| TimeRange::from_text(start, end, ""))
                .collect(),
        )
    }

    #[test]
    fn test_add_appends_empty_range() {
        let mut set = SegmentSet::new();
        assert_eq!(set.add(), 0);
        assert_eq!(set.add(), 1);
        assert_eq!(set.len(), 2);
        assert!(set.valid_sorted_view().is_empty());
    }

    #[test]
    fn test_update_keeps_insertion_order() {
        let mut set = set_of(&[("30", "40"), ("10", "20")]);
        let first_id = set.get(0).unwrap().id;
        assert!(set.update(0, RangeField::Start, "5"));
        assert_eq!(set.get(0).unwrap().id, first_id);
        assert_eq!(set.get(0).unwrap().start_seconds, Some(5.0));
        assert!(!set.update(7, RangeField::End, "1"));
    }

    #[test]
    fn test_view_is_sorted_and_filtered() {
        let set = set_of(&[("30", "40"), ("oops", "20"), ("10", "20"), ("25", "25"), ("", "")]);
        let view = set.valid_sorted_view();
        assert_eq!(view.len(), 2);
        assert_eq!((view[0].start, view[0].end, view[0].source_index), (10.0, 20.0, 2));
        assert_eq!((view[1].start, view[1].end, view[1].source_index), (30.0, 40.0, 0));
        for pair in view.windows(2) {
            assert!(pair[0].start <= pair[1].start);
        }
        assert!(view.iter().all(|s| s.start < s.end));
    }

    #[test]
    fn test_view_ties_keep_insertion_order() {
        let set = set_of(&[("10", "30"), ("5", "6"), ("10", "20")]);
        let view = set.valid_sorted_view();
        let order: Vec<usize> = view.iter().map(|s| s.source_index).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_view_reflects_latest_edit() {
        let mut set = set_of(&[("10", "20")]);
        assert_eq!(set.valid_sorted_view().len(), 1);
        set.update(0, RangeField::End, "");
        assert!(set.valid_sorted_view().is_empty());
        set.update(0, RangeField::End, "0:15");
        assert_eq!(set.valid_sorted_view()[0].end, 15.0);
    }

    #[test]
    fn test_remove_only_on_request() {
        let mut set = set_of(&[("10", "20"), ("30", "40")]);
        let removed = set.remove(0).unwrap();
        assert_eq!(removed.raw_start, "10");
        assert_eq!(set.len(), 1);
        assert!(set.remove(5).is_none());
    }
}
