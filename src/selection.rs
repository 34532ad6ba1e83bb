//! Ordered list of in-progress chart selections.
//!
//! Position is the only identity a selection has: removing slot `i` shifts every later
//! slot down by one. Insertion order is display order and request order.

use crate::catalog::{decode_label, ChartSpec};
use crate::error::SelectionError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionList {
    specs: Vec<ChartSpec>,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ChartSpec> {
        self.specs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartSpec> {
        self.specs.iter()
    }

    pub fn as_slice(&self) -> &[ChartSpec] {
        &self.specs
    }

    /// Add an empty slot at the end; returns its index.
    pub fn append_empty(&mut self) -> usize {
        self.specs.push(ChartSpec::default());
        self.specs.len() - 1
    }

    /// Decode `label` and replace the slot at `index` wholesale.
    pub fn update(&mut self, index: usize, label: &str) -> Result<&ChartSpec, SelectionError> {
        let len = self.specs.len();
        let slot = self
            .specs
            .get_mut(index)
            .ok_or(SelectionError::OutOfRange { index, len })?;
        *slot = decode_label(label);
        Ok(slot)
    }

    /// Remove the slot at `index`, shifting later slots down.
    pub fn remove(&mut self, index: usize) -> Result<ChartSpec, SelectionError> {
        if index >= self.specs.len() {
            return Err(SelectionError::OutOfRange {
                index,
                len: self.specs.len(),
            });
        }
        Ok(self.specs.remove(index))
    }

    /// Number of slots that still have nothing chosen.
    pub fn empty_slots(&self) -> usize {
        self.specs.iter().filter(|s| s.is_empty()).count()
    }
}

impl<'a> IntoIterator for &'a SelectionList {
    type Item = &'a ChartSpec;
    type IntoIter = std::slice::Iter<'a, ChartSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(labels: &[&str]) -> SelectionList {
        let mut list = SelectionList::new();
        for label in labels {
            let i = list.append_empty();
            list.update(i, label).unwrap();
        }
        list
    }

    #[test]
    fn test_append_empty() {
        let mut list = SelectionList::new();
        assert!(list.is_empty());
        assert_eq!(list.append_empty(), 0);
        assert_eq!(list.append_empty(), 1);
        assert_eq!(list.len(), 2);
        assert!(list.get(1).unwrap().is_empty());
        assert_eq!(list.empty_slots(), 2);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let mut list = list_of(&["Bar Chart (Age vs Income)"]);
        let spec = list.update(0, "Count Plot (Region)").unwrap().clone();
        assert_eq!(spec.chart_kind, "Count Plot");
        assert_eq!(spec.x_field, "Region");
        // The old Y does not leak into the new spec
        assert_eq!(spec.y_field, None);
    }

    #[test]
    fn test_update_out_of_range_leaves_list_unchanged() {
        let mut list = list_of(&["Pie Chart (Region)"]);
        let before = list.clone();
        let err = list.update(1, "Bar Chart (Age vs Income)").unwrap_err();
        assert_eq!(err, SelectionError::OutOfRange { index: 1, len: 1 });
        assert_eq!(list, before);
    }

    #[test]
    fn test_remove_shifts_later_slots() {
        let mut list = list_of(&["Pie Chart (A)", "Pie Chart (B)", "Pie Chart (C)"]);
        let removed = list.remove(1).unwrap();
        assert_eq!(removed.x_field, "B");
        let xs: Vec<_> = list.iter().map(|s| s.x_field.as_str()).collect();
        assert_eq!(xs, vec!["A", "C"]);
    }

    #[test]
    fn test_append_then_remove_restores_list() {
        let mut list = list_of(&["Pie Chart (A)", "Pie Chart (B)"]);
        let before = list.clone();
        let i = list.append_empty();
        list.remove(i).unwrap();
        assert_eq!(list, before);
    }

    #[test]
    fn test_append_then_remove_first_keeps_order() {
        let mut list = list_of(&["Pie Chart (A)", "Pie Chart (B)"]);
        list.append_empty();
        let removed = list.remove(0).unwrap();
        assert_eq!(removed.x_field, "A");
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&decode_label("Pie Chart (B)")));
        assert!(list.get(1).unwrap().is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = SelectionList::new();
        assert_eq!(
            list.remove(0),
            Err(SelectionError::OutOfRange { index: 0, len: 0 })
        );
    }
}
