//! Selection for list-based screens
//!
//! A list with a cursor that never wraps and never leaves the list bounds.

/// A list with a clamped selection cursor
///
/// # Examples
///
/// ```
/// use nmpilot_core::selection::SelectableList;
///
/// let mut list = SelectableList::new(vec!["eth0", "eth1", "eth2"]);
///
/// assert_eq!(list.selected(), Some(&"eth0"));
/// list.select_prev();
/// assert_eq!(list.selected(), Some(&"eth0"));
/// list.select_next();
/// list.select_next();
/// list.select_next();
/// assert_eq!(list.selected(), Some(&"eth2"));
/// ```
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    items: Vec<T>,
    selected_index: usize,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected_index: 0,
        }
    }
}

impl<T> SelectableList<T> {
    /// Create a new selectable list with the selection on the first item
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            selected_index: 0,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.selected_index)
    }

    /// Move selection to the next item, stopping at the end
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
    }

    /// Move selection to the previous item, stopping at the start
    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Replace all items, keeping the selection index where it still fits
    ///
    /// A selection past the new end lands on the last item.
    pub fn update_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.selected_index = self.selected_index.min(self.items.len().saturating_sub(1));
    }

    /// Iterate over items with their selection state
    pub fn iter_with_selection(&self) -> impl Iterator<Item = (usize, &T, bool)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (i, item, i == self.selected_index))
    }

    /// Select the first item matching a predicate
    ///
    /// Returns true if a matching item was found.
    pub fn select_where<F>(&mut self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        match self.items.iter().position(predicate) {
            Some(i) => {
                self.selected_index = i;
                true
            }
            None => false,
        }
    }
}
