// rulekeeper-core/src/domain/view/selection.rs

/// Ordered set of selected items. Order is the order of selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    items: Vec<T>,
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: PartialEq + Clone> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `item`, or deselects it when already selected.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, item: T) -> bool {
        if let Some(pos) = self.items.iter().position(|i| *i == item) {
            self.items.remove(pos);
            false
        } else {
            self.items.push(item);
            true
        }
    }

    pub fn select(&mut self, item: T) {
        if !self.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Keeps only the items `keep` accepts; returns the dropped ones.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) -> Vec<T> {
        let (kept, dropped): (Vec<T>, Vec<T>) = self.items.drain(..).partition(|i| keep(i));
        self.items = kept;
        dropped
    }
}

impl<T: PartialEq + Clone> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut selection = Self::new();
        for item in iter {
            selection.select(item);
        }
        selection
    }
}
