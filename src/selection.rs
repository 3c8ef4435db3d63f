/// Result of toggling an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// Blank label, nothing changed
    Ignored,
}

/// Ordered, duplicate-free list of selected ingredient or spice labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<String>,
    case_sensitive: bool,
}

impl Default for SelectionSet {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SelectionSet {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            items: Vec::new(),
            case_sensitive,
        }
    }

    fn position(&self, item: &str) -> Option<usize> {
        if self.case_sensitive {
            self.items.iter().position(|i| i == item)
        } else {
            let wanted = item.to_lowercase();
            self.items.iter().position(|i| i.to_lowercase() == wanted)
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.position(item).is_some()
    }

    /// Remove `item` if selected, append it otherwise
    pub fn toggle(&mut self, item: &str) -> Toggle {
        if item.trim().is_empty() {
            return Toggle::Ignored;
        }

        match self.position(item) {
            Some(index) => {
                self.items.remove(index);
                Toggle::Removed
            }
            None => {
                self.items.push(item.to_string());
                Toggle::Added
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ingredients first, then spices, in selection order
pub fn combined_selection(ingredients: &SelectionSet, spices: Option<&SelectionSet>) -> Vec<String> {
    ingredients
        .items()
        .iter()
        .chain(spices.map(|s| s.items()).unwrap_or(&[]))
        .cloned()
        .collect()
}
