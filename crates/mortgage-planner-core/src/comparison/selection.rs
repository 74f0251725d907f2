use serde::{Deserialize, Serialize};

/// Most products that can be compared side by side.
pub const MAX_SELECTION: usize = 3;

/// Outcome of a selection edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionChange {
    Added,
    Removed,
    AlreadySelected,
    NotSelected,
    /// The selection was full; nothing changed.
    Rejected,
}

/// Ordered set of up to [`MAX_SELECTION`] distinct product ids.
///
/// Deserializing from a list replays each id through [`add`](Self::add), so
/// duplicates and ids beyond the cap are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ComparisonSelection {
    ids: Vec<String>,
}

impl Default for ComparisonSelection {
    fn default() -> Self {
        Self::from_ids(["maybank", "cimb", "public-bank"])
    }
}

impl ComparisonSelection {
    pub fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::empty();
        for id in ids {
            selection.add(id);
        }
        selection
    }

    pub fn add(&mut self, id: impl Into<String>) -> SelectionChange {
        let id = id.into();
        if self.contains(&id) {
            return SelectionChange::AlreadySelected;
        }
        if self.is_full() {
            tracing::debug!(%id, "selection full, ignoring add");
            return SelectionChange::Rejected;
        }
        self.ids.push(id);
        SelectionChange::Added
    }

    pub fn remove(&mut self, id: &str) -> SelectionChange {
        match self.ids.iter().position(|s| s == id) {
            Some(pos) => {
                self.ids.remove(pos);
                SelectionChange::Removed
            }
            None => SelectionChange::NotSelected,
        }
    }

    /// Remove if selected, otherwise add if there is room.
    pub fn toggle(&mut self, id: &str) -> SelectionChange {
        if self.contains(id) {
            self.remove(id)
        } else {
            self.add(id)
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_SELECTION
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for ComparisonSelection {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<ComparisonSelection> for Vec<String> {
    fn from(selection: ComparisonSelection) -> Self {
        selection.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourth_add_is_rejected() {
        let mut s = ComparisonSelection::default();
        let before = s.clone();
        assert_eq!(s.add("rhb"), SelectionChange::Rejected);
        assert_eq!(s, before);
    }

    #[test]
    fn test_remove_then_add() {
        let mut s = ComparisonSelection::default();
        assert_eq!(s.remove("cimb"), SelectionChange::Removed);
        assert_eq!(s.add("rhb"), SelectionChange::Added);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec!["maybank", "public-bank", "rhb"]);
    }

    #[test]
    fn test_toggle_mirrors_button() {
        let mut s = ComparisonSelection::empty();
        assert_eq!(s.toggle("maybank"), SelectionChange::Added);
        assert_eq!(s.toggle("maybank"), SelectionChange::Removed);
        assert!(s.is_empty());
    }

    #[test]
    fn test_duplicates_ignored() {
        let mut s = ComparisonSelection::empty();
        s.add("cimb");
        assert_eq!(s.add("cimb"), SelectionChange::AlreadySelected);
        assert_eq!(s.len(), 1);
        assert_eq!(s.remove("rhb"), SelectionChange::NotSelected);
    }

    #[test]
    fn test_deserialize_enforces_cap() {
        let s: ComparisonSelection =
            serde_json::from_str(r#"["rhb", "rhb", "cimb", "maybank", "public-bank"]"#).unwrap();
        assert_eq!(s.iter().collect::<Vec<_>>(), vec!["rhb", "cimb", "maybank"]);
    }
}
