//! Selection of snapshot rows
//!
//! A selection is held as a set of provider `Id`s rather than row indices,
//! so it stays attached to the same resources when a snapshot is re-fetched
//! or re-ordered. [`derive_selected_subset`] is the positional form used when
//! marks arrive as a vector parallel to the snapshot.

use crate::records::Resource;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors deriving a selected subset
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The mark vector is not parallel to the snapshot
    #[error("selection has {marks} marks for {rows} snapshot rows")]
    LengthMismatch { rows: usize, marks: usize },
}

/// Return the rows whose mark is true, in snapshot order.
///
/// `marks` must have exactly one entry per row. An empty snapshot with an
/// empty mark vector yields an empty subset.
pub fn derive_selected_subset<R: Clone>(
    snapshot: &[R],
    marks: &[bool],
) -> Result<Vec<R>, SelectionError> {
    if snapshot.len() != marks.len() {
        return Err(SelectionError::LengthMismatch {
            rows: snapshot.len(),
            marks: marks.len(),
        });
    }

    Ok(snapshot
        .iter()
        .zip(marks)
        .filter(|(_, &marked)| marked)
        .map(|(row, _)| row.clone())
        .collect())
}

/// Set of selected resource ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from explicit ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Flip the mark for `id`. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn select(&mut self, id: &str) {
        self.ids.insert(id.to_string());
    }

    /// Mark every row of the snapshot
    pub fn select_all<R: Resource>(&mut self, snapshot: &[R]) {
        self.ids.extend(snapshot.iter().map(|r| r.id().to_string()));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Mark vector parallel to `snapshot`
    pub fn marks<R: Resource>(&self, snapshot: &[R]) -> Vec<bool> {
        snapshot.iter().map(|r| self.contains(r.id())).collect()
    }

    /// Selected rows of `snapshot`, in snapshot order
    pub fn subset<R: Resource + Clone>(&self, snapshot: &[R]) -> Vec<R> {
        snapshot
            .iter()
            .filter(|r| self.contains(r.id()))
            .cloned()
            .collect()
    }

    /// Ids in the selection that `snapshot` does not contain
    pub fn missing_from<R: Resource>(&self, snapshot: &[R]) -> Vec<String> {
        self.ids
            .iter()
            .filter(|id| !snapshot.iter().any(|r| r.id() == id.as_str()))
            .cloned()
            .collect()
    }

    /// Drop ids that are no longer present in `snapshot`. Returns how many
    /// were dropped.
    pub fn retain_present<R: Resource>(&mut self, snapshot: &[R]) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| snapshot.iter().any(|r| r.id() == id.as_str()));
        before - self.ids.len()
    }
}
