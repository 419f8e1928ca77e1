//! Ordered set of keyframe ids selected for editing.

use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<KeyframeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(id: KeyframeId) -> Self {
        Self { ids: vec![id] }
    }

    /// Single-select replaces the selection with `id`; multi-select toggles it.
    pub fn select(&mut self, id: KeyframeId, multi_select: bool) {
        if !multi_select {
            self.ids.clear();
            self.ids.push(id);
        } else if self.contains(id) {
            self.remove(id);
        } else {
            self.ids.push(id);
        }
    }

    /// Returns whether `id` was selected.
    pub fn remove(&mut self, id: KeyframeId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|s| *s != id);
        before != self.ids.len()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[inline]
    pub fn contains(&self, id: KeyframeId) -> bool {
        self.ids.contains(&id)
    }

    #[inline]
    pub fn ids(&self) -> &[KeyframeId] {
        &self.ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
