use std::collections::BTreeSet;

use crate::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Registered, still showing the placeholder.
    Pending,
    /// Real source swapped in.
    Revealed,
    /// Real source failed to load; the placeholder is shown again.
    Broken,
}

/// Fire-once visibility watcher for card images.
///
/// Each registered image is revealed the first time it becomes visible and
/// is then no longer watched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LazyImages {
    watched: BTreeSet<ItemId>,
    revealed: BTreeSet<ItemId>,
    broken: BTreeSet<ItemId>,
}

impl LazyImages {
    /// Replaces every watched image with `ids`.
    pub fn register(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.watched = ids.into_iter().collect();
        self.revealed.clear();
        self.broken.clear();
    }

    /// Reveals the watched images among `visible` and stops watching them.
    /// Returns the ids revealed by this call.
    pub fn reveal(&mut self, visible: &[ItemId]) -> Vec<ItemId> {
        let mut newly = Vec::new();
        for id in visible {
            if self.watched.remove(id) {
                self.revealed.insert(*id);
                newly.push(*id);
            }
        }
        newly
    }

    /// Returns `false` when the image was never revealed or is already broken.
    pub fn mark_broken(&mut self, id: ItemId) -> bool {
        self.revealed.contains(&id) && self.broken.insert(id)
    }

    pub fn status(&self, id: ItemId) -> Option<ImageStatus> {
        if self.broken.contains(&id) {
            Some(ImageStatus::Broken)
        } else if self.revealed.contains(&id) {
            Some(ImageStatus::Revealed)
        } else if self.watched.contains(&id) {
            Some(ImageStatus::Pending)
        } else {
            None
        }
    }

    pub fn watched_count(&self) -> usize {
        self.watched.len()
    }
}
