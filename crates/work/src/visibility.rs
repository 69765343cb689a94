//! Per-item "show sub-tasks" flags.

use std::collections::HashMap;
use std::hash::Hash;

/// Transient visibility flags keyed by entity id.
///
/// Not persisted. Owners must call [`Visibility::forget`] when an entity is
/// deleted so stale keys do not pile up.
#[derive(Debug, Clone)]
pub struct Visibility<K> {
    flags: HashMap<K, bool>,
}

impl<K: Eq + Hash + Copy> Visibility<K> {
    /// No flags set.
    pub fn new() -> Self {
        Self { flags: HashMap::new() }
    }

    /// Flip the flag for `id`, returning the new value.
    pub fn toggle(&mut self, id: K) -> bool {
        let flag = self.flags.entry(id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Whether `id` is shown. Unknown ids are hidden.
    pub fn is_visible(&self, id: K) -> bool {
        self.flags.get(&id).copied().unwrap_or(false)
    }

    /// Drop the flag for `id`.
    pub fn forget(&mut self, id: K) {
        self.flags.remove(&id);
    }

    /// Number of tracked ids.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether no ids are tracked.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl<K: Eq + Hash + Copy> Default for Visibility<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_forget() {
        let mut v = Visibility::new();
        assert!(!v.is_visible(7u32));
        assert!(v.toggle(7));
        assert!(v.is_visible(7));
        assert!(!v.toggle(7));
        assert_eq!(v.len(), 1);

        v.forget(7);
        assert!(v.is_empty());
    }
}
