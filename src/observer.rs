#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
type SlotMap = HashMap<usize, u64>;
#[cfg(not(feature = "std"))]
type SlotMap = BTreeMap<usize, u64>;

/// Proof that an index is currently observed by the host's visibility
/// primitive.
///
/// Registration is explicit on both ends: [`ObservationRegistry::register`]
/// hands one out when an index enters the rendered set, and the host gives it
/// back via [`crate::WindowEngine::release_item`] when the index leaves. A
/// handle that is never released shows up as a leaked `Registration` in code
/// review instead of a silently dangling observer.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "an unreleased Registration keeps its index observed"]
pub struct Registration {
    index: usize,
    token: u64,
}

impl Registration {
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Index → observation-handle arena for the currently rendered set.
///
/// Only rendered items are ever registered; registering every item of a
/// 10,000-item list would defeat the windowing. Tokens guard against stale
/// releases: releasing a handle from a previous generation of the same index
/// is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ObservationRegistry {
    slots: SlotMap,
    next_token: u64,
}

impl ObservationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_observed(&self, index: usize) -> bool {
        self.slots.contains_key(&index)
    }

    /// Registers `index`. Returns `None` if it is already observed — the
    /// existing handle stays valid and no duplicate observation is created.
    pub fn register(&mut self, index: usize) -> Option<Registration> {
        if self.slots.contains_key(&index) {
            wtrace!(index, "duplicate observation rejected");
            return None;
        }
        let token = self.next_token;
        self.next_token = self.next_token.wrapping_add(1);
        self.slots.insert(index, token);
        Some(Registration { index, token })
    }

    /// Releases a handle. Returns `false` for a stale handle (the index was
    /// already released, or re-registered since) — a silent no-op, not an
    /// error.
    pub fn release(&mut self, registration: Registration) -> bool {
        match self.slots.get(&registration.index) {
            Some(&token) if token == registration.token => {
                self.slots.remove(&registration.index);
                true
            }
            _ => {
                wtrace!(index = registration.index, "stale release ignored");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
