use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use folio_protocol::SharedStr;

use super::section::SectionId;

#[derive(Debug, Default)]
struct StoreCell {
    active_section: RefCell<Option<SectionId>>,
    writes: Cell<u64>,
}

/// Page-lifetime UI state shared between section trackers and navigation.
///
/// Clones are handles onto the same cell. Writes are unconditional overwrites
/// with no history. The handle is `!Send`: all writers run on the one UI
/// event queue.
#[derive(Debug, Clone, Default)]
pub struct UiStore {
    inner: Rc<StoreCell>,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the active section.
    pub fn set_active_section(&self, id: impl Into<SectionId>) {
        let id = id.into();
        tracing::debug!(section = %id, "active section");
        *self.inner.active_section.borrow_mut() = Some(id);
        self.inner.writes.set(self.inner.writes.get() + 1);
    }

    /// The section that most recently crossed its visibility threshold.
    pub fn active_section(&self) -> Option<SectionId> {
        self.inner.active_section.borrow().clone()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.inner
            .active_section
            .borrow()
            .as_ref()
            .is_some_and(|active| active == id)
    }

    /// Number of writes so far, including writes of an unchanged value.
    ///
    /// Readers compare it against the last value they saw to decide whether
    /// to redraw.
    pub fn writes(&self) -> u64 {
        self.inner.writes.get()
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore(Rc::downgrade(&self.inner))
    }
}

/// Non-owning store reference held by writers that must not keep the store
/// alive.
#[derive(Debug, Clone, Default)]
pub struct WeakStore(Weak<StoreCell>);

impl WeakStore {
    pub fn upgrade(&self) -> Option<UiStore> {
        self.0.upgrade().map(|inner| UiStore { inner })
    }

    /// Write through to the store if it still exists. Returns whether it did.
    pub fn set_active_section(&self, id: SharedStr) -> bool {
        match self.upgrade() {
            Some(store) => {
                store.set_active_section(id);
                true
            }
            None => false,
        }
    }
}
