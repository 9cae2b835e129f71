use std::cell::Cell;
use std::rc::Rc;

use super::intersection::{
    IntersectionCallback, IntersectionEntry, IntersectionSource, RegionId, SubscriptionToken,
};
use crate::model::{SectionId, Threshold, UiStore, WeakStore};

#[derive(Debug, Default)]
struct TrackerState {
    live: Cell<bool>,
    above: Cell<bool>,
    reports: Cell<u64>,
}

struct ActiveSubscription {
    source: Rc<dyn IntersectionSource>,
    token: SubscriptionToken,
}

/// Reports a section as active each time its visible fraction rises to the
/// threshold.
///
/// Observation starts at [`mount`] and ends at [`unmount`] or drop, after
/// which no delivery reaches the store. A section mounted without an attached
/// region observes nothing and never reports.
///
/// [`mount`]: SectionVisibilityTracker::mount
/// [`unmount`]: SectionVisibilityTracker::unmount
pub struct SectionVisibilityTracker {
    section: SectionId,
    subscription: Option<ActiveSubscription>,
    state: Rc<TrackerState>,
}

impl SectionVisibilityTracker {
    pub fn mount(
        section: impl Into<SectionId>,
        threshold: Threshold,
        region: Option<RegionId>,
        source: Rc<dyn IntersectionSource>,
        store: &UiStore,
    ) -> Self {
        let section = section.into();
        let state = Rc::new(TrackerState::default());

        let callback: IntersectionCallback = {
            let state = Rc::clone(&state);
            let store = store.downgrade();
            let section = section.clone();
            Rc::new(move |entry| report(&state, &store, &section, entry))
        };

        let subscription = region.and_then(|region| {
            let token = source.subscribe(region, threshold, callback)?;
            Some(ActiveSubscription { source, token })
        });
        state.live.set(subscription.is_some());

        if subscription.is_some() {
            tracing::debug!(section = %section, threshold = threshold.get(), "tracker mounted");
        } else {
            tracing::debug!(section = %section, "tracker mounted without a region; not observing");
        }

        Self {
            section,
            subscription,
            state,
        }
    }

    pub fn section(&self) -> &SectionId {
        &self.section
    }

    pub fn is_observing(&self) -> bool {
        self.state.live.get()
    }

    /// Number of times this tracker wrote to the store.
    pub fn reports(&self) -> u64 {
        self.state.reports.get()
    }

    /// Stop observing. Equivalent to dropping the tracker.
    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.state.live.set(false);
        if let Some(ActiveSubscription { source, token }) = self.subscription.take() {
            source.cancel(token);
            tracing::debug!(section = %self.section, "tracker unmounted");
        }
    }
}

impl Drop for SectionVisibilityTracker {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for SectionVisibilityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionVisibilityTracker")
            .field("section", &self.section)
            .field("observing", &self.is_observing())
            .field("reports", &self.reports())
            .finish()
    }
}

// Fires on the below -> at-or-above edge only; dropping below re-arms.
fn report(state: &TrackerState, store: &WeakStore, section: &SectionId, entry: IntersectionEntry) {
    if !state.live.get() {
        return;
    }
    let was_above = state.above.replace(entry.meets_threshold);
    if entry.meets_threshold && !was_above && store.set_active_section(section.clone()) {
        state.reports.set(state.reports.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::ScrollObserver;
    use folio_protocol::Rect;

    fn threshold(v: f64) -> Threshold {
        Threshold::new(v).expect("threshold in (0, 1]")
    }

    fn measured(regions: &[u64]) -> Rc<ScrollObserver> {
        let observer = Rc::new(ScrollObserver::new());
        for r in regions {
            observer.attach_measured(RegionId(*r));
        }
        observer
    }

    #[test]
    fn reports_once_per_crossing() {
        let observer = measured(&[0]);
        let store = UiStore::new();
        let tracker = SectionVisibilityTracker::mount(
            "skills",
            threshold(0.5),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );

        observer.deliver(RegionId(0), 0.2);
        assert_eq!(store.active_section(), None);
        observer.deliver(RegionId(0), 0.6);
        observer.deliver(RegionId(0), 0.8);
        observer.deliver(RegionId(0), 1.0);
        assert_eq!(tracker.reports(), 1);
        assert_eq!(store.active_section().as_deref(), Some("skills"));

        // Leave and come back: fires again.
        observer.deliver(RegionId(0), 0.1);
        observer.deliver(RegionId(0), 0.5);
        assert_eq!(tracker.reports(), 2);
        assert_eq!(store.writes(), 2);
    }

    #[test]
    fn nan_delivery_does_not_double_report() {
        let observer = measured(&[0]);
        let store = UiStore::new();
        let tracker = SectionVisibilityTracker::mount(
            "skills",
            threshold(0.5),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );
        observer.deliver(RegionId(0), 0.9);
        observer.deliver(RegionId(0), f64::NAN);
        observer.flush();
        observer.deliver(RegionId(0), 0.9);
        assert_eq!(tracker.reports(), 1);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn initially_visible_section_reports_on_first_delivery() {
        let observer = Rc::new(ScrollObserver::new());
        observer.attach(RegionId(0), Rect::new(0.0, 0.0, 800.0, 400.0));
        let store = UiStore::new();
        let _tracker = SectionVisibilityTracker::mount(
            "projects",
            threshold(0.2),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );
        observer.set_viewport(Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(store.active_section().as_deref(), Some("projects"));
    }

    #[test]
    fn no_region_is_a_silent_no_op() {
        let observer = measured(&[0]);
        let store = UiStore::new();
        let tracker =
            SectionVisibilityTracker::mount("about", threshold(0.5), None, observer.clone(), &store);
        assert!(!tracker.is_observing());
        observer.deliver(RegionId(0), 1.0);
        assert_eq!(store.active_section(), None);
        assert_eq!(observer.subscription_count(), 0);
    }

    #[test]
    fn unattached_region_is_a_silent_no_op() {
        let observer = measured(&[]);
        let store = UiStore::new();
        let tracker = SectionVisibilityTracker::mount(
            "about",
            threshold(0.5),
            Some(RegionId(4)),
            observer.clone(),
            &store,
        );
        assert!(!tracker.is_observing());
    }

    #[test]
    fn teardown_stops_reporting() {
        let observer = measured(&[0]);
        let store = UiStore::new();
        let tracker = SectionVisibilityTracker::mount(
            "projects",
            threshold(0.2),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );
        tracker.unmount();
        assert_eq!(observer.subscription_count(), 0);
        observer.deliver(RegionId(0), 1.0);
        assert_eq!(store.active_section(), None);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn dropped_store_is_never_written() {
        let observer = measured(&[0]);
        let store = UiStore::new();
        let tracker = SectionVisibilityTracker::mount(
            "projects",
            threshold(0.2),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );
        drop(store);
        observer.deliver(RegionId(0), 1.0);
        assert_eq!(tracker.reports(), 0);
        assert!(tracker.is_observing());
    }

    #[test]
    fn last_write_wins_between_sections() {
        let observer = measured(&[0, 1]);
        let store = UiStore::new();
        let _skills = SectionVisibilityTracker::mount(
            "skills",
            threshold(0.5),
            Some(RegionId(0)),
            observer.clone(),
            &store,
        );
        let _projects = SectionVisibilityTracker::mount(
            "projects",
            threshold(0.2),
            Some(RegionId(1)),
            observer.clone(),
            &store,
        );
        observer.deliver(RegionId(1), 0.3);
        observer.deliver(RegionId(0), 0.6);
        assert_eq!(store.active_section().as_deref(), Some("skills"));
    }
}
