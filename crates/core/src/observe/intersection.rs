use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use folio_protocol::Rect;
use serde::{Deserialize, Serialize};

use crate::model::Threshold;

/// Host-chosen identifier of an observable page region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub u64);

/// Handle returned by [`IntersectionSource::subscribe`]; pass it to
/// [`IntersectionSource::cancel`] to stop delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionToken(u64);

/// One visibility measurement delivered to a subscriber.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub region: RegionId,
    /// Visible fraction of the region, in `[0, 1]`.
    pub ratio: f64,
    /// Any part of the region is visible.
    pub is_intersecting: bool,
    /// `ratio` is at or above the subscription's threshold.
    pub meets_threshold: bool,
}

pub type IntersectionCallback = Rc<dyn Fn(IntersectionEntry)>;

/// A viewport-intersection primitive: delivers the current intersection ratio
/// of a region whenever it changes, until cancelled.
pub trait IntersectionSource {
    /// Start observing `region`.
    ///
    /// Returns `None` when the region is not attached; nothing is observed and
    /// the callback is dropped.
    fn subscribe(
        &self,
        region: RegionId,
        threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Option<SubscriptionToken>;

    /// Stop delivery for `token`. Returns `false` if it was not live.
    fn cancel(&self, token: SubscriptionToken) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RegionSource {
    /// Ratio computed from page geometry against the current viewport.
    Bounds(Rect),
    /// Ratio measured by the host (e.g. a browser `IntersectionObserver`).
    Measured(Option<f64>),
}

struct Subscription {
    region: RegionId,
    threshold: Threshold,
    callback: IntersectionCallback,
    last_ratio: Option<f64>,
}

#[derive(Default)]
struct ObserverState {
    regions: HashMap<RegionId, RegionSource>,
    subscriptions: BTreeMap<SubscriptionToken, Subscription>,
    viewport: Option<Rect>,
    next_token: u64,
}

impl ObserverState {
    // Non-finite geometry has no ratio.
    fn ratio(&self, region: RegionId) -> Option<f64> {
        let ratio = match self.regions.get(&region)? {
            RegionSource::Bounds(bounds) => bounds.intersection_ratio(&self.viewport?),
            RegionSource::Measured(ratio) => (*ratio)?,
        };
        ratio.is_finite().then_some(ratio)
    }
}

/// Deterministic, single-threaded [`IntersectionSource`].
///
/// Regions are either attached with page bounds and measured against the
/// viewport set by [`set_viewport`], or attached as externally measured and fed
/// through [`deliver`]. Every update flushes: each live subscription whose
/// region's ratio differs from the last one it saw gets one callback, in
/// subscription order. A fresh subscription receives the current ratio on the
/// next flush.
///
/// Callbacks run with no internal borrow held, so they may subscribe or cancel
/// (including cancelling subscriptions later in the same flush, which then do
/// not fire).
///
/// [`set_viewport`]: ScrollObserver::set_viewport
/// [`deliver`]: ScrollObserver::deliver
#[derive(Default)]
pub struct ScrollObserver {
    state: RefCell<ObserverState>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach or move a geometry-measured region. Takes effect on the next flush.
    pub fn attach(&self, region: RegionId, bounds: Rect) {
        self.state
            .borrow_mut()
            .regions
            .insert(region, RegionSource::Bounds(bounds));
    }

    /// Attach a region whose ratio the host reports through [`deliver`].
    ///
    /// [`deliver`]: ScrollObserver::deliver
    pub fn attach_measured(&self, region: RegionId) {
        self.state
            .borrow_mut()
            .regions
            .entry(region)
            .or_insert(RegionSource::Measured(None));
    }

    /// Detach a region. Subscriptions on it stay registered but receive
    /// nothing until it is attached again.
    pub fn detach(&self, region: RegionId) -> bool {
        self.state.borrow_mut().regions.remove(&region).is_some()
    }

    pub fn is_attached(&self, region: RegionId) -> bool {
        self.state.borrow().regions.contains_key(&region)
    }

    /// Move the viewport (scroll or resize) and flush.
    pub fn set_viewport(&self, viewport: Rect) {
        self.state.borrow_mut().viewport = Some(viewport);
        self.flush();
    }

    /// Report a host-measured ratio for `region` and flush.
    ///
    /// Ignored for regions that are not attached as measured, and for
    /// non-finite ratios.
    pub fn deliver(&self, region: RegionId, ratio: f64) {
        if !ratio.is_finite() {
            tracing::trace!(region = region.0, ratio, "non-finite ratio ignored");
            return;
        }
        {
            let mut state = self.state.borrow_mut();
            match state.regions.get_mut(&region) {
                Some(RegionSource::Measured(slot)) => *slot = Some(ratio.clamp(0.0, 1.0)),
                _ => {
                    tracing::trace!(region = region.0, "delivery for unattached region ignored");
                    return;
                }
            }
        }
        self.flush();
    }

    /// Current ratio of a region, if it can be measured.
    pub fn ratio(&self, region: RegionId) -> Option<f64> {
        self.state.borrow().ratio(region)
    }

    pub fn subscription_count(&self) -> usize {
        self.state.borrow().subscriptions.len()
    }

    /// Deliver pending ratio changes.
    pub fn flush(&self) {
        let pending: Vec<(SubscriptionToken, IntersectionCallback, IntersectionEntry)> = {
            let mut state = self.state.borrow_mut();
            let ratios: HashMap<RegionId, f64> = state
                .subscriptions
                .values()
                .filter_map(|sub| Some((sub.region, state.ratio(sub.region)?)))
                .collect();
            state
                .subscriptions
                .iter_mut()
                .filter_map(|(token, sub)| {
                    let ratio = *ratios.get(&sub.region)?;
                    if sub.last_ratio == Some(ratio) {
                        return None;
                    }
                    sub.last_ratio = Some(ratio);
                    let entry = IntersectionEntry {
                        region: sub.region,
                        ratio,
                        is_intersecting: ratio > 0.0,
                        meets_threshold: sub.threshold.is_met_by(ratio),
                    };
                    Some((*token, Rc::clone(&sub.callback), entry))
                })
                .collect()
        };

        for (token, callback, entry) in pending {
            let live = self.state.borrow().subscriptions.contains_key(&token);
            if live {
                callback(entry);
            }
        }
    }
}

impl IntersectionSource for ScrollObserver {
    fn subscribe(
        &self,
        region: RegionId,
        threshold: Threshold,
        callback: IntersectionCallback,
    ) -> Option<SubscriptionToken> {
        let mut state = self.state.borrow_mut();
        if !state.regions.contains_key(&region) {
            return None;
        }
        let token = SubscriptionToken(state.next_token);
        state.next_token += 1;
        state.subscriptions.insert(
            token,
            Subscription {
                region,
                threshold,
                callback,
                last_ratio: None,
            },
        );
        Some(token)
    }

    fn cancel(&self, token: SubscriptionToken) -> bool {
        self.state.borrow_mut().subscriptions.remove(&token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(v: f64) -> Threshold {
        Threshold::new(v).expect("threshold in (0, 1]")
    }

    fn recorder() -> (Rc<RefCell<Vec<IntersectionEntry>>>, IntersectionCallback) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let callback: IntersectionCallback = Rc::new(move |entry| sink.borrow_mut().push(entry));
        (seen, callback)
    }

    #[test]
    fn unattached_region_is_not_observed() {
        let observer = ScrollObserver::new();
        let (_, callback) = recorder();
        assert!(observer.subscribe(RegionId(9), threshold(0.5), callback).is_none());
        assert_eq!(observer.subscription_count(), 0);
    }

    #[test]
    fn delivers_only_on_change() {
        let observer = ScrollObserver::new();
        observer.attach(RegionId(0), Rect::new(0.0, 600.0, 100.0, 400.0));
        let (seen, callback) = recorder();
        observer.subscribe(RegionId(0), threshold(0.5), callback);

        observer.set_viewport(Rect::new(0.0, 0.0, 100.0, 600.0));
        observer.set_viewport(Rect::new(0.0, 0.0, 100.0, 600.0));
        observer.set_viewport(Rect::new(0.0, 400.0, 100.0, 600.0));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].ratio, 0.0);
        assert!(!seen[0].is_intersecting);
        assert!((seen[1].ratio - 1.0).abs() < 1e-9);
        assert!(seen[1].meets_threshold);
    }

    #[test]
    fn cancel_stops_delivery() {
        let observer = ScrollObserver::new();
        observer.attach_measured(RegionId(1));
        let (seen, callback) = recorder();
        let token = observer.subscribe(RegionId(1), threshold(0.2), callback);
        observer.deliver(RegionId(1), 0.3);
        assert!(token.is_some_and(|t| observer.cancel(t)));
        observer.deliver(RegionId(1), 0.9);
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(observer.subscription_count(), 0);
    }

    #[test]
    fn delivery_ignored_for_geometry_regions() {
        let observer = ScrollObserver::new();
        observer.attach(RegionId(2), Rect::new(0.0, 0.0, 10.0, 10.0));
        observer.deliver(RegionId(2), 1.0);
        // No viewport yet, so the geometry region has no ratio.
        assert_eq!(observer.ratio(RegionId(2)), None);
    }

    #[test]
    fn callback_may_cancel_a_later_subscription() {
        let observer = Rc::new(ScrollObserver::new());
        observer.attach_measured(RegionId(0));
        let (late_seen, late_cb) = recorder();

        let slot: Rc<RefCell<Option<SubscriptionToken>>> = Rc::new(RefCell::new(None));
        let canceller: IntersectionCallback = {
            let observer = Rc::clone(&observer);
            let slot = Rc::clone(&slot);
            Rc::new(move |_| {
                if let Some(token) = slot.borrow_mut().take() {
                    observer.cancel(token);
                }
            })
        };
        observer.subscribe(RegionId(0), threshold(0.1), canceller);
        let late = observer.subscribe(RegionId(0), threshold(0.1), late_cb);
        *slot.borrow_mut() = late;

        observer.deliver(RegionId(0), 0.5);
        assert!(late_seen.borrow().is_empty());
    }

    #[test]
    fn non_finite_ratios_are_dropped() {
        let observer = ScrollObserver::new();
        observer.attach_measured(RegionId(4));
        let (seen, callback) = recorder();
        observer.subscribe(RegionId(4), threshold(0.5), callback);

        observer.deliver(RegionId(4), 0.7);
        observer.deliver(RegionId(4), f64::NAN);
        observer.deliver(RegionId(4), f64::INFINITY);
        observer.flush();
        observer.flush();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].ratio, 0.7);
        assert_eq!(observer.ratio(RegionId(4)), Some(0.7));
    }

    #[test]
    fn nan_geometry_has_no_ratio() {
        let observer = ScrollObserver::new();
        observer.attach(RegionId(5), Rect::new(0.0, f64::NAN, 100.0, f64::NAN));
        let (seen, callback) = recorder();
        observer.subscribe(RegionId(5), threshold(0.5), callback);
        observer.set_viewport(Rect::new(0.0, 0.0, 100.0, 600.0));
        observer.flush();
        assert!(seen.borrow().is_empty());
        assert_eq!(observer.ratio(RegionId(5)), None);
    }

    #[test]
    fn detached_region_goes_quiet() {
        let observer = ScrollObserver::new();
        observer.attach_measured(RegionId(3));
        let (seen, callback) = recorder();
        observer.subscribe(RegionId(3), threshold(0.5), callback);
        observer.deliver(RegionId(3), 0.7);
        assert!(observer.detach(RegionId(3)));
        observer.deliver(RegionId(3), 0.1);
        observer.flush();
        assert_eq!(seen.borrow().len(), 1);
        assert!(!observer.is_attached(RegionId(3)));
    }
}
