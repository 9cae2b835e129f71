pub mod intersection;
pub mod tracker;

pub use intersection::{
    IntersectionCallback, IntersectionEntry, IntersectionSource, RegionId, ScrollObserver,
    SubscriptionToken,
};
pub use tracker::SectionVisibilityTracker;
