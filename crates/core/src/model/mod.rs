pub mod filter;
pub mod section;
pub mod site;
pub mod store;

pub use filter::{CategoryFilterList, available_classifications, derive};
pub use section::{CardStyle, FilterControls, InvalidThreshold, SectionId, SectionSpec, Threshold};
pub use site::Site;
pub use store::{UiStore, WeakStore};
