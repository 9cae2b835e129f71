pub mod catalog;
pub mod commands;
pub mod shared_str;
pub mod theme;
pub mod types;

pub use catalog::{Catalog, Classification, DisplayMetadata, FilterValue, Item, ItemId};
pub use commands::{HitTarget, RenderCommand, TextAlign, TextWeight};
pub use shared_str::SharedStr;
pub use theme::ThemeToken;
pub use types::{Point, Rect, Viewport};
