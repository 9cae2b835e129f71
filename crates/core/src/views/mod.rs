pub mod card;
pub mod layout;
pub mod nav;
pub mod page;
pub mod section;

pub use card::{render_project_card, render_skill_tile};
pub use layout::{ChipLayout, NAV_HEIGHT, PageLayout, SectionLayout, grid_columns, layout_section};
pub use nav::render_nav;
pub use page::{render_page, render_static};
pub use section::render_section;
