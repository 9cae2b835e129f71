//! Portfolio core: content model, active-section tracking, category filters
//! and view transforms producing render commands.

pub mod content;
pub mod model;
pub mod observe;
pub mod reveal;
pub mod svg;
pub mod views;
