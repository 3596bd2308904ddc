//! Panels drawn by [`super::ui`]

pub mod analysis;
pub mod resource_table;
