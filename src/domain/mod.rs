// Normalized shapes built from directory responses

pub mod catalog;
pub mod group;

pub use catalog::GroupCatalog;
pub use group::{truncate, GroupRecord};
