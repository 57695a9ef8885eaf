pub mod event;
pub mod layout;
pub mod plan;
pub mod section;
pub mod summary;
