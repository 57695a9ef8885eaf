pub mod events;
pub mod health;
pub mod layout;
pub mod plans;
