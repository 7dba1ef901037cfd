//! Contains the trait and implementations for objects that store [users](crate::User).

mod memory;
mod user;

pub use memory::InMemoryUserStore;
pub use user::{UserError, UserStore};
