//! Route handlers organized by resource

pub mod catalog;
pub mod favorites;
pub mod health;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;
