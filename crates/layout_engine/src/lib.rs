//! Layout Engine - Transcript pagination
//!
//! This crate turns a list of role-tagged chat messages into positioned text
//! lines on fixed-size pages, drawing through the `DrawingSurface` trait.

mod body;
mod config;
mod cursor;
mod error;
mod export;
mod message;
mod paginator;
mod surface;

#[cfg(test)]
mod test_surface;

pub use body::*;
pub use config::*;
pub use cursor::*;
pub use error::*;
pub use export::*;
pub use message::*;
pub use paginator::*;
pub use surface::*;
