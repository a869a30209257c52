//! Core types for the Quilt view toolkit.
//!
//! This crate provides the foundational types used across the other quilt crates:
//! - Geometry (`Size`, `Rect`, `EdgeInsets`) and `Color`
//! - The retained `View` trait that adapters lay out
//! - Error types
//!
//! Everything here is single-threaded: views are shared through
//! `Rc<RefCell<..>>` handles and are therefore `!Send`.

pub mod errors;
pub mod types;
pub mod view;

pub use errors::*;
pub use types::*;
pub use view::*;
