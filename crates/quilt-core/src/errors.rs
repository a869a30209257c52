//! Error types for Quilt adapters and collaborators.

use thiserror::Error;

/// Errors raised while materializing or laying out an adapter's views.
///
/// Both variants are programming errors on the caller's side; they are
/// reported instead of ignored so that integration tests catch them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    #[error("component {component} cannot update view of type {view}")]
    UnsupportedComponent {
        component: &'static str,
        view: &'static str,
    },

    #[error("adapter declares {expected} slots but was given {found} components")]
    SlotCountMismatch { expected: usize, found: usize },
}

/// Errors reported by an image loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageLoadError {
    #[error("no image at {url}")]
    NotFound { url: String },

    #[error("failed to decode image at {url}: {reason}")]
    Decode { url: String, reason: String },
}
