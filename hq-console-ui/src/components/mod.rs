//! UI Components
//!
//! Reusable Leptos components for the console.

pub mod center_modal;
pub mod guard;
pub mod loading;
pub mod nav;
pub mod pagination;
pub mod toast;

pub use center_modal::NewCenterModal;
pub use guard::RequireAuth;
pub use loading::{InlineLoading, Loading};
pub use nav::Nav;
pub use pagination::TablePagination;
pub use toast::Toast;
