//! State Management
//!
//! Global application state: signed-in user, toasts and loading flag.

pub mod global;

pub use global::{provide_global_state, use_global_state, GlobalState, ToastKind};
