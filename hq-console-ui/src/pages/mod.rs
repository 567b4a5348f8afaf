//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod hq_clients;
pub mod login;

pub use dashboard::Dashboard;
pub use hq_clients::HqClients;
pub use login::LoginPage;
