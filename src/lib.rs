//! # HQ Console
//!
//! Admin console for a franchise network's headquarters: sign in, look at the
//! center dashboard, and manage the HQ clients (centers) table.
//!
//! ## Modules
//!
//! - [`api`]: Wire types, error decoding and the REST client
//! - [`validation`]: Login and new-center form checks
//! - [`table`]: Filter, search and pagination state for the centers table
//! - [`dashboard`]: Dashboard figures and number formatting
//! - [`countries`]: Country filter options
//!
//! With the default `native` feature the crate also carries the HTTP client,
//! configuration, the persisted session and the `hq-console` CLI. The web UI
//! builds against this crate with default features off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hq_console::api::{ConsoleApi, ConsoleClient};
//! use hq_console::config::Config;
//! use hq_console::table::ListState;
//! use hq_console::validation::LoginForm;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ConsoleClient::new(&config.api)?;
//!
//!     let request = LoginForm::new("admin@hq.example", "correct-horse").validate()?;
//!     client.login(&request).await?;
//!
//!     let mut state = ListState::new();
//!     state.set_country("France");
//!     let page = client.filter_centers(&state.query()).await?;
//!
//!     println!("{} of {} centers", page.filtered_counts, page.total_counts);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod countries;
pub mod dashboard;
pub mod table;
pub mod validation;

#[cfg(feature = "native")]
pub mod cli;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod session;

// Re-export top-level types for convenience
pub use api::{
    ApiError, ApiResult, CenterFilter, CenterPage, CenterTableItem, Level, RowsPerPage, User,
};

#[cfg(feature = "native")]
pub use api::{ConsoleApi, ConsoleClient};

pub use countries::{CountryOption, COUNTRIES};
pub use dashboard::{DashboardHeader, DashboardSummary};
pub use table::{ListController, ListState};
pub use validation::{FieldError, FormErrors, LoginForm, NewCenterForm};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};
#[cfg(feature = "native")]
pub use session::{Session, SessionError, SessionStore};
