//! HQ API
//!
//! Wire types, error decoding and (with the `native` feature) the reqwest
//! client for the externally owned HQ REST API.
//!
//! ## Endpoints
//!
//! - `POST /auth/login`, `GET /auth/logout`, `GET /users/me`
//! - `POST /clients`, `GET /clients`, `GET /clients/filter`
//! - `POST /centers`, `GET /centers/filter`

pub mod dto;
pub mod error;

#[cfg(feature = "native")]
mod client;

pub use dto::{
    Address, CenterFilter, CenterPage, CenterTableItem, Client, ClientFilter, ClientPage,
    ClientTableItem, Envelope, GenericResponse, Level, LoginRequest, NewCenterInput,
    NewClientInput, RowsPerPage, User,
};
pub use error::{ApiError, ApiResult, ErrorBody};

#[cfg(feature = "native")]
pub use client::ConsoleClient;

/// Operations the console performs against the HQ API
#[cfg(feature = "native")]
#[async_trait::async_trait]
pub trait ConsoleApi: Send + Sync {
    /// Sign in. On success the client holds the session cookies.
    async fn login(&self, request: &LoginRequest) -> ApiResult<GenericResponse>;

    async fn logout(&self) -> ApiResult<()>;

    /// The signed-in user
    async fn me(&self) -> ApiResult<User>;

    async fn add_client(&self, input: &NewClientInput) -> ApiResult<GenericResponse>;

    /// Every client, unpaginated
    async fn get_clients(&self) -> ApiResult<Vec<Client>>;

    async fn filter_clients(&self, filter: &ClientFilter) -> ApiResult<ClientPage>;

    async fn add_center(&self, input: &NewCenterInput) -> ApiResult<GenericResponse>;

    /// One page of the HQ clients (centers) table
    async fn filter_centers(&self, filter: &CenterFilter) -> ApiResult<CenterPage>;
}
