pub mod app_config;
pub mod error;
pub mod flight_api;

pub use error::{ApiErrorBody, ClientError, extract_error_message};
pub use flight_api::{FlightsApi, HttpFlightsApi};
