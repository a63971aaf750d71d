use voyage_client::ClientError;
use voyage_core::CoreError;

pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred while searching. Please try again.";
pub const RESERVATION_FAILED_MESSAGE: &str = "Reservation failed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] CoreError),
    #[error("flight search failed: {0}")]
    Search(#[source] ClientError),
    #[error("reservation failed: {0}")]
    Reservation(#[source] ClientError),
    #[error("no reservation dialog is open")]
    NoReservationOpen,
}

impl AppError {
    /// Text for the message banner. Transport details are logged, not shown.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Search(err) => {
                tracing::warn!("Flight search failed: {}", err);
                SEARCH_FAILED_MESSAGE.to_string()
            }
            AppError::Reservation(err) => match err.server_message() {
                Some(message) => message.to_string(),
                None => {
                    tracing::error!("Reservation failed: {}", err);
                    RESERVATION_FAILED_MESSAGE.to_string()
                }
            },
            AppError::NoReservationOpen => self.to_string(),
        }
    }
}
