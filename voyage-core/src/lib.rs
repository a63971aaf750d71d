pub mod airports;
pub mod dates;
pub mod flight;
pub mod search;
pub mod reservation;

pub use airports::airport_code;
pub use flight::{Flight, StopCategory};
pub use reservation::{BookedPassenger, Passenger, ReservationConfirmation, ReservationDraft};
pub use search::{SearchParams, SortKey};

/// Local validation failures. The `Display` text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Please fill in every field (origin, destination, departure date and return date).")]
    IncompleteSearch,
    #[error("Please select departure date first.")]
    DepartureDateMissing,
    #[error("Return date must be after departure date.")]
    ReturnNotAfterDeparture,
    #[error("Please fill in all fields.")]
    IncompleteReservation,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
