pub mod date_picker;
pub mod error;
pub mod reservation;
pub mod session;

pub use date_picker::{DatePicker, DateTarget};
pub use error::AppError;
pub use reservation::ReservationDialog;
pub use session::SearchSession;
