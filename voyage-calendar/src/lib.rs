pub mod grid;
pub mod state;

pub use grid::{DayCell, month_grid, shift_month};
pub use state::CalendarState;
