use chrono::NaiveDate;
use serde::Serialize;
use voyage_core::dates::to_iso_date;

use crate::grid::{self, DayCell};

/// Month view backing the date-picker dialog.
///
/// The anchor (month on display) and the selection move independently:
/// paging through months never changes the selection.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarState {
    anchor: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    cells: Vec<DayCell>,
}

impl CalendarState {
    /// Opens on `initial` (or today when absent) with today preselected.
    pub fn open(initial: Option<NaiveDate>, today: NaiveDate) -> Self {
        let anchor = initial.unwrap_or(today);
        Self {
            anchor,
            selected: Some(today),
            today,
            cells: grid::month_grid(anchor),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn month_label(&self) -> String {
        grid::month_label(self.anchor)
    }

    pub fn prev_month(&mut self) {
        self.set_anchor(grid::shift_month(self.anchor, -1));
    }

    pub fn next_month(&mut self) {
        self.set_anchor(grid::shift_month(self.anchor, 1));
    }

    fn set_anchor(&mut self, anchor: NaiveDate) {
        self.anchor = anchor;
        self.cells = grid::month_grid(anchor);
    }

    /// Selects a cell and returns its ISO date. Blank cells are ignored.
    pub fn select(&mut self, cell: DayCell) -> Option<String> {
        let date = cell.date()?;
        self.selected = Some(date);
        Some(to_iso_date(date))
    }

    pub fn is_today(&self, cell: DayCell) -> bool {
        cell.date() == Some(self.today)
    }

    pub fn is_selected(&self, cell: DayCell) -> bool {
        match (cell.date(), self.selected) {
            (Some(day), Some(selected)) => day == selected,
            _ => false,
        }
    }
}
