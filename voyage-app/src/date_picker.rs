use chrono::NaiveDate;
use serde::Serialize;
use voyage_calendar::CalendarState;

/// Which search field the calendar dialog writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTarget {
    Departure,
    Return,
}

/// Closed → Open(target) → Closed
#[derive(Debug, Clone, Default)]
pub enum DatePicker {
    #[default]
    Closed,
    Open {
        target: DateTarget,
        calendar: CalendarState,
    },
}

impl DatePicker {
    /// Opens a fresh calendar; any dialog already open is replaced.
    pub fn open(target: DateTarget, initial: Option<NaiveDate>, today: NaiveDate) -> Self {
        DatePicker::Open {
            target,
            calendar: CalendarState::open(initial, today),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DatePicker::Open { .. })
    }

    pub fn target(&self) -> Option<DateTarget> {
        match self {
            DatePicker::Open { target, .. } => Some(*target),
            DatePicker::Closed => None,
        }
    }

    pub fn calendar(&self) -> Option<&CalendarState> {
        match self {
            DatePicker::Open { calendar, .. } => Some(calendar),
            DatePicker::Closed => None,
        }
    }

    pub fn calendar_mut(&mut self) -> Option<&mut CalendarState> {
        match self {
            DatePicker::Open { calendar, .. } => Some(calendar),
            DatePicker::Closed => None,
        }
    }

    /// Closes the dialog, handing back what was open.
    pub fn take(&mut self) -> Option<(DateTarget, CalendarState)> {
        match std::mem::take(self) {
            DatePicker::Open { target, calendar } => Some((target, calendar)),
            DatePicker::Closed => None,
        }
    }
}
