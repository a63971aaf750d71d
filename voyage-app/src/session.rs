use chrono::NaiveDate;
use uuid::Uuid;
use voyage_calendar::{CalendarState, DayCell};
use voyage_client::FlightsApi;
use voyage_core::dates::parse_iso_date;
use voyage_core::search::check_return_date;
use voyage_core::{CoreResult, Flight, SearchParams, SortKey};
use voyage_results::{enrich_flights, filter_and_sort, EnrichmentSource, FilterSpec, RandomSource, ResultSummary};

use crate::date_picker::{DatePicker, DateTarget};
use crate::error::AppError;
use crate::reservation::ReservationDialog;

/// Everything the search page shows: form, calendar dialog, filters,
/// results and the reservation dialog.
///
/// Results are kept raw (enriched, unfiltered); the displayed list is
/// recomputed from them and the current filters on every read.
pub struct SearchSession {
    params: SearchParams,
    filters: FilterSpec,
    picker: DatePicker,
    results: Option<Vec<Flight>>,
    loading: bool,
    has_searched: bool,
    error_message: Option<String>,
    reservation: Option<ReservationDialog>,
    enrichment: Box<dyn EnrichmentSource + Send>,
}

impl SearchSession {
    pub fn new(filters: FilterSpec) -> Self {
        Self {
            params: SearchParams::default(),
            filters,
            picker: DatePicker::Closed,
            results: None,
            loading: false,
            has_searched: false,
            error_message: None,
            reservation: None,
            enrichment: Box::new(RandomSource::from_entropy()),
        }
    }

    /// Swaps the source of placeholder values used by the enricher.
    pub fn with_enrichment_source(mut self, source: Box<dyn EnrichmentSource + Send>) -> Self {
        self.enrichment = source;
        self
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.params.origin = origin.into();
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.params.destination = destination.into();
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.params.sort = sort;
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSpec {
        &mut self.filters
    }

    pub fn apply_filters(&mut self, filters: FilterSpec) {
        self.filters = filters;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // Calendar dialog

    pub fn date_picker(&self) -> &DatePicker {
        &self.picker
    }

    /// Opens the calendar on the date already stored for `target`, or today.
    pub fn open_calendar(&mut self, target: DateTarget, today: NaiveDate) {
        let stored = match target {
            DateTarget::Departure => &self.params.departure_date,
            DateTarget::Return => &self.params.return_date,
        };
        let initial = parse_iso_date(stored).ok();
        self.picker = DatePicker::open(target, initial, today);
    }

    pub fn calendar_mut(&mut self) -> Option<&mut CalendarState> {
        self.picker.calendar_mut()
    }

    pub fn cancel_calendar(&mut self) {
        self.picker = DatePicker::Closed;
    }

    /// Commits a clicked day to the field the dialog was opened for.
    ///
    /// The dialog closes either way. A rejected return date leaves the stored
    /// value untouched and raises the message banner. Blank cells and a
    /// closed dialog are ignored.
    pub fn select_day(&mut self, cell: DayCell) -> CoreResult<()> {
        let Some(date) = cell.date() else {
            return Ok(());
        };
        let Some((target, mut calendar)) = self.picker.take() else {
            return Ok(());
        };
        let Some(iso) = calendar.select(cell) else {
            return Ok(());
        };

        match target {
            DateTarget::Departure => {
                self.params.departure_date = iso;
                Ok(())
            }
            DateTarget::Return => {
                let departure = parse_iso_date(&self.params.departure_date).ok();
                match check_return_date(departure, date) {
                    Ok(()) => {
                        self.params.return_date = iso;
                        Ok(())
                    }
                    Err(err) => {
                        tracing::debug!("Return date {} rejected: {}", iso, err);
                        self.error_message = Some(err.to_string());
                        Err(err)
                    }
                }
            }
        }
    }

    // Search

    /// Validates the form, fetches and enriches results.
    ///
    /// A failed fetch still counts as a search: the result list becomes empty
    /// and a retry message is shown.
    pub async fn submit_search(&mut self, api: &dyn FlightsApi) -> Result<usize, AppError> {
        if let Err(err) = self.params.validate() {
            let err = AppError::Validation(err);
            self.error_message = Some(err.user_message());
            return Err(err);
        }

        self.loading = true;
        self.error_message = None;
        tracing::info!("Searching flights {}", self.params.summary());
        let outcome = api.search_flights(&self.params).await;
        self.loading = false;
        self.has_searched = true;

        match outcome {
            Ok(raw) => {
                let flights = enrich_flights(raw, &mut *self.enrichment);
                let count = flights.len();
                self.results = Some(flights);
                Ok(count)
            }
            Err(err) => {
                let err = AppError::Search(err);
                self.results = Some(Vec::new());
                self.error_message = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Every flight of the last search, enriched but unfiltered.
    pub fn results(&self) -> &[Flight] {
        self.results.as_deref().unwrap_or(&[])
    }

    /// The list to render: current filters and sort applied to the results.
    pub fn displayed_flights(&self) -> Vec<&Flight> {
        filter_and_sort(self.results(), &self.filters, self.params.sort)
    }

    pub fn result_summary(&self) -> ResultSummary {
        ResultSummary::from_flights(self.displayed_flights())
    }

    pub fn search_summary(&self) -> String {
        self.params.summary()
    }

    pub fn flight_details(&self, flight_id: Uuid) -> Option<&Flight> {
        self.results().iter().find(|f| f.id == flight_id)
    }

    /// Back to the search form; results are discarded.
    pub fn go_back(&mut self) {
        self.has_searched = false;
        self.results = None;
    }

    // Reservation dialog

    pub fn open_reservation(&mut self, flight_id: Uuid) -> &mut ReservationDialog {
        self.reservation.insert(ReservationDialog::new(flight_id))
    }

    pub fn reservation(&self) -> Option<&ReservationDialog> {
        self.reservation.as_ref()
    }

    pub fn reservation_mut(&mut self) -> Option<&mut ReservationDialog> {
        self.reservation.as_mut()
    }

    pub fn close_reservation(&mut self) {
        self.reservation = None;
    }

    pub async fn submit_reservation(&mut self, api: &dyn FlightsApi) -> Result<(), AppError> {
        match self.reservation.as_mut() {
            Some(dialog) => dialog.submit(api).await,
            None => Err(AppError::NoReservationOpen),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(FilterSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voyage_core::CoreError;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pick(session: &mut SearchSession, target: DateTarget, date: NaiveDate) -> CoreResult<()> {
        session.open_calendar(target, ymd(2024, 5, 1));
        session.select_day(DayCell::Day(date))
    }

    #[test]
    fn test_calendar_opens_on_stored_date() {
        let mut session = SearchSession::default();
        session.open_calendar(DateTarget::Departure, ymd(2024, 5, 1));
        assert_eq!(session.date_picker().calendar().unwrap().anchor(), ymd(2024, 5, 1));
        session.cancel_calendar();
        assert!(!session.date_picker().is_open());

        pick(&mut session, DateTarget::Departure, ymd(2024, 8, 12)).unwrap();
        session.open_calendar(DateTarget::Departure, ymd(2024, 5, 1));
        let calendar = session.date_picker().calendar().unwrap();
        assert_eq!(calendar.anchor(), ymd(2024, 8, 12));
        // selection resets to today on every opening
        assert_eq!(calendar.selected(), Some(ymd(2024, 5, 1)));
    }

    #[test]
    fn test_return_before_departure_is_rejected() {
        let mut session = SearchSession::default();
        assert_eq!(
            pick(&mut session, DateTarget::Return, ymd(2024, 6, 3)),
            Err(CoreError::DepartureDateMissing)
        );
        assert_eq!(session.error_message(), Some("Please select departure date first."));
        assert!(!session.date_picker().is_open());

        pick(&mut session, DateTarget::Departure, ymd(2024, 6, 10)).unwrap();
        assert_eq!(
            pick(&mut session, DateTarget::Return, ymd(2024, 6, 10)),
            Err(CoreError::ReturnNotAfterDeparture)
        );
        assert_eq!(session.params().return_date, "");
        assert!(!session.date_picker().is_open());

        pick(&mut session, DateTarget::Return, ymd(2024, 6, 11)).unwrap();
        assert_eq!(session.params().return_date, "2024-06-11");
        assert_eq!(session.params().departure_date, "2024-06-10");
    }

    #[test]
    fn test_blank_cell_keeps_dialog_open() {
        let mut session = SearchSession::default();
        session.open_calendar(DateTarget::Departure, ymd(2024, 5, 1));
        session.select_day(DayCell::Blank).unwrap();
        assert_eq!(session.date_picker().target(), Some(DateTarget::Departure));
    }

    #[test]
    fn test_navigation_through_session() {
        let mut session = SearchSession::default();
        session.open_calendar(DateTarget::Departure, ymd(2024, 1, 31));
        session.calendar_mut().unwrap().next_month();
        assert_eq!(session.date_picker().calendar().unwrap().anchor(), ymd(2024, 2, 1));
    }

    #[test]
    fn test_reservation_dialog_lifecycle() {
        let mut session = SearchSession::default();
        let flight_id = Uuid::new_v4();
        session.open_reservation(flight_id).draft_mut().seats = 3;
        assert_eq!(session.reservation().unwrap().draft().seats, 3);

        // reopening starts from a blank draft
        session.open_reservation(flight_id);
        assert_eq!(session.reservation().unwrap().draft().seats, 1);

        session.close_reservation();
        assert!(session.reservation().is_none());
    }
}
