use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use voyage_core::dates::LAST_MINUTE_OF_DAY;
use voyage_core::{Flight, SortKey, StopCategory};

/// Shortest journey the duration slider allows (1h).
pub const DURATION_FLOOR: u32 = 60;
/// Longest journey the duration slider allows (22h).
pub const DURATION_CEILING: u32 = 1320;

/// Inclusive `[min, max]` range of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteWindow {
    pub min: u32,
    pub max: u32,
}

impl MinuteWindow {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && minutes <= self.max
    }
}

/// Current filter sidebar selection.
///
/// Deserialized selections go through the same clamping as the sidebar
/// mutators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredSelection")]
pub struct FilterSpec {
    pub stop_categories: BTreeSet<StopCategory>,
    /// Departure time, minutes since midnight
    pub departure_window: MinuteWindow,
    /// Journey duration in minutes
    pub duration_window: MinuteWindow,
}

/// Wire shape of a saved [`FilterSpec`], before clamping.
#[derive(Deserialize)]
struct StoredSelection {
    stop_categories: BTreeSet<StopCategory>,
    departure_window: MinuteWindow,
    duration_window: MinuteWindow,
}

impl From<StoredSelection> for FilterSpec {
    fn from(stored: StoredSelection) -> Self {
        let mut spec = FilterSpec {
            stop_categories: stored.stop_categories,
            ..FilterSpec::default()
        };
        spec.set_departure_max(stored.departure_window.max);
        spec.set_departure_min(stored.departure_window.min);
        spec.set_duration_max(stored.duration_window.max);
        spec.set_duration_min(stored.duration_window.min);
        spec
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            stop_categories: StopCategory::ALL.into_iter().collect(),
            departure_window: MinuteWindow::new(0, LAST_MINUTE_OF_DAY),
            duration_window: MinuteWindow::new(DURATION_FLOOR, DURATION_CEILING),
        }
    }
}

impl FilterSpec {
    /// Default selection with a custom duration range, clamped to the slider.
    pub fn with_duration_bounds(min: u32, max: u32) -> Self {
        let mut spec = Self::default();
        spec.set_duration_max(max);
        spec.set_duration_min(min);
        spec
    }

    pub fn set_stop_category(&mut self, category: StopCategory, enabled: bool) {
        if enabled {
            self.stop_categories.insert(category);
        } else {
            self.stop_categories.remove(&category);
        }
    }

    pub fn set_departure_min(&mut self, minutes: u32) {
        let window = &mut self.departure_window;
        window.min = minutes.min(LAST_MINUTE_OF_DAY).min(window.max);
    }

    pub fn set_departure_max(&mut self, minutes: u32) {
        let window = &mut self.departure_window;
        window.max = minutes.min(LAST_MINUTE_OF_DAY).max(window.min);
    }

    pub fn set_duration_min(&mut self, minutes: u32) {
        let window = &mut self.duration_window;
        window.min = minutes.clamp(DURATION_FLOOR, DURATION_CEILING).min(window.max);
    }

    pub fn set_duration_max(&mut self, minutes: u32) {
        let window = &mut self.duration_window;
        window.max = minutes.clamp(DURATION_FLOOR, DURATION_CEILING).max(window.min);
    }

    /// Stop category, departure time and duration must all match.
    pub fn matches(&self, flight: &Flight) -> bool {
        self.stop_categories.contains(&flight.stop_category())
            && self.departure_window.contains(flight.departure_minutes())
            && self.duration_window.contains(flight.duration_minutes)
    }
}

/// Stable ascending sort on the given key.
pub fn sort_flights(flights: &mut [&Flight], key: SortKey) {
    match key {
        SortKey::Price => flights.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Duration => flights.sort_by_key(|f| f.duration_minutes),
    }
}

/// The list the results page shows: matching flights, optionally sorted,
/// otherwise in API order.
pub fn filter_and_sort<'a>(
    flights: &'a [Flight],
    spec: &FilterSpec,
    sort: Option<SortKey>,
) -> Vec<&'a Flight> {
    let mut shown: Vec<&Flight> = flights.iter().filter(|f| spec.matches(f)).collect();
    if let Some(key) = sort {
        sort_flights(&mut shown, key);
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn flight(duration: u32, price: f64, stops: i32) -> Flight {
        let mut f = Flight::new(
            Uuid::new_v4(),
            "Paris",
            "Marseille",
            "2024-05-01T10:00:00",
            "2024-05-01T12:00:00",
            price,
            duration,
        );
        f.stop_count = Some(stops);
        f.direct = Some(false);
        f.departure_clock = Some("10:00".to_string());
        f
    }

    #[test]
    fn test_worked_example() {
        let a = flight(90, 200.0, 0);
        let b = flight(300, 150.0, 1);
        let flights = vec![a.clone(), b.clone()];

        let mut spec = FilterSpec::default();
        spec.stop_categories = [StopCategory::Direct].into_iter().collect();
        let shown = filter_and_sort(&flights, &spec, None);
        assert_eq!(shown, vec![&a]);

        let by_price = filter_and_sort(&flights, &FilterSpec::default(), Some(SortKey::Price));
        assert_eq!(by_price, vec![&b, &a]);
    }

    #[test]
    fn test_each_axis_excludes_on_its_own() {
        let spec = FilterSpec::default();

        let mut wrong_stop = flight(120, 80.0, 2);
        let mut only_direct = spec.clone();
        only_direct.set_stop_category(StopCategory::MultiStop, false);
        assert!(!only_direct.matches(&wrong_stop));
        wrong_stop.stop_count = Some(0);
        assert!(only_direct.matches(&wrong_stop));

        let mut too_early = flight(120, 80.0, 0);
        let mut mornings_off = spec.clone();
        mornings_off.set_departure_min(12 * 60);
        assert!(!mornings_off.matches(&too_early));
        too_early.departure_clock = Some("14:30".to_string());
        assert!(mornings_off.matches(&too_early));

        let mut too_long = flight(1400, 80.0, 0);
        assert!(!spec.matches(&too_long));
        too_long.duration_minutes = 600;
        assert!(spec.matches(&too_long));
    }

    #[test]
    fn test_missing_clock_counts_as_midnight() {
        let mut f = flight(120, 80.0, 0);
        f.departure_clock = None;
        let mut spec = FilterSpec::default();
        assert!(spec.matches(&f));
        spec.set_departure_min(1);
        assert!(!spec.matches(&f));
    }

    #[test]
    fn test_oversized_clock_does_not_abort_filtering() {
        let mut f = flight(120, 80.0, 0);
        f.departure_clock = Some("99999999:00".to_string());
        let flights = vec![f.clone()];
        assert_eq!(filter_and_sort(&flights, &FilterSpec::default(), None), vec![&f]);
    }

    #[test]
    fn test_empty_category_set_matches_nothing() {
        let mut spec = FilterSpec::default();
        for category in StopCategory::ALL {
            spec.set_stop_category(category, false);
        }
        let flights = vec![flight(90, 10.0, 0), flight(90, 10.0, 1)];
        assert!(filter_and_sort(&flights, &spec, None).is_empty());
    }

    #[test]
    fn test_sorts_are_stable() {
        let first = flight(200, 100.0, 0);
        let second = flight(100, 100.0, 0);
        let third = flight(100, 50.0, 0);
        let flights = vec![first.clone(), second.clone(), third.clone()];
        let spec = FilterSpec::default();

        let by_price = filter_and_sort(&flights, &spec, Some(SortKey::Price));
        assert_eq!(by_price, vec![&third, &first, &second]);

        let by_duration = filter_and_sort(&flights, &spec, Some(SortKey::Duration));
        assert_eq!(by_duration, vec![&second, &third, &first]);

        let unsorted = filter_and_sort(&flights, &spec, None);
        assert_eq!(unsorted, vec![&first, &second, &third]);
    }

    #[test]
    fn test_slider_bounds_are_clamped() {
        let mut spec = FilterSpec::default();
        spec.set_duration_min(10);
        assert_eq!(spec.duration_window.min, DURATION_FLOOR);
        spec.set_duration_max(5000);
        assert_eq!(spec.duration_window.max, DURATION_CEILING);

        spec.set_duration_max(300);
        spec.set_duration_min(400);
        assert_eq!(spec.duration_window, MinuteWindow::new(300, 300));

        spec.set_departure_max(2000);
        assert_eq!(spec.departure_window.max, LAST_MINUTE_OF_DAY);

        let custom = FilterSpec::with_duration_bounds(180, 600);
        assert_eq!(custom.duration_window, MinuteWindow::new(180, 600));
    }

    #[test]
    fn test_filter_spec_from_sidebar_json() {
        let json = r#"
            {
                "stop_categories": ["direct", "2+"],
                "departure_window": {"min": 360, "max": 720},
                "duration_window": {"min": 60, "max": 1320}
            }
        "#;
        let spec: FilterSpec = serde_json::from_str(json).expect("Failed to deserialize");
        assert!(spec.stop_categories.contains(&StopCategory::MultiStop));
        assert!(!spec.stop_categories.contains(&StopCategory::OneStop));
        assert!(spec.departure_window.contains(720));
        assert!(!spec.departure_window.contains(721));
    }

    #[test]
    fn test_stored_selection_is_clamped() {
        let json = r#"
            {
                "stop_categories": ["1"],
                "departure_window": {"min": 900, "max": 5000},
                "duration_window": {"min": 10, "max": 40}
            }
        "#;
        let spec: FilterSpec = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(spec.departure_window, MinuteWindow::new(900, LAST_MINUTE_OF_DAY));
        assert_eq!(spec.duration_window, MinuteWindow::new(DURATION_FLOOR, DURATION_FLOOR));

        let inverted = r#"
            {
                "stop_categories": [],
                "departure_window": {"min": 800, "max": 600},
                "duration_window": {"min": 60, "max": 1320}
            }
        "#;
        let spec: FilterSpec = serde_json::from_str(inverted).expect("Failed to deserialize");
        assert_eq!(spec.departure_window, MinuteWindow::new(600, 600));
    }
}
