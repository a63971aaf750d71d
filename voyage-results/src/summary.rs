use serde::Serialize;
use voyage_core::Flight;

/// Figures shown above the result list. Every field is 0 when nothing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ResultSummary {
    pub count: usize,
    pub lowest_price: f64,
    pub highest_price: f64,
    /// Price of the first flight with the shortest duration
    pub fastest_price: f64,
    pub shortest_duration: u32,
}

impl ResultSummary {
    pub fn from_flights<'a, I>(flights: I) -> Self
    where
        I: IntoIterator<Item = &'a Flight>,
    {
        let mut iter = flights.into_iter();
        let Some(first) = iter.next() else {
            return Self::default();
        };

        let mut summary = Self {
            count: 1,
            lowest_price: first.price,
            highest_price: first.price,
            fastest_price: first.price,
            shortest_duration: first.duration_minutes,
        };
        for flight in iter {
            summary.count += 1;
            summary.lowest_price = summary.lowest_price.min(flight.price);
            summary.highest_price = summary.highest_price.max(flight.price);
            if flight.duration_minutes < summary.shortest_duration {
                summary.shortest_duration = flight.duration_minutes;
                summary.fastest_price = flight.price;
            }
        }
        summary
    }
}
