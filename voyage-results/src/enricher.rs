use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voyage_core::dates::clock_from_timestamp;
use voyage_core::Flight;

/// Carriers used when the API does not name one.
pub const DEFAULT_CARRIERS: [&str; 3] = ["Air France", "Ryanair", "EasyJet"];

pub const DEFAULT_OFFERS_LABEL: &str = "Multiple";

const BAGGAGE_PROBABILITY: f64 = 0.5;
const DIRECT_PROBABILITY: f64 = 0.7;

/// Supplies placeholder values for fields the flights API leaves out.
pub trait EnrichmentSource {
    /// An index in `0..len`.
    fn pick(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// Default source backed by `rand`.
pub struct RandomSource<R: Rng = StdRng> {
    rng: R,
}

impl RandomSource<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> EnrichmentSource for RandomSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Deterministic source: always picks `index` (capped to the range) and
/// answers every coin flip with `flag`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSource {
    pub index: usize,
    pub flag: bool,
}

impl EnrichmentSource for FixedSource {
    fn pick(&mut self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }

    fn chance(&mut self, _p: f64) -> bool {
        self.flag
    }
}

/// Fills in the cosmetic fields of one flight. Present values are never
/// touched, so enriching twice is a no-op.
pub fn enrich_flight<S: EnrichmentSource + ?Sized>(mut flight: Flight, source: &mut S) -> Flight {
    if flight.carrier.is_none() {
        let carrier = DEFAULT_CARRIERS[source.pick(DEFAULT_CARRIERS.len())];
        flight.carrier = Some(carrier.to_string());
    }
    if flight.departure_clock.is_none() {
        flight.departure_clock = clock_from_timestamp(&flight.departs_at);
    }
    if flight.arrival_clock.is_none() {
        flight.arrival_clock = clock_from_timestamp(&flight.arrives_at);
    }
    if flight.offers.is_none() {
        flight.offers = Some(DEFAULT_OFFERS_LABEL.to_string());
    }
    if flight.stop_count.is_none() {
        flight.stop_count = Some(source.pick(3) as i32);
    }
    if flight.baggage_included.is_none() {
        flight.baggage_included = Some(source.chance(BAGGAGE_PROBABILITY));
    }
    if flight.direct.is_none() {
        flight.direct = Some(source.chance(DIRECT_PROBABILITY));
    }
    flight
}

pub fn enrich_flights<S: EnrichmentSource + ?Sized>(flights: Vec<Flight>, source: &mut S) -> Vec<Flight> {
    let enriched: Vec<Flight> = flights
        .into_iter()
        .map(|flight| enrich_flight(flight, &mut *source))
        .collect();
    tracing::debug!("Enriched {} flights", enriched.len());
    enriched
}
