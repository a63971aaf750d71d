use serde::{Deserialize, Serialize};
use uuid::Uuid;
use std::fmt;
use std::str::FromStr;

use crate::dates::parse_clock_to_minutes;

/// A flight option as returned by the flights API.
///
/// The optional fields are cosmetic: the backend does not always send them and
/// the enricher fills them in after a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    #[serde(rename = "villeDepart")]
    pub origin: String,
    #[serde(rename = "villeArrivee")]
    pub destination: String,
    #[serde(rename = "dateDepart")]
    pub departs_at: String,
    #[serde(rename = "dateArrivee")]
    pub arrives_at: String,
    #[serde(rename = "prix")]
    pub price: f64,
    /// Total trip duration in minutes
    #[serde(rename = "tempsTrajet")]
    pub duration_minutes: u32,
    #[serde(rename = "escales", default, skip_serializing_if = "Option::is_none")]
    pub stop_count: Option<i32>,
    #[serde(rename = "compagnie", default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(rename = "heureDepart", default, skip_serializing_if = "Option::is_none")]
    pub departure_clock: Option<String>,
    #[serde(rename = "heureArrivee", default, skip_serializing_if = "Option::is_none")]
    pub arrival_clock: Option<String>,
    #[serde(rename = "bagages", default, skip_serializing_if = "Option::is_none")]
    pub baggage_included: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct: Option<bool>,
    #[serde(rename = "offres", default, skip_serializing_if = "Option::is_none")]
    pub offers: Option<String>,
    #[serde(rename = "placesDisponibles", default, skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<i32>,
    #[serde(rename = "capaciteMaximale", default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

impl Flight {
    /// Bare record with only the fields the backend always sends.
    pub fn new(
        id: Uuid,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departs_at: impl Into<String>,
        arrives_at: impl Into<String>,
        price: f64,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id,
            origin: origin.into(),
            destination: destination.into(),
            departs_at: departs_at.into(),
            arrives_at: arrives_at.into(),
            price,
            duration_minutes,
            stop_count: None,
            carrier: None,
            departure_clock: None,
            arrival_clock: None,
            baggage_included: None,
            direct: None,
            offers: None,
            seats_available: None,
            capacity: None,
        }
    }

    /// Stop category used by the sidebar filter.
    ///
    /// An explicit `direct` flag wins over the stop count; missing, zero and
    /// negative counts all fall back to direct.
    pub fn stop_category(&self) -> StopCategory {
        if self.direct == Some(true) {
            return StopCategory::Direct;
        }
        match self.stop_count {
            None | Some(0) => StopCategory::Direct,
            Some(1) => StopCategory::OneStop,
            Some(n) if n >= 2 => StopCategory::MultiStop,
            Some(_) => StopCategory::Direct,
        }
    }

    /// Departure time as minutes since midnight, 0 when unknown.
    pub fn departure_minutes(&self) -> u32 {
        self.departure_clock
            .as_deref()
            .map(parse_clock_to_minutes)
            .unwrap_or(0)
    }
}

/// Stop-count bucket shown in the filter sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StopCategory {
    #[serde(rename = "direct")]
    Direct,
    #[serde(rename = "1")]
    OneStop,
    #[serde(rename = "2+")]
    MultiStop,
}

impl StopCategory {
    pub const ALL: [StopCategory; 3] = [Self::Direct, Self::OneStop, Self::MultiStop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::OneStop => "1",
            Self::MultiStop => "2+",
        }
    }
}

impl fmt::Display for StopCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StopCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direct" => Ok(Self::Direct),
            "1" => Ok(Self::OneStop),
            "2+" => Ok(Self::MultiStop),
            other => Err(format!("unknown stop category: {}", other)),
        }
    }
}
