use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
}

/// Body of `POST /reservations`, edited in the reservation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    #[serde(rename = "volId")]
    pub flight_id: Uuid,
    #[serde(rename = "passager")]
    pub passenger: Passenger,
    #[serde(rename = "nombrePlaces")]
    pub seats: u32,
}

impl ReservationDraft {
    /// Blank draft for one seat on `flight_id`.
    pub fn new(flight_id: Uuid) -> Self {
        Self {
            flight_id,
            passenger: Passenger::default(),
            seats: 1,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.flight_id.is_nil()
            && !self.passenger.last_name.trim().is_empty()
            && !self.passenger.first_name.trim().is_empty()
            && !self.passenger.email.trim().is_empty()
            && self.seats > 0
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(CoreError::IncompleteReservation)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedPassenger {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
    #[serde(rename = "nomComplet", default)]
    pub full_name: Option<String>,
}

impl BookedPassenger {
    /// `First Last`, as the backend computes it when it leaves `nomComplet` out.
    pub fn display_name(&self) -> String {
        self.full_name
            .clone()
            .unwrap_or_else(|| format!("{} {}", self.first_name, self.last_name))
    }
}

/// Successful answer of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationConfirmation {
    #[serde(rename = "numeroReservation")]
    pub reservation_number: Uuid,
    #[serde(rename = "volId")]
    pub flight_id: Uuid,
    #[serde(rename = "passager")]
    pub passenger: BookedPassenger,
    #[serde(rename = "nombrePlaces")]
    pub seats: u32,
    #[serde(rename = "dateReservation", default)]
    pub reserved_at: Option<String>,
}
