use uuid::Uuid;
use voyage_client::FlightsApi;
use voyage_core::{ReservationConfirmation, ReservationDraft};

use crate::error::AppError;

/// State of the booking dialog for one flight. Dropped when the dialog closes.
#[derive(Debug, Clone)]
pub struct ReservationDialog {
    draft: ReservationDraft,
    confirmation: Option<ReservationConfirmation>,
    error: Option<String>,
}

impl ReservationDialog {
    pub fn new(flight_id: Uuid) -> Self {
        Self {
            draft: ReservationDraft::new(flight_id),
            confirmation: None,
            error: None,
        }
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReservationDraft {
        &mut self.draft
    }

    pub fn confirmation(&self) -> Option<&ReservationConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmation.is_some()
    }

    /// Sends the draft once it is complete. Nothing is sent otherwise.
    pub async fn submit(&mut self, api: &dyn FlightsApi) -> Result<(), AppError> {
        if let Err(err) = self.draft.validate() {
            return Err(self.fail(err.into()));
        }

        tracing::info!("Booking {} seat(s) on flight {}", self.draft.seats, self.draft.flight_id);
        match api.reserve(&self.draft).await {
            Ok(confirmation) => {
                self.confirmation = Some(confirmation);
                self.error = None;
                Ok(())
            }
            Err(err) => Err(self.fail(AppError::Reservation(err))),
        }
    }

    fn fail(&mut self, err: AppError) -> AppError {
        self.error = Some(err.user_message());
        err
    }
}
