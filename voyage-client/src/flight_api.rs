use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use voyage_core::{Flight, ReservationConfirmation, ReservationDraft, SearchParams};

use crate::app_config::ApiConfig;
use crate::error::{extract_error_message, ClientError};

/// Remote flights/reservations API
#[async_trait]
pub trait FlightsApi: Send + Sync {
    /// `GET /vols`
    async fn search_flights(&self, params: &SearchParams) -> Result<Vec<Flight>, ClientError>;

    /// `POST /reservations`
    async fn reserve(&self, draft: &ReservationDraft) -> Result<ReservationConfirmation, ClientError>;
}

pub struct HttpFlightsApi {
    client: Client,
    base_url: String,
}

impl HttpFlightsApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Turns a non-2xx answer into `ClientError::Rejected`.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("API answered {}: {}", status, body);
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message: extract_error_message(&body),
    })
}

#[async_trait]
impl FlightsApi for HttpFlightsApi {
    async fn search_flights(&self, params: &SearchParams) -> Result<Vec<Flight>, ClientError> {
        let url = self.url("vols");
        tracing::debug!("GET {} {:?}", url, params.query_pairs());

        let response = self
            .client
            .get(&url)
            .query(&params.query_pairs())
            .send()
            .await?;
        let flights = check_status(response).await?.json::<Vec<Flight>>().await?;

        tracing::info!("Received {} flights for {}", flights.len(), params.summary());
        Ok(flights)
    }

    async fn reserve(&self, draft: &ReservationDraft) -> Result<ReservationConfirmation, ClientError> {
        let url = self.url("reservations");
        tracing::debug!("POST {} for flight {}", url, draft.flight_id);

        let response = self.client.post(&url).json(draft).send().await?;
        let confirmation = check_status(response)
            .await?
            .json::<ReservationConfirmation>()
            .await?;

        tracing::info!(
            "Reservation {} confirmed for flight {}",
            confirmation.reservation_number,
            confirmation.flight_id
        );
        Ok(confirmation)
    }
}
