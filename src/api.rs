// api.rs
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::config::Config;
use crate::error::DrawError;
use crate::models::{Buyer, DrawResult, Raffle};

/// The slice of the backend the draw protocol actually touches. This is the
/// trust boundary: the authority re-derives the eligible pool server-side and
/// the client never transmits its own.
#[allow(async_fn_in_trait)]
pub trait RaffleApi {
    async fn fetch_raffle(&self, raffle_id: &str) -> Result<Raffle, DrawError>;
    async fn fetch_buyers(&self, raffle_id: &str) -> Result<Vec<Buyer>, DrawError>;
    async fn draw_winner(&self, raffle_id: &str) -> Result<DrawResult, DrawError>;
}

pub struct HttpRaffleApi {
    client: Client,
    base_url: String,
}

impl HttpRaffleApi {
    pub fn new(config: &Config) -> Result<Self, DrawError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_base.clone(),
        })
    }
}

impl RaffleApi for HttpRaffleApi {
    async fn fetch_raffle(&self, raffle_id: &str) -> Result<Raffle, DrawError> {
        let url = format!("{}/api/raffles/{raffle_id}", self.base_url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(authority_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn fetch_buyers(&self, raffle_id: &str) -> Result<Vec<Buyer>, DrawError> {
        let url = format!("{}/api/buyers/{raffle_id}", self.base_url);
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(authority_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// The sole mutating call in the protocol. No body: the authority works
    /// from its own view of the raffle's buyers.
    async fn draw_winner(&self, raffle_id: &str) -> Result<DrawResult, DrawError> {
        let url = format!("{}/api/draw/{raffle_id}", self.base_url);
        let response = self.client.post(url).send().await?;
        if !response.status().is_success() {
            return Err(authority_error(response).await);
        }
        Ok(response.json().await?)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Failure bodies are `{"error": "..."}`; pass the message through verbatim,
/// falling back to the status code when the body isn't parseable.
async fn authority_error(response: Response) -> DrawError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => DrawError::Authority(body.error),
        Err(_) => DrawError::Authority(format!("draw authority returned {status}")),
    }
}
