// error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("no buyers registered for this raffle")]
    NoBuyers,

    #[error("no paid tickets available for draw")]
    NoPaidTickets,

    #[error(
        "buyer #{buyer_number} declares {declared} tickets but holds {actual} ticket numbers"
    )]
    TicketCountMismatch {
        buyer_number: u32,
        declared: u32,
        actual: usize,
    },

    #[error("a draw is already in flight")]
    DrawInFlight,

    /// Non-2xx from the backend; carries the server's `error` message
    /// verbatim when the body had one.
    #[error("{0}")]
    Authority(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
