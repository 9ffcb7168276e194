// models.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A participant who purchased one or more tickets in a raffle.
///
/// Field names mirror the backend's JSON exactly; the wire format mixes
/// camelCase with the snake_case `ticket_numbers` key, so that rename stays
/// explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub buyer_number: u32,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    pub tickets: u32,
    #[serde(rename = "ticket_numbers")]
    pub ticket_numbers: Vec<u32>,
    pub purchase_date: NaiveDate,
    pub payment_received: bool,
}

impl Buyer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raffle {
    pub id: String,
    pub name: String,
    pub prize: String,
    pub ticket_cost: f64,
    pub draw_date: NaiveDate,
    #[serde(default)]
    pub drawn: bool,
    #[serde(default)]
    pub winner: Option<String>,
}

/// One individually numbered entry, flattened out of a buyer's
/// `ticket_numbers`. Derived per draw session, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Zero-padded 6-digit display form, e.g. "000123".
    pub number: String,
    pub owner_name: String,
    pub buyer_number: u32,
}

impl Ticket {
    pub fn pad(number: u32) -> String {
        format!("{number:06}")
    }
}

/// Success body of `POST /api/draw/{raffleId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DrawResult {
    pub winner: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_deserializes_backend_field_names() {
        let json = r#"{
            "buyerNumber": 4,
            "name": "Jane",
            "surname": "Doe",
            "email": "jane@example.com",
            "tickets": 2,
            "ticket_numbers": [100123, 100456],
            "purchaseDate": "2025-03-14",
            "paymentReceived": true
        }"#;

        let buyer: Buyer = serde_json::from_str(json).unwrap();
        assert_eq!(buyer.buyer_number, 4);
        assert_eq!(buyer.mobile, None);
        assert_eq!(buyer.ticket_numbers, vec![100123, 100456]);
        assert!(buyer.payment_received);
        assert_eq!(buyer.full_name(), "Jane Doe");
    }

    #[test]
    fn raffle_defaults_drawn_and_winner() {
        let json = r#"{
            "id": "7",
            "name": "Spring Raffle",
            "prize": "Weekend getaway",
            "ticketCost": 50.0,
            "drawDate": "2025-04-01"
        }"#;

        let raffle: Raffle = serde_json::from_str(json).unwrap();
        assert!(!raffle.drawn);
        assert_eq!(raffle.winner, None);
    }

    #[test]
    fn ticket_numbers_are_zero_padded_to_six_digits() {
        assert_eq!(Ticket::pad(123), "000123");
        assert_eq!(Ticket::pad(999999), "999999");
    }
}
