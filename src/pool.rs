// pool.rs
//
// Ticket Pool Builder and Eligibility Filter: everything the draw session
// needs to know about which tickets are actually in the drum.
use crate::error::DrawError;
use crate::models::{Buyer, Ticket};

/// Buyers split by payment status. Only `paid` buyers' tickets are eligible
/// for the draw; `unpaid` exists so the session can tell the operator who is
/// being excluded before anything irreversible happens.
#[derive(Debug, Clone)]
pub struct EligibilitySplit {
    pub paid: Vec<Buyer>,
    pub unpaid: Vec<Buyer>,
}

impl EligibilitySplit {
    pub fn partition(buyers: Vec<Buyer>) -> Self {
        let (paid, unpaid): (Vec<_>, Vec<_>) =
            buyers.into_iter().partition(|b| b.payment_received);
        Self { paid, unpaid }
    }

    pub fn exclusion_report(&self) -> ExclusionReport {
        let unpaid_tickets: u32 = self.unpaid.iter().map(|b| b.tickets).sum();
        let paid_tickets: u32 = self.paid.iter().map(|b| b.tickets).sum();
        ExclusionReport {
            unpaid_buyers: self.unpaid.len(),
            unpaid_tickets,
            total_tickets: paid_tickets + unpaid_tickets,
        }
    }

    /// All buyers regardless of payment status, paid first. Used for winner
    /// lookup, where even a stale/unpaid match is better than none.
    pub fn all(&self) -> impl Iterator<Item = &Buyer> {
        self.paid.iter().chain(self.unpaid.iter())
    }
}

/// What the operator is shown before confirming a draw with unpaid buyers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExclusionReport {
    pub unpaid_buyers: usize,
    pub unpaid_tickets: u32,
    pub total_tickets: u32,
}

/// Flattens each buyer's `ticket_numbers` into individual [`Ticket`] records.
///
/// A buyer whose declared `tickets` count disagrees with the length of
/// `ticket_numbers` is a data-integrity error; the pool is never silently
/// truncated or padded.
pub fn build_ticket_pool(buyers: &[Buyer]) -> Result<Vec<Ticket>, DrawError> {
    let mut pool = Vec::with_capacity(buyers.iter().map(|b| b.ticket_numbers.len()).sum());
    for buyer in buyers {
        if buyer.ticket_numbers.len() != buyer.tickets as usize {
            return Err(DrawError::TicketCountMismatch {
                buyer_number: buyer.buyer_number,
                declared: buyer.tickets,
                actual: buyer.ticket_numbers.len(),
            });
        }
        for &number in &buyer.ticket_numbers {
            pool.push(Ticket {
                number: Ticket::pad(number),
                owner_name: buyer.full_name(),
                buyer_number: buyer.buyer_number,
            });
        }
    }
    Ok(pool)
}

/// Extracts the ticket number from an authority winner string of the form
/// `Winner: Ticket #000123 - Jane Doe`. Returns `None` when the string
/// doesn't carry a parseable number after the `#`.
pub fn parse_winner_ticket(winner: &str) -> Option<u32> {
    winner
        .split('#')
        .nth(1)?
        .split_whitespace()
        .next()?
        .parse()
        .ok()
}

pub fn find_winning_buyer<'a>(
    buyers: impl IntoIterator<Item = &'a Buyer>,
    ticket: u32,
) -> Option<&'a Buyer> {
    buyers
        .into_iter()
        .find(|b| b.ticket_numbers.contains(&ticket))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn buyer(number: u32, tickets: Vec<u32>, paid: bool) -> Buyer {
        Buyer {
            buyer_number: number,
            name: format!("Buyer{number}"),
            surname: "Test".to_string(),
            email: format!("buyer{number}@example.com"),
            mobile: None,
            tickets: tickets.len() as u32,
            ticket_numbers: tickets,
            purchase_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            payment_received: paid,
        }
    }

    #[test]
    fn eligible_pool_counts_only_paid_tickets() {
        let buyers = vec![
            buyer(1, vec![100001, 100002], true),
            buyer(2, vec![100003], false),
            buyer(3, vec![100004, 100005, 100006], true),
        ];
        let split = EligibilitySplit::partition(buyers);
        let pool = build_ticket_pool(&split.paid).unwrap();

        let paid_total: u32 = split.paid.iter().map(|b| b.tickets).sum();
        assert_eq!(pool.len(), paid_total as usize);
        assert!(pool.iter().all(|t| t.number != Ticket::pad(100003)));
    }

    #[test]
    fn exclusion_report_sums_unpaid_buyers_and_tickets() {
        let buyers = vec![
            buyer(1, vec![100001, 100002], true),
            buyer(2, vec![100003], false),
            buyer(3, vec![100004, 100005], false),
        ];
        let split = EligibilitySplit::partition(buyers);
        let report = split.exclusion_report();

        assert_eq!(report.unpaid_buyers, 2);
        assert_eq!(report.unpaid_tickets, 3);
        assert_eq!(report.total_tickets, 5);
    }

    #[test]
    fn ticket_count_mismatch_is_an_error_not_a_truncation() {
        let mut bad = buyer(5, vec![100010, 100011], true);
        bad.tickets = 3;

        let err = build_ticket_pool(&[bad]).unwrap_err();
        match err {
            DrawError::TicketCountMismatch {
                buyer_number,
                declared,
                actual,
            } => {
                assert_eq!(buyer_number, 5);
                assert_eq!(declared, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected TicketCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn pool_tickets_carry_owner_and_padded_number() {
        let pool = build_ticket_pool(&[buyer(7, vec![123], true)]).unwrap();
        assert_eq!(pool[0].number, "000123");
        assert_eq!(pool[0].owner_name, "Buyer7 Test");
        assert_eq!(pool[0].buyer_number, 7);
    }

    #[test]
    fn parses_ticket_number_out_of_winner_string() {
        assert_eq!(
            parse_winner_ticket("Winner: Ticket #000123 - Jane Doe"),
            Some(123)
        );
        assert_eq!(parse_winner_ticket("Winner: Ticket #999999 - X"), Some(999999));
        assert_eq!(parse_winner_ticket("garbage"), None);
        assert_eq!(parse_winner_ticket("Winner: Ticket #abc - X"), None);
    }

    #[test]
    fn finds_the_buyer_owning_a_ticket() {
        let buyers = vec![
            buyer(1, vec![100001], true),
            buyer(2, vec![100002, 100003], true),
        ];
        let hit = find_winning_buyer(&buyers, 100003).unwrap();
        assert_eq!(hit.buyer_number, 2);
        assert!(find_winning_buyer(&buyers, 555555).is_none());
    }
}
