// export.rs
//
// CSV export of a raffle's buyer ledger, matching the admin panel's download
// format: raffle header, revenue summary, then one row per buyer.
use std::fmt::Write;

use crate::models::{Buyer, Raffle, Ticket};

/// Aggregates the admin panel shows alongside the buyer table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaffleStats {
    pub total_buyers: usize,
    pub total_tickets: u32,
    pub paid_buyers: usize,
    pub paid_tickets: u32,
    pub paid_revenue: f64,
    pub pending_revenue: f64,
}

impl RaffleStats {
    pub fn compute(raffle: &Raffle, buyers: &[Buyer]) -> Self {
        let total_tickets = buyers.iter().map(|b| b.tickets).sum();
        let paid: Vec<&Buyer> = buyers.iter().filter(|b| b.payment_received).collect();
        let paid_tickets: u32 = paid.iter().map(|b| b.tickets).sum();
        let paid_revenue = f64::from(paid_tickets) * raffle.ticket_cost;
        let pending_revenue = f64::from(total_tickets - paid_tickets) * raffle.ticket_cost;
        Self {
            total_buyers: buyers.len(),
            total_tickets,
            paid_buyers: paid.len(),
            paid_tickets,
            paid_revenue,
            pending_revenue,
        }
    }
}

pub fn raffle_to_csv(raffle: &Raffle, buyers: &[Buyer]) -> String {
    let stats = RaffleStats::compute(raffle, buyers);
    let mut csv = String::new();

    let _ = writeln!(csv, "RAFFLE INFORMATION");
    let _ = writeln!(csv, "Name,{}", escape_csv(&raffle.name));
    let _ = writeln!(csv, "Prize,{}", escape_csv(&raffle.prize));
    let _ = writeln!(csv, "Draw Date,{}", raffle.draw_date.format("%Y/%m/%d"));
    let _ = writeln!(
        csv,
        "Draw Status,{}",
        if raffle.drawn { "Completed" } else { "Pending" }
    );
    if let Some(winner) = &raffle.winner {
        let _ = writeln!(csv, "Winner,{}", escape_csv(winner));
    }
    csv.push('\n');

    let _ = writeln!(csv, "SUMMARY STATISTICS");
    let _ = writeln!(csv, "Total Buyers,{}", stats.total_buyers);
    let _ = writeln!(csv, "Total Tickets Sold,{}", stats.total_tickets);
    let _ = writeln!(csv, "Paid Buyers,{}", stats.paid_buyers);
    let _ = writeln!(csv, "Paid Tickets,{}", stats.paid_tickets);
    let _ = writeln!(csv, "Unpaid Buyers,{}", stats.total_buyers - stats.paid_buyers);
    let _ = writeln!(csv, "Unpaid Tickets,{}", stats.total_tickets - stats.paid_tickets);
    let _ = writeln!(csv, "Total Revenue (Paid),R{:.2}", stats.paid_revenue);
    let _ = writeln!(csv, "Pending Revenue (Unpaid),R{:.2}", stats.pending_revenue);
    let _ = writeln!(
        csv,
        "Potential Total Revenue,R{:.2}",
        stats.paid_revenue + stats.pending_revenue
    );
    csv.push_str("\n\n");

    let _ = writeln!(csv, "BUYER DETAILS");
    let _ = writeln!(
        csv,
        "Buyer #,Name,Surname,Email,Mobile,Tickets,Purchase Date,Payment Status,Ticket Numbers"
    );
    for buyer in buyers {
        let ticket_numbers = buyer
            .ticket_numbers
            .iter()
            .map(|&n| Ticket::pad(n))
            .collect::<Vec<_>>()
            .join("; ");
        let _ = writeln!(
            csv,
            "{},{},{},{},{},{},{},{},\"{}\"",
            buyer.buyer_number,
            escape_csv(&buyer.name),
            escape_csv(&buyer.surname),
            escape_csv(&buyer.email),
            buyer.mobile.as_deref().unwrap_or("N/A"),
            buyer.tickets,
            buyer.purchase_date.format("%Y/%m/%d"),
            if buyer.payment_received { "Paid" } else { "Unpaid" },
            ticket_numbers,
        );
    }

    csv
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
