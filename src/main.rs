// main.rs
use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use raffle_draw::animation::{CycleTiming, TicketDisplay};
use raffle_draw::api::{HttpRaffleApi, RaffleApi};
use raffle_draw::config::Config;
use raffle_draw::export::raffle_to_csv;
use raffle_draw::models::Raffle;
use raffle_draw::pool::ExclusionReport;
use raffle_draw::session::{DrawOutcome, DrawPrompt, DrawSession, DrawStage, DrawSummary};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::load();
    let mut args = env::args().skip(1);
    let result = match (args.next().as_deref(), args.next()) {
        (Some("draw"), Some(raffle_id)) => run_draw(&config, &raffle_id).await,
        (Some("export"), Some(raffle_id)) => run_export(&config, &raffle_id).await,
        _ => {
            eprintln!("Usage: raffle-draw <draw|export> <raffle-id>");
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run_draw(config: &Config, raffle_id: &str) -> Result<(), raffle_draw::error::DrawError> {
    let api = HttpRaffleApi::new(config)?;
    let mut session = DrawSession::new(api, ConsolePrompt, ConsoleStage, CycleTiming::default());

    match session.run(raffle_id).await? {
        DrawOutcome::Completed(_) => Ok(()),
        DrawOutcome::Cancelled => {
            println!("Draw cancelled. No changes were made.");
            Ok(())
        }
    }
}

async fn run_export(config: &Config, raffle_id: &str) -> Result<(), raffle_draw::error::DrawError> {
    let api = HttpRaffleApi::new(config)?;
    let raffle = api.fetch_raffle(raffle_id).await?;
    let buyers = api.fetch_buyers(raffle_id).await?;
    print!("{}", raffle_to_csv(&raffle, &buyers));
    Ok(())
}

struct ConsolePrompt;

impl DrawPrompt for ConsolePrompt {
    fn confirm_exclusions(&self, report: &ExclusionReport) -> bool {
        println!("WARNING: unpaid tickets detected!");
        println!("  {} buyer(s) have not paid", report.unpaid_buyers);
        println!(
            "  {} unpaid ticket(s) out of {} total",
            report.unpaid_tickets, report.total_tickets
        );
        println!("Only PAID tickets will be included in the draw.");
        print!("Proceed with the draw? [y/N] ");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

struct ConsoleStage;

impl TicketDisplay for ConsoleStage {
    fn show_ticket(&self, number: &str) {
        print!("\r  >> {number} ");
        let _ = io::stdout().flush();
    }
}

impl DrawStage for ConsoleStage {
    fn intro(
        &self,
        raffle: &Raffle,
        eligible_tickets: usize,
        eligible_buyers: usize,
        excluded_buyers: usize,
    ) {
        println!("=== {} ===", raffle.name);
        println!("Today's prize: {}", raffle.prize);
        println!(
            "{eligible_tickets} paid ticket(s) from {eligible_buyers} participant(s) in the drum"
        );
        if excluded_buyers > 0 {
            println!("{excluded_buyers} unpaid buyer(s) excluded from this draw");
        } else {
            println!("All tickets are paid and eligible");
        }
        println!("Selecting the winning ticket...");
    }

    fn drum_roll(&self) {
        println!();
        println!("And the winner is...");
    }

    fn reveal(&self, summary: &DrawSummary) {
        println!();
        println!("*** {} ***", summary.winner);
        if let Some(buyer) = &summary.winning_buyer {
            println!(
                "Contact: {} <{}>{}",
                buyer.full_name(),
                buyer.email,
                buyer
                    .mobile
                    .as_deref()
                    .map(|m| format!(", {m}"))
                    .unwrap_or_default()
            );
        }
        if summary.pool_mismatch {
            println!(
                "Note: this ticket was not in the locally computed paid pool; \
                 check for payment-status changes since the buyer list was loaded."
            );
        }
        println!(
            "{} eligible ticket(s), {} buyer(s) excluded",
            summary.eligible_tickets, summary.excluded_buyers
        );
    }
}
