// session.rs
//
// Draw Session Controller: Idle -> Confirming -> Drawing -> Revealing -> Idle.
// Owns the only code path that flips a raffle's drawn/winner fields, and
// always from the authority's response, never from a locally computed pick.
use tracing::{info, warn};

use crate::animation::{cycle_tickets, CycleTiming, TicketDisplay};
use crate::api::RaffleApi;
use crate::error::DrawError;
use crate::models::{Buyer, Raffle};
use crate::pool::{
    build_ticket_pool, find_winning_buyer, parse_winner_ticket, EligibilitySplit, ExclusionReport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Confirming,
    Drawing,
    Revealing,
}

/// Blocking confirmation shown when unpaid buyers would be excluded.
/// Returning false cancels the draw with no state change anywhere.
pub trait DrawPrompt {
    fn confirm_exclusions(&self, report: &ExclusionReport) -> bool;
}

/// Presentation sink for the ceremony. Everything here is cosmetic; the
/// session's return value carries the authoritative outcome.
pub trait DrawStage: TicketDisplay {
    fn intro(&self, raffle: &Raffle, eligible_tickets: usize, eligible_buyers: usize, excluded_buyers: usize);
    fn drum_roll(&self);
    fn reveal(&self, summary: &DrawSummary);
}

/// What a completed draw produced, reconciled against the local pool.
#[derive(Debug, Clone)]
pub struct DrawSummary {
    /// The authority's winner string, displayed verbatim.
    pub winner: String,
    /// Ticket number parsed back out of `winner`, when parseable.
    pub winning_ticket: Option<u32>,
    /// The locally known owner of the winning ticket, for contact details.
    pub winning_buyer: Option<Buyer>,
    pub eligible_tickets: usize,
    pub excluded_buyers: usize,
    pub excluded_tickets: u32,
    /// True when the returned winner was not found in the locally computed
    /// paid pool. The authority is still trusted; this is an audit flag, not
    /// a rejection.
    pub pool_mismatch: bool,
}

#[derive(Debug, Clone)]
pub enum DrawOutcome {
    Completed(DrawSummary),
    /// Operator declined the unpaid-exclusion confirmation.
    Cancelled,
}

pub struct DrawSession<A, P, S> {
    api: A,
    prompt: P,
    stage: S,
    timing: CycleTiming,
    state: SessionState,
    raffle: Option<Raffle>,
}

impl<A, P, S> DrawSession<A, P, S>
where
    A: RaffleApi,
    P: DrawPrompt,
    S: DrawStage,
{
    pub fn new(api: A, prompt: P, stage: S, timing: CycleTiming) -> Self {
        Self {
            api,
            prompt,
            stage,
            timing,
            state: SessionState::Idle,
            raffle: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Local snapshot of the raffle, updated from the authority's response
    /// after each successful draw.
    pub fn raffle(&self) -> Option<&Raffle> {
        self.raffle.as_ref()
    }

    /// Returns the session to `Idle` after a run future was dropped
    /// mid-draw. Without this a cancelled run would trip the in-flight guard
    /// forever.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Runs one full draw against `raffle_id`. Re-running is a re-draw: the
    /// exclusion check is repeated against current payment statuses and the
    /// previous winner is overwritten by whatever the authority returns.
    pub async fn run(&mut self, raffle_id: &str) -> Result<DrawOutcome, DrawError> {
        if self.state != SessionState::Idle {
            return Err(DrawError::DrawInFlight);
        }
        let result = self.run_draw(raffle_id).await;
        self.state = SessionState::Idle;
        result
    }

    async fn run_draw(&mut self, raffle_id: &str) -> Result<DrawOutcome, DrawError> {
        let mut raffle = self.api.fetch_raffle(raffle_id).await?;
        let buyers = self.api.fetch_buyers(raffle_id).await?;
        if buyers.is_empty() {
            return Err(DrawError::NoBuyers);
        }

        let split = EligibilitySplit::partition(buyers);
        let report = split.exclusion_report();
        if !split.unpaid.is_empty() {
            self.state = SessionState::Confirming;
            info!(
                unpaid_buyers = report.unpaid_buyers,
                unpaid_tickets = report.unpaid_tickets,
                "unpaid buyers present, asking operator to confirm exclusion"
            );
            if !self.prompt.confirm_exclusions(&report) {
                info!("draw cancelled at exclusion confirmation");
                return Ok(DrawOutcome::Cancelled);
            }
        }

        let pool = build_ticket_pool(&split.paid)?;
        if pool.is_empty() {
            return Err(DrawError::NoPaidTickets);
        }

        self.state = SessionState::Drawing;
        self.stage
            .intro(&raffle, pool.len(), split.paid.len(), split.unpaid.len());

        // The authority call and the cosmetic cycler run as one joined pair:
        // the reveal waits for the slower of the two, and a fresh cycler is
        // created per run so two animations can never race.
        let (draw, ()) = tokio::join!(
            self.api.draw_winner(raffle_id),
            cycle_tickets(&self.stage, &pool, self.timing),
        );
        let draw = draw?;

        let winning_ticket = parse_winner_ticket(&draw.winner);
        let pool_mismatch = match winning_ticket {
            Some(number) => !split
                .paid
                .iter()
                .any(|b| b.ticket_numbers.contains(&number)),
            None => true,
        };
        if pool_mismatch {
            warn!(
                winner = %draw.winner,
                "authority winner not found in locally computed paid pool; \
                 displaying as returned and flagging for audit"
            );
        }
        let winning_buyer =
            winning_ticket.and_then(|n| find_winning_buyer(split.all(), n)).cloned();

        self.state = SessionState::Revealing;
        raffle.drawn = true;
        raffle.winner = Some(draw.winner.clone());
        self.raffle = Some(raffle);

        let summary = DrawSummary {
            winner: draw.winner,
            winning_ticket,
            winning_buyer,
            eligible_tickets: pool.len(),
            excluded_buyers: report.unpaid_buyers,
            excluded_tickets: report.unpaid_tickets,
            pool_mismatch,
        };
        self.stage.drum_roll();
        self.stage.reveal(&summary);

        Ok(DrawOutcome::Completed(summary))
    }
}
