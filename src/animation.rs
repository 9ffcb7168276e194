// animation.rs
//
// The cosmetic ticket cycler shown while the draw authority picks the real
// winner. Purely presentational: it samples the local pool at random and has
// no bearing on which ticket actually wins.
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::models::Ticket;

/// Somewhere to flash cycling ticket numbers. The terminal front end rewrites
/// one line in place; tests collect the numbers into a Vec.
pub trait TicketDisplay {
    fn show_ticket(&self, number: &str);
}

/// Cadence of the cycler. The interval decays (grows) after `slow_after`
/// ticks so the drum visibly slows before the reveal.
#[derive(Debug, Clone, Copy)]
pub struct CycleTiming {
    pub start_interval: Duration,
    pub slowdown_step: Duration,
    pub slow_after: u32,
    pub iterations: u32,
}

impl Default for CycleTiming {
    fn default() -> Self {
        Self {
            start_interval: Duration::from_millis(30),
            slowdown_step: Duration::from_millis(15),
            slow_after: 60,
            iterations: 100,
        }
    }
}

impl CycleTiming {
    /// Zero-duration cadence for tests.
    pub fn instant() -> Self {
        Self {
            start_interval: Duration::ZERO,
            slowdown_step: Duration::ZERO,
            slow_after: 1,
            iterations: 3,
        }
    }
}

/// Runs one full cycle over `pool`, flashing a random ticket each tick.
/// Completes after `timing.iterations` ticks; the session joins this with the
/// authority call so the reveal waits for whichever finishes last.
pub async fn cycle_tickets<D: TicketDisplay>(display: &D, pool: &[Ticket], timing: CycleTiming) {
    if pool.is_empty() {
        return;
    }

    let mut interval = timing.start_interval;
    for tick in 0..timing.iterations {
        // thread_rng is re-acquired per tick so no RNG handle lives across
        // an await point.
        let index = rand::thread_rng().gen_range(0..pool.len());
        display.show_ticket(&pool[index].number);

        if tick >= timing.slow_after {
            interval += timing.slowdown_step;
        }
        sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct Recorder(Mutex<Vec<String>>);

    impl TicketDisplay for Recorder {
        fn show_ticket(&self, number: &str) {
            self.0.lock().unwrap().push(number.to_string());
        }
    }

    fn ticket(number: u32) -> Ticket {
        Ticket {
            number: Ticket::pad(number),
            owner_name: "A B".to_string(),
            buyer_number: 1,
        }
    }

    #[tokio::test]
    async fn cycles_exactly_the_configured_number_of_ticks() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        let pool = vec![ticket(1), ticket(2), ticket(3)];

        cycle_tickets(&recorder, &pool, CycleTiming::instant()).await;

        let shown = recorder.0.lock().unwrap();
        assert_eq!(shown.len(), CycleTiming::instant().iterations as usize);
        assert!(shown.iter().all(|n| pool.iter().any(|t| &t.number == n)));
    }

    #[tokio::test]
    async fn empty_pool_shows_nothing() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        cycle_tickets(&recorder, &[], CycleTiming::instant()).await;
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
