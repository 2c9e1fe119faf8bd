//! Worker-pool scheduler: fills a fixed-size pool of tasks from the
//! frontier, collects completions, and enforces the run's termination
//! conditions (page cap, time budget, drained frontier).

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::crawler::worker::{process, NewEntry, WorkerContext};
use crate::frontier::Frontier;
use crate::priority::SEED_PRIORITY;
use crate::url::is_admissible;

/// Drives the crawl to completion: seeds the frontier, then runs the
/// Filling/Waiting loop until a termination condition fires.
pub struct Scheduler {
    frontier: Frontier,
    ctx: Arc<WorkerContext>,
    capacity: usize,
    max_pages: u64,
    max_time: Duration,
}

impl Scheduler {
    pub fn new(ctx: Arc<WorkerContext>, capacity: usize, max_pages: u64, max_time: Duration) -> Self {
        Self {
            frontier: Frontier::new(),
            ctx,
            capacity,
            max_pages,
            max_time,
        }
    }

    /// Admits each seed URL (admission + robots check) and pushes the
    /// ones that pass onto the frontier at the fixed seed priority.
    pub async fn seed(&mut self, seeds: Vec<String>) {
        for raw_seed in seeds {
            let Ok(seed) = crate::url::clean(&raw_seed) else {
                continue;
            };

            if !is_admissible(&seed) {
                continue;
            }

            if !self
                .ctx
                .robots
                .is_allowed(&self.ctx.client, &seed, &self.ctx.user_agent)
                .await
            {
                self.ctx.state.add_disallowed(&seed);
                continue;
            }

            if self.ctx.state.try_schedule(&seed) {
                self.frontier.push(seed, 0, SEED_PRIORITY);
            }
        }

        debug!(seeded = self.frontier.len(), "seeding complete");
    }

    /// Runs the Filling/Waiting loop until termination.
    pub async fn run(mut self) -> crate::Result<()> {
        let start = Instant::now();
        let mut in_flight: JoinSet<crate::Result<Vec<NewEntry>>> = JoinSet::new();

        loop {
            self.fill(&mut in_flight);

            if in_flight.is_empty() {
                break;
            }

            if let Some(joined) = in_flight.join_next().await {
                match joined {
                    Ok(Ok(new_entries)) => {
                        for (url, depth, score) in new_entries {
                            self.frontier.push(url, depth, score);
                        }
                    }
                    Ok(Err(err)) => warn!(error = %err, "worker returned an error"),
                    Err(join_err) => warn!(error = %join_err, "worker task panicked"),
                }
            }

            if self.ctx.state.visited_count() as u64 >= self.max_pages || start.elapsed() >= self.max_time {
                self.ctx.state.set_exit();
            }
        }

        Ok(())
    }

    fn fill(&mut self, in_flight: &mut JoinSet<crate::Result<Vec<NewEntry>>>) {
        while in_flight.len() < self.capacity && !self.ctx.state.should_exit() {
            let Some(entry) = self.frontier.pop() else {
                break;
            };

            // A redirect may have already collapsed this URL into one
            // that was visited via a different admitted entry.
            if self.ctx.state.is_visited(&entry.url) {
                continue;
            }

            let ctx = self.ctx.clone();
            in_flight.spawn(async move { process(&ctx, entry).await });
        }
    }
}
