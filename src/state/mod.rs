//! Shared, process-wide crawl state.
//!
//! Everything mutable that more than one worker touches lives in one
//! aggregate guarded by a single lock, so every multi-field operation
//! the concurrency model requires (membership-test-then-insert,
//! insert-then-size-read) is trivially atomic: the whole sequence runs
//! inside one critical section that never crosses an `.await` point.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// Per-registered-domain, per-status, and byte/skip counters, plus the
/// membership sets that drive admission and dedup.
#[derive(Debug, Default)]
struct SharedStateData {
    scheduled: HashSet<String>,
    visited: HashSet<String>,
    disallowed: HashSet<String>,
    timeout_counts: HashMap<String, u32>,
    domain_crawl_counts: HashMap<String, u64>,
    superdomain_domains: HashMap<String, HashSet<String>>,
    status_counts: HashMap<u16, u64>,
    total_bytes: u64,
    skipped_invalid: u64,
    skipped_dupes: u64,
    skipped_robots: u64,
    skipped_timeout: u64,
}

/// The crawl's process-wide shared state.
#[derive(Debug)]
pub struct SharedState {
    data: Mutex<SharedStateData>,
    exit: AtomicBool,
}

/// A point-in-time view of the counters needed for the end-of-run summary.
#[derive(Debug, Clone)]
pub struct Summary {
    pub total_pages: usize,
    pub total_bytes: u64,
    pub status_counts: Vec<(u16, u64)>,
    /// Total successful (200 + HTML) fetches: `sum(domain_crawl_counts.values())`.
    pub total_successful_pages: u64,
    /// Per-registered-domain page counts: `domain_crawl_counts` summed over
    /// the hosts recorded under each registered domain, sorted descending.
    pub pages_per_registered_domain: Vec<(String, u64)>,
    pub skipped_invalid: u64,
    pub skipped_dupes: u64,
    pub skipped_robots: u64,
    pub skipped_timeout: u64,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            data: Mutex::new(SharedStateData::default()),
            exit: AtomicBool::new(false),
        }
    }

    /// Atomically tests whether `url` is already scheduled and, if not,
    /// inserts it. Returns `true` if this call performed the insert.
    pub fn try_schedule(&self, url: &str) -> bool {
        self.data.lock().scheduled.insert(url.to_string())
    }

    /// Atomically tests whether `url` is already visited and, if not,
    /// marks it visited. Returns `true` if this call performed the insert.
    pub fn mark_visited(&self, url: &str) -> bool {
        self.data.lock().visited.insert(url.to_string())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.data.lock().visited.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.data.lock().visited.len()
    }

    pub fn is_scheduled(&self, url: &str) -> bool {
        self.data.lock().scheduled.contains(url)
    }

    pub fn add_disallowed(&self, url: &str) {
        self.data.lock().disallowed.insert(url.to_string());
    }

    pub fn is_disallowed(&self, url: &str) -> bool {
        self.data.lock().disallowed.contains(url)
    }

    /// Increments the transport-failure count for `host` and returns
    /// the new total.
    pub fn record_timeout(&self, host: &str) -> u32 {
        let mut data = self.data.lock();
        let count = data.timeout_counts.entry(host.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn timeout_count(&self, host: &str) -> u32 {
        self.data
            .lock()
            .timeout_counts
            .get(host)
            .copied()
            .unwrap_or(0)
    }

    pub fn domain_crawl_count(&self, host: &str) -> u64 {
        self.data
            .lock()
            .domain_crawl_counts
            .get(host)
            .copied()
            .unwrap_or(0)
    }

    /// Records a successful (HTML, 200) fetch for `host`: increments
    /// its crawl count and, in the same critical section, inserts it
    /// into its registered domain's host set.
    pub fn record_success(&self, host: &str, registered_domain: &str) {
        let mut data = self.data.lock();
        *data
            .domain_crawl_counts
            .entry(host.to_string())
            .or_insert(0) += 1;
        data.superdomain_domains
            .entry(registered_domain.to_string())
            .or_default()
            .insert(host.to_string());
    }

    /// Inserts `host` into `registered_domain`'s set and returns the
    /// resulting set size, as one atomic step — used when scoring a
    /// freshly discovered link.
    pub fn insert_superdomain_and_size(&self, registered_domain: &str, host: &str) -> usize {
        let mut data = self.data.lock();
        let set = data
            .superdomain_domains
            .entry(registered_domain.to_string())
            .or_default();
        set.insert(host.to_string());
        set.len()
    }

    pub fn record_status(&self, status_code: u16, content_length: u64) {
        let mut data = self.data.lock();
        *data.status_counts.entry(status_code).or_insert(0) += 1;
        data.total_bytes += content_length;
    }

    pub fn skip_invalid(&self) {
        self.data.lock().skipped_invalid += 1;
    }

    pub fn skip_dupe(&self) {
        self.data.lock().skipped_dupes += 1;
    }

    pub fn skip_robots(&self) {
        self.data.lock().skipped_robots += 1;
    }

    pub fn skip_timeout(&self) {
        self.data.lock().skipped_timeout += 1;
    }

    /// Signals every worker to stop dispatching new work.
    pub fn set_exit(&self) {
        self.exit.store(true, Ordering::SeqCst);
    }

    pub fn should_exit(&self) -> bool {
        self.exit.load(Ordering::SeqCst)
    }

    pub fn summary(&self) -> Summary {
        let data = self.data.lock();

        let mut status_counts: Vec<(u16, u64)> = data
            .status_counts
            .iter()
            .map(|(&code, &count)| (code, count))
            .collect();
        status_counts.sort_by_key(|&(code, _)| code);

        // Per §4.7, the per-registered-domain count is the number of
        // pages crawled under that domain, i.e. `domain_crawl_counts`
        // summed over the hosts `superdomain_domains` recorded for it —
        // not the host-set size, which only measures host diversity.
        let mut pages_per_registered_domain: Vec<(String, u64)> = data
            .superdomain_domains
            .iter()
            .map(|(domain, hosts)| {
                let pages: u64 = hosts
                    .iter()
                    .map(|host| data.domain_crawl_counts.get(host).copied().unwrap_or(0))
                    .sum();
                (domain.clone(), pages)
            })
            .collect();
        pages_per_registered_domain.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let total_successful_pages: u64 = data.domain_crawl_counts.values().sum();

        Summary {
            total_pages: data.visited.len(),
            total_bytes: data.total_bytes,
            status_counts,
            total_successful_pages,
            pages_per_registered_domain,
            skipped_invalid: data.skipped_invalid,
            skipped_dupes: data.skipped_dupes,
            skipped_robots: data.skipped_robots,
            skipped_timeout: data.skipped_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_schedule_is_idempotent() {
        let state = SharedState::new();
        assert!(state.try_schedule("https://example.com/a"));
        assert!(!state.try_schedule("https://example.com/a"));
    }

    #[test]
    fn test_mark_visited_is_idempotent() {
        let state = SharedState::new();
        assert!(state.mark_visited("https://example.com/a"));
        assert!(!state.mark_visited("https://example.com/a"));
        assert!(state.is_visited("https://example.com/a"));
    }

    #[test]
    fn test_record_timeout_increments() {
        let state = SharedState::new();
        assert_eq!(state.record_timeout("example.com"), 1);
        assert_eq!(state.record_timeout("example.com"), 2);
        assert_eq!(state.timeout_count("example.com"), 2);
    }

    #[test]
    fn test_record_success_updates_both_counters() {
        let state = SharedState::new();
        state.record_success("a.example.com", "example.com");
        state.record_success("b.example.com", "example.com");
        assert_eq!(state.domain_crawl_count("a.example.com"), 1);
        assert_eq!(
            state.insert_superdomain_and_size("example.com", "c.example.com"),
            3
        );
    }

    #[test]
    fn test_exit_flag_roundtrip() {
        let state = SharedState::new();
        assert!(!state.should_exit());
        state.set_exit();
        assert!(state.should_exit());
    }

    #[test]
    fn test_disallowed_roundtrip() {
        let state = SharedState::new();
        assert!(!state.is_disallowed("https://blocked.example.com"));
        state.add_disallowed("https://blocked.example.com");
        assert!(state.is_disallowed("https://blocked.example.com"));
    }

    #[test]
    fn test_summary_sorts_domains_by_count_descending() {
        let state = SharedState::new();
        state.record_success("a.big.com", "big.com");
        state.record_success("b.big.com", "big.com");
        state.record_success("a.small.com", "small.com");
        state.mark_visited("https://a.big.com/");

        let summary = state.summary();
        assert_eq!(summary.total_pages, 1);
        assert_eq!(summary.pages_per_registered_domain[0].0, "big.com");
        assert_eq!(summary.pages_per_registered_domain[0].1, 2);
    }

    #[test]
    fn test_summary_domain_page_count_is_not_host_count() {
        // a.big.com alone is crawled three times; a single-host
        // registered domain should still report its true page count,
        // not 1 (the host-set size).
        let state = SharedState::new();
        state.record_success("a.big.com", "big.com");
        state.record_success("a.big.com", "big.com");
        state.record_success("a.big.com", "big.com");
        state.record_success("a.small.com", "small.com");

        let summary = state.summary();
        let big = summary
            .pages_per_registered_domain
            .iter()
            .find(|(domain, _)| domain == "big.com")
            .unwrap();
        assert_eq!(big.1, 3);
        assert_eq!(summary.total_successful_pages, 4);
    }
}
