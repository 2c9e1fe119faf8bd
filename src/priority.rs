//! Pure scoring function used to order the frontier.
//!
//! `priority = 1/ln(2+d) + 1/(1+s)`, where `d` is how many pages have
//! already been crawled on the candidate's host and `s` is how many
//! distinct hosts have already been seen under the candidate's
//! registered domain. Both terms fall monotonically in their
//! argument, which diversifies the crawl away from hosts and
//! registered-domain groups it has already spent effort on.

/// Computes the priority score for a candidate URL.
///
/// `domain_crawl_count` is the number of successful fetches already
/// recorded for the candidate's host. `superdomain_domain_count` is
/// the number of distinct hosts already seen under the candidate's
/// registered domain.
pub fn compute_priority(domain_crawl_count: u64, superdomain_domain_count: u64) -> f64 {
    let d = domain_crawl_count as f64;
    let s = superdomain_domain_count as f64;
    1.0 / (2.0 + d).ln() + 1.0 / (1.0 + s)
}

/// Fixed priority assigned to seed URLs: strictly below every possible
/// value `compute_priority` can return, so any discovered child always
/// outranks an unvisited seed.
pub const SEED_PRIORITY: f64 = 0.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_at_zero() {
        let p = compute_priority(0, 0);
        assert!((p - 2.4427).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn test_priority_with_history() {
        let p = compute_priority(3, 2);
        assert!((p - 0.9549).abs() < 1e-3, "got {p}");
    }

    #[test]
    fn test_priority_falls_with_domain_crawl_count() {
        let low = compute_priority(5, 0);
        let high = compute_priority(0, 0);
        assert!(low < high);
    }

    #[test]
    fn test_priority_falls_with_superdomain_diversity() {
        let low = compute_priority(0, 5);
        let high = compute_priority(0, 0);
        assert!(low < high);
    }

    #[test]
    fn test_priority_always_exceeds_seed_priority() {
        for d in [0, 1, 10, 1000] {
            for s in [0, 1, 10, 1000] {
                assert!(compute_priority(d, s) > SEED_PRIORITY);
            }
        }
    }
}
