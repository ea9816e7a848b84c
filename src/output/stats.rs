//! Crawl report generation
//!
//! This module accumulates per-link outcomes while the coordinator runs and
//! renders the final summary printed by the binary.

use crate::state::LinkOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl report summary
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Output store the crawl wrote to
    pub store_name: String,

    /// Number of links taken off the frontier (each consumes one budget slot)
    pub pages_processed: u64,

    /// Count of processed links by outcome
    pub outcomes: HashMap<LinkOutcome, u64>,

    /// Number of links admitted to the frontier, the seed included
    pub links_discovered: u64,

    /// Links still queued when the crawl stopped
    pub frontier_remaining: u64,

    /// Whether the seed's response headers were written to the store
    pub headers_captured: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlReport {
    /// Creates an empty report stamped with the current time
    pub fn new(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            pages_processed: 0,
            outcomes: HashMap::new(),
            links_discovered: 0,
            frontier_remaining: 0,
            headers_captured: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records the outcome of one dequeued link
    pub fn record(&mut self, outcome: LinkOutcome) {
        self.pages_processed += 1;
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Number of processed links that ended with `outcome`
    pub fn count(&self, outcome: LinkOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of pages appended to the store
    pub fn pages_persisted(&self) -> u64 {
        self.count(LinkOutcome::Persisted)
    }

    /// Number of links skipped by robots.txt, content type or status
    pub fn pages_skipped(&self) -> u64 {
        self.sum_where(LinkOutcome::is_skipped)
    }

    /// Number of links whose request failed outright
    pub fn pages_failed(&self) -> u64 {
        self.sum_where(LinkOutcome::is_error)
    }

    fn sum_where(&self, category: impl Fn(&LinkOutcome) -> bool) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| category(*outcome))
            .map(|(_, count)| count)
            .sum()
    }

    pub fn finish(&mut self, frontier_remaining: u64) {
        self.frontier_remaining = frontier_remaining;
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration, once the crawl has finished
    pub fn duration_seconds(&self) -> Option<u64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds().max(0) as u64)
    }

    /// Percentage of processed links that were persisted
    pub fn success_rate(&self) -> f64 {
        if self.pages_processed == 0 {
            return 0.0;
        }
        (self.pages_persisted() as f64 / self.pages_processed as f64) * 100.0
    }
}

/// Prints the report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Output store: {}", report.store_name);
    println!("  Links discovered: {}", report.links_discovered);
    println!("  Left in frontier: {}", report.frontier_remaining);
    println!(
        "  Headers captured: {}",
        if report.headers_captured { "yes" } else { "no" }
    );
    if let Some(duration) = report.duration_seconds() {
        println!("  Duration: {}s", duration);
    }
    println!();

    if report.pages_processed > 0 {
        println!("Links by Outcome:");
        for outcome in LinkOutcome::all() {
            let count = report.count(outcome);
            if count == 0 {
                continue;
            }
            let percentage = (count as f64 / report.pages_processed as f64) * 100.0;
            println!("  {}: {} ({:.1}%)", outcome, count, percentage);
        }
        println!(
            "  ({} skipped, {} failed)",
            report.pages_skipped(),
            report.pages_failed()
        );
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} links persisted)",
        report.success_rate(),
        report.pages_persisted(),
        report.pages_processed
    );
    println!("Total pages crawled: {}", report.pages_processed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_every_outcome() {
        let mut report = CrawlReport::new("example.com.txt");
        report.record(LinkOutcome::Persisted);
        report.record(LinkOutcome::Persisted);
        report.record(LinkOutcome::RobotsDenied);

        assert_eq!(report.pages_processed, 3);
        assert_eq!(report.pages_persisted(), 2);
        assert_eq!(report.count(LinkOutcome::RobotsDenied), 1);
        assert_eq!(report.count(LinkOutcome::NotLoaded), 0);
    }

    #[test]
    fn test_skipped_and_failed_totals() {
        let mut report = CrawlReport::new("example.com.txt");
        for outcome in [
            LinkOutcome::Persisted,
            LinkOutcome::RobotsDenied,
            LinkOutcome::ContentRejected,
            LinkOutcome::NotLoaded,
            LinkOutcome::NotLoaded,
            LinkOutcome::TransportFailed,
        ] {
            report.record(outcome);
        }

        assert_eq!(report.pages_skipped(), 4);
        assert_eq!(report.pages_failed(), 1);
        assert_eq!(
            report.pages_persisted() + report.pages_skipped() + report.pages_failed(),
            report.pages_processed
        );
    }

    #[test]
    fn test_success_rate() {
        let mut report = CrawlReport::new("example.com.txt");
        assert_eq!(report.success_rate(), 0.0);

        report.record(LinkOutcome::Persisted);
        report.record(LinkOutcome::TransportFailed);
        assert!((report.success_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut report = CrawlReport::new("example.com.txt");
        assert_eq!(report.duration_seconds(), None);

        report.finish(4);
        assert_eq!(report.frontier_remaining, 4);
        assert!(report.duration_seconds().is_some());
    }
}
