//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties every component together:
//! - Seeding the frontier from the crawl scope
//! - Capturing the seed's response headers
//! - Gating, fetching, transforming and persisting pages in FIFO order
//! - Enforcing the page budget and the politeness delay
//! - Producing the final crawl report

use crate::config::Config;
use crate::crawler::discover::discover_links;
use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::frontier::{DiscoveredLink, Frontier};
use crate::crawler::parser::parse_page;
use crate::crawler::transport::{HttpTransport, Transport};
use crate::output::{CrawlReport, PageRecord, PageSink, TextFileSink, HEADERS_LABEL};
use crate::robots::RobotsGate;
use crate::state::{CrawlPhase, LinkOutcome};
use crate::url::{CrawlScope, ExtensionFilter};
use crate::{CrawlError, FetchError, PolicyError};
use std::time::Duration;

/// Tunables for a crawl that do not belong to its scope
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pause between two consecutive loop iterations
    pub politeness_delay: Duration,

    /// Product token matched against robots.txt user-agent groups
    pub robots_agent: String,

    /// Extensions that keep a link out of the frontier
    pub filter: ExtensionFilter,
}

impl CrawlOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            politeness_delay: config.crawler.politeness_delay(),
            robots_agent: config.user_agent.crawler_name.clone(),
            filter: ExtensionFilter::new(&config.crawler.excluded_extensions),
        }
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Main crawler coordinator structure
///
/// Owns the frontier, the robots gate, the transport and the sink for the
/// whole crawl. Generic over the transport and sink so the same loop runs
/// against the network and against in-memory doubles.
pub struct Coordinator<T, S> {
    scope: CrawlScope,
    frontier: Frontier,
    robots: RobotsGate,
    transport: T,
    sink: S,
    filter: ExtensionFilter,
    politeness_delay: Duration,
    store: String,
    phase: CrawlPhase,
    report: CrawlReport,
}

impl<T, S> Coordinator<T, S>
where
    T: Transport,
    S: PageSink,
{
    /// Creates a coordinator in the `Init` phase with the seed enqueued
    ///
    /// # Arguments
    ///
    /// * `scope` - Seed, origin and page budget
    /// * `transport` - Used for robots.txt, header capture and page fetches
    /// * `sink` - Receives one record per persisted page
    /// * `options` - Politeness delay, robots token and extension filter
    pub fn new(scope: CrawlScope, transport: T, sink: S, options: CrawlOptions) -> Self {
        let store = scope.store_name();
        let mut report = CrawlReport::new(store.clone());

        let mut frontier = Frontier::new();
        let seed = scope.seed().clone();
        if frontier.enqueue(DiscoveredLink::new(seed.to_string(), seed)) {
            report.links_discovered += 1;
        }

        Self {
            scope,
            frontier,
            robots: RobotsGate::new(options.robots_agent),
            transport,
            sink,
            filter: options.filter,
            politeness_delay: options.politeness_delay,
            store,
            phase: CrawlPhase::Init,
            report,
        }
    }

    pub fn scope(&self) -> &CrawlScope {
        &self.scope
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Report accumulated so far
    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the coordinator, handing back the sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Runs the crawl to completion
    ///
    /// Walks `Init -> HeaderCapture -> Loop -> Done`. Per-link failures are
    /// counted and skipped; only sink failures abort.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl reached `Done`
    /// * `Err(CrawlError)` - A sink write failed or the coordinator was reused
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        tracing::info!(
            "Starting crawl of {} (budget: {} pages, store: {})",
            self.scope.origin(),
            self.scope.max_pages(),
            self.store
        );

        self.start().await?;

        while self.has_work() {
            self.step().await?;

            if self.has_work() && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }
        }

        self.finish()
    }

    /// Moves through header capture into the loop phase
    pub async fn start(&mut self) -> Result<(), CrawlError> {
        self.transition(CrawlPhase::HeaderCapture)?;
        self.capture_headers().await?;
        self.transition(CrawlPhase::Loop)
    }

    /// True while the frontier has links and the budget has slots left
    pub fn has_work(&self) -> bool {
        self.phase == CrawlPhase::Loop
            && !self.frontier.is_empty()
            && (self.report.pages_processed as usize) < self.scope.max_pages()
    }

    /// Processes the next link in the frontier
    ///
    /// # Returns
    ///
    /// * `Ok(Some(outcome))` - A link was dequeued and consumed a budget slot
    /// * `Ok(None)` - Nothing left to do
    /// * `Err(CrawlError)` - The sink failed, or the loop phase was not entered
    pub async fn step(&mut self) -> Result<Option<LinkOutcome>, CrawlError> {
        if self.phase != CrawlPhase::Loop {
            return Err(CrawlError::Phase {
                from: self.phase,
                to: CrawlPhase::Loop,
            });
        }

        if !self.has_work() {
            return Ok(None);
        }

        let Some(link) = self.frontier.dequeue() else {
            return Ok(None);
        };

        let outcome = self.process_link(&link).await?;
        self.report.record(outcome);

        tracing::debug!(
            "[{}/{}] {} -> {}",
            self.report.pages_processed,
            self.scope.max_pages(),
            link.url,
            outcome
        );

        Ok(Some(outcome))
    }

    /// Enters `Done` and returns the final report
    fn finish(&mut self) -> Result<CrawlReport, CrawlError> {
        self.transition(CrawlPhase::Done)?;
        self.report.finish(self.frontier.len() as u64);

        tracing::info!(
            "Crawl completed: {} pages processed, {} persisted, {} left in frontier",
            self.report.pages_processed,
            self.report.pages_persisted(),
            self.report.frontier_remaining
        );

        Ok(self.report.clone())
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), CrawlError> {
        if !self.phase.can_transition_to(to) {
            return Err(CrawlError::Phase {
                from: self.phase,
                to,
            });
        }

        tracing::trace!("Crawl phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Appends the seed's response headers as the first record of the store
    ///
    /// Skipped when robots.txt denies the seed. A failed request is logged and
    /// ignored.
    async fn capture_headers(&mut self) -> Result<(), CrawlError> {
        let seed = self.scope.seed().as_str().to_string();

        if let Err(e) = self.check_robots(&seed).await {
            tracing::info!("Not capturing headers: {}", e);
            return Ok(());
        }

        let response = match self.transport.get(&seed).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to capture headers for {}: {}", seed, e);
                return Ok(());
            }
        };

        let body = response
            .headers
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("\n");

        self.sink
            .append(&self.store, &PageRecord::new(HEADERS_LABEL, "", body))?;
        self.report.headers_captured = true;

        tracing::debug!(
            "Captured {} response headers from {}",
            response.headers.len(),
            seed
        );
        Ok(())
    }

    async fn check_robots(&mut self, url: &str) -> Result<(), PolicyError> {
        if self.robots.can_fetch(&self.transport, url).await {
            Ok(())
        } else {
            Err(PolicyError::RobotsDenied {
                url: url.to_string(),
            })
        }
    }

    /// Gates, fetches and persists one link
    ///
    /// Links found on a loaded page are queued before its record is written.
    async fn process_link(&mut self, link: &DiscoveredLink) -> Result<LinkOutcome, CrawlError> {
        let url = link.url.as_str();

        if let Err(e) = self.check_robots(url).await {
            tracing::info!("Skipping: {}", e);
            return Ok(LinkOutcome::RobotsDenied);
        }

        let page = match fetch_page(&self.transport, url).await {
            Ok(FetchOutcome::Loaded(page)) => page,
            Ok(FetchOutcome::NotLoaded { status }) => {
                tracing::info!("Skipping {}: HTTP {}", url, status);
                return Ok(LinkOutcome::NotLoaded);
            }
            Err(FetchError::Policy(e)) => {
                tracing::info!("Skipping: {}", e);
                return Ok(match e {
                    PolicyError::RobotsDenied { .. } => LinkOutcome::RobotsDenied,
                    PolicyError::ContentTypeRejected { .. } => LinkOutcome::ContentRejected,
                });
            }
            Err(FetchError::Transport(e)) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                return Ok(LinkOutcome::TransportFailed);
            }
        };

        let parsed = parse_page(&page.body);

        let added = discover_links(
            parsed.links.iter(),
            &self.scope,
            &self.filter,
            &mut self.frontier,
        );
        self.report.links_discovered += added as u64;
        tracing::debug!(
            "Found {} links on {}, {} new",
            parsed.links.len(),
            url,
            added
        );

        let record = PageRecord::new(link.url.path(), parsed.heading, parsed.text);
        self.sink.append(&self.store, &record)?;

        tracing::info!("Saved {}", url);
        Ok(LinkOutcome::Persisted)
    }
}

/// Runs a complete crawl over HTTP, writing to the configured directory
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed successfully
/// * `Err(CrawlError)` - Crawl could not start or a write failed
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let scope = CrawlScope::new(&config.crawler.seed_url, config.crawler.max_pages)?;
    let transport = HttpTransport::new(&config.user_agent)?;
    let sink = TextFileSink::create(&config.output.directory)?;

    let options = CrawlOptions::from_config(config);

    let mut coordinator = Coordinator::new(scope, transport, sink, options);
    coordinator.run().await
}
