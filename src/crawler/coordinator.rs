//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the collaborators together:
//! - Popping URLs from the frontier, at most once per canonical URL
//! - Fetching, parsing and sampling each page
//! - Resolving, permission-checking and scoring discovered links
//! - Enforcing the crawl budget
//!
//! The loop is strictly sequential: one page is fully processed before the
//! next one is popped.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchedPage, Fetcher, HttpFetcher};
use crate::crawler::parser::{extract_links, parse_document};
use crate::crawler::scorer::{LinkClass, PriorityScorer, RankPermutation};
use crate::language::{LanguageClassifier, LanguageSample, Sampler, WhatlangClassifier};
use crate::output::CrawlStats;
use crate::robots::{HttpRobotsSource, RobotsSource};
use crate::state::CrawlState;
use crate::url::{is_crawlable, normalize, resolve_base};
use crate::BabelError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use url::Url;

/// Progress is logged every this many crawled pages
const PROGRESS_INTERVAL: u64 = 100;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Created, seeds may still be added
    Init,
    /// Processing the frontier
    Running,
    /// Frontier exhausted or budget reached
    Done,
}

/// What happened to a successfully crawled page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub url: String,
    /// Body size in bytes
    pub size: usize,
    pub status: u16,
    /// Whether the page was selected for language sampling
    pub sampled: bool,
    /// Language code, when sampling determined one
    pub language: Option<String>,
    /// Links kept after capping and extension filtering
    pub links_found: usize,
    /// Links pushed to the frontier
    pub links_enqueued: usize,
    /// Candidate ranks drawn for this page's link positions
    pub ranks: RankPermutation,
}

/// Result of a single [`Coordinator::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The page was fetched, parsed and counted
    Crawled(PageRecord),
    /// Fetch or parse failed; the page was not counted
    Skipped,
    /// The popped URL had already been processed
    AlreadyVisited,
    /// The crawl is over
    Finished,
}

/// Everything a page contributes, gathered before any link is checked
struct PageAnalysis {
    sampled: bool,
    sample: Option<LanguageSample>,
    links: Vec<String>,
    ranks: RankPermutation,
    base: Url,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    settings: CrawlerConfig,
    state: CrawlState,
    fetcher: Box<dyn Fetcher>,
    robots: Box<dyn RobotsSource>,
    sampler: Sampler,
    scorer: PriorityScorer,
    rng: StdRng,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator with HTTP collaborators built from `config`
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to be seeded
    /// * `Err(BabelError)` - An HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, BabelError> {
        let fetcher = HttpFetcher::new(&config.crawler, &config.user_agent)?;
        let robots = HttpRobotsSource::new(
            &config.user_agent,
            Duration::from_millis(config.crawler.request_timeout_ms),
        )?;

        Ok(Self::with_collaborators(
            config.crawler.clone(),
            Box::new(fetcher),
            Box::new(robots),
            Box::new(WhatlangClassifier),
        ))
    }

    /// Creates a coordinator around arbitrary collaborators
    pub fn with_collaborators(
        settings: CrawlerConfig,
        fetcher: Box<dyn Fetcher>,
        robots: Box<dyn RobotsSource>,
        classifier: Box<dyn LanguageClassifier>,
    ) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            sampler: Sampler::new(settings.sample_rate, classifier),
            scorer: PriorityScorer::new(settings.max_links),
            state: CrawlState::new(),
            settings,
            fetcher,
            robots,
            rng,
            phase: CrawlPhase::Init,
        }
    }

    /// Pushes seed URLs onto the frontier at priority 0
    ///
    /// Seeds are canonicalized first; unparseable ones are dropped.
    ///
    /// # Returns
    ///
    /// The number of seeds enqueued
    pub fn seed<I, S>(&mut self, seeds: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;

        for seed in seeds {
            let seed = seed.as_ref().trim();
            let Ok(parsed) = Url::parse(seed) else {
                tracing::warn!("Ignoring invalid seed URL: {}", seed);
                continue;
            };

            let canonical = normalize(seed, &parsed);
            tracing::debug!("Seeding frontier with {}", canonical);
            self.state.frontier.push(0, canonical);
            count += 1;
        }

        count
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Mutable access to the crawl state, e.g. to pre-register domains
    pub fn state_mut(&mut self) -> &mut CrawlState {
        &mut self.state
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.state.stats
    }

    /// Runs the crawl loop until the frontier is empty or the budget is spent
    pub async fn run(&mut self) -> &CrawlStats {
        let start_time = Instant::now();
        tracing::info!(
            "Starting crawl: {} seeds, budget {}",
            self.state.frontier.len(),
            self.settings.budget
        );

        loop {
            match self.step().await {
                StepOutcome::Finished => break,
                StepOutcome::Crawled(_) => {
                    let crawled = self.state.stats.crawled;
                    if crawled % PROGRESS_INTERVAL == 0 {
                        let rate = crawled as f64 / start_time.elapsed().as_secs_f64().max(f64::EPSILON);
                        tracing::info!(
                            "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                            crawled,
                            self.state.frontier.len(),
                            rate
                        );
                    }
                }
                StepOutcome::Skipped | StepOutcome::AlreadyVisited => {}
            }
        }

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?}, {} left in frontier",
            self.state.stats.crawled,
            start_time.elapsed(),
            self.state.frontier.len()
        );

        &self.state.stats
    }

    /// Processes one frontier entry
    pub async fn step(&mut self) -> StepOutcome {
        if self.phase == CrawlPhase::Done {
            return StepOutcome::Finished;
        }
        self.phase = CrawlPhase::Running;

        if self.state.stats.crawled >= self.settings.budget {
            tracing::info!("Crawl budget of {} pages reached", self.settings.budget);
            self.phase = CrawlPhase::Done;
            return StepOutcome::Finished;
        }

        let Some(entry) = self.state.frontier.pop() else {
            tracing::info!("Frontier is empty, crawl complete");
            self.phase = CrawlPhase::Done;
            return StepOutcome::Finished;
        };

        if !self.state.mark_visited(&entry.url) {
            tracing::trace!("Already visited: {}", entry.url);
            return StepOutcome::AlreadyVisited;
        }

        let page_url = match Url::parse(&entry.url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unparseable URL {}: {}", entry.url, e);
                return StepOutcome::Skipped;
            }
        };

        let page = match self.fetcher.fetch(&entry.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", entry.url, e);
                return StepOutcome::Skipped;
            }
        };

        let Some(analysis) = self.analyze(&page_url, &page) else {
            return StepOutcome::Skipped;
        };

        let links_enqueued = if analysis.links.is_empty() {
            tracing::info!("No links found on {}", entry.url);
            0
        } else {
            self.enqueue_links(&analysis).await
        };

        let record = PageRecord {
            url: entry.url,
            size: page.body.len(),
            status: page.status_code,
            sampled: analysis.sampled,
            language: analysis.sample.map(|s| s.code),
            links_found: analysis.links.len(),
            links_enqueued,
            ranks: analysis.ranks,
        };
        self.log_page(&record);

        StepOutcome::Crawled(record)
    }

    /// Emits the structured per-page record
    fn log_page(&self, record: &PageRecord) {
        tracing::info!(
            crawled = self.state.stats.crawled,
            sampled = self.state.stats.sampled,
            url = %record.url,
            size = record.size,
            status = record.status,
            sampled_page = record.sampled,
            lang = record.language.as_deref().unwrap_or("-"),
            "Page crawled"
        );
    }

    /// Parses, counts and samples the page, and collects its links
    ///
    /// Kept synchronous: the parsed document must not live across an await.
    fn analyze(&mut self, page_url: &Url, page: &FetchedPage) -> Option<PageAnalysis> {
        let document = match parse_document(&page.body) {
            Ok(document) => document,
            Err(e) => {
                tracing::debug!("Failed to parse {}: {}", page_url, e);
                return None;
            }
        };

        self.state.stats.record_crawled();

        let sampled = self.sampler.should_sample(&mut self.rng);
        let sample = if sampled {
            self.sampler.maybe_sample(&document, &mut self.state.stats)
        } else {
            None
        };

        let links = extract_links(&document, self.scorer.max_links() as usize, &mut self.rng);
        let ranks = RankPermutation::shuffled(self.scorer.max_links(), &mut self.rng);
        let base = resolve_base(page_url, document.base_href().as_deref());

        Some(PageAnalysis {
            sampled,
            sample,
            links,
            ranks,
            base,
        })
    }

    /// Canonicalizes, checks and scores each link, pushing survivors
    ///
    /// # Returns
    ///
    /// The number of links pushed to the frontier
    async fn enqueue_links(&mut self, analysis: &PageAnalysis) -> usize {
        let base_host = analysis.base.host_str().unwrap_or_default().to_string();
        let mut enqueued = 0;

        for (position, raw) in analysis.links.iter().enumerate() {
            let canonical = normalize(raw, &analysis.base);
            if self.state.is_visited(&canonical) {
                continue;
            }

            let target = match Url::parse(&canonical) {
                Ok(target) if is_crawlable(&target) => target,
                _ => {
                    tracing::trace!("Skipping non-crawlable link {}", canonical);
                    continue;
                }
            };
            let Some(link_host) = target.host_str().map(str::to_string) else {
                continue;
            };

            if !self.state.robots.is_allowed(self.robots.as_ref(), &target).await {
                tracing::debug!("Disallowed by robots.txt: {}", canonical);
                continue;
            }

            let class = self.scorer.classify(&link_host, &base_host, &self.state.domains);
            if class == LinkClass::NewDomain {
                self.state.domains.mark_seen(&link_host);
            }
            let priority = self.scorer.priority(class, analysis.ranks.rank(position));

            tracing::trace!("Enqueue {} at priority {} ({:?})", canonical, priority, class);
            self.state.frontier.push(priority, canonical);
            enqueued += 1;
        }

        enqueued
    }
}
