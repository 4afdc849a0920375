//! Link priority scoring
//!
//! Each link on a page gets a priority from a domain-diversity heuristic:
//!
//! | Link host | Priority |
//! |-----------|----------|
//! | Substring of the page's base host (same site) | `max_links` |
//! | Already in the domain registry | `max_links` |
//! | Anything else (first sighting) | the link's shuffled rank, in `[0, max_links)` |
//!
//! Classification and scoring are pure queries. Registering a first-seen host
//! is a separate step the coordinator performs for [`LinkClass::NewDomain`]
//! links only.

use crate::state::DomainRegistry;
use rand::seq::SliceRandom;
use rand::Rng;

/// How a link relates to the page it was found on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Link host is part of the page's base host
    SameSite,
    /// Link host already contributed a new-domain priority
    SeenDomain,
    /// Link host has never been scored before
    NewDomain,
}

/// Assigns frontier priorities to discovered links
#[derive(Debug, Clone, Copy)]
pub struct PriorityScorer {
    max_links: u32,
}

impl PriorityScorer {
    /// Creates a scorer whose least urgent priority is `max_links`
    pub fn new(max_links: u32) -> Self {
        Self { max_links }
    }

    /// The deprioritized value given to same-site and seen-domain links
    pub fn max_links(&self) -> u32 {
        self.max_links
    }

    /// Classifies a link host against the page's base host and the registry
    pub fn classify(&self, link_host: &str, base_host: &str, registry: &DomainRegistry) -> LinkClass {
        if base_host.contains(link_host) {
            LinkClass::SameSite
        } else if registry.is_seen(link_host) {
            LinkClass::SeenDomain
        } else {
            LinkClass::NewDomain
        }
    }

    /// Priority for a classified link with the given candidate rank
    pub fn priority(&self, class: LinkClass, candidate: u32) -> u32 {
        match class {
            LinkClass::NewDomain => candidate,
            LinkClass::SameSite | LinkClass::SeenDomain => self.max_links,
        }
    }

    /// Classifies and scores in one call, without touching the registry
    pub fn score(
        &self,
        link_host: &str,
        base_host: &str,
        candidate: u32,
        registry: &DomainRegistry,
    ) -> u32 {
        self.priority(self.classify(link_host, base_host, registry), candidate)
    }
}

/// A per-page random permutation of `0..max_links`
///
/// The link at position `i` on a page gets candidate rank `rank(i)`, so
/// first-seen domains on the same page are ordered randomly but never tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankPermutation {
    ranks: Vec<u32>,
}

impl RankPermutation {
    /// Draws a fresh permutation of `0..max_links`
    pub fn shuffled<R: Rng + ?Sized>(max_links: u32, rng: &mut R) -> Self {
        let mut ranks: Vec<u32> = (0..max_links).collect();
        ranks.shuffle(rng);
        Self { ranks }
    }

    /// Candidate rank for the link at `position`
    ///
    /// Positions past the end get `max_links`, the least urgent value.
    pub fn rank(&self, position: usize) -> u32 {
        self.ranks
            .get(position)
            .copied()
            .unwrap_or(self.ranks.len() as u32)
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}
