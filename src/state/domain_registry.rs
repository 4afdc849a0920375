use std::collections::HashSet;

/// Hosts that have already contributed a "new domain" priority this run
///
/// Hosts are only ever added; the registry is never cleared during a run.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    seen: HashSet<String>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `host` has been marked seen
    pub fn is_seen(&self, host: &str) -> bool {
        self.seen.contains(host)
    }

    /// Marks `host` as seen
    ///
    /// # Returns
    ///
    /// * `true` - The host was not seen before
    /// * `false` - The host was already registered
    pub fn mark_seen(&mut self, host: &str) -> bool {
        if self.seen.contains(host) {
            return false;
        }
        self.seen.insert(host.to_string())
    }

    /// Number of registered hosts
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
