//! Domain registry keyed by FQDN

use indexmap::IndexMap;
use types::utils::extract_hostname;
use types::{Domain, DomainAvailability, DomainError, DomainId, Health};

/// Owns every domain seen by the monitor, in first-seen order
#[derive(Debug, Default, Clone)]
pub struct DomainRegistry {
    domains: IndexMap<String, Domain>,
}

impl DomainRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the domain for a URL's host.
    ///
    /// Existing domains keep their counters; new ones start at zero and are
    /// appended after every domain already known.
    pub fn resolve(&mut self, raw_url: &str) -> Result<DomainId, DomainError> {
        if raw_url.is_empty() {
            return Err(DomainError::EmptyUrl);
        }

        let hostname = extract_hostname(raw_url).map_err(|e| DomainError::UrlParse {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        let entry = self.domains.entry(hostname);
        let id = DomainId(entry.index());
        entry.or_insert_with_key(|name| {
            tracing::debug!(domain = %name, "Registered new domain");
            Domain::new(name.clone())
        });

        Ok(id)
    }

    /// Look up a domain by handle
    pub fn get(&self, id: DomainId) -> Option<&Domain> {
        self.domains.get_index(id.0).map(|(_, domain)| domain)
    }

    /// Look up a domain by name
    pub fn get_by_name(&self, name: &str) -> Option<&Domain> {
        self.domains.get(name)
    }

    /// Record a check outcome; unset or unknown handles are ignored
    pub fn record(&mut self, id: Option<DomainId>, health: Health) {
        let Some(id) = id else {
            return;
        };
        if let Some((_, domain)) = self.domains.get_index_mut(id.0) {
            domain.record(health);
        }
    }

    /// Domains in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Domain> {
        self.domains.values()
    }

    /// Availability for every named domain, in insertion order
    pub fn availability(&self) -> Vec<DomainAvailability> {
        self.iter()
            .filter(|domain| !domain.name().is_empty())
            .map(|domain| DomainAvailability {
                domain: domain.name().to_string(),
                percentage: domain.availability(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Resolve a URL against a registry that may not exist
pub fn resolve_domain(
    registry: Option<&mut DomainRegistry>,
    raw_url: &str,
) -> Result<DomainId, DomainError> {
    registry
        .ok_or(DomainError::RegistryUnavailable)?
        .resolve(raw_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_domain_is_created() {
        let mut registry = DomainRegistry::new();
        let id = registry.resolve("http://example.com/").unwrap();

        let domain = registry.get(id).unwrap();
        assert_eq!(domain.name(), "example.com");
        assert_eq!(domain.up_count(), 0);
        assert_eq!(domain.total_count(), 0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_existing_domain_is_reused_untouched() {
        let mut registry = DomainRegistry::new();
        let first = registry.resolve("http://example.com/").unwrap();
        registry.record(Some(first), Health::Up);

        let second = registry.resolve("http://example.com/other/path").unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);

        let domain = registry.get(second).unwrap();
        assert_eq!(domain.up_count(), 1);
        assert_eq!(domain.total_count(), 1);

        // Updates through either handle land on the same entity
        registry.record(Some(second), Health::Down);
        assert_eq!(registry.get(first).unwrap().total_count(), 2);
    }

    #[test]
    fn test_distinct_hosts_are_distinct_domains() {
        let mut registry = DomainRegistry::new();
        let fetch = registry.resolve("https://fetch.com/").unwrap();
        let example = registry.resolve("http://example.com/").unwrap();
        let www = registry.resolve("http://www.example.com/").unwrap();

        assert_ne!(fetch, example);
        assert_ne!(example, www);

        let names: Vec<_> = registry.iter().map(|d| d.name().to_string()).collect();
        assert_eq!(names, vec!["fetch.com", "example.com", "www.example.com"]);
    }

    #[test]
    fn test_resolve_errors() {
        let mut registry = DomainRegistry::new();
        assert_eq!(registry.resolve(""), Err(DomainError::EmptyUrl));
        assert!(matches!(
            registry.resolve("://missing-scheme"),
            Err(DomainError::UrlParse { .. })
        ));
        assert!(registry.is_empty());

        assert_eq!(
            resolve_domain(None, "http://example.com/"),
            Err(DomainError::RegistryUnavailable)
        );
        assert!(resolve_domain(Some(&mut registry), "http://example.com/").is_ok());
    }

    #[test]
    fn test_record_without_domain_is_noop() {
        let mut registry = DomainRegistry::new();
        let id = registry.resolve("http://example.com/").unwrap();

        registry.record(None, Health::Up);
        registry.record(Some(DomainId(42)), Health::Up);

        assert_eq!(registry.get(id).unwrap().total_count(), 0);
    }

    #[test]
    fn test_availability_skips_unnamed_domains() {
        let mut registry = DomainRegistry::new();
        let example = registry.resolve("http://example.com/").unwrap();
        let unnamed = registry.resolve("mailto:ops@example.com").unwrap();
        let local = registry.resolve("http://localhost:8080/").unwrap();

        registry.record(Some(example), Health::Up);
        registry.record(Some(example), Health::Down);
        registry.record(Some(unnamed), Health::Up);
        registry.record(Some(local), Health::Up);
        registry.record(Some(local), Health::Up);
        registry.record(Some(local), Health::Down);

        let lines: Vec<_> = registry.availability().iter().map(|l| l.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "example.com has 50% availability percentage",
                "localhost has 67% availability percentage",
            ]
        );
    }

    #[test]
    fn test_zero_checks_reports_zero() {
        let mut registry = DomainRegistry::new();
        registry.resolve("http://example.com/").unwrap();

        let lines = registry.availability();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].percentage, 0);
    }
}
