//! Shared User-Agent string for registry HTTP clients.

/// Default User-Agent for registry requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_registry_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("orcid-enricher/{version} (research-tool)")
}
