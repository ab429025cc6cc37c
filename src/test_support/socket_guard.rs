use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "ORCID_ENRICHER_REQUIRE_SOCKET_TESTS";

/// Starts a mock registry, or returns `None` when localhost cannot be bound.
///
/// Panics instead of skipping when `ORCID_ENRICHER_REQUIRE_SOCKET_TESTS` is set
/// to a truthy value.
#[track_caller]
pub fn start_mock_server_or_skip() -> impl Future<Output = Option<MockServer>> {
    let bindable = TcpListener::bind("127.0.0.1:0").is_ok();
    if !bindable {
        let caller = std::panic::Location::caller();
        let required = std::env::var(REQUIRE_ENV)
            .is_ok_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
        assert!(
            !required,
            "localhost unavailable for mock registry at {caller} and {REQUIRE_ENV} is set"
        );
        eprintln!("skipping mock registry test at {caller}: localhost unavailable");
    }
    async move {
        if bindable {
            Some(MockServer::start().await)
        } else {
            None
        }
    }
}
