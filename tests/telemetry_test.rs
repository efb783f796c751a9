//! Integration tests for telemetry initialization and span helpers.

use offer_revive::error::Error;

#[test]
fn telemetry_initializes_without_endpoint() {
    let config = offer_revive::telemetry::TelemetryConfig {
        endpoint: None,
        service_name: "offer-revive-test".to_string(),
        log_level: "debug".to_string(),
    };

    // A global subscriber can only be set once per process, so a second
    // init in the same binary reports it instead of panicking.
    match offer_revive::telemetry::init_telemetry(config) {
        Ok(guard) => guard.force_flush(),
        Err(Error::Other(msg)) => assert!(
            msg.contains("failed to init tracing subscriber"),
            "unexpected error: {msg}"
        ),
        Err(e) => panic!("unexpected error: {e}"),
    }
}

#[test]
fn cycle_span_creates_and_records_outcome() {
    let subscriber = tracing_subscriber::registry();
    tracing::subscriber::with_default(subscriber, || {
        let span = offer_revive::telemetry::cycle::start_cycle_span(1, "plan.toml");
        assert!(!span.is_disabled());
        assert_eq!(span.metadata().map(|m| m.name()), Some("revive.cycle"));
        assert!(span.metadata().unwrap().fields().field("revive.outcome").is_some());
        offer_revive::telemetry::cycle::record_outcome(&span, "revived");
    });
}

#[test]
fn metric_instruments_build_without_provider() {
    use opentelemetry::KeyValue;

    offer_revive::telemetry::metrics::revive_cycles().add(1, &[KeyValue::new("outcome", "no_change")]);
    offer_revive::telemetry::metrics::offers_revived().add(1, &[]);
    offer_revive::telemetry::metrics::revives_throttled().add(1, &[]);
    offer_revive::telemetry::metrics::cycle_errors().add(1, &[KeyValue::new("stage", "source")]);
}
