use sparc_audit::events::AuditEvent;
use sparc_audit::telemetry::Telemetry;

#[test]
fn recording_telemetry_stamps_session_and_user() {
    let telemetry = Telemetry::recording("user-123");
    telemetry.record(AuditEvent::new("create", "time_entry", "abc"));

    let events = telemetry.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].user_sub, "user-123");
    assert_eq!(events[0].session_id, telemetry.session_id().to_string());
    assert_eq!(events[0].action, "create");
}

#[test]
fn clones_share_the_recorded_events() {
    let telemetry = Telemetry::recording("user-123");
    let handle = telemetry.clone();
    handle.record(
        AuditEvent::new("delete", "time_entry", "abc")
            .with_details(serde_json::json!({ "count": 3 })),
    );

    let events = telemetry.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].details.as_ref().unwrap()["count"], 3);
}

#[test]
fn disabled_telemetry_records_nothing() {
    let telemetry = Telemetry::disabled();
    telemetry.record(AuditEvent::new("create", "time_entry", "abc"));
    assert!(telemetry.events().is_empty());
}

#[test]
fn plain_telemetry_keeps_no_history() {
    let telemetry = Telemetry::new("user-9");
    telemetry.record(AuditEvent::new("export", "time_entries", "all"));
    assert!(telemetry.events().is_empty());
    assert_eq!(telemetry.user_sub(), "user-9");
}

#[derive(Clone, Default)]
struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn emitted_event_carries_timestamp_and_json_details() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let mut event = AuditEvent::new("export", "time_entries", "sparc_entries.csv")
        .with_details(serde_json::json!({ "format": "csv" }));
    event.at = "2025-01-15T10:30:00Z".parse().unwrap();
    tracing::subscriber::with_default(subscriber, || event.emit());

    let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("audit.at=2025-01-15T10:30:00Z"));
    assert!(out.contains(r#"audit.details={"format":"csv"}"#));
    assert!(out.contains("audit event"));
}
