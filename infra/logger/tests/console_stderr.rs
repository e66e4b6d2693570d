use rsvp_logger::{LevelFilter, Logger};

#[test]
fn stderr_console_logger_initializes() {
    let logger = Logger::builder()
        .name("rsvp-console-stderr")
        .stderr(true)
        .level(LevelFilter::WARN)
        .init()
        .expect("logger should initialize");

    tracing::warn!("written to stderr");
    assert!(logger.guard().is_none());
}
