use std::io::{self, Write};
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use zlog_core::{Severity, TraceId, color, new_id};
use zlog_encoder::Object;
use zlog_sink::{
    CaptureSink, Caller, EncoderConfig, Entry, Field, SharedBuffer, Sink, SinkConfig, SinkError,
    TracingSink,
};

fn event() -> Object {
    let mut obj = Object::new();
    obj.insert("user", "ada");
    obj.insert("attempts", 3u32);
    obj
}

#[test]
fn json_sink_writes_one_object_per_record() {
    let buf = SharedBuffer::new();
    let sink = SinkConfig::json("auth").writer(buf.clone()).build();

    sink.log(Entry::new(Severity::Info, "login").field(Field::new("event", event())));
    sink.log(Entry::new(Severity::Warning, "slow"));
    sink.flush().unwrap();

    let lines = buf.lines();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(first["level"], "INFO");
    assert_eq!(first["name"], "auth");
    assert_eq!(first["message"], "login");
    assert_eq!(first["event"]["user"], "ada");
    assert_eq!(first["event"]["attempts"], 3);
    assert!(first["timestamp"].is_f64());
    assert!(first.get("stacktrace").is_none());

    let second: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(second["level"], "WARN");
}

#[test]
fn json_sink_never_adds_caller_or_stacktrace() {
    let buf = SharedBuffer::new();
    let sink = SinkConfig::json("").writer(buf.clone()).build();

    sink.log(Entry::new(Severity::Fatal, "gone").with_caller(Caller::here()));

    let parsed: serde_json::Value = serde_json::from_str(&buf.lines()[0]).unwrap();
    assert!(parsed.get("caller").is_none());
    assert!(parsed.get("stacktrace").is_none());
    assert!(parsed.get("name").is_none());
}

#[test]
fn console_sink_adds_caller_and_fatal_stacktrace() {
    let buf = SharedBuffer::new();
    let sink = SinkConfig::console(color::Color::Green.paint("api"))
        .writer(buf.clone())
        .build();

    sink.log(Entry::new(Severity::Error, "bad request").with_caller(Caller::here()));
    sink.log(Entry::new(Severity::Fatal, "cannot bind").with_caller(Caller::here()));

    let out = color::strip(&buf.contents());
    let mut lines = out.lines();

    let error_line = lines.next().unwrap();
    let cols: Vec<&str> = error_line.split('\t').collect();
    assert_eq!(cols[1], "ERROR");
    assert_eq!(cols[2], "api");
    assert!(cols[3].starts_with("tests/sinks.rs:"));
    assert_eq!(cols[4], "bad request");

    let fatal_line = lines.next().unwrap();
    assert!(fatal_line.contains("FATAL"));
    // Everything after the fatal line is its stack trace.
    assert!(lines.next().is_some());
}

#[test]
fn concurrent_writes_do_not_interleave() {
    let buf = SharedBuffer::new();
    let sink = Arc::new(SinkConfig::json("load").writer(buf.clone()).build());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..50 {
                    sink.log(
                        Entry::new(Severity::Info, format!("t{t}-{i}"))
                            .field(("thread", t as i64))
                            .field(("payload", "x".repeat(64))),
                    );
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let lines = buf.lines();
    assert_eq!(lines.len(), 400);
    for line in lines {
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["payload"].as_str().unwrap().len(), 64);
    }
}

#[test]
fn reflected_fields_are_written_as_objects() {
    #[derive(Serialize)]
    struct Request<'a> {
        id: &'a str,
        trace: TraceId,
        path: &'a str,
        retries: u8,
    }

    let buf = SharedBuffer::new();
    let sink = SinkConfig::json("http").writer(buf.clone()).build();
    let id = new_id("req_");
    let trace = TraceId::new();
    let request = Request {
        id: &id,
        trace,
        path: "/orders",
        retries: 2,
    };

    sink.log(Entry::new(Severity::Info, "served").field(Field::reflect("request", &request)));

    let parsed: serde_json::Value = serde_json::from_str(&buf.lines()[0]).unwrap();
    assert_eq!(parsed["request"]["id"], id.as_str());
    assert_eq!(parsed["request"]["trace"], trace.to_string());
    assert_eq!(parsed["request"]["path"], "/orders");
    assert_eq!(parsed["request"]["retries"], 2);
}

/// Accepts writes and fails on flush, or fails both.
struct FailingWriter {
    fail_writes: bool,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.fail_writes {
            return Err(io::Error::other("disk gone"));
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk gone"))
    }
}

#[test]
fn flush_failure_surfaces_as_flush_error() {
    let sink = SinkConfig::json("io")
        .writer(FailingWriter { fail_writes: false })
        .build();
    sink.log(Entry::new(Severity::Info, "buffered"));

    let err = sink.flush().unwrap_err();
    assert!(matches!(err, SinkError::Flush(ref e) if e.to_string() == "disk gone"));
}

#[test]
fn write_failure_drops_the_record_without_panicking() {
    let sink = SinkConfig::console("io")
        .writer(FailingWriter { fail_writes: true })
        .build();
    sink.log(Entry::new(Severity::Error, "lost").with_caller(Caller::here()));
    sink.log(Entry::new(Severity::Info, "also lost"));

    assert!(matches!(sink.flush(), Err(SinkError::Flush(_))));
}

#[test]
fn capture_sink_follows_encoder_enrichment() {
    let plain = CaptureSink::new("svc");
    plain.log(Entry::new(Severity::Fatal, "x").with_caller(Caller::here()));
    let rec = &plain.records()[0];
    assert!(rec.caller.is_none());
    assert!(rec.stacktrace.is_none());

    let console = CaptureSink::new("svc").with_encoder(EncoderConfig::console());
    console.log(Entry::new(Severity::Fatal, "x").with_caller(Caller::here()));
    console.log(Entry::new(Severity::Error, "y").with_caller(Caller::here()));
    let recs = console.records();
    assert!(recs[0].caller.is_some());
    assert!(recs[0].stacktrace.is_some());
    assert!(recs[1].stacktrace.is_none());
}

#[test]
fn tracing_sink_forwards_to_subscriber() {
    let buf = SharedBuffer::new();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let sink = TracingSink::new("bridge");
    tracing::subscriber::with_default(subscriber, || {
        sink.log(Entry::new(Severity::Warning, "forwarded").field(("n", 1i32)));
    });

    let out = buf.contents();
    assert!(out.contains("WARN"));
    assert!(out.contains("forwarded"));
    assert!(out.contains("scope=\"bridge\"") || out.contains("scope=bridge"));
    assert!(sink.flush().is_ok());
}
