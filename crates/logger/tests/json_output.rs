use std::sync::Arc;

use zlog::{Logger, Severity, Sugar};
use zlog_schema::{DynamicMessage, FieldDescriptor, Kind, MessageDescriptor, Value};
use zlog_sink::{SharedBuffer, SinkConfig};

fn order(id: &str) -> DynamicMessage {
    let line = MessageDescriptor::builder("shop.v1.Line")
        .field(FieldDescriptor::singular("sku", 1, Kind::String))
        .field(FieldDescriptor::singular("qty", 2, Kind::Int32))
        .build()
        .unwrap();
    let order = MessageDescriptor::builder("shop.v1.Order")
        .field(FieldDescriptor::singular("id", 1, Kind::String))
        .field(FieldDescriptor::list("lines", 2, Kind::Message))
        .field(FieldDescriptor::singular("note", 3, Kind::String))
        .build()
        .unwrap();

    let first = DynamicMessage::new(line.clone())
        .with("sku", "A-1")
        .unwrap()
        .with("qty", 2i32)
        .unwrap();
    let second = DynamicMessage::new(line).with("sku", "B-7").unwrap();

    DynamicMessage::new(order)
        .with("id", id)
        .unwrap()
        .with("lines", Value::list([first, second]))
        .unwrap()
}

#[test]
fn typed_logger_writes_event_json() {
    let buf = SharedBuffer::new();
    let sink = Arc::new(SinkConfig::json("orders").writer(buf.clone()).build());
    let logger = Logger::new(sink, "ORDER", Severity::Info);

    logger.debug("hidden", &order("o-0"));
    logger.info("placed", &order("o-1"));
    logger.error("rejected", &order("o-2"));
    logger.sync().unwrap();

    let lines = buf.lines();
    assert_eq!(lines.len(), 2);

    let placed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(placed["level"], "INFO");
    assert_eq!(placed["name"], "orders");
    assert_eq!(placed["message"], "placed");
    assert_eq!(placed["kind"], "ORDER");
    assert_eq!(placed["event"]["id"], "o-1");
    assert_eq!(placed["event"]["lines"][0]["sku"], "A-1");
    assert_eq!(placed["event"]["lines"][0]["qty"], 2);
    assert!(placed["event"]["lines"][1].get("qty").is_none());
    assert!(placed["event"].get("note").is_none());

    let rejected: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(rejected["level"], "ERROR");
    assert!(rejected.get("kind").is_none());
    assert!(rejected.get("caller").is_none());

    let keys: Vec<&str> = rejected
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert!(keys.contains(&"timestamp"));
    assert!(keys.contains(&"event"));
}

#[test]
fn sugar_writes_inline_fields() {
    let buf = SharedBuffer::new();
    let sink = Arc::new(SinkConfig::json("jobs").writer(buf.clone()).build());
    let sugar = Sugar::new(sink, "jobs", Severity::Warning);

    sugar.info_with("ignored", [("n", 1i32)]);
    sugar.warn_with("slow job", [("job", "reindex")]);
    sugar.error(format_args!("job {} failed", 7));

    let lines = buf.lines();
    assert_eq!(lines.len(), 2);

    let slow: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(slow["level"], "WARN");
    assert_eq!(slow["job"], "reindex");
    assert!(slow.get("event").is_none());

    let failed: serde_json::Value = serde_json::from_str(&lines[1]).unwrap();
    assert_eq!(failed["message"], "job 7 failed");
}
