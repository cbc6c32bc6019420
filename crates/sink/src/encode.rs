//! Line encoders for the two layouts.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::{EncoderConfig, Layout, TimeFormat, epoch_seconds};
use crate::error::SinkError;
use crate::record::Record;

/// Render `record` as one newline-terminated line (plus a stack trace line
/// for console records that carry one).
pub fn encode_line(
    layout: Layout,
    cfg: &EncoderConfig,
    record: &Record,
) -> Result<Vec<u8>, SinkError> {
    match layout {
        Layout::Console => Ok(console_line(cfg, record).into_bytes()),
        Layout::Json => {
            let mut buf = serde_json::to_vec(&JsonLine { cfg, record })
                .map_err(|e| SinkError::Encode(e.to_string()))?;
            buf.push(b'\n');
            Ok(buf)
        }
    }
}

fn console_line(cfg: &EncoderConfig, record: &Record) -> String {
    let mut parts = vec![
        cfg.time_format.render(&record.time),
        cfg.level_format.render(record.severity),
    ];
    if !record.name.is_empty() {
        parts.push(record.name.clone());
    }
    if cfg.add_caller {
        if let Some(caller) = &record.caller {
            parts.push(caller.short());
        }
    }
    parts.push(record.message.clone());
    if !record.fields.is_empty() {
        // Field values are plain data; rendering them cannot fail.
        let fields = serde_json::to_string(&record.fields_object()).unwrap_or_default();
        parts.push(fields);
    }

    let mut line = parts.join("\t");
    if let Some(trace) = &record.stacktrace {
        line.push('\n');
        line.push_str(trace);
    }
    line.push('\n');
    line
}

struct JsonLine<'a> {
    cfg: &'a EncoderConfig,
    record: &'a Record,
}

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (cfg, record) = (self.cfg, self.record);
        let mut map = serializer.serialize_map(None)?;

        match cfg.time_format {
            TimeFormat::EpochSeconds => {
                map.serialize_entry(&cfg.time_key, &epoch_seconds(&record.time))?
            }
            other => map.serialize_entry(&cfg.time_key, &other.render(&record.time))?,
        }
        map.serialize_entry(&cfg.level_key, &cfg.level_format.render(record.severity))?;
        if !record.name.is_empty() {
            map.serialize_entry(&cfg.name_key, &record.name)?;
        }
        if cfg.add_caller {
            if let Some(caller) = &record.caller {
                map.serialize_entry(&cfg.caller_key, &caller.short())?;
            }
        }
        map.serialize_entry(&cfg.message_key, &record.message)?;
        for field in &record.fields {
            map.serialize_entry(&field.key, &field.value)?;
        }
        if let Some(trace) = &record.stacktrace {
            map.serialize_entry(&cfg.stacktrace_key, trace)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use zlog_core::Severity;
    use zlog_encoder::{Object, Value};

    use super::*;
    use crate::record::{Caller, Field};

    fn record(severity: Severity, name: &str) -> Record {
        let mut event = Object::new();
        event.insert("id", 7i32);
        Record {
            time: Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap(),
            severity,
            name: name.to_string(),
            message: "order placed".to_string(),
            caller: Some(Caller {
                file: "src/orders/place.rs",
                line: 12,
            }),
            stacktrace: None,
            fields: vec![
                Field::new("kind", "AUDIT"),
                Field::new("event", Value::Object(event)),
            ],
        }
    }

    #[test]
    fn json_line_orders_fixed_keys_before_fields() {
        let rec = record(Severity::Info, "orders");
        let line = encode_line(Layout::Json, &EncoderConfig::json(), &rec).unwrap();
        let text = String::from_utf8(line).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);
        let prefix = concat!(
            r#"{"timestamp":1700000000.5,"level":"INFO","name":"orders","#,
            r#""message":"order placed","kind":"AUDIT""#,
        );
        assert!(text.starts_with(prefix));

        let parsed: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(parsed["event"], json!({ "id": 7 }));
        // The JSON profile adds no caller.
        assert!(parsed.get("caller").is_none());
    }

    #[test]
    fn json_line_omits_empty_name() {
        let rec = record(Severity::Error, "");
        let line = encode_line(Layout::Json, &EncoderConfig::json(), &rec).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&line).unwrap();
        assert!(parsed.get("name").is_none());
        assert_eq!(parsed["level"], "ERROR");
    }

    #[test]
    fn console_line_is_tab_separated() {
        let mut cfg = EncoderConfig::console();
        cfg.level_format = crate::config::LevelFormat::Capital;
        let rec = record(Severity::Warning, "orders");
        let line = encode_line(Layout::Console, &cfg, &rec).unwrap();
        let text = String::from_utf8(line).unwrap();
        let cols: Vec<&str> = text.trim_end().split('\t').collect();

        assert_eq!(cols.len(), 6);
        assert_eq!(cols[1], "WARN");
        assert_eq!(cols[2], "orders");
        assert_eq!(cols[3], "orders/place.rs:12");
        assert_eq!(cols[4], "order placed");
        assert_eq!(cols[5], r#"{"kind":"AUDIT","event":{"id":7}}"#);
    }

    #[test]
    fn console_line_appends_stacktrace() {
        let mut rec = record(Severity::Fatal, "");
        rec.fields.clear();
        rec.stacktrace = Some("frame 0\nframe 1".to_string());
        let line = encode_line(Layout::Console, &EncoderConfig::console(), &rec).unwrap();
        let text = String::from_utf8(line).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().ends_with("order placed"));
        assert_eq!(lines.next(), Some("frame 0"));
    }
}
