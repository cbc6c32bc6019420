//! Sink writing encoded lines to an `io::Write` destination.

use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::backend::Sink;
use crate::config::{EncoderConfig, Layout};
use crate::encode::encode_line;
use crate::error::SinkError;
use crate::record::{Entry, Record};

/// Sink over a locked writer.
///
/// Immutable after construction except for the writer, which sits behind a
/// mutex so concurrent records never interleave.
pub struct WriterSink {
    layout: Layout,
    encoder: EncoderConfig,
    scope: String,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl WriterSink {
    pub(crate) fn new(
        layout: Layout,
        encoder: EncoderConfig,
        scope: String,
        writer: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            layout,
            encoder,
            scope,
            writer: Mutex::new(writer),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn encoder_config(&self) -> &EncoderConfig {
        &self.encoder
    }

    fn write_record(&self, record: &Record) -> Result<(), SinkError> {
        let line = encode_line(self.layout, &self.encoder, record)?;
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.write_all(&line).map_err(SinkError::Write)
    }
}

impl Sink for WriterSink {
    fn name(&self) -> &str {
        &self.scope
    }

    fn log(&self, entry: Entry) {
        let stacktrace = self.encoder.wants_stacktrace(entry.severity);
        let record = Record::stamp(entry, &self.scope, stacktrace);
        if let Err(err) = self.write_record(&record) {
            tracing::warn!(scope = %self.scope, error = %err, "dropping log record");
        }
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut writer = self.writer.lock().map_err(|_| SinkError::Poisoned)?;
        writer.flush().map_err(SinkError::Flush)
    }
}

impl core::fmt::Debug for WriterSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WriterSink")
            .field("layout", &self.layout)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// Cloneable in-memory writer, handy for inspecting sink output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| std::io::Error::other("buffer lock poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
