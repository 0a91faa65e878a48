//! # Console Logging
//!
//! `tracing-subscriber` fmt output routed to the browser console, one
//! `console.*` call per event, picked by level.

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// Console method an event is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

impl From<Level> for ConsoleMethod {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Debug,
        }
    }
}

/// Buffers one formatted event and emits it on drop
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    pub fn new(method: ConsoleMethod) -> Self {
        Self {
            method,
            buffer: Vec::new(),
        }
    }

    /// The buffered event without its trailing newline, if any
    fn line(&self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.buffer);
        let text = text.trim_end();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = self.line() else {
            return;
        };
        let line = JsValue::from_str(&line);
        match self.method {
            ConsoleMethod::Error => web_sys::console::error_1(&line),
            ConsoleMethod::Warn => web_sys::console::warn_1(&line),
            ConsoleMethod::Info => web_sys::console::info_1(&line),
            ConsoleMethod::Debug => web_sys::console::debug_1(&line),
        }
    }
}

/// `MakeWriter` handing out a [`ConsoleWriter`] per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::Info)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(ConsoleMethod::from(*meta.level()))
    }
}

/// Install the console subscriber. Safe to call more than once.
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
