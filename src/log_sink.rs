use std::fmt;
use std::sync::Arc;

/// Optional caller-supplied callback receiving human readable progress lines.
///
/// A default sink drops every message.
#[derive(Clone, Default)]
pub struct LogSink(Option<Arc<dyn Fn(&str) + Send + Sync>>);

impl LogSink {
    pub fn new(callback: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self(Some(Arc::new(callback)))
    }

    pub fn log(&self, message: &str) {
        if let Some(callback) = &self.0 {
            callback(message);
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogSink")
            .field(&self.0.as_ref().map(|_| "callback"))
            .finish()
    }
}

#[cfg(test)]
pub(crate) fn recording_sink() -> (LogSink, Arc<std::sync::Mutex<Vec<String>>>) {
    let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let sink = LogSink::new(move |line| captured.lock().unwrap().push(line.to_string()));
    (sink, lines)
}
