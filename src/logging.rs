// src/logging.rs
//! Diagnostic sink handed to the store and the bootstrap.
//!
//! A `Diagnostics` value is a cheap, cloneable handle on a `log::Log`
//! implementation. It is passed in at construction instead of being looked up
//! from a global, so a test can give each store its own in-memory logger.
//!
//! Three flavours exist:
//! - `silent()`    discards everything (the default)
//! - `global()`    forwards to whatever `log::set_logger` installed
//! - `from_sink()` owns a shared `Arc<dyn Log>` (e.g. a fern dispatch)

use log::{Log, Metadata, Record};
use std::{fmt, sync::Arc};

#[derive(Clone)]
enum Sink {
    Silent,
    Global,
    Shared(Arc<dyn Log>),
}

/// Shared, read-only logging capability.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Sink,
}

impl Diagnostics {
    pub fn silent() -> Self {
        Diagnostics { sink: Sink::Silent }
    }

    pub fn global() -> Self {
        Diagnostics { sink: Sink::Global }
    }

    pub fn from_sink(sink: Arc<dyn Log>) -> Self {
        Diagnostics { sink: Sink::Shared(sink) }
    }
}

/// Silent: logging is opt-in.
impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::silent()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.sink {
            Sink::Silent    => "silent",
            Sink::Global    => "global",
            Sink::Shared(_) => "shared",
        };
        f.debug_struct("Diagnostics").field("sink", &kind).finish()
    }
}

impl Log for Diagnostics {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match &self.sink {
            Sink::Silent     => false,
            Sink::Global     => metadata.level() <= log::max_level() && log::logger().enabled(metadata),
            Sink::Shared(s)  => s.enabled(metadata),
        }
    }

    fn log(&self, record: &Record) {
        match &self.sink {
            Sink::Silent    => {}
            Sink::Global    => {
                if record.level() <= log::max_level() {
                    log::logger().log(record)
                }
            }
            Sink::Shared(s) => s.log(record),
        }
    }

    fn flush(&self) {
        match &self.sink {
            Sink::Silent    => {}
            Sink::Global    => log::logger().flush(),
            Sink::Shared(s) => s.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink_log;
    use log::Level;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Capture(Mutex<Vec<String>>);

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Info
        }
        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                self.0.lock().unwrap().push(format!("{}", record.args()));
            }
        }
        fn flush(&self) {}
    }

    #[test]
    fn shared_sink_receives_and_filters() {
        let capture = Arc::new(Capture::default());
        let diag = Diagnostics::from_sink(capture.clone());

        sink_log!(diag, Level::Info, "test", "kept {}", 1);
        sink_log!(diag, Level::Trace, "test", "dropped");

        let lines = capture.0.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("kept 1"), "{:?}", lines);
    }

    #[test]
    fn clones_share_one_sink() {
        let capture = Arc::new(Capture::default());
        let a = Diagnostics::from_sink(capture.clone());
        let b = a.clone();
        sink_log!(a, Level::Info, "a", "from a");
        sink_log!(b, Level::Info, "b", "from b");
        assert_eq!(capture.0.lock().unwrap().len(), 2);
        assert_eq!(Arc::strong_count(&capture), 3);
    }

    #[test]
    fn silent_sink_is_disabled() {
        let diag = Diagnostics::silent();
        assert!(!diag.enabled(&Metadata::builder().level(Level::Error).build()));
        sink_log!(diag, Level::Error, "test", "nobody hears this");
    }

    #[test]
    fn default_sink_does_not_reach_the_global_logger() {
        let diag = Diagnostics::default();
        assert_eq!(format!("{diag:?}"), r#"Diagnostics { sink: "silent" }"#);
        assert!(!diag.enabled(&Metadata::builder().level(Level::Error).build()));
    }
}
