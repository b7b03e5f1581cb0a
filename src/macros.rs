
/// Emits one record through a [`Diagnostics`](crate::logging::Diagnostics)
/// sink, tagged with a component and the caller's source location.
/// Usage:
/// ```rust
/// use buried_point::{logging::Diagnostics, sink_log};
/// use log::Level;
///
/// let diag = Diagnostics::silent();
/// sink_log!(diag, Level::Info, "db", "Database ready at {}", "/tmp/x.db");
/// ```
/// The message body reads like:
/// [db] Database ready at /tmp/x.db
#[macro_export]
macro_rules! sink_log {
    ($sink:expr, $level:expr, $component:expr, $fmt:expr $(, $($arg:tt)+)?) => {{
        let level: $crate::__log::Level = $level;
        let sink: &$crate::logging::Diagnostics = &$sink;
        let enabled = $crate::__log::Log::enabled(
            sink,
            &$crate::__log::Metadata::builder()
                .level(level)
                .target(module_path!())
                .build(),
        );
        if enabled {
            $crate::__log::Log::log(
                sink,
                &$crate::__log::Record::builder()
                    .level(level)
                    .target(module_path!())
                    .module_path(Some(module_path!()))
                    .file(Some(file!()))
                    .line(Some(line!()))
                    .args(format_args!(
                        concat!("[", $component, "] ", $fmt)   // component, then message
                        $(, $($arg)+)?
                    ))
                    .build(),
            );
        }
    }};
}
