pub mod progress_sink;
pub mod watch_property;
