//! Helpers shared by the command line front-ends.
use log::LevelFilter;

/// Parses the arguments, returns the arguments and the launch time.
///
/// Nothing is logged here as the logger depends on the arguments; call
/// [`log_launch`] once [`setup_logging`] has run.
pub fn parse_args<T: clap::Parser>() -> (T, std::time::SystemTime) {
    (T::parse(), std::time::SystemTime::now())
}

/// Message announcing the launch of the program `name` at `launch_time`.
pub fn launch_message(name: &str, launch_time: std::time::SystemTime) -> String {
    format!(
        "{} launched at {} on {}.",
        name,
        chrono::DateTime::<chrono::Utc>::from(launch_time),
        std::env::consts::OS
    )
}

/// Logs the launch of the program at the info level.
pub fn log_launch(name: &str, launch_time: std::time::SystemTime) {
    log::info!("{}", launch_message(name, launch_time));
}

/// A filter for the logger.
///
/// This is a tuple of a module name and a log level filter.
pub type LogFilter<'a> = (&'a str, LevelFilter);

/// Initialises logging settings.
///
/// # Arguments
///
/// * `timestamp` - Whether to print the timestamp in the log; This is the base
///   time for the timestamp.
/// * `log_level` - The log level to filter. This is the top level log level for
///   the program. See [`log_filter_from_level`] for more details.
/// * `filters` - The filters to apply to the logger.
pub fn setup_logging(
    timestamp: Option<std::time::SystemTime>,
    log_level: u8,
    filters: &[LogFilter],
) {
    use std::io::Write;
    let mut builder = env_logger::builder();
    builder.format(move |buf, record| {
        let top_level_module = record
            .module_path()
            .and_then(|path| path.split("::").next())
            .unwrap_or("roughscat");
        match timestamp {
            Some(timestamp) => {
                let duration = timestamp.elapsed().unwrap_or_default();
                let millis = duration.as_millis() % 1000;
                let seconds = duration.as_secs() % 60;
                let minutes = (duration.as_secs() / 60) % 60;
                let hours = (duration.as_secs() / 60) / 60;
                writeln!(
                    buf,
                    "{}:{}:{}.{:03} {:5} [{}]: {}",
                    hours,
                    minutes,
                    seconds,
                    millis,
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
            None => {
                writeln!(
                    buf,
                    "{:5} [{}]: {}",
                    record.level(),
                    top_level_module,
                    record.args()
                )
            },
        }
    });
    for (module, level) in filters {
        builder.filter(Some(module), *level);
    }
    builder
        .filter_level(log_filter_from_level(log_level))
        .init();
}

/// Converts a log level to a log filter.
///
/// 0 - error, 1 - warn, 2 - info, 3 - debug, anything above - trace.
pub fn log_filter_from_level(level: u8) -> LevelFilter {
    match level {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_mapping() {
        assert_eq!(log_filter_from_level(0), LevelFilter::Error);
        assert_eq!(log_filter_from_level(2), LevelFilter::Info);
        assert_eq!(log_filter_from_level(9), LevelFilter::Trace);
    }

    #[test]
    fn launch_message_names_program_and_time() {
        let launch_time = std::time::UNIX_EPOCH + std::time::Duration::from_secs(86_400);
        let message = launch_message("roughscat", launch_time);
        assert!(message.starts_with("roughscat launched at 1970-01-02 00:00:00 UTC"));
        assert!(message.ends_with(&format!("on {}.", std::env::consts::OS)));
    }
}
