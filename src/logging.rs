use std::time::SystemTime;

use fern::Dispatch;

use crate::config::LoggingConfig;

/// installs the global logger. Everything goes to stdout, and to the configured log file if there is one.
///
/// Returns an error if a logger has already been installed or the log file can't be opened
pub fn init_logging(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let mut dispatch = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(config.level_filter())
        // rocket is very chatty at info
        .level_for("rocket", log::LevelFilter::Warn)
        .level_for("_", log::LevelFilter::Warn)
        .chain(std::io::stdout());
    if let Some(file) = &config.file {
        dispatch = dispatch.chain(fern::log_file(file)?);
    }
    dispatch.apply()?;
    log::info!("Logging initialized at level {}", config.level_filter());
    Ok(())
}
