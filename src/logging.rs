//! log4rs setup.

use crate::config::{DEFAULT_LOG_CONFIG, LOG_CONFIG_ENV};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;

/// Initialize logging from the log4rs config file, falling back to warnings
/// on stderr when the file can't be loaded. stdout is reserved for the
/// router configuration.
pub fn init_logging() -> Result<(), Box<dyn Error>> {
    let config_file =
        std::env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string());

    match log4rs::init_file(&config_file, Default::default()) {
        Ok(()) => {
            log::debug!("Logging initialized from {config_file}");
            Ok(())
        }
        Err(e) => {
            let stderr = ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new("{h({l:5})} {t} - {m}{n}")))
                .build();
            let config = Config::builder()
                .appender(Appender::builder().build("stderr", Box::new(stderr)))
                .build(Root::builder().appender("stderr").build(LevelFilter::Warn))?;
            log4rs::init_config(config)?;
            log::debug!("No log config loaded from {config_file}: {e}");
            Ok(())
        }
    }
}
