// shaderdude
// copyright zipxing@hotmail.com 2022～2025

//! Log module, reference
//! https://docs.rs/log4rs
//!
//! Diagnostics (shader compile errors in particular) go to stderr; a log
//! file can be added through the config.

use crate::error::ViewerError;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// init logs system
pub fn init_log(level: LevelFilter, file_path: Option<&str>) -> Result<(), ViewerError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();

    let mut config = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = file_path {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
            )))
            .build(path)
            .map_err(|e| ViewerError::Log(format!("{}: {}", path, e)))?;
        config = config.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    let config = config
        .build(root.build(level))
        .map_err(|e| ViewerError::Log(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| ViewerError::Log(e.to_string()))?;
    Ok(())
}
