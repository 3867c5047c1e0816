use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "exhibit.log";

/// Status bar message forwarded from the logger
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: Level,
    pub message: String,
    pub timestamp: Instant,
}

/// Logger writing to a daily log file and, above a threshold, to the status bar
struct DeskLogger {
    file_writer: Arc<Mutex<RollingFileAppender>>,
    flash_tx: Option<Arc<Mutex<Sender<FlashMessage>>>>,
    file_level: LevelFilter,
    flash_level: LevelFilter,
}

impl Log for DeskLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.file_level || metadata.level() <= self.flash_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("{}", record.args());
        let level = record.level();

        if level <= self.file_level
            && let Ok(mut writer) = self.file_writer.lock()
        {
            let _ = writeln!(writer, "{}", format_line(level, record.target(), &message));
        }

        if level <= self.flash_level
            && let Some(tx) = &self.flash_tx
            && let Ok(tx) = tx.lock()
        {
            let _ = tx.send(FlashMessage {
                level,
                message,
                timestamp: Instant::now(),
            });
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.file_writer.lock() {
            let _ = writer.flush();
        }
    }
}

fn format_line(level: Level, target: &str, message: &str) -> String {
    format!(
        "{} [{}] {}: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        target,
        message
    )
}

/// Parse log level string to LevelFilter, defaulting to Info
pub fn parse_level(level_str: &str) -> LevelFilter {
    match level_str.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Default log file location
pub fn log_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join(LOG_FILE_NAME)
}

/// Install the global logger for the terminal UI
///
/// Records go to a daily-rotated file; records at or above `flash_level`
/// are also sent to `flash_tx` for the status bar.
pub fn init_logger(
    log_file_path: PathBuf,
    flash_tx: Option<Sender<FlashMessage>>,
    file_level: &str,
    flash_level: &str,
) -> Result<()> {
    let log_dir = log_file_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path {:?}", log_file_path))?;
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(
            log_file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("exhibit"),
        )
        .filename_suffix(
            log_file_path
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("log"),
        )
        .build(log_dir)
        .context("Failed to create rotating file appender")?;

    let file_level = parse_level(file_level);
    let flash_level = parse_level(flash_level);

    let logger = DeskLogger {
        file_writer: Arc::new(Mutex::new(file_appender)),
        flash_tx: flash_tx.map(|tx| Arc::new(Mutex::new(tx))),
        file_level,
        flash_level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(file_level.max(flash_level));

    Ok(())
}
