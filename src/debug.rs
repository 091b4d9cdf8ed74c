//! Debug logging for par-jump.
//!
//! par-jump runs inside tmux with its stdout captured by the plugin, so log
//! records must never reach stdout or stderr. Everything sent through the
//! `log` facade goes to `par_jump_debug.log` in the temp directory instead.
//!
//! The level comes from `--log-level`, then `RUST_LOG`; logging is off when
//! neither is set.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Path of the debug log.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("par_jump_debug.log")
}

struct DebugFile {
    file: Option<File>,
}

impl DebugFile {
    fn open() -> Self {
        // Silently go without a log file rather than disturb the pane
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(log_path())
            .ok();
        let mut debug_file = DebugFile { file };
        debug_file.write_raw(&format!(
            "{}\npar-jump {} started at {} (pid {})\n",
            "=".repeat(80),
            env!("CARGO_PKG_VERSION"),
            get_timestamp(),
            std::process::id()
        ));
        debug_file
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }
}

static DEBUG_FILE: OnceLock<Mutex<DebugFile>> = OnceLock::new();

fn get_debug_file() -> &'static Mutex<DebugFile> {
    DEBUG_FILE.get_or_init(|| Mutex::new(DebugFile::open()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Format one record the way it appears in the log file.
fn format_record(timestamp: &str, record: &Record) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}\n",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}

/// `log::Log` implementation writing to the debug file.
struct LogBridge;

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(&get_timestamp(), record);
        get_debug_file().lock().write_raw(&line);
    }

    fn flush(&self) {}
}

static LOG_BRIDGE: LogBridge = LogBridge;

/// Level from `RUST_LOG`, if it holds a plain level name.
fn level_from_env() -> Option<LevelFilter> {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
}

/// Route the `log` facade to the debug file.
///
/// `cli_level` wins over `RUST_LOG`. Calling this more than once keeps the
/// first logger.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let level = cli_level
        .or_else(level_from_env)
        .unwrap_or(LevelFilter::Off);
    if level == LevelFilter::Off {
        return;
    }
    if log::set_logger(&LOG_BRIDGE).is_ok() {
        log::set_max_level(level);
    }
}
