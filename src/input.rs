//! Reading keys typed into a tmux prompt.
//!
//! tmux cannot hand a keypress to a process directly. Instead each key is
//! requested with `command-prompt`, whose template appends the key to a FIFO
//! that we block on. The FIFO lives in its own temporary directory, which is
//! removed on every path out of [`KeyReader::read_char`].

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::AsRawFd;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use par_jump_config::Config;
use par_jump_tmux::Host;
use tempfile::TempDir;

use crate::error::{InputError, JumpError, Result};

/// A FIFO in a private temporary directory, both removed on drop.
pub struct ReplyPipe {
    _dir: TempDir,
    path: PathBuf,
}

impl ReplyPipe {
    pub fn create() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("par-jump-").tempdir()?;
        let path = dir.path().join("reply");
        let c_path = CString::new(path.as_os_str().as_bytes())?;
        // SAFETY: c_path is NUL-terminated and outlives the call.
        if unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open for reading without waiting for a writer.
    fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK)
            .open(&self.path)
    }
}

/// Wait up to `timeout` for `file` to become readable.
fn poll_readable(file: &File, timeout: Duration) -> io::Result<bool> {
    let mut fds = libc::pollfd {
        fd: file.as_raw_fd(),
        events: libc::POLLIN,
        revents: 0,
    };
    let millis = timeout.as_millis().clamp(1, libc::c_int::MAX as u128) as libc::c_int;
    // SAFETY: fds is a single valid pollfd for the duration of the call.
    let rc = unsafe { libc::poll(&mut fds, 1, millis) };
    if rc < 0 {
        let err = io::Error::last_os_error();
        if err.kind() == io::ErrorKind::Interrupted {
            return Ok(false);
        }
        return Err(err);
    }
    Ok(rc > 0)
}

fn count_label(n: usize) -> String {
    if n == 1 {
        "1 char".to_string()
    } else {
        format!("{n} chars")
    }
}

/// `search for key (2 chars): a_`
pub fn key_prompt(typed: &str, key_length: usize) -> String {
    format!(
        "search for key ({}): {typed:_<key_length$}",
        count_label(key_length)
    )
}

/// `goto label (1 char): _`, `goto label (2 chars): f_` or `goto label (1~2 chars): __`
pub fn label_prompt(typed: &str, min_length: usize, max_length: usize) -> String {
    let count = if min_length == max_length {
        count_label(max_length)
    } else {
        format!("{min_length}~{max_length} chars")
    };
    format!("goto label ({count}): {typed:_<max_length$}")
}

/// Reads single keys through tmux prompts.
pub struct KeyReader {
    timeout: Duration,
    interrupted: Arc<AtomicBool>,
}

impl KeyReader {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Abort waiting as soon as `flag` is set, e.g. by a signal handler.
    pub fn with_interrupt_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupted = flag;
        self
    }

    /// Fail with [`InputError::Cancelled`] once an interrupt was received.
    pub fn check_interrupted(&self) -> std::result::Result<(), InputError> {
        if self.interrupted.load(Ordering::Relaxed) {
            return Err(InputError::Cancelled);
        }
        Ok(())
    }

    /// Prompt with `message` and wait for one key.
    pub fn read_char<H: Host + ?Sized>(&self, host: &mut H, message: &str) -> Result<String> {
        self.check_interrupted()?;
        let pipe = ReplyPipe::create().map_err(InputError::from)?;
        host.prompt_to_file(message, pipe.path())?;
        let key = self.wait_for_line(&pipe)?;
        log::debug!("prompt {:?} answered", message);
        Ok(key)
    }

    fn wait_for_line(&self, pipe: &ReplyPipe) -> std::result::Result<String, InputError> {
        let mut file = pipe.open()?;
        let deadline = Instant::now() + self.timeout;
        let mut buf = Vec::new();
        let mut chunk = [0u8; 64];

        loop {
            self.check_interrupted()?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(InputError::Timeout(self.timeout));
            }
            if !poll_readable(&file, remaining)? {
                continue;
            }
            match file.read(&mut chunk) {
                // writer closed
                Ok(0) => break,
                Ok(n) => {
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.contains(&b'\n') {
                        break;
                    }
                }
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let line = buf.split(|&b| b == b'\n').next().unwrap_or_default();
        if line.is_empty() {
            return Err(InputError::Cancelled);
        }
        Ok(String::from_utf8_lossy(line).into_owned())
    }

    /// The search key: the preset one if it has the right length, otherwise
    /// read one key at a time.
    pub fn read_key<H: Host + ?Sized>(&self, host: &mut H, config: &Config) -> Result<String> {
        if let Some(key) = config.preset_key() {
            return Ok(key.to_string());
        }
        let mut key = String::new();
        for _ in 0..config.key_length {
            let message = key_prompt(&key, config.key_length);
            key.push_str(&self.read_char(host, &message)?);
        }
        log::info!("search key {:?}", key);
        Ok(key)
    }

    /// Read keys until they spell one of `labels`.
    ///
    /// Input stops with [`JumpError::InvalidLabel`] once the typed text is no
    /// longer a prefix of any label or reaches the longest label's length.
    pub fn select_label<H: Host + ?Sized>(
        &self,
        host: &mut H,
        labels: &[String],
    ) -> Result<String> {
        let lengths = labels.iter().map(|l| l.chars().count());
        let min_length = lengths.clone().min().unwrap_or(0);
        let max_length = lengths.max().unwrap_or(0);

        let mut typed = String::new();
        loop {
            let message = label_prompt(&typed, min_length, max_length);
            typed.push_str(&self.read_char(host, &message)?);

            if labels.contains(&typed) {
                return Ok(typed);
            }
            let is_prefix = labels.iter().any(|l| l.starts_with(typed.as_str()));
            if !is_prefix || typed.chars().count() >= max_length {
                return Err(JumpError::InvalidLabel(typed));
            }
        }
    }
}
