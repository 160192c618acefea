//! Backend sender
//!
//! Keeps a `dotoolc` process alive and feeds it action lines over stdin.
//! Transport failures are recovered by restarting the process once and
//! resending once; a line that still cannot be delivered is dropped.

use crate::chord::Action;
use crate::config::Config;
use crate::error::{ForwardError, ForwardResult};
use std::io::Write;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// How long a closed backend gets to exit on its own before it is killed
const EXIT_GRACE: Duration = Duration::from_millis(500);

/// Anything that accepts dotool action lines
pub trait ActionSink {
    /// Deliver one line (without the trailing newline)
    fn send_line(&mut self, line: &str) -> ForwardResult<()>;

    /// Deliver a batch of actions in order
    fn send_actions(&mut self, actions: &[Action]) -> ForwardResult<()> {
        for action in actions {
            self.send_line(&action.to_string())?;
        }
        Ok(())
    }
}

/// Persistent connection to the dotool client process
#[derive(Debug)]
pub struct DotoolSender {
    command: Vec<String>,
    child: Option<Child>,
}

impl DotoolSender {
    /// Create a sender for `command` (program followed by its arguments).
    /// Nothing is spawned until the first line is sent.
    pub fn new(command: Vec<String>) -> Self {
        Self {
            command,
            child: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.dotool_command.clone())
    }

    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// Is there a live backend process with an open stdin?
    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => child.stdin.is_some() && matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }

    /// Stop the backend process, if any
    pub fn close(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        // Closing stdin lets the client exit cleanly
        drop(child.stdin.take());

        let start = Instant::now();
        while start.elapsed() < EXIT_GRACE {
            if let Ok(Some(status)) = child.try_wait() {
                debug!("dotool client exited with {}", status);
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }

        debug!("dotool client still running, killing (PID: {})", child.id());
        let _ = child.kill();
        let _ = child.wait();
    }

    fn spawn(&self) -> ForwardResult<Child> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| ForwardError::Config("dotool command is empty".to_string()))?;

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ForwardError::Spawn(format!("{}: {}", program, e)))?;

        info!("⌨️ Started dotool client (PID: {})", child.id());
        Ok(child)
    }

    fn ensure_process(&mut self) -> ForwardResult<&mut ChildStdin> {
        if !self.is_running() {
            self.close();
            self.child = Some(self.spawn()?);
        }

        self.child
            .as_mut()
            .and_then(|child| child.stdin.as_mut())
            .ok_or_else(|| ForwardError::Spawn("dotool client has no stdin".to_string()))
    }
}

impl ActionSink for DotoolSender {
    fn send_line(&mut self, line: &str) -> ForwardResult<()> {
        for attempt in 1..=2 {
            let stdin = match self.ensure_process() {
                Ok(stdin) => stdin,
                Err(e) => {
                    warn!("❌ dotool unavailable, dropping {:?}: {}", line, e);
                    self.close();
                    return Ok(());
                }
            };

            let result = writeln!(stdin, "{}", line).and_then(|_| stdin.flush());
            match result {
                Ok(()) => return Ok(()),
                Err(e) if attempt == 1 => {
                    debug!("dotool write failed, restarting client: {}", e);
                    self.close();
                }
                Err(e) => {
                    warn!("❌ dotool write error, dropping {:?}: {}", line, e);
                    self.close();
                }
            }
        }
        Ok(())
    }
}

impl Drop for DotoolSender {
    fn drop(&mut self) {
        self.close();
    }
}
