//! External engine collaborators.
//!
//! The builder never touches audio. It hands a finished argument list to an [`Engine`] (batch
//! processing, `sox`) or a [`Player`] (live preview, `play`).

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::Context as _;

use crate::foundation::error::SoxResult;

/// What the engine reported after running.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Process exit status. `0` is success.
    pub status: i32,
    /// Captured standard output, `None` when empty.
    pub stdout: Option<String>,
    /// Captured standard error, `None` when empty.
    pub stderr: Option<String>,
}

impl EngineOutput {
    /// `true` when the exit status is zero.
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs a full SoX argument list (program name excluded) to completion.
pub trait Engine: Send + Sync {
    /// Execute and capture the result. Only failures to *launch* are errors here; a non-zero
    /// exit status is reported through [`EngineOutput::status`].
    fn execute(&self, args: &[String]) -> SoxResult<EngineOutput>;
}

/// Launches playback. `args[0]` names the program (normally `play`).
pub trait Player: Send + Sync {
    /// Start playback and wait for the player to exit.
    fn play(&self, args: &[String]) -> SoxResult<()>;
}

/// The system `sox` and `play` binaries.
#[derive(Clone, Debug)]
pub struct SystemSox {
    /// Program used by [`Engine::execute`].
    pub sox_bin: PathBuf,
    /// Program used by [`Player::play`] when `args[0]` is `play`.
    pub play_bin: PathBuf,
}

impl Default for SystemSox {
    fn default() -> Self {
        Self {
            sox_bin: PathBuf::from("sox"),
            play_bin: PathBuf::from("play"),
        }
    }
}

impl SystemSox {
    /// Use explicit program paths.
    pub fn new(sox_bin: impl Into<PathBuf>, play_bin: impl Into<PathBuf>) -> Self {
        Self {
            sox_bin: sox_bin.into(),
            play_bin: play_bin.into(),
        }
    }
}

impl Engine for SystemSox {
    fn execute(&self, args: &[String]) -> SoxResult<EngineOutput> {
        tracing::debug!(program = %self.sox_bin.display(), ?args, "spawning sox");
        let output = Command::new(&self.sox_bin)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .with_context(|| {
                format!(
                    "failed to spawn '{}' (is SoX installed and on PATH?)",
                    self.sox_bin.display()
                )
            })?;

        Ok(EngineOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: non_empty(&output.stdout),
            stderr: non_empty(&output.stderr),
        })
    }
}

impl Player for SystemSox {
    fn play(&self, args: &[String]) -> SoxResult<()> {
        let (program, rest) = match args.split_first() {
            Some((first, rest)) if first == "play" => (self.play_bin.clone(), rest),
            Some((first, rest)) => (PathBuf::from(first), rest),
            None => (self.play_bin.clone(), args),
        };
        tracing::debug!(program = %program.display(), args = ?rest, "spawning player");
        let status = Command::new(&program)
            .args(rest)
            .status()
            .with_context(|| format!("failed to spawn '{}'", program.display()))?;
        if !status.success() {
            tracing::warn!(%status, "player exited unsuccessfully");
        }
        Ok(())
    }
}

fn non_empty(bytes: &[u8]) -> Option<String> {
    let s = String::from_utf8_lossy(bytes);
    let s = s.trim_end();
    (!s.is_empty()).then(|| s.to_string())
}

/// Return `true` when `sox` can be invoked from `PATH`.
pub fn is_sox_on_path() -> bool {
    Command::new("sox")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
