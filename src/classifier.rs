//! External classifier invocation.
//!
//! A classifier gives a binary verdict about a file (e.g. malicious/benign).
//! The only implementation here shells out to an external program, but the
//! [`Classifier`] trait keeps the analyzer agnostic so an in-process model
//! can be substituted later.

use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Default bound on how long an external classifier may run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Benign,
    Malicious,
}

/// Errors from invoking a classifier. All of these are non-fatal to report
/// generation; the analyzer logs them and leaves the classification unset.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to launch classifier `{program}`")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to collect classifier output")]
    Io(#[source] io::Error),
    #[error("classifier did not finish within {0:?}")]
    Timeout(Duration),
    #[error("classifier exited with {0}")]
    Exit(ExitStatus),
    #[error("classifier reported an internal error")]
    Model,
    #[error("unrecognized classifier output {0:?}")]
    Unrecognized(String),
}

/// A decision procedure producing a binary verdict about a file.
pub trait Classifier {
    fn classify(&self, path: &Path) -> Result<Verdict, ClassifierError>;
}

/// Classifier that runs an external program as `<program> <file-path>` and
/// reads the verdict from its standard output: `0` for benign, `1` for
/// malicious, `-1` for a model-reported error.
pub struct CommandClassifier {
    program: PathBuf,
    timeout: Duration,
}

impl CommandClassifier {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs the program and returns its stdout, killing it on timeout.
    fn run(&self, path: &Path) -> Result<String, ClassifierError> {
        let mut child = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClassifierError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait().map_err(ClassifierError::Io)? {
                Some(status) => break status,
                None if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ClassifierError::Timeout(self.timeout));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        if !status.success() {
            return Err(ClassifierError::Exit(status));
        }

        let mut output = String::new();
        if let Some(mut stdout) = child.stdout.take() {
            stdout
                .read_to_string(&mut output)
                .map_err(ClassifierError::Io)?;
        }
        Ok(output)
    }
}

impl Classifier for CommandClassifier {
    fn classify(&self, path: &Path) -> Result<Verdict, ClassifierError> {
        parse_verdict(&self.run(path)?)
    }
}

/// Maps classifier stdout to a verdict. `-1` is the model's explicit error
/// report; anything outside `{0, 1, -1}` is unparseable.
fn parse_verdict(output: &str) -> Result<Verdict, ClassifierError> {
    match output.trim() {
        "0" => Ok(Verdict::Benign),
        "1" => Ok(Verdict::Malicious),
        "-1" => Err(ClassifierError::Model),
        other => Err(ClassifierError::Unrecognized(other.to_string())),
    }
}
