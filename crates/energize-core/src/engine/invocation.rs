use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Where a child process reads its standard input from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StdinSource {
    #[default]
    Inherit,
    /// Literal text written to the child's stdin, then closed.
    Text(String),
    File(PathBuf),
}

/// Where a child process writes its standard output to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputSink {
    #[default]
    Inherit,
    Null,
}

/// One external-engine run.
///
/// The working directory is passed to the child explicitly; the parent's
/// current directory is never touched. `artifact` is the file the stage is
/// expected to leave behind on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInvocation {
    pub stage: &'static str,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
    pub stdin: StdinSource,
    pub stdout: OutputSink,
    pub artifact: PathBuf,
}

impl BackendInvocation {
    pub fn new(
        stage: &'static str,
        program: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
        artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stage,
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            stdin: StdinSource::default(),
            stdout: OutputSink::default(),
            artifact: artifact.into(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends a flag followed by its path value.
    pub fn flag_path(self, flag: &str, path: &Path) -> Self {
        self.arg(flag).arg(path)
    }

    pub fn stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn stdout(mut self, stdout: OutputSink) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for BackendInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        match &self.stdin {
            StdinSource::Inherit => {}
            StdinSource::Text(text) => write!(f, " <<< '{}'", text.trim_end())?,
            StdinSource::File(path) => write!(f, " < {}", path.display())?,
        }
        match &self.stdout {
            OutputSink::Inherit => {}
            OutputSink::Null => write!(f, " > /dev/null")?,
        }
        Ok(())
    }
}

/// Exit state of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes [`BackendInvocation`]s, blocking until the child exits.
pub trait ProcessRunner {
    /// # Errors
    ///
    /// Returns an I/O error only when the process could not be started or
    /// waited on. A nonzero exit is reported through [`ExitOutcome`].
    fn run(&self, invocation: &BackendInvocation) -> io::Result<ExitOutcome>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &BackendInvocation) -> io::Result<ExitOutcome> {
        (**self).run(invocation)
    }
}

/// Runs invocations as real child processes with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &BackendInvocation) -> io::Result<ExitOutcome> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(&invocation.working_dir);

        match &invocation.stdin {
            StdinSource::Inherit => {}
            StdinSource::Text(_) => {
                command.stdin(Stdio::piped());
            }
            StdinSource::File(path) => {
                command.stdin(Stdio::from(File::open(path)?));
            }
        }
        match &invocation.stdout {
            OutputSink::Inherit => {}
            OutputSink::Null => {
                command.stdout(Stdio::null());
            }
        }

        let mut child = command.spawn()?;
        if let (StdinSource::Text(text), Some(mut stdin)) = (&invocation.stdin, child.stdin.take())
        {
            match stdin.write_all(text.as_bytes()) {
                Ok(()) => {}
                // The child may legitimately exit before consuming its input.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("Child closed stdin before reading all selection input.");
                }
                Err(e) => return Err(e),
            }
        }

        let status = child.wait()?;
        Ok(ExitOutcome {
            code: status.code(),
        })
    }
}
