//! Running external programs and reporting their failures

use pythia_core::{PythiaError, PythiaResult};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Number of trailing output lines reported when a failing tool printed no
/// `ERROR` line
pub const FAILURE_TAIL_LINES: usize = 20;

/// Output captured from a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// stdout followed by stderr
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    /// Lines starting with `ERROR`, trimmed
    pub fn error_lines(&self) -> Vec<String> {
        self.combined()
            .lines()
            .map(str::trim)
            .filter(|line| line.starts_with("ERROR"))
            .map(str::to_string)
            .collect()
    }

    /// Human readable failure explanation: the `ERROR` lines when there are
    /// any, otherwise the last lines of output
    pub fn failure_details(&self) -> String {
        let errors = self.error_lines();
        if !errors.is_empty() {
            return format!("exited with the following error:\n\t{}", errors.join("\n\t"));
        }

        let combined = self.combined();
        let lines: Vec<&str> = combined.lines().collect();
        if lines.is_empty() {
            return "no output was produced".to_string();
        }
        let tail = &lines[lines.len().saturating_sub(FAILURE_TAIL_LINES)..];
        format!("last lines of output:\n{}", tail.join("\n"))
    }
}

/// Lifecycle of one external program run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationState {
    NotStarted,
    Running,
    Succeeded,
    Failed {
        exit_code: Option<i32>,
        output: CapturedOutput,
    },
}

/// A single run of an external program; runs at most once
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    state: InvocationState,
}

impl Invocation {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            state: InvocationState::NotStarted,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Append `flag` only when `enabled`
    pub fn flag_if(self, flag: &str, enabled: bool) -> Self {
        if enabled {
            self.arg(flag)
        } else {
            self
        }
    }

    /// Append `flag value` only when a value is given
    pub fn option<T: ToString>(self, flag: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value.to_string()),
            None => self,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn arguments(&self) -> &[OsString] {
        &self.args
    }

    pub fn state(&self) -> &InvocationState {
        &self.state
    }

    /// The command line as a single space separated string
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the program to completion and capture its output.
    ///
    /// A non-zero exit status is reported as [`PythiaError::ExternalTool`]
    /// and leaves the invocation in the `Failed` state.
    pub fn run(&mut self) -> PythiaResult<CapturedOutput> {
        if self.state != InvocationState::NotStarted {
            return Err(PythiaError::Other(format!(
                "command was already run: {}",
                self.command_line()
            )));
        }

        let command_line = self.command_line();
        tracing::debug!("Running {}", command_line);
        self.state = InvocationState::Running;

        let output = match Command::new(&self.program).args(&self.args).output() {
            Ok(output) => output,
            Err(e) => {
                self.state = InvocationState::Failed {
                    exit_code: None,
                    output: CapturedOutput::default(),
                };
                return Err(PythiaError::ExternalTool {
                    command: command_line,
                    details: format!("failed to start: {}", e),
                });
            }
        };

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if output.status.success() {
            self.state = InvocationState::Succeeded;
            Ok(captured)
        } else {
            let details = captured.failure_details();
            tracing::warn!(
                "Command exited with code {:?}: {}",
                output.status.code(),
                command_line
            );
            self.state = InvocationState::Failed {
                exit_code: output.status.code(),
                output: captured,
            };
            Err(PythiaError::ExternalTool {
                command: command_line,
                details,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_details_prefer_error_lines() {
        let output = CapturedOutput {
            stdout: "RAxML-NG v. 1.2.0\n  ERROR: Alignment file not found\nbye\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(
            output.failure_details(),
            "exited with the following error:\n\tERROR: Alignment file not found"
        );
    }

    #[test]
    fn test_failure_details_fall_back_to_tail() {
        let stdout: String = (1..=30).map(|i| format!("line {}\n", i)).collect();
        let output = CapturedOutput {
            stdout,
            stderr: String::new(),
        };
        let details = output.failure_details();

        assert!(details.contains("line 11"));
        assert!(details.contains("line 30"));
        assert!(!details.contains("line 10\n"));
    }

    #[test]
    fn test_command_line() {
        let invocation = Invocation::new("raxml-ng")
            .args(["--msa", "a.phy"])
            .option("--threads", Some(4))
            .option::<usize>("--seed", None)
            .flag_if("--redo", true)
            .flag_if("--force", false);

        assert_eq!(
            invocation.command_line(),
            "raxml-ng --msa a.phy --threads 4 --redo"
        );
        assert_eq!(invocation.state(), &InvocationState::NotStarted);
    }

    #[cfg(unix)]
    #[test]
    fn test_state_transitions() {
        let mut ok = Invocation::new("/bin/sh").args(["-c", "echo hello"]);
        let output = ok.run().unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(ok.state(), &InvocationState::Succeeded);

        // an invocation runs only once
        assert!(matches!(ok.run(), Err(PythiaError::Other(_))));

        let mut failing = Invocation::new("/bin/sh").args(["-c", "echo 'ERROR: boom'; exit 3"]);
        match failing.run().unwrap_err() {
            PythiaError::ExternalTool { command, details } => {
                assert!(command.starts_with("/bin/sh -c"));
                assert!(details.contains("ERROR: boom"));
            }
            other => panic!("Expected ExternalTool error, got {:?}", other),
        }
        match failing.state() {
            InvocationState::Failed { exit_code, output } => {
                assert_eq!(*exit_code, Some(3));
                assert!(output.stdout.contains("ERROR: boom"));
            }
            other => panic!("Expected Failed state, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program() {
        let mut invocation = Invocation::new("/nonexistent/raxml-ng").arg("--version");
        assert!(matches!(
            invocation.run(),
            Err(PythiaError::ExternalTool { .. })
        ));
        assert!(matches!(invocation.state(), InvocationState::Failed { exit_code: None, .. }));
    }
}
