//! Subsystem command execution.
//!
//! Every call into WSL goes through [`CommandRunner`], so discovery and
//! distribution resolution can be driven by scripted output in tests.

use crate::error::{Result, ShortcutError};
use std::process::Command;
use tracing::debug;

/// Captured result of an external command.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Build a successful output from text, mostly for tests and fakes.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: Some(0),
            stdout: stdout.into().into_bytes(),
            stderr: Vec::new(),
        }
    }

    /// Build a failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            status: Some(code),
            stdout: Vec::new(),
            stderr: stderr.into().into_bytes(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output as UTF-8 (lossy).
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard output decoded from the host's wide-character encoding.
    pub fn stdout_wide(&self) -> String {
        decode_wide_output(&self.stdout)
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }

    /// Convert a non-zero exit into [`ShortcutError::CommandFailed`].
    pub fn into_checked(self, command: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ShortcutError::CommandFailed {
                command: command.to_string(),
                status: self.status,
                stderr: self.stderr_text(),
            })
        }
    }
}

/// Runs external programs and captures their output.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is returned as a normal [`CommandOutput`]; only a failure
    /// to start the process is an error.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        debug!("Executing command: {}", describe_command(program, args));

        let mut cmd = Command::new(program);
        cmd.args(args);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(windows_sys::Win32::System::Threading::CREATE_NO_WINDOW);
        }

        let output = cmd.output().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ShortcutError::environment(format!("{} is not installed or not on PATH", program))
            } else {
                ShortcutError::Io {
                    message: format!("Failed to run {}", program),
                    path: None,
                    source: Some(e),
                }
            }
        })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Render a command line for logs and error messages.
pub fn describe_command(program: &str, args: &[String]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

/// Decode text produced by `wsl.exe`, which writes UTF-16LE unless
/// `WSL_UTF8` is set.
///
/// Output that is not plausibly UTF-16 (odd length, or no NUL bytes at all)
/// is decoded as UTF-8. A leading byte-order mark is dropped either way.
pub fn decode_wide_output(bytes: &[u8]) -> String {
    let looks_wide = bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes.contains(&0);

    let text = if looks_wide {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };

    text.trim_start_matches('\u{feff}').replace('\0', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_utf16le() {
        let bytes = utf16le("  NAME      STATE\r\n* Ubuntu    Running\r\n");
        assert_eq!(
            decode_wide_output(&bytes),
            "  NAME      STATE\r\n* Ubuntu    Running\r\n"
        );
    }

    #[test]
    fn test_decode_utf16le_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        bytes.extend(utf16le("Debian"));
        assert_eq!(decode_wide_output(&bytes), "Debian");
    }

    #[test]
    fn test_decode_utf8_fallback() {
        assert_eq!(decode_wide_output(b"* Ubuntu Running 2\n"), "* Ubuntu Running 2\n");
    }

    #[test]
    fn test_checked_output() {
        assert!(CommandOutput::ok("fine").into_checked("true").is_ok());

        let err = CommandOutput::failed(2, "ls: cannot access\n")
            .into_checked("wsl -- ls")
            .unwrap_err();
        match err {
            ShortcutError::CommandFailed { status, stderr, .. } => {
                assert_eq!(status, Some(2));
                assert_eq!(stderr, "ls: cannot access");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_describe_command() {
        assert_eq!(
            describe_command("wsl.exe", &["-l".to_string(), "-v".to_string()]),
            "wsl.exe -l -v"
        );
        assert_eq!(describe_command("wsl.exe", &[]), "wsl.exe");
    }
}
