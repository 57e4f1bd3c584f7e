use std::ffi::OsString;
use std::fmt;
use std::process::{Command, Stdio};

const SYSTEMCTL: &str = "systemctl";
const FALLBACK_ERROR: &str = "systemctl error";

/// Lifecycle state reported by `systemctl is-active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    Active,
    Activating,
    Reloading,
    Inactive,
    Failed,
    Deactivating,
    Unknown,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 7] = [
        ServiceStatus::Active,
        ServiceStatus::Activating,
        ServiceStatus::Reloading,
        ServiceStatus::Inactive,
        ServiceStatus::Failed,
        ServiceStatus::Deactivating,
        ServiceStatus::Unknown,
    ];

    /// Anything systemd may print that we don't know about (or nothing at all)
    /// is `Unknown`.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim() {
            "active" => ServiceStatus::Active,
            "activating" => ServiceStatus::Activating,
            "reloading" => ServiceStatus::Reloading,
            "inactive" => ServiceStatus::Inactive,
            "failed" => ServiceStatus::Failed,
            "deactivating" => ServiceStatus::Deactivating,
            _ => ServiceStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Activating => "activating",
            ServiceStatus::Reloading => "reloading",
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Failed => "failed",
            ServiceStatus::Deactivating => "deactivating",
            ServiceStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Start,
    Stop,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlError {
    message: String,
}

impl ControlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    fn from_stderr(stderr: &[u8]) -> Self {
        let stderr = String::from_utf8_lossy(stderr);
        let message = stderr.trim();
        if message.is_empty() {
            return Self::new(FALLBACK_ERROR);
        }
        Self::new(message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ControlError {}

pub trait ServiceControl {
    /// Blocks until the query returns. Never fails: problems collapse to `Unknown`.
    fn probe(&self) -> ServiceStatus;

    fn control(&self, action: ServiceAction) -> Result<(), ControlError>;
}

/// Drives one unit through the `systemctl` command line.
#[derive(Debug, Clone)]
pub struct Systemctl {
    program: OsString,
    unit: String,
    user: bool,
}

impl Systemctl {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            program: OsString::from(SYSTEMCTL),
            unit: unit.into(),
            user: false,
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn user_scope(mut self, user: bool) -> Self {
        self.user = user;
        self
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn command(&self, verb: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        if self.user {
            cmd.arg("--user");
        }
        cmd.arg(verb).arg(&self.unit).stdin(Stdio::null());
        cmd
    }
}

impl ServiceControl for Systemctl {
    fn probe(&self) -> ServiceStatus {
        match self.command("is-active").output() {
            Ok(output) => ServiceStatus::from_raw(&String::from_utf8_lossy(&output.stdout)),
            Err(e) => {
                log::debug!("is-active {} failed to run: {}", self.unit, e);
                ServiceStatus::Unknown
            }
        }
    }

    fn control(&self, action: ServiceAction) -> Result<(), ControlError> {
        log::info!("Running {} {}", action.as_str(), self.unit);

        let output = self.command(action.as_str()).output().map_err(|e| {
            ControlError::new(format!("{}: {}", self.program.to_string_lossy(), e))
        })?;

        if output.status.success() {
            return Ok(());
        }
        Err(ControlError::from_stderr(&output.stderr))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fake_systemctl(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("systemctl");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn from_raw_classifies_known_states() {
        let cases = [
            ("active", ServiceStatus::Active),
            ("activating", ServiceStatus::Activating),
            ("reloading", ServiceStatus::Reloading),
            ("inactive", ServiceStatus::Inactive),
            ("failed", ServiceStatus::Failed),
            ("deactivating", ServiceStatus::Deactivating),
            ("  active\n", ServiceStatus::Active),
            ("failed\n", ServiceStatus::Failed),
        ];

        for (raw, expected) in cases {
            assert_eq!(ServiceStatus::from_raw(raw), expected, "raw: {:?}", raw);
        }
    }

    #[test]
    fn from_raw_unrecognized_is_unknown() {
        let cases = ["", "\n", "unknown", "maintenance", "ACTIVE", "active running", "refreshing"];

        for raw in cases {
            assert_eq!(ServiceStatus::from_raw(raw), ServiceStatus::Unknown, "raw: {:?}", raw);
        }
    }

    #[test]
    fn probe_reads_stdout_even_on_nonzero_exit() {
        let dir = TempDir::new().unwrap();
        let cases = [
            ("echo active", ServiceStatus::Active),
            ("echo inactive; exit 3", ServiceStatus::Inactive),
            ("echo failed; exit 3", ServiceStatus::Failed),
            ("echo activating", ServiceStatus::Activating),
            ("exit 4", ServiceStatus::Unknown),
            ("echo garbage", ServiceStatus::Unknown),
        ];

        for (body, expected) in cases {
            let program = fake_systemctl(&dir, body);
            let systemctl = Systemctl::new("plexmediaserver.service").with_program(program);
            assert_eq!(systemctl.probe(), expected, "script: {}", body);
        }
    }

    #[test]
    fn probe_passes_verb_scope_and_unit() {
        let dir = TempDir::new().unwrap();
        let program = fake_systemctl(
            &dir,
            r#"[ "$1 $2 $3" = "--user is-active demo.service" ] && echo active || echo failed"#,
        );

        let user = Systemctl::new("demo.service").with_program(&program).user_scope(true);
        let system = Systemctl::new("demo.service").with_program(&program);

        assert_eq!(user.probe(), ServiceStatus::Active);
        assert_eq!(system.probe(), ServiceStatus::Failed);
    }

    #[test]
    fn probe_missing_program_is_unknown() {
        let systemctl = Systemctl::new("x.service").with_program("/nonexistent/systemctl");
        assert_eq!(systemctl.probe(), ServiceStatus::Unknown);
    }

    #[test]
    fn control_success_on_zero_exit() {
        let dir = TempDir::new().unwrap();
        let program = fake_systemctl(&dir, r#"[ "$1" = "start" ] || exit 1"#);
        let systemctl = Systemctl::new("x.service").with_program(program);

        assert_eq!(systemctl.control(ServiceAction::Start), Ok(()));
        assert!(systemctl.control(ServiceAction::Stop).is_err());
    }

    #[test]
    fn control_failure_reports_trimmed_stderr() {
        let dir = TempDir::new().unwrap();
        let cases = [
            ("echo '  Access denied  ' >&2; exit 1", "Access denied"),
            ("echo 'Unit x.service not found.' >&2; exit 5", "Unit x.service not found."),
            ("exit 1", FALLBACK_ERROR),
            ("echo '   ' >&2; exit 1", FALLBACK_ERROR),
        ];

        for (body, expected) in cases {
            let program = fake_systemctl(&dir, body);
            let systemctl = Systemctl::new("x.service").with_program(program);
            let err = systemctl.control(ServiceAction::Stop).unwrap_err();
            assert_eq!(err.message(), expected, "script: {}", body);
        }
    }

    #[test]
    fn control_missing_program_names_it() {
        let systemctl = Systemctl::new("x.service").with_program("/nonexistent/systemctl");
        let err = systemctl.control(ServiceAction::Start).unwrap_err();
        assert!(err.message().starts_with("/nonexistent/systemctl: "), "got {}", err);
    }
}
