use std::env;
use std::fmt;
use std::path::Path;

use crate::command_runner::CommandRunner;
use crate::config::{StacklineConfig, load_config, resolve_config_path};
use crate::git;
use crate::stack_tool::{StackTool, StackToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Pass,
    Fail,
}

impl fmt::Display for CheckState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub name: String,
    pub state: CheckState,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorReport {
    pub checks: Vec<DoctorCheck>,
}

impl DoctorReport {
    pub fn has_failures(&self) -> bool {
        self.checks
            .iter()
            .any(|check| check.state == CheckState::Fail)
    }

    pub fn summary(&self) -> String {
        let passed = self
            .checks
            .iter()
            .filter(|check| check.state == CheckState::Pass)
            .count();
        let failed = self.checks.len().saturating_sub(passed);
        format!("{passed} passed, {failed} failed")
    }
}

pub fn run_doctor_with_runner(cwd: &Path, runner: &dyn CommandRunner) -> DoctorReport {
    let mut checks = Vec::new();

    checks.push(match env::consts::OS {
        "macos" => pass_check("os is supported", "detected macOS"),
        "linux" => pass_check("os is supported", "detected Linux"),
        detected => fail_check(
            "os is supported",
            format!("detected {detected}, expected macOS or Linux"),
        ),
    });

    checks.push(if is_executable_in_path("git") {
        pass_check("git is installed", "git executable found in PATH")
    } else {
        fail_check("git is installed", "git executable not found in PATH")
    });

    checks.push(check_git_repository(cwd, runner));

    let config = match resolve_config_path() {
        Ok(config_path) if config_path.exists() => match load_config(&config_path) {
            Ok(config) => {
                checks.push(pass_check(
                    "config parses and validates",
                    format!("loaded {}", config_path.display()),
                ));
                config
            }
            Err(error) => {
                checks.push(fail_check("config parses and validates", error.to_string()));
                StacklineConfig::default()
            }
        },
        Ok(config_path) => {
            checks.push(pass_check(
                "config parses and validates",
                format!("no file at {}, using defaults", config_path.display()),
            ));
            StacklineConfig::default()
        }
        Err(error) => {
            checks.push(fail_check("config path resolves", error.to_string()));
            StacklineConfig::default()
        }
    };

    checks.push(check_stack_tool_callable(cwd, runner, &config.tool.program));

    DoctorReport { checks }
}

fn check_git_repository(cwd: &Path, runner: &dyn CommandRunner) -> DoctorCheck {
    match git::git_dir(Some(cwd), runner) {
        Ok(dir) => pass_check(
            "inside a git repository",
            format!("git dir at {}", dir.display()),
        ),
        Err(error) => fail_check("inside a git repository", error.detail()),
    }
}

fn check_stack_tool_callable(cwd: &Path, runner: &dyn CommandRunner, program: &str) -> DoctorCheck {
    let name = format!("{program} is installed");
    let tool = StackTool::new(runner, program, Some(cwd));

    match tool.version() {
        Ok(version) if version.is_empty() => pass_check(&name, format!("{program} is callable")),
        Ok(version) => pass_check(&name, version),
        Err(error @ StackToolError::NotFound { .. }) => fail_check(&name, error.to_string()),
        Err(error) => fail_check(&name, format!("failed to execute {program} check: {error}")),
    }
}

fn pass_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Pass,
        details: details.into(),
    }
}

fn fail_check(name: &str, details: impl Into<String>) -> DoctorCheck {
    DoctorCheck {
        name: name.to_string(),
        state: CheckState::Fail,
        details: details.into(),
    }
}

fn is_executable_in_path(program: &str) -> bool {
    let program_path = Path::new(program);

    if program_path.is_absolute() || program.contains('/') {
        return is_executable_file(program_path);
    }

    let path_value = match env::var_os("PATH") {
        Some(value) => value,
        None => return false,
    };

    env::split_paths(&path_value)
        .map(|directory| directory.join(program))
        .any(|candidate| is_executable_file(&candidate))
}

fn is_executable_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        match path.metadata() {
            Ok(metadata) => metadata.permissions().mode() & 0o111 != 0,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Error, ErrorKind};

    use anyhow::anyhow;

    use crate::test_support::{RecordingRunner, output};

    use super::*;

    #[test]
    fn check_state_display_is_uppercase_label() {
        assert_eq!(CheckState::Pass.to_string(), "PASS");
        assert_eq!(CheckState::Fail.to_string(), "FAIL");
    }

    #[test]
    fn doctor_summary_counts_pass_and_fail() {
        let report = DoctorReport {
            checks: vec![
                pass_check("a", "ok"),
                fail_check("b", "no"),
                pass_check("c", "ok"),
            ],
        };

        assert_eq!(report.summary(), "2 passed, 1 failed");
        assert!(report.has_failures());
    }

    #[test]
    fn git_repository_check_reports_git_dir() {
        let runner = RecordingRunner::from_outputs(vec![output("/work/repo/.git\n", "", 0)]);
        let check = check_git_repository(Path::new("/work/repo"), &runner);

        assert_eq!(check.state, CheckState::Pass);
        assert!(check.details.contains("/work/repo/.git"));
    }

    #[test]
    fn git_repository_check_fails_outside_repo() {
        let runner = RecordingRunner::from_outputs(vec![output(
            "",
            "fatal: not a git repository",
            128,
        )]);
        let check = check_git_repository(Path::new("/tmp"), &runner);

        assert_eq!(check.state, CheckState::Fail);
        assert_eq!(check.details, "fatal: not a git repository");
    }

    #[test]
    fn stack_tool_check_reports_version() {
        let runner = RecordingRunner::from_outputs(vec![output("1.4.2\n", "", 0)]);
        let check = check_stack_tool_callable(Path::new("."), &runner, "gt");

        assert_eq!(check.name, "gt is installed");
        assert_eq!(check.state, CheckState::Pass);
        assert_eq!(check.details, "1.4.2");
        assert_eq!(runner.calls()[0].args, vec!["--version".to_string()]);
    }

    #[test]
    fn stack_tool_check_fails_when_missing() {
        let runner = RecordingRunner::from_outputs(vec![Err(anyhow!(Error::new(
            ErrorKind::NotFound,
            "missing"
        )))]);
        let check = check_stack_tool_callable(Path::new("."), &runner, "gt");

        assert_eq!(check.state, CheckState::Fail);
        assert!(check.details.contains("gt CLI not found"));
    }
}
