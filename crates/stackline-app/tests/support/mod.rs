use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use stackline_app::App;
use stackline_core::command_runner::{CommandOutput, CommandRunner};
use stackline_core::config::StacklineConfig;

#[derive(Debug, Clone)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
    #[allow(dead_code)]
    pub cwd: Option<PathBuf>,
}

impl Call {
    #[allow(dead_code)]
    pub fn line(&self) -> String {
        format!("{} {}", self.program, self.args.join(" "))
    }
}

/// Answers calls in order. Running out of outputs is an error.
#[derive(Default)]
pub struct QueueRunner {
    outputs: Mutex<VecDeque<anyhow::Result<CommandOutput>>>,
    calls: Mutex<Vec<Call>>,
}

impl QueueRunner {
    pub fn new(outputs: Vec<anyhow::Result<CommandOutput>>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandRunner for QueueRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> anyhow::Result<CommandOutput> {
        self.calls.lock().expect("calls lock").push(record(program, args, cwd));

        self.outputs
            .lock()
            .expect("outputs lock")
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("missing scripted output")))
    }
}

/// Answers by full command line, for callers that run commands in parallel.
#[derive(Default)]
#[allow(dead_code)]
pub struct KeyedRunner {
    outputs: HashMap<String, CommandOutput>,
    calls: Mutex<Vec<Call>>,
}

#[allow(dead_code)]
impl KeyedRunner {
    pub fn new(outputs: Vec<(&str, CommandOutput)>) -> Self {
        Self {
            outputs: outputs
                .into_iter()
                .map(|(line, output)| (line.to_string(), output))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandRunner for KeyedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> anyhow::Result<CommandOutput> {
        let call = record(program, args, cwd);
        let line = call.line();
        self.calls.lock().expect("calls lock").push(call);

        self.outputs
            .get(&line)
            .cloned()
            .ok_or_else(|| anyhow!("unexpected command: {line}"))
    }
}

fn record(program: &str, args: &[&str], cwd: Option<&Path>) -> Call {
    Call {
        program: program.to_string(),
        args: args.iter().map(|value| (*value).to_string()).collect(),
        cwd: cwd.map(Path::to_path_buf),
    }
}

pub fn output(stdout: &str, stderr: &str, status: i32) -> anyhow::Result<CommandOutput> {
    Ok(raw_output(stdout, stderr, status))
}

pub fn raw_output(stdout: &str, stderr: &str, status: i32) -> CommandOutput {
    CommandOutput {
        status_code: status,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

pub fn app_with(runner: Arc<dyn CommandRunner>) -> App {
    App::new(runner, StacklineConfig::default(), PathBuf::from("/work/repo"))
}
