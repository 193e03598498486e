use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use stackline_app::{App, DiffLoad, StackAction, StackSnapshot, user_message};
use stackline_core::diff_stat::DiffStatEntry;
use stackline_core::pr_info::PrInfo;

/// Everything the event loop learns about outside its own thread.
#[derive(Debug)]
pub(crate) enum SessionEvent {
    StacksLoaded(Result<StackSnapshot, String>),
    PrInfoLoaded(HashMap<String, PrInfo>),
    ActionFinished {
        action: StackAction,
        result: Result<(), String>,
    },
    DiffLoaded(Result<DiffLoad, String>),
    DiffFileLoaded {
        path: String,
        result: Result<String, String>,
    },
    RepoChanged,
    WatchError(String),
    DebounceElapsed {
        seq: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Job {
    LoadStacks,
    LoadPrInfo {
        branches: Vec<String>,
    },
    RunAction(StackAction),
    LoadDiff {
        branch: String,
        tree_parent: Option<String>,
    },
    LoadDiffFile {
        parent: String,
        branch: String,
        entry: DiffStatEntry,
    },
    Debounce {
        seq: u64,
        delay: Duration,
    },
}

pub(crate) trait JobDispatcher {
    fn dispatch(&self, job: Job);
}

/// Runs each job on its own thread and posts the outcome back to the loop.
pub(crate) struct ThreadDispatcher {
    app: App,
    sender: Sender<SessionEvent>,
}

impl ThreadDispatcher {
    pub(crate) fn new(app: App, sender: Sender<SessionEvent>) -> Self {
        Self { app, sender }
    }
}

impl JobDispatcher for ThreadDispatcher {
    fn dispatch(&self, job: Job) {
        let app = self.app.clone();
        let sender = self.sender.clone();
        tracing::debug!(?job, "dispatching job");

        thread::spawn(move || {
            let event = run_job(&app, job);
            // The loop may already be gone after quit.
            let _ = sender.send(event);
        });
    }
}

fn run_job(app: &App, job: Job) -> SessionEvent {
    match job {
        Job::LoadStacks => {
            SessionEvent::StacksLoaded(app.load_stacks().map_err(|error| {
                tracing::warn!(error = %format!("{error:#}"), "stack reload failed");
                user_message(&error)
            }))
        }
        Job::LoadPrInfo { branches } => SessionEvent::PrInfoLoaded(app.load_pr_infos(&branches)),
        Job::RunAction(action) => {
            let result = app.run_action(&action).map_err(|error| {
                tracing::warn!(?action, error = %format!("{error:#}"), "stack action failed");
                user_message(&error)
            });
            SessionEvent::ActionFinished { action, result }
        }
        Job::LoadDiff {
            branch,
            tree_parent,
        } => SessionEvent::DiffLoaded(
            app.load_diff(&branch, tree_parent.as_deref())
                .map_err(|error| user_message(&error)),
        ),
        Job::LoadDiffFile {
            parent,
            branch,
            entry,
        } => SessionEvent::DiffFileLoaded {
            path: entry.path.clone(),
            result: app
                .load_diff_file(&parent, &branch, &entry)
                .map_err(|error| user_message(&error)),
        },
        Job::Debounce { seq, delay } => {
            thread::sleep(delay);
            SessionEvent::DebounceElapsed { seq }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::sync::mpsc;

    use stackline_core::command_runner::{CommandOutput, CommandRunner};
    use stackline_core::config::StacklineConfig;

    use super::*;

    struct StaticRunner {
        status_code: i32,
        stdout: &'static str,
        stderr: &'static str,
    }

    impl CommandRunner for StaticRunner {
        fn run(
            &self,
            _program: &str,
            _args: &[&str],
            _cwd: Option<&Path>,
        ) -> anyhow::Result<CommandOutput> {
            Ok(CommandOutput {
                status_code: self.status_code,
                stdout: self.stdout.to_string(),
                stderr: self.stderr.to_string(),
            })
        }
    }

    fn app(runner: StaticRunner) -> App {
        App::new(
            Arc::new(runner),
            StacklineConfig::default(),
            PathBuf::from("."),
        )
    }

    #[test]
    fn thread_dispatcher_posts_result_event() {
        let (sender, receiver) = mpsc::channel();
        let dispatcher = ThreadDispatcher::new(
            app(StaticRunner {
                status_code: 0,
                stdout: "◉  main\n",
                stderr: "",
            }),
            sender,
        );

        dispatcher.dispatch(Job::LoadStacks);

        let event = receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("event");
        match event {
            SessionEvent::StacksLoaded(Ok(snapshot)) => {
                assert_eq!(snapshot.roots[0].name, "main");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn failed_action_carries_classified_message() {
        let event = run_job(
            &app(StaticRunner {
                status_code: 1,
                stdout: "",
                stderr: "CONFLICT (content): Merge conflict in a.rs",
            }),
            Job::RunAction(StackAction::Restack {
                branch: "feat".to_string(),
            }),
        );

        match event {
            SessionEvent::ActionFinished { action, result } => {
                assert!(action.reloads_on_failure());
                assert_eq!(
                    result,
                    Err("Conflict detected: resolve it and run restack again".to_string())
                );
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn debounce_job_reports_its_sequence() {
        let event = run_job(
            &app(StaticRunner {
                status_code: 0,
                stdout: "",
                stderr: "",
            }),
            Job::Debounce {
                seq: 7,
                delay: Duration::from_millis(1),
            },
        );

        assert!(matches!(event, SessionEvent::DebounceElapsed { seq: 7 }));
    }
}
