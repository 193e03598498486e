use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use stackline_app::{StackAction, StackSnapshot};
use stackline_core::display::{DisplayEntry, flatten, resolve_cursor};
use stackline_core::pr_info::PrInfo;
use stackline_core::time::{clock_label, now_local};
use stackline_core::tree::{BranchNode, apply_pr_info, branch_names, find_parent, is_root};

use crate::keymap::{self, TreeKey};
use crate::ui::diff_view::{DiffPanel, DiffView};
use crate::ui::help_view::render_help;
use crate::ui::legend::{LegendMode, legend_height, render_legend};
use crate::ui::status_bar::{MessageKind, StatusBar};
use crate::ui::tree_view::render_tree;
use crate::worker::{Job, JobDispatcher, SessionEvent};

pub(crate) const NO_PARENT_MESSAGE: &str = "No parent branch (trunk has no diff target)";
const CANNOT_SUBMIT_TRUNK: &str = "Cannot submit trunk";
const CANNOT_RESTACK_TRUNK: &str = "Cannot restack trunk";
const LOADING_STACKS: &str = "Loading stacks...";
const LOADING_DIFF: &str = "Loading diff...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Tree,
    Diff,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SessionOptions {
    pub(crate) pr_info: bool,
    pub(crate) debounce: Duration,
}

/// All interactive state. Input and worker results go in, jobs come out through
/// the dispatcher; nothing here blocks on a subprocess.
pub(crate) struct Session<D: JobDispatcher> {
    dispatcher: D,
    options: SessionOptions,
    mode: Mode,
    roots: Vec<BranchNode>,
    entries: Vec<DisplayEntry>,
    cursor: usize,
    pr_infos: HashMap<String, PrInfo>,
    has_loaded: bool,
    initial_load: bool,
    status: StatusBar,
    diff: Option<DiffView>,
    debounce_seq: u64,
    should_quit: bool,
}

impl<D: JobDispatcher> Session<D> {
    pub(crate) fn new(dispatcher: D, options: SessionOptions) -> Self {
        Self {
            dispatcher,
            options,
            mode: Mode::Tree,
            roots: Vec::new(),
            entries: Vec::new(),
            cursor: 0,
            pr_infos: HashMap::new(),
            has_loaded: false,
            initial_load: false,
            status: StatusBar::default(),
            diff: None,
            debounce_seq: 0,
            should_quit: false,
        }
    }

    pub(crate) fn start(&mut self) {
        self.initial_load = true;
        self.status.start(LOADING_STACKS.to_string());
        self.reload();
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub(crate) fn on_tick(&mut self) {
        self.status.tick();
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        if keymap::is_quit(key) {
            self.should_quit = true;
            return;
        }

        if self.status.is_running() {
            return;
        }

        match self.mode {
            Mode::Help => {
                if keymap::is_help(key) || keymap::is_back(key) {
                    self.mode = Mode::Tree;
                }
            }
            Mode::Diff => self.on_diff_key(key),
            Mode::Tree => self.on_tree_key(key),
        }
    }

    fn on_tree_key(&mut self, key: KeyEvent) {
        if keymap::is_up(key) {
            self.cursor = self.cursor.saturating_sub(1);
            return;
        }

        if keymap::is_down(key) {
            if self.cursor + 1 < self.entries.len() {
                self.cursor += 1;
            }
            return;
        }

        let Some(tree_key) = keymap::tree_key(key) else {
            return;
        };

        match tree_key {
            TreeKey::Help => self.mode = Mode::Help,
            TreeKey::RepoSync => self.run_action(StackAction::RepoSync),
            TreeKey::Sync => self.run_action(StackAction::Sync),
            TreeKey::CheckoutTrunk => {
                if let Some(trunk) = self.roots.first() {
                    let branch = trunk.name.clone();
                    self.run_action(StackAction::Checkout { branch });
                }
            }
            TreeKey::Checkout => {
                if let Some(branch) = self.selected_name() {
                    self.run_action(StackAction::Checkout { branch });
                }
            }
            TreeKey::OpenPr => {
                if let Some(branch) = self.selected_name() {
                    self.run_action(StackAction::OpenPr { branch });
                }
            }
            TreeKey::SubmitStack | TreeKey::SubmitDownstack => {
                let Some(branch) = self.selected_name() else {
                    return;
                };
                if is_root(&self.roots, &branch) {
                    self.status.error(CANNOT_SUBMIT_TRUNK);
                    return;
                }
                let action = if tree_key == TreeKey::SubmitStack {
                    StackAction::SubmitStack { branch }
                } else {
                    StackAction::SubmitDownstack { branch }
                };
                self.run_action(action);
            }
            TreeKey::Restack => {
                let Some(branch) = self.selected_name() else {
                    return;
                };
                if is_root(&self.roots, &branch) {
                    self.status.error(CANNOT_RESTACK_TRUNK);
                    return;
                }
                self.run_action(StackAction::Restack { branch });
            }
            TreeKey::Diff => self.open_diff(),
        }
    }

    fn on_diff_key(&mut self, key: KeyEvent) {
        if keymap::is_back(key) || keymap::is_diff(key) {
            self.diff = None;
            self.mode = Mode::Tree;
            return;
        }

        let Some(diff) = self.diff.as_mut() else {
            return;
        };

        if keymap::is_tab(key) {
            diff.toggle_focus();
            return;
        }

        if keymap::is_page_up(key) || keymap::is_page_down(key) {
            diff.page(keymap::is_page_down(key));
            return;
        }

        let delta = if keymap::is_up(key) {
            -1
        } else if keymap::is_down(key) {
            1
        } else {
            return;
        };

        match diff.focus() {
            DiffPanel::Files => {
                if diff.move_file(delta) {
                    self.request_selected_file();
                }
            }
            DiffPanel::Diff => diff.scroll_by(delta as i32),
        }
    }

    fn open_diff(&mut self) {
        let Some(branch) = self.selected_name() else {
            return;
        };
        let Some(parent) = find_parent(&self.roots, &branch).map(str::to_string) else {
            self.status.error(NO_PARENT_MESSAGE);
            return;
        };

        self.status.start(LOADING_DIFF.to_string());
        self.dispatcher.dispatch(Job::LoadDiff {
            branch,
            tree_parent: Some(parent),
        });
    }

    fn run_action(&mut self, action: StackAction) {
        self.status.start(action.running_label());
        self.dispatcher.dispatch(Job::RunAction(action));
    }

    fn reload(&mut self) {
        self.dispatcher.dispatch(Job::LoadStacks);
    }

    fn request_selected_file(&mut self) {
        let Some(diff) = self.diff.as_ref() else {
            return;
        };
        let Some(entry) = diff.selected_file() else {
            return;
        };

        self.dispatcher.dispatch(Job::LoadDiffFile {
            parent: diff.parent().to_string(),
            branch: diff.branch().to_string(),
            entry: entry.clone(),
        });
    }

    fn selected_name(&self) -> Option<String> {
        self.entries.get(self.cursor).map(|entry| entry.name.clone())
    }

    pub(crate) fn on_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::StacksLoaded(result) => self.on_stacks_loaded(result),
            SessionEvent::PrInfoLoaded(infos) => {
                // Each batch covers every branch; a failed lookup drops its badge.
                self.pr_infos = infos;
                apply_pr_info(&mut self.roots, &self.pr_infos);
                self.rebuild_entries();
            }
            SessionEvent::ActionFinished { action, result } => {
                self.status.stop();
                match result {
                    Ok(()) => {
                        tracing::info!(?action, "stack action finished");
                        self.status
                            .action_result(MessageKind::Success, action.success_message());
                        if action.reloads_on_success() {
                            self.reload();
                        }
                    }
                    Err(message) => {
                        self.status.action_result(MessageKind::Error, message);
                        if action.reloads_on_failure() {
                            self.reload();
                        }
                    }
                }
            }
            SessionEvent::DiffLoaded(result) => {
                self.status.stop();
                match result {
                    Ok(load) => {
                        tracing::debug!(branch = %load.branch, files = load.files.len(), "diff loaded");
                        self.diff = Some(DiffView::new(load));
                        self.mode = Mode::Diff;
                        self.request_selected_file();
                    }
                    Err(message) => self.status.error(message),
                }
            }
            SessionEvent::DiffFileLoaded { path, result } => {
                let Some(diff) = self.diff.as_mut() else {
                    return;
                };
                if diff.selected_file().map(|entry| entry.path.as_str()) != Some(path.as_str()) {
                    return;
                }
                match result {
                    Ok(raw) => diff.set_content(&raw),
                    Err(message) => diff.set_error(&message),
                }
            }
            SessionEvent::RepoChanged => {
                self.debounce_seq += 1;
                self.dispatcher.dispatch(Job::Debounce {
                    seq: self.debounce_seq,
                    delay: self.options.debounce,
                });
            }
            SessionEvent::WatchError(message) => {
                tracing::warn!(%message, "repository watcher error");
                self.status.error(format!("Watch error: {message}"));
            }
            SessionEvent::DebounceElapsed { seq } => {
                if seq == self.debounce_seq {
                    self.reload();
                }
            }
        }
    }

    fn on_stacks_loaded(&mut self, result: Result<StackSnapshot, String>) {
        if self.initial_load {
            self.initial_load = false;
            self.status.stop();
        }

        match result {
            Ok(snapshot) => {
                self.roots = snapshot.roots;
                let names: HashSet<String> = branch_names(&self.roots).into_iter().collect();
                self.pr_infos.retain(|name, _| names.contains(name));
                apply_pr_info(&mut self.roots, &self.pr_infos);
                self.rebuild_entries();
                self.has_loaded = true;
                self.status.reloaded(clock_label(now_local()));
                tracing::debug!(branches = self.entries.len(), "stacks reloaded");

                if self.options.pr_info && !self.roots.is_empty() {
                    self.dispatcher.dispatch(Job::LoadPrInfo {
                        branches: branch_names(&self.roots),
                    });
                }
            }
            Err(message) if self.has_loaded => {
                self.status.error(format!("Refresh failed: {message}"));
            }
            Err(message) => self.status.error(message),
        }
    }

    fn rebuild_entries(&mut self) {
        let previous = self.selected_name();
        self.entries = flatten(&self.roots);
        self.cursor = resolve_cursor(&self.entries, previous.as_deref());
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let legend_mode = match self.mode {
            Mode::Tree => LegendMode::Tree,
            Mode::Diff => LegendMode::Diff,
            Mode::Help => LegendMode::Help,
        };
        let [main, status, legend] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(legend_height(legend_mode, area.width)),
            ])
            .areas(area);

        match (&self.mode, &self.diff) {
            (Mode::Diff, Some(diff)) => diff.render(frame, main),
            _ => render_tree(frame, main, &self.entries, self.cursor),
        }
        self.status.render(frame, status);
        render_legend(frame, legend, legend_mode);

        if self.mode == Mode::Help {
            render_help(frame);
        }
    }
}
