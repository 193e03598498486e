use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;
use crate::ui::loading::LoadingState;

/// How long an action result outlives the reloads that follow it.
const ACTION_RESULT_HOLD: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusMessage {
    kind: MessageKind,
    text: String,
    /// Action results survive the reload they trigger and any reload inside
    /// the hold window; everything else is cleared by the next successful reload.
    keep_next_reload: bool,
    hold_until: Option<Instant>,
}

/// Bottom line of the screen: spinner while a job runs, otherwise the latest
/// message or the last refresh time.
#[derive(Debug, Default)]
pub(crate) struct StatusBar {
    message: Option<StatusMessage>,
    running: Option<String>,
    loading: LoadingState,
    last_refresh: Option<String>,
}

impl StatusBar {
    pub(crate) fn start(&mut self, label: String) {
        self.loading.reset();
        self.running = Some(label);
    }

    pub(crate) fn stop(&mut self) {
        self.running = None;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub(crate) fn tick(&mut self) {
        if self.running.is_some() {
            self.loading.next_frame();
        }
    }

    pub(crate) fn action_result(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.action_result_at(kind, text, Instant::now());
    }

    fn action_result_at(&mut self, kind: MessageKind, text: impl Into<String>, now: Instant) {
        self.message = Some(StatusMessage {
            kind,
            text: text.into(),
            keep_next_reload: true,
            hold_until: Some(now + ACTION_RESULT_HOLD),
        });
    }

    pub(crate) fn error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            kind: MessageKind::Error,
            text: text.into(),
            keep_next_reload: false,
            hold_until: None,
        });
    }

    pub(crate) fn reloaded(&mut self, clock_label: String) {
        self.reloaded_at(clock_label, Instant::now());
    }

    fn reloaded_at(&mut self, clock_label: String, now: Instant) {
        self.last_refresh = Some(clock_label);
        if let Some(message) = self.message.as_mut() {
            if message.keep_next_reload {
                message.keep_next_reload = false;
                return;
            }
            if message.hold_until.is_some_and(|until| now < until) {
                return;
            }
        }
        self.message = None;
    }

    #[cfg(test)]
    pub(crate) fn message(&self) -> Option<(MessageKind, &str)> {
        self.message
            .as_ref()
            .map(|message| (message.kind, message.text.as_str()))
    }

    pub(crate) fn line(&self) -> Line<'static> {
        if let Some(label) = &self.running {
            return Line::from(vec![
                Span::styled(
                    format!("{} ", self.loading.current_frame()),
                    theme::focus_prompt(),
                ),
                Span::raw(label.clone()),
            ]);
        }

        if let Some(message) = &self.message {
            let style = match message.kind {
                MessageKind::Success => theme::success_prompt(),
                MessageKind::Error => theme::error_prompt(),
            };
            return Line::from(Span::styled(message.text.clone(), style));
        }

        match &self.last_refresh {
            Some(clock) => Line::from(Span::styled(
                format!("Last refreshed: {clock}"),
                theme::secondary_text(),
            )),
            None => Line::from(Span::styled("stackline", theme::secondary_text())),
        }
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
