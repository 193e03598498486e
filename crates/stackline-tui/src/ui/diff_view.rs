use std::cell::Cell;

use ansi_to_tui::IntoText;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use stackline_app::DiffLoad;
use stackline_core::diff_stat::DiffStatEntry;

use crate::theme;

pub(crate) const NO_CHANGES: &str = "(no changes)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DiffPanel {
    Files,
    Diff,
}

/// State of the two-panel diff screen. Dropped as a whole when the view closes.
#[derive(Debug)]
pub(crate) struct DiffView {
    branch: String,
    parent: String,
    files: Vec<DiffStatEntry>,
    file_cursor: usize,
    focus: DiffPanel,
    content: Text<'static>,
    scroll: u16,
    page_height: Cell<u16>,
    body_width: Cell<u16>,
}

impl DiffView {
    pub(crate) fn new(load: DiffLoad) -> Self {
        Self {
            branch: load.branch,
            parent: load.parent,
            files: load.files,
            file_cursor: 0,
            focus: DiffPanel::Files,
            content: Text::default(),
            scroll: 0,
            page_height: Cell::new(1),
            body_width: Cell::new(0),
        }
    }

    pub(crate) fn branch(&self) -> &str {
        &self.branch
    }

    pub(crate) fn parent(&self) -> &str {
        &self.parent
    }

    pub(crate) fn focus(&self) -> DiffPanel {
        self.focus
    }

    pub(crate) fn selected_file(&self) -> Option<&DiffStatEntry> {
        self.files.get(self.file_cursor)
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DiffPanel::Files => DiffPanel::Diff,
            DiffPanel::Diff => DiffPanel::Files,
        };
    }

    /// Moves the file cursor; returns true when the selection changed.
    pub(crate) fn move_file(&mut self, delta: isize) -> bool {
        if self.files.is_empty() {
            return false;
        }

        let last = self.files.len() - 1;
        let next = self.file_cursor.saturating_add_signed(delta).min(last);
        if next == self.file_cursor {
            return false;
        }

        self.file_cursor = next;
        self.content = Text::default();
        self.scroll = 0;
        true
    }

    pub(crate) fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll();
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(max));
        self.scroll = next as u16;
    }

    pub(crate) fn page(&mut self, forward: bool) {
        let step = i32::from(self.page_height.get().max(1));
        self.scroll_by(if forward { step } else { -step });
    }

    pub(crate) fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Converts colored `git diff` output; falls back to plain text when the escape
    /// sequences cannot be parsed.
    pub(crate) fn set_content(&mut self, raw: &str) {
        self.content = match raw.as_bytes().into_text() {
            Ok(text) => text,
            Err(error) => {
                tracing::debug!(%error, "diff output was not valid ANSI, showing plain text");
                Text::raw(raw.to_string())
            }
        };
        self.scroll = 0;
    }

    pub(crate) fn set_error(&mut self, message: &str) {
        self.content = Text::from(Line::from(Span::styled(
            message.to_string(),
            theme::error_prompt(),
        )));
        self.scroll = 0;
    }

    /// Last scroll offset, counted in wrapped rows at the size of the last
    /// render so the final page stays full. Before the first render every line
    /// counts as one row.
    fn max_scroll(&self) -> u16 {
        let rows = match self.body_width.get() {
            0 => self.content.lines.len(),
            width => self.body(0).line_count(width),
        };
        u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_sub(self.page_height.get().max(1))
    }

    fn body(&self, scroll: u16) -> Paragraph<'static> {
        Paragraph::new(self.content.clone())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let (list_width, diff_width) = panel_widths(area.width);
        let [list_area, separator_area, diff_area] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(list_width),
                Constraint::Length(1),
                Constraint::Length(diff_width),
            ])
            .areas(area);

        self.render_files(frame, list_area);

        let separator: Vec<Line<'static>> = (0..separator_area.height)
            .map(|_| Line::from(Span::styled("│", theme::connector())))
            .collect();
        frame.render_widget(Paragraph::new(separator), separator_area);

        self.render_diff(frame, diff_area);
    }

    fn render_files(&self, frame: &mut Frame<'_>, area: Rect) {
        let [header_area, body_area] = split_header(area);
        frame.render_widget(
            Paragraph::new(self.header("Files".to_string(), DiffPanel::Files)),
            header_area,
        );

        if self.files.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(NO_CHANGES, theme::secondary_text())),
                body_area,
            );
            return;
        }

        let height = usize::from(body_area.height);
        let offset = file_list_offset(self.file_cursor, height);
        let lines: Vec<Line<'static>> = self
            .files
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, entry)| {
                let text = format!("{} | {}", entry.path, entry.summary);
                if index == self.file_cursor {
                    Line::from(Span::styled(text, theme::selection()))
                } else if entry.is_binary() {
                    Line::from(Span::styled(text, theme::secondary_text()))
                } else {
                    Line::from(text)
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), body_area);
    }

    fn render_diff(&self, frame: &mut Frame<'_>, area: Rect) {
        let [header_area, body_area] = split_header(area);
        let title = format!("Diff: {} (vs {})", self.branch, self.parent);
        frame.render_widget(
            Paragraph::new(self.header(title, DiffPanel::Diff)),
            header_area,
        );

        self.page_height.set(body_area.height.max(1));
        self.body_width.set(body_area.width);
        frame.render_widget(self.body(self.scroll), body_area);
    }

    fn header(&self, title: String, panel: DiffPanel) -> Line<'static> {
        let style = if self.focus == panel {
            theme::focus_prompt()
        } else {
            theme::panel_header()
        };
        Line::from(Span::styled(title, style))
    }
}

fn split_header(area: Rect) -> [Rect; 2] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .areas(area)
}

/// Returns `(list, diff)` widths; one column between them is the separator.
pub(crate) fn panel_widths(width: u16) -> (u16, u16) {
    let mut list = (u32::from(width) * 35 / 100) as u16;
    if list < 30 && width > 40 {
        list = 30;
    }
    if list > width.saturating_sub(10) {
        list = width / 3;
    }
    let diff = width.saturating_sub(list).saturating_sub(1).max(1);
    (list, diff)
}

/// First visible row so that the cursor stays on screen.
pub(crate) fn file_list_offset(cursor: usize, height: usize) -> usize {
    if height == 0 || cursor < height {
        0
    } else {
        cursor + 1 - height
    }
}
