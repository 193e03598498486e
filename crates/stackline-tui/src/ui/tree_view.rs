use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use stackline_core::display::DisplayEntry;
use stackline_core::tree::{CURRENT_MARKER, OTHER_MARKER};

use crate::theme;

pub(crate) const EMPTY_TREE: &str = "(no stacks)";

pub(crate) fn render_tree(frame: &mut Frame<'_>, area: Rect, entries: &[DisplayEntry], cursor: usize) {
    let block = theme::chrome("Stacks");

    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(EMPTY_TREE, theme::secondary_text())))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem<'static>> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| ListItem::new(row_line(entry, index == cursor)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(cursor.min(entries.len() - 1)));

    frame.render_stateful_widget(
        List::new(items)
            .block(block)
            .highlight_style(theme::selection()),
        area,
        &mut state,
    );
}

/// The selected row is drawn as plain text so the highlight style reads cleanly.
pub(crate) fn row_line(entry: &DisplayEntry, selected: bool) -> Line<'static> {
    let indent = "│ ".repeat(entry.visual_depth);
    let marker = if entry.is_current {
        CURRENT_MARKER
    } else {
        OTHER_MARKER
    };
    let annotation = if entry.annotation.is_empty() {
        None
    } else {
        Some(format!(" ({})", entry.annotation))
    };
    let badge = entry.pr.badge().map(|badge| format!(" {badge}"));

    if selected {
        let mut text = format!("{indent}{marker} {}", entry.name);
        if let Some(annotation) = annotation {
            text.push_str(&annotation);
        }
        if let Some(badge) = badge {
            text.push_str(&badge);
        }
        return Line::from(text);
    }

    let name_style = if entry.is_current {
        theme::current_branch()
    } else {
        theme::branch()
    };

    let mut spans = Vec::new();
    if !indent.is_empty() {
        spans.push(Span::styled(indent, theme::connector()));
    }
    spans.push(Span::styled(format!("{marker} "), name_style));
    spans.push(Span::styled(entry.name.clone(), name_style));
    if let Some(annotation) = annotation {
        spans.push(Span::styled(annotation, theme::annotation()));
    }
    if let Some(badge) = badge {
        spans.push(Span::styled(badge, theme::pr_state(entry.pr.state)));
    }
    Line::from(spans)
}
