use ratatui::Frame;
use ratatui::text::{Line, Text};

use crate::theme;
use crate::ui::modal::{ModalSpec, render_modal};
use crate::ui::text::{focus_line, key_value_line};

pub(crate) const HELP_TITLE: &str = "stackline - Keybindings";
pub(crate) const HELP_CLOSE_HINT: &str = "Press ? or esc to close";

const KEY_WIDTH: usize = 10;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑/k", "Move up"),
            ("↓/j", "Move down"),
            ("enter", "Check out selected branch"),
            ("m", "Check out trunk"),
        ],
    ),
    (
        "Actions",
        &[
            ("s", "Submit stack"),
            ("S", "Submit downstack"),
            ("r", "Restack"),
            ("f", "Fetch (repo sync)"),
            ("y", "Sync"),
            ("o", "Open PR in browser"),
        ],
    ),
    (
        "Views",
        &[
            ("d", "Diff against parent"),
            ("?", "Toggle this help"),
            ("q", "Quit"),
        ],
    ),
    (
        "Diff View",
        &[
            ("↑↓", "Navigate files / scroll diff"),
            ("tab", "Switch panel"),
            ("esc/d", "Close diff"),
        ],
    ),
];

pub(crate) fn help_text() -> Text<'static> {
    let mut lines = Vec::new();
    for (index, (section, keys)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(focus_line(format!("--- {section} ---")));
        for (key, description) in keys.iter() {
            lines.push(key_value_line(key, description, KEY_WIDTH));
        }
    }
    Text::from(lines)
}

pub(crate) fn render_help(frame: &mut Frame<'_>) {
    render_modal(
        frame,
        ModalSpec {
            title: HELP_TITLE,
            title_style: Some(theme::focus_prompt()),
            body: help_text(),
            key_hint: Some(HELP_CLOSE_HINT),
            width_pct: 60,
            height_pct: 70,
        },
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    #[test]
    fn help_lists_every_section() {
        let text = help_text();
        let rendered: Vec<String> = text
            .lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();

        for section in ["Navigation", "Actions", "Views", "Diff View"] {
            assert!(
                rendered.contains(&format!("--- {section} ---")),
                "missing {section}"
            );
        }
        assert!(rendered.iter().any(|line| line.contains("Submit downstack")));
    }

    #[test]
    fn help_overlay_renders_title_and_close_hint() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");

        terminal.draw(render_help).expect("draw");

        let rendered = format!("{}", terminal.backend());
        assert!(rendered.contains(HELP_TITLE));
        assert!(rendered.contains(HELP_CLOSE_HINT));
    }
}
