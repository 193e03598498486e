use ratatui::Frame;
use ratatui::layout::Rect;

use crate::theme;
use crate::ui::text::{compact_hint, key_hint_height, key_hint_paragraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegendMode {
    Tree,
    Diff,
    Help,
}

pub(crate) fn legend_text(mode: LegendMode, width: u16) -> &'static str {
    match mode {
        LegendMode::Tree => compact_hint(
            width,
            "enter: checkout    m: trunk    s/S: submit stack/downstack    r: restack    f: fetch    y: sync    o: open PR    d: diff    ?: help    q: quit",
            "enter: checkout  s/S: submit  r: restack  f: fetch  y: sync  o: PR  d: diff  ?: help  q: quit",
            "enter s S r f y o d ?  q: quit",
        ),
        LegendMode::Diff => compact_hint(
            width,
            "↑/↓: navigate files or scroll diff    pgup/pgdn: page    tab: switch panel    esc/d: close    q: quit",
            "↑/↓: navigate  pgup/pgdn: page  tab: panel  esc/d: close  q: quit",
            "↑↓ tab esc  q: quit",
        ),
        LegendMode::Help => compact_hint(
            width,
            "?/esc: close help    q: quit",
            "?/esc: close    q: quit",
            "?/esc  q",
        ),
    }
}

pub(crate) fn legend_height(mode: LegendMode, width: u16) -> u16 {
    key_hint_height(width, legend_text(mode, width))
}

pub(crate) fn render_legend(frame: &mut Frame<'_>, area: Rect, mode: LegendMode) {
    frame.render_widget(
        key_hint_paragraph(legend_text(mode, area.width)).block(theme::key_block()),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_legend_compacts_with_width() {
        assert!(legend_text(LegendMode::Tree, 140).contains("submit stack/downstack"));
        assert!(!legend_text(LegendMode::Tree, 90).contains("downstack"));
        assert_eq!(
            legend_text(LegendMode::Tree, 40),
            "enter s S r f y o d ?  q: quit"
        );
    }

    #[test]
    fn full_width_legends_fit_on_one_line() {
        for mode in [LegendMode::Tree, LegendMode::Diff, LegendMode::Help] {
            assert_eq!(legend_height(mode, 160), 3, "{mode:?}");
        }
    }
}
