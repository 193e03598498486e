use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Branch-level commands available from the tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TreeKey {
    Checkout,
    CheckoutTrunk,
    SubmitStack,
    SubmitDownstack,
    Restack,
    RepoSync,
    Sync,
    OpenPr,
    Diff,
    Help,
}

pub(crate) fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_page_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::PageUp)
}

pub(crate) fn is_page_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::PageDown | KeyCode::Char(' '))
}

pub(crate) fn is_tab(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab)
}

pub(crate) fn is_help(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('?'))
}

pub(crate) fn is_diff(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('d')) && !is_ctrl(key)
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    is_ctrl(key) && key.code == KeyCode::Char('c')
}

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q')) || is_ctrl_c(key)
}

pub(crate) fn tree_key(key: KeyEvent) -> Option<TreeKey> {
    if is_ctrl(key) {
        return None;
    }

    match key.code {
        KeyCode::Enter => Some(TreeKey::Checkout),
        KeyCode::Char('m') => Some(TreeKey::CheckoutTrunk),
        KeyCode::Char('s') => Some(TreeKey::SubmitStack),
        KeyCode::Char('S') => Some(TreeKey::SubmitDownstack),
        KeyCode::Char('r') => Some(TreeKey::Restack),
        KeyCode::Char('f') => Some(TreeKey::RepoSync),
        KeyCode::Char('y') => Some(TreeKey::Sync),
        KeyCode::Char('o') => Some(TreeKey::OpenPr),
        KeyCode::Char('d') => Some(TreeKey::Diff),
        KeyCode::Char('?') => Some(TreeKey::Help),
        _ => None,
    }
}

fn is_ctrl(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
}
