pub(crate) mod diff_view;
pub(crate) mod help_view;
pub(crate) mod legend;
pub(crate) mod loading;
pub(crate) mod modal;
pub(crate) mod status_bar;
pub(crate) mod text;
pub(crate) mod tree_view;
