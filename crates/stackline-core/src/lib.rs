pub(crate) mod command_adapter;
pub mod command_runner;
pub mod config;
pub mod diff_stat;
pub mod display;
pub mod doctor;
pub mod git;
pub mod pr_info;
pub mod stack_tool;
#[cfg(test)]
pub(crate) mod test_support;
pub mod time;
pub mod tree;
