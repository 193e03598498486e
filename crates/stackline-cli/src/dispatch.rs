use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};
use stackline_app::App;
use stackline_core::doctor::DoctorReport;
use stackline_tui::RunOptions;

use crate::cli::{Cli, Command};

pub fn run_with_deps(cli: Cli, app: App) -> Result<()> {
    match cli.command {
        Some(Command::Doctor) => run_doctor_command(&app),
        None => run_root_command(app, !cli.no_watch),
    }
}

fn run_root_command(app: App, watch_flag: bool) -> Result<()> {
    let git_dir = app.git_dir()?;
    tracing::info!(git_dir = %git_dir.display(), "starting session");

    let watch = watch_flag && app.config().watch.enabled;
    stackline_tui::run(app, RunOptions { watch })
}

fn run_doctor_command(app: &App) -> Result<()> {
    let report = app.doctor();
    print_doctor_report(&report);
    Ok(())
}

fn print_doctor_report(report: &DoctorReport) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Check", "Status", "Details"]);

    for check in &report.checks {
        table.add_row(vec![
            Cell::new(check.name.as_str()),
            Cell::new(check.state),
            Cell::new(check.details.as_str()),
        ]);
    }

    println!("{table}");
    println!("{}", report.summary());
}
