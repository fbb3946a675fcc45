//! Bug report commands.

use anyhow::Result;
use console::style;

use super::{bootstrap, require_login};
use crate::{parse_page, Cli, ReportCommands};

pub async fn cmd_report(cli: &Cli, command: &ReportCommands) -> Result<()> {
    let ctx = bootstrap(cli)?;
    require_login(&ctx.stores).await?;
    let reports = &ctx.stores.reports;

    match command {
        ReportCommands::List { page } => {
            match page {
                Some(page) => {
                    reports.set_page_filter(Some(parse_page(page)?)).await;
                    reports.fetch_reports_by_page().await;
                }
                None => reports.fetch_reports().await,
            }
            let listed = reports.state().bug_reports;
            if listed.is_empty() {
                println!("No bug reports found.");
                return Ok(());
            }
            println!();
            println!("{:<26} {:<10} Description", "Id", "Page");
            for report in &listed {
                let page = report
                    .page
                    .map(|p| format!("{p:?}").to_lowercase())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<26} {:<10} {}",
                    style(report.id.as_deref().unwrap_or("-")).dim(),
                    page,
                    report.description.as_deref().unwrap_or("")
                );
            }
            println!();
        }
        ReportCommands::Create { description, page } => {
            let page = page.as_deref().map(parse_page).transpose()?;
            reports.begin_report();
            reports.modify_draft(|r| {
                r.description = Some(description.clone());
                r.page = page;
            });
            reports.create_report().await;
            println!("Bug report filed.");
        }
        ReportCommands::Remove { id } => {
            reports.remove_report(id).await;
            println!("Removed bug report {id}");
        }
    }

    Ok(())
}
