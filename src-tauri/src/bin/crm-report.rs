use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use simple_crm_lib::crm::Selection;
use simple_crm_lib::views::{self, Page};
use simple_crm_lib::{config, excel, render, CrmApp};

#[derive(Parser)]
#[command(name = "crm-report")]
#[command(about = "Print a page of the CRM as markdown", long_about = None)]
struct Cli {
    /// Workbook to read instead of the configured one
    #[arg(long, global = true, env = config::WORKBOOK_ENV)]
    workbook: Option<PathBuf>,

    /// Write the page's rows to a new xlsx file instead of printing
    #[arg(long, global = true)]
    export: Option<PathBuf>,

    #[command(subcommand)]
    page: Option<PageCommand>,
}

#[derive(Subcommand)]
enum PageCommand {
    /// Totals, top industries and revenue
    Dashboard,
    /// Companies, optionally filtered by industry
    Companies {
        #[arg(long)]
        industry: Option<String>,
    },
    /// People, optionally filtered by company
    People {
        #[arg(long)]
        company: Option<String>,
    },
    /// People joined with their company's details
    Contacts {
        #[arg(long)]
        company: Option<String>,
    },
    /// Every person with their lead status
    Leads,
}

fn main() -> Result<()> {
    simple_crm_lib::init_logging();
    let cli = Cli::parse();

    let mut settings = simple_crm_lib::load_config_or_default();
    if let Some(workbook) = cli.workbook {
        settings.workbook_path = workbook;
    }
    let workbook = settings.workbook_path.display().to_string();
    let mut app = CrmApp::new(settings);

    let page = cli.page.unwrap_or(PageCommand::Dashboard);

    if let Some(output) = cli.export {
        let (page, selection) = match &page {
            PageCommand::Dashboard => (Page::Dashboard, Selection::All),
            PageCommand::Companies { industry } => {
                (Page::Companies, Selection::from_option(industry.as_deref()))
            }
            PageCommand::People { company } => {
                (Page::People, Selection::from_option(company.as_deref()))
            }
            PageCommand::Contacts { company } => {
                let view = app.contacts(&Selection::from_option(company.as_deref()))?;
                excel::write_table(&views::contacts_table(&view.rows), &output)
                    .with_context(|| format!("Failed to export contacts from {}", workbook))?;
                println!("Exported contacts to {}", output.display());
                return Ok(());
            }
            PageCommand::Leads => (Page::Leads, Selection::All),
        };
        let session = match page {
            Page::Leads => Some(app.open_leads_session()?),
            _ => None,
        };
        app.export_view(page, &selection, session, &output)
            .with_context(|| format!("Failed to export {} from {}", page, workbook))?;
        println!("Exported {} to {}", page, output.display());
        return Ok(());
    }

    let output = match page {
        PageCommand::Dashboard => render::render_dashboard(&app.dashboard()?),
        PageCommand::Companies { industry } => {
            render::render_companies(&app.companies(&Selection::from_option(industry.as_deref()))?)
        }
        PageCommand::People { company } => {
            render::render_people(&app.people(&Selection::from_option(company.as_deref()))?)
        }
        PageCommand::Contacts { company } => {
            render::render_contacts(&app.contacts(&Selection::from_option(company.as_deref()))?)
        }
        PageCommand::Leads => {
            let session = app.open_leads_session()?;
            render::render_leads(&app.leads(session)?)
        }
    };

    print!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_filter_flags() {
        let cli = Cli::try_parse_from(["crm-report", "companies", "--industry", "Energy"]).unwrap();
        assert!(matches!(
            cli.page,
            Some(PageCommand::Companies { industry: Some(ref i) }) if i == "Energy"
        ));

        let cli = Cli::try_parse_from(["crm-report", "people", "--export", "out.xlsx"]).unwrap();
        assert!(matches!(cli.page, Some(PageCommand::People { company: None })));
        assert_eq!(cli.export, Some(PathBuf::from("out.xlsx")));

        let cli = Cli::try_parse_from(["crm-report"]).unwrap();
        assert!(cli.page.is_none());
    }
}
