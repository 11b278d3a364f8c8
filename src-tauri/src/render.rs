//! Markdown rendering of the page views for terminal output.

use crate::excel::{format_number, Table};
use crate::views::{
    self, CompaniesView, ContactsView, DashboardView, LeadsView, PeopleView,
};

const MAX_CELL_WIDTH: usize = 30;
const BAR_WIDTH: usize = 40;

fn truncate(display: String) -> String {
    if display.chars().count() > MAX_CELL_WIDTH {
        let head: String = display.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        display
    }
}

/// Render a table as a markdown table with a row-number column
pub fn render_table(table: &Table) -> String {
    if table.rows.is_empty() {
        return "No matching rows found.\n".to_string();
    }

    let mut output = String::new();

    output.push_str("| # | ");
    output.push_str(&table.headers.join(" | "));
    output.push_str(" |\n");

    output.push_str("|---|");
    output.push_str(&table.headers.iter().map(|_| "---").collect::<Vec<_>>().join("|"));
    output.push_str("|\n");

    for (row_idx, row) in table.rows.iter().enumerate() {
        output.push_str(&format!("| {} |", row_idx));
        for cell in row {
            output.push_str(&format!(" {} |", truncate(cell.as_text())));
        }
        output.push('\n');
    }

    output
}

/// Horizontal bar chart scaled to the largest value
pub fn render_bar_chart(bars: &[(String, f64)]) -> String {
    let max = bars.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut output = String::from("```\n");
    for (label, value) in bars {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        output.push_str(&format!(
            "{:<width$} | {} {}\n",
            label,
            "█".repeat(len),
            format_number(*value),
            width = label_width
        ));
    }
    output.push_str("```\n");
    output
}

fn filter_line(label: &str, selected: &str, options: &[String]) -> String {
    format!("{}: **{}** (options: {})\n\n", label, selected, options.join(", "))
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let stats = &view.stats;
    let mut output = format!("# {}\n\n", view.title);

    output.push_str(&format!("- Total Companies: **{}**\n", stats.total_companies));
    output.push_str(&format!("- Total People: **{}**\n", stats.total_people));
    output.push_str(&format!(
        "- Total Revenue: **{}M**\n\n",
        format_number(stats.total_revenue_millions)
    ));

    output.push_str("## Top Industries\n\n");
    let bars: Vec<(String, f64)> = stats
        .top_industries
        .iter()
        .map(|vc| (vc.value.clone(), vc.count as f64))
        .collect();
    output.push_str(&render_bar_chart(&bars));

    output.push_str("\n## Revenue by Industry (Millions)\n\n");
    let bars: Vec<(String, f64)> = stats
        .revenue_by_industry
        .iter()
        .map(|r| (r.industry.clone(), r.revenue_millions))
        .collect();
    output.push_str(&render_bar_chart(&bars));

    output
}

pub fn render_companies(view: &CompaniesView) -> String {
    let mut output = format!("# {}\n\n", view.title);
    output.push_str(&filter_line("Filter by Industry", &view.selected, &view.options));
    output.push_str(&render_table(&views::companies_table(&view.rows)));
    output
}

pub fn render_people(view: &PeopleView) -> String {
    let mut output = format!("# {}\n\n", view.title);
    output.push_str(&filter_line("Filter by Company", &view.selected, &view.options));
    output.push_str(&render_table(&views::people_table(&view.rows)));
    output
}

pub fn render_contacts(view: &ContactsView) -> String {
    let mut output = format!("# {}\n\n", view.title);
    output.push_str(&filter_line("Filter by Company", &view.selected, &view.options));
    output.push_str(&render_table(&views::contacts_table(&view.rows)));
    output
}

pub fn render_leads(view: &LeadsView) -> String {
    let mut output = format!("# {}\n\n", view.title);

    for row in &view.rows {
        output.push_str(&format!(
            "- **{}** - {} | **Status**: {}\n",
            row.name,
            row.company.as_deref().unwrap_or(""),
            row.status
        ));
    }

    output.push_str("\n## Pipeline\n\n");
    let summary: Vec<String> = view
        .counts
        .iter()
        .map(|c| format!("{}: {}", c.status, c.count))
        .collect();
    output.push_str(&summary.join(" · "));
    output.push('\n');

    output
}
