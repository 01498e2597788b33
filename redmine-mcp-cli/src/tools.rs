//! Printing the tool catalogue

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliResult, IntoCliResult};
use colored::Colorize;
use redmine_mcp::mcp::create_tool_registry;
use rmcp::model::Tool;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Style},
    Table, Tabled,
};

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Print every registered tool
pub fn run_tools_command(format: OutputFormat) -> CliResult<()> {
    let tools = create_tool_registry().list_tools();

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&tools).cli_general_error()?;
            println!("{json}");
        }
        OutputFormat::Table => print_table(&tools),
    }

    Ok(())
}

fn print_table(tools: &[Tool]) {
    let use_color = Cli::should_use_color();
    let rows: Vec<ToolRow> = tools.iter().map(tool_row).collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    if use_color {
        table.with(Modify::new(Rows::one(0)).with(Color::FG_BRIGHT_CYAN));
    }
    table.with(Modify::new(Rows::new(1..)).with(Alignment::left()));

    println!("{table}");

    let summary = format!("{} tools available", tools.len());
    if use_color {
        println!("{}", summary.dimmed());
    } else {
        println!("{summary}");
    }
}

fn tool_row(tool: &Tool) -> ToolRow {
    let required = tool
        .input_schema
        .get("required")
        .and_then(|v| v.as_array())
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    ToolRow {
        name: tool.name.to_string(),
        required,
        description: summary_line(tool.description.as_deref().unwrap_or_default()),
    }
}

/// First line of a description, shortened for table output
fn summary_line(description: &str) -> String {
    let first = description.lines().next().unwrap_or_default().trim();
    if first.chars().count() > 70 {
        let cut: String = first.chars().take(67).collect();
        format!("{cut}...")
    } else {
        first.to_string()
    }
}
