use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub halted: bool,
    pub status: Option<u16>,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub route: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RoutesReport {
    pub routes: Vec<RouteInfo>,
}

pub fn print_check(report: &CheckReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "ERROR"]);
            for (index, error) in report.errors.iter().enumerate() {
                table.add_row(vec![(index + 1).to_string(), error.clone()]);
            }
            println!("result: {}", verdict(report));
            if !report.errors.is_empty() {
                println!("{table}");
            }
        }
        OutputFormat::Pretty => {
            println!(
                "result={} status={} errors={}",
                verdict(report),
                report
                    .status
                    .map(|status| status.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                report.errors.len()
            );
            for error in &report.errors {
                println!("  - {error}");
            }
        }
        OutputFormat::Raw => {
            for error in &report.errors {
                println!("{error}");
            }
        }
    }
}

pub fn print_routes(report: &RoutesReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ROUTE", "FIELDS"]);
            for info in &report.routes {
                table.add_row(vec![info.route.clone(), info.fields.join(", ")]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for info in &report.routes {
                println!("{} ({} fields): {}", info.route, info.fields.len(), info.fields.join(", "));
            }
        }
        OutputFormat::Raw => {
            for info in &report.routes {
                println!("{}", info.route);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn verdict(report: &CheckReport) -> &'static str {
    match (report.valid, report.halted) {
        (true, _) => "valid",
        (false, true) => "rejected",
        (false, false) => "transferred",
    }
}
