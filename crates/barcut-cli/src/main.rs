use anyhow::{Context, Result};
use barcut_core::{optimize_orders, render_report, OptimizationReport, Order};
use clap::{Parser, Subcommand};
use colored::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "barcut")]
#[command(about = "Profile cutting optimizer - plan stock bars for an order's cuts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize the cutting plan of one or more orders
    Optimize {
        /// Input file (YAML or JSON): a single order or a list of orders
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a saved report as plain text
    Report {
        /// Input report file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },
}

/// Order files hold either one order or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum OrderInput {
    Many(Vec<Order>),
    One(Order),
}

impl OrderInput {
    fn into_orders(self) -> Vec<Order> {
        match self {
            OrderInput::Many(orders) => orders,
            OrderInput::One(order) => vec![order],
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Optimize { input, output } => {
            optimize_command(input, output)?;
        }
        Commands::Report { input } => {
            report_command(input)?;
        }
    }

    Ok(())
}

fn load_orders(input: &Path) -> Result<Vec<Order>> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let parsed: OrderInput = match input.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };
    Ok(parsed.into_orders())
}

fn optimize_command(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔍 Loading orders...".bright_blue());

    let orders = load_orders(&input)?;
    let lines: usize = orders
        .iter()
        .map(|o| o.products.as_ref().map_or(0, Vec::len))
        .sum();

    println!(
        "  {} orders, {} product lines",
        orders.len().to_string().bright_white().bold(),
        lines.to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Running optimization...".bright_blue());

    let report = optimize_orders(&orders)?;

    println!();
    println!("{}", "✅ Optimization complete!".bright_green().bold());
    println!();

    println!("{}", "📊 Results:".bright_yellow().bold());
    for result in &report.results {
        println!(
            "    • {} ({}): {} bars of {} mm",
            result.profile_name.bright_white(),
            result.profile_id,
            result.total_bars,
            result.stock_length
        );
        for line in &result.lines {
            println!("        {}", line);
        }
        if !result.oversized_pieces.is_empty() {
            println!(
                "        {} {:?}",
                "Longer than stock, not placed:".bright_red(),
                result.oversized_pieces
            );
        }
    }
    println!();
    println!(
        "  Total bars: {}",
        report.summary.total_bars.to_string().bright_white().bold()
    );
    println!(
        "  Total waste: {} mm ({:.1}%)",
        report.summary.waste_length.to_string().bright_white(),
        report.summary.waste_percentage
    );
    println!();

    let json = serde_json::to_string_pretty(&report)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)?;
        println!(
            "💾 Saved report to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn report_command(input: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let report: OptimizationReport = serde_json::from_str(&content)?;

    print!("{}", render_report(&report));

    Ok(())
}
