use crate::types::{Bin, OptimizationReport};
use std::fmt;

/// Renders one bar as `Boy {n}: Kesimler -> {cuts} | Fire: {waste} mm`.
pub fn format_bin(number: usize, bin: &Bin) -> String {
    let cuts = bin
        .cuts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("Boy {}: Kesimler -> {} | Fire: {} mm", number, cuts, bin.waste)
}

/// Display lines for a bar list, numbered from 1.
pub fn format_bins(bins: &[Bin]) -> Vec<String> {
    bins.iter()
        .enumerate()
        .map(|(i, bin)| format_bin(i + 1, bin))
        .collect()
}

/// Plain text rendering of a whole report.
pub fn render_report(report: &OptimizationReport) -> String {
    report.to_string()
}

impl fmt::Display for OptimizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for result in &self.results {
            writeln!(
                f,
                "{} ({}) - {} boy",
                result.profile_name, result.profile_id, result.total_bars
            )?;
            for line in &result.lines {
                writeln!(f, "  {}", line)?;
            }
            if !result.oversized_pieces.is_empty() {
                let pieces = result
                    .oversized_pieces
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(
                    f,
                    "  Boy uzunlugunu ({}) asan parcalar: {}",
                    result.stock_length, pieces
                )?;
            }
        }

        writeln!(
            f,
            "Toplam: {} boy, fire {} mm ({:.1}%)",
            self.summary.total_bars, self.summary.waste_length, self.summary.waste_percentage
        )
    }
}
