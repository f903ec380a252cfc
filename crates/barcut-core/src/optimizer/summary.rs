use crate::types::*;

/// Used length, offcut length and offcut share of one profile's bars.
pub(super) fn bar_usage(stock_length: f64, bins: &[Bin]) -> (f64, f64, f64) {
    let used: f64 = bins.iter().flat_map(|b| &b.cuts).sum();
    let waste: f64 = bins.iter().map(|b| b.waste).sum();
    let total = stock_length * bins.len() as f64;
    let waste_percentage = if total > 0.0 {
        (waste / total) * 100.0
    } else {
        0.0
    };
    (used, waste, waste_percentage)
}

/// Aggregates bar counts and offcut statistics across all results.
pub(super) fn calculate_summary(results: &[OptimizationResult]) -> Summary {
    let total_bars: u32 = results.iter().map(|r| r.total_bars).sum();
    let total_stock_length: f64 = results
        .iter()
        .map(|r| r.stock_length * r.total_bars as f64)
        .sum();
    let used_length: f64 = results.iter().map(|r| r.used_length).sum();
    let waste_length: f64 = results.iter().map(|r| r.waste_length).sum();
    let waste_percentage = if total_stock_length > 0.0 {
        (waste_length / total_stock_length) * 100.0
    } else {
        0.0
    };

    Summary {
        total_profiles: results.len() as u32,
        total_bars,
        total_stock_length,
        used_length,
        waste_length,
        waste_percentage,
        oversized_pieces: results
            .iter()
            .map(|r| r.oversized_pieces.len() as u32)
            .sum(),
    }
}
