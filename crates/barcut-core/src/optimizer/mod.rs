use crate::types::*;
use tracing::debug;

pub(crate) mod format;
pub(crate) mod grouping;
pub(crate) mod packing;
mod summary;

/// Builds cutting plans for the profiles of one order.
pub struct Optimizer {
    order: Order,
}

impl Optimizer {
    pub fn new(order: Order) -> Self {
        Self { order }
    }

    /// Runs grouping, packing and formatting and returns a fresh report.
    ///
    /// Profiles without any valid piece produce no result entry.
    pub fn optimize(&self) -> Result<OptimizationReport> {
        let results = profile_results(&self.order)?;
        let summary = summary::calculate_summary(&results);

        Ok(OptimizationReport { results, summary })
    }
}

fn profile_results(order: &Order) -> Result<Vec<OptimizationResult>> {
    let groups = grouping::group_profiles(order)?;
    let mut results = Vec::with_capacity(groups.len());

    for group in groups.iter().filter(|g| !g.pieces.is_empty()) {
        let packing = packing::pack(group)?;
        results.push(build_result(group, packing));
    }

    debug!(profiles = results.len(), "Order optimized");
    Ok(results)
}

fn build_result(group: &ProfileGroup, packing: Packing) -> OptimizationResult {
    let (used_length, waste_length, waste_percentage) =
        summary::bar_usage(group.stock_length, &packing.bins);

    OptimizationResult {
        profile_id: group.profile_id.clone(),
        profile_name: group.profile_name.clone(),
        stock_length: group.stock_length,
        total_bars: packing.bins.len() as u32,
        lines: format::format_bins(&packing.bins),
        bins: packing.bins,
        oversized_pieces: packing.oversized,
        used_length,
        waste_length,
        waste_percentage,
    }
}

/// Optimizes several orders and concatenates their results in order.
///
/// Groups are not merged across orders: the same profile appearing in two
/// orders yields two result entries.
pub fn optimize_orders(orders: &[Order]) -> Result<OptimizationReport> {
    let mut results = Vec::new();
    for order in orders {
        results.extend(profile_results(order)?);
    }
    let summary = summary::calculate_summary(&results);

    Ok(OptimizationReport { results, summary })
}
