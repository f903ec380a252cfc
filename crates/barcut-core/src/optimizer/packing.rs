use crate::types::*;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Packs the pieces of one profile group onto stock bars.
///
/// Pieces are sorted longest first. For every unused piece a candidate bar is
/// started and filled by scanning forward over the remaining pieces. The
/// first candidate whose offcut is at most the fire tolerance (the shortest
/// piece of the group) is accepted; otherwise the candidate with the least
/// offcut wins. Pieces longer than the stock bar are returned in
/// [`Packing::oversized`] and never placed.
pub fn pack(group: &ProfileGroup) -> Result<Packing> {
    let stock_length = group.stock_length;
    if !stock_length.is_finite() || stock_length <= 0.0 {
        return Err(OptimizerError::InvalidInput(format!(
            "Profile '{}' has non-positive stock length {}",
            group.profile_id, stock_length
        )));
    }
    if let Some(bad) = group.pieces.iter().find(|p| !p.is_finite() || **p <= 0.0) {
        return Err(OptimizerError::InvalidInput(format!(
            "Profile '{}' has non-positive piece length {}",
            group.profile_id, bad
        )));
    }

    let (mut pieces, oversized): (Vec<f64>, Vec<f64>) =
        group.pieces.iter().copied().partition(|&p| p <= stock_length);
    for &piece in &oversized {
        warn!(
            profile_id = %group.profile_id,
            piece,
            stock_length,
            "Piece exceeds stock length, leaving it unplaced"
        );
    }

    pieces.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    let fire_tolerance = pieces.last().copied().unwrap_or(0.0);

    let mut used = vec![false; pieces.len()];
    let mut remaining = pieces.len();
    let mut bins = Vec::new();

    while remaining > 0 {
        let Some(chosen) = best_candidate(&pieces, &used, stock_length, fire_tolerance) else {
            break;
        };

        for &idx in &chosen {
            used[idx] = true;
        }
        remaining -= chosen.len();

        let cuts: Vec<f64> = chosen.iter().map(|&idx| pieces[idx]).collect();
        let waste = stock_length - cuts.iter().sum::<f64>();
        bins.push(Bin { cuts, waste });
    }

    debug!(
        profile_id = %group.profile_id,
        pieces = group.pieces.len(),
        bars = bins.len(),
        fire_tolerance,
        "Packed profile group"
    );

    Ok(Packing { bins, oversized })
}

/// Picks the indices of the next bar. Returns `None` once every piece is used.
fn best_candidate(
    pieces: &[f64],
    used: &[bool],
    stock_length: f64,
    fire_tolerance: f64,
) -> Option<Vec<usize>> {
    let mut best: Option<(Vec<usize>, f64)> = None;

    for start in (0..pieces.len()).filter(|&i| !used[i]) {
        let (combo, waste) = fill_from(start, pieces, used, stock_length, fire_tolerance);

        let good_enough = waste <= fire_tolerance;
        if best.as_ref().map_or(true, |(_, best_waste)| waste < *best_waste) {
            best = Some((combo, waste));
        }
        if good_enough {
            break;
        }
    }

    best.map(|(combo, _)| combo)
}

/// Starts a bar with `pieces[start]` and greedily appends later unused pieces that fit.
fn fill_from(
    start: usize,
    pieces: &[f64],
    used: &[bool],
    stock_length: f64,
    fire_tolerance: f64,
) -> (Vec<usize>, f64) {
    let mut combo = vec![start];
    let mut total = pieces[start];

    for j in (start + 1..pieces.len()).filter(|&j| !used[j]) {
        if total + pieces[j] <= stock_length {
            combo.push(j);
            total += pieces[j];
        }
        if stock_length - total <= fire_tolerance {
            break;
        }
    }

    (combo, stock_length - total)
}
