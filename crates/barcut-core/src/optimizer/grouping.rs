use crate::types::{numeric, Order, OptimizerError, ProfileEntry, ProfileGroup, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Upper bound on the pieces one order may expand to.
pub const MAX_ORDER_PIECES: usize = 10_000;

/// Collects every requested piece of an order, keyed by profile id.
///
/// Groups come back in the order their profile id first appears. Entries
/// without an id, or without a usable stock length, cut length or cut count,
/// are skipped. Fails when the order expands to more than
/// [`MAX_ORDER_PIECES`] pieces.
pub fn group_profiles(order: &Order) -> Result<Vec<ProfileGroup>> {
    let mut groups: Vec<ProfileGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut total_pieces = 0usize;

    let entries = order
        .products
        .iter()
        .flatten()
        .filter_map(|line| line.profiles.as_ref())
        .flatten();

    for entry in entries {
        let Some((profile_id, stock_length, cut_length, count)) = usable_entry(entry) else {
            debug!(profile_id = ?entry.profile_id, "Skipping profile entry without usable cut data");
            continue;
        };

        // Compared as f64 so absurd counts never reach an allocation
        if total_pieces as f64 + count > MAX_ORDER_PIECES as f64 {
            return Err(OptimizerError::InvalidInput(format!(
                "Order expands to more than {} pieces (profile '{}' asks for {})",
                MAX_ORDER_PIECES, profile_id, count
            )));
        }
        let count = count as usize;
        total_pieces += count;

        let idx = *index.entry(profile_id.to_string()).or_insert_with(|| {
            groups.push(ProfileGroup {
                profile_id: profile_id.to_string(),
                profile_name: entry.profile_name.clone(),
                stock_length,
                pieces: Vec::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[idx];
        if group.stock_length != stock_length {
            warn!(
                profile_id = %group.profile_id,
                group_stock = group.stock_length,
                entry_stock = stock_length,
                "Mixed stock lengths for one profile, keeping the first"
            );
        }
        group.pieces.extend(std::iter::repeat(cut_length).take(count));
    }

    debug!(groups = groups.len(), pieces = total_pieces, "Grouped order profiles");
    Ok(groups)
}

/// Returns `(profile_id, stock_length, cut_length, piece_count)` for an entry
/// the packer can use. The piece count is already a whole, non-negative number.
fn usable_entry(entry: &ProfileEntry) -> Option<(&str, f64, f64, f64)> {
    let profile_id = entry.profile_id.as_deref()?;
    let cut_length = numeric(&entry.cut_length)?;
    let cut_count = numeric(&entry.cut_count)?;
    let stock_length = numeric(&entry.stock_length)?;

    if cut_length <= 0.0 || stock_length <= 0.0 {
        return None;
    }

    // One piece per step of `i = 0; i < count; i++`
    let count = if cut_count > 0.0 { cut_count.ceil() } else { 0.0 };

    Some((profile_id, stock_length, cut_length, count))
}
