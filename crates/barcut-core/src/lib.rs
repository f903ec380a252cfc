//! Cutting plan optimizer for aluminium profile orders.
//!
//! Collects the profile cuts of an order, groups them per profile and packs
//! them onto stock bars with a greedy fit that stops early once the offcut of
//! a bar is no longer than the shortest requested piece.

mod optimizer;
mod types;

pub use optimizer::format::{format_bin, format_bins, render_report};
pub use optimizer::grouping::{group_profiles, MAX_ORDER_PIECES};
pub use optimizer::packing::pack;
pub use optimizer::{optimize_orders, Optimizer};
pub use types::*;
