use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Input: an order snapshot as exported by the order screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    /// Product lines of the order; `None` when the order carries no line list
    #[serde(
        rename = "urunler",
        alias = "products",
        default,
        deserialize_with = "lenient_list"
    )]
    pub products: Option<Vec<ProductLine>>,
}

/// One product line (window, door, ...) of an order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductLine {
    #[serde(
        rename = "profiller",
        alias = "profiles",
        default,
        deserialize_with = "lenient_list"
    )]
    pub profiles: Option<Vec<ProfileEntry>>,
}

/// Cut requirement of one profile within a product line.
///
/// Numeric fields are kept as raw JSON values: the order screens store
/// whatever the user typed, and entries that do not hold a number are
/// skipped during grouping instead of failing the whole order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// `None` when the entry carries no usable id; such entries are skipped
    #[serde(
        rename = "profil_id",
        alias = "profile_id",
        default,
        deserialize_with = "lenient_id"
    )]
    pub profile_id: Option<String>,
    #[serde(
        rename = "profil_adi",
        alias = "profile_name",
        default,
        deserialize_with = "lenient_name"
    )]
    pub profile_name: String,
    /// Length of one uncut stock bar
    #[serde(rename = "boy_uzunlugu", alias = "stock_length", default)]
    pub stock_length: Value,
    #[serde(rename = "kesim_olcusu", alias = "cut_length", default)]
    pub cut_length: Value,
    #[serde(rename = "kesim_adedi", alias = "cut_count", default)]
    pub cut_count: Value,
}

impl ProfileEntry {
    pub fn new(
        profile_id: impl Into<String>,
        profile_name: impl Into<String>,
        stock_length: f64,
        cut_length: f64,
        cut_count: u32,
    ) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            profile_name: profile_name.into(),
            stock_length: Value::from(stock_length),
            cut_length: Value::from(cut_length),
            cut_count: Value::from(cut_count),
        }
    }
}

/// Reads a JSON value as a finite number. Numeric strings count as numbers.
pub fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Keeps a list only when the value is an array; elements that do not
/// parse are dropped one by one.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match serde_json::from_value(item) {
                    Ok(parsed) => Some(parsed),
                    Err(err) => {
                        tracing::debug!(%err, "Skipping malformed order element");
                        None
                    }
                })
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// All pieces requested for one profile, flattened to individual lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileGroup {
    pub profile_id: String,
    pub profile_name: String,
    pub stock_length: f64,
    pub pieces: Vec<f64>,
}

/// One stock bar and the cuts assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub cuts: Vec<f64>,
    pub waste: f64,
}

/// Packer output for a single group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    pub bins: Vec<Bin>,
    /// Pieces longer than the stock bar; never placed
    pub oversized: Vec<f64>,
}

/// Packing plan for one profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub profile_id: String,
    pub profile_name: String,
    pub stock_length: f64,
    pub total_bars: u32,
    pub bins: Vec<Bin>,
    /// Display lines, one per bar
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub oversized_pieces: Vec<f64>,
    pub used_length: f64,
    pub waste_length: f64,
    pub waste_percentage: f64,
}

/// Totals over every profile of a report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_profiles: u32,
    pub total_bars: u32,
    pub total_stock_length: f64,
    pub used_length: f64,
    pub waste_length: f64,
    pub waste_percentage: f64,
    /// Number of pieces that could not be placed on any bar
    pub oversized_pieces: u32,
}

/// Output: what the optimizer returns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub results: Vec<OptimizationResult>,
    pub summary: Summary,
}

/// Error type for optimization
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
