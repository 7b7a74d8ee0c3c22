// src/config.rs

pub const INR_TO_CAD: f64 = 0.016; // rupees -> dollars, fixed rate
pub const PRICE_DECIMALS: i32 = 1; // decimals kept after conversion
pub const CATEGORY_DEPTH: usize = 4; // cuisine, dining type, table booking, online order
pub const PATH_LEN: usize = CATEGORY_DEPTH + 1; // categories plus restaurant name
pub const RECORD_FIELDS: usize = 8; // columns per source row
pub const FIELD_SEPARATOR: char = ','; // multi-valued category fields
pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Maps a boolean preference onto the label stored in the index.
pub fn flag_label(flag: bool) -> &'static str {
    if flag { YES } else { NO }
}

/// Knobs for turning source rows into index entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub conversion_rate: f64,
    pub price_decimals: i32,
    pub has_headers: bool, // false: a header row is dropped as malformed instead
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            conversion_rate: INR_TO_CAD,
            price_decimals: PRICE_DECIMALS,
            has_headers: false,
        }
    }
}

impl BuildConfig {
    /// Converts a raw price and rounds it to `price_decimals` places,
    /// halves to even.
    ///
    /// The tie is decided on the scaled product, so a converted value that
    /// sits one ulp below a `.x5` boundary (0.35 is really 0.34999...) can
    /// still round up where an exact-decimal rounding would round down.
    pub fn normalize_price(&self, raw_price: f64) -> f64 {
        let scale = 10f64.powi(self.price_decimals);
        (raw_price * self.conversion_rate * scale).round_ties_even() / scale
    }
}
