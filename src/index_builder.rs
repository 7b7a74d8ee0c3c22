// src/index_builder.rs

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info, warn};

use crate::category_index::{split_labels, CategoryIndex};
use crate::config::{BuildConfig, PATH_LEN, RECORD_FIELDS};
use crate::error::{DineError, Result};

/// One admitted source row, price already converted.
///
/// Column order of the feed:
/// `original_index, price, rating, name, online_order, table_booking, dining_type, cuisines`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub original_index: usize,
    pub price: f64,
    pub rating: f64,
    pub name: String,
    pub online_order: String,
    pub table_booking: String,
    pub dining_type: String,
    pub cuisines: String,
}

impl RawRecord {
    /// Parses a row. Any empty field, wrong field count, or unparsable
    /// number makes the whole row malformed. So does a category or name
    /// field that holds only separators, since it yields no label.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: u64, config: &BuildConfig) -> Result<Self> {
        let malformed = |reason: String| DineError::MalformedRecord { line, reason };

        if fields.len() != RECORD_FIELDS {
            return Err(malformed(format!(
                "expected {RECORD_FIELDS} fields, got {}",
                fields.len()
            )));
        }
        let field = |i: usize| fields[i].as_ref().trim();
        if let Some(i) = (0..RECORD_FIELDS).find(|&i| field(i).is_empty()) {
            return Err(malformed(format!("field {i} is empty")));
        }
        if let Some(i) = (3..RECORD_FIELDS).find(|&i| split_labels(field(i)).next().is_none()) {
            return Err(malformed(format!("field {i} has no labels: {:?}", field(i))));
        }

        let original_index = field(0)
            .parse::<usize>()
            .map_err(|e| malformed(format!("bad index {:?}: {e}", field(0))))?;
        let raw_price = parse_amount(field(1)).map_err(&malformed)?;
        let rating = parse_amount(field(2)).map_err(&malformed)?;

        Ok(Self {
            original_index,
            price: config.normalize_price(raw_price),
            rating,
            name: field(3).to_string(),
            online_order: field(4).to_string(),
            table_booking: field(5).to_string(),
            dining_type: field(6).to_string(),
            cuisines: field(7).to_string(),
        })
    }

    /// Labels from the cuisine level down to the restaurant name.
    pub fn category_path(&self) -> [&str; PATH_LEN] {
        [
            &self.cuisines,
            &self.dining_type,
            &self.table_booking,
            &self.online_order,
            &self.name,
        ]
    }
}

fn parse_amount(text: &str) -> std::result::Result<f64, String> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(value) => Err(format!("amount out of range: {value}")),
        Err(e) => Err(format!("bad number {text:?}: {e}")),
    }
}

/// What the results display needs for one selected restaurant.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantInfo {
    pub name: String,
    pub cuisines: String,
    pub dining_type: String,
    pub rating: f64,
    pub price: f64,
}

impl From<&RawRecord> for RestaurantInfo {
    fn from(record: &RawRecord) -> Self {
        Self {
            name: record.name.clone(),
            cuisines: record.cuisines.clone(),
            dining_type: record.dining_type.clone(),
            rating: record.rating,
            price: record.price,
        }
    }
}

/// Loads restaurant rows once, keeps the admitted ones in source order,
/// and builds the `CategoryIndex` from them.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    config: BuildConfig,
    records: Vec<RawRecord>, // admission order
    positions: HashMap<usize, usize>, // original index -> position in `records`
    skipped: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            positions: HashMap::new(),
            skipped: 0,
        }
    }

    /// Reads a CSV file of restaurant rows.
    pub fn from_path<P: AsRef<Path>>(path: P, config: BuildConfig) -> Result<Self> {
        let path = path.as_ref();
        info!("loading restaurants from {}", path.display());
        Self::from_reader(File::open(path)?, config)
    }

    /// Reads CSV rows from any reader. Malformed rows are skipped, not reported.
    pub fn from_reader<R: Read>(reader: R, config: BuildConfig) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(config.has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut builder = Self::with_config(config);
        for (i, row) in csv_reader.records().enumerate() {
            let row = row?;
            let line = row.position().map_or(i as u64 + 1, |pos| pos.line());
            let fields: Vec<&str> = row.iter().collect();
            builder.push_row(&fields, line);
        }

        info!(
            "loaded {} restaurants, skipped {} rows",
            builder.records.len(),
            builder.skipped
        );
        Ok(builder)
    }

    /// Admits one row. Returns false if it was skipped.
    ///
    /// Rows that repeat an already admitted original index are skipped too.
    pub fn push_row<S: AsRef<str>>(&mut self, fields: &[S], line: u64) -> bool {
        let record = match RawRecord::from_fields(fields, line, &self.config) {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping row: {e}");
                self.skipped += 1;
                return false;
            }
        };

        if self.positions.contains_key(&record.original_index) {
            warn!(
                "skipping row at line {line}: duplicate original index {}",
                record.original_index
            );
            self.skipped += 1;
            return false;
        }

        self.positions.insert(record.original_index, self.records.len());
        self.records.push(record);
        true
    }

    /// Inserts every admitted record into a fresh index, in source order,
    /// so a later row under the same path and name overwrites an earlier one.
    pub fn build(&self) -> Result<CategoryIndex> {
        let mut index = CategoryIndex::new();
        for record in &self.records {
            index.insert(
                &record.category_path(),
                record.price,
                record.rating,
                record.original_index,
            )?;
        }
        debug!(
            "built index with {} nodes over {} restaurants",
            index.len(),
            self.records.len()
        );
        Ok(index)
    }

    /// The admitted record for an original index, if any.
    pub fn resolve(&self, original_index: usize) -> Option<&RawRecord> {
        self.positions
            .get(&original_index)
            .and_then(|&pos| self.records.get(pos))
    }

    /// Display tuples for a selection, in selection order.
    pub fn describe(&self, indices: &[usize]) -> Result<Vec<RestaurantInfo>> {
        indices
            .iter()
            .map(|&i| {
                self.resolve(i)
                    .map(RestaurantInfo::from)
                    .ok_or(DineError::UnresolvableIndex(i))
            })
            .collect()
    }

    /// Number of admitted records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows dropped as malformed or duplicate.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
