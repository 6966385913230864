//! Simulation output: towns and per-day infection counts.
//!
//! Files are produced by a serializer that writes every number as a string,
//! so loading is a two-step affair: deserialize into loosely typed raw
//! records, then coerce each field into its numeric type. A field that does
//! not hold a number is reported by name instead of leaking a NaN.

use crate::{
    core::geo::{GeoBox, LatLng},
    Result, VisualizerError,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// A town on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    /// Number of inhabitants
    pub size: u64,
    pub lat: f64,
    pub long: f64,
}

impl Town {
    pub fn new(name: impl Into<String>, size: u64, lat: f64, long: f64) -> Self {
        Self {
            name: name.into(),
            size,
            lat,
            long,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.long)
    }
}

/// Infection counts of one simulated day, keyed by town index.
///
/// Towns absent from the map had no infections that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    counts: BTreeMap<usize, u64>,
    total: u64,
}

impl DayRecord {
    pub fn new<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        let counts: BTreeMap<usize, u64> = counts.into_iter().collect();
        let total = counts.values().sum();
        Self { counts, total }
    }

    /// Infections in town `index`, zero when not recorded
    pub fn count(&self, index: usize) -> u64 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// Sum over all towns
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts.iter().map(|(index, count)| (*index, *count))
    }
}

#[derive(Debug, Deserialize)]
struct RawSimulation {
    towns: BTreeMap<String, RawTown>,
    #[serde(default)]
    days: Vec<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawTown {
    name: String,
    size: Value,
    lat: Value,
    long: Value,
}

/// A fully normalized simulation file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationData {
    towns: Vec<Town>,
    days: Vec<DayRecord>,
    max_single: u64,
    max_total: u64,
}

impl SimulationData {
    /// Builds the data set and its aggregates.
    ///
    /// Counts recorded for indices past the last town are dropped.
    pub fn new(towns: Vec<Town>, days: Vec<DayRecord>) -> Self {
        let town_count = towns.len();
        let days: Vec<DayRecord> = days
            .into_iter()
            .map(|day| DayRecord::new(day.counts.into_iter().filter(|(i, _)| *i < town_count)))
            .collect();

        let max_single = days
            .iter()
            .flat_map(|day| day.counts.values().copied())
            .max()
            .unwrap_or(0);
        let max_total = days.iter().map(DayRecord::total).max().unwrap_or(0);

        Self {
            towns,
            days,
            max_single,
            max_total,
        }
    }

    /// Parses and normalizes the JSON text of a simulation file
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawSimulation = serde_json::from_str(content)?;

        let mut towns = Vec::with_capacity(raw.towns.len());
        for index in 0..raw.towns.len() {
            let raw_town = raw.towns.get(&index.to_string()).ok_or_else(|| {
                VisualizerError::ParseError(format!(
                    "towns must be keyed 0..{}, index {} is missing",
                    raw.towns.len(),
                    index
                ))
            })?;
            towns.push(Town {
                name: raw_town.name.clone(),
                size: coerce_population(&raw_town.size, &format!("towns.{}.size", index))?,
                lat: coerce_f64(&raw_town.lat, &format!("towns.{}.lat", index))?,
                long: coerce_f64(&raw_town.long, &format!("towns.{}.long", index))?,
            });
        }

        let mut days = Vec::with_capacity(raw.days.len());
        for (day_index, raw_day) in raw.days.iter().enumerate() {
            let mut counts = Vec::with_capacity(raw_day.len());
            for (key, value) in raw_day {
                let town = match key.parse::<usize>() {
                    Ok(town) if town < towns.len() => town,
                    _ => {
                        log::debug!("Ignoring key {:?} on day {}", key, day_index);
                        continue;
                    }
                };
                let count = coerce_count(value, &format!("days.{}.{}", day_index, key))?;
                counts.push((town, count));
            }
            days.push(DayRecord::new(counts));
        }

        Ok(Self::new(towns, days))
    }

    /// Reads and normalizes a simulation file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn towns(&self) -> &[Town] {
        &self.towns
    }

    pub fn days(&self) -> &[DayRecord] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&DayRecord> {
        self.days.get(index)
    }

    /// Number of simulated days
    pub fn max_days(&self) -> usize {
        self.days.len()
    }

    /// Largest count of a single town on a single day
    pub fn max_single(&self) -> u64 {
        self.max_single
    }

    /// Largest total over all towns on a single day
    pub fn max_total(&self) -> u64 {
        self.max_total
    }

    /// Smallest box containing every town; empty when there are no towns
    pub fn bounds(&self) -> GeoBox {
        find_box(&self.towns)
    }
}

/// Smallest box containing every town's coordinates
pub fn find_box(towns: &[Town]) -> GeoBox {
    GeoBox::from_points(towns.iter().map(Town::position))
}

fn coerce_f64(value: &Value, field: &str) -> Result<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(VisualizerError::ParseError(format!(
            "{}: expected a number, got {}",
            field, value
        ))),
    }
}

fn coerce_count(value: &Value, field: &str) -> Result<u64> {
    let number = coerce_f64(value, field)?;
    if number < 0.0 {
        return Err(VisualizerError::ParseError(format!(
            "{}: expected a non-negative count, got {}",
            field, value
        )));
    }
    Ok(number.trunc() as u64)
}

fn coerce_population(value: &Value, field: &str) -> Result<u64> {
    match coerce_count(value, field)? {
        0 => Err(VisualizerError::ParseError(format!(
            "{}: population must be positive, got {}",
            field, value
        ))),
        size => Ok(size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "towns": {
            "0": {"name": "Antwerpen", "size": "500000", "lat": "51.2194", "long": "4.4025"},
            "1": {"name": "Gent", "size": 250000, "lat": 51.0543, "long": 3.7174},
            "2": {"name": "Sint Niklaas", "size": "75000", "lat": "51.1650", "long": "4.1437"}
        },
        "days": [
            {"0": "10"},
            {"0": "25", "1": 4},
            {"1": "40", "2": "3", "total": "43"}
        ]
    }"#;

    #[test]
    fn test_parse_coerces_strings() {
        let data = SimulationData::from_json_str(SAMPLE).unwrap();

        assert_eq!(data.towns().len(), 3);
        assert_eq!(data.towns()[0].size, 500_000);
        assert_eq!(data.towns()[1].name, "Gent");
        assert!((data.towns()[2].lat - 51.165).abs() < 1e-9);
        assert_eq!(data.max_days(), 3);
    }

    #[test]
    fn test_sparse_days_and_aggregates() {
        let data = SimulationData::from_json_str(SAMPLE).unwrap();

        assert_eq!(data.days()[0].count(1), 0);
        assert_eq!(data.days()[1].count(1), 4);
        assert_eq!(data.days()[0].total(), 10);
        assert_eq!(data.days()[1].total(), 29);
        assert_eq!(data.days()[2].total(), 43);
        assert_eq!(data.max_single(), 40);
        assert_eq!(data.max_total(), 43);
    }

    #[test]
    fn test_non_numeric_field_is_named() {
        let content = r#"{
            "towns": {"0": {"name": "X", "size": "lots", "lat": 1, "long": 2}},
            "days": []
        }"#;

        match SimulationData::from_json_str(content) {
            Err(VisualizerError::ParseError(message)) => {
                assert!(message.contains("towns.0.size"), "{}", message)
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_town_is_rejected() {
        let content = r#"{
            "towns": {"0": {"name": "Ghost", "size": "0", "lat": 1, "long": 2}},
            "days": []
        }"#;

        match SimulationData::from_json_str(content) {
            Err(VisualizerError::ParseError(message)) => {
                assert!(message.contains("towns.0.size"), "{}", message)
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_towns_gives_empty_bounds() {
        let data = SimulationData::from_json_str(r#"{"towns": {}, "days": [{}]}"#).unwrap();

        assert!(data.towns().is_empty());
        assert_eq!(data.max_days(), 1);
        assert_eq!(data.bounds(), GeoBox::empty());
        assert_eq!(find_box(&[]), GeoBox::empty());
    }

    #[test]
    fn test_gap_in_town_indices_is_an_error() {
        let content = r#"{
            "towns": {
                "0": {"name": "A", "size": 1, "lat": 1, "long": 1},
                "2": {"name": "B", "size": 1, "lat": 2, "long": 2}
            },
            "days": []
        }"#;

        assert!(SimulationData::from_json_str(content).is_err());
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = SimulationData::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, VisualizerError::Serialization(_)));
    }

    #[test]
    fn test_negative_count_rejected() {
        let content = r#"{
            "towns": {"0": {"name": "A", "size": 1, "lat": 1, "long": 1}},
            "days": [{"0": "-3"}]
        }"#;

        assert!(SimulationData::from_json_str(content).is_err());
    }

    #[test]
    fn test_bounds_cover_all_towns() {
        let data = SimulationData::from_json_str(SAMPLE).unwrap();
        let bounds = data.bounds();

        assert!((bounds.min_lat - 51.0543).abs() < 1e-9);
        assert!((bounds.max_lat - 51.2194).abs() < 1e-9);
        assert!((bounds.min_long - 3.7174).abs() < 1e-9);
        assert!((bounds.max_long - 4.4025).abs() < 1e-9);
    }

    #[test]
    fn test_new_drops_counts_for_unknown_towns() {
        let data = SimulationData::new(
            vec![Town::new("A", 100, 50.0, 4.0)],
            vec![DayRecord::new(vec![(0, 10), (7, 99)])],
        );

        assert_eq!(data.days()[0].total(), 10);
        assert_eq!(data.max_single(), 10);
    }
}
