//! Per-day town table.

use crate::{constants::PERCENT_DIGITS, data::simulation::SimulationData};
use serde::Serialize;

/// One town's line in the table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Town name with whitespace removed
    pub id: String,
    pub name: String,
    pub inhabitants: u64,
    pub infected: u64,
    /// Formatted share of inhabitants infected, empty when nobody is
    pub percentage: String,
}

/// Name, inhabitants, infected and percentage for every town on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub day: usize,
    pub rows: Vec<TableRow>,
    pub total_infected: u64,
}

impl Table {
    pub const HEADERS: [&'static str; 4] = ["Name", "Inhabitants", "Infected", "Percentage"];

    /// Builds the table for `day`; a day past the end shows zero counts
    pub fn for_day(data: &SimulationData, day: usize) -> Self {
        let record = data.day(day);
        let rows = data
            .towns()
            .iter()
            .enumerate()
            .map(|(index, town)| {
                let infected = record.map(|r| r.count(index)).unwrap_or(0);
                let percentage = if infected == 0 || town.size == 0 {
                    String::new()
                } else {
                    percent_format(infected as f64 / town.size as f64, PERCENT_DIGITS)
                };
                TableRow {
                    id: no_space(&town.name),
                    name: town.name.clone(),
                    inhabitants: town.size,
                    infected,
                    percentage,
                }
            })
            .collect();

        Self {
            day,
            rows,
            total_infected: record.map(|r| r.total()).unwrap_or(0),
        }
    }

    pub fn row(&self, id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

/// Formats a fraction as a percentage with `digits` decimals
pub fn percent_format(fraction: f64, digits: usize) -> String {
    format!("{:.*}%", digits, 100.0 * fraction)
}

/// Removes all whitespace, used to derive stable row and marker ids
pub fn no_space(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
