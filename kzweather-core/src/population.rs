use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Population table shipped with the crate. Produced by `population-scraper`.
pub const BUILTIN_TABLE: &str = include_str!("../data/cities.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub name: String,
    /// Head count as published, digits only.
    pub population: String,
}

impl PopulationEntry {
    pub fn population_count(&self) -> Option<u64> {
        self.population.parse().ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to parse population table: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize population table: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("population table entry #{index} has an empty city name")]
    EmptyName { index: usize },

    #[error("population of '{city}' is not a positive integer: '{value}'")]
    InvalidPopulation { city: String, value: String },

    #[error("city '{0}' appears more than once")]
    Duplicate(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    #[serde(default)]
    city: Vec<PopulationEntry>,
}

/// Read-only city → population mapping, ordered as published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulationTable {
    entries: Vec<PopulationEntry>,
}

impl PopulationTable {
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, TableError> {
        let file: TableFile = toml::from_str(s)?;
        Self::from_entries(file.city)
    }

    /// Validate and wrap entries: non-empty unique names, positive populations.
    pub fn from_entries(entries: Vec<PopulationEntry>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(TableError::EmptyName { index });
            }
            match entry.population_count() {
                Some(n) if n > 0 && entry.population.chars().all(|c| c.is_ascii_digit()) => {}
                _ => {
                    return Err(TableError::InvalidPopulation {
                        city: entry.name.clone(),
                        value: entry.population.clone(),
                    });
                }
            }
            if !seen.insert(entry.name.to_lowercase()) {
                return Err(TableError::Duplicate(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn to_toml_string(&self) -> Result<String, TableError> {
        let file = TableFile { city: self.entries.clone() };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Case-insensitive lookup; returns the entry with its canonical spelling.
    pub fn get(&self, city: &str) -> Option<&PopulationEntry> {
        let city = city.trim();
        self.entries.iter().find(|e| e.name.eq_ignore_ascii_case(city))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PopulationEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
