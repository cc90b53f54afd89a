//! Allow-list filtering of extracted records by patent number.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::normalize::strip_leading_zeros;
use crate::types::PatentRecord;

#[derive(Debug, Clone, Default)]
pub struct AllowList {
    numbers: HashSet<String>,
}

impl AllowList {
    /// One patent number per line. Blank lines and `#` comments are ignored;
    /// entries are zero-stripped to match extracted numbers.
    pub fn parse(text: &str) -> Self {
        let numbers = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(strip_leading_zeros)
            .collect();
        Self { numbers }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let list = Self::parse(&fs::read_to_string(path)?);
        info!("Loaded allow-list from {} entries={}", path.display(), list.len());
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn contains(&self, patent_number: &str) -> bool {
        self.numbers.contains(patent_number)
    }

    /// Keep records whose patent number is listed, preserving order.
    pub fn retain(&self, records: Vec<PatentRecord>) -> Vec<PatentRecord> {
        records
            .into_iter()
            .filter(|r| r.patent_number.as_deref().is_some_and(|n| self.contains(n)))
            .collect()
    }
}
