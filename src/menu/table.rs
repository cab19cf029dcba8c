//! Immutable weekday -> menu table

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::menu::{MenuEntry, WeekdayCode};
use crate::{Error, Result};

/// Weekly menu keyed by weekday code.
///
/// Built once at startup and never mutated afterwards. Every table holds an
/// entry for each of Monday through Friday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTable {
    entries: BTreeMap<WeekdayCode, MenuEntry>,
}

impl MenuTable {
    /// Build a table, rejecting it if any weekday is missing
    pub fn new(entries: impl IntoIterator<Item = (WeekdayCode, MenuEntry)>) -> Result<Self> {
        let table = Self {
            entries: entries.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from JSON of the form `{"mon": {"date": .., "lunch": .., "dinner": ..}, ..}`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, MenuEntry> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (code, entry) in raw {
            let day = WeekdayCode::parse(&code)
                .ok_or_else(|| Error::InvalidMenu(format!("unknown weekday code '{}'", code)))?;
            entries.push((day, entry));
        }

        Self::new(entries)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json).map_err(|e| match e {
            Error::InvalidMenu(msg) => Error::InvalidMenu(format!("{}: {}", path.display(), msg)),
            other => Error::InvalidMenu(format!("{}: {}", path.display(), other)),
        })
    }

    pub fn get(&self, day: WeekdayCode) -> Option<&MenuEntry> {
        self.entries.get(&day)
    }

    /// Codes present in the table, Monday first
    pub fn days(&self) -> impl Iterator<Item = WeekdayCode> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = WeekdayCode::WEEKDAYS
            .iter()
            .filter(|day| !self.entries.contains_key(*day))
            .map(|day| day.as_str())
            .collect();

        if !missing.is_empty() {
            return Err(Error::InvalidMenu(format!(
                "missing weekdays: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }
}

impl Default for MenuTable {
    /// Sample week served until a real menu source is wired in
    fn default() -> Self {
        let entries = [
            (
                WeekdayCode::Mon,
                MenuEntry::new(
                    "월요일",
                    "제육볶음\n미역국\n밥\n김치",
                    "돈까스\n된장국\n밥\n단무지",
                ),
            ),
            (
                WeekdayCode::Tue,
                MenuEntry::new(
                    "화요일",
                    "닭갈비\n콩나물국\n밥\n깍두기",
                    "비빔밥\n미소국\n김치",
                ),
            ),
            (
                WeekdayCode::Wed,
                MenuEntry::new(
                    "수요일",
                    "불고기\n시금치국\n밥\n총각김치",
                    "김치찌개\n계란말이\n밥\n무생채",
                ),
            ),
            (
                WeekdayCode::Thu,
                MenuEntry::new(
                    "목요일",
                    "고등어구이\n미소된장국\n밥\n배추김치",
                    "치킨커리\n양파스프\n밥\n피클",
                ),
            ),
            (
                WeekdayCode::Fri,
                MenuEntry::new(
                    "금요일",
                    "순대국\n메추리알장조림\n밥\n열무김치",
                    "짜장면\n군만두\n단무지",
                ),
            ),
        ];

        Self {
            entries: entries.into_iter().collect(),
        }
    }
}
