//! Cafeteria menu lookup
//!
//! Menus are keyed by three-letter weekday codes (`mon`..`sun`). The data
//! itself comes from a [`MenuSource`] injected at startup; the service only
//! resolves the requested day and asks the source for its entry.

use std::sync::Arc;

use chrono::{Datelike, Local, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub mod source;
pub mod table;

pub use source::{MenuSource, StaticMenuSource};
pub use table::MenuTable;

/// Provenance marker attached to scrape-backed lookups
pub const SCRAPE_SOURCE_TAG: &str = "scraping";

/// Cafeteria page the scrape path will eventually read from
pub const SCRAPE_URL: &str =
    "https://www.hanbat.ac.kr/prog/carteGuidance/kor/sub06_030301/C1/calendar.do";

/// Menu for a single day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Localized weekday name (e.g. "월요일")
    pub date: String,
    /// Newline-delimited lunch dishes
    pub lunch: String,
    /// Newline-delimited dinner dishes
    pub dinner: String,
}

impl MenuEntry {
    pub fn new(date: impl Into<String>, lunch: impl Into<String>, dinner: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            lunch: lunch.into(),
            dinner: dinner.into(),
        }
    }
}

/// Menu entry tagged with where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedMenu {
    pub source: String,
    pub data: MenuEntry,
}

/// Weekday code, Monday = 0 through Sunday = 6
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl WeekdayCode {
    /// Days the cafeteria serves meals on
    pub const WEEKDAYS: [WeekdayCode; 5] = [
        WeekdayCode::Mon,
        WeekdayCode::Tue,
        WeekdayCode::Wed,
        WeekdayCode::Thu,
        WeekdayCode::Fri,
    ];

    pub const ALL: [WeekdayCode; 7] = [
        WeekdayCode::Mon,
        WeekdayCode::Tue,
        WeekdayCode::Wed,
        WeekdayCode::Thu,
        WeekdayCode::Fri,
        WeekdayCode::Sat,
        WeekdayCode::Sun,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekdayCode::Mon => "mon",
            WeekdayCode::Tue => "tue",
            WeekdayCode::Wed => "wed",
            WeekdayCode::Thu => "thu",
            WeekdayCode::Fri => "fri",
            WeekdayCode::Sat => "sat",
            WeekdayCode::Sun => "sun",
        }
    }

    /// Parse an exact lowercase code
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|day| day.as_str() == code)
    }
}

impl From<Weekday> for WeekdayCode {
    fn from(weekday: Weekday) -> Self {
        // num_days_from_monday is always 0..=6
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl std::fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current weekday from the local system clock
pub fn today() -> Weekday {
    Local::now().weekday()
}

/// Resolve the requested day code.
///
/// A missing code resolves to the code of `today`. Any supplied value is
/// returned untouched so lookups can report it verbatim.
pub fn resolve_day(day: Option<&str>, today: Weekday) -> String {
    match day {
        None => WeekdayCode::from(today).as_str().to_string(),
        Some(code) => code.to_string(),
    }
}

/// Menu lookup over injected data sources
#[derive(Clone)]
pub struct MenuService {
    source: Arc<dyn MenuSource>,
    scraper: Arc<dyn MenuSource>,
}

impl MenuService {
    /// Serve both plain and scrape-backed lookups from `source`
    pub fn new(source: Arc<dyn MenuSource>) -> Self {
        Self {
            scraper: source.clone(),
            source,
        }
    }

    pub fn from_table(table: MenuTable) -> Self {
        Self::new(Arc::new(StaticMenuSource::new(table)))
    }

    /// Replace the data source used by the scrape path
    pub fn with_scraper(mut self, scraper: Arc<dyn MenuSource>) -> Self {
        self.scraper = scraper;
        self
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Look up the menu for `day`, defaulting to the current weekday
    pub async fn lookup(&self, day: Option<&str>) -> Result<MenuEntry> {
        self.lookup_on(day, today()).await
    }

    pub async fn lookup_on(&self, day: Option<&str>, today: Weekday) -> Result<MenuEntry> {
        let code = resolve_day(day, today);
        fetch_entry(self.source.as_ref(), &code).await
    }

    /// Scrape-backed lookup, tagged with its provenance
    pub async fn scrape(&self, day: Option<&str>) -> Result<ScrapedMenu> {
        self.scrape_on(day, today()).await
    }

    pub async fn scrape_on(&self, day: Option<&str>, today: Weekday) -> Result<ScrapedMenu> {
        tracing::debug!(url = SCRAPE_URL, source = self.scraper.name(), "Scrape requested");

        let code = resolve_day(day, today);
        match fetch_entry(self.scraper.as_ref(), &code).await {
            Ok(data) => Ok(ScrapedMenu {
                source: SCRAPE_SOURCE_TAG.to_string(),
                data,
            }),
            Err(err @ Error::Scrape(_)) => Err(err),
            // unknown days surface as a failed scrape carrying the 404 detail
            Err(err @ Error::MenuNotFound(_)) => Err(Error::scrape(format!("404: {}", err))),
            Err(err) => {
                tracing::warn!(error = %err, "Scrape source failed");
                Err(Error::scrape(err.to_string()))
            }
        }
    }
}

async fn fetch_entry(source: &dyn MenuSource, code: &str) -> Result<MenuEntry> {
    let day = WeekdayCode::parse(code).ok_or_else(|| Error::menu_not_found(code))?;

    source
        .fetch(day)
        .await?
        .ok_or_else(|| Error::menu_not_found(code))
}
