//! Prospect rows, priority tiers and the geography a search targets.
//!
//! A [`ProspectRow`] is the fixed fourteen-column record that ends up as one
//! spreadsheet row. Every field is a plain string; the priority column is
//! interpreted through [`Priority`] only where a known tier is needed
//! (row colouring and summary counts).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status written into every freshly researched row.
pub const STATUS_TO_CONTACT: &str = "Da contattare";

/// Column headers in sheet order.
///
/// These are also the JSON keys the model is instructed to emit.
pub const HEADERS: [&str; 14] = [
    "Nome Azienda",
    "Città",
    "Indirizzo",
    "Telefono",
    "Email",
    "Sito Web",
    "Tipo",
    "Marchi Concorrenti Usati",
    "Servizi Offerti",
    "Mercato Target",
    "Priorità",
    "Note Commerciali",
    "Nome Contatto",
    "Stato",
];

/// Number of columns in a prospect row.
pub const COLUMN_COUNT: usize = HEADERS.len();

/// Commercial urgency tier assigned to a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Company openly uses competitor brands.
    Alta,
    /// Relevant trade without declared brands.
    Media,
    /// Secondary or indirect relevance.
    Bassa,
}

impl Priority {
    /// Returns all tiers, highest first.
    pub fn all() -> &'static [Priority] {
        &[Priority::Alta, Priority::Media, Priority::Bassa]
    }

    /// Returns the tier name as written in the sheet.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Alta => "ALTA",
            Priority::Media => "MEDIA",
            Priority::Bassa => "BASSA",
        }
    }

    /// Parses an exact tier name. Anything else is not a tier.
    pub fn parse(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One researched company, normalized to the fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProspectRow {
    #[serde(rename = "Nome Azienda", default)]
    pub company_name: String,
    #[serde(rename = "Città", default)]
    pub city: String,
    #[serde(rename = "Indirizzo", default)]
    pub address: String,
    #[serde(rename = "Telefono", default)]
    pub phone: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Sito Web", default)]
    pub website: String,
    #[serde(rename = "Tipo", default)]
    pub company_type: String,
    #[serde(rename = "Marchi Concorrenti Usati", default)]
    pub competitor_brands: String,
    #[serde(rename = "Servizi Offerti", default)]
    pub services: String,
    #[serde(rename = "Mercato Target", default)]
    pub target_market: String,
    #[serde(rename = "Priorità", default)]
    pub priority: String,
    #[serde(rename = "Note Commerciali", default)]
    pub notes: String,
    #[serde(rename = "Nome Contatto", default)]
    pub contact_name: String,
    #[serde(rename = "Stato", default)]
    pub status: String,
}

impl ProspectRow {
    /// The priority tier, when the priority column holds a known tier name.
    pub fn priority_tier(&self) -> Option<Priority> {
        Priority::parse(&self.priority)
    }

    /// Cell values in [`HEADERS`] order.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.company_name,
            &self.city,
            &self.address,
            &self.phone,
            &self.email,
            &self.website,
            &self.company_type,
            &self.competitor_brands,
            &self.services,
            &self.target_market,
            &self.priority,
            &self.notes,
            &self.contact_name,
            &self.status,
        ]
    }

    /// Mutable access to the field stored under `header`.
    pub fn field_mut(&mut self, header: &str) -> Option<&mut String> {
        let field = match header {
            "Nome Azienda" => &mut self.company_name,
            "Città" => &mut self.city,
            "Indirizzo" => &mut self.address,
            "Telefono" => &mut self.phone,
            "Email" => &mut self.email,
            "Sito Web" => &mut self.website,
            "Tipo" => &mut self.company_type,
            "Marchi Concorrenti Usati" => &mut self.competitor_brands,
            "Servizi Offerti" => &mut self.services,
            "Mercato Target" => &mut self.target_market,
            "Priorità" => &mut self.priority,
            "Note Commerciali" => &mut self.notes,
            "Nome Contatto" => &mut self.contact_name,
            "Stato" => &mut self.status,
            _ => return None,
        };
        Some(field)
    }
}

/// Per-tier row counts returned with every generated sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    #[serde(rename = "ALTA")]
    pub alta: usize,
    #[serde(rename = "MEDIA")]
    pub media: usize,
    #[serde(rename = "BASSA")]
    pub bassa: usize,
}

impl PriorityCounts {
    /// Counts rows per known tier. Rows with any other priority are skipped.
    pub fn tally<'a>(rows: impl IntoIterator<Item = &'a ProspectRow>) -> Self {
        let mut counts = Self::default();
        for tier in rows.into_iter().filter_map(ProspectRow::priority_tier) {
            match tier {
                Priority::Alta => counts.alta += 1,
                Priority::Media => counts.media += 1,
                Priority::Bassa => counts.bassa += 1,
            }
        }
        counts
    }
}

/// Where to look for prospects. Values are already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geography {
    pub area: String,
    pub country: String,
    /// Optional sub-national region; empty when not given.
    #[serde(default)]
    pub region: String,
}

impl Geography {
    pub fn new(area: &str, country: &str, region: Option<&str>) -> Self {
        Self {
            area: area.trim().to_string(),
            country: country.trim().to_string(),
            region: region.map(str::trim).unwrap_or_default().to_string(),
        }
    }

    /// Human-readable location, e.g. `Hamburg, Germany (Bavaria)`.
    pub fn location_label(&self) -> String {
        if self.region.is_empty() {
            format!("{}, {}", self.area, self.country)
        } else {
            format!("{}, {} ({})", self.area, self.country, self.region)
        }
    }
}
