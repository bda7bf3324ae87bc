//! Lookup result types returned to callers.

use serde::Serialize;
use std::fmt;

use crate::binary::IpMatch;
use crate::Error;

/// Kind of address a query was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Ip,
    Mac,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Ip => write!(f, "ip"),
            AddressKind::Mac => write!(f, "mac"),
        }
    }
}

/// Why a single query produced no data.
///
/// "Not found" is not a failure; it is `found == false` with no error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LookupFailure {
    #[error("not a valid {0} address")]
    InvalidAddress(AddressKind),

    #[error("server is unavailable: {0}")]
    Unavailable(String),

    #[error("corrupt database: {0}")]
    CorruptData(String),
}

impl From<Error> for LookupFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::CorruptData { .. } => LookupFailure::CorruptData(err.to_string()),
            Error::Unavailable(msg) => LookupFailure::Unavailable(msg),
            other => LookupFailure::Unavailable(other.to_string()),
        }
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f32,
    pub lon: f32,
}

/// Outcome of a single address query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResult {
    /// Normalized address the result belongs to
    pub query: String,
    pub found: bool,
    /// Up to three names (organization/ISP/location, or the manufacturer)
    pub names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LookupFailure>,
}

impl LookupResult {
    fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            found: false,
            names: Vec::new(),
            country_code: None,
            coordinates: None,
            error: None,
        }
    }

    pub fn not_found(query: &str) -> Self {
        Self::empty(query)
    }

    pub fn invalid(query: &str, kind: AddressKind) -> Self {
        Self {
            error: Some(LookupFailure::InvalidAddress(kind)),
            ..Self::empty(query)
        }
    }

    pub fn failed(query: &str, err: Error) -> Self {
        Self {
            error: Some(err.into()),
            ..Self::empty(query)
        }
    }

    pub fn from_ip_match(query: &str, m: IpMatch) -> Self {
        Self {
            found: true,
            names: m.names,
            country_code: m.country_code,
            coordinates: m.coordinates.map(|(lat, lon)| Coordinates { lat, lon }),
            ..Self::empty(query)
        }
    }

    pub fn manufacturer(query: &str, name: String) -> Self {
        Self {
            found: true,
            names: vec![name],
            ..Self::empty(query)
        }
    }

    /// Names joined for display, e.g. `"Greece, Attica, Athens"`.
    pub fn display_name(&self) -> String {
        self.names.join(", ")
    }

    /// Map link for the coordinates, when present.
    pub fn maps_url(&self) -> Option<String> {
        self.coordinates
            .map(|c| format!("https://www.google.com/maps/place/{},{}", c.lat, c.lon))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.error, Some(LookupFailure::Unavailable(_)))
    }

    /// One-line summary: the names, `not found`, or the failure message.
    pub fn status(&self) -> String {
        match (&self.error, self.found) {
            (Some(err), _) => err.to_string(),
            (None, true) => self.display_name(),
            (None, false) => "not found".to_string(),
        }
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t", self.query)?;
        if let Some(code) = &self.country_code {
            write!(f, "[{}] ", code)?;
        }
        write!(f, "{}", self.status())?;
        if let Some(c) = &self.coordinates {
            write!(f, " ({}, {})", c.lat, c.lon)?;
        }
        Ok(())
    }
}
