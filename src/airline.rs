use crate::error::LogoError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// One entry of the airline metadata file.
///
/// Only the two codes are read; every other field in the source object is
/// ignored. A code that is missing, `null` or not a string is `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirlineRecord {
    #[serde(default, deserialize_with = "lenient_code")]
    pub iata: Option<String>,
    #[serde(default, deserialize_with = "lenient_code")]
    pub icao: Option<String>,
}

fn lenient_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(code)) => Ok(Some(code)),
        _ => Ok(None),
    }
}

impl AirlineRecord {
    /// The record's IATA code, if it passes validation.
    pub fn valid_iata(&self) -> Option<IataCode> {
        self.iata.as_deref().and_then(IataCode::parse)
    }
}

/// A validated two-character alphanumeric IATA code.
///
/// Case is kept as it appears in the metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IataCode(String);

impl IataCode {
    pub fn parse(code: &str) -> Option<Self> {
        is_valid_iata(code).then(|| Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name the logo for this code is stored under.
    pub fn logo_file_name(&self) -> String {
        format!("{}.png", self.0)
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exactly two characters, all alphanumeric.
pub fn is_valid_iata(code: &str) -> bool {
    code.chars().count() == 2 && code.chars().all(char::is_alphanumeric)
}

/// Read and parse the metadata file.
pub fn load_airlines(path: &Path) -> Result<Vec<AirlineRecord>, LogoError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogoError::MetadataNotFound {
            path: path.to_path_buf(),
        },
        _ => LogoError::MetadataUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    serde_json::from_str(&content).map_err(|e| LogoError::MetadataInvalid {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Build the ICAO -> IATA map from records carrying both codes.
///
/// Later records overwrite earlier ones sharing an ICAO code. The IATA side
/// is stored raw; callers validate it.
pub fn icao_lookup(airlines: &[AirlineRecord]) -> HashMap<String, String> {
    let mut lookup = HashMap::new();
    for airline in airlines {
        if let (Some(icao), Some(iata)) = (&airline.icao, &airline.iata) {
            if !icao.is_empty() && !iata.is_empty() {
                lookup.insert(icao.clone(), iata.clone());
            }
        }
    }
    lookup
}
