//! Identity lookup module: particle identity codes to display names.
//!
//! - `IdentityLookup`: immutable mapping loaded once per run, shared read-only
//!   by every graph construction.

use crate::error::DecayGraphError;
use crate::model::particle::IdentityCode;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// =#========================================================================#=
// IDENTITY LOOKUP
// =#========================================================================#=
/// Maps identity codes (as decimal strings) to particle display names.
///
/// The table is a JSON object `{"22": "gamma", "11": "e-", ...}`, usually
/// stored gzip-compressed. It is never mutated after loading and is handed
/// by reference to every [DecayGraphBuilder](crate::model::DecayGraphBuilder).
///
/// # Example
/// ```
/// use decaygraph::model::IdentityLookup;
///
/// let lookup: IdentityLookup = [("22", "gamma"), ("-11", "e+")].into_iter().collect();
/// assert_eq!(lookup.resolve(22), Some("gamma"));
/// assert_eq!(lookup.resolve(-11), Some("e+"));
/// assert_eq!(lookup.resolve(11), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityLookup {
    names: HashMap<String, String>,
}

impl IdentityLookup {
    /// Loads a gzip-compressed JSON table from `path`.
    ///
    /// # Errors
    /// [DecayGraphError::LookupTableLoad] if the file is missing, not valid
    /// gzip, or not a JSON object of strings.
    pub fn from_gzip_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DecayGraphError> {
        let path = path.as_ref();
        let load_error = |reason: String| DecayGraphError::LookupTableLoad {
            path: path.to_path_buf(),
            reason,
        };

        let file = File::open(path).map_err(|e| load_error(e.to_string()))?;
        let mut json = String::new();
        GzDecoder::new(BufReader::new(file))
            .read_to_string(&mut json)
            .map_err(|e| load_error(e.to_string()))?;

        Self::from_json_str(&json).map_err(|e| load_error(e.to_string()))
    }

    /// Parses an uncompressed JSON object of string keys and string values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let names: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { names })
    }

    /// Returns the display name for `code`, or `None` if the code is unknown.
    pub fn resolve(&self, code: IdentityCode) -> Option<&str> {
        self.names.get(&code.to_string()).map(String::as_str)
    }

    /// Returns the display name stored under the raw string `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Returns the number of known identity codes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IdentityLookup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
