use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::{debug, info};

use super::errors::DictionaryError;

/// Entries shipped with the binary, in their original order.
///
/// Treated as opaque data: `됐어` maps to itself and `웬만하면`/`웬떡이야`
/// map to non-standard spellings. They are kept exactly as collected.
const BUILTIN_ENTRIES: &[(&str, &str)] = &[
    ("안되", "안 돼"),
    ("어의없다", "어이없다"),
    ("급새", "금세"),
    ("웬만하면", "왠만하면"),
    ("웬떡이야", "왠떡이야"),
    ("할께요", "할게요"),
    ("않되나요", "안 되나요"),
    ("바램", "바람"),
    ("역활", "역할"),
    ("내꺼", "내 것"),
    ("괜차나요", "괜찮나요"),
    ("아니요", "아니오"),
    ("어케", "어떻게"),
    ("어케됐어", "어떻게 됐어"),
    ("됐어", "됐어"),
    ("모르겟어", "모르겠어"),
    ("몰랏어", "몰랐어"),
];

static BUILTIN: Lazy<CorrectionMap> = Lazy::new(|| CorrectionMap {
    entries: BUILTIN_ENTRIES
        .iter()
        .map(|(incorrect, corrected)| CorrectionEntry::new(*incorrect, *corrected))
        .collect(),
    index: BUILTIN_ENTRIES
        .iter()
        .enumerate()
        .map(|(i, (incorrect, _))| (incorrect.to_string(), i))
        .collect(),
});

/// A known-incorrect token and its replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionEntry {
    pub incorrect: String,
    pub corrected: String,
}

impl CorrectionEntry {
    pub fn new(incorrect: impl Into<String>, corrected: impl Into<String>) -> Self {
        Self {
            incorrect: incorrect.into(),
            corrected: corrected.into(),
        }
    }
}

/// Immutable, insertion-ordered table of corrections keyed by exact token text.
#[derive(Debug, Clone, Default)]
pub struct CorrectionMap {
    entries: Vec<CorrectionEntry>,
    index: HashMap<String, usize>,
}

impl CorrectionMap {
    /// Build a map, rejecting empty keys and keys that appear twice.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = CorrectionMap::default();
        for (incorrect, corrected) in entries {
            let entry = CorrectionEntry::new(incorrect, corrected);
            if entry.incorrect.is_empty() {
                return Err(DictionaryError::EmptyKey);
            }
            if map.index.contains_key(&entry.incorrect) {
                return Err(DictionaryError::DuplicateKey { key: entry.incorrect });
            }
            map.index.insert(entry.incorrect.clone(), map.entries.len());
            map.entries.push(entry);
        }
        Ok(map)
    }

    /// The dictionary compiled into the binary.
    pub fn builtin() -> &'static CorrectionMap {
        &BUILTIN
    }

    /// Load a TOML file whose `[corrections]` table maps incorrect to corrected forms.
    pub fn load(path: &Path) -> Result<Self, DictionaryError> {
        info!("📖 Loading correction dictionary from: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let map = Self::parse(&contents, &path.display().to_string())?;
        info!("✅ Loaded {} corrections", map.len());
        Ok(map)
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, DictionaryError> {
        let doc = contents
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| DictionaryError::ParseFailed {
                path: origin.to_string(),
                details: e.to_string(),
            })?;

        let table = doc
            .get("corrections")
            .and_then(|item| item.as_table_like())
            .ok_or_else(|| DictionaryError::MissingTable {
                path: origin.to_string(),
            })?;

        let mut pairs = Vec::with_capacity(table.len());
        for (key, item) in table.iter() {
            let value = item.as_str().ok_or_else(|| DictionaryError::InvalidValue {
                key: key.to_string(),
            })?;
            debug!("correction entry: '{}' -> '{}'", key, value);
            pairs.push((key.to_string(), value.to_string()));
        }

        Self::from_entries(pairs)
    }

    /// Exact-match lookup; no normalization is applied.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.index
            .get(token)
            .map(|&i| self.entries[i].corrected.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CorrectionEntry> {
        self.entries.iter()
    }
}
