use serde::Serialize;
use tracing::debug;

use super::dictionary::CorrectionMap;

/// Whether any token was substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrectionStatus {
    Correct,
    Incorrect,
}

/// One substitution, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub original: String,
    pub corrected: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionResult {
    pub original: String,
    pub corrected: String,
    pub corrections: Vec<Correction>,
    pub status: CorrectionStatus,
}

/// Dictionary-driven token substitution. Stateless apart from the read-only map.
#[derive(Debug, Clone)]
pub struct Corrector {
    map: CorrectionMap,
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new(CorrectionMap::builtin().clone())
    }
}

impl Corrector {
    pub fn new(map: CorrectionMap) -> Self {
        Self { map }
    }

    /// Split on whitespace, replace tokens found in the map, rejoin with single spaces.
    pub fn correct(&self, text: &str) -> CorrectionResult {
        let mut words = Vec::new();
        let mut corrections = Vec::new();

        for token in text.split_whitespace() {
            match self.map.get(token) {
                Some(replacement) => {
                    words.push(replacement);
                    corrections.push(Correction {
                        original: token.to_string(),
                        corrected: replacement.to_string(),
                    });
                }
                None => words.push(token),
            }
        }

        let status = if corrections.is_empty() {
            CorrectionStatus::Correct
        } else {
            CorrectionStatus::Incorrect
        };
        debug!("{} substitution(s) in '{}'", corrections.len(), text);

        CorrectionResult {
            original: text.to_string(),
            corrected: words.join(" "),
            corrections,
            status,
        }
    }
}
