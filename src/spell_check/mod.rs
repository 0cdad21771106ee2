//! Dictionary-based Korean spell checking
//!
//! - `dictionary`: the immutable correction table
//! - `corrector`: whitespace-token substitution over that table
//! - `classifier`: remote ML4K classification used as an advisory confidence
//! - `errors`: error types for dictionary loading and the remote service

pub mod classifier;
pub mod corrector;
pub mod dictionary;
pub mod errors;

pub use classifier::{Classification, Classifier, Ml4kClassifier, ServiceResult};
pub use corrector::{Correction, CorrectionResult, CorrectionStatus, Corrector};
pub use dictionary::{CorrectionEntry, CorrectionMap};
pub use errors::{DictionaryError, ServiceUnavailable};

use serde::Serialize;
use tracing::info;

/// Overall outcome shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Error,
    Correct,
    Incorrect,
}

/// Result of one check: the local correction plus the remote classification
#[derive(Debug)]
pub struct SpellCheck {
    pub correction: CorrectionResult,
    pub classification: ServiceResult,
}

impl SpellCheck {
    /// A failed classification marks the whole check as failed.
    pub fn status(&self) -> CheckStatus {
        if self.classification.is_err() {
            return CheckStatus::Error;
        }
        match self.correction.status {
            CorrectionStatus::Correct => CheckStatus::Correct,
            CorrectionStatus::Incorrect => CheckStatus::Incorrect,
        }
    }
}

pub struct SpellChecker<C: Classifier> {
    corrector: Corrector,
    classifier: C,
}

impl<C: Classifier> SpellChecker<C> {
    pub fn new(corrector: Corrector, classifier: C) -> Self {
        Self {
            corrector,
            classifier,
        }
    }

    pub async fn check(&self, text: &str) -> SpellCheck {
        let classification = self.classifier.classify(text).await;

        let correction = self.corrector.correct(text);
        info!(
            "🔍 Checked '{}': {} correction(s)",
            text,
            correction.corrections.len()
        );

        SpellCheck {
            correction,
            classification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::classifier::MockClassifier;

    fn small_corrector() -> Corrector {
        let map = CorrectionMap::from_entries([("안되", "안 돼"), ("바램", "바람")]).unwrap();
        Corrector::new(map)
    }

    fn classifier_returning(confidence: f64) -> MockClassifier {
        let mut mock = MockClassifier::new();
        mock.expect_classify().returning(move |_| {
            Ok(Classification {
                label: "spelling".to_string(),
                confidence,
            })
        });
        mock
    }

    #[tokio::test]
    async fn test_check_incorrect_sentence() {
        let checker = SpellChecker::new(small_corrector(), classifier_returning(81.0));
        let check = checker.check("나는 안되 바램").await;

        assert_eq!(check.status(), CheckStatus::Incorrect);
        assert_eq!(check.correction.corrected, "나는 안 돼 바람");
        assert_eq!(check.classification.unwrap().confidence, 81.0);
    }

    #[tokio::test]
    async fn test_check_correct_sentence() {
        let checker = SpellChecker::new(small_corrector(), classifier_returning(99.0));
        let check = checker.check("정상 문장입니다").await;
        assert_eq!(check.status(), CheckStatus::Correct);
    }

    #[tokio::test]
    async fn test_service_failure_is_error_but_correction_still_runs() {
        let mut mock = MockClassifier::new();
        mock.expect_classify()
            .times(1)
            .returning(|_| Err(ServiceUnavailable::Status(500)));

        let checker = SpellChecker::new(small_corrector(), mock);
        let check = checker.check("나는 안되").await;

        assert_eq!(check.status(), CheckStatus::Error);
        assert_eq!(check.correction.corrected, "나는 안 돼");
        assert_eq!(check.correction.status, CorrectionStatus::Incorrect);
    }

    #[tokio::test]
    async fn test_classifier_receives_original_text() {
        let mut mock = MockClassifier::new();
        mock.expect_classify()
            .withf(|text: &str| text == "  안되  바램 ")
            .times(1)
            .returning(|_| {
                Ok(Classification {
                    label: "x".to_string(),
                    confidence: 50.0,
                })
            });

        let checker = SpellChecker::new(small_corrector(), mock);
        let check = checker.check("  안되  바램 ").await;
        assert_eq!(check.correction.original, "  안되  바램 ");
    }
}
