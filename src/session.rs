//! Interactive prompt loop and console rendering of check results.

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::error::Result;
use crate::logging::log_error;
use crate::spell_check::{CheckStatus, Classifier, SpellCheck, SpellChecker};

pub const PROMPT: &str = "맞춤법을 검사할 문장을 입력하세요 (종료: 'q'): ";
pub const GOODBYE: &str = "프로그램을 종료합니다.";
const ERROR_MESSAGE: &str = "검사 중 오류가 발생했습니다.";

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub json: bool,
    pub error_log: Option<PathBuf>,
}

pub fn is_quit(line: &str) -> bool {
    line.to_lowercase() == "q"
}

/// Human-readable report, one line per entry.
pub fn render(check: &SpellCheck) -> String {
    let mut out = String::new();
    match (check.status(), &check.classification) {
        (CheckStatus::Error, _) | (_, Err(_)) => {
            out.push_str(ERROR_MESSAGE);
            out.push('\n');
        }
        (CheckStatus::Correct, Ok(classification)) => {
            out.push_str(&format!("'{}'는 올바른 맞춤법입니다.\n", check.correction.original));
            out.push_str(&format!("신뢰도: {:.1}%\n", classification.confidence));
        }
        (CheckStatus::Incorrect, Ok(classification)) => {
            out.push_str("맞춤법 오류:\n");
            for c in &check.correction.corrections {
                out.push_str(&format!("- '{}' → '{}'\n", c.original, c.corrected));
            }
            out.push_str(&format!("수정된 문장: {}\n", check.correction.corrected));
            out.push_str(&format!("신뢰도: {:.1}%\n", classification.confidence));
        }
    }
    out
}

pub fn render_json(check: &SpellCheck) -> serde_json::Value {
    match &check.classification {
        Err(e) => json!({
            "status": CheckStatus::Error,
            "message": e.to_string(),
        }),
        Ok(classification) => json!({
            "original": check.correction.original,
            "correction": check.correction.corrected,
            "confidence": classification.confidence,
            "status": check.status(),
            "corrections": check.correction.corrections,
            "ml4k_label": classification.label,
        }),
    }
}

/// Check one text and write its report.
pub async fn check_and_report<C, W>(
    checker: &SpellChecker<C>,
    text: &str,
    options: &SessionOptions,
    output: &mut W,
) -> Result<SpellCheck>
where
    C: Classifier,
    W: Write,
{
    let check = checker.check(text).await;

    if let (Err(e), Some(log_path)) = (&check.classification, &options.error_log) {
        log_error(log_path, &format!("ML4K API call failed for '{}': {}", text, e));
    }

    if options.json {
        writeln!(output, "{}", render_json(&check))?;
    } else {
        write!(output, "{}", render(&check))?;
    }
    output.flush()?;
    Ok(check)
}

/// Prompt, check, report until `q` (any case) or end of input.
pub async fn run_session<C, R, W>(
    checker: &SpellChecker<C>,
    mut input: R,
    output: &mut W,
    options: &SessionOptions,
) -> Result<()>
where
    C: Classifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    loop {
        write!(output, "\n{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).await? == 0 {
            debug!("End of input");
            writeln!(output)?;
            break;
        }
        let text = line.trim_end_matches(['\n', '\r']);

        if is_quit(text) {
            writeln!(output, "{}", GOODBYE)?;
            break;
        }

        check_and_report(checker, text, options, output).await?;
    }

    info!("Session finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell_check::classifier::MockClassifier;
    use crate::spell_check::{Classification, CorrectionMap, Corrector, ServiceUnavailable};
    use std::fs;
    use tempfile::TempDir;

    fn checker_with(mock: MockClassifier) -> SpellChecker<MockClassifier> {
        let map = CorrectionMap::from_entries([("안되", "안 돼"), ("바램", "바람")]).unwrap();
        SpellChecker::new(Corrector::new(map), mock)
    }

    fn confident(confidence: f64) -> MockClassifier {
        let mut mock = MockClassifier::new();
        mock.expect_classify().returning(move |_| {
            Ok(Classification {
                label: "spelling".to_string(),
                confidence,
            })
        });
        mock
    }

    fn failing() -> MockClassifier {
        let mut mock = MockClassifier::new();
        mock.expect_classify()
            .returning(|_| Err(ServiceUnavailable::Status(502)));
        mock
    }

    #[test]
    fn test_is_quit() {
        assert!(is_quit("q"));
        assert!(is_quit("Q"));
        assert!(!is_quit("q "));
        assert!(!is_quit("quit"));
        assert!(!is_quit(""));
    }

    #[tokio::test]
    async fn test_render_incorrect() {
        let checker = checker_with(confident(81.34));
        let check = checker.check("나는 안되 바램").await;
        assert_eq!(
            render(&check),
            "맞춤법 오류:\n- '안되' → '안 돼'\n- '바램' → '바람'\n수정된 문장: 나는 안 돼 바람\n신뢰도: 81.3%\n"
        );
    }

    #[tokio::test]
    async fn test_render_correct() {
        let checker = checker_with(confident(97.0));
        let check = checker.check("정상 문장입니다").await;
        assert_eq!(render(&check), "'정상 문장입니다'는 올바른 맞춤법입니다.\n신뢰도: 97.0%\n");
    }

    #[tokio::test]
    async fn test_render_error() {
        let checker = checker_with(failing());
        let check = checker.check("나는 안되").await;
        assert_eq!(render(&check), "검사 중 오류가 발생했습니다.\n");
    }

    #[tokio::test]
    async fn test_render_json() {
        let checker = checker_with(confident(60.0));
        let check = checker.check("바램").await;
        let value = render_json(&check);
        assert_eq!(value["status"], "incorrect");
        assert_eq!(value["correction"], "바람");
        assert_eq!(value["corrections"][0]["original"], "바램");
        assert_eq!(value["confidence"], 60.0);
        assert_eq!(value["ml4k_label"], "spelling");
        assert!(value.get("label").is_none());

        let checker = checker_with(failing());
        let value = render_json(&checker.check("바램").await);
        assert_eq!(value["status"], "error");
        assert!(value["message"].as_str().unwrap().contains("502"));
    }

    #[tokio::test]
    async fn test_session_stops_on_quit() {
        let checker = checker_with(confident(90.0));
        let input: &[u8] = "나는 안되\r\nQ\n정상\n".as_bytes();
        let mut output = Vec::new();

        run_session(&checker, input, &mut output, &SessionOptions::default())
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("수정된 문장: 나는 안 돼"));
        assert!(text.ends_with(&format!("{}{}\n", PROMPT, GOODBYE)));
        assert!(!text.contains("'정상'"));
        assert_eq!(text.matches(PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn test_session_ends_on_eof() {
        let checker = checker_with(confident(90.0));
        let input: &[u8] = "정상".as_bytes();
        let mut output = Vec::new();

        run_session(&checker, input, &mut output, &SessionOptions::default())
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("'정상'는 올바른 맞춤법입니다."));
        assert!(!text.contains(GOODBYE));
    }

    #[tokio::test]
    async fn test_empty_line_is_checked() {
        let checker = checker_with(confident(50.0));
        let input: &[u8] = "\nq\n".as_bytes();
        let mut output = Vec::new();

        run_session(&checker, input, &mut output, &SessionOptions::default())
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("''는 올바른 맞춤법입니다."));
    }

    #[tokio::test]
    async fn test_service_failure_written_to_error_log() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("errors.log");
        let options = SessionOptions {
            json: false,
            error_log: Some(log_path.clone()),
        };

        let checker = checker_with(failing());
        let mut output = Vec::new();
        let check = check_and_report(&checker, "바램", &options, &mut output)
            .await
            .unwrap();

        assert_eq!(check.status(), CheckStatus::Error);
        let logged = fs::read_to_string(&log_path).unwrap();
        assert!(logged.contains("ML4K API call failed for '바램'"));
        assert_eq!(String::from_utf8(output).unwrap(), "검사 중 오류가 발생했습니다.\n");
    }
}
