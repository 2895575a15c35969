//! Judge API: `POST /submission/run/:problemId` and `/submission/submit/:problemId`

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub code: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a run or submission. Submissions carry the stored record id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: String,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCaseResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
}

impl Verdict {
    pub fn passed_count(&self) -> usize {
        self.test_cases.iter().filter(|case| case.passed).count()
    }

    pub fn is_accepted(&self) -> bool {
        self.status.eq_ignore_ascii_case("accepted")
    }

    /// `Accepted (3/3 passed)` style summary for a status line
    pub fn summary(&self) -> String {
        match &self.error_message {
            Some(message) => format!("{}: {}", self.status, message),
            None => format!(
                "{} ({}/{} passed)",
                self.status,
                self.passed_count(),
                self.test_cases.len()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::decode;

    #[test]
    fn test_decode_verdict() {
        let verdict: Verdict = decode(
            r#"{
                "status": "Wrong Answer",
                "runtime": 12.5,
                "memory": 2048,
                "testCases": [
                    {"input": "1 2", "expected": "3", "actual": "3", "passed": true},
                    {"input": "2 2", "expected": "4", "actual": "5", "passed": false}
                ]
            }"#,
        )
        .unwrap();

        assert!(!verdict.is_accepted());
        assert_eq!(verdict.passed_count(), 1);
        assert_eq!(verdict.summary(), "Wrong Answer (1/2 passed)");
    }

    #[test]
    fn test_compile_error_summary() {
        let verdict: Verdict =
            decode(r#"{"status": "Compilation Error", "errorMessage": "expected ';'"}"#).unwrap();
        assert!(verdict.test_cases.is_empty());
        assert_eq!(verdict.summary(), "Compilation Error: expected ';'");
    }

    #[test]
    fn test_run_request_uses_camel_case() {
        let request = RunRequest {
            code: "print(1)".into(),
            language: "python".into(),
            custom_input: Some("5".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customInput"], "5");
    }
}
