use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The JSON object the generation model must return.
///
/// The shape is strict: exactly these six keys, all strings. Anything else
/// fails deserialization and is reported as a malformed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedTest {
    pub title: String,
    pub test_paper: String,
    pub listening_script: String,
    pub answer_key: String,
    pub marking_rubric: String,
    pub matrix_report: String,
}

/// A generated test version stored in the session. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutput {
    pub id: Uuid,
    pub title: String,
    /// Markdown test paper; this is what the document export renders.
    pub test_paper: String,
    pub listening_script: String,
    pub answer_key: String,
    pub marking_rubric: String,
    /// Markdown table.
    pub matrix_report: String,
}

impl TestOutput {
    /// Assigns a fresh session id to a generated test.
    pub fn from_generated(generated: GeneratedTest) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: generated.title,
            test_paper: generated.test_paper,
            listening_script: generated.listening_script,
            answer_key: generated.answer_key,
            marking_rubric: generated.marking_rubric,
            matrix_report: generated.matrix_report,
        }
    }

    /// Panels shown for one result view, in display order.
    pub fn view(&self, view: TestView) -> Vec<ViewPanel<'_>> {
        match view {
            TestView::Paper => vec![ViewPanel::untitled(&self.test_paper)],
            TestView::Script => vec![ViewPanel::untitled(&self.listening_script)],
            TestView::Key => vec![
                ViewPanel {
                    heading: Some("Answer Key"),
                    body: &self.answer_key,
                },
                ViewPanel {
                    heading: Some("Marking Scheme/Rubric"),
                    body: &self.marking_rubric,
                },
            ],
            TestView::Matrix => vec![ViewPanel::untitled(&self.matrix_report)],
        }
    }
}

/// The result tabs of a single test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestView {
    Paper,
    Script,
    Key,
    Matrix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewPanel<'a> {
    pub heading: Option<&'static str>,
    pub body: &'a str,
}

impl<'a> ViewPanel<'a> {
    fn untitled(body: &'a str) -> Self {
        Self { heading: None, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GeneratedTest {
        GeneratedTest {
            title: "Unit 7 Test".into(),
            test_paper: "# PART A".into(),
            listening_script: "Script I".into(),
            answer_key: "1. A".into(),
            marking_rubric: "0.2 pts each".into(),
            matrix_report: "| Part | Points |".into(),
        }
    }

    #[test]
    fn test_generated_test_parses_camel_case_keys() {
        let json = r#"{
            "title": "T",
            "testPaper": "P",
            "listeningScript": "L",
            "answerKey": "K",
            "markingRubric": "R",
            "matrixReport": "M"
        }"#;
        let parsed: GeneratedTest = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.test_paper, "P");
        assert_eq!(parsed.matrix_report, "M");
    }

    #[test]
    fn test_generated_test_rejects_missing_field() {
        let json = r#"{"title": "T", "testPaper": "P"}"#;
        assert!(serde_json::from_str::<GeneratedTest>(json).is_err());
    }

    #[test]
    fn test_generated_test_rejects_extra_field() {
        let json = r#"{
            "title": "T", "testPaper": "P", "listeningScript": "L",
            "answerKey": "K", "markingRubric": "R", "matrixReport": "M",
            "grade": "9"
        }"#;
        assert!(serde_json::from_str::<GeneratedTest>(json).is_err());
    }

    #[test]
    fn test_generated_test_rejects_non_string_value() {
        let json = r#"{
            "title": "T", "testPaper": ["P"], "listeningScript": "L",
            "answerKey": "K", "markingRubric": "R", "matrixReport": "M"
        }"#;
        assert!(serde_json::from_str::<GeneratedTest>(json).is_err());
    }

    #[test]
    fn test_from_generated_assigns_distinct_ids() {
        let a = TestOutput::from_generated(sample());
        let b = TestOutput::from_generated(sample());
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "Unit 7 Test");
    }

    #[test]
    fn test_key_view_shows_answer_key_then_rubric() {
        let test = TestOutput::from_generated(sample());
        let panels = test.view(TestView::Key);
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0].heading, Some("Answer Key"));
        assert_eq!(panels[0].body, "1. A");
        assert_eq!(panels[1].body, "0.2 pts each");
    }
}
