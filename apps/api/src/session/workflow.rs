//! Generation run: sequential calls against the session's materials.
//!
//! Flow: validate → begin (loading on, request snapshot) → N awaited calls →
//!       complete (prepend batch, dashboard) or fail (nothing kept).
//!
//! The session lock is never held across a generation call. There is no retry
//! and no cancellation; handlers run this on its own task. Each call runs on a
//! task of its own, so a panicking backend ends the run as a failure and the
//! loading flag is always cleared.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::assembler::GenerationRequest;
use crate::generation::generator::{GenerationError, TestGenerator};
use crate::models::{GeneratedTest, TestOutput};
use crate::session::Session;

/// Bulk generation is capped at ten versions per run.
pub const MAX_VERSIONS: u32 = 10;

/// Runs one generation batch of `versions` tests and returns it, newest batch
/// already stored in the session.
pub async fn run_generation(
    session: Arc<Mutex<Session>>,
    generator: Arc<dyn TestGenerator>,
    prompt: String,
    versions: u32,
) -> Result<Vec<TestOutput>, AppError> {
    if !(1..=MAX_VERSIONS).contains(&versions) {
        return Err(AppError::Validation(format!(
            "versions must be between 1 and {MAX_VERSIONS}"
        )));
    }

    let ticket = session.lock().await.begin_generation(&prompt)?;
    info!(
        "Generation started: {} version(s), {} chars of material",
        versions,
        ticket.request.combined_material_text.len()
    );

    let mut batch = Vec::with_capacity(versions as usize);
    for version in 1..=versions {
        match call_generator(generator.clone(), ticket.request.clone()).await {
            Ok(generated) => batch.push(TestOutput::from_generated(generated)),
            Err(e) => {
                warn!("Generation failed on version {version}/{versions}: {e}");
                session.lock().await.fail_generation(ticket);
                return Err(AppError::Generation(e));
            }
        }
    }

    session
        .lock()
        .await
        .complete_generation(ticket, batch.clone());
    info!("Generation finished: {} test(s) added", batch.len());

    Ok(batch)
}

async fn call_generator(
    generator: Arc<dyn TestGenerator>,
    request: GenerationRequest,
) -> Result<GeneratedTest, GenerationError> {
    tokio::spawn(async move { generator.generate(&request).await })
        .await
        .unwrap_or_else(|e| {
            Err(GenerationError::Unavailable(format!(
                "Generation task aborted: {e}"
            )))
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::generation::generator::parse_generated_test;
    use crate::models::{MaterialKind, MaterialSource};
    use crate::session::Tab;

    /// Records every request and answers with a numbered test.
    #[derive(Default)]
    struct RecordingGenerator {
        requests: std::sync::Mutex<Vec<GenerationRequest>>,
    }

    #[async_trait]
    impl TestGenerator for RecordingGenerator {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedTest, GenerationError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            Ok(GeneratedTest {
                title: format!("Version {}", requests.len()),
                test_paper: "# PART A".into(),
                listening_script: "Script I".into(),
                answer_key: "1. A".into(),
                marking_rubric: "0.2".into(),
                matrix_report: "| A |".into(),
            })
        }
    }

    /// Succeeds `ok_calls` times, then returns non-JSON text.
    struct FlakyGenerator {
        ok_calls: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TestGenerator for FlakyGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedTest, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.ok_calls {
                parse_generated_test(
                    r#"{"title":"ok","testPaper":"","listeningScript":"","answerKey":"","markingRubric":"","matrixReport":""}"#,
                )
            } else {
                parse_generated_test("I'm sorry, here is the test in prose.")
            }
        }
    }

    struct PanickingGenerator;

    #[async_trait]
    impl TestGenerator for PanickingGenerator {
        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GeneratedTest, GenerationError> {
            panic!("backend bug");
        }
    }

    fn session_with(contents: &[&str]) -> Arc<Mutex<Session>> {
        let mut session = Session::new();
        for (i, c) in contents.iter().enumerate() {
            session
                .materials_mut()
                .add(MaterialSource::new(format!("m{i}.txt"), *c, MaterialKind::File));
        }
        session.select_tab(Tab::Generate);
        Arc::new(Mutex::new(session))
    }

    #[tokio::test]
    async fn test_three_versions_issue_three_identical_calls() {
        let session = session_with(&["Unit 7 text", "Unit 8 text"]);
        let generator = Arc::new(RecordingGenerator::default());

        let batch = run_generation(session.clone(), generator.clone(), String::new(), 3)
            .await
            .unwrap();
        assert_eq!(batch.len(), 3);

        let requests = generator.requests.lock().unwrap();
        assert_eq!(requests.len(), 3);
        for request in requests.iter() {
            assert_eq!(request.combined_material_text, "Unit 7 text\n\nUnit 8 text");
        }

        let session = session.lock().await;
        assert_eq!(session.tests().len(), 3);
        let titles: Vec<_> = session.tests().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Version 1", "Version 2", "Version 3"]);
        assert_eq!(session.active_tab(), Tab::Dashboard);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_malformed_output_creates_no_test() {
        let session = session_with(&["Unit 7 text"]);
        let generator = Arc::new(FlakyGenerator {
            ok_calls: 1,
            calls: AtomicUsize::new(0),
        });

        let err = run_generation(session.clone(), generator, "Focus on tenses".into(), 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Generation(GenerationError::MalformedResponse(_))
        ));

        let session = session.lock().await;
        assert!(session.tests().is_empty());
        assert_eq!(session.active_tab(), Tab::Generate);
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_versions_out_of_range_rejected() {
        let session = session_with(&["Unit 7 text"]);
        let generator = Arc::new(RecordingGenerator::default());

        for versions in [0, MAX_VERSIONS + 1] {
            let err = run_generation(session.clone(), generator.clone(), String::new(), versions)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(generator.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_materials_rejected_without_calls() {
        let session = session_with(&[]);
        let generator = Arc::new(RecordingGenerator::default());

        let err = run_generation(session.clone(), generator.clone(), String::new(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(generator.requests.lock().unwrap().is_empty());
        assert!(!session.lock().await.is_loading());
    }

    #[tokio::test]
    async fn test_panicking_backend_clears_loading_flag() {
        let session = session_with(&["Unit 7 text"]);

        let err = run_generation(session.clone(), Arc::new(PanickingGenerator), String::new(), 2)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Generation(GenerationError::Unavailable(_))
        ));
        {
            let session = session.lock().await;
            assert!(!session.is_loading());
            assert!(session.tests().is_empty());
        }

        let generator = Arc::new(RecordingGenerator::default());
        let batch = run_generation(session, generator, String::new(), 1)
            .await
            .unwrap();
        assert_eq!(batch.len(), 1);
    }
}
