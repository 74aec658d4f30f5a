// src/orchestrator.rs
//! Wires parsed suggestions to the link cache and the scorer and exposes
//! the render-ready view model.
//!
//! Sequencing only: parsing is synchronous and total before any enrichment
//! starts, so the view model's order is fixed by the parser and every
//! async result merges back by role title, never by arrival order.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::client::ServiceClient;
use crate::enrich::{LinkCache, LinkFetcher, LinkState};
use crate::error::EngineError;
use crate::parse::{parse_feedback, parse_suggestions};
use crate::score;
use crate::session::SessionState;
use crate::types::{
    AtsScoreResult, FeedbackResponse, FeedbackSection, RoleSuggestion, UploadResumeResponse,
};

/// One row of the render-ready view model.
#[derive(Debug, Clone)]
pub struct RoleView {
    pub suggestion: RoleSuggestion,
    pub links: LinkState,
    pub score: Option<AtsScoreResult>,
}

pub struct Orchestrator<F: LinkFetcher> {
    session: SessionState,
    cache: LinkCache<F>,
    scorer: ServiceClient,
    suggestions: Vec<RoleSuggestion>,
    scores: HashMap<String, AtsScoreResult>,
}

impl<F: LinkFetcher> Orchestrator<F> {
    pub fn new(session: SessionState, cache: LinkCache<F>, scorer: ServiceClient) -> Self {
        Self {
            session,
            cache,
            scorer,
            suggestions: Vec::new(),
            scores: HashMap::new(),
        }
    }

    /// Absorb an upload response: persist the resume text and the raw
    /// suggestion text, parse, then kick off one link fetch per distinct
    /// role title.
    pub fn ingest_upload(&mut self, response: UploadResumeResponse) -> Result<(), EngineError> {
        if let Some(error) = response.error {
            return Err(EngineError::FetchFailed(error));
        }

        if let Some(text) = response.resume_text {
            self.session.set_resume_text(text);
        }

        if let Some(raw) = response.job_suggestions {
            self.suggestions = parse_suggestions(Some(&raw));
            self.session.set_raw_suggestions(raw);
            info!("Parsed {} role suggestions", self.suggestions.len());

            let mut seen = HashSet::new();
            for suggestion in &self.suggestions {
                if seen.insert(suggestion.title.clone()) {
                    self.cache.ensure_links(&suggestion.title);
                }
            }
        }

        Ok(())
    }

    /// Absorb a feedback response; parsing happens lazily on read.
    pub fn ingest_feedback(&mut self, response: FeedbackResponse) -> Result<(), EngineError> {
        if let Some(error) = response.error {
            return Err(EngineError::FetchFailed(error));
        }
        if let Some(raw) = response.feedback {
            self.session.set_raw_feedback(raw);
        }
        Ok(())
    }

    pub fn suggestions(&self) -> &[RoleSuggestion] {
        &self.suggestions
    }

    pub fn feedback_sections(&self) -> Vec<FeedbackSection> {
        parse_feedback(self.session.raw_feedback())
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Score one role on explicit user action.
    ///
    /// The empty-skills sentinel is resolved locally so the remote scorer
    /// never sees a division-by-zero shaped request; everything else is
    /// delegated and merged back under the role's title.
    pub async fn score_role(&mut self, title: &str) -> Result<AtsScoreResult, EngineError> {
        let suggestion = self
            .suggestions
            .iter()
            .find(|s| s.title == title)
            .cloned()
            .ok_or_else(|| EngineError::FetchFailed(format!("unknown role: {title}")))?;

        // Same precedence as `score::match_skills`: no resume text is an
        // error before the empty-skills sentinel applies.
        let resume_text = match self.session.resume_text() {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => return Err(EngineError::InputMissing),
        };

        if suggestion.required_skills.is_empty() {
            let result = score::empty_skills_result();
            self.scores.insert(title.to_string(), result.clone());
            return Ok(result);
        }

        let result = self
            .scorer
            .ats_score(title, &resume_text, &suggestion.required_skills)
            .await
            .map_err(|e| {
                warn!("ATS scoring failed for '{}': {}", title, e);
                e
            })?;

        self.scores.insert(title.to_string(), result.clone());
        Ok(result)
    }

    /// The ordered, read-only view model. Link state is merged in by
    /// title; `ensure_links` here is an idempotent no-op for every entry
    /// the ingest pass already started.
    pub fn view(&self) -> Vec<RoleView> {
        self.suggestions
            .iter()
            .map(|suggestion| RoleView {
                suggestion: suggestion.clone(),
                links: self.cache.ensure_links(&suggestion.title),
                score: self.scores.get(&suggestion.title).cloned(),
            })
            .collect()
    }

    /// Poll until no link fetch is pending or the deadline passes.
    pub async fn settle_links(&self, timeout: Duration) {
        let start = Instant::now();
        while self.cache.pending_count() > 0 && start.elapsed() < timeout {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    }

    /// Tear down per-render state when the consumer goes away.
    pub fn invalidate_links(&self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::KeyPolicy;
    use crate::types::SearchLink;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockFetcher {
        calls: Arc<AtomicUsize>,
    }

    impl LinkFetcher for MockFetcher {
        async fn fetch_links(&self, role: &str) -> Result<Vec<SearchLink>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![SearchLink {
                site: "Indeed".to_string(),
                url: format!("https://www.indeed.com/jobs?q={role}"),
            }])
        }
    }

    fn orchestrator(calls: Arc<AtomicUsize>) -> Orchestrator<MockFetcher> {
        let cache = LinkCache::new(MockFetcher { calls }, KeyPolicy::Exact);
        // Never reached by these tests; scoring either short-circuits or
        // fails before the request is sent.
        let scorer = ServiceClient::new("http://127.0.0.1:1".to_string(), 1)
            .expect("client construction cannot fail");
        Orchestrator::new(SessionState::new(), cache, scorer)
    }

    fn upload(suggestions: &str, resume_text: Option<&str>) -> UploadResumeResponse {
        UploadResumeResponse {
            job_suggestions: Some(suggestions.to_string()),
            resume_text: resume_text.map(str::to_string),
            error: None,
        }
    }

    #[tokio::test]
    async fn test_view_preserves_parser_order_and_merges_links() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(Arc::clone(&calls));

        let raw = "**Data Analyst**: Analyzes data.\nRequired Skills: SQL\n**Writer**: Writes.";
        orch.ingest_upload(upload(raw, Some("knows SQL"))).unwrap();
        orch.settle_links(Duration::from_secs(2)).await;

        let view = orch.view();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0].suggestion.title, "Data Analyst");
        assert_eq!(view[1].suggestion.title, "Writer");
        assert!(matches!(view[0].links, LinkState::Ready(_)));
        assert!(view.iter().all(|row| row.score.is_none()));
    }

    #[tokio::test]
    async fn test_one_link_fetch_per_distinct_title() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(Arc::clone(&calls));

        let raw = "**Data Analyst**: a\n**Writer**: b\n**Data Analyst**: again";
        orch.ingest_upload(upload(raw, None)).unwrap();
        orch.settle_links(Duration::from_secs(2)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upload_error_field_propagates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        let response = UploadResumeResponse {
            job_suggestions: None,
            resume_text: None,
            error: Some("Unsupported file format".to_string()),
        };
        assert!(matches!(
            orch.ingest_upload(response),
            Err(EngineError::FetchFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_score_without_resume_text_is_input_missing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        let raw = "**Data Analyst**: a\nRequired Skills: SQL";
        orch.ingest_upload(upload(raw, None)).unwrap();

        let err = orch.score_role("Data Analyst").await.unwrap_err();
        assert!(matches!(err, EngineError::InputMissing));
    }

    #[tokio::test]
    async fn test_empty_skills_without_resume_text_is_input_missing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        orch.ingest_upload(upload("Graphic Designer", None)).unwrap();

        // The missing resume is reported before the sentinel applies,
        // matching score::match_skills.
        let err = orch.score_role("Graphic Designer").await.unwrap_err();
        assert!(matches!(err, EngineError::InputMissing));
    }

    #[tokio::test]
    async fn test_empty_skills_score_resolves_locally() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        orch.ingest_upload(upload("Graphic Designer", Some("text")))
            .unwrap();

        let result = orch.score_role("Graphic Designer").await.unwrap();
        assert_eq!(result.score, score::EMPTY_SKILLS_SCORE);

        let view = orch.view();
        assert_eq!(view[0].score.as_ref().unwrap().score, 100);
    }

    #[tokio::test]
    async fn test_score_unknown_role_fails_without_aborting_view() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        orch.ingest_upload(upload("**Writer**: writes", Some("text")))
            .unwrap();
        assert!(orch.score_role("No Such Role").await.is_err());
        assert_eq!(orch.view().len(), 1);
    }

    #[tokio::test]
    async fn test_feedback_sections_from_session() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut orch = orchestrator(calls);

        orch.ingest_feedback(FeedbackResponse {
            feedback: Some("1. Summary\nGood overview.".to_string()),
            error: None,
        })
        .unwrap();

        let sections = orch.feedback_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Summary");
    }
}
