// src/client.rs
//! HTTP client for the four remote collaborators: resume upload/suggestion,
//! resume feedback, role search links, and remote ATS scoring.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::error::EngineError;
use crate::types::{
    AtsScoreResponse, AtsScoreResult, FeedbackResponse, SearchLink, UploadResumeResponse,
};

const UPLOAD_RESUME_ENDPOINT: &str = "/upload-resume/";
const RESUME_FEEDBACK_ENDPOINT: &str = "/resume-feedback/";
const SEARCH_LINKS_ENDPOINT: &str = "/api/search-links/";
const ATS_SCORE_ENDPOINT: &str = "/ats-score/";

#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| EngineError::FetchFailed(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Upload a resume document (PDF or DOCX) and receive raw suggestion
    /// text plus the extracted resume plain text.
    pub async fn upload_resume_file(
        &self,
        file_path: &Path,
        file_name: &str,
    ) -> Result<UploadResumeResponse, EngineError> {
        let content_type = content_type_for(file_name)?;
        let file_content = tokio::fs::read(file_path).await.map_err(|e| {
            EngineError::FetchFailed(format!("failed to read {}: {e}", file_path.display()))
        })?;

        let form = Form::new().part(
            "file",
            Part::bytes(file_content)
                .file_name(file_name.to_string())
                .mime_str(content_type)
                .map_err(|e| EngineError::FetchFailed(format!("failed to build multipart: {e}")))?,
        );

        let url = format!("{}{}", self.base_url, UPLOAD_RESUME_ENDPOINT);
        info!("Uploading resume to {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        self.decode(response).await
    }

    /// Submit manually entered skills text instead of a resume file.
    pub async fn upload_skills(&self, skills: &str) -> Result<UploadResumeResponse, EngineError> {
        let form = Form::new().text("skills", skills.to_string());
        let url = format!("{}{}", self.base_url, UPLOAD_RESUME_ENDPOINT);
        info!("Submitting skills text to {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        self.decode(response).await
    }

    /// Upload a resume document for narrative feedback.
    pub async fn resume_feedback(
        &self,
        file_path: &Path,
        file_name: &str,
    ) -> Result<FeedbackResponse, EngineError> {
        let content_type = content_type_for(file_name)?;
        let file_content = tokio::fs::read(file_path).await.map_err(|e| {
            EngineError::FetchFailed(format!("failed to read {}: {e}", file_path.display()))
        })?;

        let form = Form::new().part(
            "file",
            Part::bytes(file_content)
                .file_name(file_name.to_string())
                .mime_str(content_type)
                .map_err(|e| EngineError::FetchFailed(format!("failed to build multipart: {e}")))?,
        );

        let url = format!("{}{}", self.base_url, RESUME_FEEDBACK_ENDPOINT);
        info!("Requesting resume feedback from {}", url);

        let response = self.client.post(&url).multipart(form).send().await?;
        self.decode(response).await
    }

    /// Fetch the external search links for one role title.
    pub async fn search_links(&self, role: &str) -> Result<Vec<SearchLink>, EngineError> {
        let url = format!("{}{}", self.base_url, SEARCH_LINKS_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .query(&[("role", role)])
            .send()
            .await?;
        self.decode(response).await
    }

    /// Delegate ATS scoring for one role to the remote scorer.
    ///
    /// The remote honors the same matching semantics as
    /// [`crate::score::match_skills`]; its score is clamped and rounded
    /// into the 0..=100 integer the view model carries.
    pub async fn ats_score(
        &self,
        role: &str,
        resume_text: &str,
        required_skills: &[String],
    ) -> Result<AtsScoreResult, EngineError> {
        let skills_csv = required_skills.join(",");
        let url = format!("{}{}", self.base_url, ATS_SCORE_ENDPOINT);
        info!("Requesting ATS score for role '{}'", role);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("role", role),
                ("resume_text", resume_text),
                ("skills_csv", skills_csv.as_str()),
            ])
            .send()
            .await?;

        let decoded: AtsScoreResponse = self.decode(response).await?;
        Ok(AtsScoreResult {
            score: decoded.score.clamp(0.0, 100.0).round() as u8,
            matched_skills: decoded.matched_skills,
            missing_skills: decoded.missing_skills,
        })
    }

    /// Check status, then decode the body, mapping an unexpected shape to
    /// `MalformedUpstream` with the raw payload logged for diagnosis.
    async fn decode<R>(&self, response: reqwest::Response) -> Result<R, EngineError>
    where
        R: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EngineError::FetchFailed(format!(
                "upstream returned {status}: {body}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Malformed upstream response: {} (body: {})", e, body);
            EngineError::MalformedUpstream(e.to_string())
        })
    }
}

fn content_type_for(file_name: &str) -> Result<&'static str, EngineError> {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        Ok("application/pdf")
    } else if lower_name.ends_with(".docx") {
        Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    } else {
        Err(EngineError::FetchFailed(format!(
            "unsupported file format: {file_name} (only PDF or DOCX)"
        )))
    }
}
