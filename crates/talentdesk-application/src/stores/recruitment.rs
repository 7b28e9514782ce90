//! Resume intake, candidate matching and interview questions.

use super::{list_field, read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde_json::{Value, json};
use std::path::Path;
use std::sync::{Arc, RwLock};
use talentdesk_core::http::{ApiRequest, FilePart};
use talentdesk_core::{DeskError, Result};

/// A resume file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Reads a file from disk, keeping only its file name.
    pub fn read(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| DeskError::io(format!("Not a file: {}", path.display())))?;
        Ok(Self::new(file_name, std::fs::read(path)?))
    }

    fn into_part(self, field: &str) -> FilePart {
        FilePart::new(field, self.file_name, self.bytes)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecruitmentState {
    pub resumes: Vec<Value>,
    pub match_results: Vec<Value>,
    pub interview_questions: Vec<Value>,
}

pub struct RecruitmentStore {
    pipeline: Arc<RequestPipeline>,
    state: RwLock<RecruitmentState>,
    status: StoreStatus,
}

impl RecruitmentStore {
    pub fn new(pipeline: Arc<RequestPipeline>) -> Self {
        Self {
            pipeline,
            state: RwLock::new(RecruitmentState::default()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn state(&self) -> RecruitmentState {
        read(&self.state)
    }

    /// Uploads a batch of resumes as `files[]` parts.
    pub async fn upload_resumes(&self, files: Vec<UploadFile>) -> Result<Value> {
        self.status
            .track(async {
                let parts = files.into_iter().map(|file| file.into_part("files[]")).collect();
                let request = ApiRequest::post(endpoints::RECRUITMENT_UPLOAD)
                    .multipart(parts)
                    .fallback_message("Upload failed");
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| state.resumes = list_field(&body, "results"));
                Ok(body)
            })
            .await
    }

    /// Parses one resume without storing it.
    pub async fn parse_resume(&self, file: UploadFile) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::RECRUITMENT_PARSE)
                    .multipart(vec![file.into_part("file")])
                    .fallback_message("Parse failed");
                self.pipeline.send_json(request).await
            })
            .await
    }

    pub async fn match_candidates(
        &self,
        job_description: &str,
        job_id: Option<i64>,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::RECRUITMENT_MATCH)
                    .json(&json!({ "job_description": job_description, "job_id": job_id }))?
                    .fallback_message("Matching failed");
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| state.match_results = list_field(&body, "rankings"));
                Ok(body)
            })
            .await
    }

    pub async fn generate_interview_questions(
        &self,
        candidate_name: &str,
        skills: &[String],
        job_description: &str,
    ) -> Result<Value> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::RECRUITMENT_QUESTIONS)
                    .json(&json!({
                        "candidate_name": candidate_name,
                        "skills": skills,
                        "job_description": job_description,
                    }))?
                    .fallback_message("Question generation failed");
                let body = self.pipeline.send_json(request).await?;
                update(&self.state, |state| {
                    state.interview_questions = list_field(&body, "questions")
                });
                Ok(body)
            })
            .await
    }
}
