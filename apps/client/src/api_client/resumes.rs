//! Resume (application) endpoints.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::api_client::{ApiClient, ListQuery, UploadFile};
use crate::errors::AppError;
use crate::models::page::Page;
use crate::models::resume::{
    CreateResumeRequest, CvAnalysis, Resume, ResumeStatusStats, UpdateResumeStatusRequest,
};

/// Which listing/status endpoints to use: the admin-wide ones or the
/// recruiter's own-company ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeScope {
    All,
    Company,
}

impl ResumeScope {
    fn prefix(&self) -> &'static str {
        match self {
            ResumeScope::All => "resumes",
            ResumeScope::Company => "resumes/company",
        }
    }
}

impl ApiClient {
    /// POST /resumes: multipart with the PDF and a JSON `resume` part.
    pub async fn save_resume(
        &self,
        request: &CreateResumeRequest,
        pdf: &UploadFile,
    ) -> Result<Resume, AppError> {
        let json = serde_json::to_string(request)?;
        let form = Form::new()
            .part("pdfFile", pdf.to_part()?)
            .part("resume", Part::text(json).mime_str("application/json")?);
        self.send_multipart(Method::POST, "resumes", &[], form).await
    }

    /// GET /resumes or GET /resumes/company
    pub async fn resumes(
        &self,
        scope: ResumeScope,
        query: &ListQuery,
    ) -> Result<Page<Resume>, AppError> {
        self.get_list(scope.prefix(), query).await
    }

    /// GET /resumes/me
    pub async fn my_resumes(&self, query: &ListQuery) -> Result<Page<Resume>, AppError> {
        self.get_list("resumes/me", query).await
    }

    /// DELETE /resumes/me/jobs/{jobId}
    pub async fn withdraw_resume(&self, job_id: i64) -> Result<(), AppError> {
        self.delete_unit(&format!("resumes/me/jobs/{job_id}")).await
    }

    /// PUT /resumes/me/file/{id}
    pub async fn replace_resume_file(
        &self,
        resume_id: i64,
        pdf: &UploadFile,
    ) -> Result<Resume, AppError> {
        let form = Form::new().part("pdfFile", pdf.to_part()?);
        self.send_multipart(
            Method::PUT,
            &format!("resumes/me/file/{resume_id}"),
            &[],
            form,
        )
        .await
    }

    /// GET /resumes/file/{id}: returns the link to the stored PDF.
    pub async fn resume_file_url(&self, resume_id: i64) -> Result<String, AppError> {
        self.get(&format!("resumes/file/{resume_id}")).await
    }

    /// PUT /resumes/status or PUT /resumes/company/status
    pub async fn update_resume_status(
        &self,
        scope: ResumeScope,
        request: &UpdateResumeStatusRequest,
    ) -> Result<Resume, AppError> {
        self.put_json(&format!("{}/status", scope.prefix()), request)
            .await
    }

    /// GET /resumes/stats/status or GET /resumes/company/stats/status
    pub async fn resume_status_stats(
        &self,
        scope: ResumeScope,
    ) -> Result<ResumeStatusStats, AppError> {
        self.get(&format!("{}/stats/status", scope.prefix())).await
    }

    /// GET /resumes/check-applied/{jobId}
    pub async fn has_applied(&self, job_id: i64) -> Result<bool, AppError> {
        self.get(&format!("resumes/check-applied/{job_id}")).await
    }

    /// POST /resumes/{id}/analyze
    pub async fn analyze_resume(&self, resume_id: i64) -> Result<CvAnalysis, AppError> {
        self.post_empty(&format!("resumes/{resume_id}/analyze"))
            .await
    }

    /// POST /resumes/analyze-preview?jobId=: analysis before applying.
    pub async fn analyze_resume_preview(
        &self,
        job_id: i64,
        pdf: &UploadFile,
    ) -> Result<CvAnalysis, AppError> {
        let form = Form::new().part("pdfFile", pdf.to_part()?);
        self.send_multipart(
            Method::POST,
            "resumes/analyze-preview",
            &[("jobId", job_id.to_string())],
            form,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::test_support::{envelope, spawn_backend};
    use crate::models::resume::{IdRef, ResumeStatus};
    use axum::{
        extract::{Multipart, Path, Query},
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn resume_json(id: i64, status: &str) -> Value {
        json!({
            "id": id, "status": status, "pdfUrl": "files/cv.pdf",
            "user": {"id": 1, "email": "u@x.vn"},
            "job": {"id": 2, "name": "Backend", "skills": ["Rust"], "level": "MIDDLE"},
            "company": {"id": 3, "name": "ACME"}
        })
    }

    #[tokio::test]
    async fn test_save_resume_sends_pdf_and_json_parts() {
        let router = Router::new().route(
            "/api/resumes",
            post(|mut multipart: Multipart| async move {
                let mut parts = HashMap::new();
                while let Some(field) = multipart.next_field().await.unwrap() {
                    let name = field.name().unwrap_or_default().to_string();
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    let text = field.text().await.unwrap();
                    parts.insert(name, (content_type, text));
                }
                let (json_type, json_body) = parts.get("resume").cloned().unwrap();
                let (pdf_type, _) = parts.get("pdfFile").cloned().unwrap();
                assert_eq!(json_type, "application/json");
                assert_eq!(pdf_type, "application/pdf");
                let body: Value = serde_json::from_str(&json_body).unwrap();
                envelope(resume_json(body["job"]["id"].as_i64().unwrap(), "PENDING"))
            }),
        );
        let client = spawn_backend(router).await;
        let request = CreateResumeRequest {
            email: "u@x.vn".to_string(),
            status: ResumeStatus::Pending,
            user: IdRef { id: 1 },
            job: IdRef { id: 77 },
        };
        let pdf = UploadFile::new("cv.pdf", "%PDF-1.4");
        let saved = client.save_resume(&request, &pdf).await.unwrap();
        assert_eq!(saved.id, 77);
        assert_eq!(saved.status, ResumeStatus::Pending);
    }

    #[tokio::test]
    async fn test_company_scope_status_update() {
        let router = Router::new().route(
            "/api/resumes/company/status",
            put(|Json(body): Json<Value>| async move {
                envelope(resume_json(
                    body["id"].as_i64().unwrap(),
                    body["status"].as_str().unwrap(),
                ))
            }),
        );
        let client = spawn_backend(router).await;
        let updated = client
            .update_resume_status(
                ResumeScope::Company,
                &UpdateResumeStatusRequest {
                    id: 9,
                    status: ResumeStatus::Approved,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, 9);
        assert_eq!(updated.status, ResumeStatus::Approved);
    }

    #[tokio::test]
    async fn test_check_applied_and_preview_analysis() {
        let router = Router::new()
            .route(
                "/api/resumes/check-applied/:job_id",
                get(|Path(job_id): Path<i64>| async move { envelope(job_id == 5) }),
            )
            .route(
                "/api/resumes/analyze-preview",
                post(|Query(q): Query<HashMap<String, String>>| async move {
                    envelope(json!({
                        "matchScore": 72.5,
                        "strengths": ["Rust"], "weaknesses": [], "suggestions": ["Thêm số liệu"],
                        "summary": "Khá phù hợp", "jobName": format!("job {}", q["jobId"])
                    }))
                }),
            );
        let client = spawn_backend(router).await;
        assert!(client.has_applied(5).await.unwrap());
        assert!(!client.has_applied(6).await.unwrap());

        let pdf = UploadFile::new("cv.pdf", "%PDF-1.4");
        let analysis = client.analyze_resume_preview(12, &pdf).await.unwrap();
        assert_eq!(analysis.job_name, "job 12");
        assert!((analysis.match_score - 72.5).abs() < f64::EPSILON);
    }
}
