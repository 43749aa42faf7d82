use serde::{Deserialize, Serialize};

use crate::models::job::JobLevel;
use crate::models::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResumeStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
}

impl ResumeStatus {
    pub const ALL: [ResumeStatus; 4] = [
        ResumeStatus::Pending,
        ResumeStatus::Reviewing,
        ResumeStatus::Approved,
        ResumeStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStatus::Pending => "PENDING",
            ResumeStatus::Reviewing => "REVIEWING",
            ResumeStatus::Approved => "APPROVED",
            ResumeStatus::Rejected => "REJECTED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeUser {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeJob {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub level: Option<JobLevel>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCompany {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: i64,
    pub status: ResumeStatus,
    #[serde(default)]
    pub pdf_url: Option<String>,
    pub user: Option<ResumeUser>,
    pub job: Option<ResumeJob>,
    pub company: Option<ResumeCompany>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Resume {
    pub fn job_name(&self) -> &str {
        self.job.as_ref().map(|j| j.name.as_str()).unwrap_or("-")
    }

    pub fn company_name(&self) -> &str {
        self.company.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }

    pub fn applicant_email(&self) -> &str {
        self.user.as_ref().map(|u| u.email.as_str()).unwrap_or("-")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateResumeStatusRequest {
    pub id: i64,
    pub status: ResumeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdRef {
    pub id: i64,
}

/// JSON part of the multipart application upload.
#[derive(Debug, Clone, Serialize)]
pub struct CreateResumeRequest {
    pub email: String,
    pub status: ResumeStatus,
    pub user: IdRef,
    pub job: IdRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ResumeStatusStats {
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub reviewing: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub rejected: u64,
}

impl ResumeStatusStats {
    pub fn count(&self, status: ResumeStatus) -> u64 {
        match status {
            ResumeStatus::Pending => self.pending,
            ResumeStatus::Reviewing => self.reviewing,
            ResumeStatus::Approved => self.approved,
            ResumeStatus::Rejected => self.rejected,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.reviewing + self.approved + self.rejected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvAnalysis {
    pub match_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub resume_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_serializes_wire_shape() {
        let req = CreateResumeRequest {
            email: "a@b.vn".to_string(),
            status: ResumeStatus::Pending,
            user: IdRef { id: 7 },
            job: IdRef { id: 12 },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": "a@b.vn",
                "status": "PENDING",
                "user": {"id": 7},
                "job": {"id": 12}
            })
        );
    }

    #[test]
    fn test_resume_with_partial_nested_objects() {
        let json = r#"{
            "id": 5, "status": "REVIEWING", "pdfUrl": "cv.pdf",
            "user": {"id": 1, "email": "u@x.vn"},
            "job": {"id": 2, "name": "Backend", "skills": null, "level": "MIDDLE"},
            "company": null
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.job_name(), "Backend");
        assert_eq!(resume.company_name(), "-");
        assert_eq!(resume.applicant_email(), "u@x.vn");
    }

    #[test]
    fn test_status_stats_total() {
        let stats: ResumeStatusStats =
            serde_json::from_str(r#"{"PENDING":2,"REVIEWING":1,"APPROVED":3,"REJECTED":4}"#)
                .unwrap();
        assert_eq!(stats.total(), 10);
        assert_eq!(stats.count(ResumeStatus::Approved), 3);
    }
}
