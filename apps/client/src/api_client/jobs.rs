use crate::api_client::{ApiClient, ListQuery};
use crate::errors::AppError;
use crate::models::job::{Job, JobLevelStats};
use crate::models::page::Page;

impl ApiClient {
    /// GET /jobs (admin view, all companies)
    pub async fn jobs(&self, query: &ListQuery) -> Result<Page<Job>, AppError> {
        self.get_list("jobs", query).await
    }

    /// GET /jobs/company (recruiter view, own company only)
    pub async fn company_jobs(&self, query: &ListQuery) -> Result<Page<Job>, AppError> {
        self.get_list("jobs/company", query).await
    }

    /// GET /jobs/{id}
    pub async fn job(&self, id: i64) -> Result<Job, AppError> {
        self.get(&format!("jobs/{id}")).await
    }

    /// DELETE /jobs/{id}
    pub async fn delete_job(&self, id: i64) -> Result<(), AppError> {
        self.delete_unit(&format!("jobs/{id}")).await
    }

    /// DELETE /jobs/company/{id}
    pub async fn delete_company_job(&self, id: i64) -> Result<(), AppError> {
        self.delete_unit(&format!("jobs/company/{id}")).await
    }

    /// GET /jobs/stats/level
    pub async fn job_level_stats(&self) -> Result<JobLevelStats, AppError> {
        self.get("jobs/stats/level").await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::api_client::test_support::{envelope, spawn_backend};
    use crate::api_client::ListQuery;
    use axum::{extract::Query, routing::get, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_list_forwards_filter_and_sort() {
        let router = Router::new().route(
            "/api/jobs",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                envelope(json!({
                    "content": [{
                        "id": 1, "name": params.get("filter").cloned().unwrap_or_default(),
                        "level": "SENIOR", "status": "ACTIVE",
                        "company": {"id": 3, "name": params.get("sort").cloned().unwrap_or_default()},
                        "skills": []
                    }],
                    "page": params.get("page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(0),
                    "size": 5, "totalElements": 1, "totalPages": 1
                }))
            }),
        );
        let client = spawn_backend(router).await;
        let mut query = ListQuery::new(2, 5);
        query.filter = Some("name ~ '*rust*'".to_string());
        query.sort = Some("createdAt,desc".to_string());

        let page = client.jobs(&query).await.unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.content[0].name, "name ~ '*rust*'");
        assert_eq!(page.content[0].company_name(), "createdAt,desc");
    }

    #[tokio::test]
    async fn test_level_stats() {
        let router = Router::new().route(
            "/api/jobs/stats/level",
            get(|| async {
                envelope(json!({"INTERN": 1, "FRESHER": 2, "MIDDLE": 3, "SENIOR": 4, "LEADER": 5}))
            }),
        );
        let client = spawn_backend(router).await;
        let stats = client.job_level_stats().await.unwrap();
        assert_eq!(stats.leader, 5);
    }
}
