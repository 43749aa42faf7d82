use crate::api_client::ApiClient;
use crate::errors::AppError;
use crate::models::dashboard::DashboardStats;

impl ApiClient {
    /// GET /admin/stats: everything the analytics dashboard shows, in one call.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, AppError> {
        self.get("admin/stats").await
    }
}

#[cfg(test)]
mod tests {
    use crate::api_client::test_support::{envelope, spawn_backend};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboard_stats_decode() {
        let router = Router::new().route(
            "/api/admin/stats",
            get(|| async {
                envelope(json!({
                    "overviewStats": {"totalUsers": 10, "userGrowthRate": 3.2},
                    "resumeStats": {"totalResumes": 4, "approvalRate": 25.0}
                }))
            }),
        );
        let client = spawn_backend(router).await;
        let stats = client.dashboard_stats().await.unwrap();
        assert_eq!(stats.overview_stats.total_users, Some(10));
        assert_eq!(stats.resume_stats.approval_rate, Some(25.0));
    }

    #[tokio::test]
    async fn test_forbidden_for_non_admin() {
        let router = Router::new().route(
            "/api/admin/stats",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"message": "Access denied", "errorCode": "FORBIDDEN", "data": null})),
                )
            }),
        );
        let client = spawn_backend(router).await;
        let err = client.dashboard_stats().await.unwrap_err();
        assert!(err.is_unauthorized());
    }
}
