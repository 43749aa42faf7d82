use crate::api_client::{ApiClient, ListQuery};
use crate::errors::AppError;
use crate::models::notification::{Notification, UnreadCount};
use crate::models::page::Page;

impl ApiClient {
    /// GET /notifications?page=&size=
    pub async fn notifications(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Notification>, AppError> {
        self.get_list("notifications", &ListQuery::new(page, size))
            .await
    }

    /// GET /notifications/latest (the ten most recent)
    pub async fn latest_notifications(&self) -> Result<Vec<Notification>, AppError> {
        self.get("notifications/latest").await
    }

    /// GET /notifications/unread-count
    pub async fn unread_notification_count(&self) -> Result<u64, AppError> {
        let unread: UnreadCount = self.get("notifications/unread-count").await?;
        Ok(unread.count)
    }

    /// PUT /notifications/{id}/read
    pub async fn mark_notification_read(&self, id: i64) -> Result<(), AppError> {
        self.put_unit(&format!("notifications/{id}/read")).await
    }

    /// PUT /notifications/read-all
    pub async fn mark_all_notifications_read(&self) -> Result<(), AppError> {
        self.put_unit("notifications/read-all").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use crate::api_client::test_support::{envelope, spawn_backend};
    use axum::{
        extract::Path,
        routing::{get, put},
        Router,
    };
    use serde_json::json;

    #[tokio::test]
    async fn test_latest_and_unread_count() {
        let router = Router::new()
            .route(
                "/api/notifications/latest",
                get(|| async {
                    envelope(json!([
                        {"id": 2, "title": "Việc mới", "type": "NEW_JOB", "isRead": false},
                        {"id": 1, "title": "CV mới", "type": "NEW_RESUME", "isRead": true}
                    ]))
                }),
            )
            .route(
                "/api/notifications/unread-count",
                get(|| async { envelope(json!({"count": 1})) }),
            );
        let client = spawn_backend(router).await;
        let latest = client.latest_notifications().await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(client.unread_notification_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_hits_expected_paths() {
        let hits = Arc::new(Mutex::new(Vec::<String>::new()));
        let one = hits.clone();
        let all = hits.clone();
        let router = Router::new()
            .route(
                "/api/notifications/:id/read",
                put(move |Path(id): Path<i64>| {
                    let hits = one.clone();
                    async move {
                        hits.lock().unwrap().push(format!("read {id}"));
                        envelope(json!(null))
                    }
                }),
            )
            .route(
                "/api/notifications/read-all",
                put(move || {
                    let hits = all.clone();
                    async move {
                        hits.lock().unwrap().push("read-all".to_string());
                        envelope(json!(null))
                    }
                }),
            );
        let client = spawn_backend(router).await;
        client.mark_notification_read(4).await.unwrap();
        client.mark_all_notifications_read().await.unwrap();
        assert_eq!(*hits.lock().unwrap(), vec!["read 4", "read-all"]);
    }
}
