//! Notification bell: latest list with unread count, mark-read, and polling.

pub mod bell;
pub mod handlers;
pub mod poller;

use async_trait::async_trait;

use crate::api_client::ApiClient;
use crate::errors::AppError;
use crate::models::notification::Notification;

/// Latest notifications plus the unread count, fetched together.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub latest: Vec<Notification>,
    pub unread: u64,
}

#[async_trait]
pub trait NotificationSource: Send + Sync {
    async fn snapshot(&self) -> Result<Snapshot, AppError>;
}

#[async_trait]
impl NotificationSource for ApiClient {
    async fn snapshot(&self) -> Result<Snapshot, AppError> {
        let (latest, unread) = tokio::try_join!(
            self.latest_notifications(),
            self.unread_notification_count()
        )?;
        Ok(Snapshot { latest, unread })
    }
}
