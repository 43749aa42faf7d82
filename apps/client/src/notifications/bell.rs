use std::collections::HashSet;

use tracing::debug;

use crate::api_client::ApiClient;
use crate::errors::AppError;
use crate::models::notification::Notification;
use crate::notifications::{NotificationSource, Snapshot};

/// Local state behind the bell icon.
#[derive(Debug, Default)]
pub struct NotificationBell {
    notifications: Vec<Notification>,
    unread: u64,
    seen: HashSet<i64>,
    loaded: bool,
}

impl NotificationBell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread(&self) -> u64 {
        self.unread
    }

    /// Badge text: empty at zero, capped at `9+`.
    pub fn badge(&self) -> String {
        match self.unread {
            0 => String::new(),
            n if n > 9 => "9+".to_string(),
            n => n.to_string(),
        }
    }

    /// Replaces local state with `snapshot` and returns the notifications
    /// absent from the previous one. Only the current snapshot's ids are kept.
    pub fn apply(&mut self, snapshot: Snapshot) -> Vec<Notification> {
        let first_load = !self.loaded;
        self.loaded = true;
        let fresh: Vec<Notification> = snapshot
            .latest
            .iter()
            .filter(|n| !self.seen.contains(&n.id))
            .cloned()
            .collect();
        self.seen = snapshot.latest.iter().map(|n| n.id).collect();
        self.notifications = snapshot.latest;
        self.unread = snapshot.unread;
        debug!(unread = self.unread, fresh = fresh.len(), "notification snapshot applied");
        if first_load {
            Vec::new()
        } else {
            fresh
        }
    }

    /// Local effect of marking one notification read. Returns `false` when it
    /// is not held locally or was already read, in which case nothing changes.
    pub fn mark_read_local(&mut self, id: i64) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) if !n.is_read => {
                n.is_read = true;
                self.unread = self.unread.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    pub fn mark_all_read_local(&mut self) {
        for n in &mut self.notifications {
            n.is_read = true;
        }
        self.unread = 0;
    }

    pub async fn refresh(&mut self, api: &ApiClient) -> Result<Vec<Notification>, AppError> {
        let snapshot = api.snapshot().await?;
        Ok(self.apply(snapshot))
    }

    /// Marks `id` read on the server unless it is already known to be read.
    /// Ids outside the latest snapshot have an unknown read state, so the
    /// unread count is re-fetched for them instead of decremented.
    pub async fn mark_read(&mut self, api: &ApiClient, id: i64) -> Result<(), AppError> {
        let held = self.notifications.iter().find(|n| n.id == id);
        if held.is_some_and(|n| n.is_read) {
            return Ok(());
        }
        let held = held.is_some();
        api.mark_notification_read(id).await?;
        if held {
            self.mark_read_local(id);
        } else {
            self.unread = api.unread_notification_count().await?;
            debug!(id, unread = self.unread, "unread count re-fetched");
        }
        Ok(())
    }

    pub async fn mark_all_read(&mut self, api: &ApiClient) -> Result<(), AppError> {
        api.mark_all_notifications_read().await?;
        self.mark_all_read_local();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::api_client::test_support::{envelope, spawn_backend};
    use crate::models::notification::NotificationKind;
    use axum::{
        extract::Path,
        routing::{get, put},
        Router,
    };
    use serde_json::json;

    fn notification(id: i64, is_read: bool) -> Notification {
        Notification {
            id,
            title: format!("n{id}"),
            message: String::new(),
            kind: NotificationKind::NewJob,
            is_read,
            action_url: None,
            reference_id: None,
            created_at: None,
            sender: None,
        }
    }

    fn snapshot(ids: &[(i64, bool)], unread: u64) -> Snapshot {
        Snapshot {
            latest: ids.iter().map(|(id, r)| notification(*id, *r)).collect(),
            unread,
        }
    }

    #[test]
    fn test_first_snapshot_reports_nothing_new() {
        let mut bell = NotificationBell::new();
        assert!(bell.apply(snapshot(&[(2, false), (1, true)], 1)).is_empty());
        assert_eq!(bell.unread(), 1);
    }

    #[test]
    fn test_later_snapshot_reports_new_arrivals() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(1, false)], 1));
        let fresh = bell.apply(snapshot(&[(3, false), (2, false), (1, false)], 3));
        let ids: Vec<i64> = fresh.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_empty_first_snapshot_still_counts_as_loaded() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[], 0));
        let fresh = bell.apply(snapshot(&[(5, false)], 1));
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn test_mark_read_never_goes_below_zero() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(1, false), (2, false)], 0));
        assert!(bell.mark_read_local(1));
        assert_eq!(bell.unread(), 0);
        assert!(bell.notifications()[0].is_read);
    }

    #[test]
    fn test_mark_read_on_already_read_is_noop() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(1, true)], 4));
        assert!(!bell.mark_read_local(1));
        assert_eq!(bell.unread(), 4);
    }

    #[test]
    fn test_mark_read_local_ignores_ids_outside_snapshot() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(1, false)], 3));
        assert!(!bell.mark_read_local(99));
        assert_eq!(bell.unread(), 3);
    }

    #[test]
    fn test_seen_ids_track_only_current_snapshot() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(2, false), (1, false)], 2));
        bell.apply(snapshot(&[(3, false), (2, false)], 2));
        assert_eq!(bell.seen, HashSet::from([3, 2]));
    }

    /// Backend whose unread count is read from `unread` and whose read
    /// endpoint records the ids it was called with.
    async fn backend(unread: Arc<Mutex<u64>>, hits: Arc<Mutex<Vec<i64>>>) -> ApiClient {
        let count = unread.clone();
        let router = Router::new()
            .route(
                "/api/notifications/latest",
                get(|| async {
                    envelope(json!([{"id": 1, "title": "Việc mới", "type": "NEW_JOB", "isRead": false}]))
                }),
            )
            .route(
                "/api/notifications/unread-count",
                get(move || {
                    let count = count.clone();
                    async move { envelope(json!({ "count": *count.lock().unwrap() })) }
                }),
            )
            .route(
                "/api/notifications/:id/read",
                put(move |Path(id): Path<i64>| {
                    let hits = hits.clone();
                    async move {
                        hits.lock().unwrap().push(id);
                        envelope(json!(null))
                    }
                }),
            );
        spawn_backend(router).await
    }

    #[tokio::test]
    async fn test_mark_read_outside_snapshot_refetches_count() {
        let unread = Arc::new(Mutex::new(3));
        let hits = Arc::new(Mutex::new(Vec::new()));
        let api = backend(unread.clone(), hits.clone()).await;
        let mut bell = NotificationBell::new();
        bell.refresh(&api).await.unwrap();
        assert_eq!(bell.unread(), 3);

        // #99 is older than the snapshot and already read on the server.
        bell.mark_read(&api, 99).await.unwrap();
        assert_eq!(*hits.lock().unwrap(), vec![99]);
        assert_eq!(bell.unread(), 3);
    }

    #[tokio::test]
    async fn test_mark_read_in_snapshot_decrements_locally() {
        let unread = Arc::new(Mutex::new(3));
        let hits = Arc::new(Mutex::new(Vec::new()));
        let api = backend(unread.clone(), hits.clone()).await;
        let mut bell = NotificationBell::new();
        bell.refresh(&api).await.unwrap();

        bell.mark_read(&api, 1).await.unwrap();
        assert_eq!(bell.unread(), 2);
        assert!(bell.notifications()[0].is_read);

        bell.mark_read(&api, 1).await.unwrap();
        assert_eq!(*hits.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_mark_all_read_zeroes_count() {
        let mut bell = NotificationBell::new();
        bell.apply(snapshot(&[(1, false), (2, false)], 2));
        bell.mark_all_read_local();
        assert_eq!(bell.unread(), 0);
        assert!(bell.notifications().iter().all(|n| n.is_read));
    }

    #[test]
    fn test_badge_caps_at_nine() {
        let mut bell = NotificationBell::new();
        assert_eq!(bell.badge(), "");
        bell.apply(snapshot(&[], 12));
        assert_eq!(bell.badge(), "9+");
    }
}
