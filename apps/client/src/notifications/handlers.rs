use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::display::format::relative_time;
use crate::display::status::{notification_label, notification_tone};
use crate::display::{badge, toast};
use crate::errors::AppError;
use crate::listing::Pagination;
use crate::models::notification::Notification;
use crate::notifications::bell::NotificationBell;
use crate::notifications::poller::Poller;
use crate::state::AppState;

pub fn notification_line(n: &Notification, color: bool) -> String {
    let marker = if n.is_read { " " } else { "●" };
    let label = notification_label(n.kind);
    let tag = if color {
        badge(label, notification_tone(n.kind))
    } else {
        format!("[{label}]")
    };
    let when = n
        .created_at
        .map(|t| relative_time(t, Utc::now()))
        .unwrap_or_default();
    let mut line = format!("{marker} #{} {tag} {} · {when}", n.id, n.title);
    if !n.message.is_empty() {
        line.push_str(&format!("\n     {}", n.message));
    }
    line
}

fn print_bell(bell: &NotificationBell, color: bool) {
    let badge_text = bell.badge();
    if badge_text.is_empty() {
        println!("Thông báo");
    } else {
        println!("Thông báo ({badge_text} mới)");
    }
    if bell.notifications().is_empty() {
        println!("  (Không có thông báo nào)");
    }
    for n in bell.notifications() {
        println!("{}", notification_line(n, color));
    }
}

/// `talentbridge notifications latest`
pub async fn handle_latest(state: &AppState) -> Result<(), AppError> {
    let mut bell = NotificationBell::new();
    bell.refresh(&state.api).await?;
    print_bell(&bell, state.color);
    Ok(())
}

/// `talentbridge notifications list`
pub async fn handle_list(state: &AppState, page: u32, size: u32) -> Result<(), AppError> {
    let mut pagination = Pagination::new(page, size);
    let result = state.api.notifications(pagination.page, pagination.size).await?;
    pagination.update(&result);
    for n in &result.content {
        println!("{}", notification_line(n, state.color));
    }
    println!("{}", pagination.summary());
    if let Some(hint) = pagination.navigation() {
        println!("{hint}");
    }
    Ok(())
}

/// `talentbridge notifications read <id>`
pub async fn handle_read(state: &AppState, id: i64) -> Result<(), AppError> {
    let mut bell = NotificationBell::new();
    bell.refresh(&state.api).await?;
    bell.mark_read(&state.api, id).await?;
    toast::success(&format!("Đã đánh dấu đã đọc · còn {} chưa đọc", bell.unread()));
    Ok(())
}

/// `talentbridge notifications read-all`
pub async fn handle_read_all(state: &AppState) -> Result<(), AppError> {
    let mut bell = NotificationBell::new();
    bell.mark_all_read(&state.api).await?;
    toast::success("Đã đánh dấu tất cả là đã đọc");
    Ok(())
}

/// `talentbridge notifications watch`: polls until Ctrl-C, printing new arrivals.
pub async fn handle_watch(state: &AppState) -> Result<(), AppError> {
    let every = state.config.notification_poll_interval;
    info!("watching notifications every {}s", every.as_secs());
    let (poller, mut snapshots) = Poller::spawn(Arc::new(state.api.clone()), every);
    let mut bell = NotificationBell::new();
    let mut first = true;

    loop {
        tokio::select! {
            snapshot = snapshots.recv() => {
                let Some(snapshot) = snapshot else { break };
                let fresh = bell.apply(snapshot);
                if first {
                    print_bell(&bell, state.color);
                    first = false;
                } else {
                    for n in &fresh {
                        println!("{}", notification_line(n, state.color));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    drop(poller);
    Ok(())
}
