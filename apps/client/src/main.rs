mod api_client;
mod chat;
mod cli;
mod config;
mod dashboard;
mod display;
mod errors;
mod jobs;
mod listing;
mod models;
mod notifications;
mod payments;
mod resumes;
mod state;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{ChatAction, Cli, Command, JobsAction, NotificationsAction, ResumesAction};
use crate::config::Config;
use crate::display::toast;
use crate::errors::AppError;
use crate::resumes::handlers::Applicant;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed flags
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env(cli.api_url.clone(), cli.token.clone())?;

    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("talentbridge v{} → {}", env!("CARGO_PKG_VERSION"), config.api_url);

    let state = AppState::new(config, cli.no_color)?;
    let fallback = fallback_message(&cli.command);
    if let Err(err) = dispatch(&state, cli.command).await {
        toast::api_error(&err, fallback);
        if err.is_unauthorized() {
            info!("request rejected; check TALENTBRIDGE_ACCESS_TOKEN");
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn dispatch(state: &AppState, command: Command) -> Result<(), AppError> {
    match command {
        Command::Chat { action } => match action {
            None => chat::handlers::handle_open(state).await,
            Some(ChatAction::Sessions) => chat::handlers::handle_sessions(state).await,
            Some(ChatAction::History { session_id }) => {
                chat::handlers::handle_history(state, &session_id).await
            }
            Some(ChatAction::Ask {
                question,
                session,
                files,
            }) => chat::handlers::handle_ask(state, &question, session.as_deref(), files).await,
            Some(ChatAction::Delete { session_id, yes }) => {
                chat::handlers::handle_delete(state, &session_id, yes).await
            }
            Some(ChatAction::DeleteAll { yes }) => chat::handlers::handle_delete_all(state, yes).await,
        },

        Command::Jobs { action } => match action {
            JobsAction::List {
                name,
                company,
                level,
                location,
                mine,
                paging,
            } => {
                let filters = jobs::handlers::JobFilters {
                    name,
                    company,
                    level,
                    location,
                };
                jobs::handlers::handle_list(state, &filters, mine, paging.page, paging.size).await
            }
            JobsAction::Show { id } => jobs::handlers::handle_show(state, id).await,
            JobsAction::Delete { id, mine, yes } => {
                jobs::handlers::handle_delete(state, id, mine, yes).await
            }
            JobsAction::Stats => jobs::handlers::handle_stats(state).await,
        },

        Command::Resumes { action } => match action {
            ResumesAction::List { scope, job, paging } => {
                resumes::handlers::handle_list(
                    state,
                    scope.into(),
                    job.as_deref(),
                    paging.page,
                    paging.size,
                )
                .await
            }
            ResumesAction::Mine { paging } => {
                resumes::handlers::handle_mine(state, paging.page, paging.size).await
            }
            ResumesAction::Apply {
                job_id,
                pdf,
                email,
                user_id,
                analyze,
            } => {
                let applicant = Applicant { email, user_id };
                resumes::handlers::handle_apply(state, job_id, &pdf, &applicant, analyze).await
            }
            ResumesAction::Withdraw { job_id, yes } => {
                resumes::handlers::handle_withdraw(state, job_id, yes).await
            }
            ResumesAction::ReplaceFile { resume_id, pdf } => {
                resumes::handlers::handle_replace_file(state, resume_id, &pdf).await
            }
            ResumesAction::Status {
                resume_id,
                status,
                scope,
            } => resumes::handlers::handle_status(state, scope.into(), resume_id, &status).await,
            ResumesAction::Stats { scope } => {
                resumes::handlers::handle_stats(state, scope.into()).await
            }
            ResumesAction::Analyze { resume_id } => {
                resumes::handlers::handle_analyze(state, resume_id).await
            }
            ResumesAction::PreviewAnalysis { job_id, pdf } => {
                resumes::handlers::handle_preview_analysis(state, job_id, &pdf).await
            }
            ResumesAction::View { resume_id } => {
                resumes::handlers::handle_view(state, resume_id).await
            }
        },

        Command::Notifications { action } => match action {
            NotificationsAction::List { page, size } => {
                notifications::handlers::handle_list(state, page, size).await
            }
            NotificationsAction::Latest => notifications::handlers::handle_latest(state).await,
            NotificationsAction::Watch => notifications::handlers::handle_watch(state).await,
            NotificationsAction::Read { id } => notifications::handlers::handle_read(state, id).await,
            NotificationsAction::ReadAll => notifications::handlers::handle_read_all(state).await,
        },

        Command::Applicants { job_id, yes } => {
            payments::handlers::handle_applicants(state, job_id, yes).await
        }

        Command::Dashboard => dashboard::handlers::handle_dashboard(state).await,
    }
}

/// Notice shown when a command fails without a server message.
fn fallback_message(command: &Command) -> &'static str {
    match command {
        Command::Chat { action: None } => "Không thể mở trợ lý AI",
        Command::Chat {
            action: Some(ChatAction::Sessions),
        } => "Không thể tải danh sách cuộc trò chuyện",
        Command::Chat {
            action: Some(ChatAction::History { .. }),
        } => "Không thể tải lịch sử chat",
        Command::Chat {
            action: Some(ChatAction::Ask { .. }),
        } => "Không thể gửi tin nhắn. Vui lòng thử lại.",
        Command::Chat { action: Some(_) } => "Không thể xóa cuộc trò chuyện",
        Command::Jobs {
            action: JobsAction::Delete { .. },
        } => "Không thể xóa công việc",
        Command::Jobs { .. } => "Không thể tải danh sách công việc",
        Command::Resumes {
            action: ResumesAction::Apply { .. },
        } => "Có lỗi xảy ra khi ứng tuyển",
        Command::Resumes {
            action: ResumesAction::Analyze { .. } | ResumesAction::PreviewAnalysis { .. },
        } => "Không thể phân tích CV",
        Command::Resumes {
            action: ResumesAction::View { .. },
        } => "Không thể đọc file CV",
        Command::Resumes {
            action: ResumesAction::Status { .. },
        } => "Không thể cập nhật trạng thái hồ sơ",
        Command::Resumes { .. } => "Không thể tải danh sách hồ sơ",
        Command::Notifications { .. } => "Không thể tải thông báo",
        Command::Applicants { .. } => "Không thể tạo thanh toán",
        Command::Dashboard => "Không thể tải thống kê",
    }
}
