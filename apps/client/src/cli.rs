//! Command-line surface.
//!
//! ```bash
//! talentbridge chat                      # interactive assistant
//! talentbridge chat ask "Việc Rust ở Hà Nội?" --file cv.pdf
//! talentbridge jobs list --level senior --page 2
//! talentbridge resumes apply 12 cv.pdf --email me@x.vn --user-id 7
//! talentbridge applicants 12             # pay to unlock the applicant count
//! talentbridge notifications watch
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::api_client::resumes::ResumeScope;
use crate::listing::pagination::DEFAULT_PAGE_SIZE;

/// Terminal client for the TalentBridge recruitment platform
#[derive(Parser, Debug)]
#[command(name = "talentbridge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL, e.g. http://localhost:8080/api/v1
    #[arg(long, global = true, env = "TALENTBRIDGE_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Bearer access token
    #[arg(long, global = true, env = "TALENTBRIDGE_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// AI chat assistant; without a subcommand opens the interactive session
    Chat {
        #[command(subcommand)]
        action: Option<ChatAction>,
    },
    /// Job listings
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
    /// Applications (resumes)
    Resumes {
        #[command(subcommand)]
        action: ResumesAction,
    },
    /// Notification bell
    Notifications {
        #[command(subcommand)]
        action: NotificationsAction,
    },
    /// Applicant count for a job, paying through VNPay when locked
    Applicants {
        job_id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Admin analytics dashboard
    Dashboard,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PageArgs {
    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub size: u32,
}

#[derive(Subcommand, Debug)]
pub enum ChatAction {
    /// List conversations
    Sessions,
    /// Print one conversation
    History { session_id: String },
    /// Ask one question and print the answer
    Ask {
        question: String,
        /// Continue this conversation instead of starting a new one
        #[arg(long)]
        session: Option<String>,
        /// Attach a file (repeatable, at most 5)
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },
    /// Delete one conversation
    Delete {
        session_id: String,
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every conversation
    DeleteAll {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum JobsAction {
    /// List jobs (all jobs, or your company's with --mine)
    List {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        company: Option<String>,
        /// INTERN, FRESHER, MIDDLE, SENIOR, LEADER or all
        #[arg(long)]
        level: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Only jobs of your own company
        #[arg(long)]
        mine: bool,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Job detail
    Show { id: i64 },
    /// Delete a job
    Delete {
        id: i64,
        /// Use the company endpoint (recruiters)
        #[arg(long)]
        mine: bool,
        #[arg(short, long)]
        yes: bool,
    },
    /// Job counts per level
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum Scope {
    /// Every company (admin)
    #[default]
    All,
    /// Your own company (recruiter)
    Company,
}

impl From<Scope> for ResumeScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::All => ResumeScope::All,
            Scope::Company => ResumeScope::Company,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ResumesAction {
    /// Applications received (admin or recruiter)
    List {
        #[arg(long, value_enum, default_value_t = Scope::All)]
        scope: Scope,
        /// Filter by job name
        #[arg(long)]
        job: Option<String>,
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Your own applications
    Mine {
        #[command(flatten)]
        paging: PageArgs,
    },
    /// Apply to a job with a PDF CV
    Apply {
        job_id: i64,
        pdf: PathBuf,
        #[arg(long, env = "TALENTBRIDGE_USER_EMAIL")]
        email: String,
        #[arg(long, env = "TALENTBRIDGE_USER_ID")]
        user_id: i64,
        /// Show an AI match analysis before submitting
        #[arg(long)]
        analyze: bool,
    },
    /// Withdraw your application to a job
    Withdraw {
        job_id: i64,
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace the PDF of one of your applications
    ReplaceFile { resume_id: i64, pdf: PathBuf },
    /// Change an application's status
    Status {
        resume_id: i64,
        /// PENDING, REVIEWING, APPROVED or REJECTED
        status: String,
        #[arg(long, value_enum, default_value_t = Scope::All)]
        scope: Scope,
    },
    /// Application counts per status
    Stats {
        #[arg(long, value_enum, default_value_t = Scope::All)]
        scope: Scope,
    },
    /// AI analysis of a submitted CV
    Analyze { resume_id: i64 },
    /// AI analysis of a CV against a job, without applying
    PreviewAnalysis { job_id: i64, pdf: PathBuf },
    /// Print the text of a submitted CV
    View { resume_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsAction {
    /// All notifications, paginated
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Latest notifications and unread count
    Latest,
    /// Poll and print new notifications until Ctrl-C
    Watch,
    /// Mark one notification as read
    Read { id: i64 },
    /// Mark every notification as read
    ReadAll,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chat_without_subcommand_opens_session() {
        let cli = Cli::try_parse_from(["talentbridge", "chat"]).unwrap();
        assert!(matches!(cli.command, Command::Chat { action: None }));
    }

    #[test]
    fn test_ask_collects_files() {
        let cli = Cli::try_parse_from([
            "talentbridge", "chat", "ask", "xin chào", "-f", "a.pdf", "--file", "b.png",
        ])
        .unwrap();
        match cli.command {
            Command::Chat {
                action: Some(ChatAction::Ask { question, files, session }),
            } => {
                assert_eq!(question, "xin chào");
                assert_eq!(files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.png")]);
                assert!(session.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_jobs_list_defaults_to_first_page() {
        let cli = Cli::try_parse_from(["talentbridge", "jobs", "list", "--level", "senior"]).unwrap();
        match cli.command {
            Command::Jobs {
                action: JobsAction::List { level, paging, mine, .. },
            } => {
                assert_eq!(level.as_deref(), Some("senior"));
                assert_eq!(paging.page, 1);
                assert_eq!(paging.size, DEFAULT_PAGE_SIZE);
                assert!(!mine);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resume_status_scope() {
        let cli = Cli::try_parse_from([
            "talentbridge", "resumes", "status", "4", "approved", "--scope", "company",
        ])
        .unwrap();
        match cli.command {
            Command::Resumes {
                action: ResumesAction::Status { resume_id, scope, .. },
            } => {
                assert_eq!(resume_id, 4);
                assert_eq!(ResumeScope::from(scope), ResumeScope::Company);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
