use std::path::Path;

use tracing::info;

use crate::api_client::resumes::ResumeScope;
use crate::api_client::UploadFile;
use crate::display::format::group_thousands;
use crate::display::status::{resume_status_display, resume_status_label, resume_status_tone};
use crate::display::{prompt, toast};
use crate::errors::AppError;
use crate::jobs::expiry::{is_job_expired, today};
use crate::listing::{Cell, FilterBuilder, Pagination, Table, DEFAULT_SORT};
use crate::models::job::{Job, JobStatus};
use crate::models::resume::{
    CreateResumeRequest, IdRef, Resume, ResumeStatus, ResumeStatusStats,
    UpdateResumeStatusRequest,
};
use crate::resumes::analysis::render_analysis;
use crate::resumes::upload::load_pdf;
use crate::resumes::viewer;
use crate::state::AppState;

/// Who is applying. The backend wants both on the JSON part.
#[derive(Debug, Clone)]
pub struct Applicant {
    pub email: String,
    pub user_id: i64,
}

/// Rejects jobs that no longer take applications.
pub fn ensure_open(job: &Job, today: chrono::NaiveDate) -> Result<(), AppError> {
    if is_job_expired(job.end_date.as_deref(), today) {
        return Err(AppError::Validation(
            "Công việc này đã hết hạn nộp CV".to_string(),
        ));
    }
    if job.status != JobStatus::Active {
        return Err(AppError::Validation("Công việc này đã đóng".to_string()));
    }
    Ok(())
}

/// Table of applications. `with_applicant` adds the e-mail column used by
/// recruiter and admin views.
pub fn resume_table(resumes: &[Resume], with_applicant: bool) -> Table {
    let mut headers = vec!["ID", "Công việc", "Công ty"];
    if with_applicant {
        headers.push("Ứng viên");
    }
    headers.extend(["Trạng thái", "Ngày nộp"]);

    let mut table = Table::new(headers);
    for resume in resumes {
        let (label, icon, tone) = resume_status_display(resume.status.as_str());
        let mut row = vec![
            Cell::plain(resume.id.to_string()),
            Cell::plain(resume.job_name()),
            Cell::plain(resume.company_name()),
        ];
        if with_applicant {
            row.push(Cell::plain(resume.applicant_email()));
        }
        row.push(Cell::toned(format!("{icon} {label}"), tone));
        row.push(Cell::plain(submitted_on(resume)));
        table.push(row);
    }
    table
}

fn submitted_on(resume: &Resume) -> String {
    resume
        .created_at
        .as_deref()
        .and_then(crate::models::timestamp::parse)
        .map(crate::display::format::format_date)
        .unwrap_or_else(|| "-".to_string())
}

fn print_page(state: &AppState, resumes: &[Resume], with_applicant: bool, pagination: &Pagination) {
    if resumes.is_empty() {
        println!("Không có hồ sơ nào");
    } else {
        print!("{}", resume_table(resumes, with_applicant).render(state.color));
    }
    println!("{}", pagination.summary());
    if let Some(hint) = pagination.navigation() {
        println!("{hint}");
    }
}

/// `talentbridge resumes apply <job-id> <pdf>`
pub async fn handle_apply(
    state: &AppState,
    job_id: i64,
    pdf: &Path,
    applicant: &Applicant,
    analyze: bool,
) -> Result<(), AppError> {
    let file = load_pdf(pdf).await?;
    let job = state.api.job(job_id).await?;
    ensure_open(&job, today())?;
    if state.api.has_applied(job_id).await? {
        return Err(AppError::Validation(
            "Bạn đã ứng tuyển công việc này rồi".to_string(),
        ));
    }

    if analyze {
        preview(state, job_id, &file).await?;
        if !prompt::confirm("Tiếp tục nộp CV?", false)? {
            return Ok(());
        }
    }

    let request = CreateResumeRequest {
        email: applicant.email.clone(),
        status: ResumeStatus::Pending,
        user: IdRef {
            id: applicant.user_id,
        },
        job: IdRef { id: job_id },
    };
    let saved = state.api.save_resume(&request, &file).await?;
    info!(resume_id = saved.id, job_id, "resume submitted");
    toast::success("Ứng tuyển thành công! Chúng tôi sẽ liên hệ với bạn sớm.");
    Ok(())
}

/// `talentbridge resumes mine`
pub async fn handle_mine(state: &AppState, page: u32, size: u32) -> Result<(), AppError> {
    let mut pagination = Pagination::new(page, size);
    let result = state
        .api
        .my_resumes(&pagination.query(None, DEFAULT_SORT))
        .await?;
    pagination.update(&result);
    print_page(state, &result.content, false, &pagination);
    Ok(())
}

/// `talentbridge resumes list`
pub async fn handle_list(
    state: &AppState,
    scope: ResumeScope,
    job_name: Option<&str>,
    page: u32,
    size: u32,
) -> Result<(), AppError> {
    let mut pagination = Pagination::new(page, size);
    let filter = FilterBuilder::new().contains("job.name", job_name).build();
    let result = state
        .api
        .resumes(scope, &pagination.query(filter, DEFAULT_SORT))
        .await?;
    pagination.update(&result);
    print_page(state, &result.content, true, &pagination);
    Ok(())
}

/// `talentbridge resumes withdraw <job-id>`
pub async fn handle_withdraw(state: &AppState, job_id: i64, yes: bool) -> Result<(), AppError> {
    if !prompt::confirm("Bạn có chắc muốn rút hồ sơ ứng tuyển này?", yes)? {
        return Ok(());
    }
    state.api.withdraw_resume(job_id).await?;
    toast::success("Đã rút hồ sơ ứng tuyển");
    Ok(())
}

/// `talentbridge resumes replace-file <resume-id> <pdf>`
pub async fn handle_replace_file(
    state: &AppState,
    resume_id: i64,
    pdf: &Path,
) -> Result<(), AppError> {
    let file = load_pdf(pdf).await?;
    state.api.replace_resume_file(resume_id, &file).await?;
    toast::success("Cập nhật CV thành công");
    Ok(())
}

/// `talentbridge resumes status <resume-id> <status>`
pub async fn handle_status(
    state: &AppState,
    scope: ResumeScope,
    resume_id: i64,
    status: &str,
) -> Result<(), AppError> {
    let status = ResumeStatus::parse(status).ok_or_else(|| {
        AppError::Validation(format!(
            "Trạng thái không hợp lệ: {status} (PENDING, REVIEWING, APPROVED, REJECTED)"
        ))
    })?;
    let updated = state
        .api
        .update_resume_status(scope, &UpdateResumeStatusRequest { id: resume_id, status })
        .await?;
    toast::success(&format!(
        "Hồ sơ #{} chuyển sang \"{}\"",
        updated.id,
        resume_status_label(updated.status)
    ));
    Ok(())
}

pub fn stats_lines(stats: &ResumeStatusStats, color: bool) -> Vec<String> {
    let total = stats.total();
    let mut lines: Vec<String> = ResumeStatus::ALL
        .iter()
        .map(|status| {
            let count = stats.count(*status);
            let label = format!("{:<16}", resume_status_label(*status));
            let label = if color {
                resume_status_tone(*status).paint(&label).to_string()
            } else {
                label
            };
            let share = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            format!("{label} {:>6}  {share:>5.1}%", group_thousands(count))
        })
        .collect();
    lines.push(format!("{:<16} {:>6}", "Tổng", group_thousands(total)));
    lines
}

/// `talentbridge resumes stats`
pub async fn handle_stats(state: &AppState, scope: ResumeScope) -> Result<(), AppError> {
    let stats = state.api.resume_status_stats(scope).await?;
    for line in stats_lines(&stats, state.color) {
        println!("{line}");
    }
    Ok(())
}

/// `talentbridge resumes analyze <resume-id>`
pub async fn handle_analyze(state: &AppState, resume_id: i64) -> Result<(), AppError> {
    let analysis = state.api.analyze_resume(resume_id).await?;
    for line in render_analysis(&analysis, state.color) {
        println!("{line}");
    }
    Ok(())
}

async fn preview(state: &AppState, job_id: i64, file: &UploadFile) -> Result<(), AppError> {
    let analysis = state.api.analyze_resume_preview(job_id, file).await?;
    for line in render_analysis(&analysis, state.color) {
        println!("{line}");
    }
    Ok(())
}

/// `talentbridge resumes preview-analysis <job-id> <pdf>`
pub async fn handle_preview_analysis(
    state: &AppState,
    job_id: i64,
    pdf: &Path,
) -> Result<(), AppError> {
    let file = load_pdf(pdf).await?;
    preview(state, job_id, &file).await
}

/// `talentbridge resumes view <resume-id>`
pub async fn handle_view(state: &AppState, resume_id: i64) -> Result<(), AppError> {
    let text = viewer::fetch_text(&state.api, resume_id).await?;
    if text.is_empty() {
        toast::warning("Không trích xuất được nội dung từ file PDF");
    } else {
        println!("{text}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::JobLevel;
    use crate::models::resume::{ResumeCompany, ResumeJob, ResumeUser};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn job(status: JobStatus, end_date: Option<&str>) -> Job {
        Job {
            id: 1,
            name: "Backend".to_string(),
            location: String::new(),
            salary: 0.0,
            quantity: 1,
            level: JobLevel::Middle,
            description: String::new(),
            start_date: None,
            end_date: end_date.map(String::from),
            status,
            company: None,
            skills: vec![],
        }
    }

    #[test]
    fn test_ensure_open_rules() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(ensure_open(&job(JobStatus::Active, None), today).is_ok());
        assert!(ensure_open(&job(JobStatus::Active, Some("2024-03-10")), today).is_ok());

        let expired = ensure_open(&job(JobStatus::Active, Some("2024-03-09")), today).unwrap_err();
        assert_eq!(expired.user_message(""), "Công việc này đã hết hạn nộp CV");

        let closed = ensure_open(&job(JobStatus::Paused, Some("2024-12-31")), today).unwrap_err();
        assert_eq!(closed.user_message(""), "Công việc này đã đóng");
    }

    #[test]
    fn test_resume_table_columns() {
        let resume = Resume {
            id: 8,
            status: ResumeStatus::Approved,
            pdf_url: None,
            user: Some(ResumeUser {
                id: 1,
                email: "u@x.vn".to_string(),
            }),
            job: Some(ResumeJob {
                id: 2,
                name: "Backend".to_string(),
                location: None,
                skills: vec![],
                level: None,
                description: None,
            }),
            company: Some(ResumeCompany {
                id: 3,
                name: "ACME".to_string(),
                logo_url: None,
            }),
            created_at: None,
            updated_at: None,
        };
        let candidate = resume_table(std::slice::from_ref(&resume), false).render(false);
        assert!(!candidate.contains("u@x.vn"));
        assert!(candidate.contains("● Đã duyệt"));

        let recruiter = resume_table(&[resume], true).render(false);
        assert!(recruiter.contains("u@x.vn"));
    }

    #[test]
    fn test_stats_lines_with_shares() {
        let stats = ResumeStatusStats {
            pending: 1,
            reviewing: 1,
            approved: 2,
            rejected: 0,
        };
        let lines = stats_lines(&stats, false);
        assert_eq!(lines.len(), 5);
        assert!(lines[2].ends_with(" 50.0%"));
        assert!(lines[3].ends_with("  0.0%"));
        assert!(lines[4].contains('4'));
    }

    #[test]
    fn test_stats_lines_with_no_resumes() {
        let lines = stats_lines(&ResumeStatusStats::default(), false);
        assert!(lines[0].ends_with("  0.0%"));
    }
}
