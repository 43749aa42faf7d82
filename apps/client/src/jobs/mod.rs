//! Job listings (admin and recruiter views), detail, delete, level stats.

pub mod expiry;
pub mod handlers;

use crate::display::badge;
use crate::display::format::format_vnd;
use crate::display::status::{job_status_label, job_status_tone, level_label, level_tone};
use crate::listing::{Cell, Table};
use crate::models::job::Job;

pub fn job_table(jobs: &[Job], today: chrono::NaiveDate) -> Table {
    let mut table = Table::new([
        "ID", "Tên", "Công ty", "Cấp bậc", "Địa điểm", "Lương", "SL", "Hạn nộp", "Trạng thái",
    ]);
    for job in jobs {
        let deadline = job.end_date.as_deref().unwrap_or("-");
        let deadline = if expiry::is_job_expired(job.end_date.as_deref(), today) {
            Cell::toned(deadline, crate::display::Tone::Red)
        } else {
            Cell::plain(deadline)
        };
        table.push(vec![
            Cell::plain(job.id.to_string()),
            Cell::plain(job.name.as_str()),
            Cell::plain(job.company_name()),
            Cell::toned(level_label(job.level), level_tone(job.level)),
            Cell::plain(job.location.as_str()),
            Cell::plain(format_vnd(job.salary)),
            Cell::plain(job.quantity.to_string()),
            deadline,
            Cell::toned(job_status_label(job.status), job_status_tone(job.status)),
        ]);
    }
    table
}

pub fn job_detail(job: &Job, color: bool) -> Vec<String> {
    let status = if color {
        badge(job_status_label(job.status), job_status_tone(job.status))
    } else {
        format!("[{}]", job_status_label(job.status))
    };
    let level = if color {
        badge(level_label(job.level), level_tone(job.level))
    } else {
        format!("[{}]", level_label(job.level))
    };
    let mut lines = vec![
        format!("#{} {} {status} {level}", job.id, job.name),
        format!("Công ty:   {}", job.company_name()),
        format!("Địa điểm:  {}", job.location),
        format!("Lương:     {}", format_vnd(job.salary)),
        format!("Số lượng:  {}", job.quantity),
        format!(
            "Thời gian: {} → {}",
            job.start_date.as_deref().unwrap_or("-"),
            job.end_date.as_deref().unwrap_or("-")
        ),
    ];
    let skills = job.skill_names();
    if !skills.is_empty() {
        lines.push(format!("Kỹ năng:   {}", skills.join(", ")));
    }
    if !job.description.trim().is_empty() {
        lines.push(String::new());
        lines.extend(job.description.lines().map(String::from));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::{CompanySummary, JobLevel, JobStatus, SkillSummary};
    use chrono::NaiveDate;

    fn job() -> Job {
        Job {
            id: 3,
            name: "Rust Engineer".to_string(),
            location: "Hà Nội".to_string(),
            salary: 30_000_000.0,
            quantity: 2,
            level: JobLevel::Senior,
            description: "Xây dựng dịch vụ".to_string(),
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-02-01".to_string()),
            status: JobStatus::Active,
            company: Some(CompanySummary {
                id: 1,
                name: "ACME".to_string(),
                address: None,
                logo_url: None,
            }),
            skills: vec![SkillSummary {
                id: 1,
                name: "Rust".to_string(),
            }],
        }
    }

    #[test]
    fn test_detail_lines() {
        let lines = job_detail(&job(), false);
        assert_eq!(lines[0], "#3 Rust Engineer [Đang tuyển] [Senior]");
        assert_eq!(lines[3], "Lương:     30.000.000 ₫");
        assert!(lines.contains(&"Kỹ năng:   Rust".to_string()));
    }

    #[test]
    fn test_table_has_one_row_per_job() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let table = job_table(&[job(), job()], today);
        let rendered = table.render(false);
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("30.000.000 ₫"));
    }
}
