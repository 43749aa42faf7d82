//! Pure data-to-text mapping of dashboard statistics.

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::display::format::{format_number, format_percentage, group_thousands, month_label, Growth};
use crate::display::Tone;
use crate::models::dashboard::{
    DashboardStats, JobStats, MonthlyData, OverviewStats, ResumeStats, TopPerformers,
};

pub const BAR_WIDTH: usize = 30;
const TOP_N: usize = 5;

/// Horizontal bar of `value` scaled against `max`. Any non-zero value gets
/// at least one block.
pub fn bar(value: u64, max: u64, width: usize) -> String {
    if max == 0 || value == 0 {
        return String::new();
    }
    let filled = ((value as f64 / max as f64) * width as f64).round() as usize;
    "█".repeat(filled.clamp(1, width))
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if color {
        tone.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn pad_label(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.width());
    format!("{label}{}", " ".repeat(fill))
}

fn heading(title: &str, color: bool) -> String {
    if color {
        title.bold().to_string()
    } else {
        title.to_string()
    }
}

/// Labelled bars sharing one scale.
pub fn bar_rows(rows: &[(String, u64)], tone: Tone, color: bool) -> Vec<String> {
    let max = rows.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let label_width = rows.iter().map(|(l, _)| l.width()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| {
            let bar = paint(&bar(*value, max, BAR_WIDTH), tone, color);
            format!(
                "{} {bar} {}",
                pad_label(label, label_width),
                group_thousands(*value)
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

pub fn monthly_chart(title: &str, data: &[MonthlyData], tone: Tone, color: bool) -> Vec<String> {
    let mut lines = vec![heading(title, color)];
    if data.is_empty() {
        lines.push("  (Chưa có dữ liệu)".to_string());
        return lines;
    }
    let rows: Vec<(String, u64)> = data
        .iter()
        .map(|m| (month_label(&m.month), m.count))
        .collect();
    lines.extend(bar_rows(&rows, tone, color).into_iter().map(|l| format!("  {l}")));
    lines
}

fn card(title: &str, total: Option<u64>, growth: Option<f64>, color: bool) -> String {
    let mut line = format!("{} {}", pad_label(title, 12), format_number(total));
    if growth.is_some() {
        let trend = Growth::classify(growth);
        let change = format!("{} {}", trend.arrow(), format_percentage(growth));
        line.push_str("  ");
        line.push_str(&paint(&change, trend.tone(), color));
    }
    line
}

pub fn overview_cards(overview: &OverviewStats, color: bool) -> Vec<String> {
    vec![
        heading("Tổng quan", color),
        format!("  {}", card("Người dùng", overview.total_users, overview.user_growth_rate, color)),
        format!("  {}", card("Việc làm", overview.total_jobs, overview.job_growth_rate, color)),
        format!("  {}", card("Hồ sơ", overview.total_resumes, overview.resume_growth_rate, color)),
        format!("  {}", card("Công ty", overview.total_companies, None, color)),
        format!("  {}", card("Đăng ký", overview.total_subscribers, None, color)),
    ]
}

pub fn resume_breakdown(stats: &ResumeStats, color: bool) -> Vec<String> {
    let mut lines = vec![heading("Hồ sơ theo trạng thái", color)];
    let rows = [
        ("Chờ duyệt", stats.pending_resumes, Tone::Amber),
        ("Đang xét duyệt", stats.reviewing_resumes, Tone::Blue),
        ("Đã duyệt", stats.approved_resumes, Tone::Emerald),
        ("Từ chối", stats.rejected_resumes, Tone::Red),
    ];
    let max = rows.iter().map(|(_, v, _)| v.unwrap_or(0)).max().unwrap_or(0);
    for (label, value, tone) in rows {
        let value = value.unwrap_or(0);
        let bar = paint(&bar(value, max, BAR_WIDTH), tone, color);
        lines.push(
            format!("  {} {bar} {}", pad_label(label, 14), group_thousands(value))
                .trim_end()
                .to_string(),
        );
    }
    lines.push(format!(
        "  Tỷ lệ duyệt: {}",
        stats
            .approval_rate
            .map(|r| format!("{r:.1}%"))
            .unwrap_or_else(|| "0%".to_string())
    ));
    lines
}

pub fn level_breakdown(stats: &JobStats, color: bool) -> Vec<String> {
    let rows: Vec<(String, u64)> = [
        ("Intern", stats.intern_jobs),
        ("Fresher", stats.fresher_jobs),
        ("Junior", stats.junior_jobs),
        ("Middle", stats.middle_jobs),
        ("Senior", stats.senior_jobs),
        ("Leader", stats.leader_jobs),
    ]
    .into_iter()
    .map(|(label, value)| (label.to_string(), value.unwrap_or(0)))
    .collect();
    let mut lines = vec![heading("Việc làm theo cấp bậc", color)];
    lines.extend(
        bar_rows(&rows, Tone::Purple, color)
            .into_iter()
            .map(|l| format!("  {l}")),
    );
    lines
}

fn ranked<T>(title: &str, items: &[T], line: impl Fn(&T) -> String, color: bool) -> Vec<String> {
    let mut lines = vec![heading(title, color)];
    if items.is_empty() {
        lines.push("  (Chưa có dữ liệu)".to_string());
    }
    lines.extend(
        items
            .iter()
            .take(TOP_N)
            .enumerate()
            .map(|(i, item)| format!("  {}. {}", i + 1, line(item))),
    );
    lines
}

pub fn top_lists(top: &TopPerformers, color: bool) -> Vec<String> {
    let mut lines = ranked(
        "Công ty nhận nhiều hồ sơ nhất",
        &top.top_companies_by_resumes,
        |c| format!("{} ({} hồ sơ)", c.company_name, group_thousands(c.resume_count)),
        color,
    );
    lines.push(String::new());
    lines.extend(ranked(
        "Việc làm nhận nhiều hồ sơ nhất",
        &top.top_jobs_by_resumes,
        |j| {
            format!(
                "{} · {} ({} hồ sơ)",
                j.job_name,
                j.company_name,
                group_thousands(j.resume_count)
            )
        },
        color,
    ));
    lines.push(String::new());
    lines.extend(ranked(
        "Kỹ năng được yêu cầu nhiều nhất",
        &top.top_skills,
        |s| format!("{} ({})", s.skill_name, group_thousands(s.count)),
        color,
    ));
    lines
}

/// The whole dashboard, section by section.
pub fn render_dashboard(stats: &DashboardStats, color: bool) -> Vec<String> {
    let charts = &stats.chart_data;
    let sections = [
        overview_cards(&stats.overview_stats, color),
        monthly_chart("Người dùng mới theo tháng", &charts.users_by_month, Tone::Blue, color),
        monthly_chart("Việc làm mới theo tháng", &charts.jobs_by_month, Tone::Green, color),
        monthly_chart("Hồ sơ mới theo tháng", &charts.resumes_by_month, Tone::Orange, color),
        resume_breakdown(&stats.resume_stats, color),
        level_breakdown(&stats.job_stats, color),
        top_lists(&stats.top_performers, color),
    ];
    let mut lines = Vec::new();
    for (i, section) in sections.into_iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(section);
    }
    lines
}
