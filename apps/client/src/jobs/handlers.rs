use tracing::info;

use crate::dashboard::charts::{bar, BAR_WIDTH};
use crate::display::format::group_thousands;
use crate::display::status::{level_label, level_tone};
use crate::display::{prompt, toast};
use crate::errors::AppError;
use crate::jobs::expiry::today;
use crate::jobs::{job_detail, job_table};
use crate::listing::{FilterBuilder, Pagination, DEFAULT_SORT};
use crate::models::job::JobLevel;
use crate::state::AppState;

/// Filters accepted by job listings.
#[derive(Debug, Default, Clone)]
pub struct JobFilters {
    pub name: Option<String>,
    pub company: Option<String>,
    pub level: Option<String>,
    pub location: Option<String>,
}

impl JobFilters {
    /// The company filter only applies to the admin view; the recruiter view
    /// is already scoped to one company.
    pub fn to_filter(&self, company_scoped: bool) -> Result<Option<String>, AppError> {
        if let Some(level) = self.level.as_deref() {
            let level = level.trim();
            if !level.is_empty()
                && !level.eq_ignore_ascii_case("all")
                && JobLevel::parse(level).is_none()
            {
                return Err(AppError::Validation(format!("Cấp bậc không hợp lệ: {level}")));
            }
        }
        let level = self
            .level
            .as_deref()
            .map(|l| JobLevel::parse(l).map(|l| l.as_str()).unwrap_or(l));

        let mut builder = FilterBuilder::new().contains("name", self.name.as_deref());
        if !company_scoped {
            builder = builder.contains("company.name", self.company.as_deref());
        }
        Ok(builder
            .equals("level", level)
            .contains("location", self.location.as_deref())
            .build())
    }
}

/// `talentbridge jobs list`
pub async fn handle_list(
    state: &AppState,
    filters: &JobFilters,
    company_scoped: bool,
    page: u32,
    size: u32,
) -> Result<(), AppError> {
    let mut pagination = Pagination::new(page, size);
    let query = pagination.query(filters.to_filter(company_scoped)?, DEFAULT_SORT);
    let result = if company_scoped {
        state.api.company_jobs(&query).await?
    } else {
        state.api.jobs(&query).await?
    };
    pagination.update(&result);

    if result.is_empty() {
        println!("Không tìm thấy công việc nào");
    } else {
        print!("{}", job_table(&result.content, today()).render(state.color));
    }
    println!("{}", pagination.summary());
    if let Some(hint) = pagination.navigation() {
        println!("{hint}");
    }
    Ok(())
}

/// `talentbridge jobs show <id>`
pub async fn handle_show(state: &AppState, id: i64) -> Result<(), AppError> {
    let job = state.api.job(id).await?;
    for line in job_detail(&job, state.color) {
        println!("{line}");
    }
    Ok(())
}

/// `talentbridge jobs delete <id>`
pub async fn handle_delete(
    state: &AppState,
    id: i64,
    company_scoped: bool,
    yes: bool,
) -> Result<(), AppError> {
    if !prompt::confirm(&format!("Bạn có chắc muốn xóa công việc #{id}?"), yes)? {
        return Ok(());
    }
    if company_scoped {
        state.api.delete_company_job(id).await?;
    } else {
        state.api.delete_job(id).await?;
    }
    info!(job_id = id, "job deleted");
    toast::success("Xóa công việc thành công");
    Ok(())
}

/// `talentbridge jobs stats`
pub async fn handle_stats(state: &AppState) -> Result<(), AppError> {
    let stats = state.api.job_level_stats().await?;
    let max = JobLevel::ALL
        .iter()
        .map(|l| stats.count(*l))
        .max()
        .unwrap_or(0);
    for level in JobLevel::ALL {
        let count = stats.count(level);
        let fill = bar(count, max, BAR_WIDTH);
        let fill = if state.color {
            level_tone(level).paint(&fill).to_string()
        } else {
            fill
        };
        println!("{:<8} {fill} {}", level_label(level), group_thousands(count));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_filter_includes_company() {
        let filters = JobFilters {
            name: Some("rust".to_string()),
            company: Some("ACME".to_string()),
            level: Some("senior".to_string()),
            location: None,
        };
        assert_eq!(
            filters.to_filter(false).unwrap().as_deref(),
            Some("name ~ '*rust*' and company.name ~ '*ACME*' and level : 'SENIOR'")
        );
        assert_eq!(
            filters.to_filter(true).unwrap().as_deref(),
            Some("name ~ '*rust*' and level : 'SENIOR'")
        );
    }

    #[test]
    fn test_all_level_is_skipped_and_bad_level_rejected() {
        let mut filters = JobFilters {
            level: Some("all".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_filter(false).unwrap(), None);
        filters.level = Some("JUNIOR".to_string());
        assert!(filters.to_filter(false).is_err());
    }
}
