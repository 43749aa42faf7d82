use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewStats {
    pub total_users: Option<u64>,
    pub total_jobs: Option<u64>,
    pub total_resumes: Option<u64>,
    pub total_companies: Option<u64>,
    pub total_subscribers: Option<u64>,
    /// Month-over-month change, in percent.
    pub user_growth_rate: Option<f64>,
    pub job_growth_rate: Option<f64>,
    pub resume_growth_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_users: Option<u64>,
    pub active_users: Option<u64>,
    pub new_users_this_month: Option<u64>,
    pub admin_count: Option<u64>,
    pub hr_count: Option<u64>,
    pub user_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCount {
    pub skill_name: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStats {
    pub total_jobs: Option<u64>,
    pub active_jobs: Option<u64>,
    pub expired_jobs: Option<u64>,
    pub new_jobs_this_month: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_skills: Vec<SkillCount>,
    pub intern_jobs: Option<u64>,
    pub fresher_jobs: Option<u64>,
    pub junior_jobs: Option<u64>,
    pub middle_jobs: Option<u64>,
    pub senior_jobs: Option<u64>,
    pub leader_jobs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeStats {
    pub total_resumes: Option<u64>,
    pub pending_resumes: Option<u64>,
    pub reviewing_resumes: Option<u64>,
    pub approved_resumes: Option<u64>,
    pub rejected_resumes: Option<u64>,
    pub approval_rate: Option<f64>,
    pub new_resumes_this_month: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyJobCount {
    pub company_id: i64,
    pub company_name: String,
    pub job_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyStats {
    pub total_companies: Option<u64>,
    pub active_companies: Option<u64>,
    pub new_companies_this_month: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_companies: Vec<CompanyJobCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyData {
    /// `yyyy-MM`
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartData {
    #[serde(deserialize_with = "null_as_default")]
    pub users_by_month: Vec<MonthlyData>,
    #[serde(deserialize_with = "null_as_default")]
    pub jobs_by_month: Vec<MonthlyData>,
    #[serde(deserialize_with = "null_as_default")]
    pub resumes_by_month: Vec<MonthlyData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyResumeCount {
    pub company_id: i64,
    pub company_name: String,
    pub resume_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobResumeCount {
    pub job_id: i64,
    pub job_name: String,
    pub company_name: String,
    pub resume_count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopPerformers {
    #[serde(deserialize_with = "null_as_default")]
    pub top_companies_by_resumes: Vec<CompanyResumeCount>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_jobs_by_resumes: Vec<JobResumeCount>,
    #[serde(deserialize_with = "null_as_default")]
    pub top_skills: Vec<SkillCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "null_as_default")]
    pub overview_stats: OverviewStats,
    #[serde(deserialize_with = "null_as_default")]
    pub user_stats: UserStats,
    #[serde(deserialize_with = "null_as_default")]
    pub job_stats: JobStats,
    #[serde(deserialize_with = "null_as_default")]
    pub resume_stats: ResumeStats,
    #[serde(deserialize_with = "null_as_default")]
    pub company_stats: CompanyStats,
    #[serde(deserialize_with = "null_as_default")]
    pub chart_data: ChartData,
    #[serde(deserialize_with = "null_as_default")]
    pub top_performers: TopPerformers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_dashboard_payload() {
        let json = r#"{
            "overviewStats": {"totalUsers": 120, "userGrowthRate": 12.5, "jobGrowthRate": null},
            "chartData": {"usersByMonth": [{"month": "2024-01", "count": 4}], "jobsByMonth": null},
            "topPerformers": null
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.overview_stats.total_users, Some(120));
        assert_eq!(stats.overview_stats.job_growth_rate, None);
        assert_eq!(stats.chart_data.users_by_month.len(), 1);
        assert!(stats.chart_data.jobs_by_month.is_empty());
    }
}
