use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Active,
    Expired,
    Paused,
    Draft,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobLevel {
    Intern,
    Fresher,
    Middle,
    Senior,
    Leader,
}

impl JobLevel {
    pub const ALL: [JobLevel; 5] = [
        JobLevel::Intern,
        JobLevel::Fresher,
        JobLevel::Middle,
        JobLevel::Senior,
        JobLevel::Leader,
    ];

    /// Wire name, as used in filters and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobLevel::Intern => "INTERN",
            JobLevel::Fresher => "FRESHER",
            JobLevel::Middle => "MIDDLE",
            JobLevel::Senior => "SENIOR",
            JobLevel::Leader => "LEADER",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: f64,
    #[serde(default)]
    pub quantity: u32,
    pub level: JobLevel,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: JobStatus,
    pub company: Option<CompanySummary>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillSummary>,
}

impl Job {
    pub fn company_name(&self) -> &str {
        self.company.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }

    pub fn skill_names(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Job counts per level, keyed by wire name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct JobLevelStats {
    #[serde(default)]
    pub intern: u64,
    #[serde(default)]
    pub fresher: u64,
    #[serde(default)]
    pub middle: u64,
    #[serde(default)]
    pub senior: u64,
    #[serde(default)]
    pub leader: u64,
}

impl JobLevelStats {
    pub fn count(&self, level: JobLevel) -> u64 {
        match level {
            JobLevel::Intern => self.intern,
            JobLevel::Fresher => self.fresher,
            JobLevel::Middle => self.middle,
            JobLevel::Senior => self.senior,
            JobLevel::Leader => self.leader,
        }
    }
}
