use crossterm::style::Stylize;

use crate::display::format::score_tone;
use crate::models::resume::CvAnalysis;

/// Text report for an AI CV analysis: score, summary, then the three lists.
pub fn render_analysis(analysis: &CvAnalysis, color: bool) -> Vec<String> {
    let score = analysis.match_score.clamp(0.0, 100.0);
    let score_text = format!("{score:.0}/100");
    let score_text = if color {
        score_text
            .with(score_tone(score).color())
            .bold()
            .to_string()
    } else {
        score_text
    };

    let mut lines = Vec::new();
    if !analysis.job_name.trim().is_empty() {
        lines.push(format!("Phân tích CV cho vị trí: {}", analysis.job_name));
    }
    lines.push(format!("Mức độ phù hợp: {score_text}"));
    if !analysis.summary.trim().is_empty() {
        lines.push(String::new());
        lines.push(analysis.summary.trim().to_string());
    }

    section(&mut lines, "Điểm mạnh", "+", &analysis.strengths);
    section(&mut lines, "Điểm cần cải thiện", "-", &analysis.weaknesses);
    section(&mut lines, "Gợi ý", "→", &analysis.suggestions);
    lines
}

fn section(lines: &mut Vec<String>, title: &str, marker: &str, items: &[String]) {
    let items: Vec<&str> = items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .collect();
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title}:"));
    lines.extend(items.into_iter().map(|i| format!("  {marker} {i}")));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> CvAnalysis {
        CvAnalysis {
            match_score: 72.4,
            strengths: vec!["Rust".to_string(), "  ".to_string()],
            weaknesses: vec![],
            suggestions: vec!["Bổ sung dự án thực tế".to_string()],
            summary: " Ứng viên khá phù hợp ".to_string(),
            job_name: "Backend".to_string(),
            resume_id: Some(4),
        }
    }

    #[test]
    fn test_render_plain_report() {
        let lines = render_analysis(&analysis(), false);
        assert_eq!(
            lines,
            vec![
                "Phân tích CV cho vị trí: Backend",
                "Mức độ phù hợp: 72/100",
                "",
                "Ứng viên khá phù hợp",
                "",
                "Điểm mạnh:",
                "  + Rust",
                "",
                "Gợi ý:",
                "  → Bổ sung dự án thực tế",
            ]
        );
    }

    #[test]
    fn test_score_is_clamped() {
        let mut a = analysis();
        a.match_score = 140.0;
        a.job_name.clear();
        let lines = render_analysis(&a, false);
        assert_eq!(lines[0], "Mức độ phù hợp: 100/100");
    }
}
