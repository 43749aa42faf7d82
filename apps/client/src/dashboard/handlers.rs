use crate::dashboard::charts::render_dashboard;
use crate::errors::AppError;
use crate::state::AppState;

/// `talentbridge dashboard`
pub async fn handle_dashboard(state: &AppState) -> Result<(), AppError> {
    let stats = state.api.dashboard_stats().await?;
    for line in render_dashboard(&stats, state.color) {
        println!("{line}");
    }
    Ok(())
}
