use tokio::net::TcpListener;

use crate::display::{prompt, toast};
use crate::errors::AppError;
use crate::payments::gate::{describe, unlock};
use crate::state::AppState;

/// `talentbridge applicants <job-id>`: shows the applicant count, paying
/// for it first when needed.
pub async fn handle_applicants(state: &AppState, job_id: i64, yes: bool) -> Result<(), AppError> {
    let status = state.api.payment_status(job_id).await?;
    println!("{}", describe(&status));
    if status.paid {
        return Ok(());
    }
    if !prompt::confirm("Tiếp tục thanh toán qua VNPay?", yes)? {
        return Ok(());
    }

    let port = state.config.payment_callback_port;
    let listener = TcpListener::bind(("127.0.0.1", port)).await?;
    let status = unlock(
        &state.api,
        job_id,
        listener,
        state.config.payment_callback_timeout,
        |payment| {
            println!("Mở liên kết sau trong trình duyệt để thanh toán:");
            println!("  {}", payment.payment_url);
            println!("Mã đơn: {} · đang chờ kết quả thanh toán...", payment.order_id);
        },
    )
    .await?;

    toast::success("Thanh toán thành công! Bạn có thể xem số người ứng tuyển.");
    println!("{}", describe(&status));
    Ok(())
}
