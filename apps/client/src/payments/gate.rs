use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api_client::ApiClient;
use crate::display::format::{format_number, format_vnd};
use crate::errors::AppError;
use crate::models::payment::{PaymentStatus, PaymentUrl};
use crate::payments::callback::listen;
use crate::payments::APPLICANT_COUNT_PRICE_VND;

pub fn describe(status: &PaymentStatus) -> String {
    if status.paid {
        format!(
            "Số người ứng tuyển \"{}\": {}",
            status.job_name,
            format_number(status.applicant_count)
        )
    } else {
        format!(
            "Thanh toán {} để xem số lượng người ứng tuyển \"{}\"",
            format_vnd(APPLICANT_COUNT_PRICE_VND),
            status.job_name
        )
    }
}

/// Creates a payment for `job_id`, hands its URL to `show_url`, waits on
/// `listener` for the browser's return, then re-checks the status.
///
/// The listener must already be bound so the redirect cannot arrive before
/// anyone is listening.
pub async fn unlock<F>(
    api: &ApiClient,
    job_id: i64,
    listener: TcpListener,
    timeout: Duration,
    show_url: F,
) -> Result<PaymentStatus, AppError>
where
    F: FnOnce(&PaymentUrl),
{
    let payment = api.create_payment(job_id).await?;
    info!(order_id = %payment.order_id, job_id, "payment created");
    show_url(&payment);

    let outcome = listen(listener, timeout).await?;
    if !outcome.success {
        let order = outcome.order_id.unwrap_or(payment.order_id);
        return Err(AppError::Callback(format!(
            "Thanh toán không thành công (mã đơn {order})"
        )));
    }
    if let Some(returned) = outcome.job_id {
        if returned != job_id {
            warn!(expected = job_id, returned, "payment return is for another job");
        }
    }

    let status = api.payment_status(job_id).await?;
    if !status.paid {
        return Err(AppError::Callback(
            "Chưa xác nhận được thanh toán, vui lòng kiểm tra lại sau".to_string(),
        ));
    }
    Ok(status)
}
