//! Loopback HTTP listener for the payment return redirect.
//!
//! The backend finishes a VNPay payment by redirecting the browser to either
//! `/jobs/{id}?paymentSuccess=true` or `/payment/result?success=false&orderId=..`
//! on the front-end origin. Pointing that origin at this listener lets the
//! terminal learn the outcome. The listener stops after the first redirect.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    pub success: bool,
    pub order_id: Option<String>,
    pub job_id: Option<i64>,
}

const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

type Slot = Arc<Mutex<Option<oneshot::Sender<PaymentReturn>>>>;

fn deliver(slot: &Slot, outcome: PaymentReturn) {
    let sender = slot.lock().ok().and_then(|mut s| s.take());
    match sender {
        Some(tx) => {
            let _ = tx.send(outcome);
        }
        None => warn!("payment return received after the first one, ignored"),
    }
}

fn page(success: bool) -> Html<&'static str> {
    if success {
        Html("<h1>Thanh toán thành công!</h1><p>Bạn có thể quay lại terminal để xem số lượng người ứng tuyển.</p>")
    } else {
        Html("<h1>Thanh toán thất bại</h1><p>Thanh toán không thành công. Vui lòng thử lại hoặc liên hệ hỗ trợ nếu bạn gặp vấn đề.</p>")
    }
}

async fn payment_result(
    State(slot): State<Slot>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    let outcome = PaymentReturn {
        success: params.get("success").map(String::as_str) == Some("true"),
        order_id: params.get("orderId").cloned().filter(|o| !o.is_empty()),
        job_id: None,
    };
    info!(?outcome, "payment result redirect received");
    let success = outcome.success;
    deliver(&slot, outcome);
    page(success)
}

async fn job_return(
    State(slot): State<Slot>,
    Path(job_id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<&'static str> {
    let outcome = PaymentReturn {
        success: params.get("paymentSuccess").map(String::as_str) == Some("true"),
        order_id: None,
        job_id: Some(job_id),
    };
    info!(?outcome, "job page redirect received");
    let success = outcome.success;
    deliver(&slot, outcome);
    page(success)
}

pub fn router(tx: oneshot::Sender<PaymentReturn>) -> Router {
    let slot: Slot = Arc::new(Mutex::new(Some(tx)));
    Router::new()
        .route("/payment/result", get(payment_result))
        .route("/jobs/:id", get(job_return))
        .layer(TraceLayer::new_for_http())
        .with_state(slot)
}

/// Serves on `listener` until the first redirect arrives or `timeout` passes.
pub async fn listen(listener: TcpListener, timeout: Duration) -> Result<PaymentReturn, AppError> {
    let (tx, rx) = oneshot::channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let app = router(tx);

    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    let outcome = tokio::time::timeout(timeout, rx).await;
    let _ = stop_tx.send(());
    // browsers keep connections open; give in-flight responses a moment, then stop
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => warn!("payment callback server failed: {e}"),
        Ok(Err(e)) => warn!("payment callback server task failed: {e}"),
        Err(_) => server.abort(),
    }

    match outcome {
        Ok(Ok(outcome)) => Ok(outcome),
        Ok(Err(_)) => Err(AppError::Callback(
            "Đã dừng chờ kết quả thanh toán".to_string(),
        )),
        Err(_) => Err(AppError::Callback(format!(
            "Không nhận được kết quả thanh toán sau {}s",
            timeout.as_secs()
        ))),
    }
}
