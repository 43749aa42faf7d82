use crate::api_client::ApiClient;
use crate::errors::AppError;
use crate::models::payment::{CreatePaymentRequest, PaymentStatus, PaymentUrl};

impl ApiClient {
    /// POST /payments/create: returns the VNPay URL for unlocking the
    /// applicant count of `job_id`.
    pub async fn create_payment(&self, job_id: i64) -> Result<PaymentUrl, AppError> {
        self.post_json("payments/create", &CreatePaymentRequest { job_id })
            .await
    }

    /// GET /payments/check/{jobId}
    pub async fn payment_status(&self, job_id: i64) -> Result<PaymentStatus, AppError> {
        self.get(&format!("payments/check/{job_id}")).await
    }
}
