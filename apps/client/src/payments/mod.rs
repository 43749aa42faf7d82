//! Pay-to-view applicant counts: status check, VNPay payment creation, and
//! the loopback listener that receives the browser's return redirect.

pub mod callback;
pub mod gate;
pub mod handlers;

/// Price of unlocking the applicant count of one job, in VND.
pub const APPLICANT_COUNT_PRICE_VND: f64 = 10_000.0;
