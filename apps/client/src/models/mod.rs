pub mod chat;
pub mod dashboard;
pub mod job;
pub mod notification;
pub mod page;
pub mod payment;
pub mod resume;
pub mod timestamp;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
