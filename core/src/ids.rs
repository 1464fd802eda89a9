// core/src/ids.rs
use chrono::{DateTime, Utc};
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Builds `<prefix>_<unix millis>_<9 random chars>`.
///
/// Uniqueness is probabilistic only.
pub fn generate(prefix: &str, at: DateTime<Utc>) -> String {
  let random = Uuid::new_v4().simple().to_string();
  format!("{}_{}_{}", prefix, at.timestamp_millis(), &random[..SUFFIX_LEN])
}
