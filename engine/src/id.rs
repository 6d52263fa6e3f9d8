//! Record id generation.
//!
//! Ids are `"<unix millis>-<suffix>"` where the suffix is up to seven random
//! base-36 characters. Good enough for a single user creating records by
//! hand; two ids minted in the same millisecond can collide.

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix.
pub const SUFFIX_LEN: usize = 7;

/// Generate a fresh id from the current time and the thread-local RNG.
pub fn generate_id() -> String {
    let now = chrono::Utc::now().timestamp_millis();
    generate_id_at(now, &mut rand::thread_rng())
}

/// Generate an id for a given timestamp (milliseconds) and RNG.
pub fn generate_id_at<R: Rng + ?Sized>(timestamp_ms: i64, rng: &mut R) -> String {
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", timestamp_ms, suffix)
}
