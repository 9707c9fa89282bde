// ABOUTME: Action- and user-scoped form tokens protecting state-changing requests
// ABOUTME: HMAC-SHA256 over a half-day tick, valid for the current and previous tick

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Lifetime of a nonce in seconds; verification accepts up to two ticks
pub const NONCE_LIFETIME_SECS: i64 = 86_400;

/// Hex characters kept from the MAC
const NONCE_LENGTH: usize = 20;

/// How old a verified nonce is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceAge {
    /// Generated in the current half-lifetime window
    Fresh,
    /// Generated in the previous window, about to expire
    Aging,
}

#[derive(Clone)]
pub struct NonceService {
    secret: Vec<u8>,
}

impl std::fmt::Debug for NonceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceService").finish_non_exhaustive()
    }
}

impl NonceService {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Nonce for `action` on behalf of `user_id`
    pub fn create(&self, action: &str, user_id: u64) -> String {
        self.create_at(action, user_id, Utc::now())
    }

    pub fn create_at(&self, action: &str, user_id: u64, now: DateTime<Utc>) -> String {
        self.token(tick(now), action, user_id)
    }

    pub fn verify(&self, nonce: &str, action: &str, user_id: u64) -> Option<NonceAge> {
        self.verify_at(nonce, action, user_id, Utc::now())
    }

    pub fn verify_at(
        &self,
        nonce: &str,
        action: &str,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Option<NonceAge> {
        if nonce.is_empty() {
            return None;
        }

        let current = tick(now);
        let candidates = [(current, NonceAge::Fresh), (current - 1, NonceAge::Aging)];

        for (tick, age) in candidates {
            let expected = self.token(tick, action, user_id);
            if bool::from(expected.as_bytes().ct_eq(nonce.as_bytes())) {
                debug!(action = %action, user_id, ?age, "Nonce verified");
                return Some(age);
            }
        }

        debug!(action = %action, user_id, "Nonce rejected");
        None
    }

    fn token(&self, tick: i64, action: &str, user_id: u64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts keys of any length");
        mac.update(format!("{}|{}|{}", tick, action, user_id).as_bytes());
        let digest = hex::encode(mac.finalize().into_bytes());
        digest[..NONCE_LENGTH].to_string()
    }
}

/// Index of the half-lifetime window containing `now`
fn tick(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(NONCE_LIFETIME_SECS / 2) + 1
}
