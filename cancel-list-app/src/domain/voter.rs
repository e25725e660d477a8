use serde::{Deserialize, Serialize};

#[cfg(feature = "ssr")]
use cancel_list_errors::AppError;
#[cfg(feature = "ssr")]
use tower_sessions::cookie::{time::Duration, Cookie, SameSite};

pub const VOTER_COOKIE: &str = "voter_key";
pub const VOTER_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;
const MAX_KEY_LEN: usize = 128;

/// Anonymous per-browser identifier. Not a verified identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoterKey(String);

impl VoterKey {
    /// Accepts a non-blank key of at most 128 visible ASCII characters.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw.len() <= MAX_KEY_LEN
            && raw.chars().all(|c| c.is_ascii_graphic() && c != ';' && c != ',');
        valid.then(|| Self(raw.to_string()))
    }

    /// Finds the voter cookie in a `Cookie` request header value.
    #[cfg(feature = "ssr")]
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        Cookie::split_parse(header)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == VOTER_COOKIE)
            .and_then(|cookie| Self::parse(cookie.value_trimmed()))
    }

    #[cfg(feature = "ssr")]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Set-Cookie` value that keeps this key for a year.
    #[cfg(feature = "ssr")]
    pub fn set_cookie(&self, secure: bool) -> String {
        Cookie::build((VOTER_COOKIE, self.0.clone()))
            .path("/")
            .max_age(Duration::seconds(VOTER_COOKIE_MAX_AGE_SECS))
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .build()
            .to_string()
    }
}

/// Voter key for a request, remembering whether it was minted just now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterIdentity {
    pub key: VoterKey,
    pub is_new: bool,
}

impl VoterIdentity {
    #[cfg(feature = "ssr")]
    pub fn from_cookie_header(header: Option<&str>) -> Self {
        match header.and_then(VoterKey::from_cookie_header) {
            Some(key) => Self { key, is_new: false },
            None => Self {
                key: VoterKey::generate(),
                is_new: true,
            },
        }
    }

    /// Cookie to send back for a freshly minted key. Only votes that got as
    /// far as the write carry it, whether the write succeeded or not.
    #[cfg(feature = "ssr")]
    pub fn cookie_for<T>(&self, outcome: &Result<T, AppError>, secure: bool) -> Option<String> {
        let reached_write = match outcome {
            Ok(_) => true,
            Err(e) => matches!(e, AppError::InvalidItem(_) | AppError::Storage(_)),
        };
        (self.is_new && reached_write).then(|| self.key.set_cookie(secure))
    }
}
