//! Request-scoped credential store
//!
//! Adapts Rocket's [`CookieJar`] to [`CredentialStore`]. Rocket
//! percent-encodes cookie values on the wire and decodes them when parsing
//! the request, which gives `auth-storage` the URL-encoded form the client
//! writes; values pass through this store unchanged.

use std::time::Duration;

use rocket::http::{Cookie, CookieJar, SameSite};
use tg_domain::CredentialStore;
use tg_domain::constants::{COOKIE_MAX_AGE_SECS, COOKIE_PATH};

/// [`CredentialStore`] over the cookies of one request
pub struct CookieCredentialStore<'a> {
    jar: &'a CookieJar<'a>,
    default_max_age: Duration,
}

impl<'a> CookieCredentialStore<'a> {
    pub fn new(jar: &'a CookieJar<'a>) -> Self {
        Self::with_max_age(jar, Duration::from_secs(COOKIE_MAX_AGE_SECS))
    }

    pub fn with_max_age(jar: &'a CookieJar<'a>, default_max_age: Duration) -> Self {
        Self {
            jar,
            default_max_age,
        }
    }
}

impl CredentialStore for CookieCredentialStore<'_> {
    fn get(&self, key: &str) -> Option<String> {
        let cookie = self.jar.get_pending(key)?;
        Some(cookie.value().to_string()).filter(|v| !v.is_empty())
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) {
        let secs = ttl.unwrap_or(self.default_max_age).as_secs();
        let cookie = Cookie::build((key.to_string(), value.to_string()))
            .path(COOKIE_PATH)
            .max_age(rocket::time::Duration::seconds(
                i64::try_from(secs).unwrap_or(i64::MAX),
            ))
            .same_site(SameSite::Strict);
        self.jar.add(cookie);
    }

    fn clear(&self, key: &str) {
        self.jar.remove(Cookie::build(key.to_string()).path(COOKIE_PATH));
    }
}
