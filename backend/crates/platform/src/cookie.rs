//! Cookie Management Infrastructure
//!
//! Builds the long-lived identity cookie and its removal counterpart.

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub use axum_extra::extract::cookie::SameSite;

/// Cookie configuration
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "remember_token".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Cookie carrying `value`, with the configured attributes.
    pub fn build(&self, value: impl Into<String>) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value.into()))
            .path(self.path.clone())
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(self.same_site)
            .build()
    }

    /// Empty, already-expired cookie under the same name and path.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = self.build(String::new());
        cookie.make_removal();
        cookie
    }

    /// Value of this cookie in the request jar. Empty values count as absent.
    pub fn read<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
    }
}
