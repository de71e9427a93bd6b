//! Session cookie construction and parsing.
//!
//! Both tokens travel as `HttpOnly`, `SameSite=Strict` cookies (`Secure`
//! in production). The core never sees cookies; handlers pass token
//! values in and out, and this module owns the header wire format.

use axum::http::header::{HeaderMap, HeaderValue, COOKIE, SET_COOKIE};

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// Policy for the session cookie pair.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    secure: bool,
    access_max_age_secs: i64,
    refresh_max_age_secs: i64,
}

impl SessionCookies {
    pub fn new(secure: bool, access_max_age_secs: i64, refresh_max_age_secs: i64) -> Self {
        Self {
            secure,
            access_max_age_secs,
            refresh_max_age_secs,
        }
    }

    fn render(&self, name: &str, value: &str, max_age_secs: i64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
            name, value, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).expect("cookie values are ASCII")
    }

    /// Attaches a fresh token pair to the response.
    pub fn establish(&self, headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
        headers.append(
            SET_COOKIE,
            self.render(ACCESS_COOKIE, access_token, self.access_max_age_secs),
        );
        headers.append(
            SET_COOKIE,
            self.render(REFRESH_COOKIE, refresh_token, self.refresh_max_age_secs),
        );
    }

    /// Expires both session cookies.
    pub fn clear(&self, headers: &mut HeaderMap) {
        headers.append(SET_COOKIE, self.render(ACCESS_COOKIE, "", 0));
        headers.append(SET_COOKIE, self.render(REFRESH_COOKIE, "", 0));
    }
}

/// Reads one cookie value from the request `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookies() -> SessionCookies {
        SessionCookies::new(false, 900, 604_800)
    }

    #[test]
    fn establish_sets_both_cookies_with_their_ttls() {
        let mut headers = HeaderMap::new();
        cookies().establish(&mut headers, "acc-token", "ref-token");

        let values: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values.len(), 2);
        assert!(values[0].starts_with("accessToken=acc-token; Max-Age=900"));
        assert!(values[1].starts_with("refreshToken=ref-token; Max-Age=604800"));
        for value in values {
            assert!(value.contains("HttpOnly"));
            assert!(value.contains("SameSite=Strict"));
            assert!(!value.contains("Secure"));
        }
    }

    #[test]
    fn secure_flag_appears_only_when_enabled() {
        let mut headers = HeaderMap::new();
        SessionCookies::new(true, 900, 604_800).establish(&mut headers, "a", "r");
        for value in headers.get_all(SET_COOKIE) {
            assert!(value.to_str().unwrap().ends_with("; Secure"));
        }
    }

    #[test]
    fn clear_expires_both_cookies() {
        let mut headers = HeaderMap::new();
        cookies().clear(&mut headers);
        for value in headers.get_all(SET_COOKIE) {
            assert!(value.to_str().unwrap().contains("Max-Age=0"));
        }
    }

    #[test]
    fn cookie_value_finds_the_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; accessToken=tok.en.value; other=1"),
        );
        assert_eq!(
            cookie_value(&headers, ACCESS_COOKIE).as_deref(),
            Some("tok.en.value")
        );
        assert_eq!(cookie_value(&headers, REFRESH_COOKIE), None);
    }

    #[test]
    fn cookie_value_handles_missing_header() {
        assert_eq!(cookie_value(&HeaderMap::new(), ACCESS_COOKIE), None);
    }
}
