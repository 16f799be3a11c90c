use actix_web::{cookie::Cookie, dev::Payload, FromRequest, HttpRequest};
use serde::Serialize;
use std::future::{ready, Ready};

pub const THEME_COOKIE: &str = "theme";
pub const SIDEBAR_COOKIE: &str = "sidebar";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Admin chrome preferences, carried in cookies between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiSettings {
    pub theme: Theme,
    pub sidebar_expanded: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            theme: Theme::Light,
            sidebar_expanded: true,
        }
    }
}

impl UiSettings {
    pub fn from_cookies(req: &HttpRequest) -> Self {
        let theme = match req.cookie(THEME_COOKIE).as_ref().map(Cookie::value) {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        };
        let sidebar_expanded = !matches!(
            req.cookie(SIDEBAR_COOKIE).as_ref().map(Cookie::value),
            Some("collapsed")
        );

        UiSettings {
            theme,
            sidebar_expanded,
        }
    }

    pub fn theme_cookie(&self) -> Cookie<'static> {
        Self::cookie(THEME_COOKIE, self.theme.as_str())
    }

    pub fn sidebar_cookie(&self) -> Cookie<'static> {
        let value = if self.sidebar_expanded {
            "expanded"
        } else {
            "collapsed"
        };
        Self::cookie(SIDEBAR_COOKIE, value)
    }

    fn cookie(name: &'static str, value: &'static str) -> Cookie<'static> {
        let mut cookie = Cookie::new(name, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie
    }
}

impl FromRequest for UiSettings {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(UiSettings::from_cookies(req)))
    }
}
