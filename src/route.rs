//! URL addressing.
//!
//! The site has one page. A single boolean query parameter, `admin=true`,
//! switches it to the admin panel; every other URL is the public site.
//! Within the admin panel, `tab=pricing` selects the pricing editor.

/// Query parameter that opens the admin panel.
pub const ADMIN_PARAM: &str = "admin";
/// Query parameter selecting the admin tab.
pub const TAB_PARAM: &str = "tab";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Public,
    Admin,
}

impl View {
    pub fn from_url(url: &str) -> Self {
        if query_value(url, ADMIN_PARAM) == Some("true") {
            View::Admin
        } else {
            View::Public
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Gallery,
    Pricing,
}

impl AdminTab {
    pub fn from_url(url: &str) -> Self {
        match query_value(url, TAB_PARAM) {
            Some("pricing") => AdminTab::Pricing,
            _ => AdminTab::Gallery,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdminTab::Gallery => "gallery",
            AdminTab::Pricing => "pricing",
        }
    }
}

/// Split `url` into its path and query string, dropping any fragment.
fn split_url(url: &str) -> (&str, &str) {
    let url = url.split_once('#').map_or(url, |(before, _)| before);
    url.split_once('?').unwrap_or((url, ""))
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

/// First value of `name` in the query string of `url`.
fn query_value<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = split_url(url);
    query_pairs(query).find(|(key, _)| *key == name).map(|(_, value)| value)
}

/// Link into the admin panel from the current URL.
///
/// Keeps the path and unrelated query parameters, and sets `admin=true`.
pub fn admin_entry_href(current_url: &str) -> String {
    let (path, query) = split_url(current_url);
    let mut pairs: Vec<String> = query_pairs(query)
        .filter(|(key, _)| *key != ADMIN_PARAM)
        .map(|(key, value)| {
            if value.is_empty() {
                key.to_string()
            } else {
                format!("{key}={value}")
            }
        })
        .collect();
    pairs.push(format!("{ADMIN_PARAM}=true"));
    format!("{path}?{}", pairs.join("&"))
}

/// Link back to the public site: the bare path, with the query dropped.
///
/// Leaving the admin panel this way does not log out.
pub fn exit_admin_href(current_url: &str) -> String {
    let (path, _) = split_url(current_url);
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

/// Admin panel link for a specific tab.
pub fn admin_tab_href(current_url: &str, tab: AdminTab) -> String {
    let path = exit_admin_href(current_url);
    format!("{path}?{ADMIN_PARAM}=true&{TAB_PARAM}={}", tab.as_str())
}
