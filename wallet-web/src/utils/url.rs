//! URL utility functions for reading query parameters

use web_sys::window;

/// Get a query parameter from the current URL
///
/// Reads `window.location.search` directly, so it works before the router
/// is mounted (config and log level are resolved ahead of `App`).
pub fn get_query_param(key: &str) -> Option<String> {
    let search = window()?.location().search().ok()?;
    find_param(&search, key)
}

/// Look up `key` in a raw query string, with or without the leading `?`.
///
/// A bare key (`?debug`) yields an empty value. Values are percent-decoded.
pub fn find_param(search: &str, key: &str) -> Option<String> {
    let query_string = search.strip_prefix('?').unwrap_or(search);
    if query_string.is_empty() {
        return None;
    }

    for pair in query_string.split('&') {
        match pair.split_once('=') {
            Some((param_key, param_value)) if param_key == key => {
                return Some(
                    urlencoding::decode(param_value)
                        .map(|value| value.into_owned())
                        .unwrap_or_else(|_| param_value.to_string()),
                );
            }
            None if pair == key => return Some(String::new()),
            _ => {}
        }
    }

    None
}
