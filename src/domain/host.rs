//! Domain (host) extraction from bookmark URIs.

use url::{ParseError, Url};

/// Return the authority of `uri` as written: case and explicit port kept,
/// userinfo dropped. Unparseable URIs and URIs without an authority
/// (`place:`, `javascript:`, `data:`) give an empty string.
///
/// A port out of `u16` range is only a semantic rejection; such URIs still
/// yield their authority as written (`http://h:99999/` gives `h:99999`).
pub fn extract_domain(uri: &str) -> String {
    let uri = uri.trim();
    match Url::parse(uri) {
        Ok(_) | Err(ParseError::InvalidPort) => {}
        Err(_) => return String::new(),
    }

    let Some((_, rest)) = uri.split_once(':') else {
        return String::new();
    };
    let Some(rest) = rest.strip_prefix("//") else {
        return String::new();
    };
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.to_string()
}
