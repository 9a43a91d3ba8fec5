//! `Accept` header negotiation for single-object reads.

use axum::http::header::ACCEPT;
use axum::http::HeaderMap;

/// Representation chosen for a single configuration object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `{ key, value }` as JSON.
    Json,
    /// The raw value as `text/plain`.
    PlainText,
}

impl Format {
    /// Picks a representation from the request headers.
    ///
    /// Plain text is chosen only when `text/plain` is acceptable and outranks
    /// both `application/json` and wildcards. Equal quality values go to
    /// whichever the client listed first. Everything else gets JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(accept) = headers.get(ACCEPT).and_then(|v| v.to_str().ok()) else {
            return Self::Json;
        };

        // (quality, position in the header) of the best range for each format
        let mut plain = (0.0_f32, usize::MAX);
        let mut json = (0.0_f32, usize::MAX);
        let ranges = accept.split(',').filter_map(parse_media_range);
        for (position, (media, q)) in ranges.enumerate() {
            let best = match media.as_str() {
                "text/plain" => &mut plain,
                "application/json" | "application/*" | "*/*" => &mut json,
                _ => continue,
            };
            if q > best.0 {
                *best = (q, position);
            }
        }

        let plain_first = plain.0 == json.0 && plain.1 < json.1;
        if plain.0 > 0.0 && (plain.0 > json.0 || plain_first) {
            Self::PlainText
        } else {
            Self::Json
        }
    }
}

fn parse_media_range(range: &str) -> Option<(String, f32)> {
    let mut parts = range.split(';');
    let media = parts.next()?.trim().to_ascii_lowercase();
    if media.is_empty() {
        return None;
    }

    let mut q = 1.0;
    for param in parts {
        if let Some((name, value)) = param.split_once('=') {
            if name.trim().eq_ignore_ascii_case("q") {
                q = value.trim().parse().unwrap_or(0.0);
            }
        }
    }
    Some((media, q))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn missing_header_is_json() {
        assert_eq!(Format::from_headers(&HeaderMap::new()), Format::Json);
    }

    #[test]
    fn exact_text_plain() {
        assert_eq!(Format::from_headers(&accept("text/plain")), Format::PlainText);
        assert_eq!(
            Format::from_headers(&accept("text/plain; charset=utf-8")),
            Format::PlainText
        );
    }

    #[test]
    fn wildcard_and_json_stay_json() {
        assert_eq!(Format::from_headers(&accept("*/*")), Format::Json);
        assert_eq!(Format::from_headers(&accept("application/json")), Format::Json);
    }

    #[test]
    fn equal_quality_follows_client_order() {
        assert_eq!(
            Format::from_headers(&accept("text/plain, application/json")),
            Format::PlainText
        );
        assert_eq!(
            Format::from_headers(&accept("application/json, text/plain")),
            Format::Json
        );
        assert_eq!(
            Format::from_headers(&accept("*/*;q=0.8, text/plain;q=0.8")),
            Format::Json
        );
    }

    #[test]
    fn quality_values() {
        assert_eq!(
            Format::from_headers(&accept("application/json;q=0.5, text/plain")),
            Format::PlainText
        );
        assert_eq!(
            Format::from_headers(&accept("text/plain;q=0, */*")),
            Format::Json
        );
    }

    #[test]
    fn unrelated_types_are_json() {
        assert_eq!(Format::from_headers(&accept("text/html")), Format::Json);
    }
}
