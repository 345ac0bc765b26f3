//! Human-readable track labels derived from the resolved resource URL.

use crate::constants::{ENDPOINT_EXTENSIONS, PLACEHOLDER_LABEL};
use crate::error::{Error, Result};

/// Derive a label from `final_url`: last path segment, percent-decoded,
/// extension stripped. `source_url` is the endpoint that was queried; a
/// result naming the endpoint itself is rejected.
pub fn resolve_display_name(final_url: &str, source_url: &str) -> Result<String> {
    let segment = last_segment(final_url)
        .ok_or_else(|| Error::NameResolutionFailed(format!("no path segment in {final_url}")))?;
    let decoded = percent_decode(segment)?;
    let (stem, ext) = split_extension(&decoded);

    if let Some(ext) = ext {
        if ENDPOINT_EXTENSIONS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
        {
            return Err(Error::NameResolutionFailed(format!(
                "{decoded} looks like an endpoint"
            )));
        }
    }
    if last_segment(source_url).is_some_and(|s| s == segment) {
        return Err(Error::NameResolutionFailed(format!(
            "{decoded} is the track source itself"
        )));
    }
    let stem = stem.trim();
    if stem.is_empty() {
        return Err(Error::NameResolutionFailed("empty name".into()));
    }
    Ok(stem.to_string())
}

/// Like `resolve_display_name` but never fails: falls back to the placeholder.
pub fn display_name_or_placeholder(final_url: Option<&str>, source_url: &str) -> String {
    let Some(url) = final_url else {
        return PLACEHOLDER_LABEL.to_string();
    };
    match resolve_display_name(url, source_url) {
        Ok(name) => name,
        Err(e) => {
            log::debug!("[label] {e}; using placeholder");
            PLACEHOLDER_LABEL.to_string()
        }
    }
}

fn last_segment(url: &str) -> Option<&str> {
    // Drop fragment and query, then the scheme/authority.
    let url = url.split('#').next().unwrap_or(url);
    let url = url.split('?').next().unwrap_or(url);
    let path = match url.find("://") {
        Some(i) => {
            let rest = &url[i + 3..];
            rest.find('/').map(|j| &rest[j..]).unwrap_or("")
        }
        None => url,
    };
    path.rsplit('/').find(|s| !s.is_empty())
}

fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        // A leading dot is a hidden-file style name, not an extension.
        Some(i) if i > 0 && i + 1 < name.len() => (&name[..i], Some(&name[i + 1..])),
        _ => (name, None),
    }
}

/// Decode `%XX` escapes into UTF-8. Path segments keep `+` literal.
pub fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = bytes
                    .get(i + 1..i + 3)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| {
                        Error::NameResolutionFailed(format!("bad escape at byte {i} in {input}"))
                    })?;
                out.push(hex);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out)
        .map_err(|_| Error::NameResolutionFailed(format!("{input} is not valid UTF-8")))
}
