#![deny(missing_docs)]

//! # Pointer Utilities
//!
//! JSON Pointer segment escaping and resolution of external document
//! locators relative to the document that holds the reference.
//!
//! No document is ever fetched here; locations are only normalized so the
//! workspace can be keyed consistently.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Escapes a JSON Pointer segment (`~` to `~0`, `/` to `~1`).
pub fn escape_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub fn decode_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Resolves `resource` against the location of the referencing document.
///
/// Absolute URLs are returned unchanged. Relative locators are joined onto a
/// URL host, or onto the parent directory of a file-path host.
pub fn resolve_location(resource: &str, host: Option<&str>) -> String {
    if Url::parse(resource).is_ok() {
        return resource.to_string();
    }
    let Some(host) = host else {
        return resource.to_string();
    };
    if let Ok(base) = Url::parse(host) {
        return base
            .join(resource)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| resource.to_string());
    }
    if Path::new(resource).is_absolute() {
        return resource.to_string();
    }
    let parent = Path::new(host).parent().unwrap_or_else(|| Path::new(""));
    normalize_path(&parent.join(resource))
}

fn normalize_path(path: &Path) -> String {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_escaping() {
        assert_eq!(escape_segment("/pets/{id}"), "~1pets~1{id}");
        assert_eq!(escape_segment("a~b"), "a~0b");
        assert_eq!(decode_segment("~1pets~1{id}"), "/pets/{id}");
        assert_eq!(decode_segment("a~0b"), "a~b");
    }

    #[test]
    fn test_decode_segment_percent_encoding() {
        assert_eq!(decode_segment("User%20Profile~1details"), "User Profile/details");
    }

    #[test]
    fn test_resolve_against_url() {
        assert_eq!(
            resolve_location("../common/pet.yaml", Some("https://example.com/api/v1/openapi.yaml")),
            "https://example.com/api/common/pet.yaml"
        );
        assert_eq!(
            resolve_location("https://other.org/x.json", Some("https://example.com/a.yaml")),
            "https://other.org/x.json"
        );
    }

    #[test]
    fn test_resolve_against_path() {
        assert_eq!(
            resolve_location("./schemas/pet.yaml", Some("specs/openapi.yaml")),
            "specs/schemas/pet.yaml"
        );
        assert_eq!(
            resolve_location("../shared.yaml", Some("specs/v2/api.yaml")),
            "specs/shared.yaml"
        );
        assert_eq!(resolve_location("pet.yaml", None), "pet.yaml");
    }
}
