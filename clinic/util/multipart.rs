/// Minimal multipart/form-data parsing, enough for a single file upload.

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// `name="..."` from Content-Disposition.
    pub name: Option<String>,
    /// `filename="..."`; present only for file inputs.
    pub filename: Option<String>,
    pub data: Vec<u8>,
}

/// Index of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts the boundary token from a Content-Type value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Reads a quoted `key="value"` attribute out of a header block.
fn quoted_attr(headers: &str, key: &str) -> Option<String> {
    let pattern = format!("{}=\"", key);
    let mut search = headers;
    // `name="` also matches the tail of `filename="`; skip those hits.
    while let Some(pos) = search.find(&pattern) {
        let preceded_by_ident = search[..pos]
            .chars()
            .last()
            .map_or(false, |c| c.is_ascii_alphanumeric());
        let rest = &search[pos + pattern.len()..];
        if !preceded_by_ident {
            return rest.find('"').map(|end| rest[..end].to_owned());
        }
        search = rest;
    }
    None
}

/// Splits a multipart body into its parts.  Malformed parts (no header/body
/// separator) are skipped.
pub fn parse_parts(body: &[u8], boundary: &str) -> Vec<Part> {
    let delimiter = format!("--{}", boundary);
    let delim = delimiter.as_bytes();
    let mut parts = Vec::new();

    let mut rest = match find(body, delim) {
        Some(pos) => &body[pos + delim.len()..],
        None => return parts,
    };
    while let Some(end) = find(rest, delim) {
        let chunk = &rest[..end];
        rest = &rest[end + delim.len()..];

        let chunk = chunk.strip_prefix(b"\r\n").unwrap_or(chunk);
        let Some(sep) = find(chunk, b"\r\n\r\n") else { continue };
        let headers = String::from_utf8_lossy(&chunk[..sep]);
        let data = &chunk[sep + 4..];
        let data = data.strip_suffix(b"\r\n").unwrap_or(data);

        parts.push(Part {
            name: quoted_attr(&headers, "name"),
            filename: quoted_attr(&headers, "filename"),
            data: data.to_vec(),
        });
    }
    parts
}

/// Returns the data of the first file part, preferring one whose field name
/// is `field`.
pub fn file_part(body: &[u8], boundary: &str, field: &str) -> Option<Vec<u8>> {
    let files: Vec<Part> = parse_parts(body, boundary)
        .into_iter()
        .filter(|p| p.filename.is_some())
        .collect();
    let named = files.iter().position(|p| p.name.as_deref() == Some(field));
    let idx = named.or(if files.is_empty() { None } else { Some(0) })?;
    files.into_iter().nth(idx).map(|p| p.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Vec<u8> {
        let mut b = Vec::new();
        b.extend_from_slice(b"--XYZ\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n");
        b.extend_from_slice(b"--XYZ\r\nContent-Disposition: form-data; name=\"leaf\"; filename=\"a.png\"\r\n");
        b.extend_from_slice(b"Content-Type: image/png\r\n\r\n\x89PNG\r\n\x00\x01\r\n");
        b.extend_from_slice(b"--XYZ--\r\n");
        b
    }

    #[test]
    fn boundary_from_content_type() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=----abc").as_deref(),
            Some("----abc")
        );
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=\"q\"").as_deref(),
            Some("q")
        );
        assert_eq!(extract_boundary("application/json"), None);
    }

    #[test]
    fn splits_text_and_file_parts() {
        let parts = parse_parts(&body(), "XYZ");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name.as_deref(), Some("note"));
        assert_eq!(parts[0].filename, None);
        assert_eq!(parts[0].data, b"hello");
        assert_eq!(parts[1].name.as_deref(), Some("leaf"));
        assert_eq!(parts[1].filename.as_deref(), Some("a.png"));
        // Binary payload with an embedded CRLF survives intact.
        assert_eq!(parts[1].data, b"\x89PNG\r\n\x00\x01");
    }

    #[test]
    fn file_part_by_name_or_first() {
        assert_eq!(file_part(&body(), "XYZ", "leaf").unwrap(), b"\x89PNG\r\n\x00\x01");
        assert_eq!(file_part(&body(), "XYZ", "other").unwrap(), b"\x89PNG\r\n\x00\x01");
        assert_eq!(file_part(b"no parts here", "XYZ", "leaf"), None);
    }
}
