use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use leaf_health::{decode_image, diagnose_with, Diagnosis, LeafHealthError};

use crate::render::render_page;
use crate::state::{SharedState, MAX_UPLOAD_BYTES};
use crate::util::html::html_escape;
use crate::util::multipart::{extract_boundary, file_part};

/// Form field the upload page posts the image under.
const FILE_FIELD: &str = "leaf";

// ---------------------------------------------------------------------------
// POST /analyze
// ---------------------------------------------------------------------------

pub fn handle_form(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let page = match run(request, &state) {
        Ok(d)  => render_page(&result_html(&d), None),
        Err(e) => {
            log::warn!("analyze failed: {}", e);
            render_page("", Some(html_escape(&e.to_string()).as_str()))
        }
    };
    crate::routes::html_response(page)
}

// ---------------------------------------------------------------------------
// POST /api/analyze
// ---------------------------------------------------------------------------

pub fn handle_api(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    match run(request, &state).and_then(|d| {
        serde_json::to_string(&d).map_err(|e| UploadError::Internal(e.to_string()))
    }) {
        Ok(json) => crate::routes::json_response(200, json),
        Err(e) => {
            log::warn!("api analyze failed: {}", e);
            let body = serde_json::json!({ "error": e.to_string() }).to_string();
            crate::routes::json_response(e.status(), body)
        }
    }
}

// ---------------------------------------------------------------------------
// Shared request handling
// ---------------------------------------------------------------------------

/// Why an upload could not be diagnosed.
#[derive(Debug)]
pub enum UploadError {
    /// Malformed request: wrong content type, no file, too large.
    BadRequest(String),
    /// The file is not a usable image.
    Analysis(LeafHealthError),
    Internal(String),
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::BadRequest(msg) => f.write_str(msg),
            UploadError::Analysis(e)     => write!(f, "{}", e),
            UploadError::Internal(msg)   => write!(f, "internal error: {}", msg),
        }
    }
}

impl UploadError {
    pub fn status(&self) -> u16 {
        match self {
            UploadError::BadRequest(_) | UploadError::Analysis(_) => 400,
            UploadError::Internal(_) => 500,
        }
    }
}

impl From<LeafHealthError> for UploadError {
    fn from(e: LeafHealthError) -> Self {
        UploadError::Analysis(e)
    }
}

/// Reads the multipart upload and runs the full pipeline on it.
fn run(request: &mut Request, state: &SharedState) -> Result<Diagnosis, UploadError> {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();
    if !content_type.starts_with("multipart/form-data") {
        return Err(UploadError::BadRequest("expected a multipart/form-data upload".into()));
    }
    let boundary = extract_boundary(&content_type)
        .ok_or_else(|| UploadError::BadRequest("multipart boundary missing".into()))?;

    if request.body_length().map_or(false, |len| len > MAX_UPLOAD_BYTES) {
        return Err(UploadError::BadRequest(format!(
            "upload exceeds {} MiB", MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    let mut body = Vec::new();
    request.as_reader()
        .take(MAX_UPLOAD_BYTES as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| UploadError::BadRequest(format!("could not read upload: {}", e)))?;
    if body.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::BadRequest(format!(
            "upload exceeds {} MiB", MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    let bytes = file_part(&body, &boundary, FILE_FIELD)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| UploadError::BadRequest("no image file was uploaded".into()))?;

    let image = decode_image(&bytes)?;
    log::info!("analyzing {}x{} upload", image.width(), image.height());
    Ok(diagnose_with(&image, &state.extractor)?)
}

// ---------------------------------------------------------------------------
// Result formatting
// ---------------------------------------------------------------------------

pub fn result_html(d: &Diagnosis) -> String {
    let best = d.prediction.label;

    let rows: String = d.probabilities.iter().map(|(label, p)| {
        let width = (p * 260.0) as u32;
        let dim   = if label != best { " dim" } else { "" };
        format!(
            r#"<tr><td style="width:150px;font-weight:600">{}</td><td><div class="bar-wrap"><div class="bar-fill{}" style="width:{}px"></div></div></td><td class="prob-pct">{:.1}%</td></tr>"#,
            label, dim, width, p * 100.0
        )
    }).collect();

    let features: String = d.features.fields().iter()
        .map(|(name, value)| format!("<tr><th>{}</th><td>{:.6}</td></tr>", name, value))
        .collect();

    format!(
        r#"<div class="card"><h2>Result</h2>
<div class="prediction-hero">{hero}</div>
<div class="prediction-sub">Confidence: {conf:.1}% (demo heuristic)</div>
<table class="prob-table"><tbody>{rows}</tbody></table>
<div class="tip-box"><strong>Care tip:</strong> {tip}</div>
<details><summary>Show extracted features</summary>
<table class="feat-table"><tbody>{features}</tbody></table>
</details></div>"#,
        hero = best,
        conf = d.prediction.confidence_pct(),
        rows = rows,
        tip = html_escape(d.care_tip),
        features = features,
    )
}
