use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap,
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::analyze;
use crate::extraction::loader::TempUpload;
use crate::state::AppState;
use crate::web::templates::{IndexPage, ResultPage};

const FLASH_COOKIE: &str = "flash";
const MISSING_RESUME: &str = "missing_resume";

fn flash_message(code: &str) -> Option<&'static str> {
    match code {
        MISSING_RESUME => Some("Please upload a resume file (PDF or DOCX)."),
        _ => None,
    }
}

fn read_flash(headers: &HeaderMap) -> Option<&'static str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == FLASH_COOKIE)
        .and_then(|(_, code)| flash_message(code))
}

/// GET /
pub async fn handle_index(headers: HeaderMap) -> Result<Response, AppError> {
    let flash = read_flash(&headers);
    let page = Html(IndexPage::new(flash).render()?);
    if flash.is_some() {
        let clear = format!("{FLASH_COOKIE}=; Path=/; Max-Age=0");
        return Ok(([(SET_COOKIE, clear)], page).into_response());
    }
    Ok(page.into_response())
}

/// POST /
/// Multipart fields: `resume` (file) and `job_desc` (text, optional).
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut job_desc = String::new();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if !filename.is_empty() {
                    upload = Some((filename, bytes.to_vec()));
                }
            }
            "job_desc" => job_desc = field.text().await?,
            _ => {}
        }
    }

    let job_desc = job_desc.trim().to_string();

    let Some((filename, bytes)) = upload else {
        let cookie = format!("{FLASH_COOKIE}={MISSING_RESUME}; Path=/; Max-Age=60; HttpOnly");
        return Ok(([(SET_COOKIE, cookie)], Redirect::to("/")).into_response());
    };

    let skills = state.skills.clone();
    let recognizer = state.recognizer.clone();
    let job = job_desc.clone();
    let size = bytes.len();
    let result = tokio::task::spawn_blocking(move || {
        let text = TempUpload::create(&bytes)?.extract(&filename)?;
        Ok::<_, AppError>(analyze(&text, &job, &skills, recognizer.as_ref()))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("extraction task failed: {e}")))??;

    info!(
        bytes = size,
        emails = result.emails.len(),
        skills = result.skills.len(),
        score = result.job_score.as_ref().map(|s| s.final_score_percent),
        "Resume analyzed"
    );

    let page = ResultPage::new(&result, &job_desc).render()?;
    Ok(Html(page).into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_read_flash_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("session=abc; flash=missing_resume; theme=dark"),
        );
        assert_eq!(
            read_flash(&headers),
            Some("Please upload a resume file (PDF or DOCX).")
        );
    }

    #[test]
    fn test_unknown_flash_code_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("flash=whatever"));
        assert_eq!(read_flash(&headers), None);
        assert_eq!(read_flash(&HeaderMap::new()), None);
    }
}
