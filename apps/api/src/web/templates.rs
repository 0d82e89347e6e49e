use askama::Template;

use crate::extraction::matcher::JobScore;
use crate::extraction::ExtractionResult;

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 860px; margin: 0 auto; padding: 24px; color: #333; background: #f8f9fa; }
.card { background: white; padding: 24px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.flash { background: #fff3cd; border-left: 4px solid #ffc107; padding: 10px 14px; margin-bottom: 16px; }
.score { background: #f1f8ff; border-left: 4px solid #007acc; padding: 12px 16px; }
textarea { width: 100%; min-height: 140px; }
pre { background: #f8f9fa; padding: 12px; white-space: pre-wrap; }
"#;

/// Upload form. `flash` carries a one-shot message from a rejected upload.
#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Scanner</title>
    <style>{{ style|safe }}</style>
</head>
<body>
<div class="card">
    <h1>Resume Scanner</h1>
    {% if let Some(message) = flash %}
    <div class="flash">{{ message }}</div>
    {% endif %}
    <form method="post" action="/" enctype="multipart/form-data">
        <p><label>Resume (PDF or DOCX): <input type="file" name="resume"></label></p>
        <p><label>Job description (optional):<br>
            <textarea name="job_desc"></textarea></label></p>
        <p><button type="submit">Analyze</button></p>
    </form>
</div>
</body>
</html>"#,
    ext = "html"
)]
pub struct IndexPage<'a> {
    pub style: &'a str,
    pub flash: Option<&'a str>,
}

impl<'a> IndexPage<'a> {
    pub fn new(flash: Option<&'a str>) -> Self {
        Self { style: STYLE, flash }
    }
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Resume Scanner: Results</title>
    <style>{{ style|safe }}</style>
</head>
<body>
<div class="card">
    <h1>Extraction Results</h1>

    <h2>Name</h2>
    {% if let Some(name) = name %}<p>{{ name }}</p>{% else %}<p><em>Not found</em></p>{% endif %}

    <h2>Emails</h2>
    <ul>{% for email in emails %}<li>{{ email }}</li>{% endfor %}</ul>

    <h2>Phones</h2>
    <ul>{% for phone in phones %}<li>{{ phone }}</li>{% endfor %}</ul>

    <h2>Education</h2>
    <ul>{% for line in education %}<li>{{ line }}</li>{% endfor %}</ul>

    <h2>Experience</h2>
    <ul>{% for line in experience %}<li>{{ line }}</li>{% endfor %}</ul>

    <h2>Skills</h2>
    <p>{{ skills|join(", ") }}</p>

    {% if let Some(score) = job_score %}
    <div class="score">
        <h2>Job Match: {{ "{:.2}"|format(score.final_score_percent) }}%</h2>
        <p>Cosine similarity: {{ "{:.3}"|format(score.cosine_similarity) }}</p>
        <p>Skill overlap: {{ score.skill_overlap_count }} of {{ score.job_skills_count }}
            {% if !score.skill_overlap.is_empty() %}({{ score.skill_overlap|join(", ") }}){% endif %}</p>
    </div>
    <h2>Job Description</h2>
    <pre>{{ job_desc }}</pre>
    {% endif %}

    <h2>Raw Text (first lines)</h2>
    <pre>{{ snippet }}</pre>

    <p><a href="/">Scan another resume</a></p>
</div>
</body>
</html>"#,
    ext = "html"
)]
pub struct ResultPage<'a> {
    pub style: &'a str,
    pub name: Option<&'a str>,
    pub emails: &'a [String],
    pub phones: &'a [String],
    pub education: &'a [String],
    pub experience: &'a [String],
    pub skills: &'a [String],
    pub job_score: Option<&'a JobScore>,
    pub job_desc: &'a str,
    pub snippet: &'a str,
}

impl<'a> ResultPage<'a> {
    pub fn new(result: &'a ExtractionResult, job_desc: &'a str) -> Self {
        Self {
            style: STYLE,
            name: result.name.as_deref(),
            emails: &result.emails,
            phones: &result.phones,
            education: &result.education,
            experience: &result.experience,
            skills: &result.skills,
            job_score: result.job_score.as_ref(),
            job_desc,
            snippet: &result.raw_text_snippet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::matcher::JobScore;

    fn result() -> ExtractionResult {
        ExtractionResult {
            name: Some("Jane <Doe>".to_string()),
            emails: vec!["jane@example.com".to_string()],
            phones: vec![],
            education: vec![],
            experience: vec![],
            skills: vec!["python".to_string(), "sql".to_string()],
            job_score: None,
            raw_text_snippet: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn test_index_renders_flash() {
        let html = IndexPage::new(Some("Please upload")).render().unwrap();
        assert!(html.contains("Please upload"));
        assert!(html.contains(r#"name="resume""#));
        assert!(!IndexPage::new(None).render().unwrap().contains("class=\"flash\""));
    }

    #[test]
    fn test_result_escapes_document_text() {
        let r = result();
        let html = ResultPage::new(&r, "").render().unwrap();
        assert!(html.contains("Jane &#60;Doe&#62;") || html.contains("Jane &lt;Doe&gt;"));
        assert!(html.contains("python, sql"));
        assert!(!html.contains("Job Match"));
    }

    #[test]
    fn test_result_shows_job_score() {
        let mut r = result();
        r.job_score = Some(JobScore {
            cosine_similarity: 0.41234,
            skill_overlap_count: 1,
            job_skills_count: 2,
            skill_overlap: vec!["python".to_string()],
            final_score_percent: 44.74,
        });
        let html = ResultPage::new(&r, "Python role").render().unwrap();
        assert!(html.contains("Job Match: 44.74%"));
        assert!(html.contains("0.412"));
        assert!(html.contains("Python role"));
    }
}
