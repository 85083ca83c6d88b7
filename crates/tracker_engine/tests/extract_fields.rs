use std::sync::Arc;

use pretty_assertions::assert_eq;
use tracker_engine::{extract_job, Clock, JobRecord, PageDocument, SiteKind};

fn fixed_clock() -> Clock {
    Arc::new(|| "2024-05-01T10:00:00Z".to_string())
}

fn extract(kind: SiteKind, html: &str, url: &str) -> JobRecord {
    let profile = kind.profile().expect("supported site");
    let document = PageDocument::from_html(html);
    extract_job(profile, &document, url, &fixed_clock())
}

const LINKEDIN_PRIMARY: &str = r#"
<html><body>
  <div class="job-details-jobs-unified-top-card__company-name"><a href="#">Acme Corp</a></div>
  <div class="job-details-jobs-unified-top-card__job-title"><h1>Senior Engineer</h1></div>
</body></html>
"#;

#[test]
fn linkedin_primary_selectors_yield_full_record() {
    let record = extract(
        SiteKind::LinkedIn,
        LINKEDIN_PRIMARY,
        "https://www.linkedin.com/jobs/view/123",
    );
    assert_eq!(
        record,
        JobRecord {
            company: "Acme Corp".to_string(),
            role: "Senior Engineer".to_string(),
            application_link: "https://www.linkedin.com/jobs/view/123".to_string(),
            timestamp: "2024-05-01T10:00:00Z".to_string(),
        }
    );
}

#[test]
fn linkedin_fallback_selectors_are_used_when_primary_is_absent() {
    let html = r#"
    <html><body>
      <div class="artdeco-entity-lockup__title"><a href="#">Fallback Co</a></div>
      <h2 class="text-heading-large">Staff Engineer</h2>
    </body></html>
    "#;
    let record = extract(SiteKind::LinkedIn, html, "https://www.linkedin.com/jobs/view/9");
    assert_eq!(record.company, "Fallback Co");
    assert_eq!(record.role, "Staff Engineer");
}

#[test]
fn exhausted_selectors_degrade_to_empty_fields() {
    let html = "<html><body><p>nothing useful here</p></body></html>";
    let record = extract(SiteKind::LinkedIn, html, "https://www.linkedin.com/jobs/view/9");
    assert_eq!(record.company, "");
    assert_eq!(record.role, "");
    // Link and timestamp never depend on the DOM.
    assert_eq!(record.application_link, "https://www.linkedin.com/jobs/view/9");
    assert_eq!(record.timestamp, "2024-05-01T10:00:00Z");
}

#[test]
fn extracted_text_is_whitespace_normalized() {
    let html = r#"
    <html><body>
      <div class="job-details-jobs-unified-top-card__company-name"><a>
        Acme
           Corp
      </a></div>
      <div class="job-details-jobs-unified-top-card__job-title"><h1>  Senior
        Engineer </h1></div>
    </body></html>
    "#;
    let record = extract(SiteKind::LinkedIn, html, "https://www.linkedin.com/jobs/view/1");
    assert_eq!(record.company, "Acme Corp");
    assert_eq!(record.role, "Senior Engineer");
}

#[test]
fn seek_selectors_match_data_automation_attributes() {
    let html = r#"
    <html><body>
      <span data-automation="advertiser-name">Southern Rail</span>
      <h1 data-automation="job-detail-title">Signal Engineer</h1>
    </body></html>
    "#;
    let record = extract(SiteKind::Seek, html, "https://www.seek.com.au/job/81234567");
    assert_eq!(record.company, "Southern Rail");
    assert_eq!(record.role, "Signal Engineer");
}

#[test]
fn indeed_selectors_match_header_markup() {
    let html = r#"
    <html><body>
      <div data-testid="inlineHeader-companyName"><a href="#">Blue Door</a></div>
      <h1 class="jobsearch-JobInfoHeader-title"><span>Backend Developer</span></h1>
    </body></html>
    "#;
    let record = extract(
        SiteKind::Indeed,
        html,
        "https://au.indeed.com/viewjob?jk=abc123",
    );
    assert_eq!(record.company, "Blue Door");
    assert_eq!(record.role, "Backend Developer");
}

#[test]
fn job_record_serializes_with_camel_case_wire_names() {
    let record = JobRecord {
        company: "Acme Corp".to_string(),
        role: "Senior Engineer".to_string(),
        application_link: "https://www.linkedin.com/jobs/view/123".to_string(),
        timestamp: "2024-05-01T10:00:00Z".to_string(),
    };
    let json = serde_json::to_value(&record).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "company": "Acme Corp",
            "role": "Senior Engineer",
            "applicationLink": "https://www.linkedin.com/jobs/view/123",
            "timestamp": "2024-05-01T10:00:00Z",
        })
    );
}
