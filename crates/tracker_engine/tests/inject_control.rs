use scraper::{Html, Selector};
use tracker_engine::{ensure_control_present, InjectOutcome, PageDocument, SiteKind, CONTROL_ID};

const LINKEDIN_PAGE: &str = r#"
<html><body>
  <div class="job-details-jobs-unified-top-card__job-title"><h1>Senior Engineer</h1></div>
</body></html>
"#;

const SEEK_PAGE: &str = r#"
<html><body>
  <h1 data-automation="job-detail-title">Signal Engineer</h1>
</body></html>
"#;

fn count_controls(html: &str) -> usize {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!("#{CONTROL_ID}")).expect("selector");
    document.select(&selector).count()
}

#[test]
fn injection_is_idempotent() {
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let mut document = PageDocument::from_html(LINKEDIN_PAGE);

    assert_eq!(
        ensure_control_present(&mut document, profile),
        InjectOutcome::Injected
    );
    assert_eq!(
        ensure_control_present(&mut document, profile),
        InjectOutcome::AlreadyPresent
    );
    assert_eq!(count_controls(&document.html()), 1);
}

#[test]
fn linkedin_control_is_placed_as_title_sibling() {
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let mut document = PageDocument::from_html(LINKEDIN_PAGE);
    ensure_control_present(&mut document, profile);

    let parsed = Html::parse_document(&document.html());
    let sibling = Selector::parse(&format!("h1 + button#{CONTROL_ID}")).expect("selector");
    assert_eq!(parsed.select(&sibling).count(), 1);
}

#[test]
fn seek_control_is_placed_inside_title() {
    let profile = SiteKind::Seek.profile().expect("profile");
    let mut document = PageDocument::from_html(SEEK_PAGE);
    ensure_control_present(&mut document, profile);

    let parsed = Html::parse_document(&document.html());
    let inside = Selector::parse(&format!("h1 > button#{CONTROL_ID}")).expect("selector");
    assert_eq!(parsed.select(&inside).count(), 1);
    // The label survives placement.
    assert!(document.html().contains("Save Job"));
}

#[test]
fn missing_title_reports_title_missing_and_changes_nothing() {
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let mut document = PageDocument::from_html("<html><body><p>loading…</p></body></html>");

    assert_eq!(
        ensure_control_present(&mut document, profile),
        InjectOutcome::TitleMissing
    );
    assert_eq!(count_controls(&document.html()), 0);
}

#[test]
fn removed_control_can_be_injected_again() {
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let mut document = PageDocument::from_html(LINKEDIN_PAGE);
    ensure_control_present(&mut document, profile);

    assert!(document.remove_element_id(CONTROL_ID));
    assert_eq!(count_controls(&document.html()), 0);

    assert_eq!(
        ensure_control_present(&mut document, profile),
        InjectOutcome::Injected
    );
    assert_eq!(count_controls(&document.html()), 1);
}

#[test]
fn control_class_carries_the_site_name() {
    let profile = SiteKind::Indeed.profile().expect("profile");
    let mut document = PageDocument::from_html(
        r#"<html><body><h1 class="jobsearch-JobInfoHeader-title">Role</h1></body></html>"#,
    );
    ensure_control_present(&mut document, profile);
    assert!(document.html().contains("job-tracker-save--indeed"));
}
