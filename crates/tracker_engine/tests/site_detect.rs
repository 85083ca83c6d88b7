use tracker_engine::SiteKind;

#[test]
fn linkedin_job_view_urls_are_detected() {
    assert_eq!(
        SiteKind::detect("https://www.linkedin.com/jobs/view/123"),
        SiteKind::LinkedIn
    );
    assert_eq!(
        SiteKind::detect("https://linkedin.com/jobs/view/4242?refId=abc"),
        SiteKind::LinkedIn
    );
}

#[test]
fn linkedin_non_job_pages_are_unsupported() {
    assert_eq!(
        SiteKind::detect("https://www.linkedin.com/feed/"),
        SiteKind::Unsupported
    );
    assert_eq!(
        SiteKind::detect("https://www.linkedin.com/jobs/search/?keywords=rust"),
        SiteKind::Unsupported
    );
}

#[test]
fn seek_job_urls_are_detected() {
    assert_eq!(
        SiteKind::detect("https://www.seek.com.au/job/81234567"),
        SiteKind::Seek
    );
    assert_eq!(
        SiteKind::detect("https://www.seek.com.au/jobs?keywords=rust"),
        SiteKind::Unsupported
    );
}

#[test]
fn indeed_job_urls_are_detected_by_path_or_query() {
    assert_eq!(
        SiteKind::detect("https://au.indeed.com/viewjob?jk=abcdef0123456789"),
        SiteKind::Indeed
    );
    assert_eq!(
        SiteKind::detect("https://www.indeed.com/viewjob"),
        SiteKind::Indeed
    );
    // The query parameter alone signals a job view.
    assert_eq!(
        SiteKind::detect("https://www.indeed.com/?jk=abcdef0123456789"),
        SiteKind::Indeed
    );
    assert_eq!(
        SiteKind::detect("https://www.indeed.com/jobs?q=rust"),
        SiteKind::Unsupported
    );
}

#[test]
fn other_hosts_and_garbage_are_unsupported() {
    assert_eq!(
        SiteKind::detect("https://example.com/jobs/view/1"),
        SiteKind::Unsupported
    );
    assert_eq!(SiteKind::detect("not a url"), SiteKind::Unsupported);
    assert_eq!(SiteKind::detect(""), SiteKind::Unsupported);
}

#[test]
fn unsupported_pages_have_no_profile() {
    assert!(SiteKind::Unsupported.profile().is_none());
    assert!(SiteKind::LinkedIn.profile().is_some());
    assert!(SiteKind::Seek.profile().is_some());
    assert!(SiteKind::Indeed.profile().is_some());
}
