use std::sync::Arc;
use std::time::Duration;

use tracker_engine::{
    spawn_coordinator, spawn_session, Clock, JobRecord, SessionSettings, SiteKind,
};

fn record(role: &str) -> JobRecord {
    JobRecord {
        company: "Acme Corp".to_string(),
        role: role.to_string(),
        application_link: "https://www.linkedin.com/jobs/view/123".to_string(),
        timestamp: "2024-05-01T10:00:00Z".to_string(),
    }
}

fn fixed_clock() -> Clock {
    Arc::new(|| "2024-05-01T10:00:00Z".to_string())
}

const LINKEDIN_PAGE: &str = r#"
<html><body>
  <div class="job-details-jobs-unified-top-card__company-name"><a href="#">Acme Corp</a></div>
  <div class="job-details-jobs-unified-top-card__job-title"><h1>Senior Engineer</h1></div>
</body></html>
"#;

#[tokio::test]
async fn stored_payload_is_delivered_exactly_once() {
    let (coordinator, mut popup_rx) = spawn_coordinator(4);

    coordinator.open_popup(record("Senior Engineer")).await;
    assert!(popup_rx.recv().await.is_some(), "popup open requested");

    let first = coordinator.take_stored().await;
    assert_eq!(first, Some(record("Senior Engineer")));

    // Single-delivery: the slot is now empty.
    let second = coordinator.take_stored().await;
    assert_eq!(second, None);
}

#[tokio::test]
async fn second_open_before_delivery_overwrites_the_slot() {
    let (coordinator, _popup_rx) = spawn_coordinator(4);

    coordinator.open_popup(record("First Role")).await;
    coordinator.open_popup(record("Second Role")).await;

    assert_eq!(
        coordinator.take_stored().await,
        Some(record("Second Role"))
    );
    assert_eq!(coordinator.take_stored().await, None);
}

#[tokio::test]
async fn empty_slot_reads_as_none() {
    let (coordinator, _popup_rx) = spawn_coordinator(4);
    assert_eq!(coordinator.take_stored().await, None);
}

#[tokio::test]
async fn control_click_routes_extraction_to_the_coordinator() {
    let (coordinator, mut popup_rx) = spawn_coordinator(4);
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let handle = spawn_session(
        "https://www.linkedin.com/jobs/view/123".to_string(),
        LINKEDIN_PAGE.to_string(),
        profile,
        coordinator.clone(),
        SessionSettings::default(),
        fixed_clock(),
    );

    handle.click_save().await;
    assert!(popup_rx.recv().await.is_some(), "popup open requested");

    let stored = coordinator.take_stored().await.expect("payload stored");
    assert_eq!(stored, record("Senior Engineer"));

    handle.teardown();
}

#[tokio::test]
async fn page_query_reextracts_synchronously() {
    let (coordinator, _popup_rx) = spawn_coordinator(4);
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let handle = spawn_session(
        "https://www.linkedin.com/jobs/view/123".to_string(),
        LINKEDIN_PAGE.to_string(),
        profile,
        coordinator,
        SessionSettings::default(),
        fixed_clock(),
    );

    let job = handle.request_job_data().await.expect("job data");
    assert_eq!(job, record("Senior Engineer"));

    handle.teardown();
}

#[tokio::test]
async fn torn_down_page_reads_as_no_job_data() {
    let (coordinator, _popup_rx) = spawn_coordinator(4);
    let profile = SiteKind::LinkedIn.profile().expect("profile");
    let handle = spawn_session(
        "https://www.linkedin.com/jobs/view/123".to_string(),
        LINKEDIN_PAGE.to_string(),
        profile,
        coordinator,
        SessionSettings::default(),
        fixed_clock(),
    );

    handle.teardown();
    // Give the session task a moment to observe cancellation.
    tokio::time::sleep(Duration::from_millis(20)).await;

    // No responder is "no job data", not an error.
    assert_eq!(handle.request_job_data().await, None);
}
