use crate::{Clock, JobRecord, PageDocument, SiteProfile};

/// Builds a fresh `JobRecord` from the current document.
///
/// Company and role walk their ordered selector candidates and take the
/// first non-empty hit; an exhausted list degrades to an empty string, never
/// an error. The application link is always the page URL; the timestamp is
/// capture time from the injected clock.
pub fn extract_job(
    profile: &dyn SiteProfile,
    document: &PageDocument,
    page_url: &str,
    clock: &Clock,
) -> JobRecord {
    let company = first_non_empty(document, profile.company_selectors());
    let role = first_non_empty(document, profile.role_selectors());

    log::info!(
        "extracted job fields: site={} company_found={} role_found={} url={}",
        profile.name(),
        !company.is_empty(),
        !role.is_empty(),
        page_url
    );

    JobRecord {
        company,
        role,
        application_link: page_url.to_string(),
        timestamp: clock(),
    }
}

fn first_non_empty(document: &PageDocument, selectors: &[&str]) -> String {
    for selector in selectors {
        if let Some(raw) = document.select_first_text(selector) {
            let text = clean_text(&raw);
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Collapses runs of whitespace (including newlines) into single spaces and
/// trims the ends.
fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
