use url::Url;

/// Which job board the current page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteKind {
    LinkedIn,
    Seek,
    Indeed,
    Unsupported,
}

/// How the injected control sits relative to the title element. A per-site
/// styling choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Insert as the next sibling of the title element.
    AfterTitle,
    /// Append inside the title element.
    InsideTitle,
}

/// Per-site capability interface: selector candidates are ordered from
/// most-specific to most-generic; extraction takes the first non-empty hit.
pub trait SiteProfile: Send + Sync {
    fn kind(&self) -> SiteKind;
    fn name(&self) -> &'static str;
    fn company_selectors(&self) -> &'static [&'static str];
    fn role_selectors(&self) -> &'static [&'static str];
    /// Where the injected control anchors.
    fn title_selectors(&self) -> &'static [&'static str];
    fn placement(&self) -> Placement;
}

impl SiteKind {
    /// Classifies a page URL. Absence of a match is a normal outcome, never
    /// an error; unparsable URLs are `Unsupported` too.
    pub fn detect(page_url: &str) -> SiteKind {
        let Ok(url) = Url::parse(page_url) else {
            return SiteKind::Unsupported;
        };
        let Some(host) = url.host_str() else {
            return SiteKind::Unsupported;
        };
        let path = url.path();

        if host.contains("linkedin.com") && path.contains("/jobs/view/") {
            return SiteKind::LinkedIn;
        }
        if host.contains("seek.com") && path.contains("/job/") {
            return SiteKind::Seek;
        }
        if host.contains("indeed.com") {
            let has_jk = url.query_pairs().any(|(key, _)| key == "jk");
            if path.contains("/viewjob") || has_jk {
                return SiteKind::Indeed;
            }
        }
        SiteKind::Unsupported
    }

    /// The extraction/injection strategy for this variant, or `None` for
    /// unsupported pages.
    pub fn profile(self) -> Option<&'static dyn SiteProfile> {
        match self {
            SiteKind::LinkedIn => Some(&LinkedIn),
            SiteKind::Seek => Some(&Seek),
            SiteKind::Indeed => Some(&Indeed),
            SiteKind::Unsupported => None,
        }
    }
}

struct LinkedIn;

impl SiteProfile for LinkedIn {
    fn kind(&self) -> SiteKind {
        SiteKind::LinkedIn
    }

    fn name(&self) -> &'static str {
        "linkedin"
    }

    fn company_selectors(&self) -> &'static [&'static str] {
        &[
            ".job-details-jobs-unified-top-card__company-name a",
            ".artdeco-entity-lockup__title a",
            ".jobs-unified-top-card__company-name",
        ]
    }

    fn role_selectors(&self) -> &'static [&'static str] {
        &[
            ".job-details-jobs-unified-top-card__job-title h1",
            ".job-details-jobs-unified-top-card__title-container h2",
            ".text-heading-large",
        ]
    }

    fn title_selectors(&self) -> &'static [&'static str] {
        &[
            ".job-details-jobs-unified-top-card__job-title h1",
            ".text-heading-large",
        ]
    }

    fn placement(&self) -> Placement {
        Placement::AfterTitle
    }
}

struct Seek;

impl SiteProfile for Seek {
    fn kind(&self) -> SiteKind {
        SiteKind::Seek
    }

    fn name(&self) -> &'static str {
        "seek"
    }

    fn company_selectors(&self) -> &'static [&'static str] {
        &[
            "[data-automation=\"advertiser-name\"]",
            "[data-automation=\"job-company-name\"]",
        ]
    }

    fn role_selectors(&self) -> &'static [&'static str] {
        &[
            "[data-automation=\"job-detail-title\"]",
            "h1[data-automation=\"job-title\"]",
            "h1",
        ]
    }

    fn title_selectors(&self) -> &'static [&'static str] {
        &["[data-automation=\"job-detail-title\"]", "h1"]
    }

    fn placement(&self) -> Placement {
        Placement::InsideTitle
    }
}

struct Indeed;

impl SiteProfile for Indeed {
    fn kind(&self) -> SiteKind {
        SiteKind::Indeed
    }

    fn name(&self) -> &'static str {
        "indeed"
    }

    fn company_selectors(&self) -> &'static [&'static str] {
        &[
            "[data-testid=\"inlineHeader-companyName\"] a",
            "[data-company-name=\"true\"]",
            ".jobsearch-CompanyInfoContainer a",
        ]
    }

    fn role_selectors(&self) -> &'static [&'static str] {
        &[
            "h1.jobsearch-JobInfoHeader-title span",
            "h1.jobsearch-JobInfoHeader-title",
            "h1",
        ]
    }

    fn title_selectors(&self) -> &'static [&'static str] {
        &["h1.jobsearch-JobInfoHeader-title", "h1"]
    }

    fn placement(&self) -> Placement {
        Placement::AfterTitle
    }
}
