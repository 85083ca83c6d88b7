use url::Url;

/// Pulls the spreadsheet id out of a pasted Google Sheets URL.
///
/// Accepts any URL whose path contains `/spreadsheets/d/<id>`; the id is the
/// leading run of `[A-Za-z0-9_-]` in the segment after `d`. Returns `None`
/// for anything else, including bare ids.
pub fn parse_spreadsheet_id(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment != "spreadsheets" {
            continue;
        }
        if segments.next() != Some("d") {
            return None;
        }
        let raw = segments.next()?;
        let id: String = raw
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        return (!id.is_empty()).then_some(id);
    }
    None
}
