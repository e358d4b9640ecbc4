use serde::Deserialize;

pub const MISSING_SITE_NAME: &str = "—";

/// A single organic hit as it comes off the wire. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSearchResult {
    pub url: Option<String>,
    pub title: Option<String>,
    pub site_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub site_name: String,
    pub description: String,
}

impl SearchResult {
    /// Applies defaults for the optional fields. Returns `None` when the hit has
    /// no usable url or title.
    pub fn from_raw(raw: RawSearchResult) -> Option<Self> {
        let url = raw.url.filter(|u| !u.is_empty())?;
        let title = raw.title.filter(|t| !t.is_empty())?;

        Some(SearchResult {
            url,
            title,
            site_name: raw
                .site_name
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| MISSING_SITE_NAME.to_string()),
            description: raw.description.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RawSearchResult, SearchResult, MISSING_SITE_NAME};

    #[test]
    fn missing_site_name_gets_placeholder() {
        let raw: RawSearchResult = serde_json::from_str(
            r#"{"url": "https://www.stepstone.de/jobs/123", "title": "Postdoc"}"#,
        )
        .unwrap();

        let result = SearchResult::from_raw(raw).unwrap();

        assert_eq!(result.site_name, MISSING_SITE_NAME);
        assert_eq!(result.description, "");
    }

    #[test]
    fn camel_case_site_name_is_read() {
        let raw: RawSearchResult = serde_json::from_str(
            r#"{"url": "https://jobs.example.com/1", "title": "Scientist", "siteName": "Example", "description": "Lab work"}"#,
        )
        .unwrap();

        let result = SearchResult::from_raw(raw).unwrap();

        assert_eq!(result.site_name, "Example");
        assert_eq!(result.description, "Lab work");
    }

    #[test]
    fn hits_without_url_or_title_are_dropped() {
        let no_url = RawSearchResult {
            title: Some("Scientist".to_string()),
            ..Default::default()
        };
        let empty_title = RawSearchResult {
            url: Some("https://jobs.example.com/1".to_string()),
            title: Some(String::new()),
            ..Default::default()
        };

        assert!(SearchResult::from_raw(no_url).is_none());
        assert!(SearchResult::from_raw(empty_title).is_none());
    }
}
