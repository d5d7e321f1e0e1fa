use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, de};

/// File name appended to a document path to form its card's output path.
pub const THUMBNAIL_FILE_NAME: &str = "thumbnail.png";

/// A document as supplied by the host site generator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub draft: bool,
    /// Output path of the rendered page, e.g. `2024/01/15/hello-world/`.
    pub path: String,
}

impl Document {
    /// Builds the render request for this document.
    pub fn to_request(&self) -> RenderRequest {
        RenderRequest {
            title: self.title.clone(),
            date: self.date,
            output_path: format!("{}{}", self.path, THUMBNAIL_FILE_NAME),
        }
    }
}

/// Everything the compositor needs to draw one card.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub title: String,
    pub date: NaiveDateTime,
    pub output_path: String,
}

/// An encoded card together with the path it should be written to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub path: String,
    #[serde(skip)]
    pub data: Vec<u8>,
}

/// Parses the loosely-formatted timestamps site generators emit.
///
/// Accepts RFC 3339 (offset is dropped, local wall time kept),
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD`.
pub fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_variants() {
        let dt = parse_timestamp("2024-01-15T10:30:00+09:00").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 1, 15, 10));

        let dt = parse_timestamp("2024-01-15 08:00:00").unwrap();
        assert_eq!(dt.hour(), 8);

        let dt = parse_timestamp("2024-01-15").unwrap();
        assert_eq!((dt.day(), dt.hour()), (15, 0));

        assert!(parse_timestamp("January 15").is_none());
    }

    #[test]
    fn test_request_appends_thumbnail_name() {
        let doc: Document = serde_json::from_str(
            r#"{"title": "Hello", "date": "2024-01-15", "path": "2024/01/15/hello/"}"#,
        )
        .unwrap();
        assert!(!doc.draft);
        let req = doc.to_request();
        assert_eq!(req.output_path, "2024/01/15/hello/thumbnail.png");
        assert_eq!(req.title, "Hello");
    }

    #[test]
    fn test_invalid_date_rejected() {
        let res: Result<Document, _> =
            serde_json::from_str(r#"{"title": "x", "date": "soon", "path": "x/"}"#);
        assert!(res.is_err());
    }
}
