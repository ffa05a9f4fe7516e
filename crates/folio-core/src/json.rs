//! sonic-rs helpers mapping failures into [`Error::Json`](crate::Error::Json).

use crate::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};

/// Parse a JSON document.
///
/// # Errors
/// Returns `Error::Json` if the text is not valid JSON for `T`.
pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    sonic_rs::from_str(text).map_err(Error::from)
}

/// Render `value` as compact JSON, the form stored in session blobs.
///
/// # Errors
/// Returns `Error::Json` if `value` cannot be represented as JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    sonic_rs::to_string(value).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Project, ProjectType};

    #[test]
    fn project_uses_wire_field_names() {
        let json = r#"{
            "id": "p1",
            "title": "Site",
            "slug": "site",
            "description": "<p>Hi</p>",
            "type": "HYBRID",
            "tags": [{"id": "t1", "label": "React", "slug": "react"}],
            "stacks": [],
            "isFeatured": true,
            "isVisible": true,
            "link": null,
            "partner": "Acme",
            "cover": null,
            "gallery": ["a.png", "b.png"]
        }"#;
        let project: Project = from_json(json).unwrap();
        assert_eq!(project.project_type, ProjectType::Hybrid);
        assert!(project.is_featured);
        assert_eq!(project.partner.as_deref(), Some("Acme"));
        assert_eq!(project.gallery.len(), 2);

        let out = to_json(&project).unwrap();
        assert!(out.contains("\"isFeatured\":true"));
        assert!(out.contains("\"type\":\"HYBRID\""));
    }

    #[test]
    fn unknown_classification_is_rejected() {
        assert_eq!(to_json(&ProjectType::Web).unwrap(), "\"WEB\"");
        let err = from_json::<ProjectType>("\"DESKTOP\"").unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }
}
