//! Project catalog types.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Stable project identifier assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Create new project ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Project classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectType {
    /// Website or web application.
    Web,
    /// Native or mobile application.
    App,
    /// Both web and app deliverables.
    Hybrid,
}

impl ProjectType {
    /// All classifications in filter-bar order.
    pub const ALL: [Self; 3] = [Self::Web, Self::App, Self::Hybrid];

    /// Wire value used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::App => "APP",
            Self::Hybrid => "HYBRID",
        }
    }

    /// Human label for filter controls.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::App => "App",
            Self::Hybrid => "Hybrid",
        }
    }

    /// Longer label used on detail pages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Web => "Web Application",
            Self::App => "Mobile App",
            Self::Hybrid => "Hybrid App",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEB" => Ok(Self::Web),
            "APP" => Ok(Self::App),
            "HYBRID" => Ok(Self::Hybrid),
            other => Err(format!("unknown project type '{other}'")),
        }
    }
}

/// Label for an optional classification filter; `None` means every type.
#[must_use]
pub fn filter_label(filter: Option<ProjectType>) -> &'static str {
    filter.map_or("All", ProjectType::label)
}

/// Tag or technology-stack reference attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// URL-safe slug.
    pub slug: String,
}

/// Tag associated with a project.
pub type Tag = Label;

/// Technology stack used in a project.
pub type Stack = Label;

/// Catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique, stable identifier.
    pub id: ProjectId,
    /// Title.
    pub title: String,
    /// URL-safe slug.
    #[serde(default)]
    pub slug: String,
    /// Rich-text (HTML) description.
    #[serde(default)]
    pub description: String,
    /// Classification.
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Technology stack.
    #[serde(default)]
    pub stacks: Vec<Stack>,
    /// Priority placement flag.
    #[serde(default)]
    pub is_featured: bool,
    /// Visibility flag.
    #[serde(default)]
    pub is_visible: bool,
    /// External link.
    #[serde(default)]
    pub link: Option<String>,
    /// Partner name.
    #[serde(default)]
    pub partner: Option<String>,
    /// Cover image reference.
    #[serde(default)]
    pub cover: Option<String>,
    /// Gallery image references, in display order.
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Project {
    /// Create minimal visible project.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>, project_type: ProjectType) -> Self {
        let title = title.into();
        Self {
            id: ProjectId::new(id),
            slug: title.to_lowercase().replace(' ', "-"),
            title,
            description: String::new(),
            project_type,
            tags: Vec::new(),
            stacks: Vec::new(),
            is_featured: false,
            is_visible: true,
            link: None,
            partner: None,
            cover: None,
            gallery: Vec::new(),
        }
    }

    /// Set the featured flag.
    #[must_use]
    pub const fn featured(mut self, featured: bool) -> Self {
        self.is_featured = featured;
        self
    }

    /// Plain-text rendering of the description.
    #[must_use]
    pub fn summary(&self) -> String {
        crate::text::strip_html(&self.description)
    }

    /// Whether `key` names this project, by identifier or by slug.
    ///
    /// Slugs compare case-insensitively.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        !key.is_empty() && (self.id.as_str() == key || self.slug.eq_ignore_ascii_case(key))
    }
}

/// Append `incoming` to `list`, skipping identifiers already present.
///
/// The first occurrence of an identifier wins, including duplicates inside
/// `incoming` itself. Returns the number of items appended.
pub fn append_unique(
    list: &mut Vec<Project>,
    incoming: impl IntoIterator<Item = Project>,
) -> usize {
    let mut seen: HashSet<ProjectId> = list.iter().map(|p| p.id.clone()).collect();
    let before = list.len();
    for project in incoming {
        if seen.insert(project.id.clone()) {
            list.push(project);
        }
    }
    list.len() - before
}

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in server order.
    pub data: Vec<T>,
    /// 1-based page number the server answered with.
    pub page: u32,
    /// Page size the server applied.
    pub limit: u32,
    /// Number of items matching the query, independent of pagination.
    pub total: u64,
}

impl<T> Page<T> {
    /// Whether the page carries no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuery {
    /// Only visible (or hidden) projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    /// Only featured (or non-featured) projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Classification filter.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ProjectQuery {
    /// Visible projects with the given featured flag and classification.
    #[must_use]
    pub const fn visible(featured: bool, project_type: Option<ProjectType>) -> Self {
        Self {
            is_visible: Some(true),
            is_featured: Some(featured),
            project_type,
            page: None,
            limit: None,
        }
    }

    /// Set page and limit. Both are clamped to at least 1.
    #[must_use]
    pub fn paged(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page.max(1));
        self.limit = Some(limit.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_project_type() {
        assert_eq!("web".parse::<ProjectType>(), Ok(ProjectType::Web));
        assert_eq!(" Hybrid ".parse::<ProjectType>(), Ok(ProjectType::Hybrid));
        assert!("desktop".parse::<ProjectType>().is_err());
    }

    #[test]
    fn filter_labels() {
        assert_eq!(filter_label(None), "All");
        assert_eq!(filter_label(Some(ProjectType::App)), "App");
    }

    #[test]
    fn query_paging_clamps_to_one() {
        let query = ProjectQuery::visible(false, Some(ProjectType::Web)).paged(0, 0);
        assert_eq!(query.page, Some(1));
        assert_eq!(query.limit, Some(1));
        assert_eq!(query.is_visible, Some(true));
        assert_eq!(query.is_featured, Some(false));
    }

    #[test]
    fn append_unique_keeps_first_occurrence() {
        let mut list = vec![
            Project::new("a", "A", ProjectType::Web),
            Project::new("b", "B", ProjectType::Web),
        ];
        let mut replacement = Project::new("a", "A v2", ProjectType::App);
        replacement.description = "newer".into();

        let added = append_unique(
            &mut list,
            vec![
                replacement,
                Project::new("c", "C", ProjectType::Web),
                Project::new("c", "C again", ProjectType::Web),
            ],
        );

        assert_eq!(added, 1);
        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert_eq!(list[0].title, "A");
        assert_eq!(list[2].title, "C");
    }

    #[test]
    fn matches_by_id_or_slug() {
        let project = Project::new("p-17", "Landing Page", ProjectType::Web);
        assert!(project.matches("p-17"));
        assert!(project.matches("Landing-Page"));
        assert!(!project.matches("p-1"));
        assert!(!project.matches("  "));
        assert_eq!(ProjectType::App.description(), "Mobile App");
    }

    #[test]
    fn project_summary_strips_markup() {
        let mut project = Project::new("p1", "Landing Page", ProjectType::Web);
        project.description = "<p>Built with <b>Rust</b></p>".into();
        assert_eq!(project.summary(), "Built with Rust");
        assert_eq!(project.slug, "landing-page");
    }
}
