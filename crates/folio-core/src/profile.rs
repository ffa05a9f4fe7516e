//! Profile record served by the `user/me` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social media platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SocialPlatform {
    /// GitHub.
    Github,
    /// LinkedIn.
    Linkedin,
    /// LINE.
    Line,
    /// Telegram.
    Telegram,
    /// WeChat.
    Wechat,
}

impl std::fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Github => "GitHub",
            Self::Linkedin => "LinkedIn",
            Self::Line => "LINE",
            Self::Telegram => "Telegram",
            Self::Wechat => "WeChat",
        };
        f.write_str(name)
    }
}

/// Social media link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    /// Platform.
    pub platform: SocialPlatform,
    /// Profile URL.
    pub url: String,
}

/// Position held within a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Identifier.
    pub id: String,
    /// Owning experience.
    pub experience_id: String,
    /// Job title.
    pub title: String,
    /// Start, unix seconds.
    pub start_at: i64,
    /// End, unix seconds.
    #[serde(default)]
    pub end_at: Option<i64>,
    /// Still held.
    #[serde(default)]
    pub is_current: bool,
    /// Rich-text description.
    #[serde(default)]
    pub description: String,
    /// Sort number.
    #[serde(default)]
    pub sn: i32,
}

impl Position {
    /// Date range such as `Jan 2021 - Mar 2023` or `Jan 2021 - Present`.
    #[must_use]
    pub fn date_range(&self) -> String {
        let start = month_year(self.start_at);
        match self.end_at {
            Some(end) if !self.is_current => format!("{start} - {}", month_year(end)),
            _ => format!("{start} - Present"),
        }
    }
}

fn month_year(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Work experience at one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    /// Identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Company name.
    pub company: String,
    /// Company icon reference.
    #[serde(default)]
    pub company_icon: Option<String>,
    /// Sort number.
    #[serde(default)]
    pub sn: i32,
    /// Positions, in display order.
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl Experience {
    /// Placeholder glyph shown when the company has no icon.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.company.chars().next()
    }
}

/// User profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Headline.
    pub title: String,
    /// Rich-text biography.
    #[serde(default)]
    pub bio: String,
    /// Avatar image reference.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Social links.
    #[serde(default)]
    pub socials: Vec<Social>,
    /// Work history.
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(end_at: Option<i64>, is_current: bool) -> Position {
        Position {
            id: "pos".into(),
            experience_id: "exp".into(),
            title: "Engineer".into(),
            // 2021-01-15
            start_at: 1_610_668_800,
            end_at,
            is_current,
            description: String::new(),
            sn: 1,
        }
    }

    #[test]
    fn closed_range() {
        // 2023-03-10
        let pos = position(Some(1_678_406_400), false);
        assert_eq!(pos.date_range(), "Jan 2021 - Mar 2023");
    }

    #[test]
    fn open_range_is_present() {
        assert_eq!(position(None, false).date_range(), "Jan 2021 - Present");
        assert_eq!(
            position(Some(1_678_406_400), true).date_range(),
            "Jan 2021 - Present"
        );
    }

    #[test]
    fn parse_profile() {
        let json = r#"{
            "id": "u1",
            "email": "me@example.com",
            "name": "Ada",
            "title": "Frontend Engineer",
            "bio": "<p>Hello</p>",
            "avatar": null,
            "socials": [{"platform": "GITHUB", "url": "https://github.com/ada"}],
            "experiences": [{
                "id": "e1",
                "userId": "u1",
                "company": "Acme",
                "companyIcon": null,
                "sn": 1,
                "positions": []
            }]
        }"#;
        let user: User = crate::from_json(json).unwrap();
        assert_eq!(user.socials[0].platform, SocialPlatform::Github);
        assert_eq!(user.experiences[0].initial(), Some('A'));
    }
}
