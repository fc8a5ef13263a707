//! Caller-supplied context for a gate invocation.
//!
//! TaskContext describes the page being planned, UserContext the business
//! behind it. Both are read-only for the duration of a call.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Role the page plays on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    /// Commercial landing page (service, booking)
    Money,

    /// About / reviews / credentials page
    Trust,

    /// FAQ and help content
    Support,

    /// Long-form topical content
    Authority,
}

impl fmt::Display for PageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRole::Money => write!(f, "money"),
            PageRole::Trust => write!(f, "trust"),
            PageRole::Support => write!(f, "support"),
            PageRole::Authority => write!(f, "authority"),
        }
    }
}

impl FromStr for PageRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "money" => Ok(PageRole::Money),
            "trust" => Ok(PageRole::Trust),
            "support" => Ok(PageRole::Support),
            "authority" => Ok(PageRole::Authority),
            _ => anyhow::bail!("Unknown page role: {}", s),
        }
    }
}

/// Declared search intent of the target query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchIntent {
    Buy,
    Compare,
    Learn,
    Trust,
}

impl fmt::Display for SearchIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchIntent::Buy => write!(f, "buy"),
            SearchIntent::Compare => write!(f, "compare"),
            SearchIntent::Learn => write!(f, "learn"),
            SearchIntent::Trust => write!(f, "trust"),
        }
    }
}

impl FromStr for SearchIntent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "buy" | "transactional" => Ok(SearchIntent::Buy),
            "compare" | "commercial" => Ok(SearchIntent::Compare),
            "learn" | "informational" => Ok(SearchIntent::Learn),
            "trust" => Ok(SearchIntent::Trust),
            _ => anyhow::bail!("Unknown search intent: {}", s),
        }
    }
}

/// Per-evaluation task description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskContext {
    /// Declared page role
    pub role: PageRole,

    /// Declared search intent
    pub intent: SearchIntent,

    /// Primary service or topic, e.g. "wedding photography"
    pub primary_service: String,

    /// Target location, if the page is geo-targeted
    #[serde(default)]
    pub location: Option<String>,
}

impl TaskContext {
    /// Create a task context without a location
    pub fn new(role: PageRole, intent: SearchIntent, primary_service: impl Into<String>) -> Self {
        Self {
            role,
            intent,
            primary_service: primary_service.into(),
            location: None,
        }
    }

    /// Attach a location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Location with blank strings treated as absent
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn is_money_page(&self) -> bool {
        self.role == PageRole::Money
    }
}

/// A short review excerpt and what it is about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSnippet {
    pub theme: String,
    pub text: String,
}

/// Quantifiable experience of the business
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceFacts {
    /// Years in business
    #[serde(default)]
    pub years: Option<u32>,

    /// Number of completed jobs/clients
    #[serde(default)]
    pub volume: Option<u32>,

    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Business facts available for credibility injection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    #[serde(default)]
    pub brand_voice: Vec<String>,

    #[serde(default)]
    pub unique_selling_points: Vec<String>,

    #[serde(default)]
    pub reviews: Vec<ReviewSnippet>,

    #[serde(default)]
    pub experience: ExperienceFacts,

    /// Accreditations, memberships, qualifications
    #[serde(default)]
    pub credentials: Vec<String>,

    /// Generic local-signal phrases ("family-run since 2009", ...)
    #[serde(default)]
    pub local_signals: Vec<String>,
}

/// Strength tag computed by an external image analysis step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStrength {
    #[default]
    None,
    Weak,
    Moderate,
    Strong,
}

/// Summary of image evidence attached to the page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisionContext {
    #[serde(default)]
    pub hero_image: bool,

    #[serde(default)]
    pub inline_images: bool,

    #[serde(default)]
    pub evidence_strength: EvidenceStrength,
}

impl VisionContext {
    pub fn has_images(&self) -> bool {
        self.hero_image || self.inline_images
    }
}

/// A directed internal link between two site paths
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InternalLink {
    pub from: String,
    pub to: String,
}

/// Site-level context.
///
/// Accepted for forward compatibility; no check reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContext {
    #[serde(default)]
    pub sitemap: Vec<String>,

    #[serde(default)]
    pub existing_pages: Vec<String>,

    #[serde(default)]
    pub internal_links: Vec<InternalLink>,

    #[serde(default)]
    pub competitors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_and_intent_from_str() {
        assert_eq!("money".parse::<PageRole>().unwrap(), PageRole::Money);
        assert_eq!("Authority".parse::<PageRole>().unwrap(), PageRole::Authority);
        assert!("landing".parse::<PageRole>().is_err());

        assert_eq!("buy".parse::<SearchIntent>().unwrap(), SearchIntent::Buy);
        assert_eq!(
            "informational".parse::<SearchIntent>().unwrap(),
            SearchIntent::Learn
        );
        assert!("browse".parse::<SearchIntent>().is_err());
    }

    #[test]
    fn test_blank_location_is_absent() {
        let task = TaskContext::new(PageRole::Money, SearchIntent::Buy, "roofing").with_location("  ");
        assert_eq!(task.location(), None);

        let task = task.with_location("Leeds");
        assert_eq!(task.location(), Some("Leeds"));
    }

    #[test]
    fn test_user_context_defaults_from_yaml() {
        let user: UserContext = serde_yaml::from_str("credentials: [\"RIBA chartered\"]").unwrap();
        assert_eq!(user.credentials, vec!["RIBA chartered".to_string()]);
        assert!(user.reviews.is_empty());
        assert_eq!(user.experience.years, None);
    }
}
