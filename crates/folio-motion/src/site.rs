//! Portfolio content, loaded from `site.toml`.

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::reveal::MAX_LEVEL;

/// The content file shipped with the site
pub const EMBEDDED: &str = include_str!("../site.toml");

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap()
});

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    /// Wordmark shown in the nav bar and footer
    pub brand: String,
    pub role: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub subtitle: String,
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub bio: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default = "placeholder_link")]
    pub github: String,
    #[serde(default = "placeholder_link")]
    pub live: String,
}

fn placeholder_link() -> String {
    "#".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub response_time: String,
    #[serde(default)]
    pub availability: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Turns on verbose console diagnostics in the browser
    #[serde(default)]
    pub debug: bool,
    pub owner: Owner,
    pub hero: Hero,
    pub about: About,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub contact: ContactInfo,
}

impl SiteConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse site file")
    }

    /// Load and parse a site file; does not validate
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse site file: {}", path.display()))
    }

    /// The content compiled into the crate
    pub fn embedded() -> Result<Self> {
        let site = Self::from_toml_str(EMBEDDED)?;
        site.validate()?;
        Ok(site)
    }

    pub fn validate(&self) -> Result<()> {
        if self.skills.is_empty() {
            bail!("Site has no skills");
        }
        for skill in &self.skills {
            if skill.level > MAX_LEVEL {
                bail!(
                    "Skill '{}' has level {} (maximum is {})",
                    skill.name,
                    skill.level,
                    MAX_LEVEL
                );
            }
        }

        if self.projects.is_empty() {
            bail!("Site has no projects");
        }
        let mut titles = HashSet::new();
        for project in &self.projects {
            if project.image.trim().is_empty() {
                bail!("Project '{}' has no image path", project.title);
            }
            if !titles.insert(project.title.as_str()) {
                bail!("Duplicate project title '{}'", project.title);
            }
        }

        if !EMAIL.is_match(&self.contact.email) {
            bail!("Contact email '{}' is not a valid address", self.contact.email);
        }

        if let Some(link) = self.socials.iter().find(|s| s.url.trim().is_empty()) {
            bail!("Social link '{}' has no URL", link.name);
        }

        Ok(())
    }

    pub fn skill_levels(&self) -> Vec<u8> {
        self.skills.iter().map(|s| s.level).collect()
    }

    /// Page `<title>`
    pub fn page_title(&self) -> String {
        format!("{} | {}", self.owner.name, self.owner.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_site() -> SiteConfig {
        SiteConfig::from_toml_str(EMBEDDED).unwrap()
    }

    #[test]
    fn test_embedded_site_is_valid() {
        let site = SiteConfig::embedded().unwrap();
        assert_eq!(site.projects.len(), 6);
        assert_eq!(site.skills.len(), 8);
        assert_eq!(site.skill_levels()[6], 87);
        assert_eq!(site.page_title(), "Kushal | Web Developer");
        assert!(!site.debug);
    }

    #[test]
    fn test_level_over_hundred_rejected() {
        let mut site = sample_site();
        site.skills[0].level = 101;
        let err = site.validate().unwrap_err();
        assert!(err.to_string().contains("HTML5"));
    }

    #[test]
    fn test_duplicate_titles_rejected() {
        let mut site = sample_site();
        site.projects[1].title = site.projects[0].title.clone();
        assert!(site.validate().unwrap_err().to_string().contains("Duplicate"));
    }

    #[test]
    fn test_missing_image_rejected() {
        let mut site = sample_site();
        site.projects[2].image = " ".into();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut site = sample_site();
        site.contact.email = "kushal at example".into();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_empty_lists_rejected() {
        let mut site = sample_site();
        site.skills.clear();
        assert!(site.validate().is_err());
        let mut site = sample_site();
        site.projects.clear();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_empty_social_url_rejected() {
        let mut site = sample_site();
        site.socials[0].url = String::new();
        assert!(site.validate().unwrap_err().to_string().contains("GitHub"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(EMBEDDED.as_bytes()).unwrap();
        let loaded = SiteConfig::load(file.path()).unwrap();
        assert_eq!(loaded, sample_site());
    }

    #[test]
    fn test_load_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"owner = 3").unwrap();
        let err = SiteConfig::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse site file"));
    }
}
