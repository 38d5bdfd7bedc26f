use anyhow::{Context, Result};
use colored::Colorize;
use folio_motion::SiteConfig;
use folio_motion::sections::reveal_schedule;
use std::path::PathBuf;

use crate::config::Config;
use crate::diag::log_verbose;
use crate::sanitize::one_line;

const DEFAULT_SITE: &str = "site.toml";

/// Pick the site file: explicit path > configured `site` > ./site.toml
fn resolve_site_path(cli_path: Option<PathBuf>, configured: Option<&str>) -> PathBuf {
    cli_path
        .or_else(|| configured.filter(|p| !p.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE))
}

/// Human-readable summary of a valid site
fn summarize(site: &SiteConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Owner:    {} ({})", one_line(&site.owner.name), one_line(&site.owner.role)),
        format!("Title:    {}", one_line(&site.page_title())),
        format!("Skills:   {}", site.skills.len()),
    ];
    for skill in &site.skills {
        lines.push(format!("  {:<16} {:>3}%", one_line(&skill.name), skill.level));
    }
    lines.push(format!("Projects: {}", site.projects.len()));
    for project in &site.projects {
        lines.push(format!(
            "  {:<24} {}",
            one_line(&project.title),
            one_line(&project.tech.join(", "))
        ));
    }
    lines.push(format!("Socials:  {}", site.socials.len()));
    lines.push(format!("Contact:  {}", one_line(&site.contact.email)));
    lines.push(format!(
        "Reveals:  {} scroll rules",
        reveal_schedule(&site.skill_levels()).len()
    ));
    lines
}

pub fn run(cli_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let path = resolve_site_path(cli_path, config.get_site());
    log_verbose(&format!("Checking site file {}", path.display()));

    let site = SiteConfig::load(&path)?;
    site.validate()
        .with_context(|| format!("{} is not a valid site file", path.display()))?;

    println!("{}", format!("✓ {} is valid", path.display()).green().bold());
    for line in summarize(&site) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_motion::site::EMBEDDED;

    #[test]
    fn test_resolve_site_path_precedence() {
        // CLI > config > default
        assert_eq!(
            resolve_site_path(Some(PathBuf::from("cli.toml")), Some("config.toml")),
            PathBuf::from("cli.toml")
        );
        assert_eq!(
            resolve_site_path(None, Some("config.toml")),
            PathBuf::from("config.toml")
        );
        assert_eq!(resolve_site_path(None, None), PathBuf::from("site.toml"));

        // Empty configured path should be ignored
        assert_eq!(resolve_site_path(None, Some("")), PathBuf::from("site.toml"));
    }

    #[test]
    fn test_summarize_embedded_site() {
        let site = SiteConfig::from_toml_str(EMBEDDED).unwrap();
        let lines = summarize(&site);

        assert!(lines.iter().any(|l| l.starts_with("Owner:") && l.contains("Kushal")));
        assert!(lines.iter().any(|l| l == "Projects: 6"));
        assert!(lines.iter().any(|l| l.contains("TypeScript") && l.contains("87%")));
        assert!(lines.iter().any(|l| l == "Reveals:  10 scroll rules"));
    }
}
