//! Profile command - show the portfolio owner's profile.
//!
//! A fetched profile is saved in the session store and reused by later runs
//! until `profile_ttl` elapses.

use crate::output::{self, Icon};
use anyhow::Result;
use folio_cache::{FileStore, ProfileCache};
use folio_client::{HttpCatalogClient, ProfileService};
use folio_config::FolioConfig;
use folio_core::{Experience, User, text};
use std::process::ExitCode;
use tracing::warn;

/// Run the profile command
pub async fn run(config: &FolioConfig) -> Result<ExitCode> {
    let saved = ProfileCache::new(FileStore::new(config.session_path()), config.profile_ttl);
    if let Some(user) = saved.fresh() {
        print_user(&user);
        return Ok(ExitCode::SUCCESS);
    }

    let service = ProfileService::new(HttpCatalogClient::new(config)?, config.profile_ttl);
    let Some(user) = service.profile().await else {
        output::error("Failed to load profile");
        return Ok(ExitCode::FAILURE);
    };
    if let Err(e) = saved.save(&user) {
        warn!(error = %e, "failed to save profile");
    }

    print_user(&user);
    Ok(ExitCode::SUCCESS)
}

fn print_user(user: &User) {
    output::header(&user.name);
    println!("{}", output::bold(&user.title));

    let bio = text::strip_html(&user.bio);
    if !bio.is_empty() {
        println!("\n{bio}");
    }

    if !user.socials.is_empty() {
        println!();
        for social in &user.socials {
            println!("{} {}: {}", Icon::Bullet, social.platform, social.url);
        }
    }

    if !user.experiences.is_empty() {
        output::header("Experience");
        for experience in &user.experiences {
            print_experience(experience);
        }
    }
}

fn print_experience(experience: &Experience) {
    match (&experience.company_icon, experience.initial()) {
        (None, Some(initial)) => println!(
            "{} {}",
            output::dim(&format!("[{initial}]")),
            output::bold(&experience.company)
        ),
        _ => println!("{}", output::bold(&experience.company)),
    }

    for position in &experience.positions {
        println!(
            "  {} {}  {}",
            Icon::Bullet,
            position.title,
            output::dim(&position.date_range())
        );
        let description = text::strip_html(&position.description);
        if !description.is_empty() {
            println!("    {description}");
        }
    }
}
