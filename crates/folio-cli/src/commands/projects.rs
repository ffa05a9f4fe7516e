//! Projects command - list the catalog featured-first, or show one project.

use crate::output::{self, Icon};
use anyhow::Result;
use clap::{Args, Subcommand};
use folio_cache::FileStore;
use folio_client::HttpCatalogClient;
use folio_config::FolioConfig;
use folio_core::{Project, ProjectType, filter_label, text};
use folio_feed::{FeedOptions, FeedView, LoadOutcome, ProjectFeed, ScrollLoader, Viewport};
use std::process::ExitCode;
use tracing::info;

/// Height of one rendered project card, in logical pixels.
const CARD_EXTENT: f64 = 320.0;
/// Height of the simulated window.
const WINDOW_EXTENT: f64 = 900.0;
const SUMMARY_WIDTH: usize = 160;

/// Classification filter; `all` maps to no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilter(pub Option<ProjectType>);

fn parse_type_filter(s: &str) -> Result<TypeFilter, String> {
    if s.trim().eq_ignore_ascii_case("all") {
        return Ok(TypeFilter(None));
    }
    s.parse::<ProjectType>().map(|t| TypeFilter(Some(t)))
}

/// Arguments for the projects command
#[derive(Args, Debug, Clone)]
pub struct ProjectsArgs {
    /// Classification filter: web, app, hybrid or all
    #[arg(long = "type", value_name = "TYPE", default_value = "all", value_parser = parse_type_filter)]
    pub project_type: TypeFilter,

    /// Pages to load by scrolling to the end of the list
    #[arg(long, default_value_t = 0)]
    pub pages: u32,

    /// Ignore the session cache and reload from the catalog
    #[arg(long)]
    pub fresh: bool,

    /// Projects shown before scrolling (negative values count as 0)
    #[arg(long, allow_negative_numbers = true)]
    pub initial_count: Option<i64>,

    /// Page size of scroll-triggered loads
    #[arg(long)]
    pub page_limit: Option<u32>,

    #[command(subcommand)]
    pub action: Option<ProjectsAction>,
}

/// Project subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectsAction {
    /// Show every detail of one project
    Show {
        /// Project identifier or slug
        #[arg(value_name = "ID|SLUG")]
        project: String,
    },
}

type Feed = ProjectFeed<HttpCatalogClient, FileStore>;

fn open_feed(config: &FolioConfig) -> Result<Feed> {
    Ok(ProjectFeed::new(
        HttpCatalogClient::new(config)?,
        FileStore::new(config.session_path()),
        FeedOptions::from_config(config),
    ))
}

/// Run the projects command
pub async fn run(args: &ProjectsArgs, config: &FolioConfig) -> Result<ExitCode> {
    if let Some(ProjectsAction::Show { project }) = &args.action {
        return show(project, config).await;
    }

    let filter = args.project_type.0;
    let feed = open_feed(config)?;

    let restored = !args.fresh && feed.restore() && feed.filter() == filter;
    if restored {
        info!(filter = filter_label(filter), "using cached project list");
    } else {
        feed.set_filter(filter).await;
    }

    let loader = ScrollLoader::from_config(config);
    for _ in 0..args.pages {
        let viewport = end_of_list(feed.projects().len());
        match loader.on_scroll(&feed, viewport).await {
            None => break,
            Some(LoadOutcome::Failed) => {
                output::warning("Failed to load more projects");
                break;
            }
            Some(_) => {}
        }
    }

    if render(&feed.view(), filter, restored) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Viewport scrolled to the bottom of `count` stacked cards.
fn end_of_list(count: usize) -> Viewport {
    let sentinel = count as f64 * CARD_EXTENT;
    Viewport::new((sentinel - WINDOW_EXTENT).max(0.0), WINDOW_EXTENT, sentinel)
}

/// Print the list; returns `false` when the load failed.
fn render(view: &FeedView, filter: Option<ProjectType>, restored: bool) -> bool {
    match view {
        FeedView::Loading => {
            output::info("Loading projects...");
            true
        }
        FeedView::Failed => {
            output::error("Failed to load projects");
            false
        }
        FeedView::Empty => {
            output::info("No projects found");
            true
        }
        FeedView::Ready {
            projects,
            featured_count,
            has_next_page,
            ..
        } => {
            output::header(&format!("Projects ({})", filter_label(filter)));
            for (index, project) in projects.iter().enumerate() {
                print_project(project, index < *featured_count);
            }

            let mut summary = format!(
                "{} projects, {} featured",
                projects.len(),
                featured_count
            );
            if *has_next_page {
                summary.push_str(", more available (--pages)");
            }
            if restored {
                summary.push_str(", from session cache");
            }
            println!("{}", output::dim(&summary));
            true
        }
    }
}

fn print_project(project: &Project, featured: bool) {
    let marker = if featured {
        output::accent(&Icon::Star.to_string())
    } else {
        Icon::Bullet.to_string()
    };
    println!(
        "{marker} {} {}",
        output::bold(&project.title),
        output::dim(project.project_type.label())
    );

    let summary = text::truncate(&project.summary(), SUMMARY_WIDTH);
    if !summary.is_empty() {
        println!("  {summary}");
    }

    let labels: Vec<&str> = project
        .tags
        .iter()
        .take(3)
        .chain(project.stacks.iter().take(4))
        .map(|l| l.label.as_str())
        .collect();
    if !labels.is_empty() {
        println!("  {}", output::dim(&labels.join(" · ")));
    }
    if let Some(link) = &project.link {
        println!("  {}", output::dim(link));
    }
}

/// Show one project, looked up in the session list before the catalog.
async fn show(key: &str, config: &FolioConfig) -> Result<ExitCode> {
    let feed = open_feed(config)?;
    feed.restore();

    match feed.find(key).await? {
        Some(project) => {
            print_detail(&project);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            output::error(&format!("Project '{key}' not found"));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Labelled rows of the detail view, in display order.
fn detail_rows(project: &Project) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Type", project.project_type.description().to_string())];
    if let Some(partner) = &project.partner {
        rows.push(("Partner", partner.clone()));
    }
    rows.push((
        "Cover",
        project.cover.clone().unwrap_or_else(|| {
            let initial = project.title.chars().next().unwrap_or('?');
            format!("none, shown as [{}]", initial.to_uppercase())
        }),
    ));
    if !project.tags.is_empty() {
        rows.push(("Tags", join_labels(&project.tags)));
    }
    if !project.stacks.is_empty() {
        rows.push(("Tech Stack", join_labels(&project.stacks)));
    }
    for (index, image) in project.gallery.iter().enumerate() {
        rows.push((if index == 0 { "Gallery" } else { "" }, image.clone()));
    }
    if let Some(link) = &project.link {
        rows.push(("Link", link.clone()));
    }
    rows
}

fn join_labels(labels: &[folio_core::Label]) -> String {
    labels
        .iter()
        .map(|l| l.label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_detail(project: &Project) {
    output::header(&project.title);
    if project.is_featured {
        println!("{} {}", output::accent(&Icon::Star.to_string()), output::accent("Featured"));
    }

    for paragraph in text::paragraphs(&project.description) {
        println!("{paragraph}");
        println!();
    }

    for (label, value) in detail_rows(project) {
        println!("  {} {value}", output::dim(&format!("{label:<12}")));
    }
}
