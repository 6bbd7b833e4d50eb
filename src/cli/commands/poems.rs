//! Poem listing and manifest health commands

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{print_formatted, status_line, OutputFormat};
use crate::client::ManifestClient;
use crate::config::Config;
use crate::loader::PoemsLoader;
use crate::views::{self, PoemsView, TagSummary};

#[derive(Serialize)]
struct PoemEntry {
    title: String,
    filename: String,
    tags: Vec<String>,
    url: Option<String>,
}

#[derive(Serialize)]
struct ListResult {
    tag: Option<String>,
    poems: Vec<PoemEntry>,
}

#[derive(Serialize)]
struct CheckResult {
    manifest_url: String,
    loaded: bool,
    poem_count: usize,
    tag_count: usize,
    last_updated: Option<String>,
    error: Option<String>,
}

/// Load the manifest once and wait for the outcome
async fn load(base_url: Option<String>) -> Result<(ManifestClient, PoemsView)> {
    let config = Config::load_or_default();
    let base_url = base_url.unwrap_or(config.source.base_url);

    let client = ManifestClient::new(&base_url)?;
    let loader = PoemsLoader::activate(client.clone(), config.source.keep_stale_on_error);
    loader.settled().await;

    Ok((client, loader.view()))
}

/// Fail the command if the load failed
fn require_loaded(view: &PoemsView) -> Result<()> {
    match &view.error {
        Some(error) => anyhow::bail!("{}", error),
        None => Ok(()),
    }
}

pub async fn list(base_url: Option<String>, tag: Option<String>, format: OutputFormat) -> Result<()> {
    let (client, view) = load(base_url).await?;
    require_loaded(&view)?;

    let poems = match tag.as_deref() {
        Some(tag) => views::filter_by_tag(&view.poems, tag),
        None => view.poems.iter().collect(),
    };

    let result = ListResult {
        tag,
        poems: poems
            .into_iter()
            .map(|p| PoemEntry {
                title: views::display_title(&p.filename).to_string(),
                filename: p.filename.clone(),
                tags: p.tags.clone(),
                url: client.poem_url(&p.filename).ok().map(|u| u.to_string()),
            })
            .collect(),
    };

    print_formatted(&result, format, format_list);
    Ok(())
}

pub async fn tags(base_url: Option<String>, format: OutputFormat) -> Result<()> {
    let (_, view) = load(base_url).await?;
    require_loaded(&view)?;

    print_formatted(&view.tags, format, |tags| format_tags(tags));
    Ok(())
}

pub async fn status(base_url: Option<String>, format: OutputFormat) -> Result<()> {
    let (_, view) = load(base_url).await?;

    // Status reports failures instead of exiting with them
    print_formatted(&view, format, format_status);
    Ok(())
}

pub async fn check(base_url: Option<String>, format: OutputFormat) -> Result<()> {
    let (client, view) = load(base_url).await?;

    let result = CheckResult {
        manifest_url: client
            .manifest_url()
            .map(|u| u.to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        loaded: view.error.is_none(),
        poem_count: view.poems.len(),
        tag_count: view.tags.len(),
        last_updated: view.last_updated.clone(),
        error: view.error.clone(),
    };

    print_formatted(&result, format, format_check);
    require_loaded(&view)
}

fn format_list(result: &ListResult) -> String {
    if result.poems.is_empty() {
        return match &result.tag {
            Some(tag) => format!("No poems tagged \"{}\"", tag),
            None => "No poems".to_string(),
        };
    }

    let width = result.poems.iter().map(|p| p.title.chars().count()).max().unwrap_or(0);
    result
        .poems
        .iter()
        .map(|p| {
            if p.tags.is_empty() {
                p.title.clone()
            } else {
                format!("{:<width$}  [{}]", p.title, p.tags.join(", "), width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_tags(tags: &[TagSummary]) -> String {
    if tags.is_empty() {
        return "No tags".to_string();
    }

    let width = tags.iter().map(|t| t.tag.chars().count()).max().unwrap_or(0);
    tags.iter()
        .map(|t| format!("{:<width$}  {}", t.tag, t.count, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_status(view: &PoemsView) -> String {
    let mut lines = vec![
        format!("Loading:      {}", view.loading),
        format!("Poems:        {}", view.poems.len()),
        format!(
            "Top tags:     {}",
            if view.tags.is_empty() {
                "<none>".to_string()
            } else {
                view.tags
                    .iter()
                    .map(|t| format!("{} ({})", t.tag, t.count))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        ),
    ];

    match &view.last_updated {
        Some(raw) => lines.push(format!("Last updated: {}", views::format_last_updated(raw))),
        None => lines.push("Last updated: <unknown>".to_string()),
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error:        {}", error));
    }

    lines.join("\n")
}

fn format_check(result: &CheckResult) -> String {
    let mut lines = vec![
        format!("Manifest: {}", result.manifest_url),
        status_line(result.loaded, "Manifest loaded and valid"),
    ];

    if result.loaded {
        lines.push(status_line(
            result.poem_count > 0,
            &format!("{} poems listed", result.poem_count),
        ));
        lines.push(status_line(
            result.tag_count > 0,
            &format!("{} top tags", result.tag_count),
        ));
        lines.push(status_line(
            result.last_updated.is_some(),
            &match &result.last_updated {
                Some(raw) => format!("Last updated {}", views::format_last_updated(raw)),
                None => "No lastUpdated field".to_string(),
            },
        ));
    }

    if let Some(error) = &result.error {
        lines.push(format!("Error: {}", error));
    }

    lines.join("\n")
}
