//! CLI command implementations.

use anyhow::{Context, Result, bail};
use plan_review_config::{AuthorConfig, Config};
use plan_review_engine::{
    Annotation, AnnotationStore, AuthorIdentity, DomSurface, FileStore, SharedReview,
    export_feedback, parse, plan_title,
    parsing::rope::preview,
    render::{render_blocks, to_html},
    share::{create_shareable_plan, share_link},
};
use std::path::Path;

fn read_plan(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading plan {}", path.display()))
}

fn read_annotations(path: Option<&Path>) -> Result<Vec<Annotation>> {
    let Some(path) = path else {
        return Ok(vec![]);
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading annotations {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing annotations {}", path.display()))
}

fn identity(config: &Config) -> Option<AuthorIdentity> {
    let author = config.author.as_ref()?;
    Some(match &author.color {
        Some(color) => AuthorIdentity {
            name: author.name.clone(),
            color: color.clone(),
        },
        None => AuthorIdentity::new(author.name.clone()),
    })
}

fn print_link(url: &str, size_safe: bool) {
    println!("{url}");
    if !size_safe {
        eprintln!("warning: this link is long and may not open in every browser");
    }
}

pub fn blocks(plan: &Path, json: bool) -> Result<()> {
    let blocks = parse(&read_plan(plan)?);
    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }
    for block in &blocks {
        let kind = serde_json::to_value(block.kind)?;
        println!(
            "{:<10} {:<10} line {:<4} {}",
            block.id,
            kind.as_str().unwrap_or_default(),
            block.start_line,
            preview(&block.content, 60)
        );
    }
    Ok(())
}

pub fn feedback(plan: &Path, annotations: Option<&Path>) -> Result<()> {
    let blocks = parse(&read_plan(plan)?);
    let annotations = read_annotations(annotations)?;
    print!("{}", export_feedback(&blocks, &annotations));
    Ok(())
}

pub fn share(
    config: &Config,
    plan: &Path,
    annotations: Option<&Path>,
    title: Option<&str>,
) -> Result<()> {
    let content = read_plan(plan)?;
    let annotations = read_annotations(annotations)?;
    let title = title.map_or_else(|| plan_title(&content), str::to_string);
    let author = identity(config);

    let shareable = create_shareable_plan(
        &content,
        &title,
        &annotations,
        author.as_ref().map(|a| a.name.as_str()),
        author.as_ref().map(|a| a.color.as_str()),
    );
    let link = share_link(&config.share_base_url, &shareable)?;
    log::info!("shared {title:?} with {} annotations", shareable.annotations.len());
    print_link(&link.url, link.size_safe);
    Ok(())
}

pub fn open(link: &str, json: bool) -> Result<()> {
    let review = SharedReview::open(link)?;
    let plan = review.plan();
    if json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }

    println!("{} (version {})", plan.title, plan.version);
    if let Some(by) = &plan.shared_by {
        println!("shared by {by}");
    }
    println!();
    let annotations: Vec<Annotation> = plan
        .annotations
        .iter()
        .map(|a| a.annotation.clone())
        .collect();
    print!("{}", export_feedback(review.blocks(), &annotations));
    Ok(())
}

pub fn reshare(config: &Config, link: &str, annotations: &Path) -> Result<()> {
    let mut review = SharedReview::open(link)?;
    if let Some(identity) = identity(config) {
        review.set_identity(identity);
    }
    for annotation in read_annotations(Some(annotations))? {
        if review.is_read_only(&annotation.id) {
            log::debug!("{} is already part of the shared plan", annotation.id);
            continue;
        }
        review.add_local(annotation);
    }

    let next = review
        .reshare()
        .context("set [author] name in the config file to share annotations")?;
    let link = share_link(&config.share_base_url, &next)?;
    log::info!("version {} with {} annotations", next.version, next.annotations.len());
    print_link(&link.url, link.size_safe);
    Ok(())
}

pub fn render(plan: &Path, annotations: Option<&Path>) -> Result<()> {
    let blocks = parse(&read_plan(plan)?);
    let annotations = read_annotations(annotations)?;
    let mut surface = DomSurface::new(render_blocks(&blocks));

    let report = plan_review_engine::anchoring::restore_highlights(&mut surface, &annotations);
    for id in report.unanchored() {
        eprintln!("warning: annotation {id} no longer matches the plan");
    }
    println!("{}", to_html(surface.dom()));
    Ok(())
}

pub fn save_annotations(config: &Config, plan_id: &str, file: &Path) -> Result<()> {
    let annotations = read_annotations(Some(file))?;
    if annotations.iter().any(|a| a.id.is_empty()) {
        bail!("every annotation needs an id");
    }
    let store = FileStore::new(&config.store_path);
    store.save(plan_id, &annotations)?;
    log::info!("stored {} annotations for {plan_id}", annotations.len());
    Ok(())
}

pub fn load_annotations(config: &Config, plan_id: &str) -> Result<()> {
    let store = FileStore::new(&config.store_path);
    let annotations = store.load(plan_id)?;
    println!("{}", serde_json::to_string_pretty(&annotations)?);
    Ok(())
}

/// Writes the author to the config file, keeping its other settings.
///
/// Environment overrides are not persisted.
pub fn set_author(config_path: Option<&Path>, name: &str, color: Option<&str>) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("author name must not be empty");
    }
    if let Some(color) = color
        && !is_hex_color(color)
    {
        bail!("colour must be a hex code like #3B82F6, got {color:?}");
    }

    let existing = match config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let mut config = existing.unwrap_or_default();
    config.author = Some(AuthorConfig {
        name: name.to_string(),
        color: color.map(str::to_string),
    });

    match config_path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    log::info!("author set to {name}");
    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
