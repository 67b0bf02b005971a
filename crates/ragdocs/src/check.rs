use camino::Utf8Path;
use colored::Colorize;
use ragdocs_web::Site;
use ragdocs_web::model::EntryCollection;

use crate::load_site;

/// Content problems that do not stop the site from building.
pub fn site_warnings(site: &Site) -> Vec<String> {
    let collection = &site.collection;
    let mut warnings = Vec::new();

    for entry in collection.undeclared() {
        warnings.push(format!(
            "entry `{}` uses undeclared category `{}`; it only shows under `all`",
            entry.id, entry.category
        ));
    }
    for entry in collection.entries() {
        if entry.implementation_ref.trim().is_empty() {
            warnings.push(format!("entry `{}` has no implementation reference", entry.id));
        }
        if entry.description.trim().is_empty() {
            warnings.push(format!("entry `{}` has no description", entry.id));
        }
    }
    for category in empty_categories(collection) {
        warnings.push(format!("category `{category}` has no entries"));
    }
    warnings
}

fn empty_categories(collection: &EntryCollection) -> Vec<&str> {
    collection
        .categories()
        .iter()
        .filter(|c| !collection.entries().iter().any(|e| e.category == c.id))
        .map(|c| c.id.as_str())
        .collect()
}

/// Validate the configuration and print a summary. Returns whether the
/// check failed; with `strict`, warnings count as failures.
pub fn check(config: &Utf8Path, strict: bool) -> anyhow::Result<bool> {
    let site = load_site(config)?;
    let warnings = site_warnings(&site);

    for warning in &warnings {
        println!("{}: {warning}", "warning".yellow().bold());
    }

    let summary = format!(
        "{config}: {} entries in {} categories, {} documents",
        site.collection.len(),
        site.collection.categories().len(),
        site.content.documents.len(),
    );
    let failed = strict && !warnings.is_empty();
    if failed {
        println!("{} {summary} ({} warnings)", "✗".red().bold(), warnings.len());
    } else if warnings.is_empty() {
        println!("{} {summary}", "✓".green().bold());
    } else {
        println!("{} {summary} ({} warnings)", "✓".green().bold(), warnings.len());
    }
    Ok(failed)
}
