use colored::Colorize;
use ragdocs_web::highlight::match_ranges;
use ragdocs_web::{CategoryFilter, Entry, FilterState, Site};

/// Terminal rendering of a matched text: every occurrence of `term` is
/// emphasized (plain text when colors are off).
fn emphasize(text: &str, term: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    for range in match_ranges(text, term) {
        out.push_str(&text[pos..range.start]);
        out.push_str(&text[range.clone()].yellow().bold().to_string());
        pos = range.end;
    }
    out.push_str(&text[pos..]);
    out
}

fn format_entry(entry: &Entry, term: &str) -> String {
    let mut out = format!(
        "{} {}\n    {}\n",
        entry.id.bold(),
        format!("[{}]", entry.category).dimmed(),
        emphasize(&entry.name, term),
    );
    for text in [&entry.description, &entry.implementation_ref, &entry.details] {
        if !text.is_empty() {
            out.push_str(&format!("    {}\n", emphasize(text, term)));
        }
    }
    out
}

/// Run a filter pass from the command line. `category` accepts the same
/// values as the `category` URL parameter.
pub fn search(site: &Site, category: &str, term: &str, json: bool) -> anyhow::Result<()> {
    let filter = FilterState::new(CategoryFilter::parse(category, &site.collection), term);
    let visible = filter.apply(&site.collection);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for entry in &visible {
        print!("{}", format_entry(entry, &filter.term));
    }
    println!(
        "{} of {} entries match (category: {}, term: {:?})",
        visible.len(),
        site.collection.len(),
        filter.category,
        filter.term
    );
    Ok(())
}
