#![allow(clippy::print_stderr, clippy::print_stdout)]
mod check;
mod doc_serve;
mod logging;
mod search;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use ragdocs_web::Site;
use ragdocs_web::export::{features_json, write_features_json};
use ragdocs_web::static_site::StaticSiteGenerator;

use crate::doc_serve::DocServeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Control colored output (auto, always, never).
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub color: ColorChoice,
    /// Log filter, e.g. `debug` or `ragdocs_web=trace` (overrides RAGDOCS_LOG).
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,
    /// Path to the site configuration.
    #[arg(short, long, global = true, default_value = "site/site.toml")]
    pub config: Utf8PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate the static site (index.html, viewer.html, features.json).
    Build {
        /// Output directory.
        #[arg(short, long, default_value = "dist")]
        out: Utf8PathBuf,
        /// `wasm-bindgen --target web` output of ragdocs-web (built with the
        /// `wasm` feature), copied to `<out>/pkg`.
        #[arg(long, value_name = "PKG_DIR")]
        controller: Option<Utf8PathBuf>,
    },
    /// Validate the site configuration and report content warnings.
    Check {
        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,
    },
    /// Filter entries the same way the page does.
    Search {
        /// Search term (case-insensitive substring).
        #[arg(default_value = "")]
        term: String,
        /// Category id, or `all`.
        #[arg(long, default_value = "all")]
        category: String,
        /// Print the matching entries as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write every entry as JSON.
    Export {
        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
    /// Serve the site locally with per-request rendering.
    Serve {
        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on.
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
        /// `wasm-bindgen --target web` output of ragdocs-web, served at `/pkg`.
        #[arg(long, value_name = "PKG_DIR")]
        controller: Option<Utf8PathBuf>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Build { .. } => "build",
            Command::Check { .. } => "check",
            Command::Search { .. } => "search",
            Command::Export { .. } => "export",
            Command::Serve { .. } => "serve",
        }
    }
}

fn main() {
    let opts = Options::parse();
    logging::init(opts.log_level.as_deref());
    logging::setup_panic_hook(opts.command.name());

    match run(&opts) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

pub(crate) fn load_site(config: &Utf8Path) -> anyhow::Result<Site> {
    Site::load(config.as_std_path())
        .with_context(|| format!("failed to load site configuration `{config}`"))
}

/// Run one command. `Ok(true)` means the command ran but reported failure.
pub fn run(opts: &Options) -> anyhow::Result<bool> {
    match opts.color {
        ColorChoice::Auto => colored::control::unset_override(),
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
    }

    match &opts.command {
        Command::Build { out, controller } => {
            let site = load_site(&opts.config)?;
            StaticSiteGenerator::generate(&site, out.as_std_path())
                .with_context(|| format!("failed to write site to `{out}`"))?;
            if let Some(pkg) = controller {
                StaticSiteGenerator::install_controller(pkg.as_std_path(), out.as_std_path())
                    .with_context(|| format!("failed to install controller from `{pkg}`"))?;
            }
            println!(
                "{} built {} entries and {} documents into {out}",
                "✓".green().bold(),
                site.collection.len(),
                site.content.documents.len()
            );
            if controller.is_none() {
                println!(
                    "{}",
                    "  no --controller given: pages are pre-rendered but not interactive".dimmed()
                );
            }
            Ok(false)
        }
        Command::Check { strict } => check::check(&opts.config, *strict),
        Command::Search {
            term,
            category,
            json,
        } => {
            let site = load_site(&opts.config)?;
            search::search(&site, category, term, *json)?;
            Ok(false)
        }
        Command::Export { output } => {
            let site = load_site(&opts.config)?;
            match output {
                Some(path) => {
                    write_features_json(&site.collection, path.as_std_path())
                        .with_context(|| format!("failed to write `{path}`"))?;
                    println!("{} exported {} entries to {path}", "✓".green().bold(), site.collection.len());
                }
                None => println!("{}", features_json(&site.collection)?),
            }
            Ok(false)
        }
        Command::Serve {
            host,
            port,
            controller,
        } => {
            let site = load_site(&opts.config)?;
            let config = DocServeConfig {
                host: host.clone(),
                port: *port,
                controller: controller.as_ref().map(|dir| dir.clone().into_std_path_buf()),
            };
            let rt = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
            rt.block_on(doc_serve::serve_docs(site, config))
                .with_context(|| format!("preview server failed on {host}:{port}"))?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_are_tagged_with_the_parsed_command() {
        let opts = Options::parse_from(["ragdocs", "serve", "--port", "9000"]);
        assert_eq!(opts.command.name(), "serve");

        let opts = Options::parse_from(["ragdocs", "--config", "x.toml", "search", "vector"]);
        assert_eq!(opts.command.name(), "search");
        assert_eq!(opts.config, "x.toml");
    }
}
