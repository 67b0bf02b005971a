//! Static site generator
//!
//! Produces `index.html`, `viewer.html` and `features.json` in one output
//! directory, plus the compiled page controller under `pkg/` when one is
//! supplied. The pages are fully rendered, so they read fine from `file://`;
//! filtering and the other interactive parts need the controller and an
//! HTTP origin.

use std::io;
use std::path::Path;

use crate::assets::{self, VIEWER_FILENAME};
use crate::config::Site;
use crate::controller::{CONTROLLER_DIR, CONTROLLER_FILES};
use crate::export::{EXPORT_FILENAME, write_features_json};
use crate::filter::FilterState;

pub const INDEX_FILENAME: &str = "index.html";

pub struct StaticSiteGenerator;

impl StaticSiteGenerator {
    /// Generate the site in `output_dir`, creating it if needed.
    ///
    /// The features page is pre-rendered with the default state (`all`, no
    /// term); the page controller re-applies whatever the URL asks for.
    pub fn generate(site: &Site, output_dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(output_dir)?;

        let index = assets::features_page(site, &FilterState::default(), None)
            .map_err(io::Error::other)?;
        std::fs::write(output_dir.join(INDEX_FILENAME), index)?;

        let viewer = assets::viewer_page(site, None).map_err(io::Error::other)?;
        std::fs::write(output_dir.join(VIEWER_FILENAME), viewer)?;

        write_features_json(&site.collection, &output_dir.join(EXPORT_FILENAME))?;

        tracing::info!(
            entries = site.collection.len(),
            documents = site.content.documents.len(),
            output = %output_dir.display(),
            "static site generated"
        );
        Ok(())
    }

    /// Copy a `wasm-bindgen --target web` build of this crate (built with
    /// the `wasm` feature) into `output_dir/pkg`.
    pub fn install_controller(pkg_dir: &Path, output_dir: &Path) -> io::Result<()> {
        for file in CONTROLLER_FILES {
            if !pkg_dir.join(file).is_file() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("`{}` has no {file}", pkg_dir.display()),
                ));
            }
        }
        let target = output_dir.join(CONTROLLER_DIR);
        std::fs::create_dir_all(&target)?;
        for file in CONTROLLER_FILES {
            std::fs::copy(pkg_dir.join(file), target.join(file))?;
        }
        tracing::info!(target = %target.display(), "page controller installed");
        Ok(())
    }
}
