//! Build output writer.
//!
//! Layout under the output directory:
//!
//! ```text
//! <out>/<version>/docs.json            document metadata, source order
//! <out>/<version>/sidebars.json        processed sidebars
//! <out>/<version>/content/<source>     linkified document content
//! <out>/source-to-permalink.json       aliased source to permalink
//! <out>/broken-links.json              unresolved content links
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::builder::{SiteBuild, VersionBuild};
use crate::error::SiteError;

/// Version metadata file name.
pub const DOCS_FILE: &str = "docs.json";
/// Sidebars file name.
pub const SIDEBARS_FILE: &str = "sidebars.json";
/// Directory of linkified contents.
pub const CONTENT_DIR: &str = "content";
/// Permalink map file name.
pub const SOURCE_TO_PERMALINK_FILE: &str = "source-to-permalink.json";
/// Broken links file name.
pub const BROKEN_LINKS_FILE: &str = "broken-links.json";

/// Write a site build to `out_dir`, returning the number of files written.
pub fn write_site(out_dir: &Path, site: &SiteBuild) -> Result<usize, SiteError> {
    let written = site
        .versions
        .par_iter()
        .map(|version| {
            write_version(&version_output_dir(out_dir, &version.metadata.version_name), version)
        })
        .try_reduce(|| 0, |a, b| Ok(a + b))?;

    write_json(&out_dir.join(SOURCE_TO_PERMALINK_FILE), &site.source_to_permalink)?;
    write_json(&out_dir.join(BROKEN_LINKS_FILE), &site.broken_links)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        files = written + 2,
        "Wrote site output"
    );
    Ok(written + 2)
}

fn write_version(version_dir: &Path, version: &VersionBuild) -> Result<usize, SiteError> {
    write_json(&version_dir.join(DOCS_FILE), &version.docs)?;
    write_json(&version_dir.join(SIDEBARS_FILE), &version.sidebars)?;

    let content_dir = version_dir.join(CONTENT_DIR);
    for doc in &version.contents {
        write_file(&content_dir.join(&doc.source), &doc.content)?;
    }
    Ok(version.contents.len() + 2)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SiteError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| SiteError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| SiteError::io(path, e))
}

/// Path of a version's output directory.
pub fn version_output_dir(out_dir: &Path, version_name: &str) -> PathBuf {
    out_dir.join(version_name)
}

#[cfg(test)]
mod tests {
    use folio_content::{MetadataOptions, VersionMetadata};
    use folio_storage::MockStorage;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use super::*;
    use crate::builder::SiteBuilder;

    fn site() -> SiteBuild {
        let mut version = VersionMetadata::new("current", "/site/docs");
        version.version_path = "/docs".to_owned();
        let storage = MockStorage::new()
            .with_content_path("/site/docs")
            .with_file("intro.md", "# Intro\n\nSee [setup](guides/setup.md).\n")
            .with_file("guides/setup.md", "# Setup\n\n[Gone](gone.md)\n");

        SiteBuilder::new(MetadataOptions::new("/site"))
            .build(&[(version, storage)])
            .unwrap()
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_write_site_layout() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();

        let written = write_site(out, &site()).unwrap();
        assert_eq!(written, 6);

        let docs = read_json(&out.join("current/docs.json"));
        let ids: Vec<&str> = docs
            .as_array()
            .unwrap()
            .iter()
            .map(|doc| doc["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["guides/setup", "intro"]);

        let sidebars = read_json(&out.join("current/sidebars.json"));
        assert!(sidebars.get("defaultSidebar").is_some());

        assert_eq!(
            read_json(&out.join(SOURCE_TO_PERMALINK_FILE)),
            json!({
                "@site/docs/guides/setup.md": "/docs/guides/setup",
                "@site/docs/intro.md": "/docs/intro",
            })
        );
        assert_eq!(
            read_json(&out.join(BROKEN_LINKS_FILE)),
            json!([{
                "version": "current",
                "source": "@site/docs/guides/setup.md",
                "link": "gone.md",
            }])
        );
    }

    #[test]
    fn test_linkified_content_written() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path();
        write_site(out, &site()).unwrap();

        let intro = fs::read_to_string(
            version_output_dir(out, "current")
                .join(CONTENT_DIR)
                .join("intro.md"),
        )
        .unwrap();
        assert_eq!(intro, "# Intro\n\nSee [setup](/docs/guides/setup).\n");
    }

    #[test]
    fn test_json_files_end_with_newline() {
        let temp_dir = TempDir::new().unwrap();
        write_site(temp_dir.path(), &site()).unwrap();
        let content = fs::read_to_string(temp_dir.path().join(BROKEN_LINKS_FILE)).unwrap();
        assert!(content.ends_with("]\n"));
    }
}
