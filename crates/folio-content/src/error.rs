//! Error types for document metadata processing.

use std::path::PathBuf;

/// Error computing the metadata of a single document.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Base id (front matter `id` or file name) contains a slash.
    #[error("Document id \"{0}\" cannot include slash.")]
    SlashInId(String),

    /// The home page document also declares a front matter slug.
    #[error(
        "The docs homepage (homePageId={home_page_id}) is not allowed to have a frontmatter slug={slug} => you have to choose either homePageId or slug, not both"
    )]
    HomePageSlugConflict {
        /// Configured home page id.
        home_page_id: String,
        /// Conflicting front matter slug.
        slug: String,
    },

    /// Computed slug is not a valid URL pathname.
    #[error(
        "We couldn't compute a valid slug for document with id \"{id}\" in \"{dir_name}\" directory. The slug we computed looks invalid: {slug}. Maybe your slug front matter is incorrect or you use weird chars in the file path? Use the slug front matter to pick a slug of your choice, e.g. `slug: /my/customDocPath`"
    )]
    InvalidSlug {
        /// Base id of the document.
        id: String,
        /// Source directory of the document.
        dir_name: String,
        /// The offending slug.
        slug: String,
    },

    /// Front matter is not valid YAML or has fields of the wrong type.
    #[error("Invalid front matter: {0}")]
    FrontMatter(String),

    /// Several documents of one version share an id.
    #[error("{}", format_duplicates(.0))]
    DuplicateId(Vec<DuplicateId>),
}

/// One id claimed by several documents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateId {
    /// The duplicated id.
    pub id: String,
    /// Aliased sources of every document using it.
    pub sources: Vec<String>,
}

fn format_duplicates(duplicates: &[DuplicateId]) -> String {
    let mut message = String::from("The following docs ids are duplicated:");
    for duplicate in duplicates {
        message.push_str(&format!(
            "\n- \"{}\" ({})",
            duplicate.id,
            duplicate.sources.join(", ")
        ));
    }
    message
}

/// Metadata error annotated with the document and version it came from.
#[derive(Debug, thiserror::Error)]
#[error("Can't process doc metadata for doc at path \"{}\" in version \"{version}\": {source}", .file_path.display())]
pub struct DocProcessingError {
    /// Full path of the offending file.
    pub file_path: PathBuf,
    /// Version the file belongs to.
    pub version: String,
    /// Original cause.
    #[source]
    pub source: MetadataError,
}
