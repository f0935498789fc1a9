//! Error types for the image slider.

use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The slider was given no images to show
    #[snafu(display("image slider needs at least one image, got an empty list"))]
    EmptyImageList,

    #[snafu(display("Failed to read directory {}: {source}", path.display()))]
    ReadDir { path: PathBuf, source: std::io::Error },

    #[snafu(display("No image files found in directory: {}", path.display()))]
    NoImagesFound { path: PathBuf },

    #[snafu(display("Failed to read file {}: {source}", path.display()))]
    ReadImage { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to fetch {url}: {source}"))]
    Fetch { url: String, source: reqwest::Error },

    #[snafu(display("Fetching {url} returned HTTP {status}"))]
    HttpStatus { url: String, status: u16 },

    #[snafu(display("Unrecognised image format for {url}"))]
    UnknownFormat { url: String },

    #[snafu(display("Failed to decode {url}: {message}"))]
    Decode { url: String, message: String },

    #[snafu(display("Invalid icon size {value:?}, expected e.g. \"4rem\" or \"64px\""))]
    InvalidIconSize { value: String },

    #[snafu(display("Failed to open {url} in external viewer: {source}"))]
    Launch { url: String, source: std::io::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
