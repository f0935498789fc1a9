use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use reqwest::blocking::Client;
use snafu::ResultExt;
use url::Url;

use crate::error::{Error, FetchSnafu, NoImagesFoundSnafu, ReadDirSnafu, ReadImageSnafu, Result};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "qoi"];

/// Where an image URL points.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(String),
}

impl ImageSource {
    /// `file://` URLs are percent-decoded, and `localhost` or an empty host
    /// is accepted. A `file://` URL naming any other host is kept verbatim,
    /// which then fails to read. Anything else that isn't http(s) is a plain path.
    pub fn parse(url: &str) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            return ImageSource::Remote(url.to_string());
        }
        if url.starts_with("file://") {
            if let Some(path) = Url::parse(url).ok().and_then(|u| u.to_file_path().ok()) {
                return ImageSource::Local(path);
            }
        }
        ImageSource::Local(PathBuf::from(url))
    }
}

/// Raw image bytes plus what is needed to decode them.
#[derive(Debug)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Lowercase extension without the dot, e.g. `"png"`
    pub extension: String,
    /// EXIF orientation, 1 when absent
    pub orientation: u16,
}

/// What the image block should show right now.
pub enum LoadState {
    Loading,
    Ready(Texture2D),
    Broken,
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path).context(ReadDirSnafu { path: dir_path })?;

    for entry in entries {
        let path = entry.context(ReadDirSnafu { path: dir_path })?.path();
        if path.is_file() && extension_of(&path.to_string_lossy()).is_some() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        NoImagesFoundSnafu { path: dir_path }.fail()
    } else {
        Ok(paths)
    }
}

/// Known image extension of a path or URL, ignoring any query string or fragment.
pub fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Image type from magic bytes.
pub fn sniff_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("gif")
    } else if bytes.starts_with(b"BM") {
        Some("bmp")
    } else if bytes.starts_with(b"qoif") {
        Some("qoi")
    } else {
        None
    }
}

/// EXIF orientation tag of a JPEG, 1 (upright) if missing or unreadable.
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            tracing::debug!("no usable EXIF data: {e}");
            1
        }
    }
}

/// Reads images from disk or over HTTP. Blocking; run it off the UI thread.
///
/// One HTTP client is built on first use and kept for later fetches.
#[derive(Debug, Default)]
pub struct Fetcher {
    client: Option<Client>,
}

impl Fetcher {
    pub fn fetch(&mut self, url: &str) -> Result<FetchedImage> {
        let bytes = match ImageSource::parse(url) {
            ImageSource::Local(path) => fs::read(&path).context(ReadImageSnafu { path })?,
            ImageSource::Remote(url) => self.fetch_remote(&url)?,
        };

        let extension = sniff_extension(&bytes)
            .map(str::to_string)
            .or_else(|| extension_of(url))
            .ok_or_else(|| Error::UnknownFormat { url: url.to_string() })?;

        let orientation = if extension == "jpg" || extension == "jpeg" {
            exif_orientation(&bytes)
        } else {
            1
        };

        Ok(FetchedImage {
            bytes,
            extension,
            orientation,
        })
    }

    fn client(&mut self, url: &str) -> Result<&Client> {
        let client = match self.client.take() {
            Some(client) => client,
            // No Referer header, not even on redirects
            None => Client::builder()
                .referer(false)
                .build()
                .context(FetchSnafu { url })?,
        };
        Ok(self.client.insert(client))
    }

    fn fetch_remote(&mut self, url: &str) -> Result<Vec<u8>> {
        let response = self.client(url)?.get(url).send().context(FetchSnafu { url })?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes().context(FetchSnafu { url })?.to_vec())
    }
}

// --- Decode Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    url: &str,
    fetched: &FetchedImage,
) -> Result<Texture2D> {
    let decode_error = |message: String| Error::Decode {
        url: url.to_string(),
        message,
    };
    let mut image = Image::load_image_from_mem(&format!(".{}", fetched.extension), &fetched.bytes)
        .map_err(|e| decode_error(e.to_string()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Mirrored orientations are left as-is.
    match fetched.orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| decode_error(e.to_string()))
}

/// Result of one background fetch.
#[derive(Debug)]
pub struct Loaded {
    pub generation: u64,
    pub url: String,
    pub result: Result<FetchedImage>,
}

#[derive(Debug)]
struct Request {
    generation: u64,
    url: String,
}

/// Fetches images on a single worker thread. Results come back tagged with the
/// request generation so a caller can drop ones it no longer wants.
#[derive(Debug)]
pub struct ImageLoader {
    generation: u64,
    requests: Sender<Request>,
    results: Receiver<Loaded>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        let (requests, pending) = crossbeam_channel::unbounded();
        let (done, results) = crossbeam_channel::unbounded();
        thread::spawn(move || fetch_worker(pending, done));
        Self {
            generation: 0,
            requests,
            results,
        }
    }

    /// Queues `url`; anything requested earlier becomes stale.
    pub fn request(&mut self, url: &str) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        tracing::debug!(generation, %url, "fetching image");

        let request = Request {
            generation,
            url: url.to_string(),
        };
        if self.requests.send(request).is_err() {
            tracing::warn!(%url, "image loader thread is gone");
        }
        generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest result for the current generation, if one has arrived.
    pub fn poll(&self) -> Option<Loaded> {
        let mut latest = None;
        for loaded in self.results.try_iter() {
            if loaded.generation == self.generation {
                latest = Some(loaded);
            } else {
                tracing::trace!(generation = loaded.generation, url = %loaded.url, "dropping stale image");
            }
        }
        latest
    }
}

/// Serves requests until the loader is dropped. Only the newest queued request
/// is fetched; older ones are already stale.
fn fetch_worker(pending: Receiver<Request>, done: Sender<Loaded>) {
    let mut fetcher = Fetcher::default();
    while let Ok(mut request) = pending.recv() {
        for newer in pending.try_iter() {
            tracing::trace!(generation = request.generation, url = %request.url, "skipping stale request");
            request = newer;
        }

        let result = fetcher.fetch(&request.url);
        let loaded = Loaded {
            generation: request.generation,
            url: request.url,
            result,
        };
        if done.send(loaded).is_err() {
            break;
        }
    }
}
