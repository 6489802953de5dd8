//! Content handlers: class-specific metadata extraction.
//!
//! Each handler produces a [`PartialMetadata`]; the resolver overlays the
//! resolution context (URLs, media type, timestamp) afterwards. Only the
//! text handler needs the response body, so the body-less image and video
//! handlers are plain functions over the terminal URL.

use scraper::{Html, Selector};
use url::Url;

use shelfmark_core::PartialMetadata;

/// Extract metadata from a markup body.
///
/// Title comes from the document's `<title>` element (empty string when
/// absent). The media flags record whether at least one embedding element
/// of the kind is present anywhere in the document.
pub fn extract_text_metadata(body: &str) -> PartialMetadata {
    let document = Html::parse_document(body);

    // Static selectors, infallible to parse.
    let title_selector = Selector::parse("title").unwrap();
    let img_selector = Selector::parse("img").unwrap();
    let video_selector = Selector::parse("video").unwrap();

    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    PartialMetadata {
        title,
        has_image: document.select(&img_selector).next().is_some(),
        has_video: document.select(&video_selector).next().is_some(),
    }
}

/// Image handler: title defaults to the filename, image flag forced on.
pub fn handle_image(url: &Url) -> PartialMetadata {
    PartialMetadata {
        title: file_name(url),
        has_image: true,
        has_video: false,
    }
}

/// Video handler: symmetric to the image handler with the flags swapped.
pub fn handle_video(url: &Url) -> PartialMetadata {
    PartialMetadata {
        title: file_name(url),
        has_image: false,
        has_video: true,
    }
}

/// Last path segment of the URL, used as a filename-style title.
fn file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}
