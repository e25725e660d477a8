//! Social preview card. Laid out as a fixed-size SVG and rasterized to PNG,
//! since link-preview crawlers do not accept SVG images.

use crate::domain::Item;
use resvg::{tiny_skia, usvg};
use std::sync::{Arc, OnceLock};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 630;
pub const PREVIEW_COUNT: usize = 5;
pub const CONTENT_TYPE: &str = "image/png";
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

const TITLE: &str = "The Cancel List";
const SUBTITLE: &str = "Top 5 • Vote at /s";
const MAX_TITLE_CHARS: usize = 48;

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_TITLE_CHARS {
        return text.to_string();
    }
    let mut short: String = text.chars().take(MAX_TITLE_CHARS - 1).collect();
    short.push('…');
    short
}

fn frame(body: &str) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">
<rect width="100%" height="100%" fill="#0b0b0b"/>
<g font-family="Inter, Segoe UI, Roboto, DejaVu Sans, Liberation Sans, sans-serif" fill="#ffffff">
<text x="60" y="120" font-size="64" font-weight="900">{TITLE}</text>
<text x="60" y="170" font-size="30" font-weight="600" opacity="0.85">{subtitle}</text>
{body}
</g>
</svg>"##,
        subtitle = escape(SUBTITLE),
    )
}

/// Card listing the first five items. An empty list invites the first vote.
pub fn render(items: &[Item]) -> String {
    if items.is_empty() {
        return frame(
            r#"<text x="60" y="240" font-size="28" opacity="0.8">No votes yet. Be the first.</text>"#,
        );
    }

    let mut body = String::new();
    for (index, item) in items.iter().take(PREVIEW_COUNT).enumerate() {
        let top = 205 + index as u32 * 70;
        let title = if item.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            truncate(&item.title)
        };
        body.push_str(&format!(
            r##"<rect x="60" y="{top}" width="1080" height="60" rx="18" fill="#ffffff" fill-opacity="0.06" stroke="#ffffff" stroke-opacity="0.18"/>
<circle cx="100" cy="{cy}" r="22" fill="#ffffff" fill-opacity="0.10"/>
<text x="100" y="{badge_y}" font-size="20" font-weight="800" text-anchor="middle">{rank}</text>
<text x="140" y="{title_y}" font-size="28" font-weight="800">{title}</text>
<text x="1120" y="{title_y}" font-size="20" opacity="0.75" text-anchor="end">{subtitle}</text>
"##,
            cy = top + 30,
            badge_y = top + 37,
            title_y = top + 40,
            rank = index + 1,
            title = escape(&title),
            subtitle = escape(&item.subtitle()),
        ));
    }
    body.push_str(r#"<text x="60" y="600" font-size="20" opacity="0.7">Share this link to vote</text>"#);
    frame(&body)
}

/// Served when the leaderboard could not be read.
pub fn placeholder() -> String {
    frame(r#"<text x="60" y="240" font-size="22" opacity="0.7">Preview failed to load items.</text>"#)
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Invalid share image SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("Could not allocate a {WIDTH}x{HEIGHT} canvas")]
    Canvas,

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

fn fonts() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            if db.is_empty() {
                tracing::warn!("No system fonts found, share image text will be blank");
            } else {
                tracing::info!("Loaded {} font faces for share images", db.len());
            }
            Arc::new(db)
        })
        .clone()
}

/// Rasterizes a card from [`render`] or [`placeholder`] to PNG bytes.
/// CPU bound; callers on an async runtime should move it off the executor.
pub fn rasterize(svg: &str) -> Result<Vec<u8>, RasterError> {
    let mut options = usvg::Options::default();
    options.fontdb = fonts();

    let tree = usvg::Tree::from_str(svg, &options)?;
    let mut pixmap = tiny_skia::Pixmap::new(WIDTH, HEIGHT).ok_or(RasterError::Canvas)?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| RasterError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn png_size(png: &[u8]) -> (u32, u32) {
        // IHDR is the first chunk: width and height follow the chunk type.
        let width = u32::from_be_bytes(png[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(png[20..24].try_into().unwrap());
        (width, height)
    }

    #[test]
    fn test_rasterizes_to_fixed_size_png() {
        let items = vec![Item::new("a", "First", 3), Item::new("b", "Second & more", 1)];
        for svg in [render(&items), render(&[]), placeholder()] {
            let png = rasterize(&svg).unwrap();
            assert_eq!(png[..8], PNG_SIGNATURE);
            assert_eq!(png_size(&png), (WIDTH, HEIGHT));
        }
    }

    #[test]
    fn test_broken_svg_is_an_error() {
        assert!(matches!(rasterize("<svg"), Err(RasterError::Parse(_))));
    }

    #[test]
    fn test_fixed_dimensions() {
        for svg in [render(&[]), placeholder()] {
            assert!(svg.contains(r#"width="1200" height="630""#));
        }
    }

    #[test]
    fn test_lists_at_most_five_items() {
        let items: Vec<Item> = (1..=7)
            .map(|i| Item::new(format!("i{i}"), format!("Entry {i}"), 10 - i))
            .collect();
        let svg = render(&items);
        assert!(svg.contains("Entry 5"));
        assert!(!svg.contains("Entry 6"));
        assert!(svg.contains("5 votes"));
    }

    #[test]
    fn test_titles_are_escaped() {
        let svg = render(&[Item::new("x", "<script>&\"", 1)]);
        assert!(svg.contains("&lt;script&gt;&amp;&quot;"));
        assert!(!svg.contains("<script>"));
        assert!(svg.contains("1 vote<"));
    }

    #[test]
    fn test_empty_board_and_placeholder_differ() {
        assert!(render(&[]).contains("No votes yet"));
        assert!(placeholder().contains("failed to load"));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let long = "x".repeat(100);
        let svg = render(&[Item::new("x", long.as_str(), 0)]);
        assert!(svg.contains(&format!("{}…", "x".repeat(47))));
    }
}
