//! Turns one exported HTML page into a normalized [`Entry`].
//!
//! The export is loosely structured: any region (title, mood, photo, body) may be missing, so
//! each one is looked up independently and a missing region only leaves its field empty.
//! The date never comes from the markup, only from the file name.

use crate::entry::{DEFAULT_TITLE, Entry, count_words};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").unwrap());
static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|;)\s*(?:background-color|background|color)\s*:\s*([^;]+)").unwrap()
});

static TITLE: Lazy<Selector> = Lazy::new(|| selector(".pageHeader .title"));
static TITLE_FALLBACK: Lazy<Selector> = Lazy::new(|| selector(".title, h1"));
static MOOD_BLOCK: Lazy<Selector> = Lazy::new(|| selector(".assetType_stateOfMind"));
static MOOD_HEADER: Lazy<Selector> = Lazy::new(|| selector(".gridItemOverlayHeader"));
static MOOD_FOOTER: Lazy<Selector> = Lazy::new(|| selector(".gridItemOverlayFooter"));
static STYLED: Lazy<Selector> = Lazy::new(|| selector("[style]"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p.p2"));
static PHOTO: Lazy<Selector> = Lazy::new(|| selector(".assetType_photo img[src]"));
static PHOTO_FALLBACK: Lazy<Selector> = Lazy::new(|| selector("img[src]"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

#[derive(Debug, Default, PartialEq)]
struct Mood {
    label: Option<String>,
    context: Option<String>,
    color: Option<String>,
}

/// Parses a single journal page.
///
/// Returns `None` when the file name carries no `YYYY-MM-DD` date, or when the page has no
/// body text, no mood and no image. Neither case is an error: non-entry pages are expected.
///
/// # Arguments
///
/// * `raw_markup` - The full HTML document.
/// * `filename` - File name or path of the document. Only the final segment is searched.
pub fn parse_entry(raw_markup: &str, filename: &str) -> Option<Entry> {
    let date = date_from_filename(filename)?;
    let doc = Html::parse_document(raw_markup);

    let paragraphs = extract_paragraphs(&doc);
    let mood = extract_mood(&doc);
    let image_url = extract_image(&doc);

    let mood_label = mood.as_ref().and_then(|m| m.label.clone());
    if paragraphs.is_empty() && mood_label.is_none() && image_url.is_none() {
        return None;
    }

    let content = paragraphs.join("\n\n");
    let word_count = count_words(&content);
    let (mood_context, mood_color) = match mood {
        Some(m) => (m.context, m.color),
        None => (None, None),
    };

    Some(Entry {
        date,
        title: extract_title(&doc).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        mood: mood_label,
        mood_context,
        mood_color,
        image_url,
        content,
        word_count,
    })
}

/// First `YYYY-MM-DD` in the last path segment, e.g. `2026-01-10_(1).html` → `2026-01-10`.
pub fn date_from_filename(filename: &str) -> Option<String> {
    let name = last_segment(filename);
    DATE_RE.find(name).map(|m| m.as_str().to_string())
}

fn extract_title(doc: &Html) -> Option<String> {
    [&*TITLE, &*TITLE_FALLBACK]
        .into_iter()
        .find_map(|sel| doc.select(sel).map(element_text).find(|t| !t.is_empty()))
}

fn extract_mood(doc: &Html) -> Option<Mood> {
    let block = doc.select(&MOOD_BLOCK).next()?;
    let label = block
        .select(&MOOD_HEADER)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());
    let context = block
        .select(&MOOD_FOOTER)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());

    Some(Mood {
        label,
        context,
        color: mood_color(block),
    })
}

/// The block's own style wins over any styled descendant.
fn mood_color(block: ElementRef) -> Option<String> {
    std::iter::once(block)
        .chain(block.select(&STYLED))
        .filter_map(|el| el.value().attr("style"))
        .find_map(color_from_style)
}

fn color_from_style(style: &str) -> Option<String> {
    COLOR_RE
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| !c.is_empty())
}

fn extract_paragraphs(doc: &Html) -> Vec<String> {
    doc.select(&PARAGRAPH)
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn extract_image(doc: &Html) -> Option<String> {
    [&*PHOTO, &*PHOTO_FALLBACK].into_iter().find_map(|sel| {
        doc.select(sel)
            .filter_map(|img| img.value().attr("src"))
            .map(last_segment)
            .find(|name| !name.is_empty())
            .map(str::to_string)
    })
}

/// Element text with every whitespace run (including `&nbsp;`) collapsed to one space.
fn element_text(el: ElementRef) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn last_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::EntryHtml;

    #[test]
    fn date_is_taken_from_anywhere_in_the_name() {
        assert_eq!(
            date_from_filename("2026-01-10_(1).html").as_deref(),
            Some("2026-01-10")
        );
        assert_eq!(
            date_from_filename("entry copy 2023-05-01 evening.html").as_deref(),
            Some("2023-05-01")
        );
        assert_eq!(
            date_from_filename("Entries/2023-05-01_2024-01-01.html").as_deref(),
            Some("2023-05-01")
        );
    }

    #[test]
    fn date_is_only_searched_in_the_file_name() {
        assert!(date_from_filename("2023-05-01/notes.html").is_none());
        assert!(date_from_filename("Entries/untitled.html").is_none());
        assert!(date_from_filename("2023-5-1.html").is_none());
    }

    #[test]
    fn file_without_date_yields_nothing() {
        let html = EntryHtml::new().paragraph("Hello world").build();
        assert!(parse_entry(&html, "Entries/malformed.html").is_none());
    }

    #[test]
    fn page_without_text_mood_or_image_yields_nothing() {
        let html = EntryHtml::new().title("Only a title").build();
        assert!(parse_entry(&html, "2023-05-01.html").is_none());
        assert!(parse_entry("", "2023-05-01.html").is_none());
    }

    #[test]
    fn paragraph_entry_is_normalized() {
        let html = EntryHtml::new()
            .title("Morning   walk")
            .paragraph("  Hello\n   world  ")
            .paragraph("   ")
            .paragraph("Second\u{a0}\u{a0}paragraph here")
            .build();
        let entry = parse_entry(&html, "AppleJournalEntries/Entries/2023-05-01.html").unwrap();

        assert_eq!(entry.date, "2023-05-01");
        assert_eq!(entry.title, "Morning walk");
        assert_eq!(entry.content, "Hello world\n\nSecond paragraph here");
        assert_eq!(entry.word_count, 5);
        assert!(entry.mood.is_none());
        assert!(entry.image_url.is_none());
    }

    #[test]
    fn mood_only_entry_has_empty_content() {
        let html = EntryHtml::new()
            .mood("Happy", Some("Family time"))
            .mood_color("rgb(255, 204, 0)")
            .build();
        let entry = parse_entry(&html, "2023-12-25.html").unwrap();

        assert_eq!(entry.mood.as_deref(), Some("Happy"));
        assert_eq!(entry.mood_context.as_deref(), Some("Family time"));
        assert_eq!(entry.mood_color.as_deref(), Some("rgb(255, 204, 0)"));
        assert_eq!(entry.content, "");
        assert_eq!(entry.word_count, 0);
        assert_eq!(entry.title, DEFAULT_TITLE);
    }

    #[test]
    fn mood_block_without_header_does_not_make_an_entry() {
        let html = EntryHtml::new()
            .mood("", Some("Just context"))
            .build();
        assert!(parse_entry(&html, "2023-12-25.html").is_none());
    }

    #[test]
    fn mood_context_kept_without_label_when_entry_is_valid() {
        let html = EntryHtml::new()
            .mood("", Some("Just context"))
            .paragraph("Text")
            .build();
        let entry = parse_entry(&html, "2023-12-25.html").unwrap();
        assert!(entry.mood.is_none());
        assert_eq!(entry.mood_context.as_deref(), Some("Just context"));
    }

    #[test]
    fn image_only_entry_keeps_file_name() {
        let html = EntryHtml::new()
            .image("../Resources/ABCD-1234.jpeg")
            .build();
        let entry = parse_entry(&html, "2024-02-02.html").unwrap();
        assert_eq!(entry.image_url.as_deref(), Some("ABCD-1234.jpeg"));
        assert_eq!(entry.word_count, 0);
    }

    #[test]
    fn photo_asset_is_preferred_over_other_images() {
        let html = r#"<html><body>
            <img src="icons/header.png">
            <div class="gridItem assetType_photo"><img src="Resources\photo.heic"></div>
        </body></html>"#;
        let entry = parse_entry(html, "2024-02-02.html").unwrap();
        assert_eq!(entry.image_url.as_deref(), Some("photo.heic"));
    }

    #[test]
    fn title_falls_back_to_broader_selector() {
        let html = r#"<html><body><h1>  Trip   notes </h1><p class="p2">Body</p></body></html>"#;
        let entry = parse_entry(html, "2024-03-03.html").unwrap();
        assert_eq!(entry.title, "Trip notes");
    }

    #[test]
    fn only_p2_paragraphs_count_as_body() {
        let html = r#"<html><body><p class="p1">Header text</p><p class="p2">Body text</p></body></html>"#;
        let entry = parse_entry(html, "2024-03-03.html").unwrap();
        assert_eq!(entry.content, "Body text");
        assert_eq!(entry.word_count, 2);
    }

    #[test]
    fn mood_color_read_from_styled_descendant() {
        let html = r#"<html><body>
            <div class="assetType_stateOfMind">
              <div class="swatch" style="width: 4px; color: #ff9900"></div>
              <div class="gridItemOverlayHeader">Calm</div>
            </div>
        </body></html>"#;
        let entry = parse_entry(html, "2024-03-03.html").unwrap();
        assert_eq!(entry.mood.as_deref(), Some("Calm"));
        assert_eq!(entry.mood_color.as_deref(), Some("#ff9900"));
        assert!(entry.mood_context.is_none());
    }

    #[test]
    fn style_without_color_is_ignored() {
        assert!(color_from_style("width: 10px; height: 4px").is_none());
        assert_eq!(
            color_from_style("background: linear-gradient(red, blue)").as_deref(),
            Some("linear-gradient(red, blue)")
        );
    }
}
