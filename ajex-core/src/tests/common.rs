use crate::sources::RawFile;

/// Builds an HTML document shaped like an Apple Journal export page.
#[derive(Debug, Default, Clone)]
pub struct EntryHtml {
    title: Option<String>,
    mood: Option<String>,
    mood_context: Option<String>,
    mood_color: Option<String>,
    image_src: Option<String>,
    paragraphs: Vec<String>,
}

impl EntryHtml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn mood(mut self, label: &str, context: Option<&str>) -> Self {
        self.mood = Some(label.to_string());
        self.mood_context = context.map(str::to_string);
        self
    }

    pub fn mood_color(mut self, color: &str) -> Self {
        self.mood_color = Some(color.to_string());
        self
    }

    pub fn image(mut self, src: &str) -> Self {
        self.image_src = Some(src.to_string());
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.paragraphs.push(text.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut html = String::from(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"></head><body>\n<div class=\"pageContainer\">\n",
        );
        if let Some(title) = &self.title {
            html.push_str(&format!(
                "<div class=\"pageHeader\"><div class=\"title\">{title}</div></div>\n"
            ));
        }
        html.push_str("<div class=\"assetGrid\">\n");
        if self.mood.is_some() || self.mood_context.is_some() {
            let style = self
                .mood_color
                .as_ref()
                .map(|c| format!(" style=\"background-color: {c};\""))
                .unwrap_or_default();
            html.push_str(&format!(
                "<div class=\"gridItem assetType_stateOfMind\"{style}>"
            ));
            if let Some(mood) = &self.mood {
                html.push_str(&format!("<div class=\"gridItemOverlayHeader\">{mood}</div>"));
            }
            if let Some(context) = &self.mood_context {
                html.push_str(&format!("<div class=\"gridItemOverlayFooter\">{context}</div>"));
            }
            html.push_str("</div>\n");
        }
        if let Some(src) = &self.image_src {
            html.push_str(&format!(
                "<div class=\"gridItem assetType_photo\"><img src=\"{src}\"></div>\n"
            ));
        }
        html.push_str("</div>\n<div class=\"bodyText\">\n");
        for p in &self.paragraphs {
            html.push_str(&format!("<p class=\"p2\"><span class=\"s1\">{p}</span></p>\n"));
        }
        html.push_str("</div>\n</div>\n</body></html>\n");
        html
    }

    /// Wraps the document in a [`RawFile`] under `AppleJournalEntries/Entries/`.
    pub fn file(&self, name: &str) -> RawFile {
        RawFile::new(format!("AppleJournalEntries/Entries/{name}"), self.build())
    }
}
