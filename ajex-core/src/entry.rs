use chrono::NaiveDate;

/// Title used when an entry's markup carries no title region.
pub const DEFAULT_TITLE: &str = "Untitled Entry";

/// One normalized journal record, built from a single exported HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Canonical `YYYY-MM-DD`, taken verbatim from the file name.
    pub date: String,
    pub title: String,
    pub mood: Option<String>,
    pub mood_context: Option<String>,
    /// Raw CSS color of the mood block. Never validated.
    pub mood_color: Option<String>,
    /// File name (last path segment only) of the entry's primary image.
    pub image_url: Option<String>,
    pub content: String,
    pub word_count: usize,
}

impl Entry {
    /// The four-digit year prefix of `date`.
    pub fn year(&self) -> &str {
        self.date.get(..4).unwrap_or(&self.date)
    }

    /// Calendar view of `date`, `None` when the file name held an impossible date (e.g. `2023-13-40`).
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// `date` rendered with a chrono format string, or verbatim when it isn't a real date.
    pub fn format_date(&self, date_format: &str) -> String {
        match self.naive_date() {
            Some(date) => date.format(date_format).to_string(),
            None => self.date.clone(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }
}

/// Number of whitespace-delimited tokens. Empty or blank text counts as zero.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_entry(date: &str) -> Entry {
        Entry {
            date: date.to_string(),
            title: DEFAULT_TITLE.to_string(),
            mood: None,
            mood_context: None,
            mood_color: None,
            image_url: None,
            content: String::new(),
            word_count: 0,
        }
    }

    #[test]
    fn year_is_date_prefix() {
        assert_eq!(mk_entry("2023-05-01").year(), "2023");
    }

    #[test]
    fn naive_date_rejects_impossible_dates() {
        assert_eq!(
            mk_entry("2024-02-29").naive_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(mk_entry("2023-13-40").naive_date().is_none());
    }

    #[test]
    fn format_date_falls_back_to_raw_text() {
        assert_eq!(
            mk_entry("2025-08-15").format_date("%A, %d %b %Y"),
            "Friday, 15 Aug 2025"
        );
        assert_eq!(mk_entry("2023-13-40").format_date("%d/%m/%Y"), "2023-13-40");
    }

    #[test]
    fn empty_text_has_zero_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n "), 0);
        assert_eq!(count_words("Hello world"), 2);
        assert_eq!(count_words("one\n\ntwo\u{a0}three"), 3);
    }
}
