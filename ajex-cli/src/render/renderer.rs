use super::theme::OneDark;
use ajex_core::{
    Collection, Entry, SourceError, export::group_thousands, resources::ResourceResolver,
    stats::MoodCount,
};
use std::io::{self, Write};
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

const MOOD_BAR_WIDTH: usize = 30;

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%a, %d %b %Y".to_string(),
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            println!("{}", md.trim_end());
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.opts.use_color {
            eprintln!("{}", message.with(OneDark::RED));
        } else {
            eprintln!("{message}");
        }
    }

    pub fn print_summary(&self, collection: &Collection) {
        self.print_md(&summary_markdown(collection));
    }

    pub fn print_entry_line(&self, entry: &Entry) {
        let mut date = entry.format_date(&self.opts.date_format);
        let mut title = entry.title.clone();
        let mut mood = entry
            .mood
            .as_ref()
            .map(|m| format!("[{m}]"))
            .unwrap_or_default();
        let mut words = format!("{} words", group_thousands(entry.word_count));
        if self.opts.use_color {
            date = date.with(Color::Cyan).to_string();
            title = title.with(Color::Yellow).to_string();
            mood = mood
                .with(OneDark::mood_color(entry.mood_color.as_deref()))
                .to_string();
            words = words.with(OneDark::COMMENT).to_string();
        }
        println!("{date} - {title} {mood} {words}");
    }

    /// Prints entries in the given order, annotating image references with whether the export
    /// actually contains the file.
    pub fn print_timeline(&self, entries: &[Entry], resolver: &dyn ResourceResolver) {
        for (i, entry) in entries.iter().enumerate() {
            if self.opts.short_mode {
                self.print_entry_line(entry);
                continue;
            }
            self.print_md(&entry_markdown(entry, &self.opts.date_format, resolver));
            if i + 1 < entries.len() {
                println!();
            }
            self.print_md("---");
        }
    }

    pub fn print_moods(&self, counts: &[MoodCount]) {
        let max = counts.iter().map(|m| m.count).max().unwrap_or(0);
        let label_width = counts.iter().map(|m| m.mood.chars().count()).max().unwrap_or(0);
        for m in counts {
            let label = format!("{:<label_width$}", m.mood);
            let bar = mood_bar(m.count, max, MOOD_BAR_WIDTH);
            if self.opts.use_color {
                println!(
                    "{} {} {}",
                    label.with(OneDark::YELLOW),
                    bar.with(OneDark::GREEN),
                    m.count
                );
            } else {
                println!("{label} {bar} {}", m.count);
            }
        }
    }

    pub fn print_source_errors(&self, errors: &[SourceError]) {
        if errors.is_empty() {
            return;
        }
        self.print_md("\n# Errors:");
        for e in errors {
            self.print_md(&format!("* Could not process '{}': {:#}", e.path, e.error));
        }
    }

    /// Appends streamed assistant text to the current line.
    pub fn print_chunk(&self, chunk: &str) {
        print!("{chunk}");
        io::stdout().flush().ok();
    }
}

fn summary_markdown(collection: &Collection) -> String {
    let stats = &collection.stats;
    let mut md = format!(
        "# Journal summary\n\n* **Entries:** {}\n* **Words:** {}\n* **Range:** {}\n",
        group_thousands(stats.entries),
        group_thousands(stats.words),
        stats.range
    );
    let years = collection.year_stats();
    if years.len() > 1 {
        md.push_str("\n## By year\n\n");
        for row in years {
            md.push_str(&format!(
                "* {}: {} entries, {} words\n",
                row.year,
                group_thousands(row.entries),
                group_thousands(row.words)
            ));
        }
    }
    md
}

fn entry_markdown(entry: &Entry, date_format: &str, resolver: &dyn ResourceResolver) -> String {
    let date = entry.format_date(date_format);
    let mut md = if entry.has_default_title() {
        format!("## {date}\n")
    } else {
        format!("## {date}: {}\n", entry.title)
    };
    if let Some(mood) = &entry.mood {
        match &entry.mood_context {
            Some(context) => md.push_str(&format!("*Mood: {mood} ({context})*\n")),
            None => md.push_str(&format!("*Mood: {mood}*\n")),
        }
    }
    if let Some(image) = &entry.image_url {
        if resolver.contains(image) {
            md.push_str(&format!("`image: {image}`\n"));
        } else {
            md.push_str(&format!("`image: {image} (missing)`\n"));
        }
    }
    if !entry.content.is_empty() {
        md.push_str(&format!("\n{}\n", entry.content));
    }
    md
}

fn mood_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let len = (count * width).div_ceil(max);
    "█".repeat(len)
}
