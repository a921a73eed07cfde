use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

pub struct OneDark;

impl OneDark {
    pub fn default_onedark_skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(OneDark::FG);
        skin.bold.set_fg(OneDark::FG);
        skin.italic.set_fg(OneDark::GREEN);

        skin.headers[0].set_fg(OneDark::RED);
        skin.headers[0].add_attr(Attribute::Bold);
        skin.headers[0].align = Alignment::Left;

        skin.headers[1].set_fg(OneDark::YELLOW);
        skin.headers[1].add_attr(Attribute::Bold);

        skin.headers[2].set_fg(OneDark::BLUE);

        skin.table.set_fg(OneDark::PURPLE);
        skin.bullet.set_fg(OneDark::RED);
        skin.horizontal_rule.set_fg(OneDark::COMMENT);
        skin.inline_code.set_fg(OneDark::CYAN);
        skin.inline_code.set_bg(OneDark::BG);

        skin
    }

    /// Mood colors come straight from the export's CSS. Only `#rrggbb`, `#rgb` and
    /// `rgb(r, g, b)` are understood; anything else falls back to the theme.
    pub fn mood_color(css: Option<&str>) -> Color {
        css.and_then(parse_css_color).unwrap_or(OneDark::GREEN)
    }

    pub const BG: Color = Color::Rgb {
        r: 0x28,
        g: 0x2C,
        b: 0x34,
    }; // #282C34
    pub const FG: Color = Color::Rgb {
        r: 0xAB,
        g: 0xB2,
        b: 0xBF,
    }; // #ABB2BF
    pub const RED: Color = Color::Rgb {
        r: 0xE0,
        g: 0x6C,
        b: 0x75,
    }; // #E06C75
    pub const YELLOW: Color = Color::Rgb {
        r: 0xE5,
        g: 0xC0,
        b: 0x7B,
    }; // #E5C07B
    pub const GREEN: Color = Color::Rgb {
        r: 0x98,
        g: 0xC3,
        b: 0x79,
    }; // #98C379
    pub const BLUE: Color = Color::Rgb {
        r: 0x61,
        g: 0xAF,
        b: 0xEF,
    }; // #61AFEF
    pub const PURPLE: Color = Color::Rgb {
        r: 0xC6,
        g: 0x78,
        b: 0xDD,
    }; // #C678DD
    pub const CYAN: Color = Color::Rgb {
        r: 0x56,
        g: 0xB6,
        b: 0xC2,
    }; // #56B6C2
    pub const COMMENT: Color = Color::Rgb {
        r: 0x5C,
        g: 0x63,
        b: 0x70,
    }; // #5C6370
}

fn parse_css_color(css: &str) -> Option<Color> {
    let css = css.trim();
    if let Some(hex) = css.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => Some(Color::Rgb {
                r: channel(&hex[0..1])? * 17,
                g: channel(&hex[1..2])? * 17,
                b: channel(&hex[2..3])? * 17,
            }),
            _ => None,
        };
    }
    let args = css.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = args.split(',').map(|p| p.trim().parse::<u8>().ok());
    let color = Color::Rgb {
        r: parts.next()??,
        g: parts.next()??,
        b: parts.next()??,
    };
    parts.next().is_none().then_some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_rgb() {
        assert_eq!(
            parse_css_color("#ff9900"),
            Some(Color::Rgb {
                r: 0xff,
                g: 0x99,
                b: 0x00
            })
        );
        assert_eq!(
            parse_css_color("#fc0"),
            Some(Color::Rgb {
                r: 0xff,
                g: 0xcc,
                b: 0x00
            })
        );
        assert_eq!(
            parse_css_color("rgb(255, 204, 0)"),
            Some(Color::Rgb {
                r: 255,
                g: 204,
                b: 0
            })
        );
    }

    #[test]
    fn unknown_colors_fall_back() {
        assert_eq!(parse_css_color("linear-gradient(red, blue)"), None);
        assert_eq!(parse_css_color("rgb(1, 2)"), None);
        assert_eq!(parse_css_color("#12345"), None);
        assert_eq!(OneDark::mood_color(Some("papayawhip")), OneDark::GREEN);
        assert_eq!(OneDark::mood_color(None), OneDark::GREEN);
    }
}
