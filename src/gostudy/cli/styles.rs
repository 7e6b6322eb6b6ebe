use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Style names referenced from Rust code (templates use the same strings).
pub mod names {
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
    pub const LEVEL_BEGINNER: &str = "level_beginner";
    pub const LEVEL_INTERMEDIATE: &str = "level_intermediate";
    pub const LEVEL_ADVANCED: &str = "level_advanced";
    pub const OUTPUT_RUNNING: &str = "output_running";
    pub const OUTPUT_DONE: &str = "output_done";
    pub const OUTPUT_IDLE: &str = "muted";
    pub const PEEK: &str = "peek";
    pub const PEEK_MARKER: &str = "peek_marker";
}

/// Named `console` styles looked up by the `style` template filter.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

/// Prepended to text whose style name is not registered, so typos show up.
pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style
                .clone()
                .force_styling(true)
                .apply_to(text)
                .to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

/// Nearest ANSI 256-color index for an RGB triplet.
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

pub static STUDY_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::INFO, Style::new().dim())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
        .add("category", Style::new().bold())
        .add("number", Style::new().color256(rgb_to_ansi256((154, 154, 154))))
        .add("current", Style::new().cyan().bold())
        .add("title", Style::new().bold())
        .add("heading", Style::new().bold().underlined())
        .add("muted", Style::new().dim())
        .add("gutter", Style::new().color256(rgb_to_ansi256((110, 110, 110))))
        .add(names::LEVEL_BEGINNER, Style::new().color256(rgb_to_ansi256((16, 185, 129))))
        .add(names::LEVEL_INTERMEDIATE, Style::new().color256(rgb_to_ansi256((245, 158, 11))))
        .add(names::LEVEL_ADVANCED, Style::new().color256(rgb_to_ansi256((239, 68, 68))))
        .add(names::OUTPUT_RUNNING, Style::new().color256(rgb_to_ansi256((251, 191, 36))))
        .add(names::OUTPUT_DONE, Style::new().color256(rgb_to_ansi256((16, 185, 129))))
        .add(names::PEEK, Style::new().dim())
        .add(names::PEEK_MARKER, Style::new().dim().italic())
});
