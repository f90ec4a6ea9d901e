use egui::{Color32, Context, Visuals};
use serde::{Deserialize, Serialize};

use crate::graph::Category;

/// Storage key of the persisted theme preference.
pub const THEME_KEY: &str = "theme";

const COLOR_SOURCE: Color32 = Color32::from_rgb(0x2C, 0x5F, 0x5D);
const COLOR_TARGET: Color32 = Color32::from_rgb(0xE6, 0x7E, 0x22);
const COLOR_VALIDATED: Color32 = Color32::from_rgb(0x27, 0xAE, 0x60);
const COLOR_PENDING: Color32 = Color32::from_rgb(0xF1, 0xC4, 0x0F);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored preference. Anything but `light` / `dark` is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn visuals(self) -> Visuals {
        match self {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        }
    }

    /// Switches the whole egui context to this theme.
    pub fn apply(self, ctx: &Context) {
        ctx.set_visuals(self.visuals());
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                tooltip_bg: Color32::from_rgba_unmultiplied(20, 20, 20, 230),
                ..Palette::base()
            },
            Theme::Light => Palette {
                text: Color32::from_rgb(0x11, 0x11, 0x11),
                tooltip_bg: Color32::from_rgba_unmultiplied(255, 255, 255, 242),
                ..Palette::base()
            },
        }
    }
}

/// Colors the graph view draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color32,
    pub tooltip_bg: Color32,
    pub node_border: Color32,
    pub source: Color32,
    pub target: Color32,
    pub validated: Color32,
    pub pending: Color32,
    pub shadow: Color32,
}

impl Palette {
    fn base() -> Self {
        Self {
            text: Color32::BLACK,
            tooltip_bg: Color32::WHITE,
            node_border: Color32::WHITE,
            source: COLOR_SOURCE,
            target: COLOR_TARGET,
            validated: COLOR_VALIDATED,
            pending: COLOR_PENDING,
            shadow: Color32::from_black_alpha(77),
        }
    }

    pub fn category(&self, c: Category) -> Color32 {
        match c {
            Category::Source => self.source,
            Category::Target => self.target,
        }
    }

    /// Legend entries in display order.
    pub fn legend(&self) -> [(&'static str, Color32); 4] {
        [
            (Category::Source.label(), self.source),
            (Category::Target.label(), self.target),
            ("Validated", self.validated),
            ("Pending", self.pending),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_stored_values() {
        for t in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::parse(t.as_str()), Some(t));
        }
        assert_eq!(Theme::parse("solarized"), None);
        assert_eq!(Theme::parse(""), None);
    }

    #[test]
    fn toggle() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert!(Theme::from_dark_mode(true).is_dark());
    }

    #[test]
    fn text_follows_theme() {
        assert_eq!(Theme::Dark.palette().text, Color32::WHITE);
        assert_eq!(
            Theme::Light.palette().text,
            Color32::from_rgb(0x11, 0x11, 0x11)
        );
        assert_ne!(
            Theme::Dark.palette().tooltip_bg,
            Theme::Light.palette().tooltip_bg
        );
        // categories do not depend on the theme
        assert_eq!(
            Theme::Dark.palette().category(Category::Target),
            Theme::Light.palette().category(Category::Target)
        );
    }

    #[test]
    fn serde_uses_stored_names() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
