//! Game settings and theme palettes
//!
//! Persisted separately from the best score. Exactly one theme is active at a
//! time; the simulation never reads any of this.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::PIXEL_SIZE;
use crate::persistence::{KeyValueStore, load_json, save_json};

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Parse `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let hex = s.strip_prefix('#')?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

/// Hero sprite colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroColors {
    pub body: String,
    pub eye: String,
    pub band: String,
    pub outline: String,
}

/// A named color set, as stored in settings (hex strings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Sky gradient, top then bottom
    pub sky: [String; 2],
    /// Far hill, then near hill
    pub hills: [String; 2],
    /// One color per tree shade
    pub trees: [String; 3],
    pub tree_trunk: String,
    pub platform: String,
    pub perfect_zone: String,
    pub stick: String,
    pub hero: HeroColors,
}

impl Theme {
    pub const ORIGINAL: &'static str = "original";

    /// The default green retro look
    pub fn original() -> Self {
        Self {
            sky: ["#BBD691".into(), "#FEF1E1".into()],
            hills: ["#95C629".into(), "#659F1C".into()],
            trees: ["#6D8821".into(), "#8FAC34".into(), "#98B333".into()],
            tree_trunk: "#7D833C".into(),
            platform: "#000000".into(),
            perfect_zone: "#FF0000".into(),
            stick: "#F5BB00".into(),
            hero: HeroColors {
                body: "#000000".into(),
                eye: "#FFFFFF".into(),
                band: "#FF0000".into(),
                outline: "#FFFFFF".into(),
            },
        }
    }

    /// Resolve to render colors. Unparseable entries use the original theme's color.
    pub fn palette(&self) -> Palette {
        let base = Theme::original();
        let pick = |value: &str, fallback: &str| {
            parse_hex_color(value).unwrap_or_else(|| {
                log::warn!("Invalid theme color {:?}, using {}", value, fallback);
                parse_hex_color(fallback).unwrap_or([0.0, 0.0, 0.0, 1.0])
            })
        };

        Palette {
            sky: [pick(&self.sky[0], &base.sky[0]), pick(&self.sky[1], &base.sky[1])],
            hills: [
                pick(&self.hills[0], &base.hills[0]),
                pick(&self.hills[1], &base.hills[1]),
            ],
            trees: [
                pick(&self.trees[0], &base.trees[0]),
                pick(&self.trees[1], &base.trees[1]),
                pick(&self.trees[2], &base.trees[2]),
            ],
            tree_trunk: pick(&self.tree_trunk, &base.tree_trunk),
            platform: pick(&self.platform, &base.platform),
            perfect_zone: pick(&self.perfect_zone, &base.perfect_zone),
            stick: pick(&self.stick, &base.stick),
            hero_body: pick(&self.hero.body, &base.hero.body),
            hero_eye: pick(&self.hero.eye, &base.hero.eye),
            hero_band: pick(&self.hero.band, &base.hero.band),
            hero_outline: pick(&self.hero.outline, &base.hero.outline),
        }
    }
}

/// Theme colors resolved for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: [Rgba; 2],
    pub hills: [Rgba; 2],
    pub trees: [Rgba; 3],
    pub tree_trunk: Rgba,
    pub platform: Rgba,
    pub perfect_zone: Rgba,
    pub stick: Rgba,
    pub hero_body: Rgba,
    pub hero_eye: Rgba,
    pub hero_band: Rgba,
    pub hero_outline: Rgba,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active theme id (key into `themes`)
    pub theme: String,
    /// Theme table
    pub themes: BTreeMap<String, Theme>,
    /// Retro pixel grid size in screen pixels
    pub pixel_size: f32,
    /// Darken every other row
    pub scanlines: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let mut themes = BTreeMap::new();
        themes.insert(Theme::ORIGINAL.to_string(), Theme::original());
        Self {
            theme: Theme::ORIGINAL.to_string(),
            themes,
            pixel_size: PIXEL_SIZE,
            scanlines: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "stick_hero_settings";

    /// Colors of the active theme, falling back to the original theme
    pub fn palette(&self) -> Palette {
        match self.themes.get(&self.theme) {
            Some(theme) => theme.palette(),
            None => {
                log::warn!("Unknown theme {:?}, using {}", self.theme, Theme::ORIGINAL);
                Theme::original().palette()
            }
        }
    }

    /// Pixel grid size, never below one screen pixel
    pub fn grid(&self) -> f32 {
        if self.pixel_size.is_finite() {
            self.pixel_size.max(1.0)
        } else {
            PIXEL_SIZE
        }
    }

    /// Load settings, defaulting on absence or error
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<Settings, _>(store, Self::STORAGE_KEY) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings (theme {})", settings.theme);
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &S) {
        match save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}
