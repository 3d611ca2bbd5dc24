//! The card the effects are drawn on.
//!
//! Card data is owned by the host. The engine only reads the image reference and the text shown
//! in the overlay, and never lets them influence effect output.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{CardFxError, CardFxResult};
use crate::style::StyleDescriptor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    pub fn badge_color(self) -> Rgba8 {
        match self {
            Self::Common => Rgba8::rgb(158, 158, 158),
            Self::Uncommon => Rgba8::rgb(76, 175, 80),
            Self::Rare => Rgba8::rgb(33, 150, 243),
            Self::Epic => Rgba8::rgb(156, 39, 176),
            Self::Legendary => Rgba8::rgb(255, 152, 0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub image_url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rarity: Rarity,
}

impl Card {
    pub fn from_reader<R: std::io::Read>(r: R) -> CardFxResult<Self> {
        serde_json::from_reader(r).map_err(|e| CardFxError::serde(format!("parse card JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> CardFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            CardFxError::validation(format!("open card '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

/// z-index of the card photo, below every effect layer.
pub const Z_IMAGE: i32 = 0;
/// z-index of the text overlay, above every effect layer.
pub const Z_OVERLAY: i32 = 500;

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ImageLayer {
    pub z_index: i32,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextOverlay {
    pub z_index: i32,
    pub title: String,
    pub description: String,
    pub rarity: Rarity,
    pub badge_label: &'static str,
    pub badge_color: Rgba8,
}

/// Everything a renderer needs for one card, back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CardFrame {
    pub image: ImageLayer,
    pub effects: Vec<StyleDescriptor>,
    pub overlay: TextOverlay,
}

impl CardFrame {
    pub fn new(card: &Card, effects: Vec<StyleDescriptor>) -> Self {
        Self {
            image: ImageLayer {
                z_index: Z_IMAGE,
                url: card.image_url.clone(),
            },
            effects,
            overlay: TextOverlay {
                z_index: Z_OVERLAY,
                title: card.title.clone(),
                description: card.description.clone(),
                rarity: card.rarity,
                badge_label: card.rarity.label(),
                badge_color: card.rarity.badge_color(),
            },
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/card.rs"]
mod tests;
