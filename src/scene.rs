// JSON scene model: a tile's worth of label placement requests, in the order
// they compete for space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::placement::{GlyphBox, Point, Rect};

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scene has no labels")]
    Empty,
    #[error("label {label} has no glyph rects")]
    NoGlyphs { label: usize },
    #[error("label {label} has a non-finite coordinate")]
    NonFinite { label: usize },
    #[error("label {label}: minPlacementScale {min} exceeds maxPlacementScale {max}")]
    InvertedWindow { label: usize, min: f32, max: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub labels: Vec<LabelScene>,
}

/// One label's placement request. Fields left out of the JSON fall back to
/// the engine config defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelScene {
    #[serde(default)]
    pub name: Option<String>,
    pub anchor: (f32, f32),
    pub glyphs: Vec<GlyphScene>,
    /// Horizontal labels are merged into a single rigid box and circumscribed
    /// for rotation; curved labels keep one box per glyph.
    #[serde(default)]
    pub horizontal: bool,
    #[serde(default)]
    pub padding: Option<f32>,
    #[serde(default)]
    pub min_placement_scale: Option<f32>,
    #[serde(default)]
    pub max_placement_scale: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphScene {
    /// `[tl.x, tl.y, br.x, br.y]`, relative to the glyph's anchor.
    pub rect: [f32; 4],
    /// Per-glyph anchor for curved labels; defaults to the label anchor.
    #[serde(default)]
    pub anchor: Option<(f32, f32)>,
    #[serde(default)]
    pub min_scale: Option<f32>,
    #[serde(default)]
    pub max_scale: Option<f32>,
    #[serde(default)]
    pub rotate: bool,
}

pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let scene: Scene = serde_json::from_str(input)?;
    validate(&scene)?;
    Ok(scene)
}

fn validate(scene: &Scene) -> Result<(), SceneError> {
    if scene.labels.is_empty() {
        return Err(SceneError::Empty);
    }
    for (idx, label) in scene.labels.iter().enumerate() {
        if label.glyphs.is_empty() {
            return Err(SceneError::NoGlyphs { label: idx });
        }
        let mut coords = vec![label.anchor.0, label.anchor.1];
        for glyph in &label.glyphs {
            coords.extend(glyph.rect);
            if let Some((x, y)) = glyph.anchor {
                coords.push(x);
                coords.push(y);
            }
        }
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(SceneError::NonFinite { label: idx });
        }
        if let (Some(min), Some(max)) = (label.min_placement_scale, label.max_placement_scale) {
            if min > max {
                return Err(SceneError::InvertedWindow { label: idx, min, max });
            }
        }
    }
    Ok(())
}

impl LabelScene {
    pub fn anchor_point(&self) -> Point {
        Point::new(self.anchor.0, self.anchor.1)
    }

    pub fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.glyphs
            .iter()
            .map(|glyph| {
                let anchor = glyph.anchor.unwrap_or(self.anchor);
                let [x0, y0, x1, y1] = glyph.rect;
                let mut gb = GlyphBox::new(
                    Rect::new(Point::new(x0, y0), Point::new(x1, y1)),
                    Point::new(anchor.0, anchor.1),
                );
                if let Some(min) = glyph.min_scale {
                    gb.min_scale = min;
                }
                if let Some(max) = glyph.max_scale {
                    gb.max_scale = max;
                }
                gb.rotate = glyph.rotate;
                gb
            })
            .collect()
    }

    /// Scale window for this label, falling back to the config defaults.
    pub fn window(&self, config: &EngineConfig) -> (f32, f32) {
        (
            self.min_placement_scale
                .unwrap_or(config.default_min_placement_scale),
            self.max_placement_scale
                .unwrap_or(config.default_max_placement_scale),
        )
    }

    pub fn padding(&self, config: &EngineConfig) -> f32 {
        self.padding.unwrap_or(config.default_padding)
    }
}
