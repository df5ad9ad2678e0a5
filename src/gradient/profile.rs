use crate::animation::lerp::Lerp;
use crate::foundation::error::{FieldError, FieldResult};
use crate::gradient::color::Rgb;

/// A color pinned at a normalized position in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorStop {
    /// Normalized position.
    pub position: f64,
    /// Color at `position`.
    pub color: Rgb,
}

impl ColorStop {
    /// Create a stop.
    pub const fn new(position: f64, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Named, immutable gradient made of stops sorted ascending by position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GradientProfileDef")]
pub struct GradientProfile {
    name: String,
    stops: Vec<ColorStop>,
}

#[derive(serde::Deserialize)]
struct GradientProfileDef {
    name: String,
    stops: Vec<ColorStop>,
}

impl TryFrom<GradientProfileDef> for GradientProfile {
    type Error = FieldError;

    fn try_from(def: GradientProfileDef) -> FieldResult<Self> {
        Self::new(def.name, def.stops)
    }
}

impl GradientProfile {
    /// Build a profile, sorting stops by position.
    ///
    /// Rejects an empty stop list and non-finite positions.
    pub fn new(name: impl Into<String>, mut stops: Vec<ColorStop>) -> FieldResult<Self> {
        let name = name.into();
        if stops.is_empty() {
            return Err(FieldError::invariant(format!(
                "gradient profile '{name}' must have at least one stop"
            )));
        }
        if stops.iter().any(|s| !s.position.is_finite()) {
            return Err(FieldError::validation(format!(
                "gradient profile '{name}' has a non-finite stop position"
            )));
        }
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(Self { name, stops })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stops, sorted ascending by position.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color at normalized position `t`.
    pub fn color_at(&self, t: f64) -> Rgb {
        sample_stops(&self.stops, t)
    }
}

/// Sample a sorted stop list at `t` (clamped to `[0, 1]`).
///
/// Empty lists yield white, single stops yield their own color everywhere, and positions
/// outside the first/last stop clamp to the edge colors.
pub fn sample_stops(stops: &[ColorStop], t: f64) -> Rgb {
    let (first, last) = match stops {
        [] => return Rgb::WHITE,
        [only] => return only.color,
        [first, .., last] => (first, last),
    };

    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t <= first.position {
        return first.color;
    }
    if t >= last.position {
        return last.color;
    }

    // first.position < t < last.position, so 1 <= idx <= len - 1 and span > 0.
    let idx = stops.partition_point(|s| s.position <= t);
    let a = &stops[idx - 1];
    let b = &stops[idx];
    let span = b.position - a.position;
    if span <= 0.0 {
        return b.color;
    }
    let local_t = (t - a.position) / span;
    Rgb::lerp(&a.color, &b.color, local_t)
}

const OCEAN: [ColorStop; 4] = [
    ColorStop::new(0.0, Rgb::from_hex(0x001133)),
    ColorStop::new(0.3, Rgb::from_hex(0x0066aa)),
    ColorStop::new(0.6, Rgb::from_hex(0x00aaff)),
    ColorStop::new(1.0, Rgb::from_hex(0x88ddff)),
];

const SUNSET: [ColorStop; 4] = [
    ColorStop::new(0.0, Rgb::from_hex(0x220033)),
    ColorStop::new(0.3, Rgb::from_hex(0xff4400)),
    ColorStop::new(0.6, Rgb::from_hex(0xffaa00)),
    ColorStop::new(1.0, Rgb::from_hex(0xffff44)),
];

const FOREST: [ColorStop; 4] = [
    ColorStop::new(0.0, Rgb::from_hex(0x001100)),
    ColorStop::new(0.3, Rgb::from_hex(0x006600)),
    ColorStop::new(0.6, Rgb::from_hex(0x00cc00)),
    ColorStop::new(1.0, Rgb::from_hex(0x88ff88)),
];

const NEON: [ColorStop; 5] = [
    ColorStop::new(0.0, Rgb::from_hex(0xff00ff)),
    ColorStop::new(0.25, Rgb::from_hex(0x00ffff)),
    ColorStop::new(0.5, Rgb::from_hex(0x00ff00)),
    ColorStop::new(0.75, Rgb::from_hex(0xffff00)),
    ColorStop::new(1.0, Rgb::from_hex(0xff00ff)),
];

const FIRE: [ColorStop; 4] = [
    ColorStop::new(0.0, Rgb::from_hex(0x330000)),
    ColorStop::new(0.3, Rgb::from_hex(0xff0000)),
    ColorStop::new(0.6, Rgb::from_hex(0xff6600)),
    ColorStop::new(1.0, Rgb::from_hex(0xffff00)),
];

/// The built-in profiles, in selection order.
pub fn builtin_profiles() -> Vec<GradientProfile> {
    [
        ("Ocean", &OCEAN[..]),
        ("Sunset", &SUNSET[..]),
        ("Forest", &FOREST[..]),
        ("Neon", &NEON[..]),
        ("Fire", &FIRE[..]),
    ]
    .into_iter()
    .map(|(name, stops)| GradientProfile {
        name: name.to_owned(),
        stops: stops.to_vec(),
    })
    .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/profile.rs"]
mod tests;
