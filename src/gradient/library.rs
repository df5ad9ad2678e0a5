use smallvec::SmallVec;

use crate::animation::lerp::{FlagBlend, Lerp};
use crate::foundation::error::{FieldError, FieldResult};
use crate::foundation::math::round_half_up;
use crate::gradient::color::Rgb;
use crate::gradient::profile::{ColorStop, GradientProfile, builtin_profiles, sample_stops};

/// Upper bound on stops in the editable custom gradient.
pub const MAX_CUSTOM_STOPS: usize = 10;
/// Lower bound kept by stop deletion.
pub const MIN_CUSTOM_STOPS: usize = 2;
/// Custom stop positions are authored on `0..=100`.
pub const CUSTOM_POSITION_SCALE: f64 = 100.0;

type StopVec = SmallVec<[ColorStop; MAX_CUSTOM_STOPS]>;

/// Which gradient colors the field.
///
/// Serialized as the profile index, or the string `"custom"` for the live custom gradient.
/// Engine-saved timelines write the custom selection as the first index past the profile list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileSelection {
    /// A listed profile (built-in or saved), by index into [`GradientLibrary::profiles`].
    Profile(usize),
    /// The live, editable custom gradient.
    Custom,
}

impl Default for ProfileSelection {
    fn default() -> Self {
        Self::Profile(0)
    }
}

impl ProfileSelection {
    /// Blend two selections at eased fraction `t`.
    ///
    /// Two listed profiles blend their index like any integer field; anything involving the
    /// custom gradient is a discrete switch governed by `flags`.
    pub fn blend(a: Self, b: Self, t: f64, flags: FlagBlend) -> Self {
        match (a, b) {
            (Self::Profile(x), Self::Profile(y)) => {
                let idx = <f64 as Lerp>::lerp(&(x as f64), &(y as f64), t);
                Self::Profile(round_half_up(idx).max(0.0) as usize)
            }
            _ => flags.pick(a, b, t),
        }
    }
}

impl serde::Serialize for ProfileSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Profile(idx) => serializer.serialize_u64(*idx as u64),
            Self::Custom => serializer.serialize_str("custom"),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ProfileSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Index(f64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Index(v) if v.is_finite() => {
                Ok(Self::Profile(round_half_up(v).max(0.0) as usize))
            }
            Repr::Index(_) => Err(serde::de::Error::custom("colorProfile must be finite")),
            Repr::Name(s) if s == "custom" => Ok(Self::Custom),
            Repr::Name(s) => Err(serde::de::Error::custom(format!(
                "colorProfile must be an index or \"custom\", got \"{s}\""
            ))),
        }
    }
}

/// One stop of the custom gradient, positioned on the `0..=100` authoring scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomStop {
    /// Position in `0..=100`.
    pub position: f64,
    /// Stop color.
    pub color: Rgb,
}

/// The single mutable gradient, edited stop by stop.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomGradient {
    stops: SmallVec<[CustomStop; MAX_CUSTOM_STOPS]>,
    selected: Option<usize>,
}

impl Default for CustomGradient {
    fn default() -> Self {
        let mut stops = SmallVec::new();
        stops.push(CustomStop {
            position: 0.0,
            color: Rgb::from_hex(0x00ff88),
        });
        stops.push(CustomStop {
            position: 100.0,
            color: Rgb::from_hex(0x0088ff),
        });
        Self {
            stops,
            selected: Some(0),
        }
    }
}

impl CustomGradient {
    /// Stops in insertion order (not necessarily sorted).
    pub fn stops(&self) -> &[CustomStop] {
        &self.stops
    }

    /// Index of the selected stop, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Select the stop at `idx`.
    pub fn select(&mut self, idx: usize) -> FieldResult<()> {
        self.check_index(idx)?;
        self.selected = Some(idx);
        Ok(())
    }

    /// Append a white stop at position 50 and select it.
    pub fn add_stop(&mut self) -> FieldResult<usize> {
        if self.stops.len() >= MAX_CUSTOM_STOPS {
            return Err(FieldError::invariant(format!(
                "custom gradient allows at most {MAX_CUSTOM_STOPS} stops"
            )));
        }
        self.stops.push(CustomStop {
            position: 50.0,
            color: Rgb::WHITE,
        });
        let idx = self.stops.len() - 1;
        self.selected = Some(idx);
        Ok(idx)
    }

    /// Remove the stop at `idx`; the selection moves to the nearest remaining stop.
    pub fn remove_stop(&mut self, idx: usize) -> FieldResult<CustomStop> {
        self.check_index(idx)?;
        if self.stops.len() <= MIN_CUSTOM_STOPS {
            return Err(FieldError::invariant(format!(
                "custom gradient requires at least {MIN_CUSTOM_STOPS} stops"
            )));
        }
        let removed = self.stops.remove(idx);
        self.selected = self.selected.map(|sel| sel.min(self.stops.len() - 1));
        Ok(removed)
    }

    /// Move stop `idx`; the position is rounded and clamped to `0..=100`.
    pub fn set_position(&mut self, idx: usize, position: f64) -> FieldResult<()> {
        self.check_index(idx)?;
        if !position.is_finite() {
            return Err(FieldError::validation("stop position must be finite"));
        }
        self.stops[idx].position = round_half_up(position).clamp(0.0, CUSTOM_POSITION_SCALE);
        Ok(())
    }

    /// Recolor stop `idx`.
    pub fn set_color(&mut self, idx: usize, color: Rgb) -> FieldResult<()> {
        self.check_index(idx)?;
        self.stops[idx].color = color;
        Ok(())
    }

    fn check_index(&self, idx: usize) -> FieldResult<()> {
        if idx >= self.stops.len() {
            return Err(FieldError::invariant(format!(
                "custom stop index {idx} out of range (len {})",
                self.stops.len()
            )));
        }
        Ok(())
    }

    fn normalized_stops(&self) -> StopVec {
        let mut out: StopVec = self
            .stops
            .iter()
            .map(|s| ColorStop::new(s.position / CUSTOM_POSITION_SCALE, s.color))
            .collect();
        out.sort_by(|a, b| a.position.total_cmp(&b.position));
        out
    }
}

/// Built-in profiles, saved presets, and the live custom gradient.
#[derive(Clone, Debug)]
pub struct GradientLibrary {
    profiles: Vec<GradientProfile>,
    builtin_count: usize,
    custom: CustomGradient,
}

impl Default for GradientLibrary {
    fn default() -> Self {
        let profiles = builtin_profiles();
        Self {
            builtin_count: profiles.len(),
            profiles,
            custom: CustomGradient::default(),
        }
    }
}

impl GradientLibrary {
    /// All listed profiles: built-ins first, then saved presets.
    pub fn profiles(&self) -> &[GradientProfile] {
        &self.profiles
    }

    /// Number of built-in profiles at the head of [`Self::profiles`].
    pub fn builtin_count(&self) -> usize {
        self.builtin_count
    }

    /// Saved (user-created) profiles.
    pub fn saved_profiles(&self) -> &[GradientProfile] {
        &self.profiles[self.builtin_count..]
    }

    /// The live custom gradient.
    pub fn custom(&self) -> &CustomGradient {
        &self.custom
    }

    /// Mutable access to the live custom gradient.
    pub fn custom_mut(&mut self) -> &mut CustomGradient {
        &mut self.custom
    }

    /// Snapshot the custom gradient into a new named profile and return its selection.
    pub fn save_custom(&mut self, name: &str) -> FieldResult<ProfileSelection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FieldError::validation("preset name must be non-empty"));
        }
        let profile = GradientProfile::new(name, self.custom.normalized_stops().into_vec())?;
        Ok(self.push_saved(profile))
    }

    /// Append an already-built profile as a saved preset.
    pub fn push_saved(&mut self, profile: GradientProfile) -> ProfileSelection {
        tracing::debug!(name = profile.name(), "saved gradient preset");
        self.profiles.push(profile);
        ProfileSelection::Profile(self.profiles.len() - 1)
    }

    /// Delete a saved preset. Built-ins and the custom gradient cannot be deleted.
    pub fn delete_saved(&mut self, selection: ProfileSelection) -> FieldResult<GradientProfile> {
        let ProfileSelection::Profile(idx) = selection else {
            return Err(FieldError::invariant("the custom gradient cannot be deleted"));
        };
        if idx < self.builtin_count {
            return Err(FieldError::invariant(format!(
                "built-in profile {idx} cannot be deleted"
            )));
        }
        if idx >= self.profiles.len() {
            return Err(FieldError::invariant(format!(
                "profile index {idx} out of range"
            )));
        }
        let removed = self.profiles.remove(idx);
        tracing::debug!(name = removed.name(), "deleted gradient preset");
        Ok(removed)
    }

    /// Resolve a selection into an immutable mapper for this tick.
    ///
    /// An index past the end of the profile list resolves to the custom gradient, which is how
    /// older documents encoded the custom selection.
    pub fn mapper(&self, selection: ProfileSelection) -> GradientMapper {
        let stops = match selection {
            ProfileSelection::Profile(idx) if idx < self.profiles.len() => {
                self.profiles[idx].stops().iter().copied().collect()
            }
            ProfileSelection::Profile(_) | ProfileSelection::Custom => {
                self.custom.normalized_stops()
            }
        };
        GradientMapper { stops }
    }
}

/// Sorted, normalized stop list resolved once per tick and sampled per point.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientMapper {
    stops: StopVec,
}

impl GradientMapper {
    /// Mapper over explicit stops (sorted here).
    pub fn from_stops(stops: impl IntoIterator<Item = ColorStop>) -> Self {
        let mut stops: StopVec = stops.into_iter().collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// Resolved stops.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for normalized value `t`.
    pub fn color_at(&self, t: f64) -> Rgb {
        sample_stops(&self.stops, t)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gradient/library.rs"]
mod tests;
