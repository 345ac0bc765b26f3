//! Mapping from a byte frequency spectrum to per-point displacement and colour.

use crate::constants::*;

/// Colour in hue/saturation/lightness, every channel in `[0, 1]` (hue in `[0, 1)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const REST: Hsl = Hsl {
        h: REST_HUE,
        s: REST_SATURATION,
        l: REST_LIGHTNESS,
    };

    /// Build a colour, wrapping hue into `[0, 1)` and clamping the rest.
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: wrap_unit(h),
            s: s.clamp(0.0, 1.0),
            l: l.clamp(0.0, 1.0),
        }
    }

    /// Convert to RGB in `[0, 1]` using the standard HSL model.
    pub fn to_rgb(self) -> [f32; 3] {
        if self.s <= 0.0 {
            return [self.l, self.l, self.l];
        }
        let q = if self.l <= 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;
        [
            hue_to_channel(p, q, self.h + 1.0 / 3.0),
            hue_to_channel(p, q, self.h),
            hue_to_channel(p, q, self.h - 1.0 / 3.0),
        ]
    }
}

#[inline]
fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Wrap into `[0, 1)`. Non-finite input collapses to 0.
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }
    let w = x.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Read-only view of one analyser frame. Borrowed for a single update only.
#[derive(Clone, Copy, Debug)]
pub struct SpectrumSnapshot<'a> {
    bins: &'a [u8],
}

impl<'a> SpectrumSnapshot<'a> {
    /// Returns `None` for an empty buffer; there is nothing to map from.
    pub fn new(bins: &'a [u8]) -> Option<Self> {
        (!bins.is_empty()).then_some(Self { bins })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    #[inline]
    pub fn bins(&self) -> &'a [u8] {
        self.bins
    }
}

/// Tuning for the spectrum → (factor, colour) mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct MapperParams {
    /// Displacement gain for bins at or above `bass_cutoff`.
    pub gain: f32,
    /// Gain for bins below `bass_cutoff`.
    pub bass_gain: f32,
    /// Number of low bins that use `bass_gain`; 0 disables the emphasis.
    pub bass_cutoff: usize,
    pub color_shift: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub lightness_boost: f32,
}

impl Default for MapperParams {
    fn default() -> Self {
        Self {
            gain: DEFAULT_GAIN,
            bass_gain: DEFAULT_BASS_GAIN,
            bass_cutoff: DEFAULT_BASS_CUTOFF,
            color_shift: DEFAULT_COLOR_SHIFT,
            saturation: DEFAULT_SATURATION,
            lightness: DEFAULT_LIGHTNESS,
            lightness_boost: DEFAULT_LIGHTNESS_BOOST,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpectrumMapper {
    pub params: MapperParams,
}

impl SpectrumMapper {
    pub fn new(params: MapperParams) -> Self {
        Self { params }
    }

    /// Map point `point_index` against `spectrum`.
    ///
    /// Points alias onto bins modulo the spectrum length, so with more points
    /// than bins whole bands move together. The returned factor is always
    /// finite and `>= 1.0`: a silent bin leaves the point on the rest sphere.
    #[inline]
    pub fn map_index(&self, point_index: usize, spectrum: &SpectrumSnapshot<'_>) -> (f32, Hsl) {
        let len = spectrum.len();
        let bin = point_index % len;
        let amplitude = spectrum.bins[bin] as f32 / 255.0;
        let p = &self.params;
        let gain = if bin < p.bass_cutoff { p.bass_gain } else { p.gain };
        let factor = amplitude * gain + 1.0;
        let factor = if factor.is_finite() { factor.max(1.0) } else { 1.0 };

        let hue = bin as f32 / len as f32 + amplitude * p.color_shift;
        let color = Hsl::new(hue, p.saturation, p.lightness + amplitude * p.lightness_boost);
        (factor, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_unit_handles_edges() {
        assert_eq!(wrap_unit(1.0), 0.0);
        assert_eq!(wrap_unit(f32::NAN), 0.0);
        assert!(wrap_unit(-1e-9) < 1.0);
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn grey_has_equal_channels() {
        let rgb = Hsl::new(0.3, 0.0, 0.4).to_rgb();
        assert_eq!(rgb, [0.4, 0.4, 0.4]);
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        assert!(SpectrumSnapshot::new(&[]).is_none());
    }
}
