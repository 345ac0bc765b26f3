//! Startup configuration: compiled-in defaults, optionally overridden by
//! `key=value` pairs (the web front-end feeds it the page query string).

use crate::constants::*;
use crate::error::{Error, Result};
use crate::render_loop::SpinRate;
use crate::spectrum::MapperParams;
use crate::track::TrackConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct SphereConfig {
    pub point_count: usize,
    pub radius: f32,
    pub spiral_k: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            point_count: DEFAULT_POINT_COUNT,
            radius: DEFAULT_RADIUS,
            spiral_k: DEFAULT_SPIRAL_K,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub sphere: SphereConfig,
    pub mapper: MapperParams,
    pub spin: SpinRate,
    pub track: TrackConfig,
    pub fft_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sphere: SphereConfig::default(),
            mapper: MapperParams::default(),
            spin: SpinRate::default(),
            track: TrackConfig::default(),
            fft_size: DEFAULT_FFT_SIZE,
        }
    }
}

impl AppConfig {
    /// Keys understood by [`AppConfig::apply_override`].
    pub const OVERRIDE_KEYS: &'static [&'static str] = &[
        "points",
        "radius",
        "spiral",
        "gain",
        "bass_gain",
        "bass_cutoff",
        "color_shift",
        "fft",
        "src",
        "retries",
    ];

    /// Apply one override. On error the config is left unchanged.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let invalid = |reason| Error::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };
        match key {
            "points" => {
                let n: usize = value.parse().map_err(|_| invalid("not an integer"))?;
                if n > MAX_POINT_COUNT {
                    return Err(invalid("too many points"));
                }
                self.sphere.point_count = n;
            }
            "radius" => {
                let r = parse_finite(value).ok_or_else(|| invalid("not a number"))?;
                if r <= 0.0 {
                    return Err(invalid("must be positive"));
                }
                self.sphere.radius = r;
            }
            "spiral" => {
                self.sphere.spiral_k = parse_finite(value).ok_or_else(|| invalid("not a number"))?;
            }
            "gain" => {
                self.mapper.gain =
                    parse_gain(value).ok_or_else(|| invalid("need a finite gain >= 0"))?
            }
            "bass_gain" => {
                self.mapper.bass_gain =
                    parse_gain(value).ok_or_else(|| invalid("need a finite gain >= 0"))?
            }
            "bass_cutoff" => {
                self.mapper.bass_cutoff = value.parse().map_err(|_| invalid("not an integer"))?;
            }
            "color_shift" => {
                self.mapper.color_shift =
                    parse_finite(value).ok_or_else(|| invalid("not a number"))?;
            }
            "fft" => {
                let n: u32 = value.parse().map_err(|_| invalid("not an integer"))?;
                if !n.is_power_of_two() || !(MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&n) {
                    return Err(invalid("must be a power of two in 32..=32768"));
                }
                self.fft_size = n;
            }
            "src" => {
                if !(value.starts_with("https://") || value.starts_with("http://")) {
                    return Err(invalid("must be an http(s) URL"));
                }
                self.track.source_url = value.to_string();
            }
            "retries" => {
                self.track.retry.max_auto_retries =
                    value.parse().map_err(|_| invalid("not an integer"))?;
            }
            _ => return Err(invalid("unknown key")),
        }
        Ok(())
    }

    /// Apply every pair, logging and skipping the ones that do not parse.
    pub fn apply_overrides<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) {
        for (key, value) in pairs {
            match self.apply_override(key, value) {
                Ok(()) => log::info!("[config] {key}={value}"),
                Err(e) => log::warn!("[config] {e}"),
            }
        }
    }
}

fn parse_finite(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_gain(value: &str) -> Option<f32> {
    parse_finite(value).filter(|g| *g >= 0.0)
}
