// Host-side tests for configuration defaults and overrides.

use sphere_core::constants::*;
use sphere_core::{AppConfig, Error};

#[test]
#[allow(clippy::assertions_on_constants)]
fn defaults_are_within_reasonable_bounds() {
    let c = AppConfig::default();
    assert_eq!(c.sphere.point_count, DEFAULT_POINT_COUNT);
    assert!(c.sphere.radius > 0.0);
    assert!((120.0..=125.0).contains(&c.sphere.spiral_k));
    assert!(c.fft_size.is_power_of_two());
    assert!((MIN_FFT_SIZE..=MAX_FFT_SIZE).contains(&c.fft_size));
    assert!((1.2..=3.5).contains(&c.mapper.gain));
    assert!((0.0..=1.0).contains(&c.mapper.saturation));
    assert!((0.0..=1.0).contains(&c.mapper.lightness));
    assert!(RETRY_BASE_DELAY_MS <= RETRY_MAX_DELAY_MS);
    assert!(ORBIT_MIN_DISTANCE < ORBIT_MAX_DISTANCE);
    assert!(c.track.source_url.starts_with("https://"));
}

#[test]
fn valid_overrides_apply() {
    let mut c = AppConfig::default();
    c.apply_override("points", "1200").unwrap();
    c.apply_override("radius", " 80.5 ").unwrap();
    c.apply_override("gain", "1.2").unwrap();
    c.apply_override("bass_cutoff", "32").unwrap();
    c.apply_override("bass_gain", "3.5").unwrap();
    c.apply_override("fft", "512").unwrap();
    c.apply_override("src", "https://tracks.example.org/random").unwrap();
    c.apply_override("retries", "0").unwrap();
    assert_eq!(c.sphere.point_count, 1200);
    assert_eq!(c.sphere.radius, 80.5);
    assert_eq!(c.mapper.gain, 1.2);
    assert_eq!(c.mapper.bass_cutoff, 32);
    assert_eq!(c.mapper.bass_gain, 3.5);
    assert_eq!(c.fft_size, 512);
    assert_eq!(c.track.source_url, "https://tracks.example.org/random");
    assert_eq!(c.track.retry.max_auto_retries, 0);
}

#[test]
fn invalid_overrides_are_rejected_and_leave_config_unchanged() {
    let cases = [
        ("points", "many"),
        ("points", "999999999"),
        ("radius", "0"),
        ("radius", "NaN"),
        ("gain", "-1"),
        ("gain", "inf"),
        ("fft", "1000"),
        ("fft", "16"),
        ("fft", "65536"),
        ("src", "ftp://nope"),
        ("colour", "red"),
    ];
    for (k, v) in cases {
        let mut c = AppConfig::default();
        let err = c.apply_override(k, v).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }), "{k}={v}");
        assert_eq!(c, AppConfig::default(), "{k}={v} mutated config");
    }
}

#[test]
fn apply_overrides_skips_bad_pairs() {
    let mut c = AppConfig::default();
    c.apply_overrides([("points", "10"), ("fft", "3"), ("gain", "3")]);
    assert_eq!(c.sphere.point_count, 10);
    assert_eq!(c.fft_size, DEFAULT_FFT_SIZE);
    assert_eq!(c.mapper.gain, 3.0);
}

#[test]
fn every_advertised_key_is_understood() {
    for key in AppConfig::OVERRIDE_KEYS {
        let mut c = AppConfig::default();
        if let Err(Error::InvalidConfig { reason, .. }) = c.apply_override(key, "???") {
            assert_ne!(reason, "unknown key", "{key} advertised but not handled");
        }
    }
}
