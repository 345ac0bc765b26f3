// Host-side tests for display-name derivation.

use sphere_core::constants::PLACEHOLDER_LABEL;
use sphere_core::{display_name_or_placeholder, percent_decode, resolve_display_name};

const SRC: &str = "https://api.example.com/api/dj.php";

#[test]
fn decodes_and_strips_extension() {
    let name = resolve_display_name(
        "https://cdn.example.com/mp3/2024/%E5%A4%9C%E6%9B%B2.mp3?sign=abc",
        SRC,
    )
    .unwrap();
    assert_eq!(name, "夜曲");
}

#[test]
fn keeps_inner_dots() {
    let name = resolve_display_name("https://h/a/DJ.Mix.Vol.2.m4a", SRC).unwrap();
    assert_eq!(name, "DJ.Mix.Vol.2");
}

#[test]
fn name_without_extension_is_kept() {
    assert_eq!(
        resolve_display_name("https://h/tracks/Sunrise", SRC).unwrap(),
        "Sunrise"
    );
}

#[test]
fn trailing_slash_uses_last_non_empty_segment() {
    assert_eq!(
        resolve_display_name("https://h/tracks/Sunrise.ogg/", SRC).unwrap(),
        "Sunrise"
    );
}

#[test]
fn endpoint_like_names_fall_back() {
    for url in [
        "https://api.example.com/api/dj.php?t=1",
        "https://other.example.com/stream.aspx",
        "https://other.example.com/cgi/get.CGI",
        "https://api.example.com/",
    ] {
        assert!(resolve_display_name(url, SRC).is_err(), "{url}");
        assert_eq!(display_name_or_placeholder(Some(url), SRC), PLACEHOLDER_LABEL);
    }
}

#[test]
fn source_without_extension_is_recognised() {
    let src = "https://tracks.example.org/random";
    assert!(resolve_display_name("https://tracks.example.org/random?t=9", src).is_err());
}

#[test]
fn bad_escapes_fall_back() {
    assert!(percent_decode("bad%2").is_err());
    assert!(percent_decode("bad%zz").is_err());
    assert!(percent_decode("%ff%fe").is_err());
    assert_eq!(
        display_name_or_placeholder(Some("https://h/x/bad%zz.mp3"), SRC),
        PLACEHOLDER_LABEL
    );
}

#[test]
fn missing_url_uses_placeholder() {
    assert_eq!(display_name_or_placeholder(None, SRC), PLACEHOLDER_LABEL);
}

#[test]
fn percent_decode_keeps_plus_literal() {
    assert_eq!(percent_decode("a+b%20c").unwrap(), "a+b c");
    assert_eq!(percent_decode("plain").unwrap(), "plain");
}

#[test]
fn plus_in_file_name_survives() {
    assert_eq!(
        resolve_display_name("https://cdn.example.com/music/A+B.mp3", SRC).unwrap(),
        "A+B"
    );
    assert_eq!(
        resolve_display_name("https://cdn.example.com/music/C%2B%2B+Beats.mp3", SRC).unwrap(),
        "C+++Beats"
    );
}
