#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Start playback, or retry after a failure.
    Start,
    Next,
    ToggleHud,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" | " " => Some(KeyAction::Start),
        "n" | "N" | "ArrowRight" => Some(KeyAction::Next),
        "h" | "H" => Some(KeyAction::ToggleHud),
        _ => None,
    }
}
