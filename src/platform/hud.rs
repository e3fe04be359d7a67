//! DOM overlay class strings
//!
//! Overlay elements keep their layout class and toggle `hidden` on top of it.

/// Class shown when hidden; `index.html` styles it `display: none`
pub const HIDDEN_CLASS: &str = "hidden";

/// Full `class` attribute for an element with `base` styling
pub fn hud_class(base: &str, visible: bool) -> String {
    match (base.is_empty(), visible) {
        (_, true) => base.to_string(),
        (true, false) => HIDDEN_CLASS.to_string(),
        (false, false) => format!("{} {}", base, HIDDEN_CLASS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_keeps_layout_class() {
        assert_eq!(hud_class("overlay", true), "overlay");
        assert_eq!(hud_class("purple", true), "purple");
    }

    #[test]
    fn test_hidden_adds_to_layout_class() {
        assert_eq!(hud_class("overlay", false), "overlay hidden");
        assert_eq!(hud_class("purple", false), "purple hidden");
    }

    #[test]
    fn test_unstyled_element() {
        assert_eq!(hud_class("", true), "");
        assert_eq!(hud_class("", false), "hidden");
    }
}
