/// Keyboard shortcuts on the results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Un-flip the current card.
    Escape,
    ArrowLeft,
    ArrowRight,
    /// Flip the current card.
    Space,
}

impl Key {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "escape" | "esc" => Some(Key::Escape),
            "left" | "arrowleft" => Some(Key::ArrowLeft),
            "right" | "arrowright" => Some(Key::ArrowRight),
            "space" | " " => Some(Key::Space),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Key::parse("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::parse("right"), Some(Key::ArrowRight));
        assert_eq!(Key::parse("Esc"), Some(Key::Escape));
        assert_eq!(Key::parse("space"), Some(Key::Space));
        assert_eq!(Key::parse("enter"), None);
    }
}
