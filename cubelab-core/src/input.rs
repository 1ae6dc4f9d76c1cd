/// Keyboard commands shared by every frontend

/// A key that changes the rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
}

impl Key {
    /// Decode a legacy DOM `keyCode`.
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(Self::Left),
            38 => Some(Self::Up),
            39 => Some(Self::Right),
            40 => Some(Self::Down),
            32 => Some(Self::Space),
            _ => None,
        }
    }

    /// Decode a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Self::Left),
            "ArrowUp" | "Up" => Some(Self::Up),
            "ArrowRight" | "Right" => Some(Self::Right),
            "ArrowDown" | "Down" => Some(Self::Down),
            " " | "Spacebar" => Some(Self::Space),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(37), Some(Key::Left));
        assert_eq!(Key::from_key_code(38), Some(Key::Up));
        assert_eq!(Key::from_key_code(39), Some(Key::Right));
        assert_eq!(Key::from_key_code(40), Some(Key::Down));
        assert_eq!(Key::from_key_code(32), Some(Key::Space));
        assert_eq!(Key::from_key_code(65), None);
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(Key::from_dom_key("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_dom_key(" "), Some(Key::Space));
        assert_eq!(Key::from_dom_key("Enter"), None);
    }
}
