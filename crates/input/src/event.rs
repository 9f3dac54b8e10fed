use glam::Vec2;

/// A key, reduced to what the toy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    /// A key that produced printable text. Case is preserved.
    Character(char),
    Other,
}

impl Key {
    /// Classify the text a key press produced.
    pub fn from_text(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), None) => Self::Space,
            (Some(c), None) => Self::Character(c),
            _ => Self::Other,
        }
    }
}

/// Window input the toy reacts to. Pointer positions are in pixels from
/// the top-left corner of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Resize { width: u32, height: u32 },
    PointerMove(Vec2),
    Click(Vec2),
    KeyDown(Key),
}
