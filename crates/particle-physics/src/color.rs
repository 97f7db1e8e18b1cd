//! Particle color palette

use glam::Vec3;

/// Particle color, an index into the fixed 6-color palette.
///
/// The palette size is fixed even when a simulation uses fewer colors; the
/// attraction matrix is always `COUNT`×`COUNT`.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red = 0,
    Green = 1,
    Blue = 2,
    Cyan = 3,
    Magenta = 4,
    Yellow = 5,
}

impl Color {
    /// Number of palette entries (the `totalColors` ceiling).
    pub const COUNT: usize = 6;

    /// All palette entries in index order.
    pub const ALL: [Color; Color::COUNT] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Cyan,
        Color::Magenta,
        Color::Yellow,
    ];

    /// Look up a color by palette index.
    pub fn from_index(index: usize) -> Option<Color> {
        Color::ALL.get(index).copied()
    }

    /// Palette index of this color.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display color as RGB in [0, 1].
    pub fn rgb(self) -> Vec3 {
        match self {
            Color::Red => Vec3::new(1.0, 0.0, 0.0),
            Color::Green => Vec3::new(0.0, 1.0, 0.0),
            Color::Blue => Vec3::new(0.0, 0.0, 1.0),
            Color::Cyan => Vec3::new(0.0, 1.0, 1.0),
            Color::Magenta => Vec3::new(1.0, 0.0, 1.0),
            Color::Yellow => Vec3::new(1.0, 1.0, 0.0),
        }
    }

    /// Next color in cyclic palette order.
    pub fn next(self) -> Color {
        Color::ALL[(self.index() + 1) % Color::COUNT]
    }

    /// Previous color in cyclic palette order.
    pub fn prev(self) -> Color {
        Color::ALL[(self.index() + Color::COUNT - 1) % Color::COUNT]
    }
}
