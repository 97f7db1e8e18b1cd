//! Per-color-pair attraction coefficients

use crate::color::Color;
use std::fmt;

/// Square matrix of signed attraction coefficients, one per color pair.
///
/// `get(target, source)` is the coefficient applied to a `target`-colored
/// particle due to a `source`-colored neighbor: positive pulls, negative
/// pushes. Coefficients live in `[-1, 1]`. The matrix is always full palette
/// size regardless of how many colors a simulation actually uses.
///
/// The matrix is mutated only between steps; the kernel snapshots it at step
/// entry and treats it as read-only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttractionMatrix {
    values: [f32; Color::COUNT * Color::COUNT],
}

impl AttractionMatrix {
    /// All-zero matrix: no interaction beyond the repulsive core.
    pub fn zero() -> Self {
        Self {
            values: [0.0; Color::COUNT * Color::COUNT],
        }
    }

    /// Each color attracts only itself.
    pub fn identity() -> Self {
        let mut m = Self::zero();
        for color in Color::ALL {
            m.set(color, color, 1.0);
        }
        m
    }

    /// Each color attracts itself and repels every other color.
    pub fn exclusive() -> Self {
        let mut m = Self::fill(-1.0);
        for color in Color::ALL {
            m.set(color, color, 1.0);
        }
        m
    }

    /// Cyclic chain over the first `color_count` colors: self-attraction,
    /// mild attraction to both cyclic neighbors, repulsion otherwise.
    pub fn chain(color_count: usize) -> Self {
        let mut m = Self::zero();
        for i in 0..color_count {
            let prev = (i + color_count - 1) % color_count;
            let next = (i + 1) % color_count;
            for j in 0..color_count {
                let value = if i == j {
                    1.0
                } else if j == prev || j == next {
                    0.2
                } else {
                    -1.0
                };
                m.values[i * Color::COUNT + j] = value;
            }
        }
        m
    }

    /// One-directional chain: each color chases its cyclic successor.
    pub fn snake(color_count: usize) -> Self {
        let mut m = Self::zero();
        for i in 0..color_count {
            let next = (i + 1) % color_count;
            m.values[i * Color::COUNT + i] = 1.0;
            m.values[i * Color::COUNT + next] = 0.2;
        }
        m
    }

    /// Faint self-attraction only: colors condense into broad loose areas
    /// instead of tight clusters.
    pub fn area() -> Self {
        let mut m = Self::zero();
        for color in Color::ALL {
            m.set(color, color, 0.1);
        }
        m
    }

    /// Matrix with every cell set to `value`.
    pub fn fill(value: f32) -> Self {
        Self {
            values: [value; Color::COUNT * Color::COUNT],
        }
    }

    /// Coefficient applied to `target` particles due to `source` neighbors.
    #[inline]
    pub fn get(&self, target: Color, source: Color) -> f32 {
        self.values[target.index() * Color::COUNT + source.index()]
    }

    /// Raw-index variant for the kernel's hot loop.
    #[inline]
    pub fn get_raw(&self, target: usize, source: usize) -> f32 {
        debug_assert!(target < Color::COUNT && source < Color::COUNT);
        self.values[target * Color::COUNT + source]
    }

    pub fn set(&mut self, target: Color, source: Color, value: f32) {
        self.values[target.index() * Color::COUNT + source.index()] = value;
    }

    /// Rewrite every cell through `f(target, source, value)`.
    pub fn modify(&mut self, mut f: impl FnMut(Color, Color, f32) -> f32) {
        for target in Color::ALL {
            for source in Color::ALL {
                self.set(target, source, f(target, source, self.get(target, source)));
            }
        }
    }
}

impl Default for AttractionMatrix {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for AttractionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for target in Color::ALL {
            for source in Color::ALL {
                write!(f, "{:+.1} ", self.get(target, source))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_preset() {
        let m = AttractionMatrix::identity();
        for a in Color::ALL {
            for b in Color::ALL {
                let expected = if a == b { 1.0 } else { 0.0 };
                assert_eq!(m.get(a, b), expected);
            }
        }
    }

    #[test]
    fn test_exclusive_preset() {
        let m = AttractionMatrix::exclusive();
        assert_eq!(m.get(Color::Red, Color::Red), 1.0);
        assert_eq!(m.get(Color::Red, Color::Blue), -1.0);
    }

    #[test]
    fn test_chain_preset_wraps_neighbors() {
        let m = AttractionMatrix::chain(3);
        assert_eq!(m.get(Color::Red, Color::Red), 1.0);
        assert_eq!(m.get(Color::Red, Color::Green), 0.2);
        // Blue is red's cyclic predecessor when three colors are active.
        assert_eq!(m.get(Color::Red, Color::Blue), 0.2);
        // Inactive colors stay zero.
        assert_eq!(m.get(Color::Red, Color::Cyan), 0.0);
        assert_eq!(m.get(Color::Cyan, Color::Cyan), 0.0);
    }

    #[test]
    fn test_snake_preset_is_one_directional() {
        let m = AttractionMatrix::snake(4);
        assert_eq!(m.get(Color::Red, Color::Green), 0.2);
        assert_eq!(m.get(Color::Green, Color::Red), 0.0);
        assert_eq!(m.get(Color::Cyan, Color::Red), 0.2);
    }

    #[test]
    fn test_area_preset_is_faint_identity() {
        let m = AttractionMatrix::area();
        for a in Color::ALL {
            for b in Color::ALL {
                let expected = if a == b { 0.1 } else { 0.0 };
                assert_eq!(m.get(a, b), expected);
            }
        }
    }

    #[test]
    fn test_modify_and_display() {
        let mut m = AttractionMatrix::zero();
        m.modify(|t, s, _| if t == s { -1.0 } else { 0.5 });
        assert_eq!(m.get(Color::Blue, Color::Blue), -1.0);
        assert_eq!(m.get(Color::Blue, Color::Red), 0.5);
        let dump = m.to_string();
        assert_eq!(dump.lines().count(), Color::COUNT);
        assert!(dump.starts_with("-1.0 +0.5"));
    }
}
