//! Surface appearance of the scene's entities.

/// An sRGB colour as authored (0..1 per channel).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Builds a colour from a `0xRRGGBB` literal.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Converts to linear RGB for shading.
    pub fn to_linear(self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

/// Phong material used by the floating bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub specular: Color,
    pub opacity: f32,
    pub shininess: f32,
}

impl Material {
    pub fn phong(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            specular: Color::from_hex(0x111111),
            opacity: 0.7,
            shininess: 100.0,
        }
    }

    /// Blue, violet and teal body materials.
    pub fn palette() -> Vec<Material> {
        vec![
            Material::phong(0x2563eb),
            Material::phong(0x7c3aed),
            Material::phong(0x06d6a0),
        ]
    }
}

/// Appearance of the particle field's point sprites.
#[derive(Debug, Clone, PartialEq)]
pub struct PointMaterial {
    pub color: Color,
    /// Sprite size in world units; shrinks with distance.
    pub size: f32,
    pub opacity: f32,
}

impl Default for PointMaterial {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x2563eb),
            size: 0.05,
            opacity: 0.8,
        }
    }
}

/// Unlit edge-only material for the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct WireMaterial {
    pub color: Color,
    pub opacity: f32,
}

impl Default for WireMaterial {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0x2563eb),
            opacity: 0.3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x2563eb);
        assert!((c.r - 0x25 as f32 / 255.0).abs() < 1e-6);
        assert!((c.g - 0x63 as f32 / 255.0).abs() < 1e-6);
        assert!((c.b - 0xeb as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_conversion_keeps_endpoints() {
        assert_eq!(Color::WHITE.to_linear(), [1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0.0, 0.0, 0.0).to_linear(), [0.0, 0.0, 0.0]);
        let mid = Color::rgb(0.5, 0.5, 0.5).to_linear()[0];
        assert!(mid > 0.2 && mid < 0.25);
    }

    #[test]
    fn test_palette_has_three_translucent_materials() {
        let palette = Material::palette();
        assert_eq!(palette.len(), 3);
        assert!(palette.iter().all(|m| m.opacity == 0.7 && m.shininess == 100.0));
    }
}
