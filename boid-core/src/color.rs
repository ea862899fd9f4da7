/// Linear RGB color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Tint blended toward while a boid is attracted
pub const ATTRACTED_COLOR: Color = Color::from_hex(0xffff80);

/// Emissive glow at full attraction strength
pub const ATTRACTED_GLOW: Color = Color::from_hex(0x333300);

/// Fraction of the attraction strength used when blending toward [`ATTRACTED_COLOR`]
pub const HIGHLIGHT_BLEND: f32 = 0.7;

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Build a color from hue, saturation and lightness, all in `[0, 1]`
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let hue = hue.rem_euclid(1.0);
        let saturation = saturation.clamp(0.0, 1.0);
        let lightness = lightness.clamp(0.0, 1.0);

        if saturation == 0.0 {
            return Self::new(lightness, lightness, lightness);
        }

        let q = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let p = 2.0 * lightness - q;

        Self {
            r: hue_to_channel(p, q, hue + 1.0 / 3.0),
            g: hue_to_channel(p, q, hue),
            b: hue_to_channel(p, q, hue - 1.0 / 3.0),
        }
    }

    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn lerp(&self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_hex(0x1a8cff)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Presentation tint for a boid, derived from its attraction state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Highlight {
    pub color: Color,
    pub emissive: Color,
}

impl Highlight {
    /// Tint for `base` under an optional attraction strength.
    ///
    /// Without attraction the base color comes back untouched with no glow.
    pub fn new(base: Color, strength: Option<f32>) -> Self {
        match strength {
            Some(s) => Self {
                color: base.lerp(ATTRACTED_COLOR, s * HIGHLIGHT_BLEND),
                emissive: ATTRACTED_GLOW.scale(s),
            },
            None => Self {
                color: base,
                emissive: Color::BLACK,
            },
        }
    }
}
