use serde::{Deserialize, Serialize};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Axis-aligned rectangle enclosing the full visual footprint of a node set.
///
/// Computed fresh for each snapshot; it carries no identity beyond one call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge in graph space.
    pub min_x: f64,
    /// Top edge in graph space.
    pub min_y: f64,
    /// Horizontal extent, `>= 0`.
    pub width: f64,
    /// Vertical extent, `>= 0`.
    pub height: f64,
}

impl Bounds {
    /// Build bounds from a [`Rect`], normalizing flipped edges.
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs();
        Self {
            min_x: r.x0,
            min_y: r.y0,
            width: r.width(),
            height: r.height(),
        }
    }

    /// Graph-space rectangle covered by these bounds.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.min_x,
            self.min_y,
            self.min_x + self.width,
            self.min_y + self.height,
        )
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    /// `true` when every component is finite and both extents are non-negative.
    pub fn is_well_defined(self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Straight-alpha RGBA8 colour.
///
/// Deserializes from `"#RRGGBB"`, `"#RRGGBBAA"`, `"#RGB"`, `[r, g, b]` / `[r, g, b, a]` bytes, or
/// `{ "r": .., "g": .., "b": .., "a": .. }` bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba8 {
    /// Opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Colour with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with alpha scaled by `factor` (clamped to `0..=1`).
    pub fn with_alpha_mul(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parse a `#`-prefixed (or bare) hex colour.
    pub fn parse_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(format!("invalid hex color \"{s}\""));
        }

        fn hex_byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            3 => {
                let mut out = [0u8; 3];
                for (i, ch) in s.chars().enumerate() {
                    let nib = ch
                        .to_digit(16)
                        .ok_or_else(|| format!("invalid hex digit '{ch}'"))?
                        as u8;
                    out[i] = nib * 17;
                }
                Ok(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Self::rgb(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            8 => Ok(Self::rgba(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
                hex_byte(&s[6..8])?,
            )),
            _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
        }
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Rgba8::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Rgba8::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Serde adapter accepting a point as `[x, y]` or `{ "x": .., "y": .. }`.
pub(crate) mod point_repr {
    use super::Point;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(p: &Point, s: S) -> Result<S::Ok, S::Error> {
        [p.x, p.y].serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Point, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(d)? {
            Repr::Arr([x, y]) | Repr::Obj { x, y } => Ok(Point::new(x, y)),
        }
    }
}

/// Serde adapter accepting a size as `[w, h]` or `{ "width": .., "height": .. }`.
pub(crate) mod size_repr {
    use super::Size;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(sz: &Size, s: S) -> Result<S::Ok, S::Error> {
        [sz.width, sz.height].serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Size, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { width: f64, height: f64 },
        }

        match Repr::deserialize(d)? {
            Repr::Arr([width, height]) | Repr::Obj { width, height } => {
                Ok(Size::new(width, height))
            }
        }
    }
}

/// Serde adapter for a [`Vec2`] written as `[x, y]` or `{ "x": .., "y": .. }`.
pub(crate) mod vec2_repr {
    use super::Vec2;
    use serde::{Deserializer, Serialize, Serializer};

    pub(crate) fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        [v.x, v.y].serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        super::point_repr::deserialize(d).map(|p| p.to_vec2())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
