//! Warm colour ramp used to tint ranking rows.
//!
//! The ramp runs from purple at `0.0` through magenta and orange to a
//! yellow-green at `1.0`, following a long cubehelix path.

use std::fmt;

/// An 8-bit sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Build a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Cubehelix colour in degrees, saturation and lightness.
#[derive(Debug, Clone, Copy)]
struct Cubehelix {
    h: f64,
    s: f64,
    l: f64,
}

const START: Cubehelix = Cubehelix {
    h: -100.0,
    s: 0.75,
    l: 0.35,
};

const END: Cubehelix = Cubehelix {
    h: 80.0,
    s: 1.50,
    l: 0.8,
};

const A: f64 = -0.148_61;
const B: f64 = 1.782_77;
const C: f64 = -0.292_27;
const D: f64 = -0.906_49;
const E: f64 = 1.972_94;

/// Sample the warm ramp at `t`.
///
/// `t` is clamped to `[0, 1]`; `NaN` samples the cold end.
///
/// ```
/// use spiky_view::ramp::{Rgb, warm_ramp};
///
/// assert_eq!(warm_ramp(0.0), Rgb::new(110, 64, 170));
/// assert_eq!(warm_ramp(1.0).to_string(), "rgb(175, 240, 91)");
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "colour interpolation is inherently floating point"
)]
pub fn warm_ramp(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let lerp = |from: f64, to: f64| from + t * (to - from);
    to_rgb(Cubehelix {
        h: lerp(START.h, END.h),
        s: lerp(START.s, END.s),
        l: lerp(START.l, END.l),
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "cubehelix to RGB conversion is inherently floating point"
)]
fn to_rgb(colour: Cubehelix) -> Rgb {
    let h = (colour.h + 120.0).to_radians();
    let l = colour.l;
    let a = colour.s * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();
    Rgb {
        r: channel(l + a * (A * cos_h + B * sin_h)),
        g: channel(l + a * (C * cos_h + D * sin_h)),
        b: channel(l + a * (E * cos_h)),
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to the u8 range before the cast"
)]
fn channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}
