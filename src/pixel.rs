use crate::Color;

/// A pixel that can be written to a strip.
pub trait Pixel {
    /// Packs the pixel into the driver's color layout.
    ///
    /// Always produce plain RGB(W) here; the wire order of the strip
    /// is applied by the driver.
    fn into_color(self) -> Color;
}

impl Pixel for Color {
    fn into_color(self) -> Color {
        self
    }
}

/// Already packed `0xWWRRGGBB` data.
impl Pixel for u32 {
    fn into_color(self) -> Color {
        Color::from(self)
    }
}

/// Raw RGB data.
impl Pixel for [u8; 3] {
    fn into_color(self) -> Color {
        let [r, g, b] = self;
        Color::new(r, g, b)
    }
}

/// Raw RGBW data.
impl Pixel for [u8; 4] {
    fn into_color(self) -> Color {
        let [r, g, b, w] = self;
        Color::rgbw(r, g, b, w)
    }
}

/// 8-bit Linear sRGB, which is the color space
/// most NeoPixel strips are in.
///
/// Be aware that this differs from normal,
/// gamma-corrected sRGB. A conversion has to take place.
///
/// More info can be found in the documentation of the
/// [palette] crate.
impl Pixel for palette::LinSrgb<u8> {
    fn into_color(self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }
}

/// 8-bit gamma-encoded sRGB.
///
/// The channel values are written as they are; no gamma
/// conversion takes place.
impl Pixel for palette::Srgb<u8> {
    fn into_color(self) -> Color {
        Color::new(self.red, self.green, self.blue)
    }
}

impl<'a, P> Pixel for &'a P
where
    P: Pixel + Clone,
{
    fn into_color(self) -> Color {
        self.clone().into_color()
    }
}
