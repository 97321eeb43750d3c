use core::fmt;

/// A packed pixel color, as stored in the driver's LED buffer.
///
/// The layout is `0xWWRRGGBB`, independent of the strip's wire order;
/// the driver reorders the channels according to the [`StripType`](crate::StripType).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// All channels off.
    pub const BLACK: Self = Self(0);

    /// Packs an RGB color. The white channel is zero.
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self::rgbw(red, green, blue, 0)
    }

    /// Packs an RGBW color, for strips with a dedicated white LED.
    pub const fn rgbw(red: u8, green: u8, blue: u8, white: u8) -> Self {
        Self(((white as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// The packed `0xWWRRGGBB` value.
    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// The red channel.
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// The green channel.
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// The blue channel.
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The white channel.
    pub const fn white(self) -> u8 {
        (self.0 >> 24) as u8
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(0x{:08X})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_red() {
        assert_eq!(Color::new(255, 0, 0).to_u32(), 0x00FF_0000);
    }

    #[test]
    fn packs_all_channels() {
        let color = Color::rgbw(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_u32(), 0x7812_3456);
        assert_eq!(color.red(), 0x12);
        assert_eq!(color.green(), 0x34);
        assert_eq!(color.blue(), 0x56);
        assert_eq!(color.white(), 0x78);
    }

    #[test]
    fn debug_is_hex() {
        assert_eq!(format!("{:?}", Color::new(1, 2, 3)), "Color(0x00010203)");
    }
}
