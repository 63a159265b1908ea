/// One 24-bit RGB pixel.
///
/// Channels are stored as `u8`, so every value is already within `[0, 255]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);
    pub const WHITE: Pixel = Pixel::new(255, 255, 255);
    pub const RED: Pixel = Pixel::new(255, 0, 0);
    pub const GREEN: Pixel = Pixel::new(0, 255, 0);
    pub const BLUE: Pixel = Pixel::new(0, 0, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build from BMP's on-disk channel order.
    pub(crate) const fn from_bgr([blue, green, red]: [u8; 3]) -> Self {
        Self { red, green, blue }
    }

    /// Channels in BMP's on-disk order.
    pub(crate) const fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    /// Sum of the three channels, in `[0, 765]`.
    pub fn sum(self) -> u32 {
        u32::from(self.red) + u32::from(self.green) + u32::from(self.blue)
    }

    /// Integer (floor) mean of the three channels.
    pub fn average(self) -> u32 {
        self.sum() / 3
    }

    /// Apply `f` to each channel.
    pub(crate) fn map(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self {
            red: f(self.red),
            green: f(self.green),
            blue: f(self.blue),
        }
    }

    pub(crate) const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB8> for Pixel {
    fn from(p: rgb::RGB8) -> Self {
        Pixel::new(p.r, p.g, p.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::RGB8 {
    fn from(p: Pixel) -> Self {
        rgb::RGB8::new(p.red, p.green, p.blue)
    }
}
