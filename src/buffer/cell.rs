use palette::{LinSrgb, Mix, Srgb};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Blend this color over `under` with the given alpha (255 = fully this
    /// color, 0 = fully `under`). Mixing happens in linear sRGB.
    pub fn blend_over(self, under: Rgb, alpha: u8) -> Rgb {
        if alpha == 255 {
            return self;
        }
        if alpha == 0 {
            return under;
        }
        let factor = alpha as f32 / 255.0;
        let over: LinSrgb<f32> = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
        .into_linear();
        let base: LinSrgb<f32> = Srgb::new(
            under.r as f32 / 255.0,
            under.g as f32 / 255.0,
            under.b as f32 / 255.0,
        )
        .into_linear();
        let mixed = base.mix(over, factor);
        let out: Srgb<f32> = Srgb::from_linear(mixed);
        Rgb::new(
            (out.red * 255.0).round() as u8,
            (out.green * 255.0).round() as u8,
            (out.blue * 255.0).round() as u8,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
        }
    }
}

impl Cell {
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            ..Default::default()
        }
    }

    pub fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    pub fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}
