//! Building color palette: whites, grays and glass blues.

use city_core::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<Rgb>,
}

/// Used when a configured palette is empty.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xad, 0xb5, 0xbd);

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                Rgb::new(0xf8, 0xf9, 0xfa), // light gray/white
                Rgb::new(0xe9, 0xec, 0xef),
                Rgb::new(0xde, 0xe2, 0xe6),
                Rgb::new(0xce, 0xd4, 0xda),
                Rgb::new(0xad, 0xb5, 0xbd),
                Rgb::new(0x6c, 0x75, 0x7d),
                Rgb::new(0x49, 0x50, 0x57),
                Rgb::new(0x34, 0x3a, 0x40), // charcoal
                Rgb::new(0x21, 0x25, 0x29),
                Rgb::new(0x2c, 0x5a, 0xa0), // blue glass
                Rgb::new(0x1e, 0x3a, 0x5f),
                Rgb::new(0x87, 0xce, 0xeb),
                Rgb::new(0x46, 0x82, 0xb4), // steel blue
                Rgb::new(0x70, 0x80, 0x90),
            ],
        }
    }
}

impl Palette {
    /// Uniform pick. An empty palette yields [`FALLBACK_COLOR`] without drawing.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        if self.colors.is_empty() {
            return FALLBACK_COLOR;
        }
        self.colors[rng.gen_range(0..self.colors.len())]
    }
}
