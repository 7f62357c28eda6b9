#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const TRANSPARENT: Color = Color(0, 0, 0, 0);
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    pub const GREEN: Color = Color(52, 199, 89, 255);

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let channel = |i: usize, fallback: u8| {
            s.get(i..i + 2)
                .and_then(|c| u8::from_str_radix(c, 16).ok())
                .unwrap_or(fallback)
        };
        match s.len() {
            6 => Color(channel(0, 0), channel(2, 0), channel(4, 0), 255),
            8 => Color(channel(0, 0), channel(2, 0), channel(4, 0), channel(6, 255)),
            _ => Color::BLACK,
        }
    }
    pub fn is_transparent(&self) -> bool {
        self.3 == 0
    }
}
