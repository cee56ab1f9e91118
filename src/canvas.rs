//! Software rasterizer over an RGBA framebuffer (the `pixels` frame).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Hue in degrees, full saturation and value.
    pub fn from_hue(hue: u32) -> Self {
        let h = hue % 360;
        let x = (255 * (60 - (h % 120).abs_diff(60)) / 60) as u8;
        match h / 60 {
            0 => Self::rgb(255, x, 0),
            1 => Self::rgb(x, 255, 0),
            2 => Self::rgb(0, 255, x),
            3 => Self::rgb(0, x, 255),
            4 => Self::rgb(x, 0, 255),
            _ => Self::rgb(255, 0, x),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    TopLeft,
    Center,
}

/// Drawing primitives the game needs. Presenting the finished frame is the
/// caller's job.
pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: u32, color: Color);
    fn text(&mut self, text: &str, x: i32, y: i32, color: Color, align: Align);
}

pub const TEXT_SCALE: u32 = 3;

/// Pixel width of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    let n = text.chars().count() as u32;
    if n == 0 { 0 } else { n * 6 * scale - scale }
}

pub fn text_height(scale: u32) -> u32 {
    7 * scale
}

pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self { frame, width, height }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height { return; }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        if idx + 3 >= self.frame.len() { return; }
        let ar = c.a as u16; let iar = (255 - c.a) as u16;
        let px = &mut self.frame[idx..idx + 4];
        px[0] = ((c.r as u16 * ar + px[0] as u16 * iar) / 255) as u8;
        px[1] = ((c.g as u16 * ar + px[1] as u16 * iar) / 255) as u8;
        px[2] = ((c.b as u16 * ar + px[2] as u16 * iar) / 255) as u8;
        px[3] = 255;
    }

    fn draw_char(&mut self, ch: char, x: i32, y: i32, scale: u32, col: Color) -> i32 {
        if let Some(rows) = glyph_5x7(ch) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (row >> (4 - rx)) & 1 == 1 {
                        let r = Rect::new(x + (rx * scale) as i32, y + ry as i32 * scale as i32, scale, scale);
                        self.fill_rect(r, col);
                    }
                }
            }
        }
        (6 * scale) as i32
    }
}

impl Canvas for FrameCanvas<'_> {
    fn clear(&mut self, c: Color) {
        for px in self.frame.chunks_exact_mut(4) { px[0] = c.r; px[1] = c.g; px[2] = c.b; px[3] = c.a; }
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), c: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs(); let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 }; let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x, y, c);
            if x == to.0 && y == to.1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
        }
    }

    fn fill_rect(&mut self, r: Rect, c: Color) {
        let x1 = r.x.max(0); let y1 = r.y.max(0);
        let x2 = (r.x + r.w as i32).min(self.width as i32); let y2 = (r.y + r.h as i32).min(self.height as i32);
        for py in y1..y2 { for px in x1..x2 { self.blend_pixel(px, py, c); } }
    }

    fn fill_rounded_rect(&mut self, r: Rect, radius: u32, c: Color) {
        let rad = radius.min(r.w / 2).min(r.h / 2) as i32;
        let (w, h) = (r.w as i32, r.h as i32);
        for oy in 0..h {
            for ox in 0..w {
                // Distance from the nearest corner circle centre, zero outside the corner boxes.
                let cx = if ox < rad { rad - ox } else if ox >= w - rad { ox - (w - rad - 1) } else { 0 };
                let cy = if oy < rad { rad - oy } else if oy >= h - rad { oy - (h - rad - 1) } else { 0 };
                if cx > 0 && cy > 0 && cx * cx + cy * cy > rad * rad { continue; }
                self.blend_pixel(r.x + ox, r.y + oy, c);
            }
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32, col: Color, align: Align) {
        let (mut cx, cy) = match align {
            Align::TopLeft => (x, y),
            Align::Center => (x - text_width(text, TEXT_SCALE) as i32 / 2, y - text_height(TEXT_SCALE) as i32 / 2),
        };
        for ch in text.chars() { cx += self.draw_char(ch, cx, cy, TEXT_SCALE, col); }
    }
}

fn glyph_5x7(ch: char) -> Option<[u8; 7]> {
    let c = ch.to_ascii_uppercase();
    Some(match c {
        'A'=>[0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001],
        'B'=>[0b11110,0b10001,0b11110,0b10001,0b10001,0b10001,0b11110],
        'C'=>[0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110],
        'D'=>[0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100],
        'E'=>[0b11111,0b10000,0b11110,0b10000,0b10000,0b10000,0b11111],
        'F'=>[0b11111,0b10000,0b11110,0b10000,0b10000,0b10000,0b10000],
        'G'=>[0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01110],
        'H'=>[0b10001,0b10001,0b11111,0b10001,0b10001,0b10001,0b10001],
        'I'=>[0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b11111],
        'J'=>[0b00111,0b00010,0b00010,0b00010,0b10010,0b10010,0b01100],
        'K'=>[0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001],
        'L'=>[0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111],
        'M'=>[0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001],
        'N'=>[0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001],
        'O'=>[0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110],
        'P'=>[0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000],
        'Q'=>[0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101],
        'R'=>[0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001],
        'S'=>[0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110],
        'T'=>[0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100],
        'U'=>[0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110],
        'V'=>[0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100],
        'W'=>[0b10001,0b10001,0b10001,0b10101,0b10101,0b11011,0b10001],
        'X'=>[0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001],
        'Y'=>[0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100],
        'Z'=>[0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111],
        '0'=>[0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110],
        '1'=>[0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110],
        '2'=>[0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111],
        '3'=>[0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110],
        '4'=>[0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010],
        '5'=>[0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110],
        '6'=>[0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110],
        '7'=>[0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000],
        '8'=>[0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110],
        '9'=>[0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100],
        ':'=>[0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000],
        '.'=>[0b00000,0b00000,0b00000,0b00000,0b00000,0b01100,0b01100],
        '!'=>[0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100],
        '/'=>[0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000],
        '+'=>[0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000],
        '-'=>[0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000],
        ' '=>[0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000],
        _ => return None,
    })
}
