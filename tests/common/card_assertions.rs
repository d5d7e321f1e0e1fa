use ogcard::RenderedCard;
use tiny_skia::Pixmap;

/// Decodes a rendered card and checks its size.
pub fn decode(card: &RenderedCard) -> Pixmap {
    let pixmap = Pixmap::decode_png(&card.data).expect("card should be a valid PNG");
    assert_eq!((pixmap.width(), pixmap.height()), (1200, 628), "card size for {}", card.path);
    pixmap
}

pub fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
    let p = pixmap.pixel(x, y).expect("pixel in bounds");
    (p.red(), p.green(), p.blue())
}

/// True when any pixel in the rectangle differs from `background`.
pub fn has_ink(pixmap: &Pixmap, x0: u32, y0: u32, x1: u32, y1: u32, background: (u8, u8, u8)) -> bool {
    (y0..y1).any(|y| (x0..x1).any(|x| rgb_at(pixmap, x, y) != background))
}
