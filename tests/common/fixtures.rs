use image::{ImageFormat, Rgba, RgbaImage};
use ogcard::{Document, parse_timestamp};
use std::io::Cursor;

pub fn document(title: &str, date: &str, path: &str) -> Document {
    Document {
        title: title.to_string(),
        date: parse_timestamp(date).expect("fixture date"),
        draft: false,
        path: path.to_string(),
    }
}

pub fn draft(title: &str, date: &str, path: &str) -> Document {
    Document {
        draft: true,
        ..document(title, date, path)
    }
}

/// `count` posts, one per day of January 2024, oldest first.
pub fn january_posts(count: u32) -> Vec<Document> {
    (1..=count)
        .map(|day| {
            document(
                &format!("Post number {}", day),
                &format!("2024-01-{:02}", day),
                &format!("2024/01/{:02}/post-{}/", day, day),
            )
        })
        .collect()
}

/// PNG bytes of a solid image.
pub fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode fixture png");
    out.into_inner()
}
