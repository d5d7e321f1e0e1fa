mod common;

use common::system_fonts;
use ogcard_layout::{ELLIPSIS, ResolvedFont, TextMeasurer, measure_height, wrap_text};
use ogcard_style::{FontSpec, FontWeight};

fn title_font() -> Option<ResolvedFont> {
    let fonts = system_fonts()?;
    fonts
        .resolve(&FontSpec::new("sans-serif", 70.0).with_weight(FontWeight::Bold))
        .ok()
}

#[test]
fn test_title_truncated_to_available_height() {
    let Some(font) = title_font() else {
        return;
    };
    // Two words fit per line, so eight words need four lines.
    let max_width = font.text_width("word word ") + 1.0;
    let title = "word word word word word word word word";

    let full = wrap_text(title, &font, max_width, 1000.0, 10.0);
    assert_eq!(full.len(), 4);
    assert!(!full.truncated);

    let cut = wrap_text(title, &font, max_width, 25.0, 10.0);
    assert!(cut.truncated);
    assert_eq!(cut.len(), 2);
    assert_eq!(cut.lines[1], "word word ");
    assert!(cut.lines[0].ends_with(ELLIPSIS));
    let words: usize = cut.lines.iter().map(|l| l.matches("word").count()).sum();
    assert!(words < 8, "token stream must not be fully consumed");
}

#[test]
fn test_cjk_title_wraps_without_spaces() {
    let Some(font) = title_font() else {
        return;
    };
    let title = "東京で学ぶ並行プログラミング入門";
    let block = wrap_text(title, &font, 1100.0, 5000.0, 80.0);
    for line in block.reading_order() {
        assert!(!line.trim_end().contains(' '), "unexpected space in {:?}", line);
    }
    let joined: String = block.reading_order().map(str::trim_end).collect();
    assert_eq!(joined, title);
}

#[test]
fn test_measurement_is_stable_across_threads() {
    let Some(font) = title_font() else {
        return;
    };
    let expected = measure_height(&font, "Hello World").unwrap();
    assert!(expected.height > 0.0);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let font = font.clone();
            std::thread::spawn(move || measure_height(&font, "Hello World").unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_larger_size_measures_taller() {
    let Some(fonts) = system_fonts() else {
        return;
    };
    let small = fonts.resolve(&FontSpec::new("sans-serif", 20.0)).unwrap();
    let large = fonts.resolve(&FontSpec::new("sans-serif", 80.0)).unwrap();
    let h_small = measure_height(&small, "Hexagon").unwrap().height;
    let h_large = measure_height(&large, "Hexagon").unwrap().height;
    assert!(h_large > h_small * 2.0);
}
