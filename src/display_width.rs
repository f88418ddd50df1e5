use unicode_width::UnicodeWidthChar;

const WIDE_UPPERCASE: u32 = 10;
const UPPERCASE: u32 = 8;
const LOWERCASE: u32 = 6;
const NARROW_LOWERCASE: u32 = 4;

/// Rough pixel width of `c` in the default sans-serif font.
fn char_pixels(c: char) -> u32 {
    match c {
        'W' | 'M' => WIDE_UPPERCASE,
        'i' | 'l' | 'j' | 't' => NARROW_LOWERCASE,
        c if c.is_uppercase() => UPPERCASE,
        c if c.is_lowercase() => LOWERCASE,
        // digits, punctuation; wide glyphs count once per terminal column
        c => LOWERCASE * c.width().unwrap_or(1).max(1) as u32,
    }
}

/// Node width in inches for a fixed-size node labelled `s`, truncated to two
/// decimals.
pub fn node_width(s: &str) -> f64 {
    let pixels: u32 = s.chars().map(char_pixels).sum();
    let inches = f64::from(pixels) * 8.0 / 340.0;
    (inches * 100.0).trunc() / 100.0
}
