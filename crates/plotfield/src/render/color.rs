//! Color string parsing shared by the raster surface.

/// Parses a color string to RGBA bytes.
///
/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, and a few CSS names. Returns
/// `None` for "none", unknown names, and malformed input: an unpaintable
/// color simply draws nothing.
pub fn parse_color(value: &str) -> Option<[u8; 4]> {
    let value = value.trim();
    match value {
        "none" | "" => return None,
        "black" => return Some([0, 0, 0, 255]),
        "white" => return Some([255, 255, 255, 255]),
        "red" => return Some([255, 0, 0, 255]),
        "green" => return Some([0, 128, 0, 255]),
        "blue" => return Some([0, 0, 255, 255]),
        "gray" | "grey" => return Some([128, 128, 128, 255]),
        _ => {}
    }

    let hex = value.strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut rgba = [0u8, 0, 0, 255];
            for (i, c) in hex.chars().enumerate() {
                let d = c.to_digit(16)? as u8;
                rgba[i] = d * 17;
            }
            Some(rgba)
        }
        6 | 8 => {
            let mut rgba = [0u8, 0, 0, 255];
            for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
                let s = std::str::from_utf8(chunk).ok()?;
                rgba[i] = u8::from_str_radix(s, 16).ok()?;
            }
            Some(rgba)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(parse_color("#ff8000"), Some([255, 128, 0, 255]));
    }

    #[test]
    fn parses_short_hex() {
        assert_eq!(parse_color("#f00"), Some([255, 0, 0, 255]));
    }

    #[test]
    fn parses_hex_with_alpha() {
        assert_eq!(parse_color("#00000080"), Some([0, 0, 0, 128]));
    }

    #[test]
    fn none_and_garbage_are_unpaintable() {
        assert_eq!(parse_color("none"), None);
        assert_eq!(parse_color("#zzz"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn named_colors_resolve() {
        assert_eq!(parse_color("white"), Some([255, 255, 255, 255]));
        assert_eq!(parse_color("black"), Some([0, 0, 0, 255]));
    }
}
