/// Sanitize recognized text before pattern matching.
/// Strips control characters and OCR noise glyphs, normalizes whitespace,
/// preserves the punctuation and symbols datasheets use for units.
pub fn sanitize_ocr_text(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            // Tabs and non-breaking spaces separate table cells; keep the gap.
            '\t' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => ' ',
            _ => c,
        })
        .filter(|c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(
                    c,
                    '.' | ','
                        | ';'
                        | ':'
                        | '-'
                        | '/'
                        | '('
                        | ')'
                        | '['
                        | ']'
                        | '+'
                        | '='
                        | '%'
                        | '#'
                        | '&'
                        | '\''
                        | '"'
                        | '*'
                        | '_'
                        | '^'
                        | '°'
                        | 'º'
                        | '²'
                        | '×'
                        | 'Ω'
                        | '\u{2013}' // En-dash –
                        | '\u{2014}' // Em-dash
                        | '\u{2212}' // Minus sign −
                )
        })
        .collect::<String>()
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_control_characters() {
        let raw = "Voltage: 600V\x01\x02\x03\nSize: 2.5mm²";
        let clean = sanitize_ocr_text(raw);
        assert!(!clean.contains('\x01'));
        assert!(clean.contains("600V"));
        assert!(clean.contains("2.5mm²"));
    }

    #[test]
    fn preserves_unit_symbols() {
        let raw = "Temp: 90°C, 4×2.5 mm², Uo/U 0.6/1 kV";
        let clean = sanitize_ocr_text(raw);
        assert_eq!(clean, raw);
    }

    #[test]
    fn drops_ocr_noise_glyphs() {
        let raw = "Insulation ¦ XLPE ~ §";
        let clean = sanitize_ocr_text(raw);
        assert!(!clean.contains('¦'));
        assert!(!clean.contains('~'));
        assert!(clean.contains("XLPE"));
    }

    #[test]
    fn tabs_become_spaces() {
        assert_eq!(sanitize_ocr_text("Cores\t4"), "Cores 4");
    }

    #[test]
    fn collapses_blank_lines() {
        let raw = "Line one\n\n\n\nLine two\n\n\nLine three";
        let clean = sanitize_ocr_text(raw);
        assert_eq!(clean, "Line one\nLine two\nLine three");
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(sanitize_ocr_text(""), "");
        assert_eq!(sanitize_ocr_text("\x00\x01\x02"), "");
    }
}
