//! Standard PDF fonts used for page labels
//!
//! Only the twelve non-symbolic base-14 fonts are supported. They need no
//! embedding, every viewer ships them, and their glyph widths are fixed by
//! the Adobe font metrics, so labels can be measured without a font file.

use std::fmt;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};

/// One of the non-symbolic base-14 fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaOblique,
    HelveticaBold,
    HelveticaBoldOblique,
    TimesRoman,
    TimesItalic,
    TimesBold,
    TimesBoldItalic,
    Courier,
    CourierOblique,
    CourierBold,
    CourierBoldOblique,
}

impl StandardFont {
    /// Look a font up by short name (`helv`, `tiro`, `cour`, ...) or by its
    /// PostScript name (`Helvetica`, `Times-Roman`, ...), ignoring case
    pub fn from_name(name: &str) -> Result<Self> {
        let font = match name.trim().to_ascii_lowercase().as_str() {
            "helv" | "helvetica" => StandardFont::Helvetica,
            "heit" | "helvetica-oblique" => StandardFont::HelveticaOblique,
            "hebo" | "helvetica-bold" => StandardFont::HelveticaBold,
            "hebi" | "helvetica-boldoblique" => StandardFont::HelveticaBoldOblique,
            "tiro" | "times-roman" => StandardFont::TimesRoman,
            "tiit" | "times-italic" => StandardFont::TimesItalic,
            "tibo" | "times-bold" => StandardFont::TimesBold,
            "tibi" | "times-bolditalic" => StandardFont::TimesBoldItalic,
            "cour" | "courier" => StandardFont::Courier,
            "coit" | "courier-oblique" => StandardFont::CourierOblique,
            "cobo" | "courier-bold" => StandardFont::CourierBold,
            "cobi" | "courier-boldoblique" => StandardFont::CourierBoldOblique,
            _ => return Err(Error::Font(format!("Unknown font: {}", name))),
        };
        Ok(font)
    }

    /// PostScript name written to the font's /BaseFont entry
    pub fn base_font(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Widths for printable ASCII (32..=126) in 1/1000ths of the em square
    fn widths(&self) -> Option<&'static [u16; 95]> {
        match self {
            // Oblique Helvetica shares the upright metrics
            StandardFont::Helvetica | StandardFont::HelveticaOblique => Some(&HELVETICA_WIDTHS),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some(&HELVETICA_BOLD_WIDTHS)
            }
            StandardFont::TimesRoman => Some(&TIMES_ROMAN_WIDTHS),
            StandardFont::TimesItalic => Some(&TIMES_ITALIC_WIDTHS),
            StandardFont::TimesBold => Some(&TIMES_BOLD_WIDTHS),
            StandardFont::TimesBoldItalic => Some(&TIMES_BOLD_ITALIC_WIDTHS),
            // Courier is monospaced
            _ => None,
        }
    }

    /// Width of a single glyph in 1/1000ths of the em square
    fn glyph_width(&self, c: char) -> u16 {
        match self.widths() {
            None => COURIER_WIDTH,
            Some(table) => {
                let code = c as u32;
                if (32..=126).contains(&code) {
                    table[(code - 32) as usize]
                } else {
                    // Outside printable ASCII: use the width of a digit
                    table[(u32::from('0') - 32) as usize]
                }
            }
        }
    }

    /// Rendered width of `text` at `font_size` points
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.glyph_width(c))).sum();
        units as f32 * font_size / 1000.0
    }

    /// Add a Type1 font dictionary for this font to the document
    pub fn add_to_document(&self, doc: &mut Document) -> ObjectId {
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(self.base_font().as_bytes().to_vec()));
        font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));

        doc.add_object(Object::Dictionary(font))
    }
}

impl fmt::Display for StandardFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_font())
    }
}

const COURIER_WIDTH: u16 = 600;

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // space to /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // 0-9
    278, 278, 584, 584, 584, 556, 1015,                                             // : to @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // N-Z
    278, 278, 278, 469, 556, 333,                                                   // [ to `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // n-z
    334, 260, 334, 584,                                                             // { to ~
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 675, 675, 675, 500, 920,
    611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
    667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
    389, 278, 389, 422, 500, 333,
    500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
    500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
    400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 832,
    667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
    722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
    333, 278, 333, 570, 500, 333,
    500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
    556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
    348, 220, 348, 570,
];
