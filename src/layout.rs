//! Page-number placement calculations
//!
//! All coordinates are PDF user space: origin at the bottom-left of the page,
//! y growing upwards, one unit per point.

use std::fmt;
use std::str::FromStr;

/// Distance between the page edge and the label
pub const MARGIN: f32 = 20.0;

/// Height of the band (edge positions) or box (corner positions) that gets covered
pub const BAND_HEIGHT: f32 = 50.0;

/// Width of the covered box at corner positions
pub const CORNER_WIDTH: f32 = 100.0;

/// Where the page number goes on each page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Bottom,
    Top,
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    /// Every position, in the order the CLI lists them
    pub const ALL: [Position; 6] = [
        Position::Bottom,
        Position::Top,
        Position::BottomRight,
        Position::BottomLeft,
        Position::TopRight,
        Position::TopLeft,
    ];

    /// Parse a position name, falling back to [`Position::Bottom`]
    ///
    /// Matching follows [`FromStr`], so `bottom-right`, `Bottom_Right` and
    /// `bottomright` are the same position.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::debug!("Unknown position {:?}, using bottom", name);
            Position::Bottom
        })
    }

    /// Canonical name as accepted on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Position::Bottom => "bottom",
            Position::Top => "top",
            Position::BottomRight => "bottomright",
            Position::BottomLeft => "bottomleft",
            Position::TopRight => "topright",
            Position::TopLeft => "topleft",
        }
    }

    fn is_top(&self) -> bool {
        matches!(self, Position::Top | Position::TopRight | Position::TopLeft)
    }
}

impl FromStr for Position {
    type Err = String;

    /// Matching ignores case and any `-`, `_` or space
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        Position::ALL
            .into_iter()
            .find(|position| position.name() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Position::ALL.iter().map(Position::name).collect();
                format!("unknown position '{}' (expected one of: {})", name, names.join(", "))
            })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A point in PDF user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// An axis-aligned rectangle in PDF user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Whether `point` lies inside the rectangle (edges included)
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x0 && point.x <= self.x1 && point.y >= self.y0 && point.y <= self.y1
    }

    fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }
}

/// The visible area of a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    /// Lower-left corner
    pub origin: Point,
    pub width: f32,
    pub height: f32,
}

impl PageBox {
    /// Build a page box from a PDF box array `[llx lly urx ury]`
    ///
    /// Corners may be given in any order.
    pub fn from_corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            origin: Point {
                x: x0.min(x1),
                y: y0.min(y1),
            },
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }

    /// US Letter size (8.5" × 11")
    pub fn letter() -> Self {
        Self::from_corners(0.0, 0.0, 612.0, 792.0)
    }

    /// A4 size (210mm × 297mm)
    pub fn a4() -> Self {
        Self::from_corners(0.0, 0.0, 595.0, 842.0)
    }
}

/// Where to paint the white cover and where the label baseline starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampPlacement {
    pub cover: Rect,
    pub anchor: Point,
}

/// Calculate the cover rectangle and text anchor for one page
///
/// Edge positions cover a full-width band of [`BAND_HEIGHT`] and centre the
/// label horizontally; corner positions cover a [`CORNER_WIDTH`] ×
/// [`BAND_HEIGHT`] box and keep the label [`MARGIN`] away from the side edge.
/// Top positions drop the baseline by half the font size so the glyphs stay
/// inside the band.
pub fn compute_placement(
    page: &PageBox,
    position: Position,
    text_width: f32,
    font_size: f32,
) -> StampPlacement {
    let w = page.width;
    let h = page.height;

    let cover = match position {
        Position::Bottom => Rect { x0: 0.0, y0: 0.0, x1: w, y1: BAND_HEIGHT },
        Position::Top => Rect { x0: 0.0, y0: h - BAND_HEIGHT, x1: w, y1: h },
        Position::BottomRight => Rect { x0: w - CORNER_WIDTH, y0: 0.0, x1: w, y1: BAND_HEIGHT },
        Position::BottomLeft => Rect { x0: 0.0, y0: 0.0, x1: CORNER_WIDTH, y1: BAND_HEIGHT },
        Position::TopRight => Rect { x0: w - CORNER_WIDTH, y0: h - BAND_HEIGHT, x1: w, y1: h },
        Position::TopLeft => Rect { x0: 0.0, y0: h - BAND_HEIGHT, x1: CORNER_WIDTH, y1: h },
    };

    let x = match position {
        Position::Bottom | Position::Top => w / 2.0 - text_width / 2.0,
        Position::BottomRight | Position::TopRight => w - MARGIN - text_width,
        Position::BottomLeft | Position::TopLeft => MARGIN,
    };

    let y = if position.is_top() {
        h - MARGIN - font_size / 2.0
    } else {
        MARGIN
    };

    StampPlacement {
        cover: cover.translate(page.origin.x, page.origin.y),
        anchor: Point {
            x: x + page.origin.x,
            y: y + page.origin.y,
        },
    }
}
