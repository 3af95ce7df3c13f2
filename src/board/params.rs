//! Layout parameters: board sizing, quadrant colors and the style constants
//! every builder reads.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::LayoutError;
use super::geometry::PrimitiveKind;
use crate::math::Vec2;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_hex(0xffffff);
    pub const BLACK: Color = Color::from_hex(0x000000);
    pub const GREEN: Color = Color::from_hex(0x00ff00);
    pub const BLUE: Color = Color::from_hex(0x0000ff);
    pub const RED: Color = Color::from_hex(0xff0000);
    pub const YELLOW: Color = Color::from_hex(0xffff00);
    pub const ORANGE: Color = Color::from_hex(0xffa500);
    pub const PURPLE: Color = Color::from_hex(0x800080);

    const NAMED: [(&'static str, Color); 8] = [
        ("white", Color::WHITE),
        ("black", Color::BLACK),
        ("green", Color::GREEN),
        ("blue", Color::BLUE),
        ("red", Color::RED),
        ("yellow", Color::YELLOW),
        ("orange", Color::ORANGE),
        ("purple", Color::PURPLE),
    ];

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Color {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn to_hex(&self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// RGBA bytes with full opacity, as the vertex format expects.
    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    /// Accepts a color name (`green`), `#rrggbb` or `0xrrggbb`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some((_, color)) = Color::NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }

        let digits = lower
            .strip_prefix('#')
            .or_else(|| lower.strip_prefix("0x"))
            .ok_or_else(|| {
                LayoutError::invalid("colors", trimmed, "expected a color name or #rrggbb")
            })?;

        if digits.len() != 6 {
            return Err(LayoutError::invalid(
                "colors",
                trimmed,
                "hex colors need exactly six digits",
            ));
        }

        u32::from_str_radix(digits, 16)
            .map(Color::from_hex)
            .map_err(|_| LayoutError::invalid("colors", trimmed, "invalid hex digits"))
    }
}

/// One of the four home corners, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Canonical order; also the order of [`LayoutParameters::colors`].
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::TopLeft => 0,
            Quadrant::TopRight => 1,
            Quadrant::BottomLeft => 2,
            Quadrant::BottomRight => 3,
        }
    }

    /// Unit direction of the quadrant on the board plane. `-z` is the top of the board.
    pub fn signs(self) -> Vec2 {
        match self {
            Quadrant::TopLeft => Vec2::new(-1.0, -1.0),
            Quadrant::TopRight => Vec2::new(1.0, -1.0),
            Quadrant::BottomLeft => Vec2::new(-1.0, 1.0),
            Quadrant::BottomRight => Vec2::new(1.0, 1.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        }
    }
}

/// One straight run of the cross, named by the board edge it starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arm {
    Left,
    Top,
    Right,
    Bottom,
}

impl Arm {
    pub const ALL: [Arm; 4] = [Arm::Left, Arm::Top, Arm::Right, Arm::Bottom];

    /// The quadrant whose color this arm carries.
    ///
    /// Arms turn clockwise: each arm's start square sits against the home it
    /// belongs to, and the centre triangle on the arm's inner edge has the same color.
    pub fn quadrant(self) -> Quadrant {
        match self {
            Arm::Left => Quadrant::TopLeft,
            Arm::Top => Quadrant::TopRight,
            Arm::Right => Quadrant::BottomRight,
            Arm::Bottom => Quadrant::BottomLeft,
        }
    }
}

/// How the safe square is sized inside its home section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SafeSquareInset {
    /// Outer size minus a fixed number of cells.
    Fixed(f32),
    /// Outer size scaled by a ratio.
    Ratio(f32),
}

impl SafeSquareInset {
    /// Inner size in cells for a section of `outer` cells.
    pub fn inner_size(&self, outer: f32) -> f32 {
        match *self {
            SafeSquareInset::Fixed(inset) => outer - inset,
            SafeSquareInset::Ratio(ratio) => outer * ratio,
        }
    }
}

/// Token-start marker geometry, in cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerShape {
    Square { size: f32 },
    Disc { radius: f32, segments: u32 },
}

/// Which primitives get a visible border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlinePolicy {
    /// Cells, sections, safe squares, markers and centre triangles.
    Everything,
    /// Safe squares and markers only.
    HomesOnly,
}

impl OutlinePolicy {
    pub fn applies_to(self, kind: PrimitiveKind) -> bool {
        match self {
            OutlinePolicy::Everything => true,
            OutlinePolicy::HomesOnly => {
                matches!(kind, PrimitiveKind::SafeSquare | PrimitiveKind::Marker)
            }
        }
    }
}

/// Height of each layer above the board plane. Later layers sit higher so they
/// win the depth test when viewed from above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elevations {
    pub grid: f32,
    pub section: f32,
    pub center: f32,
    pub safe_square: f32,
    pub marker: f32,
}

/// Every fixed layout constant, in cell units.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyle {
    pub draw_grid: bool,
    pub draw_center: bool,
    /// Gap between the board axes and the inner edges of each home section.
    pub section_margin: f32,
    pub safe_square: SafeSquareInset,
    pub marker_shape: MarkerShape,
    /// Distance from a section centre to each marker, along both axes.
    pub marker_offset: f32,
    /// Half-width of the central finishing square.
    pub center_half_width: f32,
    pub outlines: OutlinePolicy,
    pub elevations: Elevations,
    pub background: Color,
    pub safe_square_color: Color,
}

impl Default for LayoutStyle {
    fn default() -> Self {
        BoardVariant::Classic.style()
    }
}

/// Preset styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardVariant {
    /// Full board: grid, cross path, homes, square markers and centre triangles.
    #[default]
    Classic,
    /// Homes only, with round markers and outlines on the inner pieces.
    Minimal,
}

impl BoardVariant {
    pub fn style(self) -> LayoutStyle {
        match self {
            BoardVariant::Classic => LayoutStyle {
                draw_grid: true,
                draw_center: true,
                section_margin: 1.5,
                safe_square: SafeSquareInset::Fixed(2.0),
                marker_shape: MarkerShape::Square { size: 1.0 },
                marker_offset: 0.75,
                center_half_width: 1.5,
                outlines: OutlinePolicy::Everything,
                elevations: Elevations {
                    grid: 0.0,
                    section: 0.05,
                    center: 0.05,
                    safe_square: 0.1,
                    marker: 0.2,
                },
                background: Color::WHITE,
                safe_square_color: Color::WHITE,
            },
            BoardVariant::Minimal => LayoutStyle {
                draw_grid: false,
                draw_center: false,
                section_margin: 1.5,
                safe_square: SafeSquareInset::Ratio(0.8),
                marker_shape: MarkerShape::Disc {
                    radius: 0.2,
                    segments: 32,
                },
                marker_offset: 0.5,
                center_half_width: 1.5,
                outlines: OutlinePolicy::HomesOnly,
                elevations: Elevations {
                    grid: 0.0,
                    section: 0.0,
                    center: 0.05,
                    safe_square: 0.02,
                    marker: 0.07,
                },
                background: Color::WHITE,
                safe_square_color: Color::WHITE,
            },
        }
    }
}

impl FromStr for BoardVariant {
    type Err = LayoutError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(BoardVariant::Classic),
            "minimal" => Ok(BoardVariant::Minimal),
            other => Err(LayoutError::invalid(
                "variant",
                other,
                "expected `classic` or `minimal`",
            )),
        }
    }
}

/// Input to [`generate`](super::generate).
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParameters {
    /// Cells per side. Odd, at least [`MIN_BOARD_SIZE`](Self::MIN_BOARD_SIZE).
    pub board_size: u32,
    /// Home section side length in cells. Less than half the board.
    pub section_size: u32,
    /// Quadrant colors in [`Quadrant::ALL`] order.
    pub colors: [Color; 4],
    /// World units per cell.
    pub cell_size: f32,
    pub style: LayoutStyle,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            board_size: 15,
            section_size: 6,
            colors: [Color::GREEN, Color::BLUE, Color::RED, Color::YELLOW],
            cell_size: 1.0,
            style: LayoutStyle::default(),
        }
    }
}

impl LayoutParameters {
    pub const MIN_BOARD_SIZE: u32 = 11;

    /// Creates validated parameters with the classic style and unit cells.
    pub fn new(board_size: u32, section_size: u32, colors: &[Color]) -> Result<Self, LayoutError> {
        let params = Self {
            board_size,
            section_size,
            colors: quadrant_colors(colors)?,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_style(mut self, style: LayoutStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_variant(self, variant: BoardVariant) -> Self {
        self.with_style(variant.style())
    }

    /// Checks every constraint; the first failure is returned.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.board_size % 2 == 0 {
            return Err(LayoutError::invalid(
                "board_size",
                self.board_size,
                "must be odd so a single centre cell exists",
            ));
        }
        if self.board_size < Self::MIN_BOARD_SIZE {
            return Err(LayoutError::invalid(
                "board_size",
                self.board_size,
                "must be at least 11",
            ));
        }
        if self.section_size == 0 {
            return Err(LayoutError::invalid(
                "section_size",
                self.section_size,
                "must be at least 1",
            ));
        }
        if u64::from(self.section_size) * 2 >= u64::from(self.board_size) {
            return Err(LayoutError::invalid(
                "section_size",
                self.section_size,
                "must be less than half the board size",
            ));
        }
        if self.style.safe_square.inner_size(self.section_size as f32) <= 0.0 {
            return Err(LayoutError::invalid(
                "section_size",
                self.section_size,
                "must leave room for the safe square",
            ));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(LayoutError::invalid(
                "cell_size",
                self.cell_size,
                "must be a positive finite number",
            ));
        }
        if self.style.section_margin < 1.0
            || self.style.section_margin < self.style.center_half_width
        {
            return Err(LayoutError::invalid(
                "style.section_margin",
                self.style.section_margin,
                "must be at least one cell and clear the centre square",
            ));
        }

        for (i, color) in self.colors.iter().enumerate() {
            if self.colors[..i].contains(color) {
                return Err(LayoutError::invalid(
                    "colors",
                    color,
                    "quadrant colors must be distinct",
                ));
            }
        }

        Ok(())
    }

    /// Row/column index of the centre cell.
    pub fn center_index(&self) -> u32 {
        (self.board_size - 1) / 2
    }

    pub fn color_of(&self, quadrant: Quadrant) -> Color {
        self.colors[quadrant.index()]
    }

    /// Board-plane position of a cell centre. The board centre is the origin.
    pub fn cell_center(&self, row: u32, col: u32) -> Vec2 {
        let c = self.center_index() as f32;
        Vec2::new(
            (col as f32 - c) * self.cell_size,
            (row as f32 - c) * self.cell_size,
        )
    }
}

/// Converts a color list into quadrant order. Exactly four are required.
pub fn quadrant_colors(colors: &[Color]) -> Result<[Color; 4], LayoutError> {
    colors.try_into().map_err(|_| {
        LayoutError::invalid("colors", colors.len(), "exactly four colors are required")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!("green".parse::<Color>().unwrap(), Color::GREEN);
        assert_eq!(" Yellow ".parse::<Color>().unwrap(), Color::YELLOW);
        assert_eq!("#ff0000".parse::<Color>().unwrap(), Color::RED);
        assert_eq!("0x0000FF".parse::<Color>().unwrap(), Color::BLUE);
        assert!("#ff00".parse::<Color>().is_err());
        assert!("teal".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_display_round_trips_through_hex() {
        assert_eq!(Color::ORANGE.to_string(), "#ffa500");
        assert_eq!(Color::from_hex(Color::PURPLE.to_hex()), Color::PURPLE);
    }

    #[test]
    fn test_even_board_rejected() {
        let err = LayoutParameters::new(14, 6, &LayoutParameters::default().colors).unwrap_err();
        assert_eq!(err.parameter(), Some("board_size"));
    }

    #[test]
    fn test_small_board_rejected() {
        let err = LayoutParameters::new(9, 3, &LayoutParameters::default().colors).unwrap_err();
        assert_eq!(err.parameter(), Some("board_size"));
    }

    #[test]
    fn test_section_must_be_less_than_half_board() {
        let colors = LayoutParameters::default().colors;
        assert!(LayoutParameters::new(15, 7, &colors).is_ok());
        let err = LayoutParameters::new(15, 8, &colors).unwrap_err();
        assert_eq!(err.parameter(), Some("section_size"));
    }

    #[test]
    fn test_huge_section_rejected_without_overflow() {
        let colors = LayoutParameters::default().colors;
        let err = LayoutParameters::new(15, u32::MAX / 2 + 1, &colors).unwrap_err();
        assert_eq!(err.parameter(), Some("section_size"));
        let err = LayoutParameters::new(15, u32::MAX, &colors).unwrap_err();
        assert_eq!(err.parameter(), Some("section_size"));
    }

    #[test]
    fn test_section_must_fit_safe_square() {
        let colors = LayoutParameters::default().colors;
        let err = LayoutParameters::new(15, 2, &colors).unwrap_err();
        assert_eq!(err.parameter(), Some("section_size"));

        // A ratio inset never collapses the safe square.
        let params = LayoutParameters {
            section_size: 2,
            ..LayoutParameters::default()
        }
        .with_variant(BoardVariant::Minimal);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_color_count_and_distinctness() {
        let err = LayoutParameters::new(15, 6, &[Color::GREEN, Color::BLUE, Color::RED])
            .unwrap_err();
        assert_eq!(err.parameter(), Some("colors"));

        let err = LayoutParameters::new(
            15,
            6,
            &[Color::GREEN, Color::BLUE, Color::GREEN, Color::YELLOW],
        )
        .unwrap_err();
        assert_eq!(err.parameter(), Some("colors"));
    }

    #[test]
    fn test_cell_size_must_be_positive() {
        let params = LayoutParameters::default().with_cell_size(0.0);
        assert_eq!(params.validate().unwrap_err().parameter(), Some("cell_size"));
        let params = LayoutParameters::default().with_cell_size(f32::NAN);
        assert_eq!(params.validate().unwrap_err().parameter(), Some("cell_size"));
    }

    #[test]
    fn test_error_message_names_parameter_and_constraint() {
        let err = LayoutParameters::new(14, 6, &LayoutParameters::default().colors).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("board_size"));
        assert!(message.contains("14"));
        assert!(message.contains("odd"));
    }

    #[test]
    fn test_cell_center_is_origin_for_centre_cell() {
        let params = LayoutParameters::default();
        assert_eq!(params.center_index(), 7);
        assert_eq!(params.cell_center(7, 7), Vec2::ZERO);
        assert_eq!(params.cell_center(0, 14), Vec2::new(7.0, -7.0));
    }

    #[test]
    fn test_every_arm_maps_to_a_distinct_quadrant() {
        let mut seen: Vec<Quadrant> = Arm::ALL.iter().map(|arm| arm.quadrant()).collect();
        seen.sort_by_key(|q| q.index());
        assert_eq!(seen, Quadrant::ALL.to_vec());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("Minimal".parse::<BoardVariant>().unwrap(), BoardVariant::Minimal);
        assert!("fancy".parse::<BoardVariant>().is_err());
    }
}
