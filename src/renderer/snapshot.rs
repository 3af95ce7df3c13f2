//! CPU rasterizer producing a top-down image of a layout without a GPU.
//!
//! Orthographic, world `-Z` at the top of the image. Primitives are painted in
//! ascending elevation; within one elevation all fills go first, then their
//! outlines, so a higher layer covers the borders beneath it.

use image::{Rgba, RgbaImage};

use crate::board::{BoardLayout, Color, Primitive};
use crate::math::{Vec2, Vec3};

/// Largest accepted resolution.
pub const MAX_PIXELS_PER_UNIT: u32 = 512;

/// Longest image side; larger boards are painted at a reduced scale.
pub const MAX_SIDE: u32 = 16_384;

/// Paints `layout` at `pixels_per_unit` pixels per world unit, with half a cell of
/// background around the board.
pub fn rasterize(layout: &BoardLayout, pixels_per_unit: u32) -> RgbaImage {
    let canvas = Canvas::new(layout, pixels_per_unit.clamp(1, MAX_PIXELS_PER_UNIT) as f32);
    let mut image = RgbaImage::from_pixel(
        canvas.side,
        canvas.side,
        rgba(layout.params().style.background),
    );

    let mut primitives: Vec<Primitive<'_>> = layout.primitives().collect();
    primitives.sort_by(|a, b| elevation(a).total_cmp(&elevation(b)));

    for layer in primitives.chunk_by(|a, b| elevation(a) == elevation(b)) {
        for primitive in layer {
            canvas.fill(&mut image, primitive);
        }
        for primitive in layer {
            canvas.stroke(&mut image, primitive);
        }
    }

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        primitives = primitives.len(),
        "snapshot rasterized"
    );
    image
}

fn elevation(primitive: &Primitive<'_>) -> f32 {
    primitive.placement.position.y()
}

fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.rgba())
}

struct Canvas {
    extent: f32,
    scale: f32,
    side: u32,
}

impl Canvas {
    fn new(layout: &BoardLayout, scale: f32) -> Self {
        let extent = layout.half_extent() + 0.5 * layout.params().cell_size;
        let scale = scale.min(MAX_SIDE as f32 / (2.0 * extent));
        let side = ((2.0 * extent * scale).ceil() as u32).clamp(1, MAX_SIDE);
        Self {
            extent,
            scale,
            side,
        }
    }

    fn to_pixel(&self, world: Vec3) -> Vec2 {
        Vec2::new(
            (world.x() + self.extent) * self.scale,
            (world.z() + self.extent) * self.scale,
        )
    }

    fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) / self.scale - self.extent,
            (y as f32 + 0.5) / self.scale - self.extent,
        )
    }

    fn clamp(&self, value: f32) -> u32 {
        (value.max(0.0) as u32).min(self.side - 1)
    }

    fn fill(&self, image: &mut RgbaImage, primitive: &Primitive<'_>) {
        let corners: Vec<Vec2> = primitive
            .shape
            .boundary()
            .into_iter()
            .map(|corner| self.to_pixel(primitive.placement.to_world(corner)))
            .collect();
        let (min, max) = corners.iter().fold(
            (Vec2::new(f32::MAX, f32::MAX), Vec2::new(f32::MIN, f32::MIN)),
            |(min, max), c| {
                (
                    Vec2::new(min.x().min(c.x()), min.y().min(c.y())),
                    Vec2::new(max.x().max(c.x()), max.y().max(c.y())),
                )
            },
        );

        let origin = primitive.placement.position.ground();
        let color = rgba(primitive.color);
        for y in self.clamp(min.y().floor())..=self.clamp(max.y().ceil()) {
            for x in self.clamp(min.x().floor())..=self.clamp(max.x().ceil()) {
                let local = (self.pixel_center(x, y) - origin).rotated(-primitive.placement.yaw);
                if primitive.shape.contains(local) {
                    image.put_pixel(x, y, color);
                }
            }
        }
    }

    fn stroke(&self, image: &mut RgbaImage, primitive: &Primitive<'_>) {
        let Some(outline) = primitive.outline else {
            return;
        };
        let color = rgba(outline.color);
        for segment in &outline.segments {
            let start = self.to_pixel(outline.placement.to_world(segment.start));
            let end = self.to_pixel(outline.placement.to_world(segment.end));
            let delta = end - start;
            let steps = delta.x().abs().max(delta.y().abs()).ceil().max(1.0) as u32;
            for i in 0..=steps {
                let point = start + delta * (i as f32 / steps as f32);
                let (x, y) = (point.x().floor(), point.y().floor());
                if x < 0.0 || y < 0.0 || x >= self.side as f32 || y >= self.side as f32 {
                    continue;
                }
                image.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardVariant, LayoutParameters, generate};

    const SCALE: u32 = 8;

    /// Pixel whose centre lies just past the world point `(x, z)`.
    fn pixel(x: f32, z: f32) -> (u32, u32) {
        // Classic board: extent 7.5 plus half a cell.
        (((x + 8.0) * SCALE as f32) as u32, ((z + 8.0) * SCALE as f32) as u32)
    }

    fn color_at(image: &RgbaImage, x: f32, z: f32) -> Color {
        let (px, py) = pixel(x, z);
        let [r, g, b, _] = image.get_pixel(px, py).0;
        Color { r, g, b }
    }

    #[test]
    fn test_image_covers_board_with_border() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let image = rasterize(&layout, SCALE);
        assert_eq!(image.dimensions(), (128, 128));
    }

    #[test]
    fn test_classic_pixels() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let image = rasterize(&layout, SCALE);

        // Home section ring, safe square and a start marker.
        assert_eq!(color_at(&image, -7.0, -4.5), Color::GREEN);
        assert_eq!(color_at(&image, -4.5, -4.5), Color::WHITE);
        assert_eq!(color_at(&image, -5.25, -5.25), Color::GREEN);
        assert_eq!(color_at(&image, 4.5, 7.0), Color::YELLOW);

        // Arm cells take their quadrant color.
        assert_eq!(color_at(&image, 0.0, -4.0), Color::BLUE);
        assert_eq!(color_at(&image, 4.0, 0.0), Color::YELLOW);
        assert_eq!(color_at(&image, -4.0, 0.0), Color::GREEN);
        assert_eq!(color_at(&image, 0.0, 4.0), Color::RED);

        // Top wedge, matching the top arm.
        assert_eq!(color_at(&image, 0.0, -0.75), Color::BLUE);

        // Left board edge is outlined.
        assert_eq!(image.get_pixel(4, 64).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_higher_layers_hide_lower_outlines() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let image = rasterize(&layout, SCALE);
        // The border between rows 0 and 1 runs under the top-left section.
        let (x, y) = pixel(-7.0, -6.5);
        assert_eq!(image.get_pixel(x, y).0, [0, 255, 0, 255]);
        // Outside the section the same border is visible.
        let (x, y) = pixel(-0.25, -6.5);
        assert_eq!(image.get_pixel(x, y).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_resolution_is_capped() {
        let layout = generate(&LayoutParameters::default()).unwrap();
        let capped = Canvas::new(&layout, MAX_PIXELS_PER_UNIT as f32);
        assert_eq!(capped.side, 16 * MAX_PIXELS_PER_UNIT);
        assert!(capped.side <= MAX_SIDE);

        let oversized = Canvas::new(&layout, 1.0e9);
        assert_eq!(oversized.side, MAX_SIDE);
        let edge = oversized.to_pixel(Vec3::new(8.0, 0.0, 8.0));
        assert!(edge.x() <= MAX_SIDE as f32 + 0.5);
    }

    #[test]
    fn test_minimal_pixels() {
        let layout =
            generate(&LayoutParameters::default().with_variant(BoardVariant::Minimal)).unwrap();
        let image = rasterize(&layout, SCALE);
        // No grid or centre: the middle stays background.
        let side = image.width();
        assert_eq!(image.get_pixel(side / 2, side / 2).0, [255, 255, 255, 255]);
    }
}
