use std::sync::Arc;
use std::thread;

use super::*;
use crate::math::Vec2;

fn standard() -> LayoutParameters {
    LayoutParameters::new(
        15,
        6,
        &[Color::GREEN, Color::BLUE, Color::RED, Color::YELLOW],
    )
    .unwrap()
}

#[test]
fn test_standard_board() {
    let layout = generate(&standard()).unwrap();

    assert_eq!(layout.cells().len(), 225);
    assert_eq!(layout.sections().len(), 4);
    assert_eq!(layout.markers().len(), 16);
    assert_eq!(layout.triangles().len(), 4);

    let centre = layout.cell(7, 7).unwrap();
    assert_eq!(centre.color, Color::WHITE);
    assert_eq!(centre.placement.position.ground(), Vec2::ZERO);

    let expected = [
        (Quadrant::TopLeft, Vec2::new(-4.5, -4.5), Color::GREEN),
        (Quadrant::TopRight, Vec2::new(4.5, -4.5), Color::BLUE),
        (Quadrant::BottomLeft, Vec2::new(-4.5, 4.5), Color::RED),
        (Quadrant::BottomRight, Vec2::new(4.5, 4.5), Color::YELLOW),
    ];
    for (section, (quadrant, centre, color)) in layout.sections().iter().zip(expected) {
        assert_eq!(section.quadrant, quadrant);
        assert_eq!(section.center(), centre);
        assert_eq!(section.color, color);
    }
}

#[test]
fn test_even_board_builds_nothing() {
    let params = LayoutParameters {
        board_size: 14,
        ..LayoutParameters::default()
    };
    let err = generate(&params).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::InvalidConfiguration {
            parameter: "board_size",
            ..
        }
    ));
    assert!(err.to_string().contains("14"));
}

#[test]
fn test_duplicate_and_missing_colors_rejected() {
    let duplicate = LayoutParameters::new(
        15,
        6,
        &[Color::GREEN, Color::GREEN, Color::RED, Color::YELLOW],
    );
    assert_eq!(duplicate.unwrap_err().parameter(), Some("colors"));

    let three = LayoutParameters::new(15, 6, &[Color::GREEN, Color::BLUE, Color::RED]);
    assert_eq!(three.unwrap_err().parameter(), Some("colors"));
}

#[test]
fn test_outlines_stay_on_their_primitives() {
    let layout = generate(&standard()).unwrap();
    for primitive in layout.primitives() {
        let Some(outline) = primitive.outline else {
            continue;
        };
        assert_eq!(outline.placement, *primitive.placement);
        assert_eq!(outline.color, OUTLINE_COLOR);

        let corners = primitive.shape.boundary();
        assert_eq!(outline.segments.len(), corners.len());
        for (segment, corner) in outline.segments.iter().zip(&corners) {
            assert_eq!(segment.start, *corner);
        }
    }
}

#[test]
fn test_each_arm_matches_its_wedge() {
    let layout = generate(&standard()).unwrap();
    for triangle in layout.triangles() {
        let arm_colors: Vec<Color> = layout
            .cells()
            .iter()
            .filter(|cell| cell.kind.arm() == Some(triangle.arm))
            .map(|cell| cell.color)
            .collect();
        assert_eq!(arm_colors.len(), 7);
        assert!(arm_colors.iter().all(|color| *color == triangle.color));
    }
}

#[test]
fn test_wedges_point_at_their_arms() {
    let layout = generate(&standard()).unwrap();
    let c = layout.params().center_index();
    for triangle in layout.triangles() {
        // The cell just outside the wedge's base belongs to the same arm.
        let centroid = triangle
            .vertices
            .iter()
            .fold(Vec2::ZERO, |sum, v| sum + *v)
            * (1.0 / 3.0);
        let (row, col) = match triangle.arm {
            Arm::Left => (c, c - 2),
            Arm::Right => (c, c + 2),
            Arm::Top => (c - 2, c),
            Arm::Bottom => (c + 2, c),
        };
        let cell = layout.cell(row, col).unwrap();
        assert_eq!(cell.kind.arm(), Some(triangle.arm));
        let direction = cell.placement.position.ground();
        assert!(direction.x() * centroid.x() + direction.y() * centroid.y() > 0.0);
    }
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(generate(&standard()).unwrap(), generate(&standard()).unwrap());
}

#[test]
fn test_custom_colors_and_cell_size() {
    let params = LayoutParameters::new(
        21,
        8,
        &[Color::ORANGE, Color::PURPLE, Color::BLACK, Color::BLUE],
    )
    .unwrap()
    .with_cell_size(0.5);
    let layout = generate(&params).unwrap();

    assert_eq!(layout.cells().len(), 441);
    // (8 / 2 + 1.5) * 0.5
    assert_eq!(layout.sections()[3].center(), Vec2::new(2.75, 2.75));
    assert_eq!(layout.triangles()[0].color, Color::ORANGE);
    assert!((layout.half_extent() - 5.25).abs() < 1e-5);
}

#[test]
fn test_minimal_variant() {
    let params = standard().with_variant(BoardVariant::Minimal);
    let layout = generate(&params).unwrap();

    assert!(layout.cells().is_empty());
    assert!(layout.triangles().is_empty());
    let section = &layout.sections()[0];
    assert!(section.outline.is_none());
    assert!((section.safe_size - 4.8).abs() < 1e-5);
    assert!(layout.markers().iter().all(|m| m.outline.is_some()));
}

#[test]
fn test_layout_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BoardLayout>();

    let layout = Arc::new(generate(&standard()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let layout = Arc::clone(&layout);
            thread::spawn(move || layout.outline_count())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 253);
    }
}
