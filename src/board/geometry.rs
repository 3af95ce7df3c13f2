//! Shapes and placements shared by every generated primitive.
//!
//! Shapes live in a local 2D frame on the board plane; a [`Placement`] lifts them
//! into world space. Local `u` maps to world `x` and local `v` to world `z`.

use serde::Serialize;

use crate::math::{Vec2, Vec3};

/// The primitive categories a layout is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimitiveKind {
    Cell,
    Section,
    SafeSquare,
    Marker,
    Triangle,
}

/// Where a primitive sits: a world position plus a rotation about the board normal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub position: Vec3,
    /// Counter-clockwise rotation in the board plane, in radians.
    pub yaw: f32,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Places a flat primitive at board-plane point `ground` and height `elevation`.
    pub fn on_board(ground: Vec2, elevation: f32) -> Self {
        Self::at(Vec3::new(ground.x(), elevation, ground.y()))
    }

    /// Maps a local shape point into world space.
    pub fn to_world(&self, local: Vec2) -> Vec3 {
        let turned = local.rotated(self.yaw);
        Vec3::new(
            self.position.x() + turned.x(),
            self.position.y(),
            self.position.z() + turned.y(),
        )
    }
}

/// Outline of a primitive in its own local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle centred on the local origin.
    Rect { width: f32, depth: f32 },
    /// Regular polygon approximating a circle, centred on the local origin.
    Disc { radius: f32, segments: u32 },
    /// Arbitrary triangle in local coordinates.
    Triangle { vertices: [Vec2; 3] },
}

impl Shape {
    pub fn square(size: f32) -> Self {
        Shape::Rect {
            width: size,
            depth: size,
        }
    }

    /// Closed boundary polygon, one entry per corner. The last corner connects
    /// back to the first.
    pub fn boundary(&self) -> Vec<Vec2> {
        match self {
            Shape::Rect { width, depth } => {
                let (hw, hd) = (width / 2.0, depth / 2.0);
                vec![
                    Vec2::new(-hw, -hd),
                    Vec2::new(hw, -hd),
                    Vec2::new(hw, hd),
                    Vec2::new(-hw, hd),
                ]
            }
            Shape::Disc { radius, segments } => {
                let segments = (*segments).max(3);
                (0..segments)
                    .map(|i| {
                        let angle = std::f32::consts::TAU * i as f32 / segments as f32;
                        Vec2::new(radius * angle.cos(), radius * angle.sin())
                    })
                    .collect()
            }
            Shape::Triangle { vertices } => vertices.to_vec(),
        }
    }

    /// Area of the shape as drawn (a disc counts as its polygon).
    pub fn area(&self) -> f32 {
        match self {
            Shape::Rect { width, depth } => width * depth,
            _ => polygon_area(&self.boundary()),
        }
    }

    /// True when `point` lies inside or on the boundary. All shapes are convex.
    pub fn contains(&self, point: Vec2) -> bool {
        let corners = self.boundary();
        let mut sign = 0.0f32;
        for (i, a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % corners.len()];
            let turn = (b - *a).perp_dot(&(point - *a));
            if turn.abs() <= 1e-6 {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        true
    }
}

/// Unsigned shoelace area of a simple polygon.
pub fn polygon_area(corners: &[Vec2]) -> f32 {
    let twice: f32 = corners
        .iter()
        .enumerate()
        .map(|(i, a)| a.perp_dot(&corners[(i + 1) % corners.len()]))
        .sum();
    twice.abs() / 2.0
}

/// A straight line piece in a primitive's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}
