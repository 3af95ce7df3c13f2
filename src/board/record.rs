//! Flat, serializable view of a layout for export.

use serde::Serialize;

use super::geometry::PrimitiveKind;
use super::layout::{BoardLayout, Primitive};
use super::params::Quadrant;

/// One exported primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveRecord {
    pub kind: PrimitiveKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quadrant: Option<Quadrant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// `#rrggbb`.
    pub color: String,
    pub has_outline: bool,
}

impl From<Primitive<'_>> for PrimitiveRecord {
    fn from(primitive: Primitive<'_>) -> Self {
        let position = primitive.placement.position;
        Self {
            kind: primitive.kind,
            quadrant: primitive.quadrant,
            row: primitive.cell.map(|(row, _)| row),
            col: primitive.cell.map(|(_, col)| col),
            slot: primitive.slot,
            x: position.x(),
            y: position.y(),
            z: position.z(),
            color: primitive.color.to_string(),
            has_outline: primitive.outline.is_some(),
        }
    }
}

impl BoardLayout {
    /// One record per primitive, in [`BoardLayout::primitives`] order.
    pub fn records(&self) -> Vec<PrimitiveRecord> {
        self.primitives().map(PrimitiveRecord::from).collect()
    }

    /// Pretty-printed JSON array of [`records`](Self::records).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.records())
    }
}
