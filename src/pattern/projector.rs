use crate::util_3d::Vector2;

/// Document size, in millimetres, of the unit UV square at a world scale of one.
pub const DOCUMENT_MM: f32 = 1000.0;

/// Maps UV space (y up) into the millimetre document (y down).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    scale: f32,
}

impl Projector {
    pub fn new(uv_to_world_scale: f32) -> Projector {
        Projector {
            scale: DOCUMENT_MM * uv_to_world_scale,
        }
    }

    /// Side of the square document.
    pub fn document_size(&self) -> f32 {
        self.scale
    }

    pub fn project(&self, uv: Vector2) -> Vector2 {
        Vector2::new(uv.x * self.scale, (1.0 - uv.y) * self.scale)
    }
}
