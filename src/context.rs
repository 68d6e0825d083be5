use fxhash::{FxHashMap, FxHashSet};

use crate::pattern::{Label, LabelLayout};
use crate::util_3d::Vector2;

/// Rounded endpoints of a guide line, used to avoid drawing the same guide twice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositionKey([i64; 4]);

impl PositionKey {
    pub fn new(start: Vector2, end: Vector2) -> PositionKey {
        let r = |x: f32| x.round() as i64;
        PositionKey([r(start.x), r(start.y), r(end.x), r(end.y)])
    }
    pub fn reversed(&self) -> PositionKey {
        let [x0, y0, x1, y1] = self.0;
        PositionKey([x1, y1, x0, y0])
    }
}

/// State shared by every island during a single export.
///
/// Created by the export call and dropped with it; nothing carries over between runs.
pub struct ExportSession {
    identities: FxHashMap<u32, u32>,
    positions: FxHashSet<PositionKey>,
    layout: LabelLayout,
}

impl ExportSession {
    pub fn new(layout_pass_limit: usize) -> ExportSession {
        ExportSession {
            identities: FxHashMap::default(),
            positions: FxHashSet::default(),
            layout: LabelLayout::with_pass_limit(layout_pass_limit),
        }
    }

    /// The alignment number of a wire, assigning the next free one on first sight.
    pub fn identity(&mut self, wire_hash: u32) -> u32 {
        let next = self.identities.len() as u32;
        *self.identities.entry(wire_hash).or_insert(next)
    }

    pub fn num_identities(&self) -> usize {
        self.identities.len()
    }

    /// Records a guide position. Returns `false` if it, or its reverse, was already drawn.
    pub fn claim_position(&mut self, key: PositionKey) -> bool {
        if self.positions.contains(&key) || self.positions.contains(&key.reversed()) {
            return false;
        }
        self.positions.insert(key);
        true
    }

    pub fn place_label(&mut self, label: Label) -> usize {
        self.layout.insert(label)
    }

    pub fn into_layout(self) -> LabelLayout {
        self.layout
    }
}
