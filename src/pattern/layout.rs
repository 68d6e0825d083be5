//! Placement of the alignment numbers.
//!
//! Labels never move. When two label boxes collide the bigger font is shrunk by one unit
//! (both when they are equal) until nothing collides or the fonts reach [`MIN_FONT_SIZE`].
//! This is a greedy fixed point: the result depends on insertion order and is not the
//! largest possible set of fonts, only a collision-free one.

use crate::util_3d::Vector2;

pub const MIN_FONT_SIZE: f32 = 1.0;
pub const DEFAULT_PASS_LIMIT: usize = 10_000;
/// Approximate advance of a digit, as a fraction of the font size.
const CHAR_WIDTH_EM: f32 = 0.6;

/// Axis-aligned box of a label, y growing downwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub top_left: Vector2,
    pub bottom_right: Vector2,
}

impl BoundingBox {
    pub fn top_right(&self) -> Vector2 {
        Vector2::new(self.bottom_right.x, self.top_left.y)
    }
    pub fn bottom_left(&self) -> Vector2 {
        Vector2::new(self.top_left.x, self.bottom_right.y)
    }

    fn contains(&self, p: Vector2) -> bool {
        self.top_left.x < p.x
            && p.x <= self.bottom_right.x
            && self.top_left.y < p.y
            && p.y <= self.bottom_right.y
    }

    fn overlaps(&self, other: &BoundingBox) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }

    /// Collision test on the corners that move when a font shrinks.
    ///
    /// The top-left corner is the fixed anchor and is not checked. Boxes that only share an
    /// edge do not collide.
    pub fn collides(&self, other: &BoundingBox) -> bool {
        if !self.overlaps(other) {
            return false;
        }
        let far_corners = |b: &BoundingBox| [b.bottom_right, b.bottom_left(), b.top_right()];
        far_corners(other).into_iter().any(|p| self.contains(p))
            || far_corners(self).into_iter().any(|p| other.contains(p))
    }
}

/// A text label anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: String,
    anchor: Vector2,
    font_size: f32,
    bbox: BoundingBox,
}

impl Label {
    pub fn new(text: impl Into<String>, anchor: Vector2, font_size: f32) -> Label {
        let text = text.into();
        let bbox = Self::measure(&text, anchor, font_size);
        Label {
            text,
            anchor,
            font_size,
            bbox,
        }
    }

    fn measure(text: &str, anchor: Vector2, font_size: f32) -> BoundingBox {
        let width = CHAR_WIDTH_EM * font_size * text.chars().count() as f32;
        BoundingBox {
            top_left: anchor,
            bottom_right: anchor + Vector2::new(width, font_size),
        }
    }

    /// The same label rendered with another font size.
    pub fn resized(&self, font_size: f32) -> Label {
        Label::new(self.text.clone(), self.anchor, font_size)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn anchor(&self) -> Vector2 {
        self.anchor
    }
    pub fn font_size(&self) -> f32 {
        self.font_size
    }
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }
    pub fn can_shrink(&self) -> bool {
        self.font_size > MIN_FONT_SIZE
    }
    fn shrunk(&self) -> Label {
        self.resized((self.font_size - 1.0).max(MIN_FONT_SIZE))
    }
}

/// Counters accumulated by a [`LabelLayout`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    /// Full pairwise passes performed, including the final one without changes.
    pub passes: usize,
    /// Number of single-unit font reductions.
    pub shrinks: usize,
    /// The pass limit was hit before reaching a fixed point.
    pub capped: bool,
}

#[derive(Clone, Debug)]
pub struct LabelLayout {
    labels: Vec<Label>,
    pass_limit: usize,
    report: LayoutReport,
}

impl Default for LabelLayout {
    fn default() -> Self {
        LabelLayout::with_pass_limit(DEFAULT_PASS_LIMIT)
    }
}

impl LabelLayout {
    pub fn with_pass_limit(pass_limit: usize) -> LabelLayout {
        LabelLayout {
            labels: Vec::new(),
            pass_limit: pass_limit.max(1),
            report: LayoutReport::default(),
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }
    pub fn len(&self) -> usize {
        self.labels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    /// Accumulated over every resolution since the layout was created.
    pub fn report(&self) -> LayoutReport {
        self.report
    }

    /// Adds a label and shrinks fonts until the layout is collision free again.
    ///
    /// Returns the index of the new label.
    pub fn insert(&mut self, label: Label) -> usize {
        self.labels.push(label);
        self.resolve();
        self.labels.len() - 1
    }

    /// Runs pairwise passes until one changes nothing or the pass limit is reached.
    ///
    /// Returns `true` if any font size changed.
    pub fn resolve(&mut self) -> bool {
        let mut changed = false;
        let mut passes = 0;
        loop {
            if passes == self.pass_limit {
                log::warn!(
                    "label layout stopped after {} passes with {} labels still colliding",
                    passes,
                    self.colliding_pairs().len()
                );
                self.report.capped = true;
                break;
            }
            passes += 1;
            let shrinks = self.pass();
            if shrinks == 0 {
                break;
            }
            self.report.shrinks += shrinks;
            changed = true;
        }
        self.report.passes += passes;
        changed
    }

    fn pass(&mut self) -> usize {
        let mut shrinks = 0;
        for i in 0..self.labels.len() {
            for j in i + 1..self.labels.len() {
                if !self.labels[i].bbox.collides(&self.labels[j].bbox) {
                    continue;
                }
                let (a, b) = (self.labels[i].font_size, self.labels[j].font_size);
                if a >= b && self.labels[i].can_shrink() {
                    self.labels[i] = self.labels[i].shrunk();
                    shrinks += 1;
                }
                if b >= a && self.labels[j].can_shrink() {
                    self.labels[j] = self.labels[j].shrunk();
                    shrinks += 1;
                }
            }
        }
        shrinks
    }

    /// Index pairs whose boxes still collide.
    pub fn colliding_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..self.labels.len() {
            for j in i + 1..self.labels.len() {
                if self.labels[i].bbox.collides(&self.labels[j].bbox) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
