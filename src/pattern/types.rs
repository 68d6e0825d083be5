use serde::{Deserialize, Serialize};

macro_rules! index_type {
    ($vis:vis struct $name:ident;) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub u32);

        impl From<$name> for usize {
            fn from(idx: $name) -> usize {
                idx.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(idx: usize) -> $name {
                $name(idx as u32)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

index_type!(pub struct VertexIndex;);
index_type!(pub struct FaceIndex;);
index_type!(pub struct EdgeIndex;);

slotmap::new_key_type! {
    pub struct IslandKey;
}

/// A directed boundary edge: the corner `corner` of face `face` and the corner after it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdge {
    pub face: FaceIndex,
    pub corner: usize,
}

impl HalfEdge {
    pub fn new(face: FaceIndex, corner: usize) -> HalfEdge {
        HalfEdge { face, corner }
    }
}

/// Spreadsheet-column style name for the `n`th piece, counting from 1.
///
/// `1 -> "A"`, `26 -> "Z"`, `27 -> "AA"`. Zero has no name and gives an empty string.
pub fn piece_name(mut n: usize) -> String {
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
