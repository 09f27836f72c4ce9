use serde::{Deserialize, Serialize};

/// Rectangular pallet surface. Integer units, opaque (millimetres in practice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletDims {
    pub l: u32,
    pub w: u32,
}

impl PalletDims {
    pub fn new(l: u32, w: u32) -> Self {
        Self { l, w }
    }
}

/// Rectangular box footprint plus height. `h` is never consulted by the 2D
/// solver but is carried through the data model and the emitted bundle for
/// the downstream collaborators (store/cache/PLC payload) that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxDims {
    pub l: u32,
    pub w: u32,
    pub h: u32,
}

impl BoxDims {
    pub fn new(l: u32, w: u32, h: u32) -> Self {
        Self { l, w, h }
    }
}

/// Which long side of a placed box runs parallel to the pallet's `L` axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    Deg0,
    Deg90,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }
}

/// A single box placement within a layer: stable identity, lower-left
/// origin, footprint and rotation tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub id: u32,
    pub x: u32,
    pub y: u32,
    pub bw: u32,
    pub bh: u32,
    pub rotation: Rotation,
}

impl Placement {
    /// Exclusive right edge (`x + bw`).
    pub fn right(&self) -> u32 {
        self.x + self.bw
    }
    /// Exclusive top edge (`y + bh`).
    pub fn top(&self) -> u32 {
        self.y + self.bh
    }
    pub fn area(&self) -> u64 {
        self.bw as u64 * self.bh as u64
    }
    /// True if `self`'s and `other`'s open rectangles intersect.
    pub fn overlaps(&self, other: &Placement) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.top() <= other.y
            || other.top() <= self.y)
    }
    /// Area of intersection between `self` and `other` (0 if disjoint).
    pub fn overlap_area(&self, other: &Placement) -> u64 {
        let ox = (self.right().min(other.right())) as i64 - (self.x.max(other.x)) as i64;
        let oy = (self.top().min(other.top())) as i64 - (self.y.max(other.y)) as i64;
        (ox.max(0) as u64) * (oy.max(0) as u64)
    }
}

/// Axis-aligned keep-out rectangle fed to the solver to perturb the search.
/// Never part of an emitted template.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Unordered set of placements over a pallet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Layer(pub Vec<Placement>);

impl Layer {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn box_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Placement> {
        self.0.iter_mut()
    }

    /// Sorted `(x, y, width, height)` tuples: the canonical identity of a
    /// layer's geometry up to reordering, used to deduplicate diversified
    /// upper layers in the generator.
    pub fn signature(&self) -> Vec<(u32, u32, u32, u32)> {
        let mut sig: Vec<(u32, u32, u32, u32)> =
            self.0.iter().map(|p| (p.x, p.y, p.bw, p.bh)).collect();
        sig.sort_unstable();
        sig
    }

    /// Checks the §3 geometric invariants of every placement against the
    /// given pallet and box dimensions, and that no two placements overlap.
    pub fn is_valid(&self, pallet: PalletDims, box_dims: BoxDims) -> bool {
        for p in &self.0 {
            let (l, w) = (box_dims.l, box_dims.w);
            let footprint_ok = (p.bw, p.bh) == (l, w) || (p.bw, p.bh) == (w, l);
            if !footprint_ok {
                return false;
            }
            if p.right() > pallet.l || p.top() > pallet.w {
                return false;
            }
        }
        for (i, a) in self.0.iter().enumerate() {
            for b in self.0.iter().skip(i + 1) {
                if a.overlaps(b) {
                    return false;
                }
            }
        }
        true
    }
}

impl IntoIterator for Layer {
    type Item = Placement;
    type IntoIter = std::vec::IntoIter<Placement>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Placement> for Layer {
    fn from_iter<T: IntoIterator<Item = Placement>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One box's record within an emitted template: setdown order, geometry and
/// the accessible label face.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub placement_order: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rotation: u32,
    pub label_face: u8,
}

/// A ranked, two-layer palletization template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub score: f64,
    pub layer1_box_count: usize,
    pub layer2_box_count: usize,
    pub layer1: Vec<PlacementRecord>,
    pub layer2: Vec<PlacementRecord>,
}

/// Metadata about one `generate` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationInfo {
    pub duration_seconds: f64,
    pub num_solutions_found: usize,
    /// How many of the up-to `5 * num_solutions` diversification attempts
    /// actually ran before early-stopping or exhaustion.
    pub attempts_made: usize,
}

/// The result of one generation call: inputs, timing, and ranked templates
/// (best score first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateBundle {
    pub generation_info: GenerationInfo,
    pub pallet_dimensions: PalletDims,
    pub box_dimensions: BoxDims,
    pub templates: Vec<Template>,
}
