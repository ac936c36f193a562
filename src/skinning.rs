//! Bone-weight distribution along an extrusion, and the UV tunnel.
//!
//! Weighting is described by "stops", conceptually like a linear gradient
//! with a finite set of colors: at a stop, a single bone owns the vertex
//! entirely; between stops naming different bones, weight hands off
//! linearly. Chained bones therefore read as stepped weighting over each
//! bone's `length` with a straight-line transition over its `transition`.
//!
//! Blended weights ride through the extrusion pipeline as real per-vertex
//! attributes. Only at the boolean-solid boundary, which preserves nothing
//! beyond a position and one UV pair, are they packed into two scalars
//! ([`BlendedWeight::pack`](struct.BlendedWeight.html#method.pack)) and
//! decoded again on the far side ([`unpack_skin`](fn.unpack_skin.html)).

use log::debug;

use crate::error::Error;
use crate::geometry::Geometry;
use crate::skeleton::{BoneId, Skeleton};

/// A point along an extrusion where weighting is pinned fully to one bone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stop {
    /// Index of the bone that owns this stop.
    pub bone: usize,
    /// Distance along the extrusion, not a ratio.
    pub offset: f32,
}

/// Blending toward a bone outside an extrusion's own chain.
///
/// The first stretch of a part's geometry may want to fade in a bone that
/// is not part of the generated segment list, such as a leg blending into
/// the spine bone it hangs from.
#[derive(Clone, Copy, Debug)]
pub struct Feather {
    /// The outside bone to blend from.
    pub bone: BoneId,
    /// Length of the fade, from the start of the extrusion.
    pub length: f32,
}

/// Ordered bone stops defining piecewise-linear weighting along an
/// extrusion axis.
///
/// Built once per extrusion and immutable thereafter.
#[derive(Clone, Debug)]
pub struct StopSequence {
    stops: Vec<Stop>,
}

impl StopSequence {
    /// Validate and freeze a list of stops.
    ///
    /// Offsets must be non-decreasing; equal offsets are a hard edge
    /// between two bones with no blend.
    pub fn new(stops: Vec<Stop>) -> Result<Self, Error> {
        if stops.is_empty() {
            return Err(Error::NoStops);
        }
        for (index, pair) in stops.windows(2).enumerate() {
            if pair[1].offset < pair[0].offset {
                return Err(Error::DecreasingOffset(index + 1));
            }
        }
        Ok(StopSequence { stops })
    }

    /// Lay out stops for a chain of bones, putting a stop at both ends of
    /// each bone's `length` span and leaving the gap of its `transition`
    /// open so the next bone's stop produces the hand-off.
    ///
    /// A feather puts one extra stop for an outside bone at offset 0 and
    /// pushes the first chain bone's span to start at the feather length.
    pub fn from_bones(
        skeleton: &Skeleton,
        chain: &[BoneId],
        feather: Option<Feather>,
    ) -> Result<Self, Error> {
        let mut stops = Vec::with_capacity(chain.len() * 2 + 1);
        let mut first_offset = 0.0;
        if let Some(feather) = feather {
            stops.push(Stop {
                bone: skeleton.bone(feather.bone).index,
                offset: 0.0,
            });
            first_offset = feather.length;
        }
        let mut distance = 0.0;
        for (i, &id) in chain.iter().enumerate() {
            let bone = skeleton.bone(id);
            stops.push(Stop {
                bone: bone.index,
                offset: if i == 0 { first_offset } else { distance },
            });
            distance += bone.length;
            stops.push(Stop {
                bone: bone.index,
                offset: distance,
            });
            distance += bone.transition;
        }
        StopSequence::new(stops)
    }

    /// The frozen stops.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Blended bone pair at a distance along the extrusion.
    ///
    /// Finds the two stops bracketing `distance` by linear scan (stop
    /// counts are single digits). An exact offset match counts as both
    /// brackets; distances outside the covered range clamp to the boundary
    /// stop. Brackets naming the same bone need no transition.
    pub fn weight_at(&self, distance: f32) -> BlendedWeight {
        let mut prev = &self.stops[0];
        let mut next = &self.stops[0];
        for stop in &self.stops {
            next = stop;
            if stop.offset == distance {
                prev = stop;
                break;
            }
            if stop.offset > distance {
                break;
            }
            // keeps the last stop as both brackets when we run off the end
            prev = stop;
        }

        if prev.bone == next.bone || next.offset <= prev.offset {
            return BlendedWeight::single(prev.bone);
        }
        let ratio = (distance - prev.offset) / (next.offset - prev.offset);
        BlendedWeight {
            bone_a: prev.bone,
            weight_a: 1.0 - ratio,
            bone_b: next.bone,
            weight_b: ratio,
        }
    }
}

/// Two-bone weighting of a single vertex. Weights sum to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedWeight {
    /// First bone index.
    pub bone_a: usize,
    /// Weight of the first bone.
    pub weight_a: f32,
    /// Second bone index. Equal to `bone_a` when no blending is in effect.
    pub bone_b: usize,
    /// Weight of the second bone.
    pub weight_b: f32,
}

impl BlendedWeight {
    /// Full weight on one bone.
    pub fn single(bone: usize) -> Self {
        BlendedWeight {
            bone_a: bone,
            weight_a: 1.0,
            bone_b: bone,
            weight_b: 0.0,
        }
    }

    /// Pack into a UV pair: each coordinate carries a bone index in its
    /// whole part and the *other* bone's weight in its fractional part.
    /// Weights never reach 1.0 inside a blend, so the fraction is free.
    /// `(bone_a, 0)` when not blending.
    pub fn pack(&self) -> mint::Point2<f32> {
        if self.weight_b == 0.0 || self.bone_a == self.bone_b {
            mint::Point2 {
                x: self.bone_a as f32,
                y: 0.0,
            }
        } else {
            mint::Point2 {
                x: self.bone_a as f32 + self.weight_b,
                y: self.bone_b as f32 + self.weight_a,
            }
        }
    }

    /// Inverse of [`pack`](#method.pack).
    ///
    /// Whole parts are the bone indices, fractions the opposite weights,
    /// re-normalized so the pair sums to 1. Both fractions at zero means an
    /// unblended vertex. Expects non-negative coordinates; the solid stage
    /// only ever interpolates packed values, which cannot go negative.
    pub fn unpack(uv: mint::Point2<f32>) -> BlendedWeight {
        let bone_a = uv.x.floor();
        let weight_b = uv.x - bone_a;
        let bone_b = uv.y.floor();
        let weight_a = uv.y - bone_b;
        let total = weight_a + weight_b;
        if total < 1e-6 {
            return BlendedWeight::single(bone_a as usize);
        }
        BlendedWeight {
            bone_a: bone_a as usize,
            weight_a: weight_a / total,
            bone_b: bone_b as usize,
            weight_b: weight_b / total,
        }
    }
}

/// Per-vertex two-bone skin buffers in the layout a skinned-mesh renderer
/// consumes.
#[derive(Clone, Debug, Default)]
pub struct SkinAttributes {
    /// Bone index pair per vertex.
    pub indices: Vec<[u16; 2]>,
    /// Bone weight pair per vertex, summing to 1.
    pub weights: Vec<[f32; 2]>,
}

/// Decode the tunneled UV channel of a composed mesh into explicit skin
/// buffers.
///
/// Any decoded index outside `[0, bone_count)` means the tunnel encoding
/// broke somewhere upstream and fails the build.
pub fn unpack_skin(geometry: &Geometry, bone_count: usize) -> Result<SkinAttributes, Error> {
    if geometry.tex_coords.len() != geometry.vertices.len() {
        return Err(Error::MissingWeights);
    }
    let mut indices = Vec::with_capacity(geometry.vertices.len());
    let mut weights = Vec::with_capacity(geometry.vertices.len());
    for uv in &geometry.tex_coords {
        if uv.x < 0.0 || uv.y < 0.0 {
            return Err(Error::BoneIndexRange(usize::MAX, bone_count));
        }
        let blended = BlendedWeight::unpack(*uv);
        if blended.bone_a >= bone_count || blended.bone_b >= bone_count {
            let bad = blended.bone_a.max(blended.bone_b);
            return Err(Error::BoneIndexRange(bad, bone_count));
        }
        indices.push([blended.bone_a as u16, blended.bone_b as u16]);
        weights.push([blended.weight_a, blended.weight_b]);
    }
    debug!("unpacked skin data for {} vertices", indices.len());
    Ok(SkinAttributes { indices, weights })
}
