//! Direction-pruned 26-connected neighbourhoods.
//!
//! A wavefront that reached a cell by stepping in direction `d` cannot
//! improve cells behind it, so expansion only needs offsets `o` with
//! `o_i * d_i >= 0` on every axis. That leaves 17 offsets after a face step,
//! 11 after an edge step and 7 after a corner step. The zero direction
//! ([`Direction::FULL`]) expands all 26.
//!
//! [`NeighborTable`] stores all 27 subsets back to back (316 entries) with
//! flat offsets precomputed for one padded grid layout.

use glam::IVec3;
use std::fmt;
use std::ops::Range;

/// One of the 27 step directions `(dx, dy, dz) ∈ {-1, 0, 1}³`.
///
/// Encoded as `(dx + 1) + 3 (dy + 1) + 9 (dz + 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    /// The zero step: expand the whole neighbourhood.
    pub const FULL: Direction = Direction(13);

    /// Number of direction codes.
    pub const COUNT: usize = 27;

    /// Direction of the unit step `offset`. Components are clamped to
    /// `-1..=1`.
    pub fn from_offset(offset: IVec3) -> Self {
        let o = offset.clamp(IVec3::NEG_ONE, IVec3::ONE) + IVec3::ONE;
        Direction((o.x + 3 * o.y + 9 * o.z) as u8)
    }

    /// Direction with raw code `code`, if `code < 27`.
    pub fn from_code(code: u8) -> Option<Self> {
        ((code as usize) < Self::COUNT).then_some(Direction(code))
    }

    /// Raw code in `0..27`.
    pub fn code(self) -> u8 {
        self.0
    }

    /// The unit step this direction encodes.
    pub fn offset(self) -> IVec3 {
        let c = i32::from(self.0);
        IVec3::new(c % 3 - 1, (c / 3) % 3 - 1, c / 9 - 1)
    }

    /// `true` for [`FULL`](Self::FULL).
    pub fn is_full(self) -> bool {
        self == Self::FULL
    }

    /// `true` if a wavefront travelling along `self` should expand `offset`.
    pub fn allows(self, offset: IVec3) -> bool {
        let d = self.offset();
        offset != IVec3::ZERO && (offset * d).cmpge(IVec3::ZERO).all()
    }

    /// Iterate all 27 directions in code order.
    pub fn all() -> impl Iterator<Item = Direction> {
        (0..Self::COUNT as u8).map(Direction)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.offset();
        write!(f, "Direction({}, {}, {})", o.x, o.y, o.z)
    }
}

/// Precomputed neighbour subsets for every [`Direction`].
///
/// Entry `i` carries the unit offset, the matching flat-array offset for
/// the layout given at construction, and the direction a neighbour reached
/// through it inherits.
#[derive(Clone, Debug)]
pub struct NeighborTable {
    ranges: [Range<u16>; Direction::COUNT],
    offsets: Vec<IVec3>,
    flat: Vec<isize>,
    dirs: Vec<Direction>,
}

impl NeighborTable {
    /// Build the table for an x-fastest layout with the given strides.
    pub fn new(stride_y: usize, stride_z: usize) -> Self {
        let (sy, sz) = (stride_y as isize, stride_z as isize);
        let mut ranges: [Range<u16>; Direction::COUNT] = std::array::from_fn(|_| 0..0);
        let mut offsets = Vec::with_capacity(316);
        let mut flat = Vec::with_capacity(316);
        let mut dirs = Vec::with_capacity(316);

        for dir in Direction::all() {
            let start = offsets.len() as u16;
            for o in unit_offsets().filter(|&o| dir.allows(o)) {
                offsets.push(o);
                flat.push(o.x as isize + o.y as isize * sy + o.z as isize * sz);
                dirs.push(Direction::from_offset(o));
            }
            ranges[dir.code() as usize] = start..offsets.len() as u16;
        }

        Self {
            ranges,
            offsets,
            flat,
            dirs,
        }
    }

    /// Entry indices belonging to `dir`'s subset.
    #[inline]
    pub fn range(&self, dir: Direction) -> Range<usize> {
        let r = &self.ranges[dir.code() as usize];
        r.start as usize..r.end as usize
    }

    /// Number of offsets `dir` expands.
    pub fn subset_len(&self, dir: Direction) -> usize {
        self.range(dir).len()
    }

    /// Flat-array offset of entry `i`.
    #[inline]
    pub fn flat_offset(&self, i: usize) -> isize {
        self.flat[i]
    }

    /// Unit offset of entry `i`.
    #[inline]
    pub fn offset(&self, i: usize) -> IVec3 {
        self.offsets[i]
    }

    /// Direction inherited through entry `i`.
    #[inline]
    pub fn direction(&self, i: usize) -> Direction {
        self.dirs[i]
    }

    /// Total entries across all subsets.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// The 26 non-zero unit offsets, z-then-y-then-x.
fn unit_offsets() -> impl Iterator<Item = IVec3> {
    (-1..=1)
        .flat_map(|z| (-1..=1).flat_map(move |y| (-1..=1).map(move |x| IVec3::new(x, y, z))))
        .filter(|&o| o != IVec3::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nonzero_axes(d: Direction) -> i32 {
        let o = d.offset();
        o.x.abs() + o.y.abs() + o.z.abs()
    }

    #[test]
    fn code_round_trip() {
        for d in Direction::all() {
            assert_eq!(Direction::from_offset(d.offset()), d);
            assert_eq!(Direction::from_code(d.code()), Some(d));
        }
        assert_eq!(Direction::from_offset(IVec3::ZERO), Direction::FULL);
        assert!(Direction::from_code(27).is_none());
    }

    #[test]
    fn from_offset_clamps() {
        assert_eq!(
            Direction::from_offset(IVec3::new(5, -3, 0)),
            Direction::from_offset(IVec3::new(1, -1, 0))
        );
    }

    #[test]
    fn subset_sizes() {
        let t = NeighborTable::new(12, 144);
        for d in Direction::all() {
            let expected = match nonzero_axes(d) {
                0 => 26,
                1 => 17,
                2 => 11,
                _ => 7,
            };
            assert_eq!(t.subset_len(d), expected, "{d:?}");
        }
        assert_eq!(t.len(), 316);
    }

    #[test]
    fn entries_respect_direction() {
        let t = NeighborTable::new(12, 144);
        for d in Direction::all() {
            for i in t.range(d) {
                let o = t.offset(i);
                assert!(d.allows(o));
                assert_eq!(t.direction(i), Direction::from_offset(o));
                assert_eq!(t.flat_offset(i), (o.x + 12 * o.y + 144 * o.z) as isize);
            }
        }
    }

    #[test]
    fn full_subset_is_whole_neighbourhood() {
        let t = NeighborTable::new(5, 25);
        let mut seen: Vec<IVec3> = t.range(Direction::FULL).map(|i| t.offset(i)).collect();
        seen.sort_by_key(|o| (o.z, o.y, o.x));
        seen.dedup();
        assert_eq!(seen.len(), 26);
        assert!(!seen.contains(&IVec3::ZERO));
    }

    #[test]
    fn corner_subset_points_forward() {
        let t = NeighborTable::new(5, 25);
        let d = Direction::from_offset(IVec3::ONE);
        for i in t.range(d) {
            assert!(t.offset(i).cmpge(IVec3::ZERO).all());
        }
    }
}
