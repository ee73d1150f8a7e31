//! Dense 3D array storage.

use std::ops::{Index, IndexMut};

/// A dense three-dimensional array laid out x-fastest, then y, then z.
///
/// Flat index of `(x, y, z)` is `x + nx * (y + ny * z)`. The grid owns all
/// of its elements in one allocation and never reallocates after
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid3<T> {
    nx: usize,
    ny: usize,
    nz: usize,
    data: Vec<T>,
}

impl<T> Grid3<T> {
    /// Build a grid by evaluating `f(x, y, z)` for every element in flat order.
    pub fn from_fn(
        nx: usize,
        ny: usize,
        nz: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(nx * ny * nz);
        for z in 0..nz {
            for y in 0..ny {
                for x in 0..nx {
                    data.push(f(x, y, z));
                }
            }
        }
        Self { nx, ny, nz, data }
    }

    /// Extents as `[nx, ny, nz]`.
    pub fn dims(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total element count.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if any extent is zero.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Distance in the flat array between `(x, y, z)` and `(x, y + 1, z)`.
    pub fn stride_y(&self) -> usize {
        self.nx
    }

    /// Distance in the flat array between `(x, y, z)` and `(x, y, z + 1)`.
    pub fn stride_z(&self) -> usize {
        self.nx * self.ny
    }

    /// `true` if `(x, y, z)` addresses an element.
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.nx && y < self.ny && z < self.nz
    }

    /// Flat index of `(x, y, z)`. Debug builds check bounds.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            self.contains(x, y, z),
            "({x}, {y}, {z}) outside {}x{}x{} grid",
            self.nx,
            self.ny,
            self.nz
        );
        x + self.nx * (y + self.ny * z)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coords_of(&self, index: usize) -> [usize; 3] {
        let x = index % self.nx;
        let yz = index / self.nx;
        [x, yz % self.ny, yz / self.ny]
    }

    /// Element at `(x, y, z)`, or `None` out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&T> {
        if self.contains(x, y, z) {
            Some(&self.data[self.index_of(x, y, z)])
        } else {
            None
        }
    }

    /// Mutable element at `(x, y, z)`, or `None` out of bounds.
    pub fn get_mut(&mut self, x: usize, y: usize, z: usize) -> Option<&mut T> {
        if self.contains(x, y, z) {
            let i = self.index_of(x, y, z);
            Some(&mut self.data[i])
        } else {
            None
        }
    }

    /// All elements in flat order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All elements in flat order, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate elements in flat order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Iterate elements mutably in flat order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }
}

impl<T: Clone> Grid3<T> {
    /// Build a grid with every element set to `value`.
    pub fn filled(nx: usize, ny: usize, nz: usize, value: T) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![value; nx * ny * nz],
        }
    }
}

impl<T> Index<usize> for Grid3<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Grid3<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> Index<[usize; 3]> for Grid3<T> {
    type Output = T;

    #[inline]
    fn index(&self, [x, y, z]: [usize; 3]) -> &T {
        &self.data[self.index_of(x, y, z)]
    }
}

impl<T> IndexMut<[usize; 3]> for Grid3<T> {
    #[inline]
    fn index_mut(&mut self, [x, y, z]: [usize; 3]) -> &mut T {
        let i = self.index_of(x, y, z);
        &mut self.data[i]
    }
}
