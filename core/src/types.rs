use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and in-board positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional board-local coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` is one of the four corner cells of a `size` board.
pub const fn is_corner(coords: Coord2, size: Coord2) -> bool {
    let last_x = size.0.saturating_sub(1);
    let last_y = size.1.saturating_sub(1);
    (coords.0 == 0 || coords.0 == last_x) && (coords.1 == 0 || coords.1 == last_y)
}

/// A cell position on the shared world grid, where every session is anchored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves the point, or `None` when it would leave the `i32` plane.
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self::new(x, y)),
            _ => None,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned, half-open rectangle `[left, right) x [top, bottom)` on the world grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl BoundingBox {
    /// Box of a `size` board anchored at `origin`. `None` when the far edge does not fit
    /// in `i32`.
    pub const fn from_origin(origin: Point, size: Coord2) -> Option<Self> {
        match origin.checked_offset(size.0 as i32, size.1 as i32) {
            Some(end) => Some(Self {
                left: origin.x,
                top: origin.y,
                right: end.x,
                bottom: end.y,
            }),
            None => None,
        }
    }

    pub const fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Boxes overlap unless they are fully separated on at least one axis.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterates the 8-connected neighborhood of a cell, clipped at the grid boundary.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn neighbors_are_clipped_at_edges() {
        let corner: Vec<_> = NeighborIter::new((0, 0), (5, 5)).collect();
        assert_eq!(corner, [(1, 0), (0, 1), (1, 1)]);

        let middle = NeighborIter::new((2, 2), (5, 5)).count();
        assert_eq!(middle, 8);
    }

    #[test]
    fn corners_of_a_rectangle() {
        let size = (5, 7);
        assert!(is_corner((0, 0), size));
        assert!(is_corner((4, 0), size));
        assert!(is_corner((0, 6), size));
        assert!(is_corner((4, 6), size));
        assert!(!is_corner((2, 0), size));
        assert!(!is_corner((4, 3), size));
    }

    #[test]
    fn overlapping_boxes() {
        let a = BoundingBox::from_origin(Point::new(0, 0), (10, 10)).unwrap();
        let b = BoundingBox::from_origin(Point::new(5, 5), (10, 10)).unwrap();
        let c = BoundingBox::from_origin(Point::new(10, 0), (10, 10)).unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn box_contains_is_half_open() {
        let bounds = BoundingBox::from_origin(Point::new(-3, 2), (5, 5)).unwrap();
        assert!(bounds.contains(Point::new(-3, 2)));
        assert!(bounds.contains(Point::new(1, 6)));
        assert!(!bounds.contains(Point::new(2, 6)));
        assert!(!bounds.contains(Point::new(1, 7)));
    }

    #[test]
    fn box_past_the_plane_edge_is_rejected() {
        assert_eq!(BoundingBox::from_origin(Point::new(i32::MAX, 0), (5, 5)), None);
        assert_eq!(BoundingBox::from_origin(Point::new(0, i32::MAX - 4), (5, 5)), None);

        let edge = BoundingBox::from_origin(Point::new(i32::MAX - 5, 0), (5, 5)).unwrap();
        assert_eq!(edge.right, i32::MAX);
        assert!(edge.contains(Point::new(i32::MAX - 1, 4)));
        assert_eq!(Point::new(i32::MIN, 0).checked_offset(-1, -1), None);
    }
}
