//! Generic grid for spatial data

use crate::core::types::Position;

/// Offsets of the eight Moore neighbours, row-major
const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Bounded 2D grid stored row-major
#[derive(Debug, Clone)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        if self.in_bounds(pos) {
            Some(&self.data[pos.row * self.width + pos.col])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if self.in_bounds(pos) {
            Some(&mut self.data[pos.row * self.width + pos.col])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, pos: Position, value: T) {
        if let Some(cell) = self.get_mut(pos) {
            *cell = value;
        }
    }

    /// Row-major index of a position (caller guarantees bounds)
    #[inline]
    pub fn index_of(&self, pos: Position) -> usize {
        pos.row * self.width + pos.col
    }

    /// Position of a row-major index
    #[inline]
    pub fn position_of(&self, index: usize) -> Position {
        Position::new(index / self.width, index % self.width)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.data.len()).map(move |i| self.position_of(i))
    }

    /// Cells paired with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.position_of(i), cell))
    }

    /// In-bounds Moore neighbours of `pos`
    ///
    /// The grid does not wrap: interior cells have 8 neighbours, edge cells 5
    /// and corner cells 3.
    pub fn moore_neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let (width, height) = (self.width, self.height);
        MOORE_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            (row < height && col < width).then_some(Position::new(row, col))
        })
    }
}
