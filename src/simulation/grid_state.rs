//! GridState - authoritative occupancy storage for one run
//!
//! Owns every cell, the occupant <-> position mapping and the set of empty
//! cells. Relocation is the only mutation after initialization, and it keeps
//! all three structures in lockstep:
//!
//! - `cells[p] == Some(id)` iff `positions[id] == p`
//! - `p` is in `empty` iff `cells[p]` is `None`
//! - `empty_slot[p]` is the index of `p` inside `empty`

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{OccupantId, Position, Race};
use crate::spatial::Grid;

pub struct GridState {
    cells: Grid<Option<OccupantId>>,
    /// Race of each occupant, indexed by `OccupantId`
    races: Vec<Race>,
    /// Current position of each occupant, indexed by `OccupantId`
    positions: Vec<Position>,
    /// Empty cells, unordered, for O(1) uniform sampling
    empty: Vec<Position>,
    empty_slot: Grid<Option<usize>>,
}

impl GridState {
    /// Populate a fresh grid from `config`
    ///
    /// All cells are shuffled once with `rng`; the first
    /// `config.occupant_count()` shuffled cells receive occupants and the
    /// rest stay empty. Races are dealt round-robin along the shuffled order
    /// (occupant `i` gets race `i % races`), so race sizes differ by at most
    /// one.
    pub fn initialize<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut state = Self::blank(config.width, config.height);
        let mut order: Vec<Position> = state.cells.positions().collect();
        order.shuffle(rng);

        let occupants = config.occupant_count();
        for (i, &pos) in order.iter().enumerate() {
            if i < occupants {
                let race = Race(i as u32 % config.races);
                state.place(pos, race);
            } else {
                state.mark_empty(pos);
            }
        }

        Ok(state)
    }

    /// Build a grid with occupants at fixed positions
    ///
    /// Occupant ids follow the order of `layout`. Every cell not listed is
    /// empty.
    pub fn from_layout(width: usize, height: usize, layout: &[(Position, Race)]) -> Result<Self> {
        let mut state = Self::blank(width, height);

        for &(pos, race) in layout {
            match state.cells.get(pos).copied() {
                None => {
                    return Err(SimError::InvariantViolation(format!(
                        "layout position {} outside {}x{} grid",
                        pos, width, height
                    )))
                }
                Some(Some(other)) => {
                    return Err(SimError::InvariantViolation(format!(
                        "layout position {} already holds {}",
                        pos, other
                    )))
                }
                Some(None) => state.place(pos, race),
            }
        }

        let vacant: Vec<Position> = state
            .cells
            .iter()
            .filter(|(_, cell)| cell.is_none())
            .map(|(pos, _)| pos)
            .collect();
        for pos in vacant {
            state.mark_empty(pos);
        }

        Ok(state)
    }

    fn blank(width: usize, height: usize) -> Self {
        Self {
            cells: Grid::new(width, height),
            races: Vec::new(),
            positions: Vec::new(),
            empty: Vec::new(),
            empty_slot: Grid::new(width, height),
        }
    }

    fn place(&mut self, pos: Position, race: Race) {
        let id = OccupantId(self.races.len() as u32);
        self.races.push(race);
        self.positions.push(pos);
        self.cells.set(pos, Some(id));
    }

    fn mark_empty(&mut self, pos: Position) {
        self.empty_slot.set(pos, Some(self.empty.len()));
        self.empty.push(pos);
    }

    pub fn width(&self) -> usize {
        self.cells.width
    }

    pub fn height(&self) -> usize {
        self.cells.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupant_count(&self) -> usize {
        self.races.len()
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// In-bounds Moore neighbours of `pos`, occupied or not
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells.moore_neighbors(pos)
    }

    /// Occupants living in the Moore neighbourhood of `pos`
    pub fn occupied_neighbors(&self, pos: Position) -> impl Iterator<Item = OccupantId> + '_ {
        self.neighbors(pos).filter_map(move |p| self.occupant_at(p))
    }

    pub fn occupant_at(&self, pos: Position) -> Option<OccupantId> {
        self.cells.get(pos).copied().flatten()
    }

    /// True for an in-bounds cell with no occupant
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.cells.get(pos), Some(None))
    }

    /// Race of an occupant of this grid
    ///
    /// Panics if `id` was not handed out by this grid.
    pub fn race_of(&self, id: OccupantId) -> Race {
        self.races[id.index()]
    }

    /// Current position of an occupant of this grid
    ///
    /// Panics if `id` was not handed out by this grid.
    pub fn position_of(&self, id: OccupantId) -> Position {
        self.positions[id.index()]
    }

    /// Living occupants in row-major order of their current cells
    ///
    /// The iterator borrows the grid, so callers that relocate while
    /// traversing collect it first.
    pub fn occupants(&self) -> impl Iterator<Item = OccupantId> + '_ {
        self.cells.iter().filter_map(|(_, cell)| *cell)
    }

    /// Uniformly random empty cell, or `None` when the grid is full
    pub fn random_empty_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.empty.choose(rng).copied()
    }

    /// Move `id` onto the empty cell `target`, returning the cell it left
    ///
    /// Relocating onto an occupied or out-of-bounds cell is a bookkeeping
    /// bug and fails with `InvariantViolation`; the grid is left unchanged.
    pub fn relocate(&mut self, id: OccupantId, target: Position) -> Result<Position> {
        let from = *self.positions.get(id.index()).ok_or_else(|| {
            SimError::InvariantViolation(format!("unknown {}", id))
        })?;

        if self.occupant_at(from) != Some(id) {
            return Err(SimError::InvariantViolation(format!(
                "{} recorded at {} but the cell disagrees",
                id, from
            )));
        }

        let slot = match self.empty_slot.get(target) {
            Some(Some(slot)) => *slot,
            Some(None) => {
                return Err(SimError::InvariantViolation(format!(
                    "relocation target {} is occupied",
                    target
                )))
            }
            None => {
                return Err(SimError::InvariantViolation(format!(
                    "relocation target {} is outside the grid",
                    target
                )))
            }
        };

        // Take target out of the empty set
        self.empty.swap_remove(slot);
        if let Some(&moved) = self.empty.get(slot) {
            self.empty_slot.set(moved, Some(slot));
        }
        self.empty_slot.set(target, None);

        // Vacate the old cell
        self.cells.set(from, None);
        self.mark_empty(from);

        self.cells.set(target, Some(id));
        self.positions[id.index()] = target;

        Ok(from)
    }

    /// Check every bookkeeping invariant, reporting the first mismatch
    pub fn verify(&self) -> Result<()> {
        let fail = |msg: String| -> Result<()> { Err(SimError::InvariantViolation(msg)) };

        if self.occupant_count() + self.empty_count() != self.cell_count() {
            return fail(format!(
                "{} occupants + {} empty != {} cells",
                self.occupant_count(),
                self.empty_count(),
                self.cell_count()
            ));
        }

        for (i, &pos) in self.positions.iter().enumerate() {
            let id = OccupantId(i as u32);
            if self.occupant_at(pos) != Some(id) {
                return fail(format!("{} recorded at {} but the cell disagrees", id, pos));
            }
        }

        for (slot, &pos) in self.empty.iter().enumerate() {
            if !self.is_empty(pos) {
                return fail(format!("empty set lists occupied cell {}", pos));
            }
            if self.empty_slot.get(pos).copied().flatten() != Some(slot) {
                return fail(format!("empty slot index for {} is stale", pos));
            }
        }

        Ok(())
    }
}
