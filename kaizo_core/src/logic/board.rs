use crate::engine::move_list::MoveList;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt::{self, Write};

pub const BOARD_SIZE: usize = 7;
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const UNITS_PER_KIND: usize = 4;
pub const UNITS_PER_SIDE: usize = UNITS_PER_KIND * 2;
pub const UNIT_COUNT: usize = UNITS_PER_SIDE * 2;

const LAST: u8 = (BOARD_SIZE - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Plays from the bottom rows and moves towards row 0.
    Human,
    /// Plays from the top rows and moves towards the last row.
    Computer,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Human => Self::Computer,
            Self::Computer => Self::Human,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Human => 0,
            Self::Computer => 1,
        }
    }

    /// Row delta of a retreating step.
    pub const fn backward_step(self) -> i8 {
        match self {
            Self::Human => 1,
            Self::Computer => -1,
        }
    }

    /// Stable unit indices owned by this side.
    pub const fn units(self) -> std::ops::Range<usize> {
        match self {
            Self::Human => 0..UNITS_PER_SIDE,
            Self::Computer => UNITS_PER_SIDE..UNIT_COUNT,
        }
    }

    /// Fixed square of this side's objective.
    pub const fn objective(self) -> Coord {
        match self {
            Self::Human => Coord::at(5, 3),
            Self::Computer => Coord::at(1, 3),
        }
    }

    pub const fn walls(self) -> [Coord; 2] {
        match self {
            Self::Human => [Coord::at(5, 2), Coord::at(5, 4)],
            Self::Computer => [Coord::at(1, 2), Coord::at(1, 4)],
        }
    }

    /// Row from which this side may strike the enemy objective: one step past
    /// it in this side's direction of travel.
    pub const fn siege_row(self) -> u8 {
        let target = self.opposite().objective();
        match self {
            Self::Human => target.row - 1,
            Self::Computer => target.row + 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Diagonal mover.
    TypeOne,
    /// Orthogonal mover with a lateral cooldown.
    TypeTwo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    /// Display-only marker for a reachable square. Rules treat it as empty.
    Hint,
    Unit(Side, UnitKind),
    Wall(Side),
    Objective(Side),
}

impl Cell {
    pub const fn glyph(self) -> char {
        match self {
            Self::Empty => '-',
            Self::Hint => 'o',
            Self::Unit(Side::Human, UnitKind::TypeOne) => 'x',
            Self::Unit(Side::Human, UnitKind::TypeTwo) => 't',
            Self::Unit(Side::Computer, UnitKind::TypeOne) => 'X',
            Self::Unit(Side::Computer, UnitKind::TypeTwo) => 'T',
            Self::Wall(Side::Human) => '+',
            Self::Wall(Side::Computer) => '~',
            Self::Objective(Side::Human) => '@',
            Self::Objective(Side::Computer) => '*',
        }
    }

    pub const fn is_vacant(self) -> bool {
        matches!(self, Self::Empty | Self::Hint)
    }

    pub fn is_enemy_unit(self, side: Side) -> bool {
        matches!(self, Self::Unit(owner, _) if owner != side)
    }

    pub fn is_enemy_objective(self, side: Side) -> bool {
        self == Self::Objective(side.opposite())
    }

    /// Own unit, own wall or own objective.
    pub fn is_friendly(self, side: Side) -> bool {
        match self {
            Self::Unit(owner, _) | Self::Wall(owner) | Self::Objective(owner) => owner == side,
            Self::Empty | Self::Hint => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    pub(crate) const fn at(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// One step in the given direction, `None` when it leaves the board.
    #[must_use]
    pub const fn step(self, row_step: i8, col_step: i8) -> Option<Self> {
        let row = self.row as i8 + row_step;
        let col = self.col as i8 + col_step;
        if row < 0 || col < 0 || row > LAST as i8 || col > LAST as i8 {
            None
        } else {
            Some(Self::at(row as u8, col as u8))
        }
    }
}

/// Algebraic square name: file `A`..`G` left to right, rank `1` at the bottom.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'A' + self.col);
        let rank = BOARD_SIZE - usize::from(self.row);
        write!(f, "{file}{rank}")
    }
}

pub const fn unit_side(unit: usize) -> Side {
    if unit < UNITS_PER_SIDE {
        Side::Human
    } else {
        Side::Computer
    }
}

pub const fn unit_kind(unit: usize) -> UnitKind {
    if unit % UNITS_PER_SIDE < UNITS_PER_KIND {
        UnitKind::TypeOne
    } else {
        UnitKind::TypeTwo
    }
}

pub const fn unit_cell(unit: usize) -> Cell {
    Cell::Unit(unit_side(unit), unit_kind(unit))
}

/// Capture order per unit. Zero means the unit is on the board.
///
/// Orders handed out during play and search stay below [`CaptureLedger::SEAL_FACTOR`];
/// [`CaptureLedger::seal`] lifts every order of a committed turn above it, so a
/// sealed capture can be told apart from one made speculatively inside a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureLedger {
    order: [u32; UNIT_COUNT],
    next: u32,
}

impl Default for CaptureLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureLedger {
    /// Larger than any order a single game can hand out (at most one per unit).
    pub const SEAL_FACTOR: u32 = 2 * UNIT_COUNT as u32;

    pub const fn new() -> Self {
        Self {
            order: [0; UNIT_COUNT],
            next: 1,
        }
    }

    pub const fn order(&self, unit: usize) -> u32 {
        self.order[unit]
    }

    pub const fn is_captured(&self, unit: usize) -> bool {
        self.order[unit] != 0
    }

    pub const fn is_sealed(&self, unit: usize) -> bool {
        self.order[unit] >= Self::SEAL_FACTOR
    }

    pub const fn next_order(&self) -> u32 {
        self.next
    }

    pub fn captured_count(&self, side: Side) -> usize {
        side.units().filter(|&unit| self.is_captured(unit)).count()
    }

    pub fn seal(&mut self) {
        for order in &mut self.order {
            if *order != 0 && *order < Self::SEAL_FACTOR {
                *order *= Self::SEAL_FACTOR;
            }
        }
    }

    pub(crate) fn capture(&mut self, unit: usize) -> u32 {
        let order = self.next;
        self.order[unit] = order;
        self.next += 1;
        order
    }

    pub(crate) fn release(&mut self, unit: usize) {
        self.order[unit] = 0;
    }

    pub(crate) fn rewind(&mut self, next: u32) {
        self.next = next;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Cell; SQUARE_COUNT],
    positions: [Coord; UNIT_COUNT],
    captures: CaptureLedger,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard opening position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::bare();
        let layout: [(usize, [u8; 4], u8); 4] = [
            (0, [0, 1, 5, 6], 4),  // human type-one
            (4, [1, 2, 4, 5], 6),  // human type-two
            (8, [0, 1, 5, 6], 2),  // computer type-one
            (12, [1, 2, 4, 5], 0), // computer type-two
        ];
        for (first, cols, row) in layout {
            for (offset, col) in cols.into_iter().enumerate() {
                board.place_unit(first + offset, Coord::at(row, col));
            }
        }
        board
    }

    /// Walls and objectives only. Every unit starts off the board (sealed as
    /// captured) until [`Board::place_unit`] puts it somewhere.
    #[must_use]
    pub fn empty() -> Self {
        let mut board = Self::bare();
        for unit in 0..UNIT_COUNT {
            board.captures.order[unit] = CaptureLedger::SEAL_FACTOR * (unit as u32 + 1);
        }
        board
    }

    fn bare() -> Self {
        let mut board = Self {
            grid: [Cell::Empty; SQUARE_COUNT],
            positions: [Coord::default(); UNIT_COUNT],
            captures: CaptureLedger::new(),
        };
        for side in [Side::Human, Side::Computer] {
            for wall in side.walls() {
                board.grid[wall.index()] = Cell::Wall(side);
            }
        }
        board.restore_objectives();
        board
    }

    pub fn place_unit(&mut self, unit: usize, at: Coord) {
        debug_assert!(self.cell(at).is_vacant(), "square {at:?} is occupied");
        self.positions[unit] = at;
        self.captures.release(unit);
        self.grid[at.index()] = unit_cell(unit);
    }

    pub const fn cell(&self, at: Coord) -> Cell {
        self.grid[at.index()]
    }

    pub(crate) fn set_cell(&mut self, at: Coord, cell: Cell) {
        self.grid[at.index()] = cell;
    }

    /// Current square of a unit, `None` once it has been captured.
    pub const fn position_of(&self, unit: usize) -> Option<Coord> {
        if self.captures.is_captured(unit) {
            None
        } else {
            Some(self.positions[unit])
        }
    }

    pub(crate) fn relocate(&mut self, unit: usize, to: Coord) {
        self.positions[unit] = to;
    }

    pub const fn is_alive(&self, unit: usize) -> bool {
        !self.captures.is_captured(unit)
    }

    pub fn unit_at(&self, at: Coord) -> Option<usize> {
        (0..UNIT_COUNT).find(|&unit| self.position_of(unit) == Some(at))
    }

    /// True once the objective marker of `side` has left its square.
    pub fn objective_captured(&self, side: Side) -> bool {
        self.cell(side.objective()) != Cell::Objective(side)
    }

    pub fn any_objective_captured(&self) -> bool {
        self.objective_captured(Side::Human) || self.objective_captured(Side::Computer)
    }

    pub(crate) fn restore_objectives(&mut self) {
        for side in [Side::Human, Side::Computer] {
            self.grid[side.objective().index()] = Cell::Objective(side);
        }
    }

    pub const fn captures(&self) -> &CaptureLedger {
        &self.captures
    }

    pub(crate) fn captures_mut(&mut self) -> &mut CaptureLedger {
        &mut self.captures
    }

    pub fn captured_count(&self, side: Side) -> usize {
        self.captures.captured_count(side)
    }

    /// Marks captures made so far as belonging to the committed game.
    pub fn seal_captures(&mut self) {
        self.captures.seal();
    }

    /// Overlays every empty destination in `moves` with the hint marker.
    pub fn show_hints(&mut self, moves: &MoveList) {
        for mv in moves {
            let to = mv.destination();
            if self.cell(to) == Cell::Empty {
                self.set_cell(to, Cell::Hint);
            }
        }
    }

    pub fn clear_hints(&mut self) {
        for cell in &mut self.grid {
            if *cell == Cell::Hint {
                *cell = Cell::Empty;
            }
        }
    }

    /// Text diagram with rank 7 (row 0) on top and files A..G underneath.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..BOARD_SIZE {
            let _ = write!(out, "{}", BOARD_SIZE - row);
            for col in 0..BOARD_SIZE {
                let _ = write!(out, " {}", self.grid[row * BOARD_SIZE + col].glyph());
            }
            if row == 0 {
                out.push_str("   COMPUTER");
            } else if row == BOARD_SIZE - 1 {
                out.push_str("   HUMAN");
            }
            out.push('\n');
        }
        out.push_str("  A B C D E F G\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = Board::new();
        assert_eq!(board.cell(c(0, 1)), Cell::Unit(Side::Computer, UnitKind::TypeTwo));
        assert_eq!(board.cell(c(2, 6)), Cell::Unit(Side::Computer, UnitKind::TypeOne));
        assert_eq!(board.cell(c(4, 0)), Cell::Unit(Side::Human, UnitKind::TypeOne));
        assert_eq!(board.cell(c(6, 5)), Cell::Unit(Side::Human, UnitKind::TypeTwo));
        assert_eq!(board.cell(c(1, 3)), Cell::Objective(Side::Computer));
        assert_eq!(board.cell(c(5, 3)), Cell::Objective(Side::Human));
        assert_eq!(board.cell(c(1, 2)), Cell::Wall(Side::Computer));
        assert_eq!(board.cell(c(5, 4)), Cell::Wall(Side::Human));
        assert_eq!(board.cell(c(3, 3)), Cell::Empty);

        for unit in 0..UNIT_COUNT {
            let at = board.position_of(unit).unwrap();
            assert_eq!(board.cell(at), unit_cell(unit), "unit {unit}");
            assert_eq!(board.unit_at(at), Some(unit));
        }
        assert!(!board.any_objective_captured());
        assert_eq!(board.captured_count(Side::Human), 0);
        assert_eq!(board.captured_count(Side::Computer), 0);
    }

    #[test]
    fn test_unit_indices() {
        assert_eq!(unit_cell(0), Cell::Unit(Side::Human, UnitKind::TypeOne));
        assert_eq!(unit_cell(7), Cell::Unit(Side::Human, UnitKind::TypeTwo));
        assert_eq!(unit_cell(8), Cell::Unit(Side::Computer, UnitKind::TypeOne));
        assert_eq!(unit_cell(15), Cell::Unit(Side::Computer, UnitKind::TypeTwo));
    }

    #[test]
    fn test_siege_rows() {
        assert_eq!(Side::Human.siege_row(), 0);
        assert_eq!(Side::Computer.siege_row(), 6);
    }

    #[test]
    fn test_render() {
        let text = Board::new().render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "7 - T T - T T -   COMPUTER");
        assert_eq!(lines[1], "6 - - ~ * ~ - -");
        assert_eq!(lines[5], "2 - - + @ + - -");
        assert_eq!(lines[6], "1 - t t - t t -   HUMAN");
        assert_eq!(lines[7], "  A B C D E F G");
    }

    #[test]
    fn test_empty_board_has_no_units() {
        let mut board = Board::empty();
        assert!((0..UNIT_COUNT).all(|unit| !board.is_alive(unit)));
        assert!(!board.any_objective_captured());

        board.place_unit(3, c(3, 3));
        assert_eq!(board.position_of(3), Some(c(3, 3)));
        assert_eq!(board.cell(c(3, 3)), Cell::Unit(Side::Human, UnitKind::TypeOne));
    }

    #[test]
    fn test_seal_lifts_orders() {
        let mut ledger = CaptureLedger::new();
        assert_eq!(ledger.capture(9), 1);
        assert_eq!(ledger.capture(2), 2);
        ledger.seal();
        assert!(ledger.is_sealed(9));
        assert!(ledger.is_sealed(2));
        assert_eq!(ledger.order(2), 2 * CaptureLedger::SEAL_FACTOR);

        // Sealing twice leaves committed orders alone.
        ledger.seal();
        assert_eq!(ledger.order(2), 2 * CaptureLedger::SEAL_FACTOR);
        assert_eq!(ledger.captured_count(Side::Human), 1);
        assert_eq!(ledger.captured_count(Side::Computer), 1);
    }

    #[test]
    fn test_hints_overlay_empty_squares_only() {
        let mut board = Board::new();
        let mut moves = MoveList::new();
        moves.push(crate::engine::Move::new(c(4, 1), c(3, 2), 1));
        // Capturing destinations keep their unit.
        moves.push(crate::engine::Move::new(c(4, 1), c(2, 1), 1));
        board.show_hints(&moves);

        assert_eq!(board.cell(c(3, 2)), Cell::Hint);
        assert!(board.cell(c(3, 2)).is_vacant());
        assert_eq!(
            board.cell(c(2, 1)),
            Cell::Unit(Side::Computer, UnitKind::TypeOne)
        );

        board.clear_hints();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_coord_names() {
        assert_eq!(c(6, 0).to_string(), "A1");
        assert_eq!(c(0, 6).to_string(), "G7");
        assert_eq!(c(4, 1).to_string(), "B3");
    }

    #[test]
    fn test_coord_step_bounds() {
        assert_eq!(c(0, 0).step(-1, 0), None);
        assert_eq!(c(6, 6).step(1, 1), None);
        assert_eq!(c(3, 3).step(-1, 1), Some(c(2, 4)));
    }
}
