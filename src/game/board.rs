//! # Board
//!
//! A fixed-size grid of operator tiles.

use crate::{OperatorTile, Position, TileKind};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The tile grid of one level.
///
/// Cells are addressed by [`Position`] with `0 <= x < width` and `0 <= y < height`.
/// Indexing with `board[pos]` outside those bounds is a programming error and panics;
/// use [`Board::get`] when the position may be invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    tiles: Vec<OperatorTile>,
}

impl Board {
    /// Creates a board where every cell is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use smoothlife::{Board, Position};
    ///
    /// let board = Board::new(7, 5);
    /// assert_eq!(board.width(), 7);
    /// assert!(board[Position::new(6, 4)].is_empty());
    /// assert!(board.get(Position::new(7, 0)).is_none());
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![OperatorTile::empty(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells on the board.
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Checks whether a position lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.x as usize + self.width * pos.y as usize)
        } else {
            None
        }
    }

    pub fn get(&self, pos: Position) -> Option<&OperatorTile> {
        self.offset(pos).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut OperatorTile> {
        self.offset(pos).map(move |i| &mut self.tiles[i])
    }

    /// Places a tile, replacing whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if the position is off the board.
    pub fn set(&mut self, pos: Position, tile: OperatorTile) {
        self[pos] = tile;
    }

    /// Iterates over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &OperatorTile)> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            (
                Position::new((i % width) as i32, (i / width) as i32),
                tile,
            )
        })
    }

    /// Positions holding a tile of the given kind.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.kind == kind)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of cells that are not empty.
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_empty()).count()
    }
}

impl Index<Position> for Board {
    type Output = OperatorTile;

    fn index(&self, pos: Position) -> &OperatorTile {
        match self.offset(pos) {
            Some(i) => &self.tiles[i],
            None => panic!(
                "position {:?} is outside the {}x{} board",
                pos, self.width, self.height
            ),
        }
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut OperatorTile {
        match self.offset(pos) {
            Some(i) => &mut self.tiles[i],
            None => panic!(
                "position {:?} is outside the {}x{} board",
                pos, self.width, self.height
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(7, 5);
        assert_eq!(board.area(), 35);
        assert_eq!(board.occupied_count(), 0);
        assert!(board.iter().all(|(_, tile)| tile.is_empty()));
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(7, 5);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(6, 4)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.contains(Position::new(7, 0)));
        assert!(!board.contains(Position::new(0, 5)));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(7, 5);
        board.set(Position::new(3, 2), OperatorTile::add(4));
        assert_eq!(board[Position::new(3, 2)], OperatorTile::add(4));
        assert_eq!(board.get(Position::new(3, 2)), Some(&OperatorTile::add(4)));
        assert_eq!(board.occupied_count(), 1);
        assert_eq!(board.positions_of(TileKind::Add), vec![Position::new(3, 2)]);

        if let Some(tile) = board.get_mut(Position::new(3, 2)) {
            tile.consume();
        }
        assert!(board[Position::new(3, 2)].is_empty());
    }

    #[test]
    fn test_iteration_is_row_major() {
        let board = Board::new(3, 2);
        let positions: Vec<_> = board.iter().map(|(pos, _)| pos).collect();
        assert_eq!(positions[0], Position::new(0, 0));
        assert_eq!(positions[2], Position::new(2, 0));
        assert_eq!(positions[3], Position::new(0, 1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_range_index_panics() {
        let board = Board::new(7, 5);
        let _tile = board[Position::new(7, 5)];
    }
}
