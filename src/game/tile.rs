//! # Operator Tiles
//!
//! Board cells that transform the surface value when the player steps on them.

use crate::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The different kinds of tiles a board cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileKind {
    /// Nothing here; stepping on it has no effect
    #[default]
    Empty,
    /// Leaves the level and judges the surface
    Exit,
    /// Adds the operand to the surface
    Add,
    /// Subtracts the operand from the surface
    Subtract,
    /// Multiplies the surface by the operand
    Multiply,
    /// Divides the surface by the operand, only when it divides evenly
    Divide,
}

impl TileKind {
    /// The four arithmetic kinds, in the order the generator draws them.
    pub const OPERATORS: [TileKind; 4] = [
        TileKind::Add,
        TileKind::Subtract,
        TileKind::Multiply,
        TileKind::Divide,
    ];

    /// Whether this kind changes the surface.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TileKind::Add | TileKind::Subtract | TileKind::Multiply | TileKind::Divide
        )
    }

    /// Short symbol used by displays.
    pub fn symbol(self) -> &'static str {
        match self {
            TileKind::Empty => " ",
            TileKind::Exit => "⋒",
            TileKind::Add => "+",
            TileKind::Subtract => "-",
            TileKind::Multiply => "×",
            TileKind::Divide => "÷",
        }
    }

    /// What the player is doing to the piece when applying this kind.
    pub fn narration(self) -> Option<&'static str> {
        match self {
            TileKind::Add => Some("Add polishing paste."),
            TileKind::Subtract => Some("Remove burrs."),
            TileKind::Multiply => Some("Use finer sanding."),
            TileKind::Divide => Some("Disassemble parts."),
            TileKind::Empty | TileKind::Exit => None,
        }
    }
}

/// Arithmetic faults raised by tile application.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    /// The divisor does not evenly divide the surface
    #[error("{surface} is not evenly divisible by {divisor}")]
    InexactDivision { surface: Surface, divisor: Surface },

    /// A divide tile with a zero operand
    #[error("division by zero")]
    DivisionByZero,

    /// The result does not fit into a surface value
    #[error("applying {kind:?} {operand} to {surface} overflows")]
    Overflow {
        kind: TileKind,
        surface: Surface,
        operand: Surface,
    },
}

/// One board cell: a tile kind and its operand.
///
/// Empty and exit tiles ignore their operand.
///
/// # Examples
///
/// ```
/// use smoothlife::OperatorTile;
///
/// let tile = OperatorTile::multiply(4);
/// assert_eq!(tile.apply(25), Ok(100));
/// assert_eq!(tile.inverse(), OperatorTile::divide(4));
/// assert!(OperatorTile::divide(3).apply(10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OperatorTile {
    pub kind: TileKind,
    pub operand: Surface,
}

impl OperatorTile {
    /// Creates a tile of the given kind and operand.
    pub fn new(kind: TileKind, operand: Surface) -> Self {
        Self { kind, operand }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The level exit.
    pub fn exit() -> Self {
        Self::new(TileKind::Exit, 0)
    }

    pub fn add(operand: Surface) -> Self {
        Self::new(TileKind::Add, operand)
    }

    pub fn subtract(operand: Surface) -> Self {
        Self::new(TileKind::Subtract, operand)
    }

    pub fn multiply(operand: Surface) -> Self {
        Self::new(TileKind::Multiply, operand)
    }

    pub fn divide(operand: Surface) -> Self {
        Self::new(TileKind::Divide, operand)
    }

    pub fn is_empty(&self) -> bool {
        self.kind == TileKind::Empty
    }

    pub fn is_exit(&self) -> bool {
        self.kind == TileKind::Exit
    }

    /// The tile that undoes this one: add and subtract swap, multiply and divide swap.
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            TileKind::Add => TileKind::Subtract,
            TileKind::Subtract => TileKind::Add,
            TileKind::Multiply => TileKind::Divide,
            TileKind::Divide => TileKind::Multiply,
            other => other,
        };
        Self::new(kind, self.operand)
    }

    /// Applies this tile to a surface value.
    ///
    /// Empty and exit tiles return the surface unchanged. Division must be exact and
    /// every operation is overflow-checked; nothing is ever truncated.
    pub fn apply(&self, surface: Surface) -> Result<Surface, TileError> {
        let overflow = || TileError::Overflow {
            kind: self.kind,
            surface,
            operand: self.operand,
        };

        match self.kind {
            TileKind::Empty | TileKind::Exit => Ok(surface),
            TileKind::Add => surface.checked_add(self.operand).ok_or_else(overflow),
            TileKind::Subtract => surface.checked_sub(self.operand).ok_or_else(overflow),
            TileKind::Multiply => surface.checked_mul(self.operand).ok_or_else(overflow),
            TileKind::Divide => {
                if self.operand == 0 {
                    return Err(TileError::DivisionByZero);
                }
                if surface.checked_rem(self.operand).ok_or_else(overflow)? != 0 {
                    return Err(TileError::InexactDivision {
                        surface,
                        divisor: self.operand,
                    });
                }
                surface.checked_div(self.operand).ok_or_else(overflow)
            }
        }
    }

    /// Marks the tile as used up. Exits are permanent and stay in place.
    pub fn consume(&mut self) {
        if !self.is_exit() {
            *self = Self::empty();
        }
    }
}

impl fmt::Display for OperatorTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TileKind::Empty | TileKind::Exit => write!(f, "{}", self.kind.symbol()),
            kind => write!(f, "{}{}", kind.symbol(), self.operand),
        }
    }
}
