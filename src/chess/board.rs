use serde::Serialize;

use crate::types::Position;

pub const BOARD_SIZE: usize = 8;

const ROOK_DIRS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const QUEEN_DIRS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a pawn push. Row 0 is the black back rank, so white
    /// pawns move toward smaller row indices.
    fn pawn_direction(self) -> i32 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    fn pawn_start_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    fn index(self) -> i8 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 2,
            Self::Bishop => 3,
            Self::Rook => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            color,
            has_moved: false,
        }
    }
}

/// What a single applied move did, for the board renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    pub captured: Option<PieceKind>,
    pub promoted: bool,
}

/// 8x8 chess position. Row 0 holds the black back rank, rows 6-7 white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the standard starting position.
    pub fn new() -> Self {
        let mut board = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back_rank.iter().enumerate() {
            board.grid[0][col] = Some(Piece::new(kind, Color::Black));
            board.grid[7][col] = Some(Piece::new(kind, Color::White));
        }
        for col in 0..BOARD_SIZE {
            board.grid[1][col] = Some(Piece::new(PieceKind::Pawn, Color::Black));
            board.grid[6][col] = Some(Piece::new(PieceKind::Pawn, Color::White));
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.grid[pos.row as usize][pos.col as usize]
    }

    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.grid[pos.row as usize][pos.col as usize] = piece;
    }

    /// Squares occupied by the given color, in row-major order.
    pub fn squares_of(&self, color: Color) -> Vec<Position> {
        let mut out = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.grid[row][col]
                    && piece.color == color
                {
                    out.push(Position::new(row as u8, col as u8));
                }
            }
        }
        out
    }

    /// Legal destinations for the piece on `from`; empty when the square is.
    ///
    /// Moves that leave the mover's own king capturable are NOT filtered out:
    /// the terminal condition is capture-the-king, so legality is purely
    /// geometric.
    pub fn valid_moves(&self, from: Position) -> Vec<Position> {
        let Some(piece) = self.piece_at(from) else {
            return Vec::new();
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(from, piece.color),
            PieceKind::Knight => self.offset_moves(from, piece.color, &KNIGHT_OFFSETS),
            PieceKind::King => self.offset_moves(from, piece.color, &QUEEN_DIRS),
            PieceKind::Rook => self.sliding_moves(from, piece.color, &ROOK_DIRS),
            PieceKind::Bishop => self.sliding_moves(from, piece.color, &BISHOP_DIRS),
            PieceKind::Queen => self.sliding_moves(from, piece.color, &QUEEN_DIRS),
        }
    }

    /// Relocates `from` onto `to`, resolving capture and queen promotion.
    /// Caller contract: `to` came from `valid_moves(from)`.
    pub fn apply(&mut self, from: Position, to: Position) -> MoveRecord {
        let mut piece = self.piece_at(from).expect("apply() requires a piece on `from`");
        let captured = self.piece_at(to).map(|p| p.kind);

        piece.has_moved = true;
        let promoted = piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row();
        if promoted {
            piece.kind = PieceKind::Queen;
        }

        self.set_piece(from, None);
        self.set_piece(to, Some(piece));

        MoveRecord {
            from,
            to,
            captured,
            promoted,
        }
    }

    /// Converts the board to 64 signed cells: 0 empty, positive white,
    /// negative black, magnitude 1..=6 for pawn/knight/bishop/rook/queen/king.
    pub fn to_array(&self) -> Vec<i8> {
        let mut out = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                out.push(match self.grid[row][col] {
                    None => 0,
                    Some(piece) => match piece.color {
                        Color::White => piece.kind.index(),
                        Color::Black => -piece.kind.index(),
                    },
                });
            }
        }
        out
    }

    fn pawn_moves(&self, from: Position, color: Color) -> Vec<Position> {
        let mut moves = Vec::new();
        let dir = color.pawn_direction();

        if let Some(one) = offset(from, dir, 0)
            && self.piece_at(one).is_none()
        {
            moves.push(one);
            if from.row == color.pawn_start_row()
                && let Some(two) = offset(from, 2 * dir, 0)
                && self.piece_at(two).is_none()
            {
                moves.push(two);
            }
        }

        for dc in [-1, 1] {
            if let Some(diag) = offset(from, dir, dc)
                && let Some(target) = self.piece_at(diag)
                && target.color != color
            {
                moves.push(diag);
            }
        }
        moves
    }

    fn offset_moves(&self, from: Position, color: Color, offsets: &[(i32, i32)]) -> Vec<Position> {
        let mut moves = Vec::new();
        for &(dr, dc) in offsets {
            if let Some(to) = offset(from, dr, dc)
                && self.piece_at(to).is_none_or(|p| p.color != color)
            {
                moves.push(to);
            }
        }
        moves
    }

    fn sliding_moves(&self, from: Position, color: Color, dirs: &[(i32, i32)]) -> Vec<Position> {
        let mut moves = Vec::new();
        for &(dr, dc) in dirs {
            let mut cursor = from;
            while let Some(to) = offset(cursor, dr, dc) {
                match self.piece_at(to) {
                    None => {
                        moves.push(to);
                        cursor = to;
                    }
                    Some(target) => {
                        if target.color != color {
                            moves.push(to);
                        }
                        break;
                    }
                }
            }
        }
        moves
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn offset(from: Position, dr: i32, dc: i32) -> Option<Position> {
    let row = from.row as i32 + dr;
    let col = from.col as i32 + dc;
    let bound = 0..BOARD_SIZE as i32;
    if bound.contains(&row) && bound.contains(&col) {
        Some(Position::new(row as u8, col as u8))
    } else {
        None
    }
}
