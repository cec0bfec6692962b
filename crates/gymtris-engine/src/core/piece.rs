use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The discriminant order matches the colour identifiers written into the grid:
/// `I` is colour 1, `O` is colour 2, and so on up to `L` (colour 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in colour-identifier order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the colour identifier (1-7) written into the grid for this piece.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the piece whose colour identifier is `color_id`, if any.
    #[must_use]
    pub const fn from_color_id(color_id: u8) -> Option<Self> {
        match color_id {
            1..=7 => Some(Self::ALL[(color_id - 1) as usize]),
            _ => None,
        }
    }

    /// Returns the ordered rotation states of this piece.
    ///
    /// The list is never empty.
    #[must_use]
    pub fn rotations(self) -> &'static [RotationState] {
        PIECE_ROTATIONS[self as usize]
    }

    /// Number of distinct rotation states: I(2), O(1), T(4), S(2), Z(2), J(4), L(4).
    #[must_use]
    pub fn rotation_count(self) -> usize {
        self.rotations().len()
    }

    /// Resolves a raw rotation slot (0-3) to the rotation state it aliases.
    ///
    /// Slots are reduced modulo [`Self::rotation_count`], so pieces with fewer
    /// than four states map several slots onto the same shape.
    #[must_use]
    pub fn rotation(self, slot: usize) -> RotationState {
        let rotations = self.rotations();
        rotations[slot % rotations.len()]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use gymtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use gymtris_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// One orientation of a piece as an occupancy bitmap within a 4×4 box.
///
/// Row `dy` of the bitmap is stored as a 4-bit mask where bit `dx` marks an
/// occupied cell. The box origin is the top-left corner, so a piece placed at
/// `(row, column)` occupies `(row + dy, column + dx)` for every set bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationState {
    mask: [u8; 4],
}

impl RotationState {
    #[must_use]
    pub const fn is_occupied(self, dy: usize, dx: usize) -> bool {
        dy < 4 && dx < 4 && (self.mask[dy] & (1 << dx)) != 0
    }

    /// Returns an iterator of occupied `(dy, dx)` offsets in row-major order.
    pub fn occupied_offsets(self) -> impl Iterator<Item = (usize, usize)> {
        (0..4).flat_map(move |dy| {
            (0..4).filter_map(move |dx| self.is_occupied(dy, dx).then_some((dy, dx)))
        })
    }

    /// Number of set cells in the bitmap (4 for every tetromino).
    #[must_use]
    pub const fn cell_count(self) -> usize {
        let mut count = 0;
        let mut dy = 0;
        while dy < 4 {
            count += self.mask[dy].count_ones() as usize;
            dy += 1;
        }
        count
    }
}

const fn shape(rows: [[bool; 4]; 4]) -> RotationState {
    let mut mask = [0; 4];
    let mut dy = 0;
    while dy < 4 {
        let mut dx = 0;
        while dx < 4 {
            if rows[dy][dx] {
                mask[dy] |= 1 << dx;
            }
            dx += 1;
        }
        dy += 1;
    }
    RotationState { mask }
}

const C: bool = true;
const E: bool = false;
const EEEE: [bool; 4] = [E; 4];

static I_ROTATIONS: [RotationState; 2] = [
    shape([EEEE, [C, C, C, C], EEEE, EEEE]),
    shape([[C, E, E, E], [C, E, E, E], [C, E, E, E], [C, E, E, E]]),
];

static O_ROTATIONS: [RotationState; 1] = [shape([[C, C, E, E], [C, C, E, E], EEEE, EEEE])];

static T_ROTATIONS: [RotationState; 4] = [
    shape([[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
    shape([[E, C, E, E], [E, C, C, E], [E, C, E, E], EEEE]),
    shape([EEEE, [C, C, C, E], [E, C, E, E], EEEE]),
    shape([[E, C, E, E], [C, C, E, E], [E, C, E, E], EEEE]),
];

static S_ROTATIONS: [RotationState; 2] = [
    shape([[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
    shape([[E, C, E, E], [E, C, C, E], [E, E, C, E], EEEE]),
];

static Z_ROTATIONS: [RotationState; 2] = [
    shape([[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
    shape([[E, E, C, E], [E, C, C, E], [E, C, E, E], EEEE]),
];

static J_ROTATIONS: [RotationState; 4] = [
    shape([[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
    shape([[E, C, C, E], [E, C, E, E], [E, C, E, E], EEEE]),
    shape([EEEE, [C, C, C, E], [E, E, C, E], EEEE]),
    shape([[E, C, E, E], [E, C, E, E], [C, C, E, E], EEEE]),
];

static L_ROTATIONS: [RotationState; 4] = [
    shape([[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    shape([[E, C, E, E], [E, C, E, E], [E, C, C, E], EEEE]),
    shape([EEEE, [C, C, C, E], [C, E, E, E], EEEE]),
    shape([[C, C, E, E], [E, C, E, E], [E, C, E, E], EEEE]),
];

static PIECE_ROTATIONS: [&[RotationState]; PieceKind::LEN] = [
    &I_ROTATIONS,
    &O_ROTATIONS,
    &T_ROTATIONS,
    &S_ROTATIONS,
    &Z_ROTATIONS,
    &J_ROTATIONS,
    &L_ROTATIONS,
];
