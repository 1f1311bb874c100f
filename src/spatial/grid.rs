//! Glyph grid and the per-round compositing scene

use crate::core::types::{Limits, Position};

/// Generic 2D grid stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T: Copy> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Copy> Grid<T> {
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    fn index_of(&self, pos: Position) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row < self.height && col < self.width {
            Some(row * self.width + col)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<&T> {
        self.index_of(pos).map(|idx| &self.data[idx])
    }

    /// Write a cell. Out-of-bounds writes are dropped; returns whether it landed.
    #[inline]
    pub fn set(&mut self, pos: Position, value: T) -> bool {
        match self.index_of(pos) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Row slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.width.max(1)).take(self.height)
    }

    /// Overwrite every cell with the contents of `other` (same dimensions)
    pub fn copy_from(&mut self, other: &Grid<T>) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.data.copy_from_slice(&other.data);
    }
}

/// The compositing surface for one round
///
/// `base` is the immutable template (terrain plus colliders) fixed at world
/// construction; `frame` is rebuilt from it every round and receives the
/// entity and attack stamps.
#[derive(Debug, Clone)]
pub struct Scene {
    base: Grid<char>,
    frame: Grid<char>,
}

impl Scene {
    /// Build a scene of terrain glyphs with `fixtures` baked into the template
    pub fn new(
        limits: Limits,
        terrain: char,
        fixtures: impl IntoIterator<Item = (char, Position)>,
    ) -> Self {
        let mut base = Grid::filled(limits.height as usize, limits.width as usize, terrain);
        for (glyph, pos) in fixtures {
            base.set(pos, glyph);
        }
        let frame = base.clone();
        Self { base, frame }
    }

    /// Restore the frame to the base template, erasing last round's stamps
    pub fn reset(&mut self) {
        self.frame.copy_from(&self.base);
    }

    /// Stamp a glyph if `pos` is on the grid; off-grid stamps are silently dropped
    pub fn stamp(&mut self, glyph: char, pos: Position) {
        if !self.frame.set(pos, glyph) {
            tracing::trace!("Dropped off-grid stamp '{}' at {}", glyph, pos);
        }
    }

    /// Glyph currently in the frame at `pos`
    pub fn glyph_at(&self, pos: Position) -> Option<char> {
        self.frame.get(pos).copied()
    }

    /// Lazily produce the frame as one string per row
    pub fn render(&self) -> impl Iterator<Item = String> + '_ {
        self.frame.rows().map(|row| row.iter().collect())
    }

    /// The immutable template the frame is reset from
    pub fn base(&self) -> &Grid<char> {
        &self.base
    }
}
