//! Tile map: tagged trigger regions, spawn points and the scrolling viewport.
//!
//! Levels are plain text, one glyph per tile:
//!
//! ```text
//!   .  empty            #  solid block      =  one-way platform
//!   H  ladder           R  patrol reverse   X  exit
//!   P  player spawn     e  enemy spawn      c  coin
//! ```

use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, TILE_SIZE};
use crate::geometry::Rect;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("map has no rows")]
    Empty,
    #[error("row {row} is {len} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
    #[error("map has no `{0}` spawn point")]
    MissingSpawn(Tag),
}

// ── Tags & properties ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Reverse,
    Blockers,
    Action,
    Exit,
    Player,
    Enemy,
    Coin,
}

impl Tag {
    pub const ALL: [Tag; 7] = [
        Tag::Reverse,
        Tag::Blockers,
        Tag::Action,
        Tag::Exit,
        Tag::Player,
        Tag::Enemy,
        Tag::Coin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tag::Reverse => "reverse",
            Tag::Blockers => "blockers",
            Tag::Action => "action",
            Tag::Exit => "exit",
            Tag::Player => "player",
            Tag::Enemy => "enemy",
            Tag::Coin => "coin",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which boundary sides of a region are active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideSet {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl SideSet {
    pub const NONE: SideSet = SideSet { left: false, right: false, top: false, bottom: false };
    pub const ALL: SideSet = SideSet { left: true, right: true, top: true, bottom: true };
    pub const TOP: SideSet = SideSet { left: false, right: false, top: true, bottom: false };

    /// Parses the letter form used by map properties, e.g. `"lrt"`.
    pub fn parse(letters: &str) -> SideSet {
        SideSet {
            left: letters.contains('l'),
            right: letters.contains('r'),
            top: letters.contains('t'),
            bottom: letters.contains('b'),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SideSet::NONE
    }
}

impl fmt::Display for SideSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (on, letter) in [
            (self.left, 'l'),
            (self.right, 'r'),
            (self.top, 't'),
            (self.bottom, 'b'),
        ] {
            if on {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRegion {
    pub rect: Rect,
    pub tag: Tag,
    /// Active sides for `blockers`; for `action` regions the same letters
    /// are reused and `l` marks a ladder.
    pub sides: SideSet,
}

impl TriggerRegion {
    pub fn is_ladder(&self) -> bool {
        self.tag == Tag::Action && self.sides.left
    }
}

/// Pixel position of a spawn cell's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub px: f32,
    pub py: f32,
}

/// What a tile looks like; only the renderer cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Solid,
    Platform,
    Ladder,
    Exit,
}

// ── Map ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct TileMap {
    tiles: Vec<Vec<Tile>>,
    regions: Vec<TriggerRegion>,
}

impl TileMap {
    pub fn load(path: impl AsRef<Path>) -> Result<TileMap, MapError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let map = TileMap::from_ascii(&source)?;
        log::info!(
            "loaded map {} ({}x{} tiles, {} regions)",
            path.display(),
            map.columns(),
            map.rows(),
            map.regions.len()
        );
        Ok(map)
    }

    pub fn from_ascii(source: &str) -> Result<TileMap, MapError> {
        let grid: Vec<Vec<char>> = source
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();

        let expected = grid.first().map(Vec::len).ok_or(MapError::Empty)?;
        if let Some((row, line)) = grid.iter().enumerate().find(|(_, l)| l.len() != expected) {
            return Err(MapError::Ragged { row, len: line.len(), expected });
        }

        let glyph_at = |row: isize, col: isize| -> char {
            if row < 0 || col < 0 {
                return '.';
            }
            grid.get(row as usize)
                .and_then(|line| line.get(col as usize))
                .copied()
                .unwrap_or('.')
        };

        let mut tiles = Vec::with_capacity(grid.len());
        let mut regions = Vec::new();

        for (row, line) in grid.iter().enumerate() {
            let mut tile_row = Vec::with_capacity(expected);
            for (col, &glyph) in line.iter().enumerate() {
                let (x, y) = (col as f32 * TILE_SIZE, row as f32 * TILE_SIZE);
                let cell = Rect::new(x, y, TILE_SIZE, TILE_SIZE);
                let (r, c) = (row as isize, col as isize);
                let mut region = |tag: Tag, rect: Rect, sides: SideSet| {
                    regions.push(TriggerRegion { rect, tag, sides });
                };

                let tile = match glyph {
                    '.' | ' ' => Tile::Empty,
                    '#' => {
                        // Faces shared with another block can never be reached.
                        let sides = SideSet {
                            left: glyph_at(r, c - 1) != '#',
                            right: glyph_at(r, c + 1) != '#',
                            top: glyph_at(r - 1, c) != '#',
                            bottom: glyph_at(r + 1, c) != '#',
                        };
                        if !sides.is_empty() {
                            region(Tag::Blockers, cell, sides);
                        }
                        Tile::Solid
                    }
                    '=' => {
                        region(Tag::Blockers, cell, SideSet::TOP);
                        Tile::Platform
                    }
                    'H' => {
                        if glyph_at(r - 1, c) != 'H' {
                            let run = (row..grid.len())
                                .take_while(|&y| grid[y][col] == 'H')
                                .count();
                            let rect = Rect::new(x, y, TILE_SIZE, run as f32 * TILE_SIZE);
                            region(Tag::Action, rect, SideSet::parse("l"));
                        }
                        Tile::Ladder
                    }
                    'R' => {
                        region(Tag::Reverse, cell, SideSet::NONE);
                        Tile::Empty
                    }
                    'X' => {
                        region(Tag::Exit, cell, SideSet::NONE);
                        Tile::Exit
                    }
                    'P' | 'e' | 'c' => {
                        let tag = match glyph {
                            'P' => Tag::Player,
                            'e' => Tag::Enemy,
                            _ => Tag::Coin,
                        };
                        region(tag, cell, SideSet::NONE);
                        Tile::Empty
                    }
                    other => return Err(MapError::UnknownGlyph { glyph: other, row, col }),
                };
                tile_row.push(tile);
            }
            tiles.push(tile_row);
        }

        Ok(TileMap { tiles, regions })
    }

    pub fn columns(&self) -> usize {
        self.tiles.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn width(&self) -> f32 {
        self.columns() as f32 * TILE_SIZE
    }

    pub fn height(&self) -> f32 {
        self.rows() as f32 * TILE_SIZE
    }

    pub fn regions(&self) -> &[TriggerRegion] {
        &self.regions
    }

    /// Tile under a pixel position; anything off the map is empty.
    pub fn tile_at(&self, x: f32, y: f32) -> Tile {
        if x < 0.0 || y < 0.0 {
            return Tile::Empty;
        }
        let (col, row) = ((x / TILE_SIZE) as usize, (y / TILE_SIZE) as usize);
        self.tiles
            .get(row)
            .and_then(|line| line.get(col))
            .copied()
            .unwrap_or(Tile::Empty)
    }

    /// Every region tagged `tag` overlapping `rect`, in map order.
    pub fn collide(&self, rect: Rect, tag: Tag) -> impl Iterator<Item = &TriggerRegion> + '_ {
        self.regions
            .iter()
            .filter(move |region| region.tag == tag && region.rect.intersects(&rect))
    }

    /// Same as [`TileMap::collide`] but by tag name; unknown names match nothing.
    pub fn collide_named(&self, rect: Rect, name: &str) -> Vec<&TriggerRegion> {
        match Tag::from_name(name) {
            Some(tag) => self.collide(rect, tag).collect(),
            None => Vec::new(),
        }
    }

    pub fn find(&self, tag: Tag) -> impl Iterator<Item = SpawnPoint> + '_ {
        self.regions
            .iter()
            .filter(move |region| region.tag == tag)
            .map(|region| SpawnPoint { px: region.rect.x, py: region.rect.y })
    }

    pub fn player_spawn(&self) -> Result<SpawnPoint, MapError> {
        self.find(Tag::Player).next().ok_or(MapError::MissingSpawn(Tag::Player))
    }
}

// ── Viewport ─────────────────────────────────────────────────────────────────

/// The screen-sized window into the map that follows the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    map_w: f32,
    map_h: f32,
}

impl Viewport {
    pub fn new(map: &TileMap) -> Viewport {
        Viewport {
            x: 0.0,
            y: 0.0,
            w: SCREEN_WIDTH,
            h: SCREEN_HEIGHT,
            map_w: map.width(),
            map_h: map.height(),
        }
    }

    /// Centres the view on a point without showing anything past the map edge.
    pub fn set_focus(&mut self, fx: f32, fy: f32) {
        self.x = (fx - self.w / 2.0).clamp(0.0, (self.map_w - self.w).max(0.0));
        self.y = (fy - self.h / 2.0).clamp(0.0, (self.map_h - self.h).max(0.0));
    }
}
