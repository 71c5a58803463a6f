//! Match detection, combo merging and special-tile promotion.
//!
//! ## Scan
//!
//! Every match-eligible tile, in grid order, is tried against every positive
//! line in library order. A hit collects the tiles of the first satisfied
//! window. Hits that share a tile with existing groups are merged into them,
//! so the result is a set of disjoint combo groups.
//!
//! ## Resolution
//!
//! `match_lines` clears every member of every group and promotes the anchor
//! (the most recently created member) when the group's shape earns a special
//! key:
//!
//! | First shape | Key          | Promoted tile                  |
//! |-------------|--------------|--------------------------------|
//! | 5 in a line | `Super`      | `Super`                        |
//! | 4 in a line | `Horizontal` or `Vertical`, by swap direction | anchor's color |
//! | 2x2 square  | `Square`     | `Choco` with full budgets      |
//!
//! A group built from both a horizontal and a vertical line becomes a
//! `Cross` instead, unless it already earned `Super`.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::debug;

use super::grid::Grid;
use super::state::{create_gem, Board};
use crate::core::{Position, RandomSource};
use crate::gems::{Gem, GemId, GemType, SpecialKey};
use crate::patterns::{MatchLine, Orientation};

/// One shape hit that contributed to a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternInstance {
    pub orientation: Orientation,
    pub magnitude: u32,
    /// Tile the shape was discovered from.
    pub origin: Position,
}

/// A set of matched tiles that resolve together.
#[derive(Clone, Debug)]
pub struct ComboGroup {
    /// Member tiles, in discovery order.
    pub gems: Vec<Gem>,
    /// Contributing shapes, in discovery order.
    pub patterns: Vec<PatternInstance>,
    /// Tile created at the anchor, if the group earned a special.
    pub promoted: Option<Gem>,
    ids: FxHashSet<GemId>,
}

impl ComboGroup {
    fn new(gems: Vec<Gem>, pattern: PatternInstance) -> Self {
        let ids = gems.iter().map(|gem| gem.id).collect();
        Self {
            gems,
            patterns: vec![pattern],
            promoted: None,
            ids,
        }
    }

    #[must_use]
    pub fn contains(&self, id: GemId) -> bool {
        self.ids.contains(&id)
    }

    /// True if the two groups share a tile.
    #[must_use]
    pub fn intersects(&self, other: &ComboGroup) -> bool {
        other.gems.iter().any(|gem| self.contains(gem.id))
    }

    fn absorb(&mut self, other: ComboGroup) {
        for gem in other.gems {
            if self.ids.insert(gem.id) {
                self.gems.push(gem);
            }
        }
        self.patterns.extend(other.patterns);
    }

    /// Member with the greatest sequence; the first such member on ties.
    #[must_use]
    pub fn anchor(&self) -> Option<&Gem> {
        self.gems
            .iter()
            .reduce(|best, gem| if gem.sequence > best.sequence { gem } else { best })
    }

    /// Number of distinct member tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }
}

impl PartialEq for ComboGroup {
    fn eq(&self, other: &Self) -> bool {
        self.gems == other.gems && self.patterns == other.patterns && self.promoted == other.promoted
    }
}

impl Eq for ComboGroup {}

/// True if a tile of `candidate` at `origin` would complete `line`.
///
/// A window counts when all its cells are playable and every cell other
/// than the origin already holds `candidate`.
#[must_use]
pub fn exists_potential_match(grid: &Grid, origin: Position, line: &MatchLine, candidate: GemType) -> bool {
    let shape = grid.shape();
    line.windows().iter().any(|window| {
        window.iter().all(|&offset| {
            let pos = origin.offset(offset);
            shape.is_boundary_index(pos)
                && (offset.is_origin() || grid.gem_at(pos).is_some_and(|gem| gem.gem_type == candidate))
        })
    })
}

/// Special key earned by a group with the given shapes.
///
/// `col_offset` is the horizontal component of the swap that triggered the
/// match; it orients a line-of-four special.
#[must_use]
pub fn resolve_special_key(patterns: &[PatternInstance], col_offset: i32) -> Option<SpecialKey> {
    let first = patterns.first()?;
    let key = match first.magnitude {
        5 => return Some(SpecialKey::Super),
        4 if col_offset != 0 => Some(SpecialKey::Horizontal),
        4 => Some(SpecialKey::Vertical),
        2 => Some(SpecialKey::Square),
        _ => None,
    };

    let has = |orientation| patterns.iter().any(|p| p.orientation == orientation);
    if patterns.len() >= 2 && has(Orientation::Horizontal) && has(Orientation::Vertical) {
        return Some(SpecialKey::Cross);
    }
    key
}

/// Tiles of the first window of `line` satisfied from `origin`.
fn collect_match(grid: &Grid, origin: &Gem, line: &MatchLine, turn: u64) -> Option<Vec<Gem>> {
    let shape = grid.shape();
    line.windows().iter().find_map(|window| {
        window
            .iter()
            .map(|&offset| {
                let pos = origin.position.offset(offset);
                if !shape.is_boundary_index(pos) {
                    return None;
                }
                grid.gem_at(pos)
                    .filter(|gem| gem.gem_type == origin.gem_type && gem.is_match_eligible(turn))
                    .cloned()
            })
            .collect::<Option<Vec<Gem>>>()
    })
}

/// Fold `group` into every existing group it touches.
///
/// All intersecting groups collapse into the first of them, so the result
/// stays disjoint whatever order hits arrive in.
fn merge_into(groups: &mut Vec<ComboGroup>, group: ComboGroup) {
    let hits: SmallVec<[usize; 4]> = groups
        .iter()
        .enumerate()
        .filter(|(_, existing)| existing.intersects(&group))
        .map(|(index, _)| index)
        .collect();

    let Some((&first, rest)) = hits.split_first() else {
        groups.push(group);
        return;
    };

    let bridged: Vec<ComboGroup> = rest.iter().rev().map(|&index| groups.remove(index)).collect();
    let target = &mut groups[first];
    target.absorb(group);
    for other in bridged.into_iter().rev() {
        target.absorb(other);
    }
}

/// Every combo group on `grid`, using the given scan lines.
pub(crate) fn scan(grid: &Grid, lines: &[MatchLine], turn: u64) -> Vec<ComboGroup> {
    let mut groups = Vec::new();
    for origin in grid.iter().filter(|gem| gem.is_match_eligible(turn)) {
        for line in lines {
            if let Some(gems) = collect_match(grid, origin, line, turn) {
                let pattern = PatternInstance {
                    orientation: line.orientation(),
                    magnitude: line.magnitude(),
                    origin: origin.position,
                };
                merge_into(&mut groups, ComboGroup::new(gems, pattern));
            }
        }
    }
    groups
}

impl<R: RandomSource> Board<R> {
    /// Combo groups currently on the board. Does not mutate.
    #[must_use]
    pub fn scan_matches(&self) -> Vec<ComboGroup> {
        scan(&self.grid, self.patterns.positive(), self.turn)
    }

    /// True if a tile of `candidate` at `pos` would complete `line`.
    #[must_use]
    pub fn exists_potential_match(&self, pos: Position, line: &MatchLine, candidate: GemType) -> bool {
        exists_potential_match(&self.grid, pos, line, candidate)
    }

    /// Resolve every current match.
    ///
    /// `(col_offset, row_offset)` is the direction of the swap that led here,
    /// `(0, 0)` for cascades. Member cells become `Empty`; an anchor that
    /// earns a special key is replaced by its promoted tile, reported in
    /// [`ComboGroup::promoted`].
    pub fn match_lines(&mut self, col_offset: i32, row_offset: i32) -> Vec<ComboGroup> {
        let mut groups = self.scan_matches();

        for group in &mut groups {
            let anchor = group.anchor().map(|gem| (gem.id, gem.gem_type));
            let key = resolve_special_key(&group.patterns, col_offset);

            for member in &group.gems {
                let mut empty = create_gem(&mut self.factory, &self.config, GemType::Empty, member.position);

                if let (Some((anchor_id, anchor_type)), Some(key)) = (anchor, key) {
                    if member.id == anchor_id {
                        self.promote(&mut empty, anchor_type, key);
                        group.promoted = Some(empty.clone());
                    }
                }
                self.grid.place(empty);
            }

            debug!(
                members = group.len(),
                patterns = group.patterns.len(),
                promoted = ?group.promoted.as_ref().map(|gem| gem.gem_type),
                key = ?key,
                col_offset,
                row_offset,
                "resolved combo group"
            );
        }

        groups
    }

    fn promote(&mut self, gem: &mut Gem, anchor_type: GemType, key: SpecialKey) {
        match key {
            SpecialKey::Super => self.factory.retype(gem, GemType::Super),
            SpecialKey::Square => {
                self.factory.retype(gem, GemType::Choco);
                gem.endurance = self.config.endurance;
                gem.endurance_for_block = self.config.block_budget;
            }
            SpecialKey::Horizontal | SpecialKey::Vertical | SpecialKey::Cross => {
                self.factory.retype(gem, anchor_type);
                gem.special_key = Some(key);
            }
        }
        gem.preserved_from_match = Some(self.turn);
    }

    /// Every swap that would produce a match, as `(a, b)` pairs with `a`
    /// before `b` in grid order.
    ///
    /// Trials run on clones of the grid; the board is left untouched.
    #[must_use]
    pub fn legal_swaps(&self) -> Vec<(Position, Position)> {
        let shape = self.grid.shape();
        let neighbours = [Position::new(0, 1), Position::new(1, 0)];

        let mut swaps = Vec::new();
        for a in shape.positions() {
            for step in neighbours {
                let b = Position::new(a.row + step.row, a.col + step.col);
                if !self.can_swap(a, b) {
                    continue;
                }

                let mut trial = self.grid.clone();
                let Some((at_b, at_a)) = trial.swap_cells(a, b) else {
                    continue;
                };
                let produces_match = scan(&trial, self.patterns.positive(), self.turn)
                    .iter()
                    .any(|group| group.contains(at_b.id) || group.contains(at_a.id));
                if produces_match {
                    swaps.push((a, b));
                }
            }
        }
        swaps
    }
}
