//! Routing trait and default best-first grid search.
//!
//! # Pluggability
//!
//! [`Pathfinder`][crate::Pathfinder] calls routing via the [`Router`] trait,
//! so integrations can swap in their own search without touching the cache
//! or the movement layer.  The default [`GridRouter`] is what the agent uses.
//!
//! # Ordering
//!
//! The open set is keyed on `g + h` where `g` counts legs from the start and
//! `h` is the **squared** Euclidean distance to the goal.  `h` is not
//! admissible, so routes are not guaranteed shortest; in practice the search
//! runs straight at the goal and only spreads out around obstacles.  Equal
//! keys pop in insertion order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use pt_core::{Direction, TileCoord};

use crate::{PassabilityCache, SpatialError, SpatialResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// The result of a routing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Tiles from start to goal, both inclusive.
    pub tiles:    Vec<TileCoord>,
    /// `costs[i]` is the number of legs from the start to `tiles[i]`.
    pub costs:    Vec<u32>,
    /// Distinct tiles the search created nodes for.
    pub expanded: usize,
}

impl Path {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of legs to walk.
    pub fn steps(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    /// `true` if start and goal are the same tile.
    pub fn is_trivial(&self) -> bool {
        self.tiles.len() == 1
    }

    pub fn start(&self) -> Option<TileCoord> {
        self.tiles.first().copied()
    }

    pub fn goal(&self) -> Option<TileCoord> {
        self.tiles.last().copied()
    }

    /// Consecutive `(from, to)` tile pairs.
    pub fn legs(&self) -> impl Iterator<Item = (TileCoord, TileCoord)> + '_ {
        self.tiles.windows(2).map(|w| (w[0], w[1]))
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable path search over a refreshed [`PassabilityCache`].
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: searches run on the runtime's
/// blocking pool while the router is shared with the agent.
pub trait Router: Send + Sync {
    /// Find a tile sequence from `start` to `goal`.
    ///
    /// `start == goal` yields a single-tile path.  Failure is always
    /// [`SpatialError::NoPath`], never a partial path.
    fn route(
        &self,
        cache: &PassabilityCache,
        start: TileCoord,
        goal: TileCoord,
    ) -> SpatialResult<Path>;
}

// ── GridRouter ────────────────────────────────────────────────────────────────

/// Best-first search over the eight grid moves.
///
/// A diagonal is legal only if both of its cardinal detours are: for
/// NorthEast, the current tile's north and east edges are open, the east
/// tile is enterable and its north edge open, and the north tile is
/// enterable and its east edge open.  An agent therefore never cuts a
/// blocked corner.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRouter;

impl Router for GridRouter {
    fn route(
        &self,
        cache: &PassabilityCache,
        start: TileCoord,
        goal: TileCoord,
    ) -> SpatialResult<Path> {
        search(cache, start, goal)
    }
}

/// Can the agent step from `from` in direction `dir`?  The destination tile
/// itself is checked by the caller.
pub(crate) fn leg_legal(cache: &PassabilityCache, from: TileCoord, dir: Direction) -> bool {
    match dir.components() {
        None => cache.passable(from, dir),
        Some((vertical, horizontal)) => {
            let side = from.offset(horizontal);
            let ahead = from.offset(vertical);
            cache.passable(from, vertical)
                && cache.passable(from, horizontal)
                && cache.passable(side, Direction::None)
                && cache.passable(side, vertical)
                && cache.passable(ahead, Direction::None)
                && cache.passable(ahead, horizontal)
        }
    }
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Arena slot for one visited tile.
#[derive(Debug, Clone)]
struct PathNode {
    pos:  TileCoord,
    /// Legs from the start; `u32::MAX` until a legal edge reaches the tile.
    g:    u32,
    h:    i64,
    prev: Option<usize>,
}

impl PathNode {
    #[inline]
    fn key(&self) -> i64 {
        self.g as i64 + self.h
    }
}

fn search(cache: &PassabilityCache, start: TileCoord, goal: TileCoord) -> SpatialResult<Path> {
    if start == goal {
        return Ok(Path { tiles: vec![start], costs: vec![0], expanded: 1 });
    }

    let window = cache.window();
    if !window.contains(goal) {
        return Err(SpatialError::NoPath { from: start, to: goal, visited: 0 });
    }

    let mut arena: Vec<PathNode> = Vec::new();
    let mut index: FxHashMap<TileCoord, usize> = FxHashMap::default();

    // Min-heap on (key, seq, node).  `seq` makes equal keys pop FIFO.
    let mut heap: BinaryHeap<Reverse<(i64, u64, usize)>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    arena.push(PathNode { pos: start, g: 0, h: start.dist_sq(goal), prev: None });
    index.insert(start, 0);
    heap.push(Reverse((arena[0].key(), seq, 0)));

    while let Some(Reverse((key, _, current))) = heap.pop() {
        // Skip entries superseded by a cheaper route.
        if key != arena[current].key() {
            continue;
        }

        let pos = arena[current].pos;
        if pos == goal {
            return Ok(reconstruct(&arena, current));
        }

        let next_g = arena[current].g.saturating_add(1);

        for dir in Direction::ALL_MOVES {
            let neighbor = pos.offset(dir);
            if !cache.passable(neighbor, Direction::None) {
                continue;
            }
            let legal = leg_legal(cache, pos, dir);

            match index.get(&neighbor) {
                None => {
                    let idx = arena.len();
                    arena.push(PathNode {
                        pos:  neighbor,
                        g:    if legal { next_g } else { u32::MAX },
                        h:    neighbor.dist_sq(goal),
                        prev: legal.then_some(current),
                    });
                    index.insert(neighbor, idx);
                    if legal {
                        seq += 1;
                        heap.push(Reverse((arena[idx].key(), seq, idx)));
                    }
                }
                Some(&idx) => {
                    if legal && next_g < arena[idx].g {
                        arena[idx].g = next_g;
                        arena[idx].prev = Some(current);
                        seq += 1;
                        heap.push(Reverse((arena[idx].key(), seq, idx)));
                    }
                }
            }
        }
    }

    Err(SpatialError::NoPath { from: start, to: goal, visited: arena.len() })
}

fn reconstruct(arena: &[PathNode], goal: usize) -> Path {
    let mut tiles = Vec::new();
    let mut costs = Vec::new();
    let mut cur = Some(goal);
    while let Some(i) = cur {
        tiles.push(arena[i].pos);
        costs.push(arena[i].g);
        cur = arena[i].prev;
    }
    tiles.reverse();
    costs.reverse();
    Path { tiles, costs, expanded: arena.len() }
}
