//! Row/column arithmetic for directional moves over a linear slot list.
//!
//! Geometry is never stored: column counts follow the live layout, so every
//! query takes the current `(columns, count)` pair. A grid with zero columns
//! or zero items is treated as not yet measured: every move stays put and
//! no boundary row exists.
//!
//! Ragged final rows: moving down from a row whose cell directly below does
//! not exist, while a later row does, lands on the last element. Moving down
//! from the last row is an edge.

use slotgrid_types::input::Direction;

/// First or last row of the arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowEdge {
    First,
    Last,
}

/// Result of asking for a move in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Move by this index delta.
    Move(isize),
    /// Layout not measured, or the index is outside the arrangement.
    Stay,
    /// The move would leave the grid through this side.
    Edge(Direction),
}

/// Snapshot of a grid's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub count: usize,
}

impl GridGeometry {
    pub fn new(columns: usize, count: usize) -> Self {
        Self { columns, count }
    }

    pub fn is_measured(&self) -> bool {
        self.columns > 0 && self.count > 0
    }

    /// `ceil(count / columns)`, or 0 when unmeasured.
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.count.div_ceil(self.columns)
        }
    }

    pub fn row_of(&self, index: usize) -> usize {
        index.checked_div(self.columns).unwrap_or(0)
    }

    pub fn column_of(&self, index: usize) -> usize {
        index.checked_rem(self.columns).unwrap_or(0)
    }

    fn last_row(&self) -> usize {
        self.row_of(self.count - 1)
    }

    /// Classify a move from `current` in `dir`.
    pub fn step(&self, dir: Direction, current: usize) -> Step {
        if !self.is_measured() || current >= self.count {
            return Step::Stay;
        }
        let cols = self.columns;
        let row = self.row_of(current);
        let col = self.column_of(current);

        match dir {
            Direction::Up => {
                if row == 0 {
                    Step::Edge(Direction::Up)
                } else {
                    Step::Move(-(cols as isize))
                }
            },
            Direction::Down => {
                if row == self.last_row() {
                    Step::Edge(Direction::Down)
                } else if current + cols < self.count {
                    Step::Move(cols as isize)
                } else {
                    Step::Move((self.count - 1 - current) as isize)
                }
            },
            Direction::Left => {
                if col == 0 {
                    Step::Edge(Direction::Left)
                } else {
                    Step::Move(-1)
                }
            },
            Direction::Right => {
                if col + 1 == cols || current + 1 == self.count {
                    Step::Edge(Direction::Right)
                } else {
                    Step::Move(1)
                }
            },
        }
    }

    /// Index delta for a move, with edges clamped to 0.
    pub fn delta(&self, dir: Direction, current: usize) -> isize {
        match self.step(dir, current) {
            Step::Move(delta) => delta,
            Step::Stay | Step::Edge(_) => 0,
        }
    }

    /// Whether `current` sits on the first or last row.
    pub fn is_on_boundary_row(&self, current: usize, edge: RowEdge) -> bool {
        if !self.is_measured() {
            return false;
        }
        let row = self.row_of(current);
        match edge {
            RowEdge::First => row == 0,
            RowEdge::Last => row == self.last_row(),
        }
    }
}

/// Index delta for moving from `current` in `dir`; 0 at edges.
pub fn delta_for_direction(
    dir: Direction,
    current: usize,
    columns: usize,
    selectable_count: usize,
) -> isize {
    GridGeometry::new(columns, selectable_count).delta(dir, current)
}

/// Whether `current` lies on the requested boundary row.
pub fn is_on_boundary_row(
    current: usize,
    columns: usize,
    selectable_count: usize,
    edge: RowEdge,
) -> bool {
    GridGeometry::new(columns, selectable_count).is_on_boundary_row(current, edge)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRS: [Direction; 4] = Direction::ALL;

    #[test]
    fn unmeasured_layout_stays_put() {
        for dir in DIRS {
            assert_eq!(delta_for_direction(dir, 0, 0, 10), 0);
            assert_eq!(delta_for_direction(dir, 0, 4, 0), 0);
            assert_eq!(GridGeometry::new(0, 10).step(dir, 0), Step::Stay);
        }
        assert!(!is_on_boundary_row(0, 0, 10, RowEdge::Last));
        assert!(!is_on_boundary_row(0, 5, 0, RowEdge::First));
    }

    #[test]
    fn rows_round_up() {
        assert_eq!(GridGeometry::new(5, 12).rows(), 3);
        assert_eq!(GridGeometry::new(5, 10).rows(), 2);
        assert_eq!(GridGeometry::new(0, 10).rows(), 0);
    }

    #[test]
    fn interior_moves() {
        let g = GridGeometry::new(5, 15);
        assert_eq!(g.delta(Direction::Up, 7), -5);
        assert_eq!(g.delta(Direction::Down, 7), 5);
        assert_eq!(g.delta(Direction::Left, 7), -1);
        assert_eq!(g.delta(Direction::Right, 7), 1);
    }

    #[test]
    fn horizontal_moves_do_not_wrap_rows() {
        let g = GridGeometry::new(5, 15);
        assert_eq!(g.step(Direction::Right, 4), Step::Edge(Direction::Right));
        assert_eq!(g.step(Direction::Left, 5), Step::Edge(Direction::Left));
    }

    #[test]
    fn right_from_last_element_is_edge() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.step(Direction::Right, 11), Step::Edge(Direction::Right));
        assert_eq!(g.delta(Direction::Right, 11), 0);
    }

    #[test]
    fn up_from_first_row_is_edge() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.step(Direction::Up, 3), Step::Edge(Direction::Up));
    }

    // columns=5, count=12: rows of 5, 5, 2.
    #[test]
    fn ragged_down_from_last_item_is_blocked() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.delta(Direction::Down, 11), 0);
        assert_eq!(g.step(Direction::Down, 11), Step::Edge(Direction::Down));
    }

    #[test]
    fn ragged_down_clamps_to_last_item() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.delta(Direction::Down, 7), 4);
        assert_eq!(7 + g.delta(Direction::Down, 7), 11);
        assert_eq!(g.delta(Direction::Down, 5), 5);
        assert_eq!(g.delta(Direction::Down, 6), 5);
    }

    #[test]
    fn ragged_last_row_up_returns_to_same_column() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.delta(Direction::Up, 11), -5);
    }

    #[test]
    fn single_column_moves() {
        let g = GridGeometry::new(1, 3);
        assert_eq!(g.delta(Direction::Down, 0), 1);
        assert_eq!(g.step(Direction::Right, 0), Step::Edge(Direction::Right));
        assert_eq!(g.step(Direction::Left, 2), Step::Edge(Direction::Left));
    }

    #[test]
    fn index_past_end_stays() {
        let g = GridGeometry::new(5, 12);
        assert_eq!(g.step(Direction::Up, 12), Step::Stay);
    }

    #[test]
    fn boundary_rows() {
        let g = GridGeometry::new(5, 12);
        assert!(g.is_on_boundary_row(0, RowEdge::First));
        assert!(g.is_on_boundary_row(4, RowEdge::First));
        assert!(!g.is_on_boundary_row(5, RowEdge::First));
        assert!(g.is_on_boundary_row(10, RowEdge::Last));
        assert!(g.is_on_boundary_row(11, RowEdge::Last));
        assert!(!g.is_on_boundary_row(9, RowEdge::Last));
    }

    #[test]
    fn single_row_is_both_boundaries() {
        let g = GridGeometry::new(5, 3);
        assert!(g.is_on_boundary_row(1, RowEdge::First));
        assert!(g.is_on_boundary_row(1, RowEdge::Last));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_direction() -> impl Strategy<Value = Direction> {
            prop_oneof![
                Just(Direction::Up),
                Just(Direction::Down),
                Just(Direction::Left),
                Just(Direction::Right),
            ]
        }

        fn arb_grid() -> impl Strategy<Value = (usize, usize, usize)> {
            (1usize..12, 1usize..200)
                .prop_flat_map(|(cols, count)| (Just(cols), Just(count), 0..count))
        }

        proptest! {
            #[test]
            fn delta_stays_in_range((cols, count, current) in arb_grid(), dir in arb_direction()) {
                let delta = delta_for_direction(dir, current, cols, count);
                let target = current as isize + delta;
                prop_assert!(target >= 0);
                prop_assert!((target as usize) < count);
            }

            #[test]
            fn vertical_moves_change_row_by_one((cols, count, current) in arb_grid()) {
                let g = GridGeometry::new(cols, count);
                if let Step::Move(delta) = g.step(Direction::Down, current) {
                    let target = (current as isize + delta) as usize;
                    prop_assert_eq!(g.row_of(target), g.row_of(current) + 1);
                }
                if let Step::Move(delta) = g.step(Direction::Up, current) {
                    let target = (current as isize + delta) as usize;
                    prop_assert_eq!(g.row_of(target) + 1, g.row_of(current));
                    prop_assert_eq!(g.column_of(target), g.column_of(current));
                }
            }

            #[test]
            fn last_row_formula((cols, count, current) in arb_grid()) {
                let expected = current / cols == (count - 1) / cols;
                prop_assert_eq!(is_on_boundary_row(current, cols, count, RowEdge::Last), expected);
            }

            #[test]
            fn down_blocked_only_on_last_row((cols, count, current) in arb_grid()) {
                let blocked = delta_for_direction(Direction::Down, current, cols, count) == 0;
                prop_assert_eq!(blocked, is_on_boundary_row(current, cols, count, RowEdge::Last));
            }
        }
    }
}
