//! Reachability analysis over the maze grid.

use std::collections::{BTreeSet, VecDeque};

use maze_raider_core::{Cell, GridPos};

use crate::grid::Grid;

/// Collects every open-floor cell reachable from `start` by four-way steps.
///
/// The search treats any non-wall cell as traversable, so treasures, traps,
/// the exit marker, and the player marker are all walked through, but a
/// position is recorded only when its cell holds [`Cell::Path`] at the time
/// of the call. The grid is never mutated, so repeated calls over the same
/// grid return equal sets. An out-of-bounds start yields the empty set.
#[must_use]
pub fn reachable_path_cells(grid: &Grid, start: GridPos) -> BTreeSet<GridPos> {
    let mut reachable = BTreeSet::new();
    if !grid.contains(start) {
        return reachable;
    }

    let width = usize::try_from(grid.width()).unwrap_or(0);
    let height = usize::try_from(grid.height()).unwrap_or(0);
    let Some(cell_count) = width.checked_mul(height) else {
        return reachable;
    };
    if cell_count == 0 {
        return reachable;
    }

    let mut visited = vec![false; cell_count];
    let mut frontier = VecDeque::new();

    if let Some(start_index) = index(width, start) {
        visited[start_index] = true;
        frontier.push_back(start);
    }

    while let Some(pos) = frontier.pop_front() {
        let Ok(cell) = grid.get(pos) else {
            continue;
        };

        if cell == Cell::Path {
            let _ = reachable.insert(pos);
        }

        for neighbor in neighbors(pos, grid.width(), grid.height()) {
            let Some(neighbor_index) = index(width, neighbor) else {
                continue;
            };
            if visited[neighbor_index] {
                continue;
            }

            let Ok(neighbor_cell) = grid.get(neighbor) else {
                continue;
            };
            if neighbor_cell.is_wall() {
                continue;
            }

            visited[neighbor_index] = true;
            frontier.push_back(neighbor);
        }
    }

    reachable
}

fn neighbors(pos: GridPos, width: u32, height: u32) -> impl Iterator<Item = GridPos> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(y) = pos.y().checked_sub(1) {
        candidates[count] = Some(GridPos::new(pos.x(), y));
        count += 1;
    }

    if let Some(x) = pos.x().checked_add(1) {
        if x < width {
            candidates[count] = Some(GridPos::new(x, pos.y()));
            count += 1;
        }
    }

    if let Some(y) = pos.y().checked_add(1) {
        if y < height {
            candidates[count] = Some(GridPos::new(pos.x(), y));
            count += 1;
        }
    }

    if let Some(x) = pos.x().checked_sub(1) {
        candidates[count] = Some(GridPos::new(x, pos.y()));
        count += 1;
    }

    candidates.into_iter().take(count).flatten()
}

fn index(width: usize, pos: GridPos) -> Option<usize> {
    let x = usize::try_from(pos.x()).ok()?;
    let y = usize::try_from(pos.y()).ok()?;
    y.checked_mul(width)?.checked_add(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = u32::try_from(rows.len()).expect("row count fits u32");
        let width = rows
            .first()
            .map(|row| u32::try_from(row.chars().count()).expect("row width fits u32"))
            .unwrap_or(0);
        let mut grid = Grid::new(width, height, Cell::Wall);

        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Path,
                    '@' => Cell::Player,
                    'E' => Cell::Exit,
                    '$' => Cell::Treasure,
                    '^' => Cell::Trap,
                    other => panic!("unknown test glyph {other}"),
                };
                grid.put(GridPos::new(x as u32, y as u32), cell);
            }
        }

        grid
    }

    #[test]
    fn records_only_path_cells_while_walking_through_markers() {
        let grid = grid_from_rows(&["@$.", "#^E"]);

        let reachable = reachable_path_cells(&grid, GridPos::new(0, 0));

        assert_eq!(
            reachable.into_iter().collect::<Vec<_>>(),
            vec![GridPos::new(2, 0)],
            "treasure, trap, exit, and player cells are traversed but not recorded"
        );
    }

    #[test]
    fn walls_isolate_unreachable_pockets() {
        let grid = grid_from_rows(&["@.#.", "..#.", "####"]);

        let reachable = reachable_path_cells(&grid, GridPos::new(0, 0));

        assert!(reachable.contains(&GridPos::new(1, 0)));
        assert!(reachable.contains(&GridPos::new(0, 1)));
        assert!(reachable.contains(&GridPos::new(1, 1)));
        assert!(
            !reachable.contains(&GridPos::new(3, 0)),
            "the pocket behind the wall column must stay unreachable"
        );
        assert!(!reachable.contains(&GridPos::new(3, 1)));
    }

    #[test]
    fn repeated_analysis_returns_equal_sets() {
        let grid = grid_from_rows(&["@..", ".#.", "..E"]);

        let first = reachable_path_cells(&grid, GridPos::new(0, 0));
        let second = reachable_path_cells(&grid, GridPos::new(0, 0));

        assert_eq!(first, second);
    }

    #[test]
    fn out_of_bounds_start_returns_the_empty_set() {
        let grid = grid_from_rows(&["...", "..."]);

        let reachable = reachable_path_cells(&grid, GridPos::new(7, 7));

        assert!(reachable.is_empty());
    }

    #[test]
    fn start_cell_is_recorded_when_it_is_open_floor() {
        let grid = grid_from_rows(&[".#", "##"]);

        let reachable = reachable_path_cells(&grid, GridPos::new(0, 0));

        assert_eq!(
            reachable.into_iter().collect::<Vec<_>>(),
            vec![GridPos::new(0, 0)]
        );
    }
}
