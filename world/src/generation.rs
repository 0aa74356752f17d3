//! Seeded maze generation.

use rand::{seq::SliceRandom, Rng};

use maze_raider_core::{Cell, GridPos, Level};

use crate::{grid::Grid, reachability::reachable_path_cells};

const BASE_WIDTH: u32 = 15;
const BASE_HEIGHT: u32 = 10;
const MAX_SIZE_INCREASE: u32 = 5;

const BASE_WALL_DENSITY: f64 = 0.25;
const WALL_DENSITY_PER_LEVEL: f64 = 0.02;
const MAX_WALL_DENSITY: f64 = 0.5;

const TREASURE_QUOTA_BASE: i64 = 5;
const TREASURE_POOL_RESERVE: i64 = 3;
const TRAP_QUOTA_BASE: i64 = 3;

/// Freshly generated maze together with its round parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MazeBlueprint {
    pub(crate) grid: Grid,
    pub(crate) player: GridPos,
    pub(crate) exit: GridPos,
    pub(crate) treasures_needed: u32,
}

/// Generates a maze for the provided level from the supplied random source.
///
/// The layout always carries a corridor frame connecting the start corner to
/// the exit corner, so the exit is reachable regardless of how dense the
/// random interior fill turns out.
pub(crate) fn generate<R: Rng + ?Sized>(level: Level, rng: &mut R) -> MazeBlueprint {
    let (width, height) = grid_size(level);
    let density = wall_density(level);

    let mut grid = Grid::new(width, height, Cell::Wall);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            if rng.gen::<f64>() > density {
                grid.put(GridPos::new(x, y), Cell::Path);
            }
        }
    }

    carve_corridor_frame(&mut grid);

    let player = GridPos::new(1, 1);
    let exit = GridPos::new(width - 2, height - 2);
    grid.put(player, Cell::Player);
    grid.put(exit, Cell::Exit);

    let mut eligible: Vec<GridPos> = reachable_path_cells(&grid, player)
        .into_iter()
        .filter(|pos| *pos != player && *pos != exit)
        .collect();

    let treasure_count = treasure_quota(level, eligible.len());
    let trap_count = trap_quota(level, eligible.len() - treasure_count);

    // One partial shuffle covers both draws; the prefix is uniform without
    // replacement, so splitting it matches drawing treasures before traps.
    let (picked, _) = eligible.partial_shuffle(rng, treasure_count + trap_count);
    for pos in &picked[..treasure_count] {
        grid.put(*pos, Cell::Treasure);
    }
    for pos in &picked[treasure_count..] {
        grid.put(*pos, Cell::Trap);
    }

    MazeBlueprint {
        grid,
        player,
        exit,
        treasures_needed: treasure_count as u32,
    }
}

/// Grid dimensions used for a maze of the provided level.
pub(crate) const fn grid_size(level: Level) -> (u32, u32) {
    let mut increase = level.get() / 3;
    if increase > MAX_SIZE_INCREASE {
        increase = MAX_SIZE_INCREASE;
    }
    (BASE_WIDTH + increase, BASE_HEIGHT + increase)
}

fn wall_density(level: Level) -> f64 {
    let density = BASE_WALL_DENSITY + f64::from(level.get()) * WALL_DENSITY_PER_LEVEL;
    density.min(MAX_WALL_DENSITY)
}

fn carve_corridor_frame(grid: &mut Grid) {
    let width = grid.width();
    let height = grid.height();

    for y in 1..height - 1 {
        grid.put(GridPos::new(1, y), Cell::Path);
        grid.put(GridPos::new(width - 2, y), Cell::Path);
    }

    for x in 1..width - 1 {
        grid.put(GridPos::new(x, 1), Cell::Path);
        grid.put(GridPos::new(x, height - 2), Cell::Path);
    }
}

fn treasure_quota(level: Level, eligible: usize) -> usize {
    let desired = TREASURE_QUOTA_BASE + i64::from(level.get());
    let cap = eligible as i64 - TREASURE_POOL_RESERVE;
    desired.min(cap).max(0) as usize
}

fn trap_quota(level: Level, remaining: usize) -> usize {
    let desired = TRAP_QUOTA_BASE + i64::from(level.get());
    desired.min(remaining as i64).max(0) as usize
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn blueprint_for(level: u32, seed: u64) -> MazeBlueprint {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate(Level::new(level), &mut rng)
    }

    fn positions_of(grid: &Grid, wanted: Cell) -> Vec<GridPos> {
        let mut positions = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = GridPos::new(x, y);
                if grid.get(pos) == Ok(wanted) {
                    positions.push(pos);
                }
            }
        }
        positions
    }

    fn without_items(grid: &Grid) -> Grid {
        let mut bare = grid.clone();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let pos = GridPos::new(x, y);
                if matches!(grid.get(pos), Ok(Cell::Treasure) | Ok(Cell::Trap)) {
                    bare.put(pos, Cell::Path);
                }
            }
        }
        bare
    }

    #[test]
    fn grid_size_grows_every_third_level_and_caps() {
        assert_eq!(grid_size(Level::new(1)), (15, 10));
        assert_eq!(grid_size(Level::new(2)), (15, 10));
        assert_eq!(grid_size(Level::new(3)), (16, 11));
        assert_eq!(grid_size(Level::new(9)), (18, 13));
        assert_eq!(grid_size(Level::new(15)), (20, 15));
        assert_eq!(grid_size(Level::new(40)), (20, 15));
    }

    #[test]
    fn wall_density_rises_with_level_and_caps_at_half() {
        assert!((wall_density(Level::new(1)) - 0.27).abs() < 1e-9);
        assert!((wall_density(Level::new(10)) - 0.45).abs() < 1e-9);
        assert!((wall_density(Level::new(13)) - 0.5).abs() < 1e-9);
        assert!((wall_density(Level::new(50)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn border_stays_walled_and_markers_sit_in_their_corners() {
        let blueprint = blueprint_for(4, 11);
        let grid = &blueprint.grid;

        for x in 0..grid.width() {
            assert_eq!(grid.get(GridPos::new(x, 0)), Ok(Cell::Wall));
            assert_eq!(grid.get(GridPos::new(x, grid.height() - 1)), Ok(Cell::Wall));
        }
        for y in 0..grid.height() {
            assert_eq!(grid.get(GridPos::new(0, y)), Ok(Cell::Wall));
            assert_eq!(grid.get(GridPos::new(grid.width() - 1, y)), Ok(Cell::Wall));
        }

        assert_eq!(blueprint.player, GridPos::new(1, 1));
        assert_eq!(
            blueprint.exit,
            GridPos::new(grid.width() - 2, grid.height() - 2)
        );
        assert_eq!(positions_of(grid, Cell::Player), vec![blueprint.player]);
        assert_eq!(positions_of(grid, Cell::Exit), vec![blueprint.exit]);
    }

    #[test]
    fn corridor_frame_is_never_walled_shut() {
        let blueprint = blueprint_for(12, 3);
        let grid = &blueprint.grid;
        let width = grid.width();
        let height = grid.height();

        for y in 1..height - 1 {
            assert!(!grid.get(GridPos::new(1, y)).expect("in bounds").is_wall());
            assert!(!grid
                .get(GridPos::new(width - 2, y))
                .expect("in bounds")
                .is_wall());
        }
        for x in 1..width - 1 {
            assert!(!grid.get(GridPos::new(x, 1)).expect("in bounds").is_wall());
            assert!(!grid
                .get(GridPos::new(x, height - 2))
                .expect("in bounds")
                .is_wall());
        }
    }

    #[test]
    fn item_counts_follow_the_level_quotas() {
        for (level, seed) in [(1, 7), (5, 21), (9, 1000)] {
            let blueprint = blueprint_for(level, seed);
            let bare = without_items(&blueprint.grid);
            let eligible = reachable_path_cells(&bare, blueprint.player).len();

            let treasures = positions_of(&blueprint.grid, Cell::Treasure).len();
            let traps = positions_of(&blueprint.grid, Cell::Trap).len();

            assert_eq!(treasures, treasure_quota(Level::new(level), eligible));
            assert_eq!(
                traps,
                trap_quota(Level::new(level), eligible - treasures),
                "trap draw uses the pool left after treasures at level {level}"
            );
            assert_eq!(blueprint.treasures_needed as usize, treasures);
        }
    }

    #[test]
    fn items_only_land_on_previously_reachable_floor() {
        for seed in 0..20 {
            let blueprint = blueprint_for(6, seed);
            let bare = without_items(&blueprint.grid);
            let reachable = reachable_path_cells(&bare, blueprint.player);

            for pos in positions_of(&blueprint.grid, Cell::Treasure) {
                assert!(reachable.contains(&pos), "treasure at {pos:?} unreachable");
            }
            for pos in positions_of(&blueprint.grid, Cell::Trap) {
                assert!(reachable.contains(&pos), "trap at {pos:?} unreachable");
            }
        }
    }

    #[test]
    fn identical_seeds_replay_identical_blueprints() {
        let first = blueprint_for(8, 99);
        let second = blueprint_for(8, 99);

        assert_eq!(first, second);
    }

    #[test]
    fn quotas_collapse_gracefully_on_starved_pools() {
        assert_eq!(treasure_quota(Level::new(1), 20), 6);
        assert_eq!(treasure_quota(Level::new(1), 5), 2);
        assert_eq!(treasure_quota(Level::new(1), 3), 0);
        assert_eq!(treasure_quota(Level::new(1), 0), 0);

        assert_eq!(trap_quota(Level::new(1), 10), 4);
        assert_eq!(trap_quota(Level::new(1), 2), 2);
        assert_eq!(trap_quota(Level::new(1), 0), 0);
    }
}
