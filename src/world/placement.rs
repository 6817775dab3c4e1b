//! Collectible placement
//!
//! Shuffles the free path cells once and hands them out in order, so a
//! request either fits completely or fails up front.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Grid, MazeError, Position};
use crate::entities::{Collectible, CollectibleKind};

/// How many of one kind to scatter, and what each is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: CollectibleKind,
    pub count: usize,
    pub value: u32,
}

impl Placement {
    pub fn new(kind: CollectibleKind, count: usize, value: u32) -> Self {
        Self { kind, count, value }
    }
}

/// Scatter collectibles over distinct path cells, avoiding `excluded`
///
/// Requests are filled in order. Fails with
/// [`MazeError::PlacementUnderflow`] when there are not enough free cells
/// for all of them.
pub fn place(
    grid: &Grid,
    requests: &[Placement],
    excluded: &[Position],
    rng: &mut StdRng,
) -> Result<Vec<Collectible>, MazeError> {
    let mut free: Vec<Position> = grid
        .path_positions()
        .into_iter()
        .filter(|pos| !excluded.contains(pos))
        .collect();

    // An overflowing total can never fit either
    let requested = requests
        .iter()
        .try_fold(0usize, |total, r| total.checked_add(r.count))
        .unwrap_or(usize::MAX);

    if requested > free.len() {
        log::warn!(
            "Placement underflow: {} collectibles requested, {} free cells",
            requested,
            free.len()
        );
        return Err(MazeError::PlacementUnderflow {
            requested,
            available: free.len(),
        });
    }

    free.shuffle(rng);

    let mut cells = free.into_iter();
    let mut collectibles = Vec::with_capacity(requested);
    for request in requests {
        for position in cells.by_ref().take(request.count) {
            collectibles.push(Collectible::new(position, request.kind, request.value));
        }
    }

    Ok(collectibles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::generate;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn standard_requests() -> Vec<Placement> {
        vec![
            Placement::new(CollectibleKind::Gem, 6, 10),
            Placement::new(CollectibleKind::Power, 2, 50),
        ]
    }

    #[test]
    fn test_places_requested_counts() {
        let mut rng = StdRng::seed_from_u64(4);
        let grid = generate(25, 15, &mut rng).unwrap();
        let excluded = [grid.start(), grid.exit()];

        let placed = place(&grid, &standard_requests(), &excluded, &mut rng).unwrap();

        assert_eq!(placed.len(), 8);
        let gems = placed.iter().filter(|c| c.kind == CollectibleKind::Gem).count();
        assert_eq!(gems, 6);
        assert!(placed
            .iter()
            .filter(|c| c.kind == CollectibleKind::Power)
            .all(|c| c.value == 50));
    }

    #[test]
    fn test_no_shared_cells_and_never_on_excluded() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let grid = generate(11, 9, &mut rng).unwrap();
            let excluded = [grid.start(), grid.exit()];
            let placed = place(&grid, &standard_requests(), &excluded, &mut rng).unwrap();

            let cells: HashSet<_> = placed.iter().map(|c| c.position).collect();
            assert_eq!(cells.len(), placed.len(), "duplicate cell for seed {}", seed);
            for c in &placed {
                assert!(!excluded.contains(&c.position));
                assert!(grid.is_walkable(c.position));
            }
        }
    }

    #[test]
    fn test_underflow_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        // 5x5 perfect maze has 7 path cells; 2 excluded leaves 5
        let grid = generate(5, 5, &mut rng).unwrap();
        let excluded = [grid.start(), grid.exit()];
        let err = place(
            &grid,
            &[Placement::new(CollectibleKind::Gem, 6, 10)],
            &excluded,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(
            err,
            MazeError::PlacementUnderflow {
                requested: 6,
                available: 5
            }
        );
    }

    #[test]
    fn test_overflowing_total_is_underflow() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = generate(7, 7, &mut rng).unwrap();
        let err = place(
            &grid,
            &[
                Placement::new(CollectibleKind::Gem, usize::MAX, 10),
                Placement::new(CollectibleKind::Power, 2, 50),
            ],
            &[],
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MazeError::PlacementUnderflow { requested: usize::MAX, .. }
        ));
    }

    #[test]
    fn test_exact_fit_uses_every_free_cell() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = generate(5, 5, &mut rng).unwrap();
        let excluded = [grid.start(), grid.exit()];
        let placed = place(
            &grid,
            &[Placement::new(CollectibleKind::Gem, 5, 10)],
            &excluded,
            &mut rng,
        )
        .unwrap();
        assert_eq!(placed.len(), 5);
    }

    #[test]
    fn test_empty_request() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = generate(5, 5, &mut rng).unwrap();
        assert!(place(&grid, &[], &[], &mut rng).unwrap().is_empty());
    }
}
