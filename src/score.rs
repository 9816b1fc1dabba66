use crate::character::Position;

/// Size of the largest 4-connected group among `bins` on a `width` x `height`
/// board. Returns 0 when there are no bins.
pub fn largest_cluster(width: i32, height: i32, bins: impl IntoIterator<Item = Position>) -> usize {
    let (columns, rows) = (width.max(0) as usize, height.max(0) as usize);
    // Only called on in-bounds positions.
    let index = |pos: Position| pos.y as usize * columns + pos.x as usize;
    let in_bounds = |pos: Position| 0 <= pos.x && pos.x < width && 0 <= pos.y && pos.y < height;

    let mut occupied = vec![false; columns * rows];
    let mut starts = Vec::new();
    for pos in bins {
        assert!(in_bounds(pos), "bin at {} is off the board", pos);
        occupied[index(pos)] = true;
        starts.push(pos);
    }

    let mut visited = vec![false; occupied.len()];
    let mut stack: Vec<Position> = Vec::new();
    let mut largest = 0;

    for start in starts {
        if visited[index(start)] {
            continue;
        }

        // DFS over the bins connected to this one
        let mut size = 0;
        visited[index(start)] = true;
        stack.push(start);
        while let Some(pos) = stack.pop() {
            size += 1;
            for next in pos.neighbours() {
                if in_bounds(next) && occupied[index(next)] && !visited[index(next)] {
                    visited[index(next)] = true;
                    stack.push(next);
                }
            }
        }

        largest = largest.max(size);
    }

    largest
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::seq::SliceRandom;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn positions(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().map(|&c| Position::from(c)).collect()
    }

    #[test]
    fn test_no_bins() {
        assert_eq!(largest_cluster(3, 3, Vec::new()), 0);
    }

    #[test]
    fn test_degenerate_boards() {
        let bins = positions(&[(69_998, 0), (69_999, 0)]);
        assert_eq!(largest_cluster(70_000, 1, bins.clone()), 2);
        assert_eq!(largest_cluster(3, 0, Vec::new()), 0);
    }

    #[test]
    fn test_single_bin() {
        assert_eq!(largest_cluster(3, 3, positions(&[(1, 1)])), 1);
    }

    #[test]
    fn test_growing_cluster() {
        assert_eq!(largest_cluster(3, 3, positions(&[(1, 1), (2, 1)])), 2);
        // Diagonal neighbours are a separate cluster
        assert_eq!(
            largest_cluster(3, 3, positions(&[(1, 1), (2, 1), (0, 0)])),
            2
        );
        assert_eq!(
            largest_cluster(3, 3, positions(&[(0, 0), (1, 1), (2, 1), (0, 1)])),
            4
        );
        assert_eq!(
            largest_cluster(3, 3, positions(&[(0, 2), (1, 1), (2, 1), (0, 1)])),
            4
        );
    }

    #[test]
    fn test_diagonal_only() {
        assert_eq!(
            largest_cluster(3, 3, positions(&[(0, 0), (1, 1), (2, 2)])),
            1
        );
    }

    #[test]
    fn test_picks_largest_of_several() {
        // B--
        // BBB
        // --B
        let bins = positions(&[(0, 0), (0, 1), (1, 1), (2, 1), (2, 2)]);
        assert_eq!(largest_cluster(3, 3, bins), 5);

        // BB-B
        // ---B
        // B--B
        let bins = positions(&[(0, 0), (1, 0), (3, 0), (3, 1), (0, 2), (3, 2)]);
        assert_eq!(largest_cluster(4, 3, bins), 3);
    }

    #[test]
    fn test_order_independent() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xb1b5);
        let (width, height) = (7, 6);

        for _ in 0..50 {
            let mut bins: Vec<Position> = (0..height)
                .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
                .collect();
            bins.shuffle(&mut rng);
            bins.truncate(width as usize * height as usize / 2);

            let expected = largest_cluster(width, height, bins.clone());
            for _ in 0..10 {
                bins.shuffle(&mut rng);
                assert_eq!(largest_cluster(width, height, bins.clone()), expected);
            }
        }
    }

    #[test]
    fn test_matches_naive_union_count() {
        // Compare against a brute-force labelling that repeatedly merges labels
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let (width, height) = (5, 5);

        for _ in 0..50 {
            let mut all: Vec<Position> = (0..height)
                .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
                .collect();
            all.shuffle(&mut rng);
            let bins: Vec<Position> = all.into_iter().take(12).collect();

            let mut labels: Vec<usize> = (0..bins.len()).collect();
            let mut changed = true;
            while changed {
                changed = false;
                for i in 0..bins.len() {
                    for j in 0..bins.len() {
                        let (a, b) = (bins[i], bins[j]);
                        let adjacent = (a.x - b.x).abs() + (a.y - b.y).abs() == 1;
                        if adjacent && labels[i] != labels[j] {
                            let low = labels[i].min(labels[j]);
                            labels[i] = low;
                            labels[j] = low;
                            changed = true;
                        }
                    }
                }
            }
            let expected = (0..bins.len())
                .map(|label| labels.iter().filter(|&&l| l == label).count())
                .max()
                .unwrap_or(0);

            assert_eq!(largest_cluster(width, height, bins), expected);
        }
    }
}
