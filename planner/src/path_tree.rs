use crate::error::PlannerError;

/// All-pairs minimum-hop distances and next-hop table over a dense adjacency
/// matrix, built with Floyd-Warshall.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    nodes: usize,
    dist: Vec<Option<u32>>,
    next: Vec<Option<usize>>,
}

impl ShortestPathTree {
    /// `edges[i * nodes + j]` is true when `j` is one hop from `i`.
    pub fn build(nodes: usize, edges: &[bool]) -> Self {
        debug_assert_eq!(edges.len(), nodes * nodes);

        let mut dist = vec![None; nodes * nodes];
        let mut next = vec![None; nodes * nodes];
        for i in 0..nodes {
            for j in 0..nodes {
                let ij = i * nodes + j;
                if i == j {
                    dist[ij] = Some(0);
                    next[ij] = Some(i);
                } else if edges[ij] {
                    dist[ij] = Some(1);
                    next[ij] = Some(j);
                }
            }
        }

        for k in 0..nodes {
            for i in 0..nodes {
                let Some(ik) = dist[i * nodes + k] else {
                    continue;
                };
                for j in 0..nodes {
                    let Some(kj) = dist[k * nodes + j] else {
                        continue;
                    };
                    let through = ik + kj;
                    let ij = i * nodes + j;
                    if dist[ij].is_none_or(|d| d > through) {
                        dist[ij] = Some(through);
                        next[ij] = next[i * nodes + k];
                    }
                }
            }
        }

        Self { nodes, dist, next }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Minimum hop count, `None` when unreachable.
    pub fn distance(&self, from: usize, to: usize) -> Option<u32> {
        if from >= self.nodes || to >= self.nodes {
            return None;
        }
        self.dist[from * self.nodes + to]
    }

    /// First hop on a shortest route from `from` to `to`.
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.nodes || to >= self.nodes {
            return None;
        }
        self.next[from * self.nodes + to]
    }

    /// Cells of a shortest route, both ends included. Never returns a partial
    /// route: a missing hop anywhere fails the whole lookup.
    pub fn path(&self, from: usize, to: usize) -> Result<Vec<usize>, PlannerError> {
        let unreachable = PlannerError::UnreachableTarget { from, to };
        if self.distance(from, to).is_none() {
            return Err(unreachable);
        }

        let mut path = vec![from];
        let mut current = from;
        while current != to {
            // a route can't be longer than the node count
            if path.len() >= self.nodes {
                return Err(unreachable);
            }
            current = self.next_hop(current, to).ok_or(unreachable.clone())?;
            path.push(current);
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjacency(nodes: usize, pairs: &[(usize, usize)]) -> Vec<bool> {
        let mut edges = vec![false; nodes * nodes];
        for &(a, b) in pairs {
            edges[a * nodes + b] = true;
            edges[b * nodes + a] = true;
        }
        edges
    }

    #[test]
    fn follows_shortcuts() {
        // 0-1-2-3 chain plus a 0-3 shortcut
        let edges = adjacency(5, &[(0, 1), (1, 2), (2, 3), (0, 3)]);
        let tree = ShortestPathTree::build(5, &edges);

        assert_eq!(tree.distance(0, 3), Some(1));
        assert_eq!(tree.distance(1, 3), Some(2));
        assert_eq!(tree.path(0, 3).unwrap(), vec![0, 3]);
        assert_eq!(tree.path(1, 1).unwrap(), vec![1]);

        let path = tree.path(1, 3).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some(&1));
        assert_eq!(path.last(), Some(&3));
    }

    #[test]
    fn unreachable_pairs_fail() {
        let edges = adjacency(5, &[(0, 1), (1, 2)]);
        let tree = ShortestPathTree::build(5, &edges);

        assert_eq!(tree.distance(0, 4), None);
        assert_eq!(tree.next_hop(0, 4), None);
        assert_eq!(tree.path(0, 4), Err(PlannerError::UnreachableTarget { from: 0, to: 4 }));
    }

    #[test]
    fn every_hop_is_an_edge() {
        let nodes = 8;
        let edges = adjacency(nodes, &[(0, 1), (1, 2), (2, 3), (3, 4), (1, 5), (5, 6), (6, 4), (4, 7)]);
        let tree = ShortestPathTree::build(nodes, &edges);

        for i in 0..nodes {
            for j in 0..nodes {
                let path = tree.path(i, j).unwrap();
                assert_eq!(path.len() as u32 - 1, tree.distance(i, j).unwrap());
                for hop in path.windows(2) {
                    assert!(edges[hop[0] * nodes + hop[1]], "{} -> {} is not an edge", hop[0], hop[1]);
                }
            }
        }
    }
}
