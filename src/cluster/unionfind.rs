//! disjoint sets with path compression and union by rank

use crate::point::PointId;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<PointId>,
    rank: Vec<u8>,
    nb_sets: usize,
}

impl UnionFind {
    /// nb singletons
    pub fn new(nb: usize) -> Self {
        UnionFind {
            parent: (0..nb).collect(),
            rank: vec![0; nb],
            nb_sets: nb,
        }
    }

    /// root of the set containing u
    pub fn find(&mut self, u: PointId) -> PointId {
        let mut root = u;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // compress path
        let mut v = u;
        while self.parent[v] != root {
            let next = self.parent[v];
            self.parent[v] = root;
            v = next;
        }
        root
    }

    /// merges sets of u and v, returns false if they were already in the same set
    pub fn union(&mut self, u: PointId, v: PointId) -> bool {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return false;
        }
        match self.rank[ru].cmp(&self.rank[rv]) {
            std::cmp::Ordering::Less => self.parent[ru] = rv,
            std::cmp::Ordering::Greater => self.parent[rv] = ru,
            std::cmp::Ordering::Equal => {
                self.parent[rv] = ru;
                self.rank[ru] += 1;
            }
        }
        self.nb_sets -= 1;
        true
    }

    pub fn get_nb_sets(&self) -> usize {
        self.nb_sets
    }
} // end of impl UnionFind

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn merge_sets() {
        let mut uf = UnionFind::new(6);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));
        assert_eq!(uf.get_nb_sets(), 3);
        assert_eq!(uf.find(3), uf.find(0));
        assert_ne!(uf.find(4), uf.find(5));
    }
}
