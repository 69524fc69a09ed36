//! Path reconstruction from parent pointers.

use gridsearch_core::Cell;

use crate::state::ParentMap;

/// Walk `parent` back from `node` until a root (`None`) or an unmapped cell.
///
/// The result runs from `node` towards the root and excludes the root
/// itself. A node that is its own root yields an empty path.
pub fn reconstruct(node: Cell, parent: &ParentMap) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = node;
    while let Some(&Some(prev)) = parent.get(&current) {
        path.push(current);
        // A cycle can only come from a hand-built map.
        if path.len() > parent.len() {
            break;
        }
        current = prev;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(cells: &[(i32, i32)]) -> ParentMap {
        let mut parent = ParentMap::new();
        let mut prev = None;
        for &c in cells {
            let c = Cell::from(c);
            parent.insert(c, prev);
            prev = Some(c);
        }
        parent
    }

    #[test]
    fn walks_back_to_root_exclusive() {
        let parent = chain(&[(0, 0), (1, 1), (2, 2), (2, 3)]);
        assert_eq!(
            reconstruct(Cell::new(2, 3), &parent),
            vec![Cell::new(2, 3), Cell::new(2, 2), Cell::new(1, 1)]
        );
    }

    #[test]
    fn root_yields_empty_path() {
        let parent = chain(&[(0, 0), (0, 1)]);
        assert!(reconstruct(Cell::new(0, 0), &parent).is_empty());
    }

    #[test]
    fn unmapped_node_yields_empty_path() {
        let parent = chain(&[(0, 0), (0, 1)]);
        assert!(reconstruct(Cell::new(5, 5), &parent).is_empty());
    }

    #[test]
    fn stops_at_first_unmapped_ancestor() {
        let mut parent = ParentMap::new();
        parent.insert(Cell::new(1, 0), Some(Cell::new(0, 0)));
        assert_eq!(reconstruct(Cell::new(1, 0), &parent), vec![Cell::new(1, 0)]);
    }

    #[test]
    fn cycle_terminates() {
        let mut parent = ParentMap::new();
        parent.insert(Cell::new(0, 0), Some(Cell::new(0, 1)));
        parent.insert(Cell::new(0, 1), Some(Cell::new(0, 0)));
        assert!(reconstruct(Cell::new(0, 0), &parent).len() <= 3);
    }
}
