use nalgebra::Point2;

use crate::math::polygon_2d::area;
use crate::math::{Coord, Path, Paths};

/// A nested polygon tree, as reported by clipping engines that resolve
/// outer/hole ownership.
///
/// The root holds no polygon. Its children are outer polygons, their
/// children are holes, and so on alternately.
///
/// Dropping, cloning and comparing walk the tree with a heap stack, so depth
/// is bounded by memory rather than by the call stack.
#[derive(Debug)]
pub struct PolyTree<T: Coord> {
    polygon: Path<T>,
    depth: usize,
    children: Vec<PolyTree<T>>,
}

/// Integer-domain tree.
pub type PolyTree64 = PolyTree<i64>;

/// Floating-domain tree.
pub type PolyTreeD = PolyTree<f64>;

impl<T: Coord> Default for PolyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Coord> Drop for PolyTree<T> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<T: Coord> Clone for PolyTree<T> {
    fn clone(&self) -> Self {
        // Copy the nodes in pre-order, then attach each one to its parent
        // from the back so every subtree is complete when it moves.
        let mut nodes: Vec<Option<Self>> = Vec::new();
        let mut parents = Vec::new();
        let mut stack = vec![(self, 0)];
        while let Some((node, parent)) = stack.pop() {
            let index = nodes.len();
            nodes.push(Some(Self {
                polygon: node.polygon.clone(),
                depth: node.depth,
                children: Vec::new(),
            }));
            parents.push(parent);
            stack.extend(node.children.iter().rev().map(|child| (child, index)));
        }
        for index in (1..nodes.len()).rev() {
            let Some(mut node) = nodes[index].take() else {
                continue;
            };
            node.children.reverse();
            if let Some(Some(parent)) = nodes.get_mut(parents[index]) {
                parent.children.push(node);
            }
        }
        let mut root = nodes.into_iter().next().flatten().unwrap_or_default();
        root.children.reverse();
        root
    }
}

impl<T: Coord> PartialEq for PolyTree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if a.depth != b.depth
                || a.polygon != b.polygon
                || a.children.len() != b.children.len()
            {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl<T: Coord> PolyTree<T> {
    /// Creates an empty root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            polygon: Vec::new(),
            depth: 0,
            children: Vec::new(),
        }
    }

    /// Appends a child owning `polygon` and returns it for further nesting.
    pub fn add_child(&mut self, polygon: Path<T>) -> &mut PolyTree<T> {
        let depth = self.depth + 1;
        self.children.push(Self {
            polygon,
            depth,
            children: Vec::new(),
        });
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// The polygon held by this node (empty for the root).
    #[must_use]
    pub fn polygon(&self) -> &[Point2<T>] {
        &self.polygon
    }

    /// Direct children of this node.
    #[must_use]
    pub fn children(&self) -> &[PolyTree<T>] {
        &self.children
    }

    /// Returns `true` for nodes at even depth below the root.
    #[must_use]
    pub fn is_hole(&self) -> bool {
        self.depth > 0 && self.depth % 2 == 0
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum of the signed areas of this node's polygon and every descendant.
    ///
    /// Holes wind opposite to their owners, so this is the net filled area.
    #[must_use]
    pub fn area(&self) -> f64 {
        let mut total = 0.0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            total += area(&node.polygon);
            stack.extend(node.children.iter());
        }
        total
    }
}

/// Flattens a tree into a list of paths in depth-first pre-order.
///
/// Empty polygons (the root) are skipped. Uses an explicit stack, so deep
/// nesting cannot exhaust the call stack.
#[must_use]
pub fn poly_tree_to_paths<T: Coord>(tree: &PolyTree<T>) -> Paths<T> {
    let mut result = Vec::new();
    let mut stack = vec![tree];
    while let Some(node) = stack.pop() {
        if !node.polygon.is_empty() {
            result.push(node.polygon.clone());
        }
        stack.extend(node.children.iter().rev());
    }
    result
}
