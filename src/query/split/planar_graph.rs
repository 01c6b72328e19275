use crate::math::{Point, Real};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::hashset::HashSet;
use smallvec::SmallVec;

/// Quantized coordinate key identifying one node of the planar graph.
///
/// Coordinates are multiplied by 100 and floored, so points within roughly
/// `0.01` world units collapse to a single node. This is what merges a cut
/// intersection with a nearby polygon vertex instead of creating a sliver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct QuantKey(i64, i64);

const QUANT_SCALE: Real = 100.0;

impl QuantKey {
    /// The key of the grid cell containing `p`.
    #[inline]
    pub fn from_point(p: &Point<Real>) -> Self {
        Self(
            (p.x * QUANT_SCALE).floor() as i64,
            (p.y * QUANT_SCALE).floor() as i64,
        )
    }
}

#[derive(Clone, Debug)]
struct GraphNode {
    /// Representative position: the first point seen for this key.
    position: Point<Real>,
    /// Outgoing directed edges.
    successors: SmallVec<[QuantKey; 4]>,
}

/// A graph of directed edges over coincidence-quantized 2D points.
///
/// Every inserted edge keeps the filled region on its left: outer loops are
/// inserted counter-clockwise, holes clockwise, and cut seams in both
/// directions. [`PlanarGraph::extract_loops`] then recovers each face of the
/// planar subdivision exactly once: counter-clockwise loops are filled
/// regions and clockwise loops are surviving holes.
#[derive(Clone, Debug, Default)]
pub struct PlanarGraph {
    nodes: HashMap<QuantKey, GraphNode>,
    edge_count: usize,
}

impl PlanarGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of directed edges inserted so far.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Inserts the directed edge `a → b`.
    ///
    /// Both endpoints are quantized; an edge collapsing to a single node is
    /// ignored, and the same `(u, v)` pair is never duplicated for the same
    /// direction. The reverse direction is a distinct edge: insert it
    /// explicitly when both sides of a seam are needed.
    pub fn insert_edge(&mut self, a: &Point<Real>, b: &Point<Real>) {
        let ka = QuantKey::from_point(a);
        let kb = QuantKey::from_point(b);

        if ka == kb {
            return;
        }

        // The target node must exist even if nothing starts there yet.
        let _ = Self::node_at(&mut self.nodes, kb, *b);
        let node = Self::node_at(&mut self.nodes, ka, *a);

        if !node.successors.contains(&kb) {
            node.successors.push(kb);
            self.edge_count += 1;
        }
    }

    fn node_at(
        nodes: &mut HashMap<QuantKey, GraphNode>,
        key: QuantKey,
        position: Point<Real>,
    ) -> &mut GraphNode {
        match nodes.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => e.insert(GraphNode {
                position,
                successors: SmallVec::new(),
            }),
        }
    }

    /// The representative position of the node keyed by `key`.
    #[inline]
    pub fn position(&self, key: QuantKey) -> Option<Point<Real>> {
        self.nodes.get(&key).map(|n| n.position)
    }

    /// Extracts every face of the planar subdivision as a vertex loop.
    ///
    /// Each unvisited directed edge seeds a walk that repeatedly takes the
    /// left-most turn among the remaining unvisited edges until it returns
    /// to its starting vertex, so every directed edge is traversed at most
    /// once overall. Walks that fail to close (numerical pathologies,
    /// dead-ends) are dropped with a warning, as are loops shorter than
    /// three vertices.
    pub fn extract_loops(&self) -> Vec<Vec<Point<Real>>> {
        let mut visited: HashSet<(QuantKey, QuantKey)> = HashSet::default();
        let mut loops = Vec::new();
        let watchdog = 2 * self.edge_count + 100;

        for (&u, node) in self.nodes.iter() {
            for &v in &node.successors {
                if visited.contains(&(u, v)) {
                    continue;
                }

                match self.walk_face(u, v, watchdog, &mut visited) {
                    Some(pts) if pts.len() >= 3 => loops.push(pts),
                    Some(_) => {}
                    None => {
                        log::warn!("planar graph: dropping an unclosed face walk");
                    }
                }
            }
        }

        loops
    }

    /// Walks one face starting with the directed edge `start → second`.
    ///
    /// Returns `None` if the walk fails to close within the iteration
    /// watchdog or reaches a node with no unvisited outgoing edge.
    fn walk_face(
        &self,
        start: QuantKey,
        second: QuantKey,
        watchdog: usize,
        visited: &mut HashSet<(QuantKey, QuantKey)>,
    ) -> Option<Vec<Point<Real>>> {
        let mut pts = vec![self.nodes[&start].position];
        let _ = visited.insert((start, second));

        let mut prev = start;
        let mut curr = second;
        let mut steps = 0;

        while curr != start {
            pts.push(self.nodes[&curr].position);

            steps += 1;
            if steps > watchdog {
                return None;
            }

            let next = self.leftmost_turn(prev, curr, visited)?;
            let _ = visited.insert((curr, next));
            prev = curr;
            curr = next;
        }

        Some(pts)
    }

    /// Among the unvisited outgoing edges of `curr`, picks the one whose
    /// direction makes the largest counter-clockwise angle, in `[0, 2π)`,
    /// with the reverse of the incoming direction `prev → curr`.
    ///
    /// The reverse edge itself scores zero, so a dead-end backtracks last,
    /// and ties keep the first successor in insertion order.
    fn leftmost_turn(
        &self,
        prev: QuantKey,
        curr: QuantKey,
        visited: &HashSet<(QuantKey, QuantKey)>,
    ) -> Option<QuantKey> {
        let node = self.nodes.get(&curr)?;
        let here = node.position;
        let rev = self.nodes[&prev].position - here;
        let base = rev.y.atan2(rev.x);

        let mut best: Option<(Real, QuantKey)> = None;

        for &succ in &node.successors {
            if visited.contains(&(curr, succ)) {
                continue;
            }

            let angle = if succ == prev {
                0.0
            } else {
                let dir = self.nodes[&succ].position - here;
                let tau = 2.0 * std::f64::consts::PI as Real;
                (dir.y.atan2(dir.x) - base).rem_euclid(tau)
            };

            if best.map_or(true, |(best_angle, _)| angle > best_angle) {
                best = Some((angle, succ));
            }
        }

        best.map(|(_, key)| key)
    }
}
