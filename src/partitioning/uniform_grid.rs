use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::utils::consts::MAX_GRID_CELLS;

const NIL: u32 = u32::MAX;

/// A uniform spatial hash over a set of handle-identified points.
///
/// Buckets are singly-linked intrusive lists: the grid owns one `next` link
/// per handle, so insertion is O(1) and removal scans only its bucket. The
/// grid is single-owner and accessed sequentially; nothing is invalidated by
/// interleaved inserts and removes between enumerations.
///
/// Coordinates falling outside the gridded bounds clamp to the border cells,
/// so every point always lands in a valid bucket.
#[derive(Clone, Debug)]
pub struct UniformGrid {
    origin: Point<Real>,
    cell_size: Real,
    cols: u32,
    rows: u32,
    buckets: Vec<u32>,
    next: Vec<u32>,
}

impl UniformGrid {
    /// Creates a grid covering `aabb` for up to `capacity` handles, sized for
    /// `expected` resident points.
    ///
    /// The cell size targets one resident point per cell:
    /// `sqrt(area / (expected + 1))`, bounded below by `1e-4` and enlarged
    /// uniformly if the cell count would exceed
    /// [`MAX_GRID_CELLS`](crate::utils::consts::MAX_GRID_CELLS).
    pub fn new(aabb: &Aabb, capacity: usize, expected: usize) -> Self {
        let extents = aabb.extents();
        let width = extents.x.max(0.0);
        let height = extents.y.max(0.0);
        let area = width * height;

        let mut cell_size = (area / (expected + 1) as Real).sqrt().max(1.0e-4);

        let mut cols = (width / cell_size).ceil().max(1.0) as u64;
        let mut rows = (height / cell_size).ceil().max(1.0) as u64;

        while cols * rows > MAX_GRID_CELLS as u64 {
            let scale = ((cols * rows) as Real / MAX_GRID_CELLS as Real).sqrt();
            cell_size *= scale.max(1.001);
            cols = (width / cell_size).ceil().max(1.0) as u64;
            rows = (height / cell_size).ceil().max(1.0) as u64;
        }

        Self {
            origin: aabb.mins,
            cell_size,
            cols: cols as u32,
            rows: rows as u32,
            buckets: vec![NIL; (cols * rows) as usize],
            next: vec![NIL; capacity],
        }
    }

    #[inline]
    fn cell_coords(&self, p: &Point<Real>) -> (u32, u32) {
        let cx = ((p.x - self.origin.x) / self.cell_size).floor();
        let cy = ((p.y - self.origin.y) / self.cell_size).floor();
        (
            (cx.max(0.0) as u32).min(self.cols - 1),
            (cy.max(0.0) as u32).min(self.rows - 1),
        )
    }

    #[inline]
    fn bucket_index(&self, p: &Point<Real>) -> usize {
        let (cx, cy) = self.cell_coords(p);
        (cy * self.cols + cx) as usize
    }

    /// Inserts `handle`, located at `p`, by prepending it to its bucket.
    pub fn insert(&mut self, handle: u32, p: &Point<Real>) {
        let bucket = self.bucket_index(p);
        self.next[handle as usize] = self.buckets[bucket];
        self.buckets[bucket] = handle;
    }

    /// Removes `handle`, located at `p`, by scanning its bucket.
    ///
    /// Removing a handle that is not present is a no-op.
    pub fn remove(&mut self, handle: u32, p: &Point<Real>) {
        let bucket = self.bucket_index(p);
        let mut curr = self.buckets[bucket];

        if curr == handle {
            self.buckets[bucket] = self.next[handle as usize];
            self.next[handle as usize] = NIL;
            return;
        }

        while curr != NIL {
            let succ = self.next[curr as usize];
            if succ == handle {
                self.next[curr as usize] = self.next[handle as usize];
                self.next[handle as usize] = NIL;
                return;
            }
            curr = succ;
        }
    }

    /// Calls `f` with every handle stored in a cell overlapped by `window`.
    ///
    /// Enumerates by cell, so a handle is reported once; points outside the
    /// window but sharing an overlapped cell are reported too (the caller is
    /// expected to run its own precise test).
    pub fn for_each_in_aabb(&self, window: &Aabb, f: &mut impl FnMut(u32)) {
        let (min_cx, min_cy) = self.cell_coords(&window.mins);
        let (max_cx, max_cy) = self.cell_coords(&window.maxs);

        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let mut curr = self.buckets[(cy * self.cols + cx) as usize];
                while curr != NIL {
                    f(curr);
                    curr = self.next[curr as usize];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(points: &[Point<Real>]) -> UniformGrid {
        let aabb = Aabb::from_points(points);
        let mut grid = UniformGrid::new(&aabb, points.len(), points.len());
        for (i, p) in points.iter().enumerate() {
            grid.insert(i as u32, p);
        }
        grid
    }

    fn collect_window(grid: &UniformGrid, window: &Aabb) -> Vec<u32> {
        let mut hits = Vec::new();
        grid.for_each_in_aabb(window, &mut |h| hits.push(h));
        hits.sort_unstable();
        hits
    }

    #[test]
    fn window_enumeration() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(9.0, 9.0),
        ];
        let grid = grid_with(&points);

        let window = Aabb::new(Point::new(4.0, 4.0), Point::new(6.0, 6.0));
        assert!(collect_window(&grid, &window).contains(&1));

        let everything = Aabb::new(Point::new(-1.0, -1.0), Point::new(10.0, 10.0));
        assert_eq!(collect_window(&grid, &everything), vec![0, 1, 2]);
    }

    #[test]
    fn remove_unlinks_from_bucket() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
        ];
        let mut grid = grid_with(&points);

        // All three share a bucket; remove the middle of the chain.
        grid.remove(1, &points[1]);
        let everything = Aabb::from_points(&points).loosened(1.0);
        assert_eq!(collect_window(&grid, &everything), vec![0, 2]);

        grid.remove(0, &points[0]);
        grid.remove(2, &points[2]);
        assert!(collect_window(&grid, &everything).is_empty());
    }

    #[test]
    fn out_of_range_points_clamp_to_border() {
        let aabb = Aabb::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let mut grid = UniformGrid::new(&aabb, 2, 2);
        grid.insert(0, &Point::new(-100.0, -100.0));
        grid.insert(1, &Point::new(100.0, 100.0));

        let hits = collect_window(&grid, &Aabb::new(Point::new(-200.0, -200.0), Point::new(200.0, 200.0)));
        assert_eq!(hits, vec![0, 1]);
    }

    #[test]
    fn degenerate_aabb_still_usable() {
        let aabb = Aabb::new(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        let mut grid = UniformGrid::new(&aabb, 1, 0);
        grid.insert(0, &Point::new(3.0, 3.0));
        let hits = collect_window(&grid, &aabb);
        assert_eq!(hits, vec![0]);
    }
}
