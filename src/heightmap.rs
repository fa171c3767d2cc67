use crate::types::{Container, Dims};

/// The container's skyline: one height per (x, y) column of the footprint.
/// Cell values only ever increase, once per committed placement.
#[derive(Debug, Clone)]
pub struct HeightMap {
    container: Container,
    cells: Vec<u32>,
    peak: u32,
}

/// One admissible position found by the search, with the score that won it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub dims: Dims,
    pub x: u32,
    pub y: u32,
    pub z: u32,
    pub score: (u32, u32, u64),
}

impl HeightMap {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            cells: vec![0; container.dx as usize * container.dy as usize],
            peak: 0,
        }
    }

    pub fn container(&self) -> Container {
        self.container
    }

    /// Highest cell anywhere in the container.
    pub fn peak(&self) -> u32 {
        self.peak
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        x as usize * self.container.dy as usize + y as usize
    }

    pub fn cell(&self, x: u32, y: u32) -> u32 {
        debug_assert!(x < self.container.dx && y < self.container.dy);
        self.cells[self.idx(x, y)]
    }

    /// Max height over the footprint `[x, x+dx) x [y, y+dy)`, and whether
    /// every cell in it sits at that height. Out-of-bounds footprints are a
    /// caller bug.
    pub fn region_top(&self, x: u32, y: u32, dx: u32, dy: u32) -> (u32, bool) {
        debug_assert!(x + dx <= self.container.dx && y + dy <= self.container.dy);
        let mut max = 0;
        let mut min = u32::MAX;
        for cx in x..x + dx {
            for cy in y..y + dy {
                let h = self.cells[self.idx(cx, cy)];
                max = max.max(h);
                min = min.min(h);
            }
        }
        (max, max == min)
    }

    /// Raises the footprint `[x, x+dx) x [y, y+dy)` to height `top`. Only
    /// called when committing a placement; never lowers a cell.
    pub fn fill(&mut self, x: u32, y: u32, dx: u32, dy: u32, top: u32) {
        debug_assert!(x + dx <= self.container.dx && y + dy <= self.container.dy);
        for cx in x..x + dx {
            for cy in y..y + dy {
                let i = self.idx(cx, cy);
                debug_assert!(self.cells[i] <= top);
                self.cells[i] = top;
            }
        }
        self.peak = self.peak.max(top);
    }

    /// Greedy placement search for one item: scans every distinct orientation
    /// and every footprint origin, keeping the candidate with the smallest
    /// `(resting height, resulting peak, x + y)` score. Returns `None` when
    /// no position satisfies the support and height-budget rules — a normal
    /// outcome, not an error.
    pub fn find_best(&self, item_dims: Dims) -> Option<Candidate> {
        let c = self.container;
        let mut best: Option<Candidate> = None;

        for dims in item_dims.orientations() {
            if !dims.fits_in(&c) {
                continue;
            }

            for x in 0..=c.dx - dims.dx {
                for y in 0..=c.dy - dims.dy {
                    let (base_z, flat) = self.region_top(x, y, dims.dx, dims.dy);

                    // Support rule: the whole footprint must rest at one height
                    if !flat {
                        continue;
                    }
                    // Widened: base_z and dz each fit u32 but their sum may not
                    let top = base_z as u64 + dims.dz as u64;
                    if top > c.dz as u64 {
                        continue;
                    }

                    let new_peak = self.peak.max(top as u32);
                    let score = (base_z, new_peak, x as u64 + y as u64);

                    if best.is_none() || score < best.unwrap().score {
                        best = Some(Candidate {
                            dims,
                            x,
                            y,
                            z: base_z,
                            score,
                        });
                    }
                }
            }
        }

        best
    }
}
