use crate::heightmap::HeightMap;
use crate::types::{Container, PackResult, Placement};

const MAX_COLS: f64 = 80.0;
const MAX_ROWS: f64 = 40.0;

/// Top-down ASCII view of the container after the given placements, one
/// character per sampled column. `.` is bare floor; `1`-`9` scale with the
/// column height relative to the container height.
pub fn render_top_view(container: Container, placements: &[Placement]) -> String {
    let scale = f64::min(
        MAX_COLS / container.dx as f64,
        MAX_ROWS / container.dy as f64,
    )
    .min(1.0);
    let grid_w = (container.dx as f64 * scale).round() as usize;
    let grid_h = (container.dy as f64 * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut heightmap = HeightMap::new(container);
    for p in placements {
        heightmap.fill(p.x, p.y, p.placed_dims.dx, p.placed_dims.dy, p.z + p.placed_dims.dz);
    }

    let mut result = String::new();
    // Rows are y back-to-front so the origin corner lands bottom-left
    for gy in (0..grid_h).rev() {
        for gx in 0..grid_w {
            let x = ((gx as f64 / scale) as u32).min(container.dx - 1);
            let y = ((gy as f64 / scale) as u32).min(container.dy - 1);
            result.push(height_glyph(heightmap.cell(x, y), container.dz));
        }
        result.push('\n');
    }
    result
}

fn height_glyph(h: u32, container_z: u32) -> char {
    if h == 0 {
        return '.';
    }
    // 1..=9 proportional to the used height budget, never rounding to 0
    let level = (h as u64 * 9).div_ceil(container_z as u64).clamp(1, 9);
    char::from_digit(level as u32, 10).unwrap_or('9')
}

/// Explicit replay state over a finished pack: a cursor into the placement
/// log plus transition functions. `cursor` counts placements currently
/// shown, so it ranges over `0..=placements.len()`.
#[derive(Debug, Clone)]
pub struct StepView {
    result: PackResult,
    cursor: usize,
}

impl StepView {
    /// Starts with every placement shown, matching the end-of-run view.
    pub fn new(result: PackResult) -> Self {
        let cursor = result.placements.len();
        Self { result, cursor }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.result.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.result.placements.is_empty()
    }

    /// Placements visible at the current step, in commit order.
    pub fn shown(&self) -> &[Placement] {
        &self.result.placements[..self.cursor]
    }

    /// Advances one placement; saturates at the full log.
    pub fn next(&mut self) -> usize {
        self.cursor = (self.cursor + 1).min(self.result.placements.len());
        self.cursor
    }

    /// Steps one placement back; saturates at the empty container.
    pub fn previous(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.cursor
    }

    pub fn render(&self) -> String {
        render_top_view(self.result.container, self.shown())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dims;

    fn placement(id: usize, dims: Dims, x: u32, y: u32, z: u32) -> Placement {
        Placement {
            id,
            original_dims: dims,
            placed_dims: dims,
            x,
            y,
            z,
        }
    }

    fn result_with(container: Container, placements: Vec<Placement>) -> PackResult {
        let placed: u64 = placements.iter().map(|p| p.placed_dims.volume()).sum();
        let peak_height = placements
            .iter()
            .map(|p| p.z + p.placed_dims.dz)
            .max()
            .unwrap_or(0);
        PackResult {
            container,
            placements,
            unplaced: vec![],
            utilization: placed as f64 / container.volume() as f64,
            peak_height,
        }
    }

    #[test]
    fn test_empty_container_is_all_floor() {
        let out = render_top_view(Dims::new(10, 10, 10), &[]);
        assert!(!out.is_empty());
        assert!(out.chars().all(|c| c == '.' || c == '\n'));
    }

    #[test]
    fn test_single_box_shows_up() {
        let container = Dims::new(10, 10, 10);
        let placements = vec![placement(0, Dims::new(5, 5, 5), 0, 0, 0)];
        let out = render_top_view(container, &placements);
        // Half-height box renders as level 5, floor stays bare
        assert!(out.contains('5'));
        assert!(out.contains('.'));
        assert!(!out.contains('9'));
    }

    #[test]
    fn test_full_height_stack_renders_nine() {
        let container = Dims::new(4, 4, 8);
        let placements = vec![placement(0, Dims::new(4, 4, 8), 0, 0, 0)];
        let out = render_top_view(container, &placements);
        assert!(out.contains('9'));
        assert!(!out.contains('.'));
    }

    #[test]
    fn test_large_footprint_is_downscaled() {
        let out = render_top_view(Dims::new(1000, 1000, 10), &[]);
        let first_line = out.lines().next().unwrap();
        assert!(first_line.len() <= MAX_COLS as usize);
        assert!(out.lines().count() <= MAX_ROWS as usize);
    }

    #[test]
    fn test_step_view_cursor_walk() {
        let container = Dims::new(10, 10, 10);
        let result = result_with(
            container,
            vec![
                placement(0, Dims::new(5, 5, 5), 0, 0, 0),
                placement(1, Dims::new(5, 5, 5), 5, 0, 0),
            ],
        );
        let mut view = StepView::new(result);
        assert_eq!(view.cursor(), 2);
        assert_eq!(view.shown().len(), 2);

        assert_eq!(view.previous(), 1);
        assert_eq!(view.shown().len(), 1);
        assert_eq!(view.shown()[0].id, 0);

        // Saturates at the empty container, then at the full log
        assert_eq!(view.previous(), 0);
        assert_eq!(view.previous(), 0);
        assert!(view.render().chars().all(|c| c == '.' || c == '\n'));
        assert_eq!(view.next(), 1);
        assert_eq!(view.next(), 2);
        assert_eq!(view.next(), 2);
    }
}
