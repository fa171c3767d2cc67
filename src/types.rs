use serde::{Deserialize, Deserializer, Serialize};

/// Axis-aligned extents of a cuboid, in integer units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub dx: u32,
    pub dy: u32,
    pub dz: u32,
}

impl Dims {
    pub fn new(dx: u32, dy: u32, dz: u32) -> Self {
        Self { dx, dy, dz }
    }

    pub fn volume(&self) -> u64 {
        self.dx as u64 * self.dy as u64 * self.dz as u64
    }

    pub fn fits_in(&self, other: &Dims) -> bool {
        self.dx <= other.dx && self.dy <= other.dy && self.dz <= other.dz
    }

    /// Distinct axis-aligned rotations of these extents, in lexicographic
    /// order. A cube yields 1, two equal extents yield 3, otherwise 6.
    pub fn orientations(&self) -> Vec<Dims> {
        let (a, b, c) = (self.dx, self.dy, self.dz);
        let mut all = vec![
            Dims::new(a, b, c),
            Dims::new(a, c, b),
            Dims::new(b, a, c),
            Dims::new(b, c, a),
            Dims::new(c, a, b),
            Dims::new(c, b, a),
        ];
        all.sort();
        all.dedup();
        all
    }
}

impl std::fmt::Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.dx, self.dy, self.dz)
    }
}

/// Container extents. Constant for a whole packing run.
pub type Container = Dims;

/// One catalog entry: stable id plus ceiling-rounded extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: usize,
    pub dims: Dims,
}

/// A committed placement: which item, in which orientation, at which
/// min-corner position. Immutable once committed. Serializes with the
/// position as a `position_xyz` triple, matching the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "PlacementRecord", from = "PlacementRecord")]
pub struct Placement {
    pub id: usize,
    pub original_dims: Dims,
    pub placed_dims: Dims,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

#[derive(Serialize, Deserialize)]
struct PlacementRecord {
    id: usize,
    original_dims: Dims,
    placed_dims: Dims,
    position_xyz: [u32; 3],
}

impl From<Placement> for PlacementRecord {
    fn from(p: Placement) -> Self {
        Self {
            id: p.id,
            original_dims: p.original_dims,
            placed_dims: p.placed_dims,
            position_xyz: [p.x, p.y, p.z],
        }
    }
}

impl From<PlacementRecord> for Placement {
    fn from(r: PlacementRecord) -> Self {
        Self {
            id: r.id,
            original_dims: r.original_dims,
            placed_dims: r.placed_dims,
            x: r.position_xyz[0],
            y: r.position_xyz[1],
            z: r.position_xyz[2],
        }
    }
}

/// Complete outcome of one packing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackResult {
    pub container: Container,
    /// In commit order, not spatial order.
    pub placements: Vec<Placement>,
    pub unplaced: Vec<Item>,
    pub utilization: f64,
    pub peak_height: u32,
}

impl PackResult {
    pub fn placed_volume(&self) -> u64 {
        self.placements.iter().map(|p| p.placed_dims.volume()).sum()
    }
}

/// Invalid run configuration, rejected before any packing state is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositiveContainer(Container),
    EmptyCatalog,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositiveContainer(c) => {
                write!(f, "container dimensions must be non-zero, got {}", c)
            }
            ConfigError::EmptyCatalog => write!(f, "item list is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Accepts JSON numbers sent as floats (e.g. `12.0`) where an integer
/// dimension is expected.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if !v.is_finite() || v < 0.0 || v > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!("invalid dimension {v}")));
    }
    Ok(v.ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientations_all_distinct() {
        let o = Dims::new(1, 2, 3).orientations();
        assert_eq!(o.len(), 6);
        // Lexicographic order is the determinism contract
        let mut sorted = o.clone();
        sorted.sort();
        assert_eq!(o, sorted);
    }

    #[test]
    fn test_orientations_two_equal() {
        let o = Dims::new(2, 2, 5).orientations();
        assert_eq!(o.len(), 3);
        assert!(o.contains(&Dims::new(2, 2, 5)));
        assert!(o.contains(&Dims::new(2, 5, 2)));
        assert!(o.contains(&Dims::new(5, 2, 2)));
    }

    #[test]
    fn test_orientations_cube() {
        let o = Dims::new(4, 4, 4).orientations();
        assert_eq!(o, vec![Dims::new(4, 4, 4)]);
    }

    #[test]
    fn test_volume() {
        assert_eq!(Dims::new(10, 20, 30).volume(), 6000);
        let big = Dims::new(u32::MAX, u32::MAX, 1);
        assert_eq!(big.volume(), u32::MAX as u64 * u32::MAX as u64);
    }

    #[test]
    fn test_placement_serializes_position_triple() {
        let p = Placement {
            id: 3,
            original_dims: Dims::new(2, 3, 4),
            placed_dims: Dims::new(4, 3, 2),
            x: 5,
            y: 6,
            z: 7,
        };
        let v = serde_json::to_value(p).unwrap();
        assert_eq!(v["position_xyz"], serde_json::json!([5, 6, 7]));
        assert!(v.get("x").is_none());

        let back: Placement = serde_json::from_value(v).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_fits_in() {
        assert!(Dims::new(5, 5, 5).fits_in(&Dims::new(10, 10, 10)));
        assert!(!Dims::new(11, 5, 5).fits_in(&Dims::new(10, 10, 10)));
    }
}
