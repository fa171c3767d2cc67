use crate::heightmap::HeightMap;
use crate::types::{ConfigError, Container, Item, PackResult, Placement};

/// Drives one packing run: orders the catalog, asks the height map for the
/// best position per item, and commits or records the failure.
pub struct Packer {
    container: Container,
    items: Vec<Item>,
}

impl Packer {
    pub fn new(container: Container, items: Vec<Item>) -> Result<Self, ConfigError> {
        if container.dx == 0 || container.dy == 0 || container.dz == 0 {
            return Err(ConfigError::NonPositiveContainer(container));
        }
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { container, items })
    }

    /// Runs the whole greedy pass. Always terminates with a complete result;
    /// items that fit nowhere end up in `unplaced`, never in a crash. Given
    /// the same container and catalog the result is identical every run.
    pub fn pack(&self) -> PackResult {
        let ordered = self.ordered_items();
        let mut heightmap = HeightMap::new(self.container);
        let mut placements = Vec::new();
        let mut unplaced = Vec::new();

        for item in ordered {
            match heightmap.find_best(item.dims) {
                Some(c) => {
                    heightmap.fill(c.x, c.y, c.dims.dx, c.dims.dy, c.z + c.dims.dz);
                    placements.push(Placement {
                        id: item.id,
                        original_dims: item.dims,
                        placed_dims: c.dims,
                        x: c.x,
                        y: c.y,
                        z: c.z,
                    });
                }
                None => unplaced.push(item),
            }
        }

        let placed_volume: u64 = placements.iter().map(|p| p.placed_dims.volume()).sum();
        let utilization = placed_volume as f64 / self.container.volume() as f64;

        PackResult {
            container: self.container,
            placements,
            unplaced,
            utilization,
            peak_height: heightmap.peak(),
        }
    }

    /// Largest items first leaves the most flexible residual space. The sort
    /// is stable, so equal volumes keep catalog order.
    fn ordered_items(&self) -> Vec<Item> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.dims.volume().cmp(&a.dims.volume()));
        items
    }
}
