pub mod collision;
pub mod geometry;
pub mod player;
pub mod stats;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::collision::{Layer, Level};
    use crate::geometry::Aabb;

    /// Tile edge length used by [`level_from_rows`], in world units.
    pub const TILE: f32 = 8.0;

    /// Build a level from ASCII rows, top row first.
    ///
    /// `#` wall, `^` spike, `*` fruit, `S` spawn (centre of the tile),
    /// anything else is empty space.
    pub fn level_from_rows(rows: &[&str]) -> Level {
        let mut level = Level::new(0.0, 0.0);
        let height = rows.len();
        for (r, row) in rows.iter().enumerate() {
            let ty = (height - 1 - r) as f32;
            for (c, ch) in row.chars().enumerate() {
                let tx = c as f32;
                let bounds = Aabb::from_edges(tx * TILE, ty * TILE, (tx + 1.0) * TILE, (ty + 1.0) * TILE);
                match ch {
                    '#' => {
                        level.add(Layer::Walls, bounds);
                    },
                    '^' => {
                        level.add(Layer::Hazards, bounds);
                    },
                    '*' => {
                        level.add(Layer::Collectibles, bounds);
                    },
                    'S' => {
                        level.spawn_x = bounds.x;
                        level.spawn_y = bounds.y;
                    },
                    _ => {},
                }
            }
        }
        level
    }

    /// A flat floor `width` tiles wide whose top surface is at `y = TILE`.
    pub fn flat_floor(width: usize) -> Level {
        let floor = "#".repeat(width);
        let air = ".".repeat(width);
        let rows: Vec<&str> = std::iter::repeat_n(air.as_str(), 15)
            .chain(std::iter::once(floor.as_str()))
            .collect();
        level_from_rows(&rows)
    }

}
