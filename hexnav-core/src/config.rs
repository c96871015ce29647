//! MapConfig - Grid dimensions and obstacle layout

use std::path::Path;

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::adjacency::AdjacencyGraph;
use crate::error::Result;
use crate::grid::{Grid, TileCoord};

/// Map layout loaded at map start
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    /// Impassable tiles
    #[serde(default)]
    pub obstacles: Vec<TileCoord>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_tile_size() -> f32 {
    115.0
}

impl MapConfig {
    pub fn grid(&self) -> Result<Grid> {
        Grid::new(self.width, self.height, self.tile_size)
    }

    pub fn obstacle_set(&self) -> FxHashSet<TileCoord> {
        self.obstacles.iter().copied().collect()
    }

    /// Build the grid and its adjacency graph
    pub fn build(&self) -> Result<(Grid, AdjacencyGraph)> {
        let grid = self.grid()?;
        let obstacles = self.obstacle_set();
        let graph = AdjacencyGraph::build(&grid, |coord| obstacles.contains(&coord));
        Ok((grid, graph))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&content)?;
        config.grid()?;

        if let Some(outside) = config
            .obstacles
            .iter()
            .find(|c| c.col < 0 || c.row < 0 || c.col >= config.width || c.row >= config.height)
        {
            tracing::warn!(map = %config.name, obstacle = %outside, "obstacle lies outside the map");
        }
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Open map with `count` distinct obstacles scattered at random.
    /// `count` is capped at the tile count.
    pub fn random<R: Rng>(rng: &mut R, name: &str, width: i32, height: i32, count: usize) -> Self {
        let tile_count = (width.max(0) as usize) * (height.max(0) as usize);
        let count = count.min(tile_count);

        let mut chosen = FxHashSet::default();
        while chosen.len() < count {
            chosen.insert(TileCoord::new(rng.gen_range(0..width), rng.gen_range(0..height)));
        }
        let mut obstacles: Vec<TileCoord> = chosen.into_iter().collect();
        obstacles.sort_by_key(|c| (c.row, c.col));

        Self {
            name: name.to_string(),
            width,
            height,
            tile_size: default_tile_size(),
            obstacles,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            width: 7,
            height: 9,
            tile_size: 115.0,
            // Coast and water along the north-west corner
            obstacles: vec![
                TileCoord::new(0, 0),
                TileCoord::new(1, 0),
                TileCoord::new(0, 1),
                TileCoord::new(1, 1),
                TileCoord::new(2, 1),
                TileCoord::new(0, 2),
                TileCoord::new(1, 2),
                TileCoord::new(0, 3),
                TileCoord::new(1, 3),
                TileCoord::new(3, 3),
                TileCoord::new(3, 4),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileIndex;

    #[test]
    fn test_default_map() {
        let config = MapConfig::default();
        let (grid, graph) = config.build().unwrap();
        assert_eq!(grid.tile_count(), 63);
        let blocked: Vec<usize> = config.obstacles.iter().map(|&c| grid.index_of(c).get()).collect();
        assert_eq!(blocked, vec![0, 1, 7, 8, 9, 14, 15, 21, 22, 24, 31]);
        for index in blocked {
            assert_eq!(graph.degree(TileIndex(index)), 0);
        }
    }

    #[test]
    fn test_json_defaults() {
        let config: MapConfig = serde_json::from_str(r#"{"width": 4, "height": 2}"#).unwrap();
        assert_eq!(config.name, "unnamed");
        assert_eq!(config.tile_size, 115.0);
        assert!(config.obstacles.is_empty());
    }

    #[test]
    fn test_json_obstacles() {
        let json = r#"{"name": "ford", "width": 3, "height": 3, "tile_size": 2.0,
                       "obstacles": [{"col": 1, "row": 1}]}"#;
        let config: MapConfig = serde_json::from_str(json).unwrap();
        assert!(config.obstacle_set().contains(&TileCoord::new(1, 1)));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let config = MapConfig {
            width: 0,
            ..MapConfig::default()
        };
        assert!(config.build().is_err());
    }
}
