//! Level data
//!
//! A [`Level`] is a plain description of a scene: grid dimensions, which
//! cells are solid, where the move areas sit, and where the player spawns.
//! It is serde-friendly so levels can ship as JSON, and it knows how to
//! materialize a [`CollisionSpace`] and [`MoveAreaIndex`] from itself.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CELL_SIZE, PLAYER_HEIGHT};
use crate::sim::{CollisionSpace, MoveArea, MoveAreaIndex, Target};

/// One move area as authored: an inclusive cell span `[x_start, x_end]` on
/// row `y`, with optional jump targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSpec {
    pub x_start: i32,
    pub x_end: i32,
    pub y: i32,
    pub down: Option<Target>,
    pub up: Option<Target>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f32,
    /// Solid cells as `(x, y)` grid coordinates
    pub occupied: Vec<(usize, usize)>,
    pub areas: Vec<AreaSpec>,
    /// Shovable pot placements as `(x, y)` grid coordinates; each pot
    /// stands on the ledge whose move area sits on row `y`
    #[serde(default)]
    pub pots: Vec<(i32, i32)>,
    /// Player top-left in world units
    pub player_spawn: Vec2,
}

impl Level {
    pub fn new(grid_width: usize, grid_height: usize, cell_size: f32) -> Self {
        Self {
            grid_width,
            grid_height,
            cell_size,
            occupied: Vec::new(),
            areas: Vec::new(),
            pots: Vec::new(),
            player_spawn: Vec2::ZERO,
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Fill an entire grid row with solid cells
    pub fn fill_row(&mut self, y: usize) {
        for x in 0..self.grid_width {
            self.occupied.push((x, y));
        }
    }

    /// Fill the inclusive span `[x_start, x_end]` on row `y`
    pub fn fill_span_x(&mut self, x_start: usize, x_end: usize, y: usize) {
        for x in x_start..=x_end {
            self.occupied.push((x, y));
        }
    }

    /// Fill the inclusive span `[y_start, y_end]` in column `x`
    pub fn fill_span_y(&mut self, y_start: usize, y_end: usize, x: usize) {
        for y in y_start..=y_end {
            self.occupied.push((x, y));
        }
    }

    pub fn add_area(
        &mut self,
        x_start: i32,
        x_end: i32,
        y: i32,
        down: Option<Target>,
        up: Option<Target>,
    ) {
        self.areas.push(AreaSpec {
            x_start,
            x_end,
            y,
            down,
            up,
        });
    }

    pub fn add_pot(&mut self, x: i32, y: i32) {
        self.pots.push((x, y));
    }

    pub fn collision_space(&self) -> CollisionSpace {
        let mut space = CollisionSpace::new(self.grid_width, self.grid_height, self.cell_size);
        for &(x, y) in &self.occupied {
            space.set_occupied(x, y);
        }
        space
    }

    pub fn move_area_index(&self) -> MoveAreaIndex {
        let mut index = MoveAreaIndex::new();
        for area in &self.areas {
            index.insert(MoveArea::new(
                self.cell_size,
                area.x_start,
                area.x_end,
                area.y,
                area.down,
                area.up,
            ));
        }
        index
    }

    /// The hand-authored building exterior: a 22x63 grid of balconies,
    /// pipes, ledges, machines and billboards. Every move area sits one row
    /// above the floor its occupants stand on, so a grounded body overlaps
    /// its area.
    ///
    /// Kept invariant while tuning: max upwards jump is 5 cells, max drop
    /// is 7.
    pub fn building() -> Self {
        let mut level = Self::new(22, 63, CELL_SIZE);

        // roof
        level.add_area(2, 12, 3, Some(Target::limited(2, 3, 2, 10)), None);
        level.fill_span_x(2, 12, 4);

        // balcony 1
        level.add_area(
            2,
            11,
            6,
            Some(Target::limited(1, 3, 2, 10)),
            Some(Target::limited_from(1, -3, 2)),
        );
        level.fill_span_x(2, 11, 7);
        level.add_area(
            2,
            11,
            9,
            Some(Target::limited(2, 4, 2, 19)),
            Some(Target::limited(1, -3, 2, 10)),
        );
        level.fill_span_x(2, 11, 10);

        // pipe
        level.add_area(
            2,
            12,
            13,
            Some(Target::limited(1, 5, 4, 20)),
            Some(Target::limited(1, -4, 2, 10)),
        );
        level.add_area(13, 20, 13, Some(Target::limited(1, 5, 4, 20)), None);
        level.fill_span_x(2, 20, 14);

        // wall between the roof sections
        level.fill_span_y(4, 12, 17);

        // ledge
        level.add_area(
            17,
            21,
            18,
            Some(Target::limited(1, 3, 18, 20)),
            Some(Target::limited(2, -5, 2, 19)),
        );
        level.add_area(4, 14, 18, None, Some(Target::limited(2, -5, 2, 19)));
        level.fill_span_x(4, 14, 19);
        level.fill_span_x(17, 21, 19);

        // machine
        level.add_area(
            18,
            21,
            21,
            Some(Target::limited(0, 4, 18, 20)),
            Some(Target::new(0, -3)),
        );
        level.fill_span_x(18, 21, 22);

        // machine: to billboard, then to the machine below
        level.add_area(
            18,
            18,
            25,
            Some(Target::limited(3, 3, 4, 15)),
            Some(Target::new(0, -4)),
        );
        level.add_area(18, 21, 25, Some(Target::new(0, 4)), Some(Target::new(0, -4)));
        level.fill_span_x(18, 21, 26);

        // billboard
        level.add_area(
            16,
            16,
            28,
            Some(Target::limited(4, 1, 18, 20)),
            Some(Target::limited(4, -3, 18, 20)),
        );
        level.add_area(4, 15, 28, Some(Target::new(0, 5)), None);
        level.fill_span_x(4, 16, 29);

        // machine
        level.add_area(
            18,
            18,
            29,
            Some(Target::limited(3, 4, 2, 18)),
            Some(Target::limited(3, -1, 4, 15)),
        );
        level.add_area(
            19,
            21,
            29,
            Some(Target::limited(3, 4, 2, 18)),
            Some(Target::new(0, -4)),
        );
        level.fill_span_x(18, 21, 30);

        // ledge
        level.add_area(
            17,
            19,
            33,
            Some(Target::limited(1, 5, 18, 20)),
            Some(Target::limited(1, -4, 18, 20)),
        );
        level.add_area(
            2,
            16,
            33,
            Some(Target::limited(0, 3, 2, 14)),
            Some(Target::limited(0, -5, 4, 15)),
        );
        level.fill_span_x(2, 19, 34);

        // pipe
        level.add_area(
            2,
            3,
            36,
            Some(Target::limited(0, 4, 2, 2)),
            Some(Target::new(0, -3)),
        );
        level.add_area(
            4,
            8,
            36,
            Some(Target::limited(0, 7, 2, 6)),
            Some(Target::new(0, -3)),
        );
        level.add_area(
            15,
            15,
            36,
            Some(Target::limited(3, 2, 18, 18)),
            Some(Target::new(0, -3)),
        );
        level.add_area(9, 14, 36, None, Some(Target::new(0, -3)));
        level.fill_span_x(2, 15, 37);

        // machine
        level.add_area(
            18,
            21,
            38,
            Some(Target::new(0, 4)),
            Some(Target::limited(1, -2, 2, 14)),
        );
        level.fill_span_x(18, 21, 39);

        // pipe
        level.add_area(16, 21, 42, None, Some(Target::limited(0, -4, 18, 20)));
        level.fill_span_x(16, 21, 43);

        // balcony
        level.add_area(
            2,
            3,
            40,
            Some(Target::limited(1, 3, 2, 7)),
            Some(Target::new(0, -4)),
        );
        level.fill_span_x(2, 3, 41);
        level.add_area(
            2,
            4,
            43,
            Some(Target::limited(0, 3, 2, 2)),
            Some(Target::limited(0, -3, 2, 2)),
        );
        level.add_area(5, 7, 43, Some(Target::limited(0, 6, 2, 6)), None);
        level.fill_span_x(2, 7, 44);

        // balcony
        level.add_area(
            2,
            3,
            46,
            Some(Target::limited(1, 3, 2, 7)),
            Some(Target::new(0, -3)),
        );
        level.fill_span_x(2, 3, 47);
        // to the billboard; absolute offset, the jump goes right regardless
        level.add_area(
            7,
            7,
            49,
            Some(Target::limited_from(3, 3, 9).absolute_x()),
            None,
        );
        level.add_area(
            2,
            4,
            49,
            Some(Target::limited(0, 3, 2, 2)),
            Some(Target::limited(0, -3, 2, 2)),
        );
        level.add_area(5, 7, 49, Some(Target::limited(0, 6, 2, 8)), None);
        level.fill_span_x(2, 7, 50);

        // balcony
        level.add_area(
            2,
            3,
            52,
            Some(Target::limited(1, 3, 2, 7)),
            Some(Target::new(0, -3)),
        );
        level.add_area(
            6,
            9,
            55,
            Some(Target::new(0, 3)),
            Some(Target::limited_from(2, -3, 9)),
        );
        level.add_area(
            2,
            5,
            55,
            Some(Target::new(0, 3)),
            Some(Target::limited(0, -3, 2, 2)),
        );
        level.fill_span_x(2, 3, 53);
        level.fill_span_x(2, 9, 56);

        // billboard
        level.add_area(
            9,
            10,
            52,
            Some(Target::limited(1, 3, 2, 8)),
            Some(Target::limited(2, -3, 4, 6)),
        );
        level.fill_span_x(9, 10, 53);

        // balcony
        level.add_area(2, 10, 58, Some(Target::new(0, 3)), Some(Target::limited(0, -3, 2, 8)));
        level.add_area(10, 18, 58, Some(Target::new(0, 3)), None);
        level.fill_span_x(2, 18, 59);

        // street
        level.add_area(2, 19, 61, None, Some(Target::limited(0, -3, 2, 17)));
        level.fill_span_x(2, 19, 62);

        // pots scattered on the ledges for the player to knock off
        level.add_pot(4, 9);
        level.add_pot(9, 9);
        level.add_pot(17, 33);
        level.add_pot(18, 38);
        level.add_pot(20, 21);
        level.add_pot(5, 43);
        level.add_pot(3, 49);
        level.add_pot(3, 55);
        level.add_pot(7, 55);
        level.add_pot(4, 61);
        level.add_pot(8, 61);
        level.add_pot(12, 61);
        level.add_pot(16, 61);

        // spawn on the roof
        level.player_spawn = Vec2::new(150.0, 4.0 * CELL_SIZE - PLAYER_HEIGHT);

        level
    }
}
