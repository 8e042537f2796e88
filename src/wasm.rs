use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{Difficulty, GeneratorParams, Grid, Session, Tile, generate, validate_size};

/// Convert a Grid to a JsValue (2D array of `{ kind, rotation }`).
fn grid_to_js(grid: &Grid) -> Result<JsValue, JsError> {
    let rows: Vec<Vec<Tile>> = grid.rows().map(|row| row.to_vec()).collect();
    serde_wasm_bindgen::to_value(&rows).map_err(|e| JsError::new(&e.to_string()))
}

/// Generate a scrambled level of the given size and seed.
/// Returns the grid as a 2D array directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate_level(size: u8, seed: u64) -> Result<JsValue, JsError> {
    let size = validate_size(size as usize)?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let level = generate(size, &mut rng, &GeneratorParams::default());

    grid_to_js(&level.grid)
}

/// A running game: the active level plus level counter and clock.
///
/// Timestamps are milliseconds from the page's monotonic clock
/// (`performance.now()`).
#[wasm_bindgen]
pub struct WasmGame {
    session: Session<ChaCha20Rng>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a game on a grid of side `size` (1..=32).
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, seed: u64, now_ms: f64) -> Result<WasmGame, JsError> {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let session =
            Session::with_size(size as usize, rng, GeneratorParams::default(), now_ms as u64)?;
        Ok(WasmGame { session })
    }

    /// Restart at level 1 with a named difficulty ("easy", "medium", "hard").
    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self, difficulty: &str, now_ms: f64) -> Result<(), JsError> {
        let difficulty: Difficulty = difficulty.parse()?;
        self.session.new_game(difficulty, now_ms as u64);
        Ok(())
    }

    /// Rotate one tile and return whether the level is now won.
    pub fn rotate(&mut self, row: usize, col: usize) -> Result<bool, JsError> {
        self.session.try_rotate(row, col)?;
        Ok(self.session.is_won())
    }

    /// The current grid as a 2D array of `{ kind, rotation }`.
    pub fn tiles(&self) -> Result<JsValue, JsError> {
        grid_to_js(&self.session.state().grid)
    }

    /// The connected route as an array of `{ row, col }`, or `null`.
    pub fn check(&self) -> Result<JsValue, JsError> {
        let result = self.session.check();
        if !result.connected {
            return Ok(JsValue::NULL);
        }
        serde_wasm_bindgen::to_value(&result.path).map_err(|e| JsError::new(&e.to_string()))
    }

    #[wasm_bindgen(js_name = isWon)]
    pub fn is_won(&self) -> bool {
        self.session.is_won()
    }

    pub fn level(&self) -> u32 {
        self.session.level_number()
    }

    #[wasm_bindgen(js_name = elapsedSecs)]
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        self.session.elapsed_secs(now_ms as u64)
    }

    #[wasm_bindgen(js_name = nextLevel)]
    pub fn next_level(&mut self, now_ms: f64) {
        self.session.next_level(now_ms as u64);
    }

    pub fn randomize(&mut self) {
        self.session.randomize();
    }
}
