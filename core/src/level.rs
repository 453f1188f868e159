use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Level data as shipped in the level files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub level_id: u32,
    /// Carpet columns, front piece first.
    pub color_columns: Vec<Vec<Color>>,
    /// Bobbin colors by row, [`EMPTY_TOKEN`] where there is no bobbin.
    pub bobbin_grid: Vec<Vec<i32>>,
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| {
            log::warn!("invalid level data: {}", err);
            GameError::InvalidLevelData
        })
    }

    pub fn columns(&self) -> Columns {
        Columns::new(self.color_columns.iter().map(|column| column.iter().copied()))
    }

    pub fn token_grid(&self) -> Result<TokenGrid> {
        TokenGrid::from_rows(&self.bobbin_grid)
    }
}

/// Bobbins laid out on the grid, fixed for the whole game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenGrid {
    tokens: Array2<Option<Color>>,
}

impl TokenGrid {
    pub fn new(tokens: Array2<Option<Color>>) -> Self {
        Self { tokens }
    }

    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            log::warn!("bobbin grid is not rectangular");
            return Err(GameError::RaggedGrid);
        }

        let mut tokens = Array2::from_elem((rows.len(), width), None);
        for (row_index, row) in rows.iter().enumerate() {
            for (col_index, &value) in row.iter().enumerate() {
                tokens[[row_index, col_index]] = decode_token(value)?;
            }
        }

        Ok(Self { tokens })
    }

    /// `(rows, cols)`
    pub fn size(&self) -> (usize, usize) {
        self.tokens.dim()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        let (rows, cols) = self.size();
        pos.row < rows && pos.col < cols
    }

    pub fn validate_pos(&self, pos: GridPos) -> Result<GridPos> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Color of the bobbin at `pos`, `None` for empty or out of bounds positions.
    pub fn token_at(&self, pos: GridPos) -> Option<Color> {
        self.tokens.get(pos.to_nd_index()).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Option<Color>)> + '_ {
        self.tokens
            .indexed_iter()
            .map(|(index, &token)| (GridPos::from(index), token))
    }

    pub fn token_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_some()).count()
    }
}

fn decode_token(value: i32) -> Result<Option<Color>> {
    match value {
        EMPTY_TOKEN => Ok(None),
        _ => Color::try_from(value)
            .map(Some)
            .map_err(|_| GameError::InvalidColor(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const LEVEL_JSON: &str = r#"{
        "level_id": 11,
        "color_columns": [[0, 1], [2], []],
        "bobbin_grid": [[0, -1, 2], [-1, 1, 1]]
    }"#;

    #[test]
    fn from_json_reads_level_file_format() {
        let level = Level::from_json(LEVEL_JSON).unwrap();

        assert_eq!(level.level_id, 11);
        assert_eq!(level.color_columns, vec![vec![0, 1], vec![2], vec![]]);

        let columns = level.columns();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns.front(0), Some(0));
        assert_eq!(columns.remaining(), 3);
    }

    #[test]
    fn from_json_rejects_malformed_data() {
        assert_eq!(
            Level::from_json(r#"{"level_id": 1}"#),
            Err(GameError::InvalidLevelData)
        );
        assert_eq!(
            Level::from_json(r#"{"level_id": 1, "color_columns": [[-1]], "bobbin_grid": []}"#),
            Err(GameError::InvalidLevelData)
        );
    }

    #[test]
    fn token_grid_maps_sentinel_to_empty() {
        let grid = Level::from_json(LEVEL_JSON).unwrap().token_grid().unwrap();

        assert_eq!(grid.size(), (2, 3));
        assert_eq!(grid.token_at(GridPos::new(0, 0)), Some(0));
        assert_eq!(grid.token_at(GridPos::new(0, 1)), None);
        assert_eq!(grid.token_at(GridPos::new(1, 2)), Some(1));
        assert_eq!(grid.token_at(GridPos::new(5, 5)), None);
        assert_eq!(grid.token_count(), 4);
    }

    #[test]
    fn token_grid_rejects_ragged_rows_and_bad_colors() {
        assert_eq!(
            TokenGrid::from_rows(&[vec![1, 2], vec![3]]),
            Err(GameError::RaggedGrid)
        );
        assert_eq!(
            TokenGrid::from_rows(&[vec![1, -2]]),
            Err(GameError::InvalidColor(-2))
        );
        assert_eq!(
            TokenGrid::from_rows(&[vec![300]]),
            Err(GameError::InvalidColor(300))
        );
    }

    #[test]
    fn validate_pos_checks_bounds() {
        let grid = TokenGrid::from_rows(&[vec![1, 2]]).unwrap();

        assert_eq!(grid.validate_pos(GridPos::new(0, 1)), Ok(GridPos::new(0, 1)));
        assert_eq!(
            grid.validate_pos(GridPos::new(1, 0)),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn prebuilt_grid_counts_present_bobbins() {
        let mut tokens = Array2::from_elem((2, 2), Some(3));
        tokens[[1, 0]] = None;

        let grid = TokenGrid::new(tokens);

        assert_eq!(grid.token_count(), 3);
        assert!(grid.contains(GridPos::new(1, 1)));
    }

    #[test]
    fn iter_walks_row_major() {
        let grid = TokenGrid::from_rows(&[vec![1, -1], vec![2, 3]]).unwrap();

        let positions: Vec<_> = grid.iter().map(|(pos, _)| pos).collect();

        assert_eq!(
            positions,
            vec![
                GridPos::new(0, 0),
                GridPos::new(0, 1),
                GridPos::new(1, 0),
                GridPos::new(1, 1),
            ]
        );
    }
}
