use serde::Serialize;
use thiserror::Error;

/// Why a placement request was turned into a no-op.
///
/// None of these are failures: an interactive caller routinely probes invalid
/// targets while looking for a valid one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceError {
    #[error("game is not in progress")]
    NotPlaying,
    #[error("no offered piece at that index")]
    PieceIndexOutOfRange,
    #[error("piece has already been placed this round")]
    PieceAlreadyUsed,
    #[error("piece would extend past the board edge")]
    OutOfBounds,
    #[error("target cell is already filled")]
    Occupied,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlaying => "not_playing",
            PlaceError::PieceIndexOutOfRange | PlaceError::PieceAlreadyUsed => "invalid_piece",
            PlaceError::OutOfBounds | PlaceError::Occupied => "invalid_place",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_group_by_cause() {
        assert_eq!(PlaceError::NotPlaying.code(), "not_playing");
        assert_eq!(PlaceError::PieceAlreadyUsed.code(), "invalid_piece");
        assert_eq!(PlaceError::Occupied.code(), "invalid_place");
        assert_eq!(PlaceError::OutOfBounds.code(), "invalid_place");
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            PlaceError::Occupied.to_string(),
            "target cell is already filled"
        );
    }
}
