//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::Board;

/// Counts the leaf nodes `depth` plies below the current position.
///
/// Every move is played and taken back, so the board is unchanged on return.
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.gen_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for &m in &moves {
        board.move_piece(m);
        nodes += perft(board, depth - 1);
        board.undo_move(m);
    }
    nodes
}

/// Perft with divide - node count below each root move, sorted by UCI text.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = board.gen_legal_moves();
    let mut results = Vec::with_capacity(moves.len());
    for &m in &moves {
        board.move_piece(m);
        let nodes = perft(board, depth - 1);
        board.undo_move(m);
        results.push((m.to_uci(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_zero_is_one() {
        assert_eq!(perft(&mut Board::new(), 0), 1);
        assert!(perft_divide(&mut Board::new(), 0).is_empty());
    }

    #[test]
    fn perft_startpos_shallow() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8902);
    }

    #[test]
    fn perft_divide_sums_to_perft() {
        let mut board = Board::new();
        let results = perft_divide(&mut board, 2);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, n)| *n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert!(results.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let mut board = Board::new();
        let hash = board.hash();
        perft(&mut board, 3);
        assert_eq!(board.hash(), hash);
        assert_eq!(board.to_fen(), chess_types::Fen::STARTPOS);
    }
}
