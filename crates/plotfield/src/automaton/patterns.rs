//! Classic pattern matrices for seeding an [`crate::automaton::Automaton`].
//!
//! Matrices are row-major 0/1 grids for [`crate::automaton::Automaton::load_pattern`].

/// 2x2 still life.
pub fn block() -> Vec<Vec<u8>> {
    vec![vec![1, 1], vec![1, 1]]
}

/// 6-cell still life.
pub fn beehive() -> Vec<Vec<u8>> {
    vec![vec![0, 1, 1, 0], vec![1, 0, 0, 1], vec![0, 1, 1, 0]]
}

/// Period-2 oscillator, horizontal phase.
pub fn blinker() -> Vec<Vec<u8>> {
    vec![vec![1, 1, 1]]
}

/// Diagonal spaceship; translates by (1, 1) every 4 generations.
pub fn glider() -> Vec<Vec<u8>> {
    vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]
}

/// Methuselah; stabilizes after over a thousand generations.
pub fn r_pentomino() -> Vec<Vec<u8>> {
    vec![vec![0, 1, 1], vec![1, 1, 0], vec![0, 1, 0]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_have_expected_cell_counts() {
        let count = |p: Vec<Vec<u8>>| -> usize {
            p.iter()
                .flat_map(|row| row.iter())
                .filter(|&&c| c != 0)
                .count()
        };
        assert_eq!(count(block()), 4);
        assert_eq!(count(beehive()), 6);
        assert_eq!(count(blinker()), 3);
        assert_eq!(count(glider()), 5);
        assert_eq!(count(r_pentomino()), 5);
    }
}
