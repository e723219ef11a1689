use rand::Rng;

/// Letters used to fill the board
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Pick a letter uniformly at random
pub fn random_letter(rng: &mut impl Rng) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// A1Z26 position of the letter, reduced mod 10 (A=1 .. I=9, J=0, K=1, ..)
pub fn letter_to_digit(letter: char) -> Option<char> {
    let upper = letter.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    let code = (upper as u8 - b'A' + 1) % 10;
    char::from_digit(code as u32, 10)
}

/// Whether the word is usable on the board
pub fn is_board_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}
