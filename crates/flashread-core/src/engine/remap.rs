//! Position-preserving index conversion between reading modes.
//!
//! Every mode is a view over the same word sequence, so an index in one mode
//! converts to the word it starts on, and that word converts to the unit that
//! contains it in the other mode. A finished session stays finished.

use crate::tokenizer::{ReadingMode, unit_count};

/// First word covered by unit `index`, or `word_count` past the end.
pub fn unit_to_word(
    mode: ReadingMode,
    index: usize,
    chunk_size: usize,
    word_count: usize,
) -> usize {
    index
        .saturating_mul(mode.words_per_unit(chunk_size))
        .min(word_count)
}

/// Unit containing `word`, or the unit count when `word` is past the end.
pub fn word_to_unit(
    mode: ReadingMode,
    word: usize,
    chunk_size: usize,
    word_count: usize,
) -> usize {
    if word >= word_count {
        return unit_count(mode, word_count, chunk_size);
    }
    word / mode.words_per_unit(chunk_size)
}

/// Converts `old_index` in `old_mode` to the index in `new_mode` that shows the same word.
pub fn remap_index(
    old_mode: ReadingMode,
    old_index: usize,
    new_mode: ReadingMode,
    word_count: usize,
    chunk_size: usize,
) -> usize {
    remap_between(
        old_mode, chunk_size, old_index, new_mode, chunk_size, word_count,
    )
}

/// Like [`remap_index`], but the chunk size may change as well.
pub fn remap_between(
    from_mode: ReadingMode,
    from_chunk_size: usize,
    index: usize,
    to_mode: ReadingMode,
    to_chunk_size: usize,
    word_count: usize,
) -> usize {
    let word = unit_to_word(from_mode, index, from_chunk_size, word_count);
    word_to_unit(to_mode, word, to_chunk_size, word_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsvp_word_ten_lands_in_fourth_chunk() {
        assert_eq!(
            remap_index(ReadingMode::Rsvp, 9, ReadingMode::Chunk, 30, 3),
            3
        );
    }

    #[test]
    fn chunk_maps_back_to_its_first_word() {
        assert_eq!(
            remap_index(ReadingMode::Chunk, 3, ReadingMode::Rsvp, 30, 3),
            9
        );
        assert_eq!(
            remap_index(ReadingMode::Chunk, 10, ReadingMode::Bionic, 31, 3),
            30
        );
    }

    #[test]
    fn word_modes_map_one_to_one() {
        for index in [0, 1, 17, 29] {
            assert_eq!(
                remap_index(ReadingMode::Rsvp, index, ReadingMode::Guided, 30, 3),
                index
            );
            assert_eq!(
                remap_index(ReadingMode::Bionic, index, ReadingMode::DualColumn, 30, 4),
                index
            );
        }
    }

    #[test]
    fn chunk_size_change_keeps_word() {
        // chunk 3 of size 3 starts at word 9, which sits in chunk 4 of size 2.
        assert_eq!(
            remap_between(ReadingMode::Chunk, 3, 3, ReadingMode::Chunk, 2, 30),
            4
        );
        assert_eq!(
            remap_between(ReadingMode::Chunk, 2, 4, ReadingMode::Chunk, 5, 30),
            1
        );
    }

    #[test]
    fn finished_position_stays_finished() {
        assert_eq!(
            remap_index(ReadingMode::Rsvp, 31, ReadingMode::Chunk, 31, 3),
            11
        );
        assert_eq!(
            remap_index(ReadingMode::Chunk, 11, ReadingMode::Rsvp, 31, 3),
            31
        );
    }

    #[test]
    fn empty_text_maps_to_zero() {
        assert_eq!(remap_index(ReadingMode::Rsvp, 0, ReadingMode::Chunk, 0, 3), 0);
        assert_eq!(remap_index(ReadingMode::Chunk, 5, ReadingMode::Rsvp, 0, 3), 0);
    }

    #[test]
    fn round_trip_lands_on_unit_start() {
        let word_count = 23;
        for word in 0..word_count {
            let chunk = remap_index(ReadingMode::Rsvp, word, ReadingMode::Chunk, word_count, 4);
            let back = remap_index(ReadingMode::Chunk, chunk, ReadingMode::Rsvp, word_count, 4);
            assert_eq!(back, word - word % 4);
        }
    }
}
