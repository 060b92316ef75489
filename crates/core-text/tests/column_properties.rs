use core_text::{ColumnMapper, Line};
use proptest::prelude::*;

fn line_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![3 => b'a'..=b'z', 1 => Just(b'\t')], 0..40)
}

proptest! {
    #[test]
    fn plain_lines_map_bytes_to_equal_columns(
        content in prop::collection::vec(b' '..=b'~', 0..60),
        tab in 1usize..9,
    ) {
        let m = ColumnMapper::new(tab);
        let mut bytes = content.clone();
        bytes.push(b'\n');
        let line = Line::new(bytes);
        for i in 0..=content.len() {
            prop_assert_eq!(m.column_for_byte(&line, i), i);
        }
    }

    #[test]
    fn round_trip_never_overshoots(content in line_bytes(), tab in 1usize..9, col in 0usize..120) {
        let m = ColumnMapper::new(tab);
        let line = Line::new(content);
        let back = m.column_for_byte(&line, m.byte_for_column(&line, col));
        prop_assert!(back <= col);
        if col >= m.width(&line) {
            prop_assert_eq!(back, m.width(&line));
        }
    }

    #[test]
    fn round_trip_exact_on_cell_boundaries(content in line_bytes(), tab in 1usize..9) {
        let m = ColumnMapper::new(tab);
        let line = Line::new(content.clone());
        for byte in 0..=content.len() {
            let col = m.column_for_byte(&line, byte);
            prop_assert_eq!(m.byte_for_column(&line, col), byte);
            prop_assert_eq!(m.column_for_byte(&line, m.byte_for_column(&line, col)), col);
        }
    }

    #[test]
    fn inside_tab_span_rounds_down_to_tab_start(prefix in 0usize..10, tab in 2usize..9) {
        let m = ColumnMapper::new(tab);
        let mut bytes = vec![b'x'; prefix];
        bytes.push(b'\t');
        let line = Line::new(bytes);
        let start = prefix;
        let end = m.next_tab_stop(prefix);
        for col in start..end {
            prop_assert_eq!(m.byte_for_column(&line, col), prefix);
            prop_assert_eq!(m.snap(&line, col), start);
        }
    }

    #[test]
    fn boundaries_are_inverse_steps(content in line_bytes(), tab in 1usize..9) {
        let m = ColumnMapper::new(tab);
        let line = Line::new(content);
        let mut col = 0;
        let mut steps = 0;
        while let Some(next) = m.next_boundary(&line, col) {
            prop_assert!(next > col);
            prop_assert_eq!(m.prev_boundary(&line, next), Some(col));
            col = next;
            steps += 1;
        }
        prop_assert_eq!(col, m.width(&line));
        prop_assert_eq!(steps, line.content_len());
    }
}
