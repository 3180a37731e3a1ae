use crate::jvm::class_file::LineNumberTable;

#[derive(Debug, PartialEq, Eq)]
pub enum LineMapError {
    /// The offset comes before the first entry (or the table is empty)
    NoEnclosingLine { offset: u16 },

    /// The first entry for `line` is the last entry of the table
    Exhausted { line: u16 },
}

/// Line at which code inserted right after the instruction at `offset` should go
///
/// This is the line of the table entry following the first entry for the instruction's own line.
/// Positions in the table are used rather than line numbers, since line numbers repeat and need not
/// increase.
pub fn insertion_line_after(table: &LineNumberTable, offset: u16) -> Result<u16, LineMapError> {
    let line = table
        .line_at(offset)
        .ok_or(LineMapError::NoEnclosingLine { offset })?;
    let entries = table.entries();
    let position = entries
        .iter()
        .position(|entry| entry.line_number == line)
        .ok_or(LineMapError::NoEnclosingLine { offset })?;
    let next = entries
        .get(position + 1)
        .ok_or(LineMapError::Exhausted { line })?;
    log::trace!(
        "offset {} is on line {} (entry {}), next entry is line {}",
        offset,
        line,
        position,
        next.line_number
    );
    Ok(next.line_number)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::class_file::LineNumber;

    fn table(entries: &[(u16, u16)]) -> LineNumberTable {
        LineNumberTable(
            entries
                .iter()
                .map(|&(start_pc, line_number)| LineNumber {
                    start_pc,
                    line_number,
                })
                .collect(),
        )
    }

    #[test]
    fn next_entry_line() {
        let lines = table(&[(0, 10), (5, 12), (9, 15), (14, 16)]);
        assert_eq!(insertion_line_after(&lines, 0), Ok(12));
        assert_eq!(insertion_line_after(&lines, 6), Ok(15));
        assert_eq!(insertion_line_after(&lines, 9), Ok(16));
    }

    #[test]
    fn repeated_lines_use_the_first_entry() {
        // A loop header shows up twice: the successor of its first entry is what counts
        let lines = table(&[(0, 20), (3, 21), (8, 22), (12, 21), (15, 24)]);
        assert_eq!(insertion_line_after(&lines, 13), Ok(22));
    }

    #[test]
    fn last_entry_is_exhausted() {
        let lines = table(&[(0, 10), (5, 12)]);
        assert_eq!(
            insertion_line_after(&lines, 7),
            Err(LineMapError::Exhausted { line: 12 })
        );
    }

    #[test]
    fn offsets_without_a_line() {
        assert_eq!(
            insertion_line_after(&table(&[(4, 10), (8, 11)]), 2),
            Err(LineMapError::NoEnclosingLine { offset: 2 })
        );
        assert_eq!(
            insertion_line_after(&table(&[]), 0),
            Err(LineMapError::NoEnclosingLine { offset: 0 })
        );
    }
}
