//! Shared plain-text rendering for tabular formats (CSV, XLSX).

/// Render rows as column-aligned plain text.
///
/// Column widths follow the widest cell in each column; cells are padded
/// with spaces and separated by two spaces. Ragged rows are allowed.
pub(crate) fn render_columns(rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; num_cols];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut output = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            line.push_str(cell);
            // Pad all but the last cell to the column width.
            if i + 1 < row.len() {
                let pad = widths[i].saturating_sub(cell.chars().count());
                line.extend(std::iter::repeat(' ').take(pad));
            }
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test]
    fn test_columns_align_to_widest_cell() {
        let text = render_columns(&rows(&[&["name", "qty"], &["widget", "2"]]));
        assert_eq!(text, "name    qty\nwidget  2\n");
    }

    #[test]
    fn test_empty_rows_render_empty() {
        assert_eq!(render_columns(&[]), "");
    }

    #[test]
    fn test_ragged_rows_are_allowed() {
        let text = render_columns(&rows(&[&["a", "b", "c"], &["d"]]));
        assert_eq!(text, "a  b  c\nd\n");
    }
}
