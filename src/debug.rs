#[cfg(feature = "debug")]
use std::io::Write;

#[cfg(feature = "debug")]
const MIN_WIDTH: usize = 5;

#[cfg(feature = "debug")]
const PADDING: usize = 1;

#[cfg(feature = "debug")]
const FLOAT_CONFIG: pretty_dtoa::FmtFloatConfig = pretty_dtoa::FmtFloatConfig::default()
    .add_point_zero(false)
    .max_significant_digits(6);

/// Renders the row lists of `m` as a right-aligned dense table, `-` marking
/// entries that are not stored.
#[cfg(feature = "debug")]
pub fn matrix_table<S: crate::Scalar>(m: &crate::SparseMatrix<S>) -> String {
    render(m).unwrap_or_else(|e| format!("<{}>\n", e))
}

#[cfg(feature = "debug")]
fn render<S: crate::Scalar>(m: &crate::SparseMatrix<S>) -> std::io::Result<String> {
    let mut tw = tabwriter::TabWriter::new(vec![])
        .minwidth(MIN_WIDTH)
        .padding(PADDING)
        .alignment(tabwriter::Alignment::Right);

    for r in 0..m.height() {
        let mut entries = m.row(r).peekable();
        for c in 0..m.width() {
            match entries.next_if(|&(j, _)| j == c) {
                None => tw.write_all(b"-")?,
                Some((_, x)) => tw.write_all(x.pretty_string(FLOAT_CONFIG).as_bytes())?,
            }
            tw.write_all(b"\t")?;
        }
        tw.write_all(b"\n")?;
    }

    tw.flush()?;
    let bytes = tw
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("{:?}", e)))?;
    String::from_utf8(bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(feature = "debug")]
macro_rules! debug {
    ($( $args:expr ),*) => { println!( $( $args ),* ); }
}

#[cfg(not(feature = "debug"))]
macro_rules! debug {
    ($( $args:expr ),*) => {};
}

pub(crate) use debug;

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;

    #[test]
    fn table_marks_missing_entries() {
        let m = crate::SparseMatrix::from_dense(&[vec![1.0, 0.0], vec![0.5, 2.0]]);
        let table = matrix_table(&m);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('-'));
        assert!(lines[1].contains("0.5"));
    }
}
