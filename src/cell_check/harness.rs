//! Function-body harness for cell snippets.
//!
//! Notebook cells are usually statements (`let`, `return`, `?`, bare
//! expressions) that only parse inside a function. Wrapping them in a fixed
//! synthetic function lets a file-level checker accept them.

/// Line added before the snippet.
pub const HARNESS_PREFIX: &str = "fn __check__() {\n";

/// Line added after the snippet.
pub const HARNESS_SUFFIX: &str = "\n}";

/// Number of lines [`wrap`] inserts before the snippet's first line.
pub const HARNESS_PREFIX_LINES: usize = 1;

/// Wrap `snippet` in the harness. The snippet text is kept verbatim.
pub fn wrap(snippet: &str) -> String {
    let mut wrapped = String::with_capacity(HARNESS_PREFIX.len() + snippet.len() + HARNESS_SUFFIX.len());
    wrapped.push_str(HARNESS_PREFIX);
    wrapped.push_str(snippet);
    wrapped.push_str(HARNESS_SUFFIX);
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_single_statement() {
        assert_eq!(wrap("let x = 1;"), "fn __check__() {\nlet x = 1;\n}");
    }

    #[test]
    fn test_prefix_line_count_matches_constant() {
        assert_eq!(HARNESS_PREFIX.matches('\n').count(), HARNESS_PREFIX_LINES);
    }

    #[test]
    fn test_wrap_keeps_trailing_newline_and_indentation() {
        let snippet = "    if x {\n\treturn;\n    }\n";
        assert_eq!(wrap(snippet), format!("fn __check__() {{\n{snippet}\n}}"));
    }

    proptest! {
        #[test]
        fn prop_snippet_is_embedded_verbatim(snippet in "\\PC*") {
            let wrapped = wrap(&snippet);
            prop_assert!(wrapped.starts_with(HARNESS_PREFIX));
            prop_assert!(wrapped.ends_with(HARNESS_SUFFIX));
            prop_assert_eq!(&wrapped[HARNESS_PREFIX.len()..wrapped.len() - HARNESS_SUFFIX.len()], snippet.as_str());
        }

        #[test]
        fn prop_snippet_lines_shift_by_prefix(lines in proptest::collection::vec("[a-z ;=0-9]{0,20}", 1..10)) {
            let snippet = lines.join("\n");
            let wrapped = wrap(&snippet);
            let wrapped_lines: Vec<&str> = wrapped.split('\n').collect();
            for (i, line) in lines.iter().enumerate() {
                prop_assert_eq!(wrapped_lines[i + HARNESS_PREFIX_LINES], line.as_str());
            }
        }
    }
}
