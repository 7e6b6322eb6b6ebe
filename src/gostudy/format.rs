//! # Reindentation
//!
//! A line-based reindenter driven only by brace depth. It does not parse Go: braces
//! inside strings or comments count like any other, and a line such as `} else {`
//! is treated as a closer (dedent before) that is also an opener (indent after).
//!
//! Rules, per line:
//! 1. Surrounding whitespace is trimmed.
//! 2. Empty lines stay empty and never carry indentation.
//! 3. A line starting with `}` lowers the level (floored at 0) before it is emitted.
//! 4. The line is emitted with `level` copies of the indent unit.
//! 5. A line ending with `{` raises the level after it is emitted.

pub const DEFAULT_INDENT: &str = "    ";

/// Reindents `text` with the default four-space unit.
pub fn format(text: &str) -> String {
    format_with_unit(text, DEFAULT_INDENT)
}

pub fn format_with_unit(text: &str, unit: &str) -> String {
    let mut level: usize = 0;
    let mut formatted = Vec::new();

    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            formatted.push(String::new());
            continue;
        }
        if trimmed.starts_with('}') {
            level = level.saturating_sub(1);
        }
        formatted.push(format!("{}{}", unit.repeat(level), trimmed));
        if trimmed.ends_with('{') {
            level += 1;
        }
    }

    formatted.join("\n")
}

/// Builds an indent unit of `width` spaces.
pub fn indent_unit(width: usize) -> String {
    " ".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        assert_eq!(format(""), "");
    }

    #[test]
    fn opener_then_closer() {
        let input = ["  a{", "b", "}"].join("\n");
        assert_eq!(format(&input), ["a{", "    b", "}"].join("\n"));
    }

    #[test]
    fn blank_lines_are_never_indented() {
        let input = "func main() {\n   \n\tx := 1\n}";
        assert_eq!(format(input), "func main() {\n\n    x := 1\n}");
    }

    #[test]
    fn stray_closers_floor_at_zero() {
        let input = "}\n}\nx";
        assert_eq!(format(input), "}\n}\nx");
    }

    #[test]
    fn else_line_dedents_then_indents() {
        let input = "if ok {\na()\n} else {\nb()\n}";
        assert_eq!(format(input), "if ok {\n    a()\n} else {\n    b()\n}");
    }

    #[test]
    fn nested_blocks() {
        let input = "func f() {\nfor {\nselect {\n}\n}\n}";
        let expected = "func f() {\n    for {\n        select {\n        }\n    }\n}";
        assert_eq!(format(input), expected);
    }

    #[test]
    fn trailing_newline_is_kept() {
        assert_eq!(format("x\n"), "x\n");
    }

    #[test]
    fn braces_inside_strings_are_not_understood() {
        // Heuristic only: a string ending in `{` opens a level.
        let input = "s := \"{\nt := 1";
        assert_eq!(format(input), "s := \"{\n    t := 1");
    }

    #[test]
    fn idempotent_on_samples() {
        let samples = [
            "",
            "   ",
            "a{\nb\n}",
            "}\n{\n{\nx\n}",
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n  fmt.Println(\"hi\")\n      }\n",
            "\t\tdeep{\n\t\t\tdeeper{\n}}\n}",
        ];
        for s in samples {
            let once = format(s);
            assert_eq!(format(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn builtin_snippets_are_stable_under_format() {
        let catalogue = crate::catalogue::Catalogue::builtin().unwrap();
        for entry in catalogue.entries() {
            let once = format(&entry.topic.content.code);
            assert_eq!(format(&once), once, "{}", entry.topic_ref());
        }
    }

    #[test]
    fn custom_unit() {
        assert_eq!(format_with_unit("a{\nb\n}", &indent_unit(2)), "a{\n  b\n}");
        assert_eq!(format_with_unit("a{\nb\n}", "\t"), "a{\n\tb\n}");
    }
}
