//! Cosmetic, best-effort code formatting.
//!
//! These are indentation heuristics, not parsers. Malformed input is
//! re-indented as well as the heuristic allows and never rejected.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language::Language;

const PYTHON_DEDENT_PREFIXES: &[&str] = &["else:", "elif ", "except", "finally:"];
const PYTHON_BLOCK_EXITS: &[&str] = &["return", "break", "continue"];

const SQL_KEYWORDS: &[&str] = &[
    "group by", "order by", "select", "from", "where", "join", "on", "having", "insert", "into",
    "values", "update", "set", "delete", "create", "table", "alter", "drop", "and", "or", "as",
    "by", "asc", "desc", "limit", "offset", "inner", "left", "right", "outer", "union",
    "distinct", "count", "sum", "avg", "min", "max",
];

const HTML_VOID_TAGS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

static SQL_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = SQL_KEYWORDS
        .iter()
        .map(|kw| kw.replace(' ', r"\s"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("static SQL keyword pattern")
});

static HTML_OPEN_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<([a-zA-Z][a-zA-Z0-9]*)").expect("static HTML tag pattern"));

/// Format `code` for `language`.
pub fn format_code(language: Language, code: &str) -> String {
    match language {
        Language::Python => format_python(code),
        Language::Javascript | Language::Typescript => format_braces(code, "  ", true),
        Language::C | Language::Cpp | Language::Java | Language::Csharp => {
            format_braces(code, "    ", false)
        }
        Language::Sql => format_sql(code),
        Language::Html => format_html(code),
        _ => code
            .split('\n')
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn format_python(code: &str) -> String {
    let lines: Vec<&str> = code.split('\n').collect();
    let mut indent: usize = 0;
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }

        if PYTHON_DEDENT_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            indent = indent.saturating_sub(1);
        }

        out.push(format!("{}{}", "    ".repeat(indent), trimmed));

        if trimmed.ends_with(':') {
            indent += 1;
        }

        let exits_block =
            trimmed == "pass" || PYTHON_BLOCK_EXITS.iter().any(|kw| trimmed.starts_with(kw));
        if exits_block {
            // Follow the author's own indentation of the next statement.
            if let Some(next) = lines[i + 1..].iter().find(|l| !l.trim().is_empty()) {
                let mut level = leading_whitespace(next) / 4;
                if PYTHON_DEDENT_PREFIXES.iter().any(|p| next.trim().starts_with(p)) {
                    level += 1;
                }
                if level < indent {
                    indent = level;
                }
            }
        }
    }

    out.join("\n")
}

fn format_braces(code: &str, unit: &str, count_all_braces: bool) -> String {
    let mut indent: usize = 0;
    let mut out = Vec::new();

    for line in code.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }

        let leading_close = trimmed.starts_with('}') || (count_all_braces && trimmed.starts_with(']'));
        if leading_close {
            indent = indent.saturating_sub(1);
        }

        out.push(format!("{}{}", unit.repeat(indent), trimmed));

        if count_all_braces {
            let opens = trimmed.matches('{').count() as isize;
            let mut closes = trimmed.matches('}').count() as isize;
            if trimmed.starts_with('}') {
                // already applied above
                closes -= 1;
            }
            indent = (indent as isize + opens - closes).max(0) as usize;
        } else if trimmed.ends_with('{') {
            indent += 1;
        }
    }

    out.join("\n")
}

fn format_sql(code: &str) -> String {
    SQL_KEYWORD_RE
        .replace_all(code, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

fn format_html(code: &str) -> String {
    let mut indent: usize = 0;
    let mut out = Vec::new();

    for line in code.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }

        if trimmed.starts_with("</") {
            indent = indent.saturating_sub(1);
        }

        out.push(format!("{}{}", "  ".repeat(indent), trimmed));

        if let Some(caps) = HTML_OPEN_TAG_RE.captures(trimmed) {
            let tag = caps[1].to_ascii_lowercase();
            let closes_inline = trimmed.contains("</");
            let self_closing = trimmed.ends_with("/>") || HTML_VOID_TAGS.contains(&tag.as_str());
            if !closes_inline && !self_closing {
                indent += 1;
            }
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_indents_blocks() {
        let code = "def f(x):\n    if x:\n            return 1\n    else:\n  return 2\n\nprint(f(1))";
        let formatted = format_code(Language::Python, code);
        assert_eq!(
            formatted,
            "def f(x):\n    if x:\n        return 1\n    else:\n        return 2\n\nprint(f(1))"
        );
    }

    #[test]
    fn test_python_preserves_blank_lines() {
        let formatted = format_code(Language::Python, "x = 1\n\n\ny = 2");
        assert_eq!(formatted, "x = 1\n\n\ny = 2");
    }

    #[test]
    fn test_javascript_brace_counting() {
        let code = "function f() {\nif (a) {\nreturn 1;\n} else {\nreturn 2;\n}\n}";
        let formatted = format_code(Language::Javascript, code);
        assert_eq!(
            formatted,
            "function f() {\n  if (a) {\n    return 1;\n  } else {\n    return 2;\n  }\n}"
        );
    }

    #[test]
    fn test_c_style_four_spaces() {
        let code = "int main() {\nprintf(\"hi\");\nreturn 0;\n}";
        let formatted = format_code(Language::C, code);
        assert_eq!(formatted, "int main() {\n    printf(\"hi\");\n    return 0;\n}");
    }

    #[test]
    fn test_unbalanced_braces_never_underflow() {
        let formatted = format_code(Language::Java, "}\n}\nx;");
        assert_eq!(formatted, "}\n}\nx;");
    }

    #[test]
    fn test_sql_uppercases_keywords() {
        let formatted = format_code(
            Language::Sql,
            "select name from users where id = 1 order by name desc",
        );
        assert_eq!(
            formatted,
            "SELECT name FROM users WHERE id = 1 ORDER BY name DESC"
        );
    }

    #[test]
    fn test_sql_leaves_partial_words_alone() {
        let formatted = format_code(Language::Sql, "select fromage from cheese");
        assert_eq!(formatted, "SELECT fromage FROM cheese");
    }

    #[test]
    fn test_html_nesting() {
        let code = "<html>\n<body>\n<h1>Hi</h1>\n<br>\n<img src=\"a.png\" />\n</body>\n</html>";
        let formatted = format_code(Language::Html, code);
        assert_eq!(
            formatted,
            "<html>\n  <body>\n    <h1>Hi</h1>\n    <br>\n    <img src=\"a.png\" />\n  </body>\n</html>"
        );
    }

    #[test]
    fn test_generic_trims_trailing_whitespace() {
        let formatted = format_code(Language::Ruby, "puts 1   \n  puts 2\t");
        assert_eq!(formatted, "puts 1\n  puts 2");
    }
}
