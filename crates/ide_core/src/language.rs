//! Language tags understood by the editor, the runner and the prompts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every language the editor offers.
///
/// The serialized form is the lowercase tag the UI sends (`"cpp"`,
/// `"csharp"`, ...). The same tag annotates fenced blocks in prompts.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    C,
    Cpp,
    Java,
    Csharp,
    Php,
    Ruby,
    Go,
    Rust,
    Kotlin,
    Swift,
    R,
    Html,
    Sql,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language: {0}")]
pub struct UnknownLanguage(pub String);

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

impl Language {
    pub const ALL: [Language; 16] = [
        Language::Python,
        Language::Javascript,
        Language::Typescript,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Csharp,
        Language::Php,
        Language::Ruby,
        Language::Go,
        Language::Rust,
        Language::Kotlin,
        Language::Swift,
        Language::R,
        Language::Html,
        Language::Sql,
    ];

    /// The tag used on the wire and in fenced blocks.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Csharp => "csharp",
            Language::Php => "php",
            Language::Ruby => "ruby",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Kotlin => "kotlin",
            Language::Swift => "swift",
            Language::R => "r",
            Language::Html => "html",
            Language::Sql => "sql",
        }
    }

    /// Judge0 CE language id. `None` for languages that are previewed
    /// locally instead of executed.
    pub fn judge0_id(&self) -> Option<u32> {
        match self {
            Language::Python => Some(71),
            Language::Javascript => Some(63),
            Language::Typescript => Some(74),
            Language::C => Some(50),
            Language::Cpp => Some(54),
            Language::Java => Some(62),
            Language::Csharp => Some(51),
            Language::Php => Some(68),
            Language::Ruby => Some(72),
            Language::Go => Some(60),
            Language::Rust => Some(73),
            Language::Kotlin => Some(78),
            Language::Swift => Some(83),
            Language::R => Some(80),
            Language::Sql => Some(82),
            Language::Html => None,
        }
    }

    /// Upper-case label used in notifications ("PYTHON code has been formatted").
    pub fn display_name(&self) -> String {
        self.tag().to_ascii_uppercase()
    }

    /// The "Hello, World!" program the editor starts with.
    pub fn default_snippet(&self) -> &'static str {
        match self {
            Language::Python => "# Python\nprint(\"Hello, World!\")",
            Language::Javascript => "// JavaScript\nconsole.log(\"Hello, World!\");",
            Language::Typescript => "// TypeScript\nconsole.log(\"Hello, World!\");",
            Language::C => {
                "#include <stdio.h>\n\nint main() {\n    printf(\"Hello, World!\\n\");\n    return 0;\n}"
            }
            Language::Cpp => {
                "#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"Hello, World!\" << endl;\n    return 0;\n}"
            }
            Language::Java => {
                "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello, World!\");\n    }\n}"
            }
            Language::Csharp => {
                "// C#\nusing System;\n\nclass Program {\n    static void Main() {\n        Console.WriteLine(\"Hello, World!\");\n    }\n}"
            }
            Language::Php => "<?php\n// PHP\necho \"Hello, World!\\n\";\n?>",
            Language::Ruby => "# Ruby\nputs \"Hello, World!\"",
            Language::Go => {
                "// Go\npackage main\n\nimport \"fmt\"\n\nfunc main() {\n    fmt.Println(\"Hello, World!\")\n}"
            }
            Language::Rust => "// Rust\nfn main() {\n    println!(\"Hello, World!\");\n}",
            Language::Kotlin => "// Kotlin\nfun main() {\n    println(\"Hello, World!\")\n}",
            Language::Swift => "// Swift\nprint(\"Hello, World!\")",
            Language::R => "# R\nprint(\"Hello, World!\")",
            Language::Html => {
                "<!DOCTYPE html>\n<html>\n<head>\n    <title>Hello World</title>\n</head>\n<body>\n    <h1>Hello, World!</h1>\n    <p>This is a simple HTML page.</p>\n</body>\n</html>"
            }
            Language::Sql => "-- SQL\nSELECT 'Hello, World!' AS message;",
        }
    }

    pub fn is_previewed_locally(&self) -> bool {
        self.judge0_id().is_none()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.tag() == wanted)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
