//! Built-in language definitions.
//!
//! Each pattern is applied to a single line. Modifiers use non-capturing
//! groups so the first non-empty capture is always the declared name.
//! Some patterns open with a capture-free alternative that swallows lines
//! led by a keyword (`return`, `else`, `class`, ...); such a match carries
//! no name and yields no entity, since the regex engine has no lookahead.
//! Declaration order matters: extension lookup walks this list top to bottom.

use crate::extract::EntityKind::{self, *};

pub(crate) struct BuiltinLanguage {
    pub id: &'static str,
    pub extensions: &'static [&'static str],
    pub patterns: &'static [(EntityKind, &'static str)],
}

pub(crate) static BUILTIN_LANGUAGES: &[BuiltinLanguage] = &[
    BuiltinLanguage {
        id: "python",
        extensions: &["py", "pyw", "pyi"],
        patterns: &[
            (Def, r"^\s*(?:async\s+)?def\s+(\w+)"),
            (Class, r"^\s*class\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "javascript",
        extensions: &["js", "jsx", "mjs", "cjs"],
        patterns: &[
            (
                Function,
                r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(\w+)\s*\(",
            ),
            (
                Function,
                r"^\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|\w+\s*=>)",
            ),
            (Class, r"^\s*(?:export\s+)?(?:default\s+)?class\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "typescript",
        extensions: &["ts", "tsx", "mts", "cts"],
        patterns: &[
            (
                Function,
                r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\s*\*?\s*(\w+)\s*[<(]",
            ),
            (
                Function,
                r"^\s*(?:export\s+)?(?:const|let|var)\s+(\w+)\s*(?::[^=]+)?=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*(?::[^=]+)?=>|\w+\s*=>)",
            ),
            (
                Class,
                r"^\s*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+(\w+)",
            ),
            (Interface, r"^\s*(?:export\s+)?(?:declare\s+)?interface\s+(\w+)"),
            (Type, r"^\s*(?:export\s+)?(?:declare\s+)?type\s+(\w+)\s*(?:<[^>]*>)?\s*="),
            (Enum, r"^\s*(?:export\s+)?(?:declare\s+)?(?:const\s+)?enum\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "java",
        extensions: &["java"],
        patterns: &[
            (
                Method,
                r"^\s*(?:(?:public|protected|private|static|final|abstract|synchronized|native|default)\s+)+[\w<>\[\],.?]+(?:\s*<[^>]*>)?\s+(\w+)\s*\(",
            ),
            (
                Class,
                r"^\s*(?:(?:public|protected|private|abstract|final|static|sealed)\s+)*class\s+(\w+)",
            ),
            (
                Interface,
                r"^\s*(?:(?:public|protected|private|abstract|static|sealed)\s+)*@?interface\s+(\w+)",
            ),
            (Enum, r"^\s*(?:(?:public|protected|private|static)\s+)*enum\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "go",
        extensions: &["go"],
        patterns: &[
            (Func, r"^\s*func\s+(?:\([^)]*\)\s*)?(\w+)\s*(?:\[[^\]]*\]\s*)?\("),
            (Type, r"^\s*type\s+(\w+)\s+"),
        ],
    },
    BuiltinLanguage {
        id: "rust",
        extensions: &["rs"],
        patterns: &[
            (
                Function,
                r#"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:(?:const|async|unsafe)\s+)*(?:extern\s+"[^"]*"\s+)?fn\s+(\w+)"#,
            ),
            (Struct, r"^\s*(?:pub(?:\([^)]*\))?\s+)?struct\s+(\w+)"),
            (Trait, r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?trait\s+(\w+)"),
            (Enum, r"^\s*(?:pub(?:\([^)]*\))?\s+)?enum\s+(\w+)"),
            (Type, r"^\s*(?:pub(?:\([^)]*\))?\s+)?type\s+(\w+)"),
            (Module, r"^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "c",
        extensions: &["c", "h"],
        patterns: &[
            (
                Function,
                r"^(?:(?:return|else|if|while|for|switch|do|case|goto|sizeof|typedef)\b.*|(?:(?:static|inline|extern|const|unsigned|signed|struct)\s+)*\w+[\s*]+(\w+)\s*\([^;]*$)",
            ),
            (Struct, r"^\s*(?:typedef\s+)?struct\s+(\w+)"),
            (Enum, r"^\s*(?:typedef\s+)?enum\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "cpp",
        extensions: &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        patterns: &[
            (
                Function,
                r"^(?:(?:return|else|if|while|for|switch|do|case|goto|sizeof|typedef|throw|new|delete|using|co_return|co_await|co_yield)\b.*|(?:(?:static|inline|virtual|extern|constexpr|const|unsigned|signed)\s+)*[\w:<>]+[\s*&]+(?:\w+::)*~?(\w+)\s*\([^;]*$)",
            ),
            (Class, r"^\s*(?:template\s*<[^>]*>\s*)?class\s+(\w+)"),
            (Struct, r"^\s*(?:template\s*<[^>]*>\s*)?(?:typedef\s+)?struct\s+(\w+)"),
            (Enum, r"^\s*enum\s+(?:class\s+)?(\w+)"),
            (Module, r"^\s*namespace\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "csharp",
        extensions: &["cs"],
        patterns: &[
            (
                Method,
                r"^\s*(?:(?:public|private|protected|internal|static|virtual|override|async|abstract|sealed|extern|readonly|new|unsafe|partial)\s+)+(?:(?:class|interface|struct|record|enum|delegate|event)\b.*|[\w<>\[\],.?]+\s+(\w+)\s*(?:<[^>]*>)?\s*\()",
            ),
            (
                Class,
                r"^\s*(?:(?:public|private|protected|internal|static|abstract|sealed|partial)\s+)*class\s+(\w+)",
            ),
            (
                Interface,
                r"^\s*(?:(?:public|private|protected|internal|partial)\s+)*interface\s+(\w+)",
            ),
            (
                Struct,
                r"^\s*(?:(?:public|private|protected|internal|readonly|partial)\s+)*struct\s+(\w+)",
            ),
            (Enum, r"^\s*(?:(?:public|private|protected|internal)\s+)*enum\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "ruby",
        extensions: &["rb", "rake"],
        patterns: &[
            (Def, r"^\s*def\s+(?:self\.)?(\w+)"),
            (Class, r"^\s*class\s+(\w+)"),
            (Module, r"^\s*module\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "php",
        extensions: &["php"],
        patterns: &[
            (
                Function,
                r"^\s*(?:(?:public|private|protected|static|abstract|final)\s+)*function\s+&?\s*(\w+)",
            ),
            (Class, r"^\s*(?:(?:abstract|final|readonly)\s+)*class\s+(\w+)"),
            (Interface, r"^\s*interface\s+(\w+)"),
            (Trait, r"^\s*trait\s+(\w+)"),
        ],
    },
    BuiltinLanguage {
        id: "kotlin",
        extensions: &["kt", "kts"],
        patterns: &[
            (
                Function,
                r"^\s*(?:(?:public|private|protected|internal|inline|suspend|override|open|abstract|operator|infix|tailrec)\s+)*fun\s+(?:<[^>]*>\s*)?(?:[\w.]+\.)?(\w+)\s*\(",
            ),
            (
                Class,
                r"^\s*(?:(?:public|private|protected|internal|open|abstract|sealed|data|inner|enum|annotation|value)\s+)*class\s+(\w+)",
            ),
            (
                Interface,
                r"^\s*(?:(?:public|private|protected|internal|sealed|fun)\s+)*interface\s+(\w+)",
            ),
            (
                Module,
                r"^\s*(?:(?:public|private|protected|internal|data)\s+)*object\s+(\w+)",
            ),
        ],
    },
    BuiltinLanguage {
        id: "swift",
        extensions: &["swift"],
        patterns: &[
            (
                Func,
                r"^\s*(?:@\w+\s+)*(?:(?:public|private|fileprivate|internal|open|static|class|final|override|mutating)\s+)*func\s+(\w+)",
            ),
            (
                Class,
                r"^\s*(?:(?:public|private|fileprivate|internal|open|final)\s+)*class\s+(\w+)\s*(?:[:<{]|$)",
            ),
            (
                Struct,
                r"^\s*(?:(?:public|private|fileprivate|internal)\s+)*struct\s+(\w+)",
            ),
            (
                Interface,
                r"^\s*(?:(?:public|private|fileprivate|internal)\s+)*protocol\s+(\w+)",
            ),
            (
                Enum,
                r"^\s*(?:(?:public|private|fileprivate|internal|indirect)\s+)*enum\s+(\w+)",
            ),
        ],
    },
    BuiltinLanguage {
        id: "scala",
        extensions: &["scala", "sc"],
        patterns: &[
            (
                Def,
                r"^\s*(?:(?:override|private|protected|final|implicit|inline)\s+)*def\s+(\w+)",
            ),
            (
                Class,
                r"^\s*(?:(?:abstract|final|sealed|case|private|protected|implicit)\s+)*class\s+(\w+)",
            ),
            (Trait, r"^\s*(?:(?:sealed|private|protected)\s+)*trait\s+(\w+)"),
            (Module, r"^\s*(?:(?:case|private|protected)\s+)*object\s+(\w+)"),
        ],
    },
];
