//! A small regex-driven lexer that classifies source text into tokens.
//!
//! This is deliberately shallow: comments, strings, numbers, keywords and
//! identifiers for a handful of common languages, plus a plain-text lexer for
//! everything else. Output always concatenates back to the input, because any
//! byte not claimed by a rule is emitted as [`TokenClass::Text`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Error, Result};
use crate::token::{coalesce, Token, TokenClass};

/// Turns source text into an ordered token stream.
pub trait Tokenizer {
    fn tokenize(&self, source: &str, language_hint: &str) -> Vec<Token>;
}

struct LanguageDef {
    name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
    keywords: &'static [&'static str],
    types: &'static [&'static str],
    constants: &'static [&'static str],
    builtins: &'static [&'static str],
    line_comment: Option<&'static str>,
    block_comment: Option<(&'static str, &'static str)>,
    /// Quote characters for single-line strings.
    quotes: &'static [char],
    triple_quotes: bool,
    backtick_strings: bool,
    char_literals: bool,
    preprocessor: bool,
    /// Substrings whose presence suggests the language when no hint matches.
    signatures: &'static [&'static str],
    /// Interpreter names recognised in a `#!` line.
    interpreters: &'static [&'static str],
}

const DEFS: &[LanguageDef] = &[
    LanguageDef {
        name: "rust",
        aliases: &["rs"],
        extensions: &["rs"],
        keywords: &[
            "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
            "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
            "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "type",
            "unsafe", "use", "where", "while",
        ],
        types: &[
            "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str",
            "u8", "u16", "u32", "u64", "u128", "usize", "Self", "String", "Vec", "Option",
            "Result", "Box",
        ],
        constants: &["true", "false", "self", "None", "Some", "Ok", "Err"],
        builtins: &["println", "print", "eprintln", "format", "vec", "panic", "assert", "assert_eq"],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        quotes: &['"'],
        triple_quotes: false,
        backtick_strings: false,
        char_literals: true,
        preprocessor: false,
        signatures: &["fn main(", "let mut ", "impl ", "pub fn ", "use std::"],
        interpreters: &[],
    },
    LanguageDef {
        name: "go",
        aliases: &["golang"],
        extensions: &["go"],
        keywords: &[
            "break", "case", "chan", "const", "continue", "default", "defer", "else",
            "fallthrough", "for", "func", "go", "goto", "if", "import", "interface", "map",
            "package", "range", "return", "select", "struct", "switch", "type", "var",
        ],
        types: &[
            "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int",
            "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8", "uint16",
            "uint32", "uint64", "uintptr", "any",
        ],
        constants: &["true", "false", "nil", "iota"],
        builtins: &[
            "append", "cap", "close", "copy", "delete", "len", "make", "new", "panic", "print",
            "println", "recover",
        ],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        quotes: &['"'],
        triple_quotes: false,
        backtick_strings: true,
        char_literals: true,
        preprocessor: false,
        signatures: &["package ", "func ", ":= ", "import (", "fmt."],
        interpreters: &[],
    },
    LanguageDef {
        name: "python",
        aliases: &["py", "python3"],
        extensions: &["py", "pyw"],
        keywords: &[
            "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
            "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
            "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
            "with", "yield",
        ],
        types: &["int", "float", "str", "bytes", "list", "dict", "set", "tuple", "bool", "object"],
        constants: &["True", "False", "None", "self"],
        builtins: &["print", "len", "range", "open", "isinstance", "enumerate", "zip", "super"],
        line_comment: Some("#"),
        block_comment: None,
        quotes: &['"', '\''],
        triple_quotes: true,
        backtick_strings: false,
        char_literals: false,
        preprocessor: false,
        signatures: &["def ", "import ", "elif ", "self.", "__init__"],
        interpreters: &["python", "python3"],
    },
    LanguageDef {
        name: "javascript",
        aliases: &["js", "typescript", "ts", "node"],
        extensions: &["js", "mjs", "cjs", "jsx", "ts", "tsx"],
        keywords: &[
            "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
            "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
            "if", "import", "in", "instanceof", "let", "new", "of", "return", "switch", "throw",
            "try", "typeof", "var", "void", "while", "yield", "interface", "type",
        ],
        types: &["string", "number", "boolean", "object", "any", "unknown", "never"],
        constants: &["true", "false", "null", "undefined", "this", "NaN", "Infinity"],
        builtins: &["console", "require", "module", "Promise", "JSON", "Math", "Object", "Array"],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\''],
        triple_quotes: false,
        backtick_strings: true,
        char_literals: false,
        preprocessor: false,
        signatures: &["function ", "const ", "=> ", "console.", "require("],
        interpreters: &["node", "deno"],
    },
    LanguageDef {
        name: "c",
        aliases: &["cpp", "c++", "cc"],
        extensions: &["c", "h", "cc", "cpp", "cxx", "hpp", "hh"],
        keywords: &[
            "auto", "break", "case", "class", "const", "continue", "default", "do", "else",
            "enum", "extern", "for", "goto", "if", "inline", "namespace", "new", "delete",
            "private", "public", "protected", "register", "return", "sizeof", "static",
            "struct", "switch", "template", "typedef", "typename", "union", "using", "virtual",
            "volatile", "while",
        ],
        types: &[
            "bool", "char", "double", "float", "int", "long", "short", "signed", "unsigned",
            "void", "size_t", "int32_t", "uint32_t", "int64_t", "uint64_t", "uint8_t",
        ],
        constants: &["true", "false", "NULL", "nullptr", "this"],
        builtins: &["printf", "fprintf", "malloc", "free", "memcpy", "strlen", "std"],
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        quotes: &['"'],
        triple_quotes: false,
        backtick_strings: false,
        char_literals: true,
        preprocessor: true,
        signatures: &["#include", "int main(", "printf(", "#define "],
        interpreters: &[],
    },
    LanguageDef {
        name: "shell",
        aliases: &["sh", "bash", "zsh"],
        extensions: &["sh", "bash", "zsh"],
        keywords: &[
            "if", "then", "else", "elif", "fi", "for", "in", "do", "done", "while", "until",
            "case", "esac", "function", "return", "local", "export",
        ],
        types: &[],
        constants: &["true", "false"],
        builtins: &["echo", "cd", "printf", "read", "set", "unset", "source", "exit", "test"],
        line_comment: Some("#"),
        block_comment: None,
        quotes: &['"', '\''],
        triple_quotes: false,
        backtick_strings: true,
        char_literals: false,
        preprocessor: false,
        signatures: &["echo ", "fi\n", "done\n", "$("],
        interpreters: &["sh", "bash", "zsh", "dash"],
    },
];

/// A lexer for one language. `Language::plain()` emits the whole source as a
/// single text token.
pub struct Language {
    def: Option<&'static LanguageDef>,
    rules: Option<Regex>,
}

static PLAIN: Language = Language {
    def: None,
    rules: None,
};

static LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    DEFS.iter()
        .map(|def| Language {
            def: Some(def),
            rules: Some(Regex::new(&build_pattern(def)).expect("lexer pattern must compile")),
        })
        .collect()
});

const GROUPS: &[(&str, TokenClass)] = &[
    ("block", TokenClass::Comment),
    ("line", TokenClass::Comment),
    ("preproc", TokenClass::CommentPreproc),
    ("string", TokenClass::LiteralString),
    ("char", TokenClass::LiteralString),
    ("number", TokenClass::LiteralNumber),
    ("ident", TokenClass::Name),
    ("op", TokenClass::Operator),
    ("punct", TokenClass::Punctuation),
    ("ws", TokenClass::Whitespace),
];

fn build_pattern(def: &LanguageDef) -> String {
    let mut alts = Vec::new();
    if let Some((open, close)) = def.block_comment {
        alts.push(format!(
            r"(?P<block>{}(?s:.*?)(?:{}|\z))",
            regex::escape(open),
            regex::escape(close)
        ));
    }
    if def.preprocessor {
        alts.push(r"(?P<preproc>(?m:^[ \t]*#[^\n]*))".to_string());
    }
    if let Some(marker) = def.line_comment {
        alts.push(format!(r"(?P<line>{}[^\n]*)", regex::escape(marker)));
    }

    let mut strings = Vec::new();
    if def.triple_quotes {
        strings.push(r#""""(?s:.*?)(?:"""|\z)"#.to_string());
        strings.push(r"'''(?s:.*?)(?:'''|\z)".to_string());
    }
    for q in def.quotes {
        let q = regex::escape(&q.to_string());
        strings.push(format!(r"{q}(?:[^{q}\\\n]|\\.)*{q}?", q = q));
    }
    if def.backtick_strings {
        strings.push(r"`[^`]*`?".to_string());
    }
    if !strings.is_empty() {
        alts.push(format!("(?P<string>{})", strings.join("|")));
    }
    if def.char_literals {
        alts.push(r"(?P<char>'(?:[^'\\\n]|\\[^'\n]{1,8})')".to_string());
    }

    alts.push(
        r"(?P<number>\b(?:0[xXbBoO][0-9a-fA-F_]+|\d[\d_]*(?:\.\d[\d_]*)?(?:[eE][+-]?\d+)?)\w*)"
            .to_string(),
    );
    alts.push(r"(?P<ident>[A-Za-z_][A-Za-z0-9_]*)".to_string());
    alts.push(r"(?P<op>[-+*/%=<>!&|^~?:]+)".to_string());
    alts.push(r"(?P<punct>[()\[\]{},;.@$#])".to_string());
    alts.push(r"(?P<ws>\s+)".to_string());
    alts.join("|")
}

impl Language {
    /// The plain-text lexer used when nothing else applies.
    pub fn plain() -> &'static Language {
        &PLAIN
    }

    pub fn name(&self) -> &'static str {
        self.def.map_or("text", |d| d.name)
    }

    pub fn tokenize(&self, source: &str) -> Vec<Token> {
        let (Some(def), Some(rules)) = (self.def, self.rules.as_ref()) else {
            return coalesce(vec![Token::new(source, TokenClass::Text)]);
        };

        let mut tokens = Vec::new();
        let mut pos = 0;
        for caps in rules.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            if whole.start() > pos {
                tokens.push(Token::new(&source[pos..whole.start()], TokenClass::Text));
            }
            let class = classify(def, &caps, &source[whole.end()..]);
            tokens.push(Token::new(whole.as_str(), class));
            pos = whole.end();
        }
        if pos < source.len() {
            tokens.push(Token::new(&source[pos..], TokenClass::Text));
        }
        coalesce(tokens)
    }
}

fn classify(def: &LanguageDef, caps: &Captures<'_>, rest: &str) -> TokenClass {
    let Some((group, class)) = GROUPS.iter().find(|(g, _)| caps.name(g).is_some()) else {
        return TokenClass::Text;
    };
    if *group != "ident" {
        return *class;
    }
    let word = &caps[*group];
    if def.keywords.contains(&word) {
        TokenClass::Keyword
    } else if def.types.contains(&word) {
        TokenClass::KeywordType
    } else if def.constants.contains(&word) {
        TokenClass::KeywordConstant
    } else if def.builtins.contains(&word) {
        TokenClass::NameBuiltin
    } else if rest.starts_with('(') {
        TokenClass::NameFunction
    } else {
        TokenClass::Name
    }
}

/// Names of all languages with a dedicated lexer.
pub fn languages() -> Vec<&'static str> {
    DEFS.iter().map(|d| d.name).collect()
}

/// Resolve a language name, alias, file extension or file name.
pub fn resolve_language(hint: &str) -> Result<&'static Language> {
    let hint = hint.trim().to_lowercase();
    let ext = hint.rsplit('.').next().unwrap_or(hint.as_str());
    if hint == "text" || hint == "txt" || hint == "plain" || ext == "txt" {
        return Ok(Language::plain());
    }
    LANGUAGES
        .iter()
        .find(|lang| {
            lang.def.is_some_and(|d| {
                d.name == hint
                    || d.aliases.contains(&hint.as_str())
                    || d.extensions.contains(&ext)
            })
        })
        .ok_or_else(|| Error::UnknownLanguage(hint.to_string()))
}

/// Guess a language from content: a `#!` interpreter line first, then the
/// language whose signatures occur most often.
pub fn analyse(source: &str) -> Option<&'static Language> {
    if let Some(first) = source.lines().next().filter(|l| l.starts_with("#!")) {
        let mut words = first[2..].split_whitespace();
        let mut interpreter = words.next().and_then(|w| w.rsplit('/').next());
        if interpreter == Some("env") {
            interpreter = words.next();
        }
        if let Some(interpreter) = interpreter {
            let found = LANGUAGES.iter().find(|lang| {
                lang.def
                    .is_some_and(|d| d.interpreters.iter().any(|i| interpreter.starts_with(i)))
            });
            if found.is_some() {
                return found;
            }
        }
    }

    let mut best: Option<(&'static Language, usize)> = None;
    for lang in LANGUAGES.iter() {
        let Some(def) = lang.def else { continue };
        let score = def.signatures.iter().filter(|s| source.contains(*s)).count();
        if score > 0 && best.map_or(true, |(_, b)| score > b) {
            best = Some((lang, score));
        }
    }
    best.map(|(lang, _)| lang)
}

/// Tokenizer over the built-in languages, falling back to content sniffing and
/// then plain text when the hint is not recognised.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexLexer;

impl Tokenizer for RegexLexer {
    fn tokenize(&self, source: &str, language_hint: &str) -> Vec<Token> {
        let lang = match resolve_language(language_hint) {
            Ok(lang) => lang,
            Err(err) => {
                let guess = analyse(source).unwrap_or(Language::plain());
                log::warn!("{}; using {} lexer", err, guess.name());
                guess
            }
        };
        log::debug!("tokenizing {} bytes as {}", source.len(), lang.name());
        lang.tokenize(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::concat;

    const RUST: &str = "// hi\nfn main() {\n\tlet s = \"a\\\"b\";\n\tlet c = 'x';\n\tprintln!(\"{}\", 0x1f + s.len());\n}\n";
    const GO: &str = "package main\n\nimport \"fmt\"\n\n/* block\n comment */\nfunc main() {\n\tx := `raw\nstring`\n\tfmt.Println(x, nil)\n}\n";
    const PY: &str = "#!/usr/bin/env python3\ndef f(x):\n    \"\"\"doc\n    string\"\"\"\n    return x + 1.5e3  # tail\n";

    #[test]
    fn concatenation_reproduces_source() {
        let lexer = RegexLexer;
        for (src, hint) in [
            (RUST, "rs"),
            (GO, "go"),
            (PY, "py"),
            ("#include <stdio.h>\nint main(void) { return 0; }\n", "c"),
            ("echo \"$HOME\" # home\n", "sh"),
            ("const a = `x${1}`; // y\n", "ts"),
            ("unterminated \"string\n/* and comment", "rust"),
            ("日本語 ünïcödé \r\n\ttabs", "go"),
            ("anything at all", "mystery"),
            ("", "rust"),
        ] {
            let tokens = lexer.tokenize(src, hint);
            assert_eq!(concat(&tokens), src, "hint {}", hint);
        }
    }

    #[test]
    fn rust_classes() {
        let tokens = resolve_language("rust").unwrap().tokenize(RUST);
        let class_of = |text: &str| {
            tokens
                .iter()
                .find(|t| t.text == text)
                .map(|t| t.class)
                .unwrap_or_else(|| panic!("no token {:?}", text))
        };
        assert_eq!(class_of("// hi"), TokenClass::Comment);
        assert_eq!(class_of("fn"), TokenClass::Keyword);
        assert_eq!(class_of("main"), TokenClass::NameFunction);
        assert_eq!(class_of("\"a\\\"b\""), TokenClass::LiteralString);
        assert_eq!(class_of("'x'"), TokenClass::LiteralString);
        assert_eq!(class_of("println"), TokenClass::NameBuiltin);
        assert_eq!(class_of("0x1f"), TokenClass::LiteralNumber);
        assert_eq!(class_of("s"), TokenClass::Name);
    }

    #[test]
    fn go_raw_string_spans_lines() {
        let tokens = resolve_language("main.go").unwrap().tokenize(GO);
        assert!(tokens
            .iter()
            .any(|t| t.text == "`raw\nstring`" && t.class == TokenClass::LiteralString));
        assert!(tokens
            .iter()
            .any(|t| t.text == "/* block\n comment */" && t.class == TokenClass::Comment));
        assert!(tokens
            .iter()
            .any(|t| t.text == "nil" && t.class == TokenClass::KeywordConstant));
    }

    #[test]
    fn c_preprocessor_lines() {
        let tokens = resolve_language("h").unwrap().tokenize("#include <x.h>\nint a;\n");
        assert_eq!(tokens[0].text, "#include <x.h>");
        assert_eq!(tokens[0].class, TokenClass::CommentPreproc);
    }

    #[test]
    fn resolve_by_name_alias_and_extension() {
        assert_eq!(resolve_language("Go").unwrap().name(), "go");
        assert_eq!(resolve_language(".py").unwrap().name(), "python");
        assert_eq!(resolve_language("bash").unwrap().name(), "shell");
        assert_eq!(resolve_language("src/lib.rs").unwrap().name(), "rust");
        assert_eq!(resolve_language("txt").unwrap().name(), "text");
        assert!(matches!(resolve_language("cobol"), Err(Error::UnknownLanguage(_))));
        assert!(resolve_language("").is_err());
    }

    #[test]
    fn analyse_uses_shebang_then_signatures() {
        assert_eq!(analyse(PY).map(Language::name), Some("python"));
        assert_eq!(analyse("#!/bin/bash\nls\n").map(Language::name), Some("shell"));
        assert_eq!(analyse("#!/bin/sh -e\nls\n").map(Language::name), Some("shell"));
        assert_eq!(analyse(GO).map(Language::name), Some("go"));
        assert!(analyse("just some prose").is_none());
    }

    #[test]
    fn unknown_hint_falls_back_to_sniffing_then_plain() {
        let lexer = RegexLexer;
        let tokens = lexer.tokenize(GO, "mystery");
        assert!(tokens.iter().any(|t| t.class == TokenClass::Keyword));
        let tokens = lexer.tokenize("hello world", "mystery");
        assert_eq!(tokens, vec![Token::new("hello world", TokenClass::Text)]);
    }
}
