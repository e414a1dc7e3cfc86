//! Classified runs of source text.

/// Semantic style class attached to a run of text.
///
/// Classes form a shallow tree: every class except [`TokenClass::Text`] has a
/// parent category, and theme lookups fall back along that chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Text,
    Whitespace,
    Error,
    Comment,
    CommentPreproc,
    Keyword,
    KeywordConstant,
    KeywordType,
    Name,
    NameBuiltin,
    NameFunction,
    NameAttribute,
    Literal,
    LiteralString,
    LiteralStringEscape,
    LiteralNumber,
    Operator,
    Punctuation,
}

impl TokenClass {
    /// The category this class inherits colours from, if any.
    pub fn parent(self) -> Option<TokenClass> {
        use TokenClass::*;
        match self {
            Text => None,
            Whitespace | Error | Comment | Keyword | Name | Literal | Operator | Punctuation => {
                Some(Text)
            }
            CommentPreproc => Some(Comment),
            KeywordConstant | KeywordType => Some(Keyword),
            NameBuiltin | NameFunction | NameAttribute => Some(Name),
            LiteralString | LiteralNumber => Some(Literal),
            LiteralStringEscape => Some(LiteralString),
        }
    }
}

/// A contiguous run of source text tagged with one style class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub class: TokenClass,
}

impl Token {
    pub fn new(text: impl Into<String>, class: TokenClass) -> Self {
        Self { text: text.into(), class }
    }
}

/// Merge adjacent tokens that share a class.
pub fn coalesce(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if token.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.class == token.class => last.text.push_str(&token.text),
            _ => out.push(token),
        }
    }
    out
}

/// Rebuild the source text a token stream was produced from.
pub fn concat(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}
