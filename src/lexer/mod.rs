use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
    #[terminal("{")]
    LBrace,
    #[terminal("}")]
    RBrace,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[literal(";[^\r\n]*")]
    Comment,
    // Declared before Symbol so that "-5" lexes as a number while "-" alone
    // stays a symbol.
    #[literal("(-[0-9]+|[0-9]+)")]
    Number,
    #[literal(r"[a-zA-Z_+\-*/\\=<>|!&%][a-zA-Z0-9_+\-*/\\=<>|!&%]*")]
    Symbol,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
            Token::LBrace(inner) => inner.position.clone(),
            Token::RBrace(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::Comment(inner) => inner.position.clone(),
            Token::Number(inner) => inner.position.clone(),
            Token::Symbol(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
            Token::LBrace(_) => "'{'".to_string(),
            Token::RBrace(_) => "'}'".to_string(),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::Comment(_) => "comment".to_string(),
            Token::Number(inner) => format!("number '{}'", inner.value),
            Token::Symbol(inner) => format!("symbol '{}'", inner.value),
        }
    }
}
