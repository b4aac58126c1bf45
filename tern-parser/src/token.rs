use std::fmt;

use tern_source::SyntaxError;

/// Every kind of token the lexer produces.
///
/// Variants are grouped (punctuators, literals, keywords, trivia) and the
/// groups are contiguous, so range checks in the `is_*` helpers rely on the
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    // punctuators
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    And,
    AndAnd,
    AndAndEqual,
    AndEqual,
    Bang,
    BangEqual,
    BangEqualEqual,
    Colon,
    Comma,
    Dot,
    DotDotDot,
    Equal,
    EqualEqual,
    EqualEqualEqual,
    Greater,
    GreaterEqual,
    GreaterGreater,
    GreaterGreaterEqual,
    GreaterGreaterGreater,
    GreaterGreaterGreaterEqual,
    Hash,
    HashBang,
    Hat,
    HatEqual,
    Less,
    LessEqual,
    LessLess,
    LessLessEqual,
    Minus,
    MinusEqual,
    MinusMinus,
    Percent,
    PercentEqual,
    Pipe,
    PipeEqual,
    PipePipe,
    PipePipeEqual,
    Plus,
    PlusEqual,
    PlusPlus,
    Question,
    QuestionDot,
    QuestionQuestion,
    QuestionQuestionEqual,
    Semicolon,
    Slash,
    SlashEqual,
    Star,
    StarEqual,
    StarStar,
    StarStarEqual,
    Tilde,

    // literals
    Identifier,
    String,
    Number,

    // keywords
    Arguments,
    As,
    Async,
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Eval,
    Export,
    Extends,
    False,
    Finally,
    For,
    From,
    Function,
    Get,
    If,
    Implements,
    Import,
    In,
    Instanceof,
    Interface,
    Let,
    Meta,
    New,
    Null,
    Of,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Set,
    Static,
    Super,
    Switch,
    Target,
    This,
    Throw,
    True,
    Try,
    Typeof,
    Undefined,
    Var,
    Void,
    While,
    With,
    Yield,

    // trivia
    Newline,
    Space,
    SingleLineComment,
    MultiLineComment,

    Eof,
}

impl TokenKind {
    /// Looks up an identifier spelling in the keyword table.
    pub fn from_keyword_str(name: &str) -> Option<TokenKind> {
        use TokenKind::*;

        let kind = match name {
            "arguments" => Arguments,
            "as" => As,
            "async" => Async,
            "await" => Await,
            "break" => Break,
            "case" => Case,
            "catch" => Catch,
            "class" => Class,
            "const" => Const,
            "continue" => Continue,
            "debugger" => Debugger,
            "default" => Default,
            "delete" => Delete,
            "do" => Do,
            "else" => Else,
            "enum" => Enum,
            "eval" => Eval,
            "export" => Export,
            "extends" => Extends,
            "false" => False,
            "finally" => Finally,
            "for" => For,
            "from" => From,
            "function" => Function,
            "get" => Get,
            "if" => If,
            "implements" => Implements,
            "import" => Import,
            "in" => In,
            "instanceof" => Instanceof,
            "interface" => Interface,
            "let" => Let,
            "meta" => Meta,
            "new" => New,
            "null" => Null,
            "of" => Of,
            "package" => Package,
            "private" => Private,
            "protected" => Protected,
            "public" => Public,
            "return" => Return,
            "set" => Set,
            "static" => Static,
            "super" => Super,
            "switch" => Switch,
            "target" => Target,
            "this" => This,
            "throw" => Throw,
            "true" => True,
            "try" => Try,
            "typeof" => Typeof,
            "undefined" => Undefined,
            "var" => Var,
            "void" => Void,
            "while" => While,
            "with" => With,
            "yield" => Yield,
            _ => return None,
        };
        Some(kind)
    }

    /// The spelling of punctuators and keywords, a descriptive name otherwise.
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            LeftParen => "(",
            RightParen => ")",
            LeftBrace => "{",
            RightBrace => "}",
            LeftBracket => "[",
            RightBracket => "]",
            And => "&",
            AndAnd => "&&",
            AndAndEqual => "&&=",
            AndEqual => "&=",
            Bang => "!",
            BangEqual => "!=",
            BangEqualEqual => "!==",
            Colon => ":",
            Comma => ",",
            Dot => ".",
            DotDotDot => "...",
            Equal => "=",
            EqualEqual => "==",
            EqualEqualEqual => "===",
            Greater => ">",
            GreaterEqual => ">=",
            GreaterGreater => ">>",
            GreaterGreaterEqual => ">>=",
            GreaterGreaterGreater => ">>>",
            GreaterGreaterGreaterEqual => ">>>=",
            Hash => "#",
            HashBang => "#!",
            Hat => "^",
            HatEqual => "^=",
            Less => "<",
            LessEqual => "<=",
            LessLess => "<<",
            LessLessEqual => "<<=",
            Minus => "-",
            MinusEqual => "-=",
            MinusMinus => "--",
            Percent => "%",
            PercentEqual => "%=",
            Pipe => "|",
            PipeEqual => "|=",
            PipePipe => "||",
            PipePipeEqual => "||=",
            Plus => "+",
            PlusEqual => "+=",
            PlusPlus => "++",
            Question => "?",
            QuestionDot => "?.",
            QuestionQuestion => "??",
            QuestionQuestionEqual => "??=",
            Semicolon => ";",
            Slash => "/",
            SlashEqual => "/=",
            Star => "*",
            StarEqual => "*=",
            StarStar => "**",
            StarStarEqual => "**=",
            Tilde => "~",

            Identifier => "identifier",
            String => "string",
            Number => "number",

            Arguments => "arguments",
            As => "as",
            Async => "async",
            Await => "await",
            Break => "break",
            Case => "case",
            Catch => "catch",
            Class => "class",
            Const => "const",
            Continue => "continue",
            Debugger => "debugger",
            Default => "default",
            Delete => "delete",
            Do => "do",
            Else => "else",
            Enum => "enum",
            Eval => "eval",
            Export => "export",
            Extends => "extends",
            False => "false",
            Finally => "finally",
            For => "for",
            From => "from",
            Function => "function",
            Get => "get",
            If => "if",
            Implements => "implements",
            Import => "import",
            In => "in",
            Instanceof => "instanceof",
            Interface => "interface",
            Let => "let",
            Meta => "meta",
            New => "new",
            Null => "null",
            Of => "of",
            Package => "package",
            Private => "private",
            Protected => "protected",
            Public => "public",
            Return => "return",
            Set => "set",
            Static => "static",
            Super => "super",
            Switch => "switch",
            Target => "target",
            This => "this",
            Throw => "throw",
            True => "true",
            Try => "try",
            Typeof => "typeof",
            Undefined => "undefined",
            Var => "var",
            Void => "void",
            While => "while",
            With => "with",
            Yield => "yield",

            Newline => "newline",
            Space => "space",
            SingleLineComment => "single-line comment",
            MultiLineComment => "multi-line comment",

            Eof => "end of input",
        }
    }

    pub fn is_keyword(&self) -> bool {
        *self >= Self::Arguments && *self <= Self::Yield
    }

    /// Whitespace, newlines and comments (including `#!` comments).
    pub fn is_trivia(&self) -> bool {
        (*self >= Self::Newline && *self <= Self::MultiLineComment) || *self == Self::HashBang
    }

    pub fn is_unary_op(&self) -> bool {
        matches!(
            *self,
            Self::Delete
                | Self::Void
                | Self::Typeof
                | Self::Plus
                | Self::Minus
                | Self::Tilde
                | Self::Bang
        )
    }

    pub fn is_update_op(&self) -> bool {
        matches!(*self, Self::PlusPlus | Self::MinusMinus)
    }

    /// Returns the binary binding power or `None` if invalid binop token.
    /// Left-associative levels bind as `(l, l + 1)`, exponentiation as `(l, l - 1)`.
    /// Assignment and the conditional operator are parsed above this table.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        use TokenKind::*;

        match self {
            PipePipe => Some((3, 4)),
            AndAnd => Some((5, 6)),
            Pipe => Some((7, 8)),
            Hat => Some((9, 10)),
            And => Some((11, 12)),
            EqualEqual | BangEqual | EqualEqualEqual | BangEqualEqual => Some((13, 14)),
            Less | Greater | LessEqual | GreaterEqual | Instanceof | In => Some((15, 16)),
            LessLess | GreaterGreater | GreaterGreaterGreater => Some((17, 18)),
            Plus | Minus => Some((19, 20)),
            Star | Slash | Percent => Some((21, 22)),
            StarStar => Some((24, 23)),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexeme classified by the lexer.
///
/// `lexeme` is the exact source slice, `literal` the payload: the body of a
/// string without its quotes, the text after `#!` for a shebang comment, and
/// the lexeme itself for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub literal: &'a str,
    /// 1-based line of the first character.
    pub line: usize,
    /// 1-based column of the first character, counted in characters.
    pub col: usize,
}

impl<'a> Token<'a> {
    /// How the token is named in diagnostics.
    pub fn describe(&self) -> &'a str {
        match self.kind {
            TokenKind::Eof => "end of input",
            TokenKind::Newline => "newline",
            _ => self.literal,
        }
    }

    pub fn error_at(&self) -> SyntaxError {
        SyntaxError::new(self.describe(), self.line, self.col)
    }
}
