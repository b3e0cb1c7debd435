use super::PhpError;
use crate::tree::{Node, Tree};

/// Parses the source of a translation file into a tree.
pub fn parse(source: &str) -> Result<Tree, PhpError> {
    Parser::new(source).parse_file()
}

enum Value {
    Str(String),
    Num(String),
    Array(Tree),
    /// A bare word such as `true`, `null` or a constant.
    Word(String),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src: src.strip_prefix('\u{feff}').unwrap_or(src),
            pos: 0,
        }
    }

    fn parse_file(mut self) -> Result<Tree, PhpError> {
        self.skip_whitespace();
        if !self.eat_keyword("<?php") {
            return Err(self.error("expected '<?php' opening tag"));
        }

        loop {
            self.skip_trivia();
            if self.eat_keyword("return") {
                break;
            }
            if self.eat_keyword("declare") || self.eat_keyword("namespace") || self.eat_keyword("use")
            {
                self.skip_statement()?;
                continue;
            }
            return Err(self.error("expected a return statement"));
        }

        let value = self.parse_value()?;

        self.skip_trivia();
        if !self.eat(";") && !self.rest().starts_with("?>") && !self.rest().is_empty() {
            return Err(self.error("expected ';' after the returned value"));
        }

        match value {
            Value::Array(tree) => Ok(tree),
            _ => Err(PhpError::NotAnArray),
        }
    }

    fn parse_value(&mut self) -> Result<Value, PhpError> {
        self.skip_trivia();
        match self.peek() {
            Some('[') => {
                self.bump();
                self.parse_array_body(']').map(Value::Array)
            },
            Some('\'' | '"') => self.parse_string_expr().map(Value::Str),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                self.parse_number().map(Value::Num)
            },
            Some(c) if is_ident_start(c) => {
                let word = self.read_ident();
                if word.eq_ignore_ascii_case("array") {
                    self.expect("(")?;
                    return self.parse_array_body(')').map(Value::Array);
                }
                Ok(Value::Word(word.to_string()))
            },
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of file")),
        }
    }

    fn parse_array_body(&mut self, close: char) -> Result<Tree, PhpError> {
        let mut tree = Tree::new();
        let mut next_index: i64 = 0;

        loop {
            self.skip_trivia();
            if self.eat_char(close) {
                return Ok(tree);
            }

            let first = self.parse_value()?;
            self.skip_trivia();

            let (key, value) = if self.eat("=>") {
                let key = match first {
                    Value::Str(key) => key,
                    Value::Num(number) => number
                        .parse::<i64>()
                        .map(|index| index.to_string())
                        .map_err(|_| self.error("array keys must be strings or integers"))?,
                    _ => return Err(self.error("array keys must be strings or integers")),
                };
                (key, self.parse_value()?)
            } else {
                (next_index.to_string(), first)
            };

            if let Ok(index) = key.parse::<i64>()
                && index.to_string() == key
            {
                next_index = next_index.max(index.saturating_add(1));
            }

            let node = match value {
                Value::Str(text) | Value::Num(text) => Node::Leaf(text),
                Value::Array(children) => Node::Branch(children),
                Value::Word(found) => return Err(PhpError::UnsupportedValue { key, found }),
            };
            tree.insert(key, node);

            self.skip_trivia();
            if self.eat(",") {
                continue;
            }
            if self.eat_char(close) {
                return Ok(tree);
            }
            return Err(self.error(format!("expected ',' or '{close}'")));
        }
    }

    /// A string literal, possibly concatenated with further literals.
    fn parse_string_expr(&mut self) -> Result<String, PhpError> {
        let mut value = self.parse_string_literal()?;

        loop {
            let checkpoint = self.pos;
            self.skip_trivia();
            if !self.eat(".") {
                self.pos = checkpoint;
                return Ok(value);
            }
            self.skip_trivia();
            if !matches!(self.peek(), Some('\'' | '"')) {
                return Err(self.error("only string literals can be concatenated"));
            }
            value.push_str(&self.parse_string_literal()?);
        }
    }

    fn parse_string_literal(&mut self) -> Result<String, PhpError> {
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };
        let mut value = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(value),
                Some('\\') => {
                    let Some(escaped) = self.bump() else {
                        return Err(self.error("unterminated string"));
                    };
                    if quote == '\'' {
                        if !matches!(escaped, '\\' | '\'') {
                            value.push('\\');
                        }
                        value.push(escaped);
                    } else {
                        self.push_double_quoted_escape(escaped, &mut value);
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn push_double_quoted_escape(&mut self, escaped: char, value: &mut String) {
        match escaped {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'v' => value.push('\u{0B}'),
            'e' => value.push('\u{1B}'),
            'f' => value.push('\u{0C}'),
            '\\' | '$' | '"' => value.push(escaped),
            'u' if self.rest().starts_with('{') => {
                let end = self.rest().find('}');
                let decoded = end
                    .and_then(|end| u32::from_str_radix(&self.rest()[1..end], 16).ok())
                    .and_then(char::from_u32);
                match (end, decoded) {
                    (Some(end), Some(c)) => {
                        value.push(c);
                        self.pos += end + 1;
                    },
                    _ => value.push_str("\\u"),
                }
            },
            other => {
                value.push('\\');
                value.push(other);
            },
        }
    }

    fn parse_number(&mut self) -> Result<String, PhpError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' {
                self.bump();
            } else {
                break;
            }
        }

        let text = &self.src[start..self.pos];
        if !text.chars().any(|c| c.is_ascii_digit()) {
            return Err(self.error(format!("invalid number '{text}'")));
        }
        Ok(text.trim_start_matches('+').replace('_', ""))
    }

    /// Skips `declare(...)`, `namespace ...` and `use ...` statements.
    fn skip_statement(&mut self) -> Result<(), PhpError> {
        match self.rest().find(';') {
            Some(end) => {
                self.pos += end + 1;
                Ok(())
            },
            None => Err(self.error("unterminated statement")),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.starts_with("//") || (rest.starts_with('#') && !rest.starts_with("#[")) {
                self.pos += rest.find('\n').unwrap_or(rest.len());
            } else if let Some(body) = rest.strip_prefix("/*") {
                self.pos += body.find("*/").map_or(rest.len(), |end| end + 4);
            } else {
                return;
            }
        }
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes a case-insensitive keyword not followed by an identifier character.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let rest = self.rest();
        let Some(head) = rest.get(..keyword.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(keyword) || rest[keyword.len()..].starts_with(is_ident_char) {
            return false;
        }
        self.pos += keyword.len();
        true
    }

    fn expect(&mut self, token: &str) -> Result<(), PhpError> {
        self.skip_trivia();
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    fn error(&self, message: impl Into<String>) -> PhpError {
        let (line, column) = line_col_from_offset(self.src, self.pos);
        PhpError::Syntax {
            line,
            column,
            message: message.into(),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '\\'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\\'
}

/// Calculate line and column (1-based) from a byte offset.
fn line_col_from_offset(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset.min(source.len())];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &Tree, path: &[&str]) -> String {
        let mut current = tree;
        for (i, segment) in path.iter().enumerate() {
            match current.get(*segment) {
                Some(Node::Leaf(value)) if i == path.len() - 1 => return value.clone(),
                Some(Node::Branch(children)) => current = children,
                other => panic!("unexpected node at {segment}: {other:?}"),
            }
        }
        panic!("path {path:?} ends in a group")
    }

    #[test]
    fn test_parse_short_syntax() {
        let source = r#"<?php

return [
    'failed' => 'These credentials do not match our records.',
    'password' => [
        'reset' => 'Your password has been reset!',
    ],
];
"#;
        let tree = parse(source).unwrap();
        assert_eq!(
            leaf(&tree, &["failed"]),
            "These credentials do not match our records."
        );
        assert_eq!(
            leaf(&tree, &["password", "reset"]),
            "Your password has been reset!"
        );
    }

    #[test]
    fn test_parse_long_syntax_with_comments() {
        let source = r#"<?php
declare(strict_types=1);

/*
|--------------------------------------------------------------------------
| Pagination Language Lines
|--------------------------------------------------------------------------
*/
return array(
    // previous page
    'previous' => '&laquo; Previous',
    # next page
    "next" => "Next &raquo;",
);
"#;
        let tree = parse(source).unwrap();
        assert_eq!(leaf(&tree, &["previous"]), "&laquo; Previous");
        assert_eq!(leaf(&tree, &["next"]), "Next &raquo;");
    }

    #[test]
    fn test_parse_escapes() {
        let source = r#"<?php return [
    'single' => 'It\'s a \\ backslash and \n stays',
    'double' => "Tab\tand \"quotes\" and \$dollar",
    'unicode' => "caf\u{e9}",
];"#;
        let tree = parse(source).unwrap();
        assert_eq!(leaf(&tree, &["single"]), "It's a \\ backslash and \\n stays");
        assert_eq!(leaf(&tree, &["double"]), "Tab\tand \"quotes\" and $dollar");
        assert_eq!(leaf(&tree, &["unicode"]), "café");
    }

    #[test]
    fn test_parse_concatenation_and_numbers() {
        let source = "<?php return [
    'long' => 'first part, ' . 'second part',
    'limit' => 10,
    3 => 'three',
    'list' => ['a', 'b'],
];";
        let tree = parse(source).unwrap();
        assert_eq!(leaf(&tree, &["long"]), "first part, second part");
        assert_eq!(leaf(&tree, &["limit"]), "10");
        assert_eq!(leaf(&tree, &["3"]), "three");
        assert_eq!(leaf(&tree, &["list", "0"]), "a");
        assert_eq!(leaf(&tree, &["list", "1"]), "b");
    }

    #[test]
    fn test_parse_keeps_file_order() {
        let tree = parse("<?php return ['z' => '1', 'a' => '2', 'm' => '3'];").unwrap();
        let keys: Vec<&str> = tree.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_parse_duplicate_key_last_wins() {
        let tree = parse("<?php return ['a' => '1', 'b' => '2', 'a' => '3'];").unwrap();
        assert_eq!(leaf(&tree, &["a"]), "3");
        assert_eq!(tree.get_index(0).map(|(k, _)| k.as_str()), Some("a"));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse("<?php\n\nreturn [];\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_scalar_return() {
        assert_eq!(parse("<?php return 'text';"), Err(PhpError::NotAnArray));
        assert_eq!(parse("<?php return 42;"), Err(PhpError::NotAnArray));
    }

    #[test]
    fn test_parse_unsupported_value() {
        assert_eq!(
            parse("<?php return ['enabled' => true];"),
            Err(PhpError::UnsupportedValue {
                key: "enabled".to_string(),
                found: "true".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_missing_open_tag() {
        assert!(matches!(
            parse("return [];"),
            Err(PhpError::Syntax { line: 1, column: 1, .. })
        ));
    }

    #[test]
    fn test_parse_syntax_error_position() {
        let err = parse("<?php\nreturn [\n    'a' => 'b'\n    'c' => 'd',\n];").unwrap_err();
        assert!(matches!(err, PhpError::Syntax { line: 4, column: 5, .. }), "{err:?}");
    }

    #[test]
    fn test_parse_unterminated_string() {
        assert!(matches!(
            parse("<?php return ['a' => 'oops];"),
            Err(PhpError::Syntax { .. })
        ));
    }
}
