//! Expression tree built from the token stream.

use super::lexer::{closing_for, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expr {
    Group(Group),
    Str(String),
    Char(String),
    Atom(String),
    Space,
}

/// A comma-separated sequence of items.
pub(crate) type Items = Vec<Vec<Expr>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Group {
    pub open: char,
    pub close: char,
    pub items: Items,
    /// False when the input ended before the matching bracket.
    pub closed: bool,
}

/// Groups nested deeper than this are kept as a single verbatim atom, which
/// bounds recursion in parsing, layout and drop.
pub(crate) const MAX_DEPTH: usize = 128;

/// Parse a token stream into the top-level comma-separated items.
pub(crate) fn parse(tokens: Vec<Token>) -> Items {
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };
    let (items, _) = parser.items(None, 0);
    items
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    /// Collect items until `close` (consumed) or end of input.
    /// Returns whether the closing bracket was found.
    fn items(&mut self, close: Option<char>, depth: usize) -> (Items, bool) {
        let mut items = Vec::new();
        let mut current = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Open(open) if depth >= MAX_DEPTH => {
                    current.push(Expr::Atom(self.verbatim(open)));
                }
                Token::Open(open) => {
                    let (inner, closed) = self.items(Some(closing_for(open)), depth + 1);
                    current.push(Expr::Group(Group {
                        open,
                        close: closing_for(open),
                        items: inner,
                        closed,
                    }));
                }
                Token::Close(c) if Some(c) == close => {
                    push_item(&mut items, current, true);
                    return (items, true);
                }
                Token::Close(c) => current.push(Expr::Atom(c.to_string())),
                Token::Comma => {
                    push_item(&mut items, std::mem::take(&mut current), false);
                }
                Token::Str(s) => current.push(Expr::Str(s)),
                Token::Char(c) => current.push(Expr::Char(c)),
                Token::Space => current.push(Expr::Space),
                Token::Text(t) => current.push(Expr::Atom(t)),
            }
        }

        push_item(&mut items, current, true);
        (items, false)
    }

    /// Consume the rest of a group opened by `open` without building a tree.
    /// Whitespace is collapsed the same way the tree layout would.
    fn verbatim(&mut self, open: char) -> String {
        let mut text = String::from(open);
        let mut expected = vec![closing_for(open)];

        while let Some(token) = self.tokens.next() {
            match token {
                Token::Open(c) => {
                    text.push(c);
                    expected.push(closing_for(c));
                }
                Token::Close(c) => {
                    text.push(c);
                    if expected.last() == Some(&c) {
                        expected.pop();
                        if expected.is_empty() {
                            break;
                        }
                    }
                }
                Token::Comma => text.push(','),
                Token::Space => text.push(' '),
                Token::Str(s) | Token::Char(s) | Token::Text(s) => text.push_str(&s),
            }
        }

        text
    }
}

/// Trim surrounding spaces. An empty item is dropped only when it is the last
/// one, so `[1, 2,]` keeps two items and `[]` keeps none.
fn push_item(items: &mut Items, mut item: Vec<Expr>, last: bool) {
    while matches!(item.last(), Some(Expr::Space)) {
        item.pop();
    }
    let leading = item.iter().take_while(|e| matches!(e, Expr::Space)).count();
    item.drain(..leading);

    if item.is_empty() && last {
        return;
    }
    items.push(item);
}
