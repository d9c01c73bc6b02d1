//! Width-aware layout of an expression tree.

use super::expr::{Expr, Group, Items};
use super::{OutputOptions, StringStyle};

pub(crate) fn layout(items: &Items, options: &OutputOptions) -> String {
    let mut writer = Writer {
        options,
        out: String::new(),
        column: 0,
    };
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            writer.push(", ");
        }
        writer.item(item, 0);
    }
    writer.out
}

struct Writer<'a> {
    options: &'a OutputOptions,
    out: String,
    column: usize,
}

impl Writer<'_> {
    fn push(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(pos) => self.column = text[pos + 1..].chars().count(),
            None => self.column += text.chars().count(),
        }
        self.out.push_str(text);
    }

    fn newline(&mut self, indent: usize) {
        self.out.push('\n');
        self.out.extend(std::iter::repeat(' ').take(indent));
        self.column = indent;
    }

    fn item(&mut self, item: &[Expr], indent: usize) {
        for expr in item {
            self.expr(expr, indent);
        }
    }

    fn expr(&mut self, expr: &Expr, indent: usize) {
        match expr {
            Expr::Group(group) => self.group(group, indent),
            Expr::Str(s) => {
                let text = string_literal(s, self.options.string_style);
                self.push(&text);
            }
            Expr::Char(c) => self.push(c),
            Expr::Atom(a) => self.push(a),
            Expr::Space => self.push(" "),
        }
    }

    fn group(&mut self, group: &Group, indent: usize) {
        let flat = compact_group(group, self.options.string_style);
        let fits = !flat.contains('\n') && self.column + flat.chars().count() <= self.options.page_width;
        if fits || group.items.is_empty() {
            self.push(&flat);
            return;
        }

        let inner = indent + self.options.indent;
        self.push(&group.open.to_string());
        for item in &group.items {
            self.newline(inner);
            self.item(item, inner);
            self.push(",");
        }
        if group.closed {
            self.newline(indent);
            self.push(&group.close.to_string());
        }
    }
}

fn compact_item(item: &[Expr], style: StringStyle) -> String {
    item.iter().map(|expr| compact_expr(expr, style)).collect()
}

fn compact_expr(expr: &Expr, style: StringStyle) -> String {
    match expr {
        Expr::Group(group) => compact_group(group, style),
        Expr::Str(s) => string_literal(s, style),
        Expr::Char(c) => c.clone(),
        Expr::Atom(a) => a.clone(),
        Expr::Space => " ".to_string(),
    }
}

fn compact_group(group: &Group, style: StringStyle) -> String {
    let close = if group.closed {
        group.close.to_string()
    } else {
        String::new()
    };
    if group.items.is_empty() {
        return format!("{}{}", group.open, close);
    }

    let body = group
        .items
        .iter()
        .map(|item| compact_item(item, style))
        .collect::<Vec<_>>()
        .join(", ");
    let pad = if group.open == '{' { " " } else { "" };
    let close_pad = if group.closed { pad } else { "" };
    format!("{}{}{}{}{}", group.open, pad, body, close_pad, close)
}

fn string_literal(raw: &str, style: StringStyle) -> String {
    match style {
        StringStyle::Escaped => raw.to_string(),
        StringStyle::Literal => unescape(raw),
    }
}

/// Resolve Rust `Debug` escapes. Unknown or malformed escapes are kept verbatim.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') if chars.peek() == Some(&'{') => {
                chars.next();
                let mut hex = String::new();
                while let Some(&h) = chars.peek() {
                    if !h.is_ascii_hexdigit() {
                        break;
                    }
                    hex.push(h);
                    chars.next();
                }
                let terminated = chars.peek() == Some(&'}');
                if terminated {
                    chars.next();
                }
                let decoded = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32);
                match decoded.filter(|_| terminated) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push_str("\\u{");
                        out.push_str(&hex);
                        if terminated {
                            out.push('}');
                        }
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
