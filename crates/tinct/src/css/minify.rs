//! Stylesheet minification.
//!
//! [`minify_css`] walks the stylesheet with the `cssparser` tokenizer, drops
//! comments, and collapses whitespace. A single space survives only where two
//! tokens would otherwise merge or where it is significant (descendant
//! selectors, `calc()` operators, multi-value declarations).

use cssparser::{ParseError, Parser, ParserInput, ToCss, Token};

/// Post-processes generated CSS.
pub trait Minifier {
    fn minify(&self, css: &str) -> String;
}

impl<F> Minifier for F
where
    F: Fn(&str) -> String,
{
    fn minify(&self, css: &str) -> String {
        self(css)
    }
}

/// Removes comments and redundant whitespace from a stylesheet.
///
/// # Example
///
/// ```rust
/// use tinct::minify_css;
///
/// let css = ".a {\n  color: red;\n}\n/* note */\n.b .c { margin: 0 auto; }";
/// assert_eq!(minify_css(css), ".a{color:red;}.b .c{margin:0 auto;}");
/// ```
pub fn minify_css(css: &str) -> String {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut out = String::with_capacity(css.len());
    minify_tokens(&mut parser, &mut out);
    out
}

/// Copies tokens up to the end of the current block. Unclosed blocks are closed.
fn minify_tokens<'i, 't>(parser: &mut Parser<'i, 't>, out: &mut String) {
    let mut pending_space = false;
    loop {
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return,
        };

        if matches!(token, Token::WhiteSpace(_) | Token::Comment(_)) {
            pending_space = true;
            continue;
        }
        if pending_space && needs_space(out, &token) {
            out.push(' ');
        }
        pending_space = false;

        out.push_str(&token.to_css_string());
        let closing = match token {
            Token::CurlyBracketBlock => '}',
            Token::SquareBracketBlock => ']',
            Token::ParenthesisBlock | Token::Function(_) => ')',
            _ => continue,
        };
        let nested: Result<(), ParseError<'i, ()>> = parser.parse_nested_block(|nested| {
            minify_tokens(nested, out);
            Ok(())
        });
        if nested.is_err() {
            return;
        }
        out.push(closing);
    }
}

fn needs_space(out: &str, next: &Token<'_>) -> bool {
    match out.chars().last() {
        None | Some('{' | '}' | ';' | ',' | ':' | '(' | '[' | '>') => false,
        Some(_) => !matches!(
            next,
            Token::Semicolon
                | Token::Comma
                | Token::CurlyBracketBlock
                | Token::CloseCurlyBracket
                | Token::CloseParenthesis
                | Token::CloseSquareBracket
                | Token::Delim('>')
                | Token::Delim('!')
        ),
    }
}
