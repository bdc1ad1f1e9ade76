//! A small XPath 1.0 subset evaluated over a [`Document`].
//!
//! Supported: absolute paths built from `/` and `//` steps, name tests and
//! `*`, an optional parenthesized path followed by predicates (`(//a)[2]`),
//! and predicates made of positions, `last()`, attribute existence,
//! `=`/`!=` comparisons against `@attr`, `text()`, `.`, `normalize-space()`
//! and `string()`, `contains()`, `starts-with()`, `not()`, `and`, `or`.
//! Everything else is rejected with an [`XPathError`].

use scraper::ElementRef;
use thiserror::Error;

use crate::dom::{self, Document};
use crate::text::normalize_text;

/// XPath compilation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XPathError {
    /// Expression ended where more input was required
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    /// Token not valid at this position
    #[error("unexpected {found:?} at offset {offset}")]
    Unexpected {
        /// Offending token text
        found: String,
        /// Byte offset in the expression
        offset: usize,
    },
    /// Unterminated string literal
    #[error("unterminated string literal at offset {0}")]
    UnterminatedLiteral(usize),
    /// Recognized construct outside the supported subset
    #[error("unsupported construct: {0}")]
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Slash,
    DoubleSlash,
    LBracket,
    RBracket,
    LParen,
    RParen,
    At,
    Comma,
    Eq,
    NotEq,
    Star,
    Dot,
    Name(String),
    Literal(String),
    Number(usize),
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, XPathError> {
    let bytes: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        let start = i;
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '/' if bytes.get(i + 1) == Some(&'/') => {
                i += 2;
                Token::DoubleSlash
            }
            '/' => {
                i += 1;
                Token::Slash
            }
            '[' => {
                i += 1;
                Token::LBracket
            }
            ']' => {
                i += 1;
                Token::RBracket
            }
            '(' => {
                i += 1;
                Token::LParen
            }
            ')' => {
                i += 1;
                Token::RParen
            }
            '@' => {
                i += 1;
                Token::At
            }
            ',' => {
                i += 1;
                Token::Comma
            }
            '=' => {
                i += 1;
                Token::Eq
            }
            '!' if bytes.get(i + 1) == Some(&'=') => {
                i += 2;
                Token::NotEq
            }
            '*' => {
                i += 1;
                Token::Star
            }
            '.' => {
                i += 1;
                Token::Dot
            }
            '\'' | '"' => {
                let close = bytes[i + 1..]
                    .iter()
                    .position(|c| *c == ch)
                    .ok_or(XPathError::UnterminatedLiteral(start))?;
                let literal: String = bytes[i + 1..i + 1 + close].iter().collect();
                i += close + 2;
                Token::Literal(literal)
            }
            c if c.is_ascii_digit() => {
                let mut j = i;
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                let digits: String = bytes[i..j].iter().collect();
                i = j;
                Token::Number(digits.parse().map_err(|_| XPathError::Unexpected {
                    found: digits.clone(),
                    offset: start,
                })?)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut j = i;
                while j < bytes.len()
                    && (bytes[j].is_alphanumeric() || bytes[j] == '-' || bytes[j] == '_')
                {
                    j += 1;
                }
                let name: String = bytes[i..j].iter().collect();
                i = j;
                Token::Name(name)
            }
            other => {
                return Err(XPathError::Unexpected {
                    found: other.to_string(),
                    offset: start,
                })
            }
        };
        tokens.push((token, start));
    }
    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeTest {
    Any,
    Name(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    descendant: bool,
    test: NodeTest,
    predicates: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Attr(String),
    Text,
    StringValue,
    Normalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    Or(Box<Expr>, Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Position(usize),
    Last,
    Exists(Operand),
    Equals(Operand, String),
    NotEquals(Operand, String),
    Contains(Operand, String),
    StartsWith(Operand, String),
}

/// A compiled XPath expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XPath {
    steps: Vec<Step>,
    outer: Vec<Expr>,
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn next(&mut self) -> Result<Token, XPathError> {
        let token = self
            .tokens
            .get(self.pos)
            .map(|(t, _)| t.clone())
            .ok_or(XPathError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn unexpected(&self) -> XPathError {
        match self.tokens.get(self.pos) {
            Some((token, offset)) => XPathError::Unexpected {
                found: format!("{token:?}"),
                offset: *offset,
            },
            None => XPathError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), XPathError> {
        if self.peek() == Some(expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn peek_name(&self, name: &str) -> bool {
        matches!(self.peek(), Some(Token::Name(n)) if n == name)
    }

    fn xpath(&mut self) -> Result<XPath, XPathError> {
        let parsed = if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let steps = self.path()?;
            self.expect(&Token::RParen)?;
            let outer = self.predicates()?;
            XPath { steps, outer }
        } else {
            XPath {
                steps: self.path()?,
                outer: Vec::new(),
            }
        };
        if self.pos < self.tokens.len() {
            return Err(self.unexpected());
        }
        Ok(parsed)
    }

    fn path(&mut self) -> Result<Vec<Step>, XPathError> {
        let mut steps = Vec::new();
        while let Some(token) = self.peek() {
            let descendant = match token {
                Token::Slash => false,
                Token::DoubleSlash => true,
                _ => break,
            };
            self.pos += 1;
            let test = match self.next()? {
                Token::Star => NodeTest::Any,
                Token::Name(name) => {
                    if self.peek() == Some(&Token::LParen) {
                        return Err(XPathError::Unsupported(format!("{name}() node test")));
                    }
                    NodeTest::Name(name.to_ascii_lowercase())
                }
                _ => {
                    self.pos -= 1;
                    return Err(self.unexpected());
                }
            };
            let predicates = self.predicates()?;
            steps.push(Step {
                descendant,
                test,
                predicates,
            });
        }
        if steps.is_empty() {
            return Err(self.unexpected());
        }
        Ok(steps)
    }

    fn predicates(&mut self) -> Result<Vec<Expr>, XPathError> {
        let mut predicates = Vec::new();
        while self.peek() == Some(&Token::LBracket) {
            self.pos += 1;
            predicates.push(self.or_expr()?);
            self.expect(&Token::RBracket)?;
        }
        Ok(predicates)
    }

    fn or_expr(&mut self) -> Result<Expr, XPathError> {
        let mut left = self.and_expr()?;
        while self.peek_name("or") {
            self.pos += 1;
            let right = self.and_expr()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expr, XPathError> {
        let mut left = self.unary()?;
        while self.peek_name("and") {
            self.pos += 1;
            let right = self.unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, XPathError> {
        match self.peek() {
            Some(Token::Number(n)) => {
                let n = *n;
                self.pos += 1;
                Ok(Expr::Position(n))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let inner = self.or_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Name(name)) => match name.as_str() {
                "last" => {
                    self.pos += 1;
                    self.expect(&Token::LParen)?;
                    self.expect(&Token::RParen)?;
                    Ok(Expr::Last)
                }
                "not" => {
                    self.pos += 1;
                    self.expect(&Token::LParen)?;
                    let inner = self.or_expr()?;
                    self.expect(&Token::RParen)?;
                    Ok(Expr::Not(Box::new(inner)))
                }
                "contains" | "starts-with" => {
                    let contains = name == "contains";
                    self.pos += 1;
                    self.expect(&Token::LParen)?;
                    let operand = self.operand()?;
                    self.expect(&Token::Comma)?;
                    let literal = self.literal()?;
                    self.expect(&Token::RParen)?;
                    Ok(if contains {
                        Expr::Contains(operand, literal)
                    } else {
                        Expr::StartsWith(operand, literal)
                    })
                }
                _ => self.comparison(),
            },
            _ => self.comparison(),
        }
    }

    fn comparison(&mut self) -> Result<Expr, XPathError> {
        let operand = self.operand()?;
        match self.peek() {
            Some(Token::Eq) => {
                self.pos += 1;
                Ok(Expr::Equals(operand, self.literal()?))
            }
            Some(Token::NotEq) => {
                self.pos += 1;
                Ok(Expr::NotEquals(operand, self.literal()?))
            }
            _ => Ok(Expr::Exists(operand)),
        }
    }

    fn operand(&mut self) -> Result<Operand, XPathError> {
        match self.next()? {
            Token::At => match self.next()? {
                Token::Name(name) => Ok(Operand::Attr(name)),
                _ => {
                    self.pos -= 1;
                    Err(self.unexpected())
                }
            },
            Token::Dot => Ok(Operand::StringValue),
            Token::Name(name) if matches!(name.as_str(), "text" | "normalize-space" | "string") => {
                self.expect(&Token::LParen)?;
                if name != "text" && self.peek() == Some(&Token::Dot) {
                    self.pos += 1;
                }
                self.expect(&Token::RParen)?;
                Ok(match name.as_str() {
                    "text" => Operand::Text,
                    "normalize-space" => Operand::Normalized,
                    _ => Operand::StringValue,
                })
            }
            Token::Name(name) => Err(XPathError::Unsupported(name)),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn literal(&mut self) -> Result<String, XPathError> {
        match self.next()? {
            Token::Literal(value) => Ok(value),
            Token::Number(n) => Ok(n.to_string()),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Context<'a> {
    Document,
    Element(ElementRef<'a>),
}

impl XPath {
    /// Compile an expression
    pub fn parse(expression: &str) -> Result<Self, XPathError> {
        let tokens = tokenize(expression)?;
        Parser { tokens, pos: 0 }.xpath()
    }

    /// Evaluate against `document`, returning elements in document order
    #[must_use]
    pub fn evaluate<'a>(&self, document: &'a Document) -> Vec<ElementRef<'a>> {
        let mut contexts = vec![Context::Document];
        for step in &self.steps {
            let mut matched = Vec::new();
            for context in &contexts {
                for base in bases(document, *context, step.descendant) {
                    let candidates: Vec<ElementRef<'a>> = children(document, base)
                        .into_iter()
                        .filter(|el| step.test.matches(*el))
                        .collect();
                    matched.extend(filter(candidates, &step.predicates));
                }
            }
            contexts = document
                .in_document_order(matched)
                .into_iter()
                .map(Context::Element)
                .collect();
        }
        let elements = contexts
            .into_iter()
            .filter_map(|c| match c {
                Context::Element(el) => Some(el),
                Context::Document => None,
            })
            .collect();
        filter(elements, &self.outer)
    }
}

impl NodeTest {
    fn matches(&self, element: ElementRef<'_>) -> bool {
        match self {
            Self::Any => true,
            Self::Name(name) => dom::tag_name(element) == name,
        }
    }
}

fn bases<'a>(document: &'a Document, context: Context<'a>, descendant: bool) -> Vec<Context<'a>> {
    if !descendant {
        return vec![context];
    }
    match context {
        Context::Document => std::iter::once(Context::Document)
            .chain(document.elements().map(Context::Element))
            .collect(),
        Context::Element(el) => el
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(Context::Element)
            .collect(),
    }
}

fn children<'a>(document: &'a Document, context: Context<'a>) -> Vec<ElementRef<'a>> {
    match context {
        Context::Document => vec![document.root()],
        Context::Element(el) => dom::child_elements(el).collect(),
    }
}

fn filter<'a>(mut candidates: Vec<ElementRef<'a>>, predicates: &[Expr]) -> Vec<ElementRef<'a>> {
    for predicate in predicates {
        let size = candidates.len();
        candidates = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, el)| predicate.eval(*el, i + 1, size))
            .map(|(_, el)| el)
            .collect();
    }
    candidates
}

impl Operand {
    fn values(&self, element: ElementRef<'_>) -> Vec<String> {
        match self {
            Self::Attr(name) => dom::attr(element, name).map(str::to_string).into_iter().collect(),
            Self::Text => element
                .children()
                .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
                .collect(),
            Self::StringValue => vec![dom::text_content(element)],
            Self::Normalized => vec![normalize_text(&dom::text_content(element))],
        }
    }
}

impl Expr {
    fn eval(&self, element: ElementRef<'_>, position: usize, size: usize) -> bool {
        match self {
            Self::Or(a, b) => a.eval(element, position, size) || b.eval(element, position, size),
            Self::And(a, b) => a.eval(element, position, size) && b.eval(element, position, size),
            Self::Not(inner) => !inner.eval(element, position, size),
            Self::Position(n) => position == *n,
            Self::Last => position == size,
            Self::Exists(Operand::Attr(name)) => dom::attr(element, name).is_some(),
            Self::Exists(Operand::Text) => !Operand::Text.values(element).is_empty(),
            Self::Exists(operand) => operand.values(element).iter().any(|v| !v.is_empty()),
            Self::Equals(operand, literal) => operand.values(element).iter().any(|v| v == literal),
            Self::NotEquals(operand, literal) => {
                operand.values(element).iter().any(|v| v != literal)
            }
            Self::Contains(operand, literal) => operand
                .values(element)
                .iter()
                .any(|v| v.contains(literal.as_str())),
            Self::StartsWith(operand, literal) => operand
                .values(element)
                .iter()
                .any(|v| v.starts_with(literal.as_str())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <ul id="menu">
            <li class="item">Home</li>
            <li class="item active">Docs</li>
            <li class="item">  About   us </li>
          </ul>
          <ul id="other"><li>Solo</li></ul>
          <form><input name="q" type="search"><button type="submit">Go</button></form>
        </body></html>"#;

    fn eval(expr: &str) -> Vec<String> {
        let doc = Document::parse(PAGE);
        XPath::parse(expr)
            .unwrap()
            .evaluate(&doc)
            .into_iter()
            .map(|el| normalize_text(&dom::text_content(el)))
            .collect()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_rejects_relative_path() {
            assert!(XPath::parse("li").is_err());
        }

        #[test]
        fn test_rejects_unterminated_literal() {
            assert_eq!(
                XPath::parse("//li[@a='x]").unwrap_err(),
                XPathError::UnterminatedLiteral(8)
            );
        }

        #[test]
        fn test_rejects_axes_and_functions() {
            assert!(XPath::parse("//li/following-sibling::li").is_err());
            assert!(XPath::parse("//text()").is_err());
            assert!(XPath::parse("//li[count(a)]").is_err());
        }

        #[test]
        fn test_rejects_trailing_tokens() {
            assert!(XPath::parse("//li]").is_err());
            assert!(XPath::parse("//li[1").is_err());
        }
    }

    mod eval_tests {
        use super::*;

        #[test]
        fn test_descendant_name() {
            assert_eq!(eval("//li").len(), 4);
        }

        #[test]
        fn test_absolute_child_path() {
            assert_eq!(eval("/html/body/ul/li").len(), 4);
            assert!(eval("/body").is_empty());
        }

        #[test]
        fn test_position_is_per_parent() {
            assert_eq!(eval("//li[1]"), vec!["Home", "Solo"]);
        }

        #[test]
        fn test_parenthesized_position_is_global() {
            assert_eq!(eval("(//li)[2]"), vec!["Docs"]);
            assert_eq!(eval("(//li)[last()]"), vec!["Solo"]);
        }

        #[test]
        fn test_attribute_predicates() {
            assert_eq!(eval("//ul[@id='other']/li"), vec!["Solo"]);
            assert_eq!(eval("//li[contains(@class, 'active')]"), vec!["Docs"]);
            assert_eq!(eval("//input[@name]").len(), 1);
            assert_eq!(eval("//*[starts-with(@id, 'me')]").len(), 1);
        }

        #[test]
        fn test_text_predicates() {
            assert_eq!(eval("//li[text()='Home']"), vec!["Home"]);
            assert_eq!(eval("//li[normalize-space()='About us']"), vec!["About us"]);
            assert_eq!(eval("//button[.='Go']"), vec!["Go"]);
            assert_eq!(eval("//li[contains(text(), 'Doc')]"), vec!["Docs"]);
        }

        #[test]
        fn test_boolean_operators() {
            assert_eq!(eval("//li[@class='item' and text()='Home']"), vec!["Home"]);
            assert_eq!(eval("//li[text()='Home' or text()='Solo']").len(), 2);
            assert_eq!(eval("//li[not(@class)]"), vec!["Solo"]);
        }

        #[test]
        fn test_not_equals_and_string_value() {
            assert_eq!(eval("//li[@class!='item']"), vec!["Docs"]);
            assert_eq!(eval("//button[string()='Go']"), vec!["Go"]);
            assert_eq!(eval("//li[string(.)='Home']"), vec!["Home"]);
        }

        #[test]
        fn test_star_and_descendant_from_element() {
            assert_eq!(eval("//form//*").len(), 2);
            assert_eq!(eval("//ul[@id='menu']/*[last()]"), vec!["About us"]);
        }
    }
}
