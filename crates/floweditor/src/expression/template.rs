//! Built-in engine for `=`-prefixed template expressions.
//!
//! A parameter value starting with `=` is a template: literal text with
//! `{{ ... }}` segments. A template made of exactly one segment evaluates to
//! that segment's raw value; otherwise the segments are rendered to text and
//! interpolated. Anything not starting with `=` is returned unchanged.
//!
//! Segments support `$json`, `$binary`, `$parameter`, `$node["Name"]`
//! (with `.json`, `.binary`, `.parameter`, `.runIndex`), `$runIndex`,
//! `$itemIndex` and `$workflow`, member access via `.key`, `["key"]` or
//! `[index]`, literals, parentheses and `+`.

use super::{ExpressionContext, ExpressionEngine};
use flowcore::{type_name, ExpressionError, Item, MAIN_CONNECTION};
use logos::Logos;
use serde_json::{Map, Number, Value};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"\$[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice()[1..].to_string())]
    Variable(String),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"[0-9]+", priority = 3, callback = |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    Str(String),

    #[token(".")]
    Dot,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
enum Key {
    Name(String),
    Index(usize),
}

impl Key {
    fn label(&self) -> String {
        match self {
            Key::Name(name) => name.clone(),
            Key::Index(index) => index.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Literal(Value),
    Variable(String),
    Member(Box<Expr>, Key),
    Add(Box<Expr>, Box<Expr>),
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Result<Self, ExpressionError> {
        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(source);
        while let Some(token) = lexer.next() {
            match token {
                Ok(token) => tokens.push(token),
                Err(()) => {
                    return Err(syntax(source, format!("unexpected '{}'", lexer.slice())));
                }
            }
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    fn parse(mut self) -> Result<Expr, ExpressionError> {
        let expr = self.sum()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(syntax(self.source, format!("unexpected {:?}", token))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), ExpressionError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(syntax(self.source, format!("expected {:?}, found {:?}", expected, token))),
            None => Err(syntax(self.source, format!("expected {:?}", expected))),
        }
    }

    fn sum(&mut self) -> Result<Expr, ExpressionError> {
        let mut left = self.postfix()?;
        while self.peek() == Some(&Token::Plus) {
            self.advance();
            let right = self.postfix()?;
            left = Expr::Add(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn postfix(&mut self) -> Result<Expr, ExpressionError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.advance();
                    match self.advance() {
                        Some(Token::Ident(name)) => expr = Expr::Member(Box::new(expr), Key::Name(name)),
                        _ => return Err(syntax(self.source, "expected a property name after '.'")),
                    }
                }
                Some(Token::LBracket) => {
                    self.advance();
                    let key = match self.advance() {
                        Some(Token::Str(name)) => Key::Name(name),
                        Some(Token::Int(index)) if index >= 0 => Key::Index(index as usize),
                        _ => return Err(syntax(self.source, "expected a string or index inside '[]'")),
                    };
                    self.expect(Token::RBracket)?;
                    expr = Expr::Member(Box::new(expr), key);
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        match self.advance() {
            Some(Token::Variable(name)) => Ok(Expr::Variable(name)),
            Some(Token::Str(s)) => Ok(Expr::Literal(Value::String(s))),
            Some(Token::Int(n)) => Ok(Expr::Literal(Value::from(n))),
            Some(Token::Float(f)) => Ok(Expr::Literal(number(f))),
            Some(Token::Ident(word)) => match word.as_str() {
                "true" => Ok(Expr::Literal(Value::Bool(true))),
                "false" => Ok(Expr::Literal(Value::Bool(false))),
                "null" | "undefined" => Ok(Expr::Literal(Value::Null)),
                _ => Err(ExpressionError::UnknownVariable(word)),
            },
            Some(Token::LParen) => {
                let inner = self.sum()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(syntax(self.source, format!("unexpected {:?}", token))),
            None => Err(syntax(self.source, "unexpected end of expression")),
        }
    }
}

fn syntax(expression: &str, message: impl Into<String>) -> ExpressionError {
    ExpressionError::Syntax {
        expression: expression.to_string(),
        message: message.into(),
    }
}

fn number(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Text as interpolated into a template
fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn add_values(left: Value, right: Value) -> Value {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        if let Some(sum) = l.checked_add(r) {
            return Value::from(sum);
        }
    }
    if let (Value::Number(l), Value::Number(r)) = (&left, &right) {
        if let (Some(l), Some(r)) = (l.as_f64(), r.as_f64()) {
            return number(l + r);
        }
    }
    Value::String(format!("{}{}", render(&left), render(&right)))
}

fn access(value: Value, key: &Key) -> Result<Value, ExpressionError> {
    match (value, key) {
        (Value::Object(mut map), Key::Name(name)) => Ok(map.remove(name).unwrap_or(Value::Null)),
        (Value::Object(mut map), Key::Index(index)) => {
            Ok(map.remove(&index.to_string()).unwrap_or(Value::Null))
        }
        (Value::Array(mut items), Key::Index(index)) if *index < items.len() => {
            Ok(items.swap_remove(*index))
        }
        (Value::Array(_), Key::Index(_)) => Ok(Value::Null),
        (Value::Array(items), Key::Name(name)) if name == "length" => Ok(Value::from(items.len())),
        (Value::String(s), Key::Name(name)) if name == "length" => Ok(Value::from(s.chars().count())),
        (other, key) => Err(ExpressionError::InvalidAccess {
            key: key.label(),
            actual: type_name(&other).to_string(),
        }),
    }
}

enum Segment<'t> {
    Text(&'t str),
    Code(&'t str),
}

fn split_template(template: &str) -> Result<Vec<Segment<'_>>, ExpressionError> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| syntax(template, "missing closing '}}'"))?;
        segments.push(Segment::Code(after[..close].trim()));
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }

    Ok(segments)
}

/// The default [`ExpressionEngine`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateEngine;

impl TemplateEngine {
    pub fn new() -> Self {
        Self
    }

    fn eval_code(&self, code: &str, ctx: &ExpressionContext<'_>) -> Result<Value, ExpressionError> {
        let expr = Parser::new(code)?.parse()?;
        Evaluator { source: code, ctx }.eval(&expr)
    }
}

impl ExpressionEngine for TemplateEngine {
    fn evaluate(&self, expression: &str, ctx: &ExpressionContext<'_>) -> Result<Value, ExpressionError> {
        let Some(template) = expression.strip_prefix('=') else {
            return Ok(Value::String(expression.to_string()));
        };

        let segments = split_template(template)?;
        if let [Segment::Code(code)] = segments.as_slice() {
            return self.eval_code(code, ctx);
        }

        let mut out = String::new();
        for segment in &segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Code(code) => out.push_str(&render(&self.eval_code(code, ctx)?)),
            }
        }
        Ok(Value::String(out))
    }
}

struct Evaluator<'c, 'a> {
    source: &'c str,
    ctx: &'c ExpressionContext<'a>,
}

impl Evaluator<'_, '_> {
    fn eval(&self, expr: &Expr) -> Result<Value, ExpressionError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Variable(name) => self.variable(name),
            Expr::Add(left, right) => Ok(add_values(self.eval(left)?, self.eval(right)?)),
            Expr::Member(base, key) => match base.as_ref() {
                Expr::Variable(name) if name == "node" => self.node_proxy(&key.label()),
                Expr::Member(inner, node_key) if is_node_root(inner) => {
                    self.node_field(&node_key.label(), &key.label())
                }
                _ => access(self.eval(base)?, key),
            },
        }
    }

    fn current_item(&self) -> Option<&Item> {
        self.ctx.connection_input_data.get(self.ctx.item_index)
    }

    fn variable(&self, name: &str) -> Result<Value, ExpressionError> {
        match name {
            "json" => Ok(Value::Object(
                self.current_item().map(|item| item.json.clone()).unwrap_or_default(),
            )),
            "binary" => Ok(Value::Object(
                self.current_item()
                    .and_then(|item| item.binary.clone())
                    .unwrap_or_default(),
            )),
            "parameter" => {
                let node = self
                    .ctx
                    .workflow
                    .node(self.ctx.active_node)
                    .ok_or_else(|| ExpressionError::UnknownNode(self.ctx.active_node.to_string()))?;
                Ok(Value::Object(node.parameters.as_ref().clone()))
            }
            "runIndex" => Ok(Value::from(self.ctx.run_index)),
            "itemIndex" => Ok(Value::from(self.ctx.item_index)),
            "workflow" => {
                let mut workflow = Map::new();
                workflow.insert(
                    "id".to_string(),
                    self.ctx.workflow.id().map_or(Value::Null, Value::from),
                );
                Ok(Value::Object(workflow))
            }
            "node" => Err(syntax(self.source, "$node must be followed by a node name")),
            other => Err(ExpressionError::UnknownVariable(format!("${}", other))),
        }
    }

    /// Output item of another node at the current run and item index
    fn node_item(&self, node_name: &str) -> Result<&Item, ExpressionError> {
        self.ctx
            .run_execution_data
            .run_data()
            .get(node_name)
            .and_then(|runs| runs.get(self.ctx.run_index))
            .and_then(|record| record.batch(MAIN_CONNECTION, 0))
            .and_then(|batch| batch.get(self.ctx.item_index))
            .ok_or_else(|| ExpressionError::NoNodeData(node_name.to_string()))
    }

    fn node_field(&self, node_name: &str, field: &str) -> Result<Value, ExpressionError> {
        let node = self
            .ctx
            .workflow
            .node(node_name)
            .ok_or_else(|| ExpressionError::UnknownNode(node_name.to_string()))?;

        match field {
            "parameter" => Ok(Value::Object(node.parameters.as_ref().clone())),
            "runIndex" => Ok(Value::from(self.ctx.run_index)),
            "json" => Ok(Value::Object(self.node_item(node_name)?.json.clone())),
            "binary" => Ok(Value::Object(
                self.node_item(node_name)?.binary.clone().unwrap_or_default(),
            )),
            other => Err(ExpressionError::InvalidAccess {
                key: other.to_string(),
                actual: "node".to_string(),
            }),
        }
    }

    fn node_proxy(&self, node_name: &str) -> Result<Value, ExpressionError> {
        let mut proxy = Map::new();
        proxy.insert("parameter".to_string(), self.node_field(node_name, "parameter")?);
        proxy.insert("runIndex".to_string(), Value::from(self.ctx.run_index));
        if let Ok(item) = self.node_item(node_name) {
            proxy.insert("json".to_string(), Value::Object(item.json.clone()));
        }
        Ok(Value::Object(proxy))
    }
}

fn is_node_root(expr: &Expr) -> bool {
    matches!(expr, Expr::Variable(name) if name == "node")
}
