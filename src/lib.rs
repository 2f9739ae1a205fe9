#[macro_use]
extern crate log;

use ordermap::OrderMap;
use thiserror::Error;

mod display;
pub mod parser;

pub use display::Flattenable;
pub use parser::{tokenize, tokenize_lines, Program, Token};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErr {
    #[error("stack underflow")]
    StackUnderflow,

    #[error("divided by zero")]
    DivisionByZero,

    #[error("can't understand {0}")]
    UnknownToken(String),

    #[error("malformed definition: {0}")]
    MalformedDefinition(Malformed),

    #[error("integer overflow")]
    Overflow,

    #[error("more than {0} expansions")]
    ExpansionLimit(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Malformed {
    /// `;` with no definition open.
    StraySemicolon,

    /// Input ended before the closing `;`.
    Unterminated { name: Option<String> },
}

/// Where the evaluator is in the `: name ... ;` state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AwaitingName,
    Accumulating { name: String, body: Program },
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    /// Maximum word expansions per token fed to `eval_token`.
    pub max_expansions: Option<usize>,
}

pub struct Env {
    bindings: OrderMap<String, Program>,
    data: Vec<i32>,
    code: Vec<Token>,
    mode: Mode,
    limits: Limits,
}

impl Default for Env {
    fn default() -> Self {
        Env::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Env::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Env {
            bindings: OrderMap::new(),
            data: Vec::new(),
            code: Vec::new(),
            mode: Mode::Normal,
            limits,
        }
    }

    /// Feed one token. Word bodies are expanded onto the pending code
    /// list and drained here; dispatch never recurses.
    pub fn eval_token(&mut self, token: &str) -> Result<(), EvalErr> {
        self.code.push(token.to_owned());
        let mut expansions = 0;

        while let Some(word) = self.code.pop() {
            let result = match self.step(word) {
                Ok(Step::Done) => Ok(()),

                Ok(Step::Expand(body)) => {
                    expansions += 1;
                    match self.limits.max_expansions {
                        Some(max) if expansions > max => {
                            Err(EvalErr::ExpansionLimit(max))
                        },
                        _ => {
                            self.code.extend(body.into_iter().rev());
                            Ok(())
                        },
                    }
                },

                Err(err) => Err(err),
            };

            if let Err(err) = result {
                debug!("evaluation failed: {}", err);
                self.reset();
                return Err(err);
            }
        }

        Ok(())
    }

    pub fn eval_line(&mut self, line: &str) -> Result<(), EvalErr> {
        for token in parser::tokenize(line) {
            self.eval_token(&token)?;
        }
        Ok(())
    }

    /// Check that no definition was left open at the end of input.
    pub fn finish(&self) -> Result<(), EvalErr> {
        let name = match &self.mode {
            Mode::Normal => return Ok(()),
            Mode::AwaitingName => None,
            Mode::Accumulating { name, .. } => Some(name.clone()),
        };

        Err(EvalErr::MalformedDefinition(Malformed::Unterminated { name }))
    }

    pub fn view(&self) -> &[i32] {
        &self.data
    }

    pub fn render(&self) -> String {
        self.data.flatten(" ")
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// User words in the order they were first defined.
    pub fn words(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.bindings.iter().map(|(name, body)| (name.as_str(), body.as_slice()))
    }

    fn reset(&mut self) {
        self.code.clear();
        self.data.clear();
        self.mode = Mode::Normal;
    }

    fn step(&mut self, word: Token) -> Result<Step, EvalErr> {
        trace!("{:?} <- {}", self.data, word);

        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::AwaitingName => {
                self.mode = Mode::Accumulating {
                    name: word,
                    body: Vec::new(),
                };
                return Ok(Step::Done);
            },

            Mode::Accumulating { name, body } if word == ";" => {
                self.define(name, body);
                return Ok(Step::Done);
            },

            Mode::Accumulating { name, mut body } => {
                body.push(word);
                self.mode = Mode::Accumulating { name, body };
                return Ok(Step::Done);
            },

            Mode::Normal => (),
        }

        if let Some(body) = self.bindings.get(&word) {
            debug!("expanding {} into {}", word, body.flatten(" "));
            return Ok(Step::Expand(body.clone()));
        }

        if let Ok(int) = word.parse::<i32>() {
            self.push(int);
            return Ok(Step::Done);
        }

        self.eval(&word)?;
        Ok(Step::Done)
    }

    fn eval(&mut self, name: &str) -> Result<(), EvalErr> {
        match name {
            "+" => self.int_binop(|x, y| x.checked_add(y).ok_or(EvalErr::Overflow))?,
            "-" => self.int_binop(|x, y| x.checked_sub(y).ok_or(EvalErr::Overflow))?,
            "*" => self.int_binop(|x, y| x.checked_mul(y).ok_or(EvalErr::Overflow))?,
            "/" => self.int_binop(|x, y| {
                if y == 0 {
                    Err(EvalErr::DivisionByZero)
                } else {
                    x.checked_div(y).ok_or(EvalErr::Overflow)
                }
            })?,

            "dup" => {
                let top = self.peek(0)?;
                self.push(top);
            },

            "drop" => { let _ = self.pop()?; },

            "swap" => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(b);
                self.push(a);
            },

            "over" => {
                let second = self.peek(1)?;
                self.push(second);
            },

            ":" => self.mode = Mode::AwaitingName,

            ";" => {
                return Err(EvalErr::MalformedDefinition(Malformed::StraySemicolon));
            },

            other => return Err(EvalErr::UnknownToken(other.to_owned())),
        }

        Ok(())
    }

    fn define(&mut self, name: String, body: Program) {
        debug!("defining {} as {}", name, body.flatten(" "));
        if let Some(old) = self.bindings.insert(name, body) {
            warn!("redefined a word, dropping old body {}", old.flatten(" "));
        }
    }

    /// Pops the right-hand operand first, so `a b -` computes `a - b`.
    fn int_binop<F>(&mut self, op: F) -> Result<(), EvalErr>
        where F: FnOnce(i32, i32) -> Result<i32, EvalErr>
    {
        let rhs = self.pop()?;
        let lhs = self.pop()?;
        self.push(op(lhs, rhs)?);
        Ok(())
    }

    fn push(&mut self, int: i32) {
        self.data.push(int);
    }

    fn pop(&mut self) -> Result<i32, EvalErr> {
        self.data.pop().ok_or(EvalErr::StackUnderflow)
    }

    fn peek(&self, depth: usize) -> Result<i32, EvalErr> {
        self.data.iter().rev().nth(depth).copied().ok_or(EvalErr::StackUnderflow)
    }
}

enum Step {
    Done,
    Expand(Program),
}

/// Evaluate every line in a fresh session and render the final stack.
pub fn evaluate<I, S>(lines: I) -> Result<String, EvalErr>
    where I: IntoIterator<Item = S>, S: AsRef<str>
{
    evaluate_with(lines, Limits::default())
}

pub fn evaluate_with<I, S>(lines: I, limits: Limits) -> Result<String, EvalErr>
    where I: IntoIterator<Item = S>, S: AsRef<str>
{
    let mut env = Env::with_limits(limits);
    for line in lines {
        env.eval_line(line.as_ref())?;
    }
    env.finish()?;
    Ok(env.render())
}
