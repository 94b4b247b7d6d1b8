//! Command Evaluator
//!
//! This module turns one trimmed request line into a [`Command`] and
//! evaluates it to a [`Response`]. Both steps are pure: no I/O, no session
//! state, the same line always produces the same response.
//!
//! ## Grammar
//!
//! Requests are tokenized on ASCII whitespace; verbs are case-insensitive:
//!
//! - `add|sub|mul|div|pow <num> <num>` - binary arithmetic
//! - `sqrt <num>` - square root
//! - `quit` - close the session after an acknowledgement
//! - anything else - echoed back verbatim
//!
//! The verb is recognized before operands are parsed, so an unrecognized
//! verb with two or three tokens is echoed rather than reported as a bad
//! operand. A recognized verb with unparseable operands is [`Command::Malformed`]
//! and evaluates to the matching error line.
//!
//! ## Example
//!
//! ```
//! use calcline::commands::evaluate;
//!
//! assert_eq!(evaluate("add 2 3").to_string(), "Результат: 5");
//! assert_eq!(evaluate("div 10 0").to_string(), "Помилка: ділення на нуль.");
//! assert_eq!(evaluate("hello").to_string(), "Сервер отримав: hello");
//! ```

use crate::protocol::{EvalError, Response};

/// A binary arithmetic operation: `<verb> <a> <b>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Maps a verb token to its operation, case-insensitively.
    fn from_verb(verb: &str) -> Option<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "add" => Some(BinaryOp::Add),
            "sub" => Some(BinaryOp::Sub),
            "mul" => Some(BinaryOp::Mul),
            "div" => Some(BinaryOp::Div),
            "pow" => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    /// Applies the operation to its operands.
    ///
    /// `div` refuses a zero divisor before dividing; `pow` is plain
    /// `f64::powf`, so fractional and negative exponents follow IEEE 754
    /// (a negative base with a fractional exponent yields `NaN`).
    fn apply(self, a: f64, b: f64) -> Response {
        match self {
            BinaryOp::Add => Response::Result(a + b),
            BinaryOp::Sub => Response::Result(a - b),
            BinaryOp::Mul => Response::Result(a * b),
            BinaryOp::Div => {
                if b == 0.0 {
                    Response::Error(EvalError::DivisionByZero)
                } else {
                    Response::Result(a / b)
                }
            }
            BinaryOp::Pow => Response::Result(a.powf(b)),
        }
    }
}

/// A unary arithmetic operation: `<verb> <x>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Sqrt,
}

impl UnaryOp {
    fn from_verb(verb: &str) -> Option<Self> {
        match verb.to_ascii_lowercase().as_str() {
            "sqrt" => Some(UnaryOp::Sqrt),
            _ => None,
        }
    }

    /// Applies the operation; `sqrt` rejects negative operands
    /// (negative zero passes).
    fn apply(self, x: f64) -> Response {
        match self {
            UnaryOp::Sqrt => {
                if x < 0.0 {
                    Response::Error(EvalError::NegativeSquareRoot)
                } else {
                    Response::Result(x.sqrt())
                }
            }
        }
    }
}

/// The parsed intent of one trimmed request line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A recognized binary verb with two numeric operands.
    Binary(BinaryOp, f64, f64),

    /// A recognized unary verb with one numeric operand.
    Unary(UnaryOp, f64),

    /// `quit`: acknowledge and terminate the session.
    Quit,

    /// Input matching no command shape; carries the original trimmed line.
    Echo(String),

    /// A recognized verb whose operands failed to parse as numbers.
    Malformed(EvalError),
}

impl Command {
    /// Parses one trimmed request line into a command.
    ///
    /// Never fails: lines that match no command shape become [`Command::Echo`].
    pub fn parse(line: &str) -> Command {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if let [verb, a, b] = tokens.as_slice() {
            if let Some(op) = BinaryOp::from_verb(verb) {
                return match (a.parse::<f64>(), b.parse::<f64>()) {
                    (Ok(a), Ok(b)) => Command::Binary(op, a, b),
                    _ => Command::Malformed(EvalError::OperandsNotNumeric),
                };
            }
        }

        if let [verb, x] = tokens.as_slice() {
            if let Some(op) = UnaryOp::from_verb(verb) {
                return match x.parse::<f64>() {
                    Ok(x) => Command::Unary(op, x),
                    Err(_) => Command::Malformed(EvalError::OperandNotNumeric),
                };
            }
        }

        if line.eq_ignore_ascii_case("quit") {
            return Command::Quit;
        }

        Command::Echo(line.to_string())
    }

    /// Evaluates the command to its response line.
    pub fn evaluate(&self) -> Response {
        match self {
            Command::Binary(op, a, b) => op.apply(*a, *b),
            Command::Unary(op, x) => op.apply(*x),
            Command::Quit => Response::Goodbye,
            Command::Echo(text) => Response::echo(text.clone()),
            Command::Malformed(err) => Response::Error(*err),
        }
    }

    /// Returns true if this command terminates the session.
    pub fn is_quit(&self) -> bool {
        matches!(self, Command::Quit)
    }
}

/// Parses and evaluates one trimmed request line.
///
/// This is the whole request path minus I/O; sessions call it once per line.
pub fn evaluate(line: &str) -> Response {
    Command::parse(line).evaluate()
}
