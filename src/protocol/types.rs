//! Wire Response Types
//!
//! This module defines the response vocabulary of the calcline protocol.
//! The protocol is plain UTF-8 text over TCP: every client request is one
//! newline-terminated line, and every request produces exactly one
//! newline-terminated response line.
//!
//! ## Response Lines
//!
//! Arithmetic success: `Результат: <value>`
//! Request error:      `Помилка: <reason>`
//! Unrecognized input: `Сервер отримав: <original line>`
//! Quit acknowledge:   `З'єднання завершено.`
//!
//! The error and acknowledgement texts are part of the wire contract and are
//! intentionally localized; clients match on them verbatim.
//!
//! ## Numeric Format
//!
//! `<value>` is rendered with Rust's default `f64` formatting: the shortest
//! decimal that round-trips, so `5` rather than `5.0`, and `inf`/`NaN` for
//! non-finite results. This is the canonical format for the protocol; tests
//! pin it byte-for-byte.

use std::fmt;

/// The line terminator used on the wire.
pub const LINE_TERMINATOR: char = '\n';

/// Per-request failures that are absorbed into an error line.
///
/// Each variant renders as the exact localized wire text. The session stays
/// open after any of these; they never terminate a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// A binary operation received at least one non-numeric operand.
    #[error("Помилка: аргументи повинні бути числами.")]
    OperandsNotNumeric,

    /// A unary operation received a non-numeric operand.
    #[error("Помилка: аргумент повинен бути числом.")]
    OperandNotNumeric,

    /// `div` with a zero divisor; the division is never attempted.
    #[error("Помилка: ділення на нуль.")]
    DivisionByZero,

    /// `sqrt` of a negative operand.
    #[error("Помилка: не можна брати корінь з від'ємного числа.")]
    NegativeSquareRoot,
}

/// One response line, produced for exactly one request line.
///
/// `Display` renders the line without its terminator; [`Response::to_line`]
/// appends it for the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Successful arithmetic result.
    /// Format: `Результат: <value>`
    Result(f64),

    /// A recoverable per-request error, rendered as its localized line.
    Error(EvalError),

    /// Input that matched no command shape, echoed back.
    /// Format: `Сервер отримав: <text>`
    Echo(String),

    /// Acknowledgement written immediately before closing on `quit`.
    Goodbye,
}

impl Response {
    /// Creates an echo response from the original trimmed line.
    pub fn echo(text: impl Into<String>) -> Self {
        Response::Echo(text.into())
    }

    /// Returns true if this response reports a request error.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Renders the response as one wire line, including the terminator.
    pub fn to_line(&self) -> String {
        let mut line = self.to_string();
        line.push(LINE_TERMINATOR);
        line
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Result(value) => write!(f, "Результат: {}", value),
            Response::Error(err) => write!(f, "{}", err),
            Response::Echo(text) => write!(f, "Сервер отримав: {}", text),
            Response::Goodbye => write!(f, "З'єднання завершено."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_renders_integral_value_without_fraction() {
        assert_eq!(Response::Result(5.0).to_string(), "Результат: 5");
        assert_eq!(Response::Result(-3.0).to_string(), "Результат: -3");
    }

    #[test]
    fn test_result_renders_shortest_roundtrip_decimal() {
        assert_eq!(Response::Result(3.5).to_string(), "Результат: 3.5");
        assert_eq!(
            Response::Result(1.0 / 3.0).to_string(),
            "Результат: 0.3333333333333333"
        );
    }

    #[test]
    fn test_result_renders_non_finite_values() {
        assert_eq!(
            Response::Result(f64::INFINITY).to_string(),
            "Результат: inf"
        );
        assert_eq!(
            Response::Result(f64::NEG_INFINITY).to_string(),
            "Результат: -inf"
        );
        assert_eq!(Response::Result(f64::NAN).to_string(), "Результат: NaN");
    }

    #[test]
    fn test_error_lines_are_exact() {
        assert_eq!(
            Response::Error(EvalError::OperandsNotNumeric).to_string(),
            "Помилка: аргументи повинні бути числами."
        );
        assert_eq!(
            Response::Error(EvalError::OperandNotNumeric).to_string(),
            "Помилка: аргумент повинен бути числом."
        );
        assert_eq!(
            Response::Error(EvalError::DivisionByZero).to_string(),
            "Помилка: ділення на нуль."
        );
        assert_eq!(
            Response::Error(EvalError::NegativeSquareRoot).to_string(),
            "Помилка: не можна брати корінь з від'ємного числа."
        );
    }

    #[test]
    fn test_echo_carries_original_text() {
        assert_eq!(
            Response::echo("hello world foo bar").to_string(),
            "Сервер отримав: hello world foo bar"
        );
        assert_eq!(Response::echo("").to_string(), "Сервер отримав: ");
    }

    #[test]
    fn test_goodbye_line() {
        assert_eq!(Response::Goodbye.to_string(), "З'єднання завершено.");
    }

    #[test]
    fn test_to_line_appends_terminator() {
        assert_eq!(Response::Result(8.0).to_line(), "Результат: 8\n");
        assert_eq!(Response::Goodbye.to_line(), "З'єднання завершено.\n");
    }

    #[test]
    fn test_is_error() {
        assert!(Response::Error(EvalError::DivisionByZero).is_error());
        assert!(!Response::Result(1.0).is_error());
        assert!(!Response::Goodbye.is_error());
    }
}
