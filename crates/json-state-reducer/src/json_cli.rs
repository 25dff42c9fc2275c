//! Core logic behind the `json-reduce` binary.
//!
//! ```text
//! json-reduce [--sentinel <char>] '<selector>' [of <marker>] <op> '<operand>' ...
//! ```
//!
//! The document is read from stdin; the result is written to stdout.

use serde_json::Value;
use thiserror::Error;

use crate::error::ReduceError;
use crate::operation::OperationKind;
use crate::reducer::Reducer;
use crate::types::ReducerOptions;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Reduce(#[from] ReduceError),
    #[error("{0}")]
    Usage(String),
}

/// One parsed command-line step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Of(String),
    Op(OperationKind, Value),
}

/// Parse `of <marker>` / `<op> <json>` pairs.
pub fn parse_steps(args: &[String]) -> Result<Vec<Step>, CliError> {
    let mut steps = Vec::new();
    let mut iter = args.iter();
    while let Some(word) = iter.next() {
        let arg = iter
            .next()
            .ok_or_else(|| CliError::Usage(format!("Missing argument after \"{word}\".")))?;
        if word == "of" {
            steps.push(Step::Of(arg.clone()));
            continue;
        }
        let kind = OperationKind::from_name(word)
            .ok_or_else(|| CliError::Usage(format!("Unknown operation: {word}")))?;
        steps.push(Step::Op(kind, serde_json::from_str(arg)?));
    }
    Ok(steps)
}

/// Split a leading `--sentinel <char>` off `args`.
pub fn parse_options(args: &[String]) -> Result<(ReducerOptions, &[String]), CliError> {
    match args {
        [flag, value, rest @ ..] if flag == "--sentinel" => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(sentinel), None) => Ok((ReducerOptions { sentinel }, rest)),
                _ => Err(CliError::Usage(
                    "Sentinel must be a single character.".to_string(),
                )),
            }
        }
        _ => Ok((ReducerOptions::default(), args)),
    }
}

/// Apply `steps` to the JSON document `doc` through `selector`, returning the
/// result as a JSON string.
pub fn reduce_document(
    doc: &str,
    selector: &str,
    steps: &[Step],
    options: ReducerOptions,
) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc)?;
    let reducer = Reducer::with_options(serde_json::from_str(selector)?, options)?;
    let mut builder = reducer.reduce(&doc);
    for step in steps {
        match step {
            Step::Of(marker) => builder.of(marker),
            Step::Op(kind, value) => builder.record(*kind, value.clone()),
        };
    }
    let result = builder.apply()?;
    Ok(serde_json::to_string(&result)?)
}

/// Entry point used by the binary: `args` excludes the program name.
pub fn run(doc: &str, args: &[String]) -> Result<String, CliError> {
    let (options, args) = parse_options(args)?;
    let (selector, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Usage("First argument must be a selector.".to_string()))?;
    let steps = parse_steps(rest)?;
    reduce_document(doc, selector, &steps, options)
}
