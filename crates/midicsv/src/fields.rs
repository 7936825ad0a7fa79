//! Field tokenizer using winnow.
//!
//! Fields are comma separated. Whitespace after a separator is skipped and
//! unquoted fields lose their trailing whitespace. Quoted fields keep their
//! quotes verbatim so that string parameters serialize back unchanged.

use winnow::ascii::space0;
use winnow::combinator::{alt, cut_err, eof, peek, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::{none_of, take_till};

use crate::error::RecordError;

type PResult<T> = winnow::ModalResult<T>;

/// Split one `midicsv` line into its raw fields.
pub fn split_fields(line: &str) -> Result<Vec<String>, RecordError> {
    let fields: Vec<&str> = separated(1.., field, ',')
        .parse(line)
        .map_err(|e| RecordError::UnterminatedQuote {
            column: quote_column(line, e.offset()),
        })?;

    Ok(fields.into_iter().map(str::to_string).collect())
}

fn field<'s>(input: &mut &'s str) -> PResult<&'s str> {
    preceded(space0, alt((terminated(quoted, end_of_field), bare))).parse_next(input)
}

fn end_of_field(input: &mut &str) -> PResult<()> {
    (space0, peek(alt((",".void(), eof.void())))).void().parse_next(input)
}

/// A `"..."` string where `""` stands for an embedded quote.
fn quoted<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (
        '"',
        cut_err((
            repeat::<_, _, (), _, _>(0.., alt(("\"\"".void(), none_of('"').void()))),
            '"',
        )),
    )
        .take()
        .parse_next(input)
}

fn bare<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_till(0.., ',').map(str::trim_end).parse_next(input)
}

/// 1-based column of the opening quote that was never closed.
fn quote_column(line: &str, error_offset: usize) -> usize {
    line[..error_offset.min(line.len())]
        .rfind('"')
        .map(|pos| pos + 1)
        .unwrap_or(error_offset + 1)
}
