//! CSV interchange format
//!
//! Export writes a bare header line followed by one fully-quoted record per
//! expense. Import is line oriented: every non-blank line after the header is
//! scanned on its own, and a row that cannot become a valid expense is dropped
//! without affecting the rest of the file.

use std::io::Write;

use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Expense;
use crate::validation::{accept, RawAmount, RawExpense};

/// Header line of the interchange format
pub const HEADER: &str = "id,date,amount,category,note";

/// Number of fields in a record
pub const FIELD_COUNT: usize = 5;

/// A row that was skipped during decoding
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRow {
    /// 1-based line number in the input text
    pub line: usize,
    /// Why the row was skipped
    pub reason: String,
}

/// Outcome of decoding an interchange text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    /// Valid expenses in file order
    pub expenses: Vec<Expense>,
    /// Rows that were skipped
    pub dropped: Vec<DroppedRow>,
}

/// Serialize expenses to interchange text
///
/// Records are separated by `\n`; there is no trailing newline.
pub fn to_text(expenses: &[Expense]) -> LedgerResult<String> {
    let mut writer = ::csv::WriterBuilder::new()
        .quote_style(::csv::QuoteStyle::Always)
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for expense in expenses {
        let date = expense.date_text();
        let amount = expense.amount.to_string();
        writer
            .write_record([
                expense.id.as_str(),
                date.as_str(),
                amount.as_str(),
                expense.category.as_str(),
                expense.note.as_str(),
            ])
            .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    let body = String::from_utf8(body).map_err(|e| LedgerError::Export(e.to_string()))?;

    let mut text = String::with_capacity(HEADER.len() + 1 + body.len());
    text.push_str(HEADER);
    if !body.is_empty() {
        text.push('\n');
        text.push_str(body.trim_end_matches('\n'));
    }
    Ok(text)
}

/// Write interchange text for `expenses` to `writer`
pub fn write_text<W: Write>(expenses: &[Expense], writer: &mut W) -> LedgerResult<()> {
    let text = to_text(expenses)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Parse interchange text into expenses, silently skipping bad rows
pub fn from_text(text: &str) -> Vec<Expense> {
    decode(text).expenses
}

/// Parse interchange text, reporting which rows were skipped and why
///
/// The first non-blank line is the header and is never validated.
pub fn decode(text: &str) -> Decoded {
    let mut decoded = Decoded::default();

    let rows = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .skip(1);

    for (idx, line) in rows {
        let line_no = idx + 1;
        match decode_row(line) {
            Ok(expense) => decoded.expenses.push(expense),
            Err(reason) => {
                debug!(line = line_no, %reason, "Dropping interchange row");
                decoded.dropped.push(DroppedRow {
                    line: line_no,
                    reason,
                });
            }
        }
    }

    decoded
}

fn decode_row(line: &str) -> Result<Expense, String> {
    let fields = split_fields(line);
    if fields.len() < FIELD_COUNT {
        return Err(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        ));
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let raw = RawExpense {
        id: Some(next()),
        date: Some(next()),
        amount: Some(RawAmount::Text(next())),
        category: Some(next()),
        note: Some(next()),
    };

    accept(raw).map_err(|e| e.to_string())
}

/// Split one line into fields
///
/// A `"` toggles quoted mode; inside quotes `""` is a literal quote. A comma
/// separates fields only outside quotes. Everything else is kept verbatim.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut inside = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if inside && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => inside = !inside,
            ',' if !inside => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}
