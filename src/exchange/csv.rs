//! Minimal typed CSV reader/writer
//!
//! A quoted field is always text. An unquoted field that parses as a finite
//! number is a number. Blank lines separate sheets.

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

pub type Row = Vec<Cell>;
pub type Sheet = Vec<Row>;
/// A row paired with the 1-based file line it starts on
pub type NumberedRow = (usize, Row);

/// Escape a text field: always quoted so it reads back as text
fn escape_text(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Text(s) => escape_text(s),
        // whole numbers keep one decimal, anything else is written in full
        Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{:.1}", n),
        Cell::Number(n) => n.to_string(),
    }
}

/// Serialize sheets, separated by a blank line
pub fn write_sheets(sheets: &[Sheet]) -> String {
    let mut out = String::new();
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for row in sheet {
            let line: Vec<String> = row.iter().map(format_cell).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
    }
    out
}

/// Parse CSV text into sheets
///
/// # Errors
/// Returns a message with the 1-based line number for an unterminated quote
/// or for garbage after a closing quote.
pub fn parse_sheets(input: &str) -> Result<Vec<Sheet>, String> {
    let sheets = parse_numbered_sheets(input)?;
    Ok(sheets
        .into_iter()
        .map(|sheet| sheet.into_iter().map(|(_, row)| row).collect())
        .collect())
}

/// Parse CSV text into sheets, keeping the file line of every row
pub fn parse_numbered_sheets(input: &str) -> Result<Vec<Vec<NumberedRow>>, String> {
    let mut sheets = Vec::new();
    let mut current: Vec<NumberedRow> = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1usize;

    while chars.peek().is_some() {
        let start_line = line;
        let mut row: Row = Vec::new();
        let mut blank = true;

        loop {
            let mut quoted = false;
            let mut field = String::new();

            if chars.peek() == Some(&'"') {
                chars.next();
                quoted = true;
                blank = false;
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            field.push('"');
                        }
                        Some('"') => break,
                        Some(c) => {
                            if c == '\n' {
                                line += 1;
                            }
                            field.push(c);
                        }
                        None => return Err(format!("line {}: unterminated quoted field", line)),
                    }
                }
            }

            while let Some(&c) = chars.peek() {
                if c == ',' || c == '\n' || c == '\r' {
                    break;
                }
                chars.next();
                if quoted {
                    if !c.is_whitespace() {
                        return Err(format!(
                            "line {}: unexpected character after quoted field",
                            line
                        ));
                    }
                    continue;
                }
                field.push(c);
            }

            let cell = if quoted {
                Cell::Text(field)
            } else {
                let trimmed = field.trim();
                if !trimmed.is_empty() {
                    blank = false;
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Cell::Number(n),
                    _ if trimmed.is_empty() => Cell::Empty,
                    _ => Cell::Text(trimmed.to_string()),
                }
            };
            row.push(cell);

            match chars.next() {
                Some(',') => {
                    blank = false;
                    continue;
                }
                Some('\r') => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    break;
                }
                _ => break,
            }
        }
        line += 1;

        if blank {
            if !current.is_empty() {
                sheets.push(std::mem::take(&mut current));
            }
        } else {
            current.push((start_line, row));
        }
    }

    if !current.is_empty() {
        sheets.push(current);
    }
    Ok(sheets)
}
