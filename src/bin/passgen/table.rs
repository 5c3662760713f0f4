use std::fmt::{self, Display};
use std::io::{self, Write};

use anyhow::Context;
use unicode_width::UnicodeWidthStr;

use passgen::strength::{self, LENGTH_BRACKETS};
use passgen::{CharacterClass, ClassSet};

pub fn display_table<ItemType: TableDisplay>(
    rows: &[ItemType],
    mut output: impl Write,
) -> io::Result<()> {
    let column_count = ItemType::columns();
    let mut column_widths = (0..column_count)
        .map(|column_index| ItemType::column_name(column_index).width())
        .collect::<Vec<_>>();

    for row in rows {
        for (column_index, column_width) in column_widths.iter_mut().enumerate() {
            *column_width = std::cmp::max(row.item(column_index).width(), *column_width);
        }
    }

    output_row(&mut output, column_count, |column_index| {
        Padded(
            ItemType::column_name(column_index),
            column_widths[column_index],
        )
    })?;
    output_row(&mut output, column_count, |column_index| {
        Divider(column_widths[column_index])
    })?;
    for row in rows {
        output_row(&mut output, column_count, |column_index| {
            Padded(row.item(column_index), column_widths[column_index])
        })?;
    }

    Ok(())
}

pub trait TableDisplay {
    fn columns() -> usize;
    fn column_name(column_index: usize) -> &'static str;
    fn item(&self, column_index: usize) -> &str;
}

fn output_row<F, D>(
    mut output: impl Write,
    column_count: usize,
    get_column_display: F,
) -> io::Result<()>
where
    D: Display,
    F: Fn(usize) -> D,
{
    for column_index in 0..column_count {
        if column_index > 0 {
            write!(&mut output, "  ")?;
        }
        write!(&mut output, "{}", get_column_display(column_index))?;
    }
    writeln!(&mut output)?;
    Ok(())
}

struct Divider(usize);

impl Display for Divider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.0 {
            write!(f, "─")?;
        }
        Ok(())
    }
}

struct Padded<'a>(&'a str, usize);

impl Display for Padded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let padding = self.1.saturating_sub(self.0.width());
        write!(f, "{}", self.0)?;
        for _ in 0..padding {
            write!(f, " ")?;
        }
        Ok(())
    }
}

/// One length bracket, rated with one to four classes enabled.
struct BracketRow {
    lengths: String,
    labels: Vec<&'static str>,
}

impl TableDisplay for BracketRow {
    fn columns() -> usize {
        1 + CharacterClass::ALL.len()
    }

    fn column_name(column_index: usize) -> &'static str {
        match column_index {
            0 => "Length",
            1 => "1 class",
            2 => "2 classes",
            3 => "3 classes",
            4 => "4 classes",
            _ => panic!(),
        }
    }

    fn item(&self, column_index: usize) -> &str {
        match column_index {
            0 => self.lengths.as_str(),
            n => self.labels[n - 1],
        }
    }
}

fn bracket_rows() -> Vec<BracketRow> {
    let mut starts = vec![0];
    starts.extend(LENGTH_BRACKETS);
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let lengths = match starts.get(i + 1) {
                Some(next) => format!("{}-{}", start, next - 1),
                None => format!("{}+", start),
            };
            let labels = (1..=CharacterClass::ALL.len())
                .map(|count| {
                    let classes = CharacterClass::ALL
                        .into_iter()
                        .take(count)
                        .collect::<ClassSet>();
                    strength::rate(&classes, start).as_str()
                })
                .collect();
            BracketRow { lengths, labels }
        })
        .collect()
}

pub(crate) fn strength_table(output: impl Write) -> anyhow::Result<()> {
    display_table(&bracket_rows(), output).context("failed to output table")
}
