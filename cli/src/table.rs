// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};

use crate::util::{OutputFormat, display_width};

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

/// Rows rendered either as aligned text or as a JSON array of objects.
#[derive(Debug)]
pub struct Table<'a, C, T> {
    format: OutputFormat,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, C: TableColumn<T>, T> Table<'a, C, T> {
    pub fn new(format: OutputFormat, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            format,
            columns,
            data,
        }
    }

    fn cells(&self) -> Vec<Vec<Cow<'a, str>>> {
        self.data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect()
    }

    fn fmt_basic(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.cells();
        let widths = column_widths(&table, self.columns.len());

        for (i, (cells, row)) in table.iter().zip(self.data).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, (col, cell)) in self.columns.iter().zip(cells).enumerate() {
                let last = j == self.columns.len() - 1;
                let pad = widths.get(j).copied().unwrap_or(0).saturating_sub(display_width(cell));
                let padded = match col.padding_direction() {
                    PaddingDirection::Left if last => cell.to_string(),
                    PaddingDirection::Left => format!("{cell}{}", " ".repeat(pad)),
                    PaddingDirection::Right => format!("{}{cell}", " ".repeat(pad)),
                };

                match col.color(row) {
                    Some(color) => write!(f, "{}", padded.color(color))?,
                    None => write!(f, "{padded}")?,
                }
                if !last {
                    write!(f, "  ")?;
                }
            }
        }
        Ok(())
    }

    fn fmt_json(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = self
            .cells()
            .into_iter()
            .map(|cells| {
                self.columns
                    .iter()
                    .zip(cells)
                    .map(|(col, cell)| (col.name().into_owned(), cell.into_owned().into()))
                    .collect()
            })
            .collect();

        let json = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        write!(f, "{json}")
    }
}

impl<C: TableColumn<T>, T> fmt::Display for Table<'_, C, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format {
            OutputFormat::Json => self.fmt_json(f),
            OutputFormat::Table => self.fmt_basic(f),
        }
    }
}

fn column_widths(table: &[Vec<Cow<'_, str>>], columns: usize) -> Vec<usize> {
    let mut widths = vec![0; columns];
    for row in table {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(cell));
        }
    }
    widths
}
