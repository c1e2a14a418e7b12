use crate::{
    helpers::{format_change, format_magnitude, UNAVAILABLE},
    types::{CoinRecord, Interval},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClass {
    Positive,
    Negative,
}

impl CellClass {
    pub fn css(&self) -> &'static str {
        match self {
            CellClass::Positive => "positive",
            CellClass::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub class: Option<CellClass>,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Cell {
        Cell {
            text: text.into(),
            class: None,
        }
    }
}

/// Symbol, current open interest, then one cell per displayed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

pub fn render_table(records: &[CoinRecord]) -> Vec<TableRow> {
    records.iter().map(render_row).collect()
}

fn render_row(coin: &CoinRecord) -> TableRow {
    let mut cells = Vec::with_capacity(2 + Interval::ALL.len() - 1);

    cells.push(Cell::plain(coin.symbol.as_str()));
    cells.push(Cell::plain(match coin.current_open_interest {
        Some(value) => format_magnitude(value),
        None => String::from(UNAVAILABLE),
    }));

    for interval in Interval::displayed() {
        cells.push(change_cell(coin.change(interval)));
    }

    TableRow { cells }
}

fn change_cell(change: Option<f64>) -> Cell {
    let Some(change) = change else {
        return Cell::plain(UNAVAILABLE);
    };

    let class = if change > 0.0 {
        Some(CellClass::Positive)
    } else if change < 0.0 {
        Some(CellClass::Negative)
    } else {
        None
    };

    Cell {
        text: format_change(change),
        class,
    }
}
