use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

/// A single table cell as handed over by the document-reading collaborator.
/// Absent cells are a legal value throughout the engine.
pub type Cell = Option<String>;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table(pub Vec<Row>);

impl Deref for Table {
    type Target = Vec<Row>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Table {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, R> From<C> for Table
where
    C: IntoIterator<Item = R>,
    R: Into<Row>,
{
    fn from(value: C) -> Self {
        Table(value.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(pub Vec<Cell>);

impl Row {
    /// Text of the cell at `idx`. Absent and out-of-bounds cells read as
    /// the empty string.
    pub fn text(&self, idx: usize) -> &str {
        self.0
            .get(idx)
            .and_then(|cell| cell.as_deref())
            .unwrap_or("")
    }

    /// `true` if the row has no cell carrying any text.
    pub fn is_blank(&self) -> bool {
        self.0
            .iter()
            .all(|cell| cell.as_deref().is_none_or(str::is_empty))
    }
}

impl Deref for Row {
    type Target = Vec<Cell>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Row {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<C, S> From<C> for Row
where
    C: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from(value: C) -> Self {
        Row(value.into_iter().map(|cell| Some(cell.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::Row;

    #[gtest]
    fn text_reads_absent_and_out_of_bounds_cells_as_empty() {
        let row = Row(vec![Some("a".to_string()), None]);

        expect_that!(row.text(0), eq("a"));
        expect_that!(row.text(1), eq(""));
        expect_that!(row.text(9), eq(""));
    }

    #[gtest]
    fn is_blank_accepts_empty_null_and_empty_text_rows() {
        expect_that!(Row(vec![]).is_blank(), eq(true));
        expect_that!(Row(vec![None, None]).is_blank(), eq(true));
        expect_that!(Row(vec![Some("".to_string()), None]).is_blank(), eq(true));
        expect_that!(Row(vec![None, Some("x".to_string())]).is_blank(), eq(false));
    }
}
