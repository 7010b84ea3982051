use crate::inspect::{Column, ForeignKey, Index, Table};

pub const PRIMARY_KEY_MARKER: &str = "🔑 ";
pub const NO_KEY_PADDING: &str = "   ";
pub const FOREIGN_KEY_MARKER: &str = " 🔗";
pub const INLINE_LIST_SEPARATOR: &str = ", ";

/// Gap ratatui leaves between adjacent table columns.
pub const COLUMN_SPACING: u16 = 1;

/// One row of a detail grid: always three cells.
pub type DetailRow = [String; 3];

/// The three views of a selected table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailTab {
    Columns,
    Indexes,
    ForeignKeys,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [DetailTab::Columns, DetailTab::Indexes, DetailTab::ForeignKeys];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Columns => "Columns",
            DetailTab::Indexes => "Indexes",
            DetailTab::ForeignKeys => "Foreign Keys",
        }
    }

    fn position(self) -> usize {
        match self {
            DetailTab::Columns => 0,
            DetailTab::Indexes => 1,
            DetailTab::ForeignKeys => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn headers(self) -> [&'static str; 3] {
        match self {
            DetailTab::Columns => ["Name", "Type", "Null"],
            DetailTab::Indexes => ["Name", "Unique", "Parts"],
            DetailTab::ForeignKeys => ["Name", "Columns", "References"],
        }
    }

    /// Relative column widths. The last column always takes the remainder.
    pub fn weights(self) -> [u16; 3] {
        match self {
            DetailTab::Columns => [3, 2, 1],
            DetailTab::Indexes => [5, 1, 3],
            DetailTab::ForeignKeys => [2, 1, 1],
        }
    }

    /// Split `width` between the three columns, never going below zero.
    pub fn column_widths(self, width: u16) -> [u16; 3] {
        let available = width.saturating_sub(COLUMN_SPACING * 2);
        let weights = self.weights();
        let total: u32 = weights.iter().map(|&w| u32::from(w)).sum();
        let share = |w: u16| (u32::from(available) * u32::from(w) / total) as u16;
        let first = share(weights[0]);
        let second = share(weights[1]);
        [first, second, available.saturating_sub(first + second)]
    }
}

/// Ordered rows for one tab plus the column widths for the current width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub tab: DetailTab,
    pub widths: [u16; 3],
    pub rows: Vec<DetailRow>,
}

impl Dataset {
    pub fn new(tab: DetailTab, rows: Vec<DetailRow>, width: u16) -> Self {
        Self {
            tab,
            widths: tab.column_widths(width),
            rows,
        }
    }

    pub fn headers(&self) -> [&'static str; 3] {
        self.tab.headers()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn resize(&mut self, width: u16) {
        self.widths = self.tab.column_widths(width);
    }

    /// Text shown instead of an empty grid.
    pub fn no_data_text(&self) -> String {
        format!("No {}", self.tab.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailDatasets {
    pub columns: Dataset,
    pub indexes: Dataset,
    pub foreign_keys: Dataset,
}

impl DetailDatasets {
    pub fn get(&self, tab: DetailTab) -> &Dataset {
        match tab {
            DetailTab::Columns => &self.columns,
            DetailTab::Indexes => &self.indexes,
            DetailTab::ForeignKeys => &self.foreign_keys,
        }
    }
}

pub fn build_details(table: &Table, width: u16) -> DetailDatasets {
    DetailDatasets {
        columns: Dataset::new(
            DetailTab::Columns,
            table.columns.iter().map(|c| column_row(table, c)).collect(),
            width,
        ),
        indexes: Dataset::new(
            DetailTab::Indexes,
            table.indexes.iter().map(index_row).collect(),
            width,
        ),
        foreign_keys: Dataset::new(
            DetailTab::ForeignKeys,
            table.foreign_keys.iter().map(foreign_key_row).collect(),
            width,
        ),
    }
}

fn column_row(table: &Table, col: &Column) -> DetailRow {
    [
        column_name(table, col),
        col.data_type.clone(),
        yes_no(col.null).to_string(),
    ]
}

fn index_row(idx: &Index) -> DetailRow {
    let parts: Vec<&str> = idx.parts.iter().map(|p| p.key.label()).collect();
    [
        idx.name.clone().unwrap_or_default(),
        yes_no(idx.unique).to_string(),
        parts.join(INLINE_LIST_SEPARATOR),
    ]
}

fn foreign_key_row(fk: &ForeignKey) -> DetailRow {
    [
        fk.name.clone(),
        fk.columns.join(INLINE_LIST_SEPARATOR),
        format!(
            "{}({})",
            fk.references.table,
            fk.references.columns.join(INLINE_LIST_SEPARATOR)
        ),
    ]
}

/// Column name with a key marker in front for primary-key members and a
/// link marker after for foreign-key members.
pub fn column_name(table: &Table, col: &Column) -> String {
    let mut name = String::with_capacity(col.name.len() + 10);
    if table.is_primary_key_column(&col.name) {
        name.push_str(PRIMARY_KEY_MARKER);
    } else {
        name.push_str(NO_KEY_PADDING);
    }
    name.push_str(&col.name);
    if table.is_foreign_key_column(&col.name) {
        name.push_str(FOREIGN_KEY_MARKER);
    }
    name
}

pub fn yes_no(b: bool) -> &'static str {
    if b {
        "Yes"
    } else {
        "No"
    }
}
