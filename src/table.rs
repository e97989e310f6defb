//! Column-oriented output of a decode pass.
//!
//! A [`Table`] is an ordered list of named, equally long columns. It is what
//! callers hand to their own data-frame layer and what gets exported to disk.
use serde::{Deserialize, Serialize};

/// One typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Char(Vec<char>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    Bool(Vec<bool>),
    F64(Vec<f64>),
    Str(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Char(v) => v.len(),
            Column::U16(v) => v.len(),
            Column::U32(v) => v.len(),
            Column::U64(v) => v.len(),
            Column::Bool(v) => v.len(),
            Column::F64(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn as_chars(&self) -> Option<&[char]> { if let Column::Char(v) = self { Some(v) } else { None } }
    pub fn as_u16(&self) -> Option<&[u16]> { if let Column::U16(v) = self { Some(v) } else { None } }
    pub fn as_u32(&self) -> Option<&[u32]> { if let Column::U32(v) = self { Some(v) } else { None } }
    pub fn as_u64(&self) -> Option<&[u64]> { if let Column::U64(v) = self { Some(v) } else { None } }
    pub fn as_bool(&self) -> Option<&[bool]> { if let Column::Bool(v) = self { Some(v) } else { None } }
    pub fn as_f64(&self) -> Option<&[f64]> { if let Column::F64(v) = self { Some(v) } else { None } }
    pub fn as_str(&self) -> Option<&[String]> { if let Column::Str(v) = self { Some(v) } else { None } }

    /// Render one cell for display.
    pub fn cell(&self, row: usize) -> Option<String> {
        Some(match self {
            Column::Char(v) => match v.get(row)? {
                '\0' => String::new(),
                c => c.to_string(),
            },
            Column::U16(v) => v.get(row)?.to_string(),
            Column::U32(v) => v.get(row)?.to_string(),
            Column::U64(v) => v.get(row)?.to_string(),
            Column::Bool(v) => v.get(row)?.to_string(),
            Column::F64(v) => format!("{:.4}", v.get(row)?),
            Column::Str(v) => v.get(row)?.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    /// Append a named column (builder style).
    pub fn with(mut self, name: &str, column: Column) -> Self {
        self.columns.push((name.to_string(), column));
        self
    }

    /// Rows in the table; 0 for a table without columns.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize { self.columns.len() }

    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// True when every column has the same length.
    pub fn is_consistent(&self) -> bool {
        let n = self.num_rows();
        self.columns.iter().all(|(_, c)| c.len() == n)
    }

    /// `name=value` pairs for one row.
    pub fn row(&self, row: usize) -> Option<Vec<(&str, String)>> {
        self.columns.iter().map(|(n, c)| c.cell(row).map(|v| (n.as_str(), v))).collect()
    }
}
