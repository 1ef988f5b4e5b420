use crate::TIME_COLUMN;

/// One sheet of measurements: the time column plus named value columns.
///
/// All columns have the length of `time`; row order is the sheet order,
/// which is also the plotting order.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTable {
    pub time: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl TimeTable {
    pub fn new(names: Vec<String>, capacity: usize) -> TimeTable {
        let columns = names
            .into_iter()
            .map(|n| (n, Vec::with_capacity(capacity)))
            .collect();
        TimeTable {
            time: Vec::with_capacity(capacity),
            columns,
        }
    }

    /// Build a table from whole columns, mostly for tests and fixtures.
    /// Columns shorter than `time` are padded with NAN, longer ones truncated.
    pub fn from_columns(time: Vec<f64>, columns: Vec<(String, Vec<f64>)>) -> TimeTable {
        let n = time.len();
        let columns = columns
            .into_iter()
            .map(|(name, mut values)| {
                values.resize(n, f64::NAN);
                (name, values)
            })
            .collect();
        TimeTable { time, columns }
    }

    /// Appends one row; `values` follows the column order, missing trailing values are NAN.
    pub fn push_row(&mut self, time: f64, values: &[f64]) {
        self.time.push(time);
        for (i, (_, column)) in self.columns.iter_mut().enumerate() {
            column.push(values.get(i).copied().unwrap_or(f64::NAN));
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        name == TIME_COLUMN || self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        if name == TIME_COLUMN {
            return Some(&self.time);
        }
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Value column names in sheet order, without the time column.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// keeps only the rows with time <= limit, in their original order;
    /// NAN times never pass. Takes a reference and returns a new TimeTable.
    pub fn filter_time(&self, limit: f64) -> TimeTable {
        let keep: Vec<usize> = self
            .time
            .iter()
            .enumerate()
            .filter(|(_, &t)| t <= limit)
            .map(|(i, _)| i)
            .collect();
        let time = keep.iter().map(|&i| self.time[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|(n, v)| (n.clone(), keep.iter().map(|&i| v[i]).collect()))
            .collect();
        TimeTable { time, columns }
    }
}

impl std::fmt::Display for TimeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", TIME_COLUMN)?;
        for name in self.column_names() {
            write!(f, ",{}", name)?;
        }
        writeln!(f)?;
        for (i, t) in self.time.iter().enumerate() {
            write!(f, "{}", t)?;
            for (_, column) in self.columns.iter() {
                write!(f, ",{}", column[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
