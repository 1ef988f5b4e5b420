use crate::error::PlotError;
use crate::table::TimeTable;
use crate::METHOD_SEPARATOR;

pub const DEFAULT_METHODS: [&str; 3] = ["STC", "PSTC", "ASTC4"];

/// A logical measured quantity with one expected column per method.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityGroup {
    pub name: String,
    /// Used for the Y axis and the chart title.
    pub label: String,
    pub columns: Vec<String>,
}

impl QuantityGroup {
    pub fn new(name: &str, label: &str, columns: &[&str]) -> Self {
        QuantityGroup {
            name: name.to_string(),
            label: label.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Group whose columns are `<method>_<name>` for each method, in order.
    pub fn for_methods(name: &str, label: &str, methods: &[&str]) -> Self {
        QuantityGroup {
            name: name.to_string(),
            label: label.to_string(),
            columns: methods
                .iter()
                .map(|m| format!("{}{}{}", m, METHOD_SEPARATOR, name))
                .collect(),
        }
    }
}

/// The quantity groups of a run, in declared (processing) order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMap {
    groups: Vec<QuantityGroup>,
}

impl GroupMap {
    pub fn new(groups: Vec<QuantityGroup>) -> Self {
        GroupMap { groups }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuantityGroup> {
        self.groups.iter()
    }

    pub fn get(&self, name: &str) -> Option<&QuantityGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for GroupMap {
    fn default() -> Self {
        let m = &DEFAULT_METHODS;
        GroupMap::new(vec![
            QuantityGroup::for_methods("Y", "Y displacement", m),
            QuantityGroup::for_methods("Rotation_3", "Rotation angle 3", m),
            QuantityGroup::for_methods("Rotation_1", "Rotation angle 1", m),
            QuantityGroup::for_methods("wing1", "Rudder wing 1", m),
            QuantityGroup::for_methods("wing2", "Rudder wing 2", m),
            QuantityGroup::for_methods("wing3", "Rudder wing 3", m),
        ])
    }
}

impl<'a> IntoIterator for &'a GroupMap {
    type Item = &'a QuantityGroup;
    type IntoIter = std::slice::Iter<'a, QuantityGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Method of a column: the prefix before the first separator,
/// the whole name if there is none.
pub fn method_of(column: &str) -> &str {
    column
        .split_once(METHOD_SEPARATOR)
        .map_or(column, |(method, _)| method)
}

/// The group's columns present in `table`, in the group's declared order.
///
/// `case_id` only labels the `NoDataForGroup` error returned when none is present.
pub fn resolve_group(
    table: &TimeTable,
    group: &QuantityGroup,
    case_id: &str,
) -> Result<Vec<String>, PlotError> {
    let available: Vec<String> = group
        .columns
        .iter()
        .filter(|c| table.has_column(c))
        .cloned()
        .collect();
    if available.is_empty() {
        return Err(PlotError::NoDataForGroup {
            case: case_id.to_string(),
            group: group.name.clone(),
        });
    }
    Ok(available)
}
