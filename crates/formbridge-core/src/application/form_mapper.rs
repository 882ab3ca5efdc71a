//! Schema-to-form mapping
//!
//! Turns a table's column list into the fields of a form. Field titles are
//! the column names verbatim because they are the join key used to turn a
//! submission back into a row.

use crate::domain::schema::{ColumnDescriptor, DataType, FieldDescriptor, FieldKind};
use crate::CoreError;

/// Map columns to form fields, skipping the reserved `id` column
///
/// Order is preserved. Any column with an unknown data type rejects the
/// whole schema.
pub fn map_columns(columns: &[ColumnDescriptor]) -> Result<Vec<FieldDescriptor>, CoreError> {
    columns
        .iter()
        .filter(|column| !column.is_reserved())
        .map(map_column)
        .collect()
}

/// Map a single column to a form field
pub fn map_column(column: &ColumnDescriptor) -> Result<FieldDescriptor, CoreError> {
    let data_type: DataType = column.data_type.parse().map_err(|_| {
        CoreError::SchemaError(format!(
            "column '{}' has unsupported data type '{}'",
            column.name, column.data_type
        ))
    })?;

    Ok(FieldDescriptor::new(
        column.name.clone(),
        FieldKind::for_data_type(data_type),
    ))
}
