//! Convert geozero property values into attribute [`Value`]s.

use chrono::DateTime;
use geozero::ColumnValue;

use crate::value::Value;

pub(crate) fn column_value_to_value(value: &ColumnValue) -> Value {
    match value {
        ColumnValue::Bool(val) => Value::Bool(*val),
        ColumnValue::Byte(val) => Value::Int((*val).into()),
        ColumnValue::UByte(val) => Value::Int((*val).into()),
        ColumnValue::Short(val) => Value::Int((*val).into()),
        ColumnValue::UShort(val) => Value::Int((*val).into()),
        ColumnValue::Int(val) => Value::Int((*val).into()),
        ColumnValue::UInt(val) => Value::Int((*val).into()),
        ColumnValue::Long(val) => Value::Int(*val),
        ColumnValue::ULong(val) => i64::try_from(*val)
            .map(Value::Int)
            .unwrap_or(Value::Float(*val as f64)),
        ColumnValue::Float(val) => Value::Float((*val).into()),
        ColumnValue::Double(val) => Value::Float(*val),
        ColumnValue::String(val) => Value::String(val.to_string()),
        ColumnValue::Json(val) if val.trim() == "null" => Value::Null,
        ColumnValue::Json(val) => Value::String(val.to_string()),
        ColumnValue::DateTime(val) => DateTime::parse_from_rfc3339(val)
            .map(Value::DateTime)
            .unwrap_or_else(|_| Value::String(val.to_string())),
        ColumnValue::Binary(val) => {
            tracing::debug!("skipping binary property value of {} bytes", val.len());
            Value::Null
        }
    }
}
