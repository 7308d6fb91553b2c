use model::core::value::Value;
use mysql_async::Value as MySqlValue;
use mysql_common::constants::ColumnType;

const MAX_FRACTION_DIGITS: u8 = 6;

/// Maps a binary-protocol MySQL value onto the driver-neutral [`Value`].
///
/// Temporal values are rendered the way the text protocol prints them, so
/// `DATE` columns come out as `YYYY-MM-DD` and everything else carrying a
/// date as `YYYY-MM-DD HH:MM:SS[.f...]`. `decimals` is the column's declared
/// fractional-second precision; exactly that many digits are printed.
pub fn to_value(value: &MySqlValue, column_type: ColumnType, decimals: u8) -> Value {
    match value {
        MySqlValue::NULL => Value::Null,
        MySqlValue::Int(v) => Value::Int(*v),
        MySqlValue::UInt(v) => Value::Uint(*v),
        MySqlValue::Float(v) => Value::Float(widen_f32(*v)),
        MySqlValue::Double(v) => Value::Float(*v),
        MySqlValue::Bytes(b) => Value::Bytes(b.clone()),
        MySqlValue::Date(year, month, day, hour, minute, second, micros) => {
            if column_type == ColumnType::MYSQL_TYPE_DATE {
                Value::String(format!("{year:04}-{month:02}-{day:02}"))
            } else {
                Value::String(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}{}",
                    fraction(*micros, decimals)
                ))
            }
        }
        MySqlValue::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if *negative { "-" } else { "" };
            let hours = u64::from(*days) * 24 + u64::from(*hours);
            Value::String(format!(
                "{sign}{hours:02}:{minutes:02}:{seconds:02}{}",
                fraction(*micros, decimals)
            ))
        }
    }
}

// Precisions above 6 (e.g. 31 for computed columns) print all six digits.
fn fraction(micros: u32, decimals: u8) -> String {
    let digits = usize::from(decimals.min(MAX_FRACTION_DIGITS));
    if digits == 0 {
        return String::new();
    }
    let full = format!("{micros:06}");
    format!(".{}", &full[..digits])
}

// `0.1f32 as f64` is 0.10000000149011612; go through the shortest decimal
// representation instead so FLOAT columns read back the way they were written.
fn widen_f32(v: f32) -> f64 {
    v.to_string().parse::<f64>().unwrap_or(f64::from(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(
            to_value(&MySqlValue::NULL, ColumnType::MYSQL_TYPE_NULL, 0),
            Value::Null
        );
        assert_eq!(
            to_value(&MySqlValue::Int(-7), ColumnType::MYSQL_TYPE_LONG, 0),
            Value::Int(-7)
        );
        assert_eq!(
            to_value(&MySqlValue::UInt(7), ColumnType::MYSQL_TYPE_LONGLONG, 0),
            Value::Uint(7)
        );
        assert_eq!(
            to_value(&MySqlValue::Double(2.5), ColumnType::MYSQL_TYPE_DOUBLE, 0),
            Value::Float(2.5)
        );
    }

    #[test]
    fn test_float_is_widened_without_noise() {
        assert_eq!(
            to_value(&MySqlValue::Float(0.1), ColumnType::MYSQL_TYPE_FLOAT, 0),
            Value::Float(0.1)
        );
    }

    #[test]
    fn test_bytes_stay_bytes() {
        assert_eq!(
            to_value(
                &MySqlValue::Bytes(b"12.50".to_vec()),
                ColumnType::MYSQL_TYPE_NEWDECIMAL,
                2
            ),
            Value::Bytes(b"12.50".to_vec())
        );
    }

    #[test]
    fn test_date_and_datetime() {
        let date = MySqlValue::Date(2024, 3, 9, 0, 0, 0, 0);
        assert_eq!(
            to_value(&date, ColumnType::MYSQL_TYPE_DATE, 0),
            Value::String("2024-03-09".into())
        );
        assert_eq!(
            to_value(&date, ColumnType::MYSQL_TYPE_DATETIME, 0),
            Value::String("2024-03-09 00:00:00".into())
        );

        let precise = MySqlValue::Date(2024, 3, 9, 14, 5, 1, 1500);
        assert_eq!(
            to_value(&precise, ColumnType::MYSQL_TYPE_TIMESTAMP, 6),
            Value::String("2024-03-09 14:05:01.001500".into())
        );
    }

    #[test]
    fn test_time_folds_days_into_hours() {
        let time = MySqlValue::Time(true, 1, 2, 3, 4, 0);
        assert_eq!(
            to_value(&time, ColumnType::MYSQL_TYPE_TIME, 0),
            Value::String("-26:03:04".into())
        );
    }

    #[test]
    fn test_fraction_follows_declared_precision() {
        let millis = MySqlValue::Date(2024, 3, 9, 14, 5, 1, 1000);
        assert_eq!(
            to_value(&millis, ColumnType::MYSQL_TYPE_DATETIME, 3),
            Value::String("2024-03-09 14:05:01.001".into())
        );

        let whole = MySqlValue::Date(2024, 3, 9, 14, 5, 1, 0);
        assert_eq!(
            to_value(&whole, ColumnType::MYSQL_TYPE_DATETIME, 6),
            Value::String("2024-03-09 14:05:01.000000".into())
        );

        let time = MySqlValue::Time(false, 0, 1, 2, 3, 500_000);
        assert_eq!(
            to_value(&time, ColumnType::MYSQL_TYPE_TIME, 2),
            Value::String("01:02:03.50".into())
        );
    }

    #[test]
    fn test_unfixed_precision_prints_microseconds() {
        let now = MySqlValue::Date(2024, 3, 9, 14, 5, 1, 1500);
        assert_eq!(
            to_value(&now, ColumnType::MYSQL_TYPE_DATETIME, 31),
            Value::String("2024-03-09 14:05:01.001500".into())
        );
    }
}
