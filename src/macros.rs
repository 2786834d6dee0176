/// Constructs a [`Vec`]<[`Value`](crate::Value)> of from a list of native data types.
#[macro_export]
macro_rules! values {
    ($($v:expr),* $(,)?) => {{
        vec![$($crate::Value::from($v),)*]
    }};
}

/// Constructs a [`Value::List`](crate::Value::List) from a list of native data types.
///
/// # Examples
///
/// Select all entries whose value is in a list.
///
/// ```rust
/// use mapwire::{operations::map, ReturnType};
///
/// let values = mapwire::values!("a", 1, true);
/// let op = map::get_by_value_list(&values, ReturnType::Key);
///
/// assert!(mapwire::encode(&op).is_ok());
/// assert_eq!(mapwire::Value::List(values), mapwire::list!("a", 1, true));
/// ```
#[macro_export]
macro_rules! list {
    ($($v:expr),* $(,)?) => {{
        $crate::Value::List(
            $crate::values!($($v,)*)
        )
    }};
}

/// Constructs a [`Value::HashMap`](crate::Value::HashMap) from a list of key/value pairs.
///
/// # Examples
///
/// Select the entry with a map value.
///
/// ```rust
/// use mapwire::{operations::map, ReturnType};
///
/// let value = mapwire::map!("a" => true, 2 => 10.0);
/// let op = map::get_by_value(&value, ReturnType::Count);
///
/// assert!(mapwire::encode(&op).is_ok());
/// ```
#[macro_export]
macro_rules! map {
    ($($k:expr => $v:expr),* $(,)?) => {{
        $crate::Value::HashMap(
            [$(($crate::MapKey::from($k), $crate::Value::from($v)),)*].into()
        )
    }};
}
