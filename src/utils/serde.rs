use serde::{Deserialize, Deserializer};

/// Treat an explicit `null` the same as a missing list.
pub fn nullable_vec<'de, D: Deserializer<'de>, T: Deserialize<'de>>(
    data: D,
) -> Result<Vec<T>, D::Error> {
    let maybe: Option<Vec<T>> = Deserialize::deserialize(data)?;
    Ok(maybe.unwrap_or_default())
}
