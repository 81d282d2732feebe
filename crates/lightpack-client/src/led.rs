//! LED addressing.
//!
//! Callers address LEDs from zero, or by alias. The protocol addresses them
//! from one. Alias `led_map[i]` is protocol index `i + 1`.

use std::fmt;
use std::str::FromStr;

use crate::error::{AddressError, AliasMissing};

/// A caller-side reference to one LED.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedRef {
    /// Zero-based LED index.
    Index(i64),
    /// Alias from the client's [`LedMap`].
    Alias(String),
}

impl From<i64> for LedRef {
    fn from(index: i64) -> Self {
        LedRef::Index(index)
    }
}

impl From<i32> for LedRef {
    fn from(index: i32) -> Self {
        LedRef::Index(i64::from(index))
    }
}

impl From<usize> for LedRef {
    fn from(index: usize) -> Self {
        LedRef::Index(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl From<&str> for LedRef {
    fn from(alias: &str) -> Self {
        LedRef::Alias(alias.to_string())
    }
}

impl From<String> for LedRef {
    fn from(alias: String) -> Self {
        LedRef::Alias(alias)
    }
}

impl From<&String> for LedRef {
    fn from(alias: &String) -> Self {
        LedRef::Alias(alias.clone())
    }
}

impl From<&LedRef> for LedRef {
    fn from(led: &LedRef) -> Self {
        led.clone()
    }
}

/// Parses decimal integers (including negative ones) as indices and
/// everything else as an alias.
impl FromStr for LedRef {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(index) => LedRef::Index(index),
            Err(_) => LedRef::Alias(s.to_string()),
        })
    }
}

impl fmt::Display for LedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedRef::Index(index) => write!(f, "{index}"),
            LedRef::Alias(alias) => f.write_str(alias),
        }
    }
}

/// Ordered LED aliases, fixed for the lifetime of a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedMap {
    aliases: Vec<String>,
}

impl LedMap {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// Zero-based position of the first occurrence of `alias`.
    pub fn position(&self, alias: &str) -> Option<usize> {
        self.aliases.iter().position(|a| a == alias)
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LedMap {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Resolve an alias to its one-based protocol index.
pub fn resolve_alias(map: Option<&LedMap>, alias: &str) -> Result<usize, AddressError> {
    let Some(map) = map else {
        return Err(AddressError::AliasNotFound {
            alias: alias.to_string(),
            reason: AliasMissing::NoAliases,
        });
    };
    map.position(alias)
        .map(|pos| pos + 1)
        .ok_or_else(|| AddressError::AliasNotFound {
            alias: alias.to_string(),
            reason: AliasMissing::Unknown,
        })
}

/// Resolve a zero-based index to its one-based protocol index, given `count`
/// connected LEDs.
pub fn resolve_index(index: i64, count: usize) -> Result<usize, AddressError> {
    let out_of_range = AddressError::OutOfRange { index, count };
    let one_based = index.checked_add(1).ok_or_else(|| out_of_range.clone())?;
    if one_based <= 0 {
        return Err(out_of_range);
    }
    let one_based = usize::try_from(one_based).map_err(|_| out_of_range.clone())?;
    if one_based > count {
        return Err(out_of_range);
    }
    Ok(one_based)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_valid_index_is_shifted_by_one() {
        let count = 30;
        for i in 0..count {
            assert_eq!(resolve_index(i as i64, count).unwrap(), i + 1);
        }
    }

    #[test]
    fn index_at_or_past_count_is_out_of_range() {
        assert_eq!(
            resolve_index(10, 10),
            Err(AddressError::OutOfRange { index: 10, count: 10 })
        );
        assert!(resolve_index(11, 10).is_err());
        assert!(resolve_index(i64::MAX, 10).is_err());
        assert!(resolve_index(0, 0).is_err());
    }

    #[test]
    fn negative_index_is_out_of_range() {
        assert_eq!(
            resolve_index(-1, 10),
            Err(AddressError::OutOfRange { index: -1, count: 10 })
        );
        assert!(resolve_index(i64::MIN, 10).is_err());
    }

    #[test]
    fn alias_resolves_to_position_plus_one() {
        let map = LedMap::new(["left", "top", "right"]);
        assert_eq!(resolve_alias(Some(&map), "left").unwrap(), 1);
        assert_eq!(resolve_alias(Some(&map), "top").unwrap(), 2);
        assert_eq!(resolve_alias(Some(&map), "right").unwrap(), 3);
    }

    #[test]
    fn duplicate_alias_resolves_to_first() {
        let map = LedMap::new(["a", "b", "a"]);
        assert_eq!(resolve_alias(Some(&map), "a").unwrap(), 1);
    }

    #[test]
    fn unknown_alias_is_not_found() {
        let map = LedMap::new(["left"]);
        assert_eq!(
            resolve_alias(Some(&map), "bottom"),
            Err(AddressError::AliasNotFound {
                alias: "bottom".into(),
                reason: AliasMissing::Unknown,
            })
        );
    }

    #[test]
    fn alias_without_map_is_not_found() {
        assert_eq!(
            resolve_alias(None, "left"),
            Err(AddressError::AliasNotFound {
                alias: "left".into(),
                reason: AliasMissing::NoAliases,
            })
        );
    }

    #[test]
    fn led_ref_from_str() {
        assert_eq!("3".parse::<LedRef>().unwrap(), LedRef::Index(3));
        assert_eq!("-2".parse::<LedRef>().unwrap(), LedRef::Index(-2));
        assert_eq!(
            "top".parse::<LedRef>().unwrap(),
            LedRef::Alias("top".to_string())
        );
    }

    #[test]
    fn led_ref_conversions() {
        assert_eq!(LedRef::from(4usize), LedRef::Index(4));
        assert_eq!(LedRef::from(4i32), LedRef::Index(4));
        assert_eq!(LedRef::from("x"), LedRef::Alias("x".into()));
        assert_eq!(LedRef::Index(7).to_string(), "7");
        assert_eq!(LedRef::Alias("top".into()).to_string(), "top");
    }

    #[test]
    fn led_map_collects() {
        let map: LedMap = vec!["a", "b"].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert!(!map.is_empty());
        assert_eq!(map.aliases(), ["a".to_string(), "b".to_string()]);
    }
}
