//! Withdrawal addresses.
//!
//! The service answers `GET /api/merchant/address/` with a JSON object keyed by
//! currency code. [`AddressMap`] keeps those entries in the order the server sent
//! them, and [`AddressMap::filtered`] turns them into the list form callers display.

use serde::de::{IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Currency code to withdrawal address, in server order.
///
/// Only string values count as addresses. `null`, `false`, numbers and any
/// other value read as absent. A `null` response body deserializes to an
/// empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressMap(Vec<(String, Option<String>)>);

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, currency: impl Into<String>, address: Option<String>) {
        self.0.push((currency.into(), address));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(currency, address)| (currency.as_str(), address.as_deref()))
    }

    /// Entries whose address is present and non-empty, order preserved.
    pub fn filtered(&self) -> Vec<FilteredAddress> {
        self.iter()
            .filter_map(|(currency, address)| match address {
                Some(address) if !address.is_empty() => Some(FilteredAddress {
                    currency: currency.to_string(),
                    address: address.to_string(),
                }),
                _ => None,
            })
            .collect()
    }
}

impl<C, A> FromIterator<(C, Option<A>)> for AddressMap
where
    C: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, Option<A>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(currency, address)| (currency.into(), address.map(Into::into)))
                .collect(),
        )
    }
}

impl Serialize for AddressMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (currency, address) in &self.0 {
            map.serialize_entry(currency, address)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AddressMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressMapVisitor;

        impl<'de> Visitor<'de> for AddressMapVisitor {
            type Value = AddressMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of currency codes to withdrawal addresses, or null")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(AddressMap::default())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(AddressMap::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((currency, address)) =
                    access.next_entry::<String, AddressValue>()?
                {
                    entries.push((currency, address.0));
                }
                Ok(AddressMap(entries))
            }
        }

        deserializer.deserialize_option(AddressMapVisitor)
    }
}

/// A single address value as sent by the service.
struct AddressValue(Option<String>);

impl<'de> Deserialize<'de> for AddressValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct AddressValueVisitor;

        impl<'de> Visitor<'de> for AddressValueVisitor {
            type Value = AddressValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a withdrawal address")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(AddressValue(Some(v.to_string())))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(AddressValue(Some(v)))
            }

            fn visit_bool<E: serde::de::Error>(self, _v: bool) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_i64<E: serde::de::Error>(self, _v: i64) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_u64<E: serde::de::Error>(self, _v: u64) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_f64<E: serde::de::Error>(self, _v: f64) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(AddressValue(None))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
                IgnoredAny.visit_seq(seq).map(|_| AddressValue(None))
            }

            fn visit_map<M: MapAccess<'de>>(self, map: M) -> Result<Self::Value, M::Error> {
                IgnoredAny.visit_map(map).map(|_| AddressValue(None))
            }
        }

        deserializer.deserialize_any(AddressValueVisitor)
    }
}

/// One configured withdrawal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredAddress {
    pub currency: String,
    pub address: String,
}
