//! Serialization and Deserialization implementation

use ::serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

use super::*;

impl Serialize for RouteSum {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.summary_strings().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RouteSum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let routes: Vec<String> = Vec::deserialize(deserializer)?;
        Self::from_strs(routes).map_err(D::Error::custom)
    }
}

impl Serialize for BitSlice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BitSlice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
