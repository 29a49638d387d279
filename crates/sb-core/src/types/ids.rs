use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Row id of a `Learning`. Serialized as a string so clients never lose precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "1")]
pub struct LearningId(i64);

/// Row id of an `AppliedSkill`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ToSchema)]
#[schema(value_type = String, example = "1")]
pub struct AppliedSkillId(i64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    NotAnInteger { value: String },
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "id is empty"),
            Self::NotAnInteger { value } => write!(f, "id is not an integer: {value}"),
        }
    }
}

impl std::error::Error for IdError {}

fn parse_row_id(value: &str) -> Result<i64, IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    value.parse::<i64>().map_err(|_| IdError::NotAnInteger {
        value: value.to_string(),
    })
}

macro_rules! row_id_type {
    ($name:ident) => {
        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn parse(value: &str) -> Result<Self, IdError> {
                parse_row_id(value).map(Self)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = String::deserialize(deserializer)?;
                Self::parse(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

row_id_type!(LearningId);
row_id_type!(AppliedSkillId);
