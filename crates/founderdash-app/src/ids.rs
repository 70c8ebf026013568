// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($name:ident, $what:literal) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// The id after the largest one in `ids`, or 1 when there are none.
            pub fn next_after(ids: impl IntoIterator<Item = Self>) -> Self {
                Self(ids.into_iter().map(Self::get).max().unwrap_or(0) + 1)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                value
                    .trim()
                    .parse::<i64>()
                    .map(Self)
                    .with_context(|| format!("invalid {} id `{value}`", $what))
            }
        }
    };
}

entity_id!(UserId, "user");
entity_id!(ProductId, "product");
entity_id!(ActivityLogId, "activity log");
