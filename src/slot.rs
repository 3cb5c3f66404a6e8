//! Storage shapes behind a [`Variable`](crate::Variable).
//!
//! A scalar slot holds at most one value per source; an aggregate slot holds
//! a sequence per source and grows by one element on every decode. Both
//! track the user-facing value (default or flag) and the environment value
//! independently.

use std::fmt;

use crate::value::Value;

/// Which of the two tracked values to read or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Compiled default or command-line value.
    User,
    /// Value inherited from the environment.
    Env,
}

pub trait Slot: fmt::Debug {
    /// Text form of the values held for `source`; `""` when there are none.
    fn encode(&self, source: Source) -> String;

    /// Record one decode: both sides are written even when one is `None`.
    fn store(&mut self, user: Option<Value>, env: Option<Value>);

    fn clear(&mut self, source: Source);

    fn is_aggregate(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct Scalar {
    user: Option<Value>,
    env: Option<Value>,
}

impl Scalar {
    pub fn new(default: Option<Value>) -> Self {
        Self {
            user: default,
            env: None,
        }
    }

    fn side(&self, source: Source) -> &Option<Value> {
        match source {
            Source::User => &self.user,
            Source::Env => &self.env,
        }
    }
}

impl Slot for Scalar {
    fn encode(&self, source: Source) -> String {
        self.side(source)
            .as_ref()
            .map(Value::encode)
            .unwrap_or_default()
    }

    fn store(&mut self, user: Option<Value>, env: Option<Value>) {
        self.user = user;
        self.env = env;
    }

    fn clear(&mut self, source: Source) {
        match source {
            Source::User => self.user = None,
            Source::Env => self.env = None,
        }
    }

    fn is_aggregate(&self) -> bool {
        false
    }
}

#[derive(Debug, Default)]
pub struct Aggregate {
    user: Vec<Option<Value>>,
    env: Vec<Option<Value>>,
}

impl Aggregate {
    pub fn new() -> Self {
        Self::default()
    }

    fn side(&self, source: Source) -> &[Option<Value>] {
        match source {
            Source::User => &self.user,
            Source::Env => &self.env,
        }
    }
}

impl Slot for Aggregate {
    fn encode(&self, source: Source) -> String {
        self.side(source)
            .iter()
            .map(|v| v.as_ref().map(Value::encode).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn store(&mut self, user: Option<Value>, env: Option<Value>) {
        self.user.push(user);
        self.env.push(env);
    }

    fn clear(&mut self, source: Source) {
        match source {
            Source::User => self.user.clear(),
            Source::Env => self.env.clear(),
        }
    }

    fn is_aggregate(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_replaces() {
        let mut slot = Scalar::new(Some(Value::Int(1)));
        assert_eq!(slot.encode(Source::User), "1");
        slot.store(Some(Value::Int(2)), None);
        assert_eq!(slot.encode(Source::User), "2");
        assert_eq!(slot.encode(Source::Env), "");
    }

    #[test]
    fn aggregate_appends_in_lock_step() {
        let mut slot = Aggregate::new();
        slot.store(Some("a".into()), None);
        slot.store(Some("b".into()), Some("x".into()));
        assert_eq!(slot.encode(Source::User), "a,b");
        assert_eq!(slot.encode(Source::Env), ",x");
    }

    #[test]
    fn empty_aggregate_encodes_empty() {
        let slot = Aggregate::new();
        assert_eq!(slot.encode(Source::User), "");
        assert_eq!(slot.encode(Source::Env), "");
    }

    #[test]
    fn clear_one_side_only() {
        let mut slot = Scalar::new(Some("d".into()));
        slot.store(Some("u".into()), Some("e".into()));
        slot.clear(Source::User);
        assert_eq!(slot.encode(Source::User), "");
        assert_eq!(slot.encode(Source::Env), "e");
    }
}
