use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use crate::{EnvName, Entry, Result, Timestamp, parse_timestamp};

#[derive(Debug, Default)]
struct Table {
    entries: HashMap<EnvName, Entry>,
    /// Environments in the order they were first assigned.
    order: Vec<EnvName>,
}

/// Per-environment values of one flag.
///
/// A `Value` is a view: it pairs a shared table of environment values with
/// the environment it currently resolves against. [`Value::env`] derives a
/// view onto the same table, so assignments through any view are visible
/// to all of them.
///
/// Lookup resolves the current environment first, then falls back to the
/// environment assigned most recently (by first assignment, re-assigning
/// does not move an environment), and finally to nothing.
///
/// Values are meant to be filled once at startup. The table is guarded by a
/// lock so views can be shared between threads, but mutating it while other
/// threads read makes the observed value depend on timing.
#[derive(Debug, Clone)]
pub struct Value {
    env: EnvName,
    table: Arc<RwLock<Table>>,
}

impl Value {
    /// Create an empty value resolving against `current`.
    pub fn new(current: impl Into<EnvName>) -> Self {
        Self {
            env: current.into(),
            table: Arc::default(),
        }
    }

    /// The environment this view resolves against.
    pub fn current(&self) -> &EnvName {
        &self.env
    }

    /// Derive a view of the same values resolving against `env`.
    pub fn env(&self, env: impl Into<EnvName>) -> Self {
        Self {
            env: env.into(),
            table: Arc::clone(&self.table),
        }
    }

    /// Environments with a value, in assignment order.
    pub fn environments(&self) -> Vec<EnvName> {
        self.table().order.clone()
    }

    /// Store `value` for `env`, replacing any previous value.
    pub fn insert(&self, env: impl Into<EnvName>, value: impl Into<Entry>) {
        let env = env.into();
        let mut table = self.table_mut();
        if !table.entries.contains_key(&env) {
            table.order.push(env.clone());
        }
        table.entries.insert(env, value.into());
    }

    pub fn set(self, env: impl Into<EnvName>, value: impl Into<Entry>) -> Self {
        self.insert(env, value);
        self
    }

    pub fn set_duration(self, env: impl Into<EnvName>, value: Duration) -> Self {
        self.set(env, value)
    }

    /// Parse an RFC 3339 timestamp and store it for `env`.
    pub fn set_timestamp(self, env: impl Into<EnvName>, value: &str) -> Result<Self> {
        let ts = parse_timestamp(value)?;
        Ok(self.set(env, ts))
    }

    pub fn set_string_slice(self, env: impl Into<EnvName>, values: &[&str]) -> Self {
        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        self.set(env, values)
    }

    pub fn set_int_slice(self, env: impl Into<EnvName>, values: &[isize]) -> Self {
        self.set(env, values.to_vec())
    }

    pub fn set_int64_slice(self, env: impl Into<EnvName>, values: &[i64]) -> Self {
        self.set(env, values.to_vec())
    }

    pub fn set_uint_slice(self, env: impl Into<EnvName>, values: &[usize]) -> Self {
        self.set(env, values.to_vec())
    }

    pub fn set_uint64_slice(self, env: impl Into<EnvName>, values: &[u64]) -> Self {
        self.set(env, values.to_vec())
    }

    pub fn set_float64_slice(self, env: impl Into<EnvName>, values: &[f64]) -> Self {
        self.set(env, values.to_vec())
    }

    /// Resolve the value for the current environment.
    pub fn read(&self) -> Option<Entry> {
        let table = self.table();
        table
            .entries
            .get(&self.env)
            .or_else(|| table.order.last().and_then(|env| table.entries.get(env)))
            .cloned()
    }

    /// The resolved value as command line text.
    pub fn text(&self) -> Option<String> {
        self.read().map(|entry| entry.to_string())
    }

    // Typed accessors. A missing value, or one stored under another kind,
    // reads as the zero value of the accessor's type.

    pub fn string(&self) -> String {
        match self.read() {
            Some(Entry::String(v)) => v,
            _ => String::new(),
        }
    }

    pub fn bool(&self) -> bool {
        matches!(self.read(), Some(Entry::Bool(true)))
    }

    pub fn int(&self) -> isize {
        match self.read() {
            Some(Entry::Int(v)) => v,
            _ => 0,
        }
    }

    pub fn int64(&self) -> i64 {
        match self.read() {
            Some(Entry::Int64(v)) => v,
            _ => 0,
        }
    }

    pub fn uint(&self) -> usize {
        match self.read() {
            Some(Entry::Uint(v)) => v,
            _ => 0,
        }
    }

    pub fn uint64(&self) -> u64 {
        match self.read() {
            Some(Entry::Uint64(v)) => v,
            _ => 0,
        }
    }

    pub fn float64(&self) -> f64 {
        match self.read() {
            Some(Entry::Float64(v)) => v,
            _ => 0.0,
        }
    }

    pub fn duration(&self) -> Duration {
        match self.read() {
            Some(Entry::Duration(v)) => v,
            _ => Duration::ZERO,
        }
    }

    // Timestamps and slices have no natural zero value.

    pub fn timestamp(&self) -> Option<Timestamp> {
        match self.read() {
            Some(Entry::Timestamp(v)) => Some(v),
            _ => None,
        }
    }

    pub fn string_slice(&self) -> Option<Vec<String>> {
        match self.read() {
            Some(Entry::StringSlice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int_slice(&self) -> Option<Vec<isize>> {
        match self.read() {
            Some(Entry::IntSlice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn int64_slice(&self) -> Option<Vec<i64>> {
        match self.read() {
            Some(Entry::Int64Slice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn uint_slice(&self) -> Option<Vec<usize>> {
        match self.read() {
            Some(Entry::UintSlice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn uint64_slice(&self) -> Option<Vec<u64>> {
        match self.read() {
            Some(Entry::Uint64Slice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn float64_slice(&self) -> Option<Vec<f64>> {
        match self.read() {
            Some(Entry::Float64Slice(v)) => Some(v),
            _ => None,
        }
    }

    fn table(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn table_mut(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}
