//! Named per-point material properties.
//!
//! The material system publishes one array per property name at the current
//! quadrature point; kernels look them up by the names fixed in their config.

use std::collections::HashMap;

/// Read access to named property arrays at the current point.
pub trait PropertyProvider {
    fn property(&self, name: &str) -> Option<&[f64]>;
}

impl PropertyProvider for HashMap<String, Vec<f64>> {
    fn property(&self, name: &str) -> Option<&[f64]> {
        self.get(name).map(Vec::as_slice)
    }
}

/// Owned property arrays, refreshed by the caller before each point.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    values: HashMap<String, Vec<f64>>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the values stored under `name`, reusing its allocation.
    pub fn set(&mut self, name: &str, values: &[f64]) {
        self.set_iter(name, values.iter().copied());
    }

    pub fn set_iter<I>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        match self.values.get_mut(name) {
            Some(slot) => {
                slot.clear();
                slot.extend(values);
            }
            None => {
                self.values.insert(name.to_string(), values.into_iter().collect());
            }
        }
    }

    /// Store a scalar as a one-element array.
    pub fn set_scalar(&mut self, name: &str, value: f64) {
        self.set(name, &[value]);
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.values.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PropertyProvider for PropertyStore {
    fn property(&self, name: &str) -> Option<&[f64]> {
        self.get(name)
    }
}
