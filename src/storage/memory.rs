use std::collections::HashMap;

use super::Storage;

pub struct InMemoryStorage {
    values: HashMap<String, String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}
