use crate::storage::Storage;

/// Storage that remembers nothing; used when persistence is disabled
pub struct BlackholeStorage;

impl BlackholeStorage {
    pub fn new() -> Box<dyn Storage> {
        Box::new(BlackholeStorage)
    }
}

impl Storage for BlackholeStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _key: &str, _value: String) {
        // ignore
    }

    fn remove(&mut self, _key: &str) {
        // ignore
    }
}
