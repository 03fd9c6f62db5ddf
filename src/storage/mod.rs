mod blackhole;
mod file;
mod memory;

pub use blackhole::BlackholeStorage;
pub use file::FileStorage;
pub use memory::InMemoryStorage;

/// A simple, synchronous key-value store. Failures are not surfaced to the
/// caller: a value that can't be read is simply absent, and a write that
/// can't complete is dropped (implementations should log it).
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}
