//! Where `print` statements go.

use log::debug;

/// Receives one integer per executed `print`, in execution order.
pub trait Output {
    fn emit(&mut self, value: i64);
}

/// Writes each value on its own line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Output for Stdout {
    fn emit(&mut self, value: i64) {
        println!("{}", value);
    }
}

/// Collects values in memory.
impl Output for Vec<i64> {
    fn emit(&mut self, value: i64) {
        debug!("Captured output value: {}", value);
        self.push(value);
    }
}
