pub mod console;

pub use console::ConsoleObserver;
