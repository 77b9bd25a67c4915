pub mod pointer;

pub use pointer::{wire_canvas_resize, wire_input_handlers, InputWiring, SelectionCallback};
