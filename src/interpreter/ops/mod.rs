// Both modules only add `impl Interpreter` blocks
pub mod binary;
pub mod unary;
