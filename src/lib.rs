// Library surface for the binary and for headless/integration tests.
// Rendering lives in the binary; everything here is terminal-agnostic
// apart from key translation.
pub mod app_dirs;
pub mod config;
pub mod diff;
pub mod explain;
pub mod hint;
pub mod keymap;
pub mod markup;
pub mod normalize;
pub mod practice;
pub mod progress;
pub mod runtime;
pub mod scoring;
pub mod session;
