//! Geteilte Typen für layer-übergreifende Verträge.
//!
//! Enthält die Laufzeit-Optionen, die von `app`, `ui` und `render`
//! gleichermaßen gelesen werden.

pub mod options;

pub use options::ViewerOptions;
