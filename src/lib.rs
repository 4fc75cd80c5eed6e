//! IFC Subset Viewer Library.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod app;
pub mod core;
pub mod engine;
pub mod render;
pub mod shared;
pub mod ui;

pub use app::{AppCommand, AppController, AppIntent, AppState, UiState};
pub use core::{
    LoadOutcome, LoadTicket, SessionPhase, SessionSettings, ViewerError, ViewerSession, VisibleSet,
};
pub use engine::{
    ElementId, EngineError, LoadDispatch, ModelHandle, ModelUrl, SceneEngine, ScreenPoint,
    SubsetId, SubsetMaterial, ViewerEngine,
};
pub use shared::ViewerOptions;
