//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};
use crate::engine::ModelUrl;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::OpenFileRequested => vec![AppCommand::RequestOpenFileDialog],
        AppIntent::FileSelected { path } => vec![AppCommand::LoadModel {
            url: ModelUrl::new(path),
        }],
        AppIntent::CloseModelRequested => vec![AppCommand::DisposeModel],
        AppIntent::ExitRequested => vec![AppCommand::DisposeModel, AppCommand::RequestExit],
        AppIntent::PrePickRequested { point } => {
            // Hover ohne Modell oder bei deaktivierter Option erzeugt keinen Command,
            // sonst liefe das Command-Log bei jeder Mausbewegung voll.
            if state.options.prepick_on_hover && state.session.active().is_some() {
                vec![AppCommand::PrePick { point }]
            } else {
                vec![]
            }
        }
        AppIntent::PickRequested { point } => vec![AppCommand::PickElement { point }],
        AppIntent::ClearPickRequested => vec![AppCommand::ClearPick],
        AppIntent::HideSelectedRequested => vec![AppCommand::HideSelected],
        AppIntent::ShowAllRequested => vec![AppCommand::ShowAll],
        AppIntent::CreateClippingPlaneRequested { point } => {
            vec![AppCommand::CreateClippingPlane { point }]
        }
        AppIntent::DeleteClippingPlaneRequested { point } => {
            vec![AppCommand::DeleteClippingPlane { point }]
        }
        AppIntent::HelpersToggled { grid, axes } => vec![AppCommand::SetHelpers { grid, axes }],
    }
}

#[cfg(test)]
mod tests;
