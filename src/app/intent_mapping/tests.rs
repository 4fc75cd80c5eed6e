use crate::app::{AppCommand, AppIntent, AppState};
use crate::engine::ModelUrl;

use super::map_intent_to_commands;

#[test]
fn file_selected_maps_to_load_model_with_url() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::FileSelected {
            path: "/tmp/haus.ifc".to_string(),
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::LoadModel {
            url: ModelUrl::new("/tmp/haus.ifc")
        }]
    );
}

#[test]
fn prepick_without_model_maps_to_nothing() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PrePickRequested {
            point: glam::Vec2::ZERO,
        },
    );

    assert!(commands.is_empty());
}

#[test]
fn hide_selected_maps_even_without_selection() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::HideSelectedRequested);

    assert_eq!(commands, vec![AppCommand::HideSelected]);
}

#[test]
fn exit_requested_disposes_before_exit() {
    let state = AppState::new();

    let commands = map_intent_to_commands(&state, AppIntent::ExitRequested);

    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[0], AppCommand::DisposeModel));
    assert!(matches!(commands[1], AppCommand::RequestExit));
}

#[test]
fn clipping_intents_keep_pointer_position() {
    let state = AppState::new();
    let point = glam::Vec2::new(0.25, -0.5);

    let create = map_intent_to_commands(&state, AppIntent::CreateClippingPlaneRequested { point });
    let delete = map_intent_to_commands(&state, AppIntent::DeleteClippingPlaneRequested { point });

    assert_eq!(create, vec![AppCommand::CreateClippingPlane { point }]);
    assert_eq!(delete, vec![AppCommand::DeleteClippingPlane { point }]);
}
