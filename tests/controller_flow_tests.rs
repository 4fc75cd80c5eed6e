mod common;

use common::{ids, FakeEngine};
use ifc_subset_viewer::{AppCommand, AppController, AppIntent, AppState, ElementId, ViewerOptions};

fn controller_with_house() -> AppController<FakeEngine> {
    AppController::new(FakeEngine::new().with_model("/tmp/haus.ifc", &[1, 2, 3]))
}

fn open_house(controller: &mut AppController<FakeEngine>, state: &mut AppState) {
    controller
        .handle_intent(
            state,
            AppIntent::FileSelected {
                path: "/tmp/haus.ifc".to_string(),
            },
        )
        .expect("FileSelected sollte ohne Fehler durchlaufen");
}

fn pick(controller: &mut AppController<FakeEngine>, state: &mut AppState, id: u32) {
    controller.engine_mut().pick_target = Some(ElementId(id));
    controller
        .handle_intent(
            state,
            AppIntent::PickRequested {
                point: glam::Vec2::ZERO,
            },
        )
        .expect("PickRequested sollte ohne Fehler durchlaufen");
}

#[test]
fn test_exit_requested_sets_exit_flag_and_logs_command() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();

    assert!(!state.should_exit);

    controller
        .handle_intent(&mut state, AppIntent::ExitRequested)
        .expect("ExitRequested sollte ohne Fehler durchlaufen");

    assert!(state.should_exit);

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");

    match last {
        AppCommand::RequestExit => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_open_file_requested_sets_dialog_flag() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();

    controller
        .handle_intent(&mut state, AppIntent::OpenFileRequested)
        .expect("OpenFileRequested sollte ohne Fehler durchlaufen");

    assert!(state.ui.show_file_dialog);
}

#[test]
fn test_file_selected_loads_model_and_reports_count() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();

    open_house(&mut controller, &mut state);

    assert!(state.has_model());
    assert_eq!(state.visible_counts(), Some((3, 3)));
    assert_eq!(state.ui.current_file_path.as_deref(), Some("/tmp/haus.ifc"));
    let msg = state.ui.status_message.as_deref().unwrap_or_default();
    assert!(msg.contains("3 Elemente"), "Statusmeldung: {msg}");
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::LoadModel { .. })
    ));
}

#[test]
fn test_pick_hide_show_all_through_intents() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);

    pick(&mut controller, &mut state, 2);
    assert_eq!(state.session.picked(), Some(ElementId(2)));

    controller
        .handle_intent(&mut state, AppIntent::HideSelectedRequested)
        .expect("HideSelected sollte ohne Fehler durchlaufen");

    assert_eq!(state.visible_counts(), Some((2, 3)));
    let subset = state.session.active().expect("aktives Modell").subset;
    assert_eq!(controller.engine().subset_ids(subset), ids(&[1, 3]));

    controller
        .handle_intent(&mut state, AppIntent::ShowAllRequested)
        .expect("ShowAll sollte ohne Fehler durchlaufen");

    assert_eq!(state.visible_counts(), Some((3, 3)));
    assert_eq!(controller.engine().attach_count(subset), 1);
}

#[test]
fn test_hide_without_pick_shows_notice() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);

    controller
        .handle_intent(&mut state, AppIntent::HideSelectedRequested)
        .expect("fehlende Auswahl ist kein harter Fehler");

    assert_eq!(state.ui.status_message.as_deref(), Some("Nichts ausgewählt"));
    assert_eq!(state.visible_counts(), Some((3, 3)));
}

#[test]
fn test_actions_without_model_are_silent() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();

    controller
        .handle_intent(
            &mut state,
            AppIntent::PickRequested {
                point: glam::Vec2::ZERO,
            },
        )
        .expect("Pick ohne Modell sollte durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::ShowAllRequested)
        .expect("ShowAll ohne Modell sollte durchlaufen");

    assert_eq!(state.ui.status_message, None);
    assert!(controller.engine().scene.is_empty());
}

#[test]
fn test_failed_load_keeps_model_and_shows_notice() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);

    controller
        .handle_intent(
            &mut state,
            AppIntent::FileSelected {
                path: "/tmp/fehlt.ifc".to_string(),
            },
        )
        .expect("Ladefehler ist kein harter Fehler");

    let msg = state.ui.status_message.as_deref().unwrap_or_default();
    assert!(msg.contains("/tmp/fehlt.ifc"), "Statusmeldung: {msg}");
    assert_eq!(state.ui.current_file_path.as_deref(), Some("/tmp/haus.ifc"));
    assert_eq!(state.visible_counts(), Some((3, 3)));
}

#[test]
fn test_background_load_completes_on_poll_without_logging() {
    let mut controller = controller_with_house();
    controller.engine_mut().hold_loads(true);
    let mut state = AppState::new();

    open_house(&mut controller, &mut state);
    assert!(!state.has_model());
    assert!(state.session.has_outstanding_loads());

    controller.engine_mut().release("/tmp/haus.ifc");
    let logged_before = state.command_log.len();
    controller
        .poll_model_load(&mut state)
        .expect("Poll sollte ohne Fehler durchlaufen");

    assert!(state.has_model());
    assert_eq!(state.command_log.len(), logged_before);
}

#[test]
fn test_escape_clears_pick_and_highlight() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);
    pick(&mut controller, &mut state, 1);
    assert_eq!(controller.engine().highlight, Some(ElementId(1)));

    controller
        .handle_intent(&mut state, AppIntent::ClearPickRequested)
        .expect("ClearPick sollte ohne Fehler durchlaufen");

    assert_eq!(state.session.picked(), None);
    assert_eq!(controller.engine().highlight, None);
}

#[test]
fn test_prepick_respects_option_and_model() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    let hover = AppIntent::PrePickRequested {
        point: glam::Vec2::new(0.1, 0.1),
    };

    controller
        .handle_intent(&mut state, hover.clone())
        .expect("PrePick ohne Modell");
    assert!(state.command_log.is_empty());

    open_house(&mut controller, &mut state);
    controller
        .handle_intent(&mut state, hover.clone())
        .expect("PrePick mit Modell");
    assert_eq!(controller.engine().prepick_calls, 1);

    state.options = ViewerOptions {
        prepick_on_hover: false,
        ..ViewerOptions::default()
    };
    controller
        .handle_intent(&mut state, hover)
        .expect("PrePick deaktiviert");
    assert_eq!(controller.engine().prepick_calls, 1);
}

#[test]
fn test_clipping_planes_need_a_model() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    let point = glam::Vec2::new(0.3, 0.0);

    controller
        .handle_intent(&mut state, AppIntent::CreateClippingPlaneRequested { point })
        .expect("Clipping ohne Modell");
    assert!(controller.engine().clipping_planes.is_empty());

    open_house(&mut controller, &mut state);
    controller
        .handle_intent(&mut state, AppIntent::CreateClippingPlaneRequested { point })
        .expect("Clipping mit Modell");
    assert_eq!(controller.engine().clipping_planes, vec![point]);

    controller
        .handle_intent(&mut state, AppIntent::DeleteClippingPlaneRequested { point })
        .expect("Clipping löschen");
    assert!(controller.engine().clipping_planes.is_empty());
}

#[test]
fn test_helpers_toggled_updates_engine_and_ui() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();

    controller
        .handle_intent(
            &mut state,
            AppIntent::HelpersToggled {
                grid: false,
                axes: true,
            },
        )
        .expect("HelpersToggled sollte ohne Fehler durchlaufen");

    assert!(!state.ui.show_grid);
    assert!(state.ui.show_axes);
    assert_eq!(controller.engine().helpers, Some((false, true)));
}

#[test]
fn test_close_model_disposes_everything() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);

    controller
        .handle_intent(&mut state, AppIntent::CloseModelRequested)
        .expect("CloseModel sollte ohne Fehler durchlaufen");

    assert!(!state.has_model());
    assert_eq!(state.ui.current_file_path, None);
    assert!(controller.engine().models.is_empty());
    assert!(controller.engine().scene.is_empty());
}

#[test]
fn test_engine_failure_during_hide_is_returned() {
    let mut controller = controller_with_house();
    let mut state = AppState::new();
    open_house(&mut controller, &mut state);
    pick(&mut controller, &mut state, 3);
    controller.engine_mut().fail_next_remove = true;

    let result = controller.handle_intent(&mut state, AppIntent::HideSelectedRequested);

    assert!(result.is_err());
    assert_eq!(state.visible_counts(), Some((3, 3)));
}
