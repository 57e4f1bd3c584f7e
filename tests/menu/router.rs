use plex_tray::menu::router::{EventRoute, EventRouter, HandlerResult};
use plex_tray::menu::MenuAction;
use std::cell::RefCell;

#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<MenuAction>>,
}

fn record_toggle(ctx: &Recorder) -> anyhow::Result<HandlerResult> {
    ctx.calls.borrow_mut().push(MenuAction::Toggle);
    Ok(HandlerResult::Continue)
}

fn record_quit(ctx: &Recorder) -> anyhow::Result<HandlerResult> {
    ctx.calls.borrow_mut().push(MenuAction::Quit);
    Ok(HandlerResult::Quit)
}

fn router() -> EventRouter<Recorder> {
    EventRouter::new(vec![
        EventRoute { action: MenuAction::Toggle, handler: record_toggle },
        EventRoute { action: MenuAction::Quit, handler: record_quit },
    ])
}

#[test]
fn router_dispatches_by_action_id() {
    // Arrange
    let router = router();
    let ctx = Recorder::default();

    // Act
    let toggle = router.route(MenuAction::Toggle.id(), &ctx).unwrap();
    let quit = router.route(MenuAction::Quit.id(), &ctx).unwrap();

    // Assert
    assert!(matches!(toggle, HandlerResult::Continue));
    assert!(matches!(quit, HandlerResult::Quit));
    assert_eq!(*ctx.calls.borrow(), vec![MenuAction::Toggle, MenuAction::Quit]);
}

#[test]
fn router_ignores_unknown_ids() {
    // Arrange
    let router = router();
    let ctx = Recorder::default();

    // Act
    let results: Vec<_> = ["", "__toggle", "plugin::__quit__", "__QUIT__"]
        .iter()
        .map(|id| router.route(id, &ctx).unwrap())
        .collect();

    // Assert
    assert!(results.iter().all(|r| matches!(r, HandlerResult::Continue)));
    assert!(ctx.calls.borrow().is_empty());
}

#[test]
fn router_continues_when_action_has_no_route() {
    // Arrange
    let router = router();
    let ctx = Recorder::default();

    // Act
    let result = router.route(MenuAction::OpenWeb.id(), &ctx).unwrap();

    // Assert
    assert!(matches!(result, HandlerResult::Continue));
    assert!(ctx.calls.borrow().is_empty());
}

#[test]
fn router_uses_first_matching_route_when_multiple_match() {
    // Arrange
    let router = EventRouter::new(vec![
        EventRoute { action: MenuAction::Quit, handler: record_toggle },
        EventRoute { action: MenuAction::Quit, handler: record_quit },
    ]);
    let ctx = Recorder::default();

    // Act
    let result = router.route(MenuAction::Quit.id(), &ctx).unwrap();

    // Assert
    assert!(matches!(result, HandlerResult::Continue));
    assert_eq!(*ctx.calls.borrow(), vec![MenuAction::Toggle]);
}

#[test]
fn router_propagates_handler_errors() {
    // Arrange
    let router: EventRouter<Recorder> = EventRouter::new(vec![EventRoute {
        action: MenuAction::OpenRepo,
        handler: |_| anyhow::bail!("xdg-open missing"),
    }]);
    let ctx = Recorder::default();

    // Act
    let result = router.route(MenuAction::OpenRepo.id(), &ctx);

    // Assert
    let err = result.err().unwrap();
    assert_eq!(err.to_string(), "xdg-open missing");
}
