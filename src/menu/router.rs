use super::MenuAction;
use anyhow::Result;

pub enum HandlerResult {
    Continue,
    Quit,
}

pub type EventHandler<C> = fn(&C) -> Result<HandlerResult>;

pub struct EventRoute<C> {
    pub action: MenuAction,
    pub handler: EventHandler<C>,
}

/// Maps menu item ids to handlers over a shared context.
pub struct EventRouter<C> {
    routes: Vec<EventRoute<C>>,
}

impl<C> EventRouter<C> {
    pub fn new(routes: Vec<EventRoute<C>>) -> Self {
        Self { routes }
    }

    pub fn route(&self, event_id: &str, ctx: &C) -> Result<HandlerResult> {
        let Some(action) = MenuAction::from_id(event_id) else {
            log::warn!("Unknown menu event: {}", event_id);
            return Ok(HandlerResult::Continue);
        };

        match self.routes.iter().find(|route| route.action == action) {
            Some(route) => (route.handler)(ctx),
            None => {
                log::warn!("No route found for event: {}", event_id);
                Ok(HandlerResult::Continue)
            }
        }
    }
}
