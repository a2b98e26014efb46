use crate::event::TerminalEvent;
use ratatui::layout::Position;
use std::any::TypeId;
use std::hash::{Hash, Hasher};

type Handler<Msg> = Box<dyn Fn(&TerminalEvent) -> Option<Msg> + Send + Sync>;

/// An event listener declared by a model or component.
///
/// Subscriptions are returned from [`Model::subscriptions`](crate::Model::subscriptions)
/// and reconciled by a [`ListenerSet`] after every update: new ids are
/// registered, ids that disappeared are released, and ids that stay have
/// their handler swapped for the freshly declared one. Declaring a listener
/// only while some state holds therefore ties its lifetime to that state.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) handler: Handler<Msg>,
}

/// Identity for diffing subscriptions between update cycles.
///
/// Composed of a Rust [`TypeId`] and a numeric discriminant, so two widgets
/// of the same type can listen side by side under different discriminants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    type_name: &'static str,
    discriminant: u64,
}

impl SubscriptionId {
    /// Create an ID from a type and a numeric discriminant.
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            discriminant,
        }
    }

    /// Create an ID from a type alone (for singletons).
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// Create an ID from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self::new::<T>(hasher.finish())
    }

    /// Fully qualified name of the owning type, for logs.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The numeric discriminant.
    pub fn discriminant(&self) -> u64 {
        self.discriminant
    }
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create a listener from an id and a raw event handler.
    pub fn new(
        id: SubscriptionId,
        handler: impl Fn(&TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
    ) -> Self {
        Subscription {
            id,
            handler: Box::new(handler),
        }
    }

    /// The identity used for reconciliation.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Run the handler against one event.
    pub fn handle(&self, event: &TerminalEvent) -> Option<Msg> {
        (self.handler)(event)
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let inner = self.handler;
        Subscription {
            id: self.id,
            handler: Box::new(move |event| inner(event).map(&f)),
        }
    }
}

/// Marker type identifying the catch-all terminal event listener.
pub struct TerminalEvents;

/// Listen to every terminal event, mapping each through `map`.
///
/// Return `Some(Msg)` to forward the event or `None` to discard it. There is
/// one such listener per model, keyed by [`TerminalEvents`].
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::KeyPress(key)),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    Subscription::new(SubscriptionId::of::<TerminalEvents>(), move |event| {
        map(event.clone())
    })
}

/// Listen to left-button presses anywhere on screen.
///
/// This is the terminal counterpart of a document-level `mousedown`
/// listener: popups declare it while open to notice presses outside
/// themselves.
pub fn pointer_presses<Msg: Send + 'static>(
    id: SubscriptionId,
    map: impl Fn(Position) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    Subscription::new(id, move |event| event.pointer_press().and_then(&map))
}

/// Lifetime counters kept by a [`ListenerSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerStats {
    /// Listeners registered since creation.
    pub registered: u64,
    /// Listeners released since creation.
    pub released: u64,
}

impl ListenerStats {
    /// Listeners currently alive.
    pub fn live(&self) -> u64 {
        self.registered - self.released
    }
}

/// The registry of active listeners, diffed against each declared set.
///
/// Dispatch order follows declaration order. Dropping the set releases every
/// listener, so a torn-down model cannot leave handlers behind.
pub struct ListenerSet<Msg: Send + 'static> {
    active: Vec<(SubscriptionId, Handler<Msg>)>,
    stats: ListenerStats,
}

impl<Msg: Send + 'static> ListenerSet<Msg> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            stats: ListenerStats::default(),
        }
    }

    /// Diff declared listeners against active ones.
    ///
    /// Registers new ids, releases missing ids, and swaps the handler of ids
    /// that stay. When an id is declared twice the later declaration wins.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut next: Vec<(SubscriptionId, Handler<Msg>)> = Vec::with_capacity(declared.len());
        for sub in declared {
            match next.iter_mut().find(|(id, _)| *id == sub.id) {
                Some(slot) => slot.1 = sub.handler,
                None => next.push((sub.id, sub.handler)),
            }
        }

        for (id, _) in &self.active {
            if !next.iter().any(|(n, _)| n == id) {
                self.stats.released += 1;
                tracing::debug!(
                    listener = id.type_name(),
                    discriminant = id.discriminant(),
                    "listener released"
                );
            }
        }

        for (id, _) in &next {
            if !self.active.iter().any(|(a, _)| a == id) {
                self.stats.registered += 1;
                tracing::debug!(
                    listener = id.type_name(),
                    discriminant = id.discriminant(),
                    "listener registered"
                );
            }
        }

        self.active = next;
    }

    /// Run every active listener against `event`, collecting messages.
    pub fn dispatch(&self, event: &TerminalEvent) -> Vec<Msg> {
        self.active
            .iter()
            .filter_map(|(_, handler)| handler(event))
            .collect()
    }

    /// Release every active listener.
    pub fn shutdown(&mut self) {
        if self.active.is_empty() {
            return;
        }
        self.stats.released += self.active.len() as u64;
        tracing::debug!(count = self.active.len(), "releasing all listeners");
        self.active.clear();
    }

    /// Whether a listener with this id is active.
    pub fn contains(&self, id: &SubscriptionId) -> bool {
        self.active.iter().any(|(a, _)| a == id)
    }

    /// Number of active listeners.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no listener is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Registration and release counters.
    pub fn stats(&self) -> ListenerStats {
        self.stats
    }
}

impl<Msg: Send + 'static> Default for ListenerSet<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Msg: Send + 'static> Drop for ListenerSet<Msg> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

    struct Popup;

    fn press(column: u16, row: u16) -> TerminalEvent {
        TerminalEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn popup_listener(tag: &'static str) -> Subscription<String> {
        pointer_presses(SubscriptionId::of::<Popup>(), move |pos| {
            Some(format!("{tag}@{},{}", pos.x, pos.y))
        })
    }

    #[test]
    fn subscription_id_equality() {
        assert_eq!(SubscriptionId::of::<String>(), SubscriptionId::of::<String>());
        assert_ne!(SubscriptionId::of::<String>(), SubscriptionId::of::<i32>());
        assert_ne!(
            SubscriptionId::new::<String>(1),
            SubscriptionId::new::<String>(2)
        );
    }

    #[test]
    fn subscription_id_with_str() {
        let a = SubscriptionId::with_str::<String>("a");
        assert_ne!(a, SubscriptionId::with_str::<String>("b"));
        assert_eq!(a, SubscriptionId::with_str::<String>("a"));
    }

    #[test]
    fn reconcile_registers_and_releases() {
        let mut set = ListenerSet::new();
        set.reconcile(vec![popup_listener("open")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.stats().registered, 1);

        set.reconcile(vec![]);
        assert!(set.is_empty());
        assert_eq!(set.stats().released, 1);
        assert_eq!(set.stats().live(), 0);
    }

    #[test]
    fn redeclaring_same_id_does_not_register_twice() {
        let mut set = ListenerSet::new();
        set.reconcile(vec![popup_listener("first")]);
        set.reconcile(vec![popup_listener("second")]);
        set.reconcile(vec![popup_listener("third"), popup_listener("fourth")]);
        assert_eq!(set.len(), 1);
        assert_eq!(set.stats().registered, 1);
        assert_eq!(set.stats().released, 0);
    }

    #[test]
    fn kept_listener_uses_latest_handler() {
        let mut set = ListenerSet::new();
        set.reconcile(vec![popup_listener("old")]);
        set.reconcile(vec![popup_listener("new")]);
        assert_eq!(set.dispatch(&press(1, 2)), vec!["new@1,2".to_string()]);
    }

    #[test]
    fn repeated_cycles_do_not_leak() {
        let mut set = ListenerSet::new();
        for _ in 0..50 {
            set.reconcile(vec![popup_listener("open")]);
            set.reconcile(vec![]);
        }
        assert!(set.is_empty());
        assert_eq!(set.stats().registered, 50);
        assert_eq!(set.stats().released, 50);
    }

    #[test]
    fn dispatch_follows_declaration_order() {
        let mut set = ListenerSet::new();
        set.reconcile(vec![
            pointer_presses(SubscriptionId::new::<Popup>(1), |_| Some("one".to_string())),
            terminal_events(|_| Some("all".to_string())),
        ]);
        assert_eq!(set.dispatch(&press(0, 0)), vec!["one", "all"]);
        assert_eq!(set.dispatch(&TerminalEvent::FocusLost), vec!["all"]);
    }

    #[test]
    fn map_transforms_messages() {
        let sub = popup_listener("x").map(|s| s.len());
        assert_eq!(sub.handle(&press(1, 1)), Some(5));
        assert_eq!(sub.handle(&TerminalEvent::FocusGained), None);
    }

    #[test]
    fn shutdown_releases_everything() {
        let mut set = ListenerSet::new();
        set.reconcile(vec![
            popup_listener("a"),
            terminal_events(|_| Some(String::new())),
        ]);
        set.shutdown();
        assert!(set.is_empty());
        assert_eq!(set.stats().released, 2);
    }
}
