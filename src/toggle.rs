//! Expand/collapse behavior of the "full info" panels on a generated page.
//!
//! Every RDF object on a page has a panel with its full attribute table and a control labelled
//! "Show more" or "Show less". Clicking the control slides the panel open or closed and relabels
//! the control once the transition has finished. Navigating to an object's fragment expands its
//! panel, but never collapses it.
//!
//! The controller does not know how panels are drawn. A [Host] provides the visibility query,
//! the animated transition and the label setter, and reports finished transitions back through
//! [PanelController::transition_finished]. `data/rdfconv.js` is the browser host of the same
//! behavior; [MemoryHost] runs it without a browser.
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Duration of the slide transition.
pub const TRANSITION: Duration = Duration::from_millis(400);

/// Text of a toggle control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    ShowMore,
    ShowLess,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Label::ShowMore => "Show more",
            Label::ShowLess => "Show less",
        }
    }

    /// "Show less" if and only if the panel is visible.
    pub fn for_visibility(visible: bool) -> Label {
        if visible {
            Label::ShowLess
        } else {
            Label::ShowMore
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Collapsed,
    Expanded,
}

impl PanelState {
    pub fn from_visibility(visible: bool) -> PanelState {
        if visible {
            PanelState::Expanded
        } else {
            PanelState::Collapsed
        }
    }
}

/// The environment that owns the panels and controls.
pub trait Host {
    type Panel;
    type Control;

    fn is_visible(&self, panel: &Self::Panel) -> bool;

    /// Starts an animated visibility transition of `panel`. Requests for a panel that is still
    /// animating are queued. When a transition ends the host must call
    /// [PanelController::transition_finished] with the same `id`.
    fn slide_toggle(&mut self, id: &str, panel: &Self::Panel, duration: Duration);

    fn set_label(&mut self, control: &Self::Control, label: Label);
}

/// Panel and control of one RDF object.
#[derive(Debug, Clone)]
pub struct PanelBinding<P, C> {
    pub panel: P,
    pub control: C,
}

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The control of the object with this id was clicked.
    Click(String),
    /// The URL fragment changed to this value.
    FragmentChange(String),
    /// The transition of the object with this id has finished.
    TransitionEnd(String),
}

/// Maps object ids to their panel and control and implements the toggle behavior on top of a [Host].
pub struct PanelController<H: Host> {
    bindings: HashMap<String, PanelBinding<H::Panel, H::Control>>,
    duration: Duration,
}

impl<H: Host> PanelController<H> {
    /// Binds every object of a page, given as (object id, binding) pairs. Call once per page.
    pub fn setup<I>(root: I) -> Self
    where
        I: IntoIterator<Item = (String, PanelBinding<H::Panel, H::Control>)>,
    {
        let bindings: HashMap<_, _> = root.into_iter().collect();
        log::debug!("bound {} panels", bindings.len());
        PanelController { bindings, duration: TRANSITION }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn binding(&self, id: &str) -> Option<&PanelBinding<H::Panel, H::Control>> {
        self.bindings.get(id)
    }

    pub fn state(&self, host: &H, id: &str) -> Option<PanelState> {
        self.bindings.get(id).map(|b| PanelState::from_visibility(host.is_visible(&b.panel)))
    }

    /// Starts the transition of the object's panel. Shared by clicks and fragment navigation.
    /// Returns false if no such object is bound.
    pub fn toggle(&self, host: &mut H, id: &str) -> bool {
        match self.bindings.get(id) {
            Some(binding) => {
                host.slide_toggle(id, &binding.panel, self.duration);
                true
            }
            None => false,
        }
    }

    pub fn on_toggle_click(&self, host: &mut H, id: &str) {
        if !self.toggle(host, id) {
            log::trace!("click on unbound control {id}");
        }
    }

    /// Expands the panel of the object the fragment points to, unless it is visible already.
    /// Returns whether a transition was started.
    pub fn on_fragment_change(&self, host: &mut H, fragment: &str) -> bool {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        let Some(binding) = self.bindings.get(id) else {
            return false;
        };
        if host.is_visible(&binding.panel) {
            return false;
        }
        self.toggle(host, id)
    }

    /// Relabels the control according to the panel's visibility after its transition.
    pub fn transition_finished(&self, host: &mut H, id: &str) {
        if let Some(binding) = self.bindings.get(id) {
            let label = Label::for_visibility(host.is_visible(&binding.panel));
            host.set_label(&binding.control, label);
        }
    }

    pub fn handle(&self, host: &mut H, event: &Event) {
        match event {
            Event::Click(id) => self.on_toggle_click(host, id),
            Event::FragmentChange(fragment) => {
                self.on_fragment_change(host, fragment);
            }
            Event::TransitionEnd(id) => self.transition_finished(host, id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Opening,
    Closing,
}

#[derive(Debug)]
struct MemoryPanel {
    visible: bool,
    label: Label,
    /// queued transitions, the front one is running
    queue: VecDeque<Duration>,
    running: Option<Direction>,
}

/// A host without a browser. Panels start collapsed, transitions complete when
/// [MemoryHost::finish_transitions] is called. Like a slide animation, an opening panel is visible
/// from the moment its transition starts and a closing one until its transition ends.
#[derive(Debug, Default)]
pub struct MemoryHost {
    panels: HashMap<String, MemoryPanel>,
}

impl MemoryHost {
    /// A page with the given object ids and the controller bound to it.
    pub fn page<I, S>(ids: I) -> (MemoryHost, PanelController<MemoryHost>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = MemoryHost::default();
        let mut bindings = Vec::new();
        for id in ids {
            let id = id.into();
            host.panels.insert(id.clone(), MemoryPanel { visible: false, label: Label::ShowMore, queue: VecDeque::new(), running: None });
            bindings.push((id.clone(), PanelBinding { panel: id.clone(), control: id }));
        }
        (host, PanelController::setup(bindings))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.panels.get(id).is_some_and(|p| p.visible)
    }

    pub fn label(&self, id: &str) -> Option<Label> {
        self.panels.get(id).map(|p| p.label)
    }

    /// Number of transitions running or queued.
    pub fn pending(&self) -> usize {
        self.panels.values().map(|p| p.queue.len()).sum()
    }

    /// Duration of the transition currently running on a panel.
    pub fn running_duration(&self, id: &str) -> Option<Duration> {
        self.panels.get(id).filter(|p| p.running.is_some()).and_then(|p| p.queue.front().copied())
    }

    fn start(panel: &mut MemoryPanel) {
        let direction = if panel.visible { Direction::Closing } else { Direction::Opening };
        if direction == Direction::Opening {
            panel.visible = true;
        }
        panel.running = Some(direction);
    }

    /// Ends the running transition of a panel and starts the next queued one.
    /// Returns false if nothing was running.
    fn finish(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.get_mut(id) else { return false };
        let Some(direction) = panel.running.take() else { return false };
        panel.queue.pop_front();
        if direction == Direction::Closing {
            panel.visible = false;
        }
        if !panel.queue.is_empty() {
            Self::start(panel);
        }
        true
    }

    /// Runs all running and queued transitions to completion, notifying the controller after each.
    pub fn finish_transitions(&mut self, controller: &PanelController<MemoryHost>) {
        loop {
            let mut running: Vec<String> = self.panels.iter().filter(|(_, p)| p.running.is_some()).map(|(id, _)| id.clone()).collect();
            if running.is_empty() {
                break;
            }
            running.sort();
            for id in running {
                if self.finish(&id) {
                    controller.transition_finished(self, &id);
                }
            }
        }
    }
}

impl Host for MemoryHost {
    type Panel = String;
    type Control = String;

    fn is_visible(&self, panel: &String) -> bool {
        MemoryHost::is_visible(self, panel)
    }

    fn slide_toggle(&mut self, _id: &str, panel: &String, duration: Duration) {
        if let Some(p) = self.panels.get_mut(panel) {
            p.queue.push_back(duration);
            if p.running.is_none() {
                Self::start(p);
            }
        }
    }

    fn set_label(&mut self, control: &String, label: Label) {
        if let Some(p) = self.panels.get_mut(control) {
            p.label = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryHost, PanelController<MemoryHost>) {
        MemoryHost::page(["obj1", "obj2"])
    }

    #[test]
    fn click_expands_then_relabels_after_transition() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        // the label only changes once the transition is done
        assert_eq!(host.label("obj1"), Some(Label::ShowMore));
        host.finish_transitions(&controller);
        assert!(host.is_visible("obj1"));
        assert_eq!(host.label("obj1"), Some(Label::ShowLess));
        assert_eq!(controller.state(&host, "obj1"), Some(PanelState::Expanded));
        assert_eq!(controller.state(&host, "obj2"), Some(PanelState::Collapsed));
    }

    #[test]
    fn click_on_expanded_collapses() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        host.finish_transitions(&controller);
        controller.on_toggle_click(&mut host, "obj1");
        host.finish_transitions(&controller);
        assert!(!host.is_visible("obj1"));
        assert_eq!(host.label("obj1"), Some(Label::ShowMore));
    }

    #[test]
    fn fragment_expands_collapsed_panel() {
        let (mut host, controller) = page();
        assert!(controller.on_fragment_change(&mut host, "#obj2"));
        host.finish_transitions(&controller);
        assert!(host.is_visible("obj2"));
        assert_eq!(host.label("obj2"), Some(Label::ShowLess));
        assert!(!host.is_visible("obj1"));
    }

    #[test]
    fn fragment_never_collapses() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        host.finish_transitions(&controller);
        assert!(!controller.on_fragment_change(&mut host, "obj1"));
        assert_eq!(host.pending(), 0);
        host.finish_transitions(&controller);
        assert!(host.is_visible("obj1"));
        assert_eq!(host.label("obj1"), Some(Label::ShowLess));
    }

    #[test]
    fn unknown_fragment_changes_nothing() {
        let (mut host, controller) = page();
        assert!(!controller.on_fragment_change(&mut host, "#nowhere"));
        assert!(!controller.on_fragment_change(&mut host, ""));
        assert_eq!(host.pending(), 0);
        for id in ["obj1", "obj2"] {
            assert!(!host.is_visible(id));
            assert_eq!(host.label(id), Some(Label::ShowMore));
        }
    }

    #[test]
    fn malformed_fragment_changes_nothing() {
        let (mut host, controller) = page();
        assert!(!controller.on_fragment_change(&mut host, "#%E0"));
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn fragment_while_opening_does_not_queue_a_second_toggle() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        assert!(!controller.on_fragment_change(&mut host, "obj1"));
        assert_eq!(host.pending(), 1);
        host.finish_transitions(&controller);
        assert_eq!(host.label("obj1"), Some(Label::ShowLess));
    }

    #[test]
    fn repeated_clicks_are_queued() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        controller.on_toggle_click(&mut host, "obj1");
        controller.on_toggle_click(&mut host, "obj1");
        assert_eq!(host.pending(), 3);
        host.finish_transitions(&controller);
        assert!(host.is_visible("obj1"));
        assert_eq!(host.label("obj1"), Some(Label::ShowLess));
    }

    #[test]
    fn click_without_binding_is_a_noop() {
        let (mut host, controller) = page();
        controller.handle(&mut host, &Event::Click("missing".into()));
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn click_click_navigate_navigate() {
        let (mut host, controller) = MemoryHost::page(["obj1"]);
        let run = |event: Event, host: &mut MemoryHost| {
            controller.handle(host, &event);
            host.finish_transitions(&controller);
            (host.is_visible("obj1"), host.label("obj1"))
        };
        assert_eq!(run(Event::Click("obj1".into()), &mut host), (true, Some(Label::ShowLess)));
        assert_eq!(run(Event::Click("obj1".into()), &mut host), (false, Some(Label::ShowMore)));
        assert_eq!(run(Event::FragmentChange("#obj1".into()), &mut host), (true, Some(Label::ShowLess)));
        assert_eq!(run(Event::FragmentChange("#obj1".into()), &mut host), (true, Some(Label::ShowLess)));
    }

    #[test]
    fn transitions_use_the_configured_duration() {
        let (mut host, controller) = page();
        controller.on_toggle_click(&mut host, "obj1");
        assert_eq!(host.running_duration("obj1"), Some(TRANSITION));
        assert_eq!(host.running_duration("obj2"), None);
        host.finish_transitions(&controller);

        let (mut host, controller) = MemoryHost::page(["obj1"]);
        let controller = controller.with_duration(Duration::ZERO);
        controller.on_fragment_change(&mut host, "#obj1");
        assert_eq!(host.running_duration("obj1"), Some(Duration::ZERO));
    }

    #[test]
    fn setup_binds_panel_and_control_by_id() {
        let (_, controller) = page();
        let binding = controller.binding("obj2").unwrap();
        assert_eq!((binding.panel.as_str(), binding.control.as_str()), ("obj2", "obj2"));
        assert!(controller.binding("obj3").is_none());
    }

    #[test]
    fn label_matches_visibility() {
        assert_eq!(Label::for_visibility(true).to_string(), "Show less");
        assert_eq!(Label::for_visibility(false).to_string(), "Show more");
    }
}
