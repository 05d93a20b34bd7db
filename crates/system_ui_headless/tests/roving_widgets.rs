//! Composed-widget scenarios: roving navigation persisted through controllable state.

use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use system_ui_headless::{
    aria::{roving_tabindex, ItemAria, SelectionAttribute},
    handle_key_down, BehaviorConfig, ControllableOptions, ControllableState, KeyDisposition,
    KeyStroke, NavigationState, Orientation,
};

/// Tab list with automatic activation: moving the active tab also selects it.
struct Tabs {
    labels: Vec<&'static str>,
    selected: ControllableState<usize>,
}

impl Tabs {
    fn new(labels: Vec<&'static str>, selected: ControllableState<usize>) -> Self {
        Self { labels, selected }
    }

    fn key(&mut self, key: &str) -> KeyDisposition {
        let state = NavigationState::new(self.labels.len(), *self.selected.current())
            .orientation(Orientation::Horizontal)
            .looping(true);
        let selected = &mut self.selected;
        handle_key_down(&KeyStroke::new(key), &state, |next| selected.set(next), None)
    }

    fn tabindexes(&self) -> Vec<i32> {
        (0..self.labels.len())
            .map(|index| roving_tabindex(index, *self.selected.current()))
            .collect()
    }
}

#[test]
fn uncontrolled_tabs_follow_arrow_keys() {
    let mut tabs = Tabs::new(vec!["General", "Display", "Sound"], ControllableState::new(0));

    assert_eq!(tabs.key("ArrowRight"), KeyDisposition::Handled);
    assert_eq!(tabs.key("ArrowRight"), KeyDisposition::Handled);
    assert_eq!(*tabs.selected.current(), 2);
    assert_eq!(tabs.tabindexes(), vec![-1, -1, 0]);

    tabs.key("ArrowRight");
    assert_eq!(*tabs.selected.current(), 0);
    assert_eq!(tabs.key("ArrowDown"), KeyDisposition::Ignored);
}

#[test]
fn controlled_tabs_only_report_requests() {
    let requests = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&requests);
    let selected = ControllableState::create(ControllableOptions {
        value: Some(1),
        default_value: 0,
        on_change: Some(Box::new(move |next: &usize| sink.borrow_mut().push(*next))),
    });
    let mut tabs = Tabs::new(vec!["A", "B", "C"], selected);

    tabs.key("End");
    tabs.key("Home");

    assert_eq!(*requests.borrow(), vec![2, 0]);
    assert_eq!(*tabs.selected.current(), 1);
    assert_eq!(tabs.tabindexes(), vec![-1, 0, -1]);
}

#[test]
fn listbox_selects_active_option_on_enter() {
    let config = BehaviorConfig::from_json_str(r#"{"navigation":{"loop_focus":false}}"#)
        .expect("config");
    let mut active = ControllableState::new(0usize);
    let mut chosen = ControllableState::new(None::<usize>);

    for key in ["ArrowDown", "ArrowDown", "ArrowDown", "Enter"] {
        let state = NavigationState::from_config(config.navigation, 3, *active.current());
        let mut on_select = |index: usize| chosen.set(Some(index));
        handle_key_down(
            &KeyStroke::new(key),
            &state,
            |next| active.set(next),
            Some(&mut on_select),
        );
    }

    assert_eq!(*active.current(), 2);
    assert_eq!(*chosen.current(), Some(2));
    let options: Vec<ItemAria> = (0..3)
        .map(|index| {
            ItemAria::for_item(
                index,
                *active.current(),
                *chosen.current() == Some(index),
                SelectionAttribute::Selected,
                false,
            )
        })
        .collect();
    assert_eq!(options[2].selection, ("aria-selected", "true"));
    assert_eq!(options[0].selection, ("aria-selected", "false"));
}

#[test]
fn emptied_collection_stops_responding() {
    let mut active = ControllableState::new(3usize);
    let state = NavigationState::new(0, *active.current());
    let mut selected = Vec::new();
    let mut on_select = |index: usize| selected.push(index);

    for key in ["ArrowDown", "End", "Enter"] {
        let disposition = handle_key_down(
            &KeyStroke::new(key),
            &state,
            |next| active.set(next),
            Some(&mut on_select),
        );
        assert_eq!(disposition, KeyDisposition::Ignored);
    }
    assert!(selected.is_empty());
    assert_eq!(*active.current(), 3);
}
