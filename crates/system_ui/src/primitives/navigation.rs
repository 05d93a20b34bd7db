use super::*;

/// Roles and DOM tokens for one roving group flavor.
#[derive(Clone, Copy)]
struct GroupRoles {
    class: &'static str,
    group: &'static str,
    item: &'static str,
    kind: &'static str,
    item_kind: &'static str,
    attribute: SelectionAttribute,
}

const TAB_LIST: GroupRoles = GroupRoles {
    class: "ui-tab-list",
    group: "tablist",
    item: "tab",
    kind: "tab-list",
    item_kind: "tab",
    attribute: SelectionAttribute::Selected,
};

const RADIO_GROUP: GroupRoles = GroupRoles {
    class: "ui-radio-group",
    group: "radiogroup",
    item: "radio",
    kind: "radio-group",
    item_kind: "radio",
    attribute: SelectionAttribute::Checked,
};

const LISTBOX: GroupRoles = GroupRoles {
    class: "ui-listbox",
    group: "listbox",
    item: "option",
    kind: "listbox",
    item_kind: "option",
    attribute: SelectionAttribute::Selected,
};

fn navigation_defaults(orientation: Orientation, loop_focus: bool) -> NavigationConfig {
    NavigationConfig {
        orientation,
        loop_focus,
        ..NavigationConfig::default()
    }
}

/// Shared rendering for roving-tabindex groups.
///
/// `active` drives focus and tab order; `chosen` drives the selection attribute. Tab lists and
/// radio groups pass the same state for both.
struct RovingGroup {
    roles: GroupRoles,
    layout_class: Option<&'static str>,
    aria_label: Option<String>,
    id_prefix: Option<&'static str>,
    labels: Signal<Vec<String>>,
    disabled: Signal<Vec<usize>>,
    config: NavigationConfig,
    active: ControllableSignal<usize>,
    chosen: Signal<Option<usize>>,
    on_select: Option<Callback<usize>>,
}

impl RovingGroup {
    fn render(self) -> impl IntoView {
        let Self {
            roles,
            layout_class,
            aria_label,
            id_prefix,
            labels,
            disabled,
            config,
            active,
            chosen,
            on_select,
        } = self;

        let container = create_node_ref::<Div>();
        let item_count = Signal::derive(move || labels.with(Vec::len));
        let on_keydown = use_roving_index(
            RovingOptions {
                container,
                item_count,
                disabled,
                config,
            },
            active,
            on_select,
        );

        let item = move |(index, label): (usize, String)| {
            let is_disabled = move || disabled.with(|disabled| disabled.contains(&index));
            let aria = move || {
                ItemAria::for_item(
                    index,
                    active.get(),
                    chosen.get() == Some(index),
                    roles.attribute,
                    is_disabled(),
                )
            };
            let selection = move |name: &'static str| {
                move || (name == roles.attribute.attribute_name()).then(|| aria().selection.1)
            };
            let id = id_prefix.map(|prefix| format!("{prefix}-{}-{index}", roles.item));
            let controls = id_prefix
                .filter(|_| roles.item == "tab")
                .map(|prefix| format!("{prefix}-panel-{index}"));

            view! {
                <button
                    type="button"
                    class="ui-roving-item"
                    id=id
                    role=roles.item
                    aria-controls=controls
                    aria-selected=selection("aria-selected")
                    aria-checked=selection("aria-checked")
                    aria-disabled=move || aria().disabled
                    tabindex=move || aria().tabindex
                    data-ui-primitive="true"
                    data-ui-kind=roles.item_kind
                    data-ui-roving-item="true"
                    data-ui-selected=move || bool_token(chosen.get() == Some(index))
                    on:click=move |_| {
                        if is_disabled() {
                            return;
                        }
                        active.set(index);
                        if let Some(on_select) = on_select.as_ref() {
                            on_select.call(index);
                        }
                    }
                >
                    {label}
                </button>
            }
        };

        view! {
            <div
                class=merge_layout_class(roles.class, layout_class)
                role=roles.group
                aria-label=aria_label
                aria-orientation=aria_orientation(config.orientation)
                data-ui-primitive="true"
                data-ui-kind=roles.kind
                node_ref=container
                on:keydown=move |ev: KeyboardEvent| on_keydown.call(ev)
            >
                <For
                    each={move || labels.get().into_iter().enumerate().collect::<Vec<_>>()}
                    key={|(index, label): &(usize, String)| (*index, label.clone())}
                    children=item
                />
            </div>
        }
    }
}

#[component]
/// Tab list with automatic activation: arrow keys move focus and selection together.
///
/// With `id_prefix` set, tab `i` gets id `{prefix}-tab-{i}` and controls `{prefix}-panel-{i}`;
/// pair it with [`TabPanel`] using the same prefix.
pub fn TabList(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] id_prefix: Option<&'static str>,
    #[prop(into)] tabs: MaybeSignal<Vec<String>>,
    #[prop(optional, into)] selected: MaybeSignal<Option<usize>>,
    #[prop(optional)] default_selected: usize,
    #[prop(optional, into)] disabled: MaybeSignal<Vec<usize>>,
    #[prop(default = navigation_defaults(Orientation::Horizontal, true))]
    navigation: NavigationConfig,
    #[prop(optional)] on_change: Option<Callback<usize>>,
) -> impl IntoView {
    let selection = use_controllable_state(selected, default_selected, on_change);
    RovingGroup {
        roles: TAB_LIST,
        layout_class,
        aria_label,
        id_prefix,
        labels: Signal::derive(move || tabs.get()),
        disabled: Signal::derive(move || disabled.get()),
        config: navigation,
        active: selection,
        chosen: Signal::derive(move || Some(selection.get())),
        on_select: None,
    }
    .render()
}

#[component]
/// Panel shown while its tab is selected.
pub fn TabPanel(
    #[prop(optional)] layout_class: Option<&'static str>,
    id_prefix: &'static str,
    index: usize,
    #[prop(into)] selected: MaybeSignal<usize>,
    children: Children,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-tab-panel", layout_class)
            id=format!("{id_prefix}-panel-{index}")
            role="tabpanel"
            aria-labelledby=format!("{id_prefix}-tab-{index}")
            tabindex="0"
            hidden=move || selected.get() != index
            data-ui-primitive="true"
            data-ui-kind="tab-panel"
            data-ui-state=move || open_token(selected.get() == index)
        >
            {children()}
        </div>
    }
}

#[component]
/// Radio group navigable along both axes; moving checks the focused option.
pub fn RadioGroup(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(into)] options: MaybeSignal<Vec<String>>,
    #[prop(optional, into)] value: MaybeSignal<Option<usize>>,
    #[prop(optional)] default_value: usize,
    #[prop(optional, into)] disabled: MaybeSignal<Vec<usize>>,
    #[prop(default = navigation_defaults(Orientation::Both, true))]
    navigation: NavigationConfig,
    #[prop(optional)] on_change: Option<Callback<usize>>,
) -> impl IntoView {
    let checked = use_controllable_state(value, default_value, on_change);
    RovingGroup {
        roles: RADIO_GROUP,
        layout_class,
        aria_label,
        id_prefix: None,
        labels: Signal::derive(move || options.get()),
        disabled: Signal::derive(move || disabled.get()),
        config: navigation,
        active: checked,
        chosen: Signal::derive(move || Some(checked.get())),
        on_select: None,
    }
    .render()
}

#[component]
/// Single-select listbox with manual selection.
///
/// Arrow keys move focus without choosing; Enter, Space, or a click chooses the focused option.
/// Focus stops at either end.
pub fn Listbox(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(into)] options: MaybeSignal<Vec<String>>,
    #[prop(optional, into)] value: MaybeSignal<Option<usize>>,
    #[prop(optional)] default_value: Option<usize>,
    #[prop(optional, into)] disabled: MaybeSignal<Vec<usize>>,
    #[prop(default = navigation_defaults(Orientation::Vertical, false))]
    navigation: NavigationConfig,
    #[prop(optional)] on_change: Option<Callback<usize>>,
) -> impl IntoView {
    let chosen = use_controllable_state(
        Signal::derive(move || value.get().map(Some)).into(),
        default_value,
        Some(Callback::new(move |next: Option<usize>| {
            if let (Some(on_change), Some(index)) = (on_change.as_ref(), next) {
                on_change.call(index);
            }
        })),
    );
    let active = use_controllable_state(
        MaybeSignal::Static(None),
        default_value.unwrap_or(0),
        None,
    );

    RovingGroup {
        roles: LISTBOX,
        layout_class,
        aria_label,
        id_prefix: None,
        labels: Signal::derive(move || options.get()),
        disabled: Signal::derive(move || disabled.get()),
        config: navigation,
        active,
        chosen: Signal::derive(move || chosen.get()),
        on_select: Some(Callback::new(move |index| chosen.set(Some(index)))),
    }
    .render()
}
