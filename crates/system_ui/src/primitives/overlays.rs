use super::*;

#[component]
/// Modal dialog surface that contains keyboard focus while open.
///
/// Content mounts only while `open` is true; focus moves into it once rendered and returns to
/// the previously focused element on close. Escape calls `on_dismiss` when one is supplied.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] open: MaybeSignal<bool>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_labelledby: Option<String>,
    #[prop(optional)] focus_trap: FocusTrapConfig,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let container = create_node_ref::<Div>();
    let active = Signal::derive(move || open.get());
    use_focus_trap(container, active, focus_trap);

    let on_keydown = move |ev: KeyboardEvent| {
        if ev.key() != "Escape" || ev.default_prevented() {
            return;
        }
        if let Some(on_dismiss) = on_dismiss.as_ref() {
            ev.prevent_default();
            ev.stop_propagation();
            on_dismiss.call(());
        }
    };

    view! {
        <div
            class=merge_layout_class("ui-modal", layout_class)
            id=id
            role="dialog"
            aria-modal="true"
            aria-label=aria_label
            aria-labelledby=aria_labelledby
            hidden=move || !open.get()
            data-ui-primitive="true"
            data-ui-kind="modal"
            data-ui-state=move || open_token(open.get())
            node_ref=container
            on:keydown=on_keydown
        >
            <Show when=move || open.get() fallback=|| ()>
                {children()}
            </Show>
        </div>
    }
}
