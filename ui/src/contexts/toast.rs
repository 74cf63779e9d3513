use std::collections::HashMap;
use std::rc::Rc;

use uuid::Uuid;
use yew::prelude::*;

/// Milliseconds before a toast dismisses itself.
const DEFAULT_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastType {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub toast_type: ToastType,
    /// Insertion order, used to stack toasts oldest first.
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: HashMap<Uuid, Toast>,
    next_sequence: u64,
}

impl ToastState {
    pub fn ordered(&self) -> Vec<Toast> {
        let mut toasts: Vec<_> = self.toasts.values().cloned().collect();
        toasts.sort_by_key(|toast| toast.sequence);
        toasts
    }
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = (*self).clone();
        match action {
            ToastAction::Add(mut toast) => {
                toast.sequence = state.next_sequence;
                state.next_sequence += 1;
                state.toasts.insert(toast.id, toast);
            }
            ToastAction::Remove(id) => {
                state.toasts.remove(&id);
            }
        }
        Rc::new(state)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: Option<ToastContext>,
}

impl ToastHandle {
    fn add(&self, message: String, toast_type: ToastType) {
        let Some(context) = self.context.clone() else {
            tracing::warn!("toast without provider: {message}");
            return;
        };
        let id = Uuid::new_v4();
        context.dispatch(ToastAction::Add(Toast {
            id,
            message,
            toast_type,
            sequence: 0,
        }));

        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(DEFAULT_DURATION_MS).await;
            context.dispatch(ToastAction::Remove(id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(message.into(), ToastType::Error);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(message.into(), ToastType::Success);
    }

    pub fn remove(&self, id: Uuid) {
        if let Some(context) = &self.context {
            context.dispatch(ToastAction::Remove(id));
        }
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    ToastHandle {
        context: use_context::<ToastContext>(),
    }
}
